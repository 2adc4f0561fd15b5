use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use schoolcal::app::AppState;

use crate::tui::dialogs::centered_rect;

/// Blocking message box; the session loop swallows every key except the
/// ones that dismiss it.
pub fn render(f: &mut Frame, app: &AppState) {
    let Some(message) = &app.alert else {
        return;
    };

    let dialog_area = centered_rect(f, 56, 8);
    f.render_widget(Clear, dialog_area);

    let dialog_text = vec![
        Line::from(""),
        Line::from(Span::raw(message.as_str())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" = OK"),
        ]),
    ];

    let dialog = Paragraph::new(dialog_text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error))
                .title(Span::styled(
                    " ! ",
                    Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
                ))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Center);

    f.render_widget(dialog, dialog_area);
}
