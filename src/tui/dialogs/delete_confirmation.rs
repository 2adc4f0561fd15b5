use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use schoolcal::app::AppState;

use crate::tui::dialogs::centered_rect;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(event_id) = &app.confirm_delete_id else {
        return;
    };
    let labels = app.language.labels();

    let event_title = app
        .events
        .iter()
        .find(|e| &e.id == event_id)
        .map(|e| e.title.get(app.language))
        .unwrap_or("?");

    let dialog_area = centered_rect(f, 60, 9);
    f.render_widget(Clear, dialog_area);

    let dialog_text = vec![
        Line::from(vec![Span::styled(
            labels.delete_event,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                event_title,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" — "),
            Span::raw(labels.confirm_delete),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Y", Style::default().fg(Color::Green)),
            Span::raw(format!(" = {} | ", labels.submit)),
            Span::styled("N", Style::default().fg(Color::Red)),
            Span::raw(format!(" = {}", labels.cancel)),
        ]),
    ];

    let dialog = Paragraph::new(dialog_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", labels.delete_event))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Center);

    f.render_widget(dialog, dialog_area);
}
