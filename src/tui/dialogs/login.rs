use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use schoolcal::app::{AppState, LoginField};

use crate::tui::dialogs::centered_rect;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.login_form else {
        return;
    };
    let labels = app.language.labels();

    let dialog_area = centered_rect(f, 50, 10);
    f.render_widget(Clear, dialog_area);

    let field_color = |field: LoginField| {
        if form.active_field == Some(field) {
            app.theme.selected_bg
        } else {
            Color::DarkGray
        }
    };

    let masked_password = "*".repeat(form.password.chars().count());

    let dialog_text = vec![
        Line::from(vec![Span::styled(
            labels.login,
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{}: ", labels.username),
                Style::default().fg(field_color(LoginField::Username)),
            ),
            Span::raw(&form.username),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{}: ", labels.password),
                Style::default().fg(field_color(LoginField::Password)),
            ),
            Span::raw(masked_password),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(format!(" = {} | ", labels.login)),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(format!(" = {}", labels.cancel)),
        ]),
    ];

    let dialog = Paragraph::new(dialog_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", labels.admin_page))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Left);

    f.render_widget(dialog, dialog_area);
}
