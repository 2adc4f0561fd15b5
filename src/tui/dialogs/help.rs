use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use schoolcal::app::AppState;

use crate::tui::dialogs::centered_rect;

pub fn render(f: &mut Frame, app: &AppState) {
    let help_area = centered_rect(f, 58, 20);
    f.render_widget(Clear, help_area);

    let section = Style::default().fg(app.theme.weekday_header);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "schoolcal",
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", section)]),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Navigate events (or week if no events)"),
        Line::from("  { / }    - Previous/next month"),
        Line::from("  t        - Jump to today"),
        Line::from("  Tab      - Show/hide the event list"),
        Line::from(""),
        Line::from(vec![Span::styled("Display:", section)]),
        Line::from("  L        - Switch language (中文/English)"),
        Line::from("  f        - Cycle the event type filter"),
        Line::from("  /        - Search events"),
        Line::from("  o        - Open the selected event's link"),
        Line::from(""),
        Line::from(vec![Span::styled("Admin:", section)]),
        Line::from("  A        - Admin page (login required)"),
        Line::from("  a / e / x - Add / edit / delete event"),
        Line::from("  O        - Log out, Esc - back to calendar"),
        Line::from(""),
        Line::from("  q/Esc    - Close help"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ? ")
                .style(Style::default().bg(ratatui::style::Color::Black)),
        )
        .alignment(Alignment::Left);

    f.render_widget(help, help_area);
}
