use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use schoolcal::app::AppState;
use schoolcal::calendar::locale::kind_label;
use schoolcal::ui::theme::kind_color;

use crate::tui::dialogs::centered_rect;

const MAX_RESULTS: usize = 8;

pub fn render(f: &mut Frame, app: &AppState) {
    let labels = app.language.labels();
    let results = app.search_results();

    let panel_area = centered_rect(f, 64, 16);
    f.render_widget(Clear, panel_area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Magenta)),
            Span::raw(app.search_query.as_str()),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    if app.search_query.is_empty() {
        lines.push(Line::from(Span::styled(
            labels.search,
            Style::default().fg(Color::DarkGray),
        )));
    } else if results.is_empty() {
        lines.push(Line::from(Span::styled(
            labels.no_results,
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for (idx, event) in results.iter().take(MAX_RESULTS).enumerate() {
            let is_selected = idx == app.search_selected;
            let title_style = if is_selected {
                Style::default()
                    .bg(app.theme.selected_bg)
                    .fg(app.theme.selected_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.status_bar)
            };

            lines.push(Line::from(vec![
                Span::styled(
                    if is_selected { "> " } else { "  " },
                    Style::default().fg(app.theme.selected_bg),
                ),
                Span::styled(event.start.format("%Y-%m-%d").to_string(), Style::default().fg(app.theme.success)),
                Span::raw(" "),
                Span::styled(event.title.get(app.language), title_style),
                Span::raw(" "),
                Span::styled(
                    kind_label(event.kind, app.language),
                    Style::default().fg(kind_color(event.kind)),
                ),
            ]));
        }

        if results.len() > MAX_RESULTS {
            lines.push(Line::from(Span::styled(
                format!("… +{}", results.len() - MAX_RESULTS),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(format!(" = {}", labels.cancel)),
    ]));

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", labels.search))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Left);

    f.render_widget(panel, panel_area);
}
