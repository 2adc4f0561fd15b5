use chrono::Datelike;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use schoolcal::{
    app::{AppState, Page},
    calendar::locale,
    ui::month_grid,
};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let labels = app.language.labels();
    let layout = month_grid::calculate_layout(app);

    let mut lines = vec![
        Line::from(vec![Span::styled(
            locale::month_title(layout.year, layout.month0, app.language),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(
            labels
                .weekdays
                .iter()
                .map(|day| {
                    Span::styled(
                        format!(" {:>3} ", day),
                        Style::default().fg(app.theme.weekday_header),
                    )
                })
                .collect::<Vec<_>>(),
        ),
    ];

    for week in &layout.weeks {
        let mut day_spans = Vec::new();

        for day_cell in &week.days {
            let day_text = if let Some(date) = day_cell.date {
                format!(" {:>3} ", date.day())
            } else {
                "     ".to_string()
            };

            let mut style = Style::default();

            if !day_cell.is_current_month {
                style = style.fg(app.theme.inactive_day);
            } else if day_cell.is_selected {
                style = style
                    .bg(app.theme.selected_bg)
                    .fg(app.theme.selected_fg)
                    .add_modifier(Modifier::BOLD);
            } else if day_cell.is_today {
                style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
            }

            if day_cell.has_events {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            day_spans.push(Span::styled(day_text, style));
        }

        lines.push(Line::from(day_spans));
    }

    lines.push(Line::from(""));

    let mut hints = vec![
        Span::styled("hjkl", Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled("{ }", Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled("t", Style::default().fg(Color::Green)),
        Span::raw(" | "),
        Span::styled("/", Style::default().fg(Color::Magenta)),
        Span::raw(format!(" {} | ", labels.search)),
        Span::styled("L", Style::default().fg(Color::Yellow)),
        Span::raw(format!(" {}", app.language.toggle().as_str())),
    ];
    if app.page == Page::Admin {
        hints.extend([
            Span::raw(" | "),
            Span::styled("a", Style::default().fg(Color::Green)),
            Span::raw(format!(" {}", labels.add_event)),
        ]);
    }
    lines.push(Line::from(hints));

    let content = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
