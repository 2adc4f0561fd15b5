use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use schoolcal::{
    app::{AppState, Page},
    calendar::locale::{grade_label, kind_label},
    calendar::Event,
    ui::theme::kind_color,
};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let labels = app.language.labels();
    let events = app.visible_events();

    let heading = match app.selected_date {
        Some(date) => format!("{} {}", labels.events_for_date, date.format("%Y-%m-%d")),
        None => labels.today_events.to_string(),
    };

    let filter_label = match app.kind_filter {
        Some(kind) => Span::styled(
            kind_label(kind, app.language),
            Style::default().fg(kind_color(kind)),
        ),
        None => Span::styled(labels.all_types, Style::default().fg(Color::DarkGray)),
    };

    let mut lines = vec![
        Line::from(vec![Span::styled(
            heading,
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("f ", Style::default().fg(Color::Cyan)),
            filter_label,
        ]),
        Line::from(""),
    ];

    if events.is_empty() {
        lines.push(Line::from(vec![Span::styled(
            labels.no_events,
            Style::default().fg(Color::DarkGray),
        )]));
    } else {
        for (idx, event) in events.iter().enumerate() {
            let is_selected = idx == app.selected_event;
            lines.extend(event_lines(app, event, is_selected));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(hint_spans(app)));
    }

    let content = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}

fn event_lines<'a>(app: &AppState, event: &'a Event, is_selected: bool) -> Vec<Line<'a>> {
    let date_text = if event.start == event.end {
        event.start.format("%m-%d").to_string()
    } else {
        format!("{} - {}", event.start.format("%m-%d"), event.end.format("%m-%d"))
    };

    let (date_style, title_style) = if is_selected {
        let base = Style::default()
            .bg(app.theme.selected_bg)
            .add_modifier(Modifier::BOLD);
        (base.fg(app.theme.selected_fg), base.fg(app.theme.selected_fg))
    } else {
        (
            Style::default().fg(app.theme.success),
            Style::default().fg(app.theme.status_bar),
        )
    };

    let cursor = if is_selected { ">" } else { " " };

    let mut title_spans = vec![
        Span::styled(cursor, Style::default().fg(app.theme.selected_bg)),
        Span::styled(date_text, date_style),
        Span::raw(" "),
        Span::styled(event.title.get(app.language), title_style),
    ];
    if event.link.is_some() {
        title_spans.push(Span::styled(" ↗", Style::default().fg(Color::Cyan)));
    }

    let mut badge_spans = vec![Span::raw("  ")];
    badge_spans.push(Span::styled(
        kind_label(event.kind, app.language),
        Style::default().fg(kind_color(event.kind)),
    ));
    for grade in &event.grades {
        badge_spans.push(Span::raw(" "));
        badge_spans.push(Span::styled(
            grade_label(grade, app.language),
            Style::default().fg(app.theme.grade_chip),
        ));
    }

    vec![Line::from(title_spans), Line::from(badge_spans)]
}

fn hint_spans(app: &AppState) -> Vec<Span<'static>> {
    let labels = app.language.labels();
    let mut hints = vec![
        Span::styled("j/k", Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled("o", Style::default().fg(Color::Cyan)),
        Span::raw(format!(" {}", labels.view_details)),
    ];
    if app.page == Page::Admin {
        hints.extend([
            Span::raw(" | "),
            Span::styled("e", Style::default().fg(Color::Green)),
            Span::raw(format!(" {}", labels.edit_event)),
            Span::raw(" | "),
            Span::styled("x", Style::default().fg(Color::Red)),
            Span::raw(format!(" {}", labels.delete_event)),
        ]);
    }
    hints
}
