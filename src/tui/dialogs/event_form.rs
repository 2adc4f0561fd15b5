use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use schoolcal::app::{AppState, FormField, GRADE_CHOICES};
use schoolcal::calendar::locale::{grade_label, kind_label};

use crate::tui::dialogs::centered_rect;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.event_form else {
        return;
    };
    let labels = app.language.labels();

    let form_area = centered_rect(f, 70, 20);
    f.render_widget(Clear, form_area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;
    let field_color = |field: FormField| {
        if form.active_field == field {
            active_color
        } else {
            inactive_color
        }
    };

    let form_title = if form.is_editing() {
        labels.edit_event
    } else {
        labels.add_event
    };

    let mut grade_spans = vec![Span::styled(
        format!("{}: ", labels.grade),
        Style::default().fg(field_color(FormField::Grades)),
    )];
    for grade in GRADE_CHOICES {
        let style = if form.grades.iter().any(|g| g == grade) {
            Style::default()
                .fg(app.theme.grade_chip)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(inactive_color)
        };
        grade_spans.push(Span::styled(
            format!("[{}] ", grade_label(grade, app.language)),
            style,
        ));
    }

    let form_text = vec![
        Line::from(vec![Span::styled(
            form_title,
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{}: ", labels.title_zh),
                Style::default().fg(field_color(FormField::TitleZh)),
            ),
            Span::raw(&form.title_zh),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{}: ", labels.title_en),
                Style::default().fg(field_color(FormField::TitleEn)),
            ),
            Span::raw(&form.title_en),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{}: ", labels.start_date),
                Style::default().fg(field_color(FormField::Start)),
            ),
            Span::raw(&form.start_input),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{}: ", labels.end_date),
                Style::default().fg(field_color(FormField::End)),
            ),
            Span::raw(&form.end_input),
            Span::styled(
                if form.end_input.is_empty() { " (= start)" } else { "" },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{}: ", labels.event_type),
                Style::default().fg(field_color(FormField::Kind)),
            ),
            Span::raw(kind_label(form.kind, app.language)),
            Span::styled(
                if form.active_field == FormField::Kind {
                    " ←/→"
                } else {
                    ""
                },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(grade_spans),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{}: ", labels.link),
                Style::default().fg(field_color(FormField::Link)),
            ),
            Span::raw(&form.link),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(format!(" = {} | ", labels.submit)),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(format!(" = {}", labels.cancel)),
        ]),
    ];

    let form_paragraph = Paragraph::new(form_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", form_title))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
