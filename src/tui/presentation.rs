use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use schoolcal::app::{AppState, Mode, Page, SyncStatus};
use schoolcal::calendar::locale;

use crate::tui::{dialogs, views};

pub fn ui(f: &mut Frame, app: &AppState) {
    let labels = app.language.labels();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let page_label = match app.page {
        Page::Public => labels.public_page,
        Page::Admin => labels.admin_page,
    };
    let title_text = format!(
        "{} - {} - {}",
        labels.app_title,
        page_label,
        locale::month_title(app.year, app.month0, app.language),
    );

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    if app.event_list_visible {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[1]);

        views::month::render(f, app, content_chunks[0]);
        views::event_list::render(f, app, content_chunks[1]);
    } else {
        views::month::render(f, app, main_chunks[1]);
    }

    let status_text = match &app.sync_status {
        SyncStatus::Error(message) => message.clone(),
        status => format!(
            "Events: {} | Sync: {:?} | Press 'q' to quit, '?' for help",
            app.events.len(),
            status
        ),
    };
    let status_color = match &app.sync_status {
        SyncStatus::Error(_) => app.theme.error,
        _ => app.theme.status_bar,
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main_chunks[2]);

    if app.mode == Mode::Search {
        dialogs::search_panel::render(f, app);
    }

    if app.event_form.is_some() {
        dialogs::event_form::render(f, app);
    }

    if app.login_form.is_some() {
        dialogs::login::render(f, app);
    }

    if app.confirm_delete_id.is_some() {
        dialogs::delete_confirmation::render(f, app);
    }

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.alert.is_some() {
        dialogs::alert::render(f, app);
    }
}
