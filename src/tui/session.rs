use std::io;

use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use schoolcal::{
    app::{Action, AppState, Mode},
    calendar::locale::Language,
    input::{form_mode, login_mode, normal_mode, search_mode},
    storage::config::Config,
    sync::engine::SyncEngine,
    ui::theme::Theme,
};

use crate::tui::presentation::ui;

pub async fn run_tui(language_override: Option<Language>) -> anyhow::Result<()> {
    let config = Config::load_or_create().context("loading configuration")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let engine = SyncEngine::new(&config);
    let mut app = AppState::new()
        .with_theme(Theme::get_by_name(&config.ui.theme))
        .with_language(language_override.unwrap_or(config.ui.language))
        .with_session(engine.restore_session());
    app.event_list_visible = config.ui.event_list_visible;

    // Mirror the web client: the list opens filtered to today.
    app.apply(Action::SelectDate(Some(Local::now().date_naive())));
    dispatch(&mut terminal, &mut app, &engine, Action::Refresh).await?;

    let res = run_app(&mut terminal, &mut app, &engine).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    engine: &SyncEngine,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            // The alert is modal: nothing else reacts until dismissed.
            if app.alert.is_some() {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    app.dismiss_alert();
                }
                continue;
            }

            if app.show_help {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc) {
                    app.show_help = false;
                }
                continue;
            }

            if app.confirm_delete_id.is_some() {
                handle_delete_confirmation(key.code, terminal, app, engine).await?;
                continue;
            }

            let actions = match app.mode {
                Mode::Normal => {
                    if key.code == KeyCode::Char('q') {
                        return Ok(());
                    }
                    normal_mode::handle_key(key.code, app)
                }
                Mode::Search => search_mode::handle_key(key.code, app),
                Mode::Form => form_mode::handle_key(key.code, app),
                Mode::Login => login_mode::handle_key(key.code, app),
            };

            for action in actions {
                dispatch(terminal, app, engine, action).await?;
            }
        }
    }
}

/// Apply an action, then run whatever commands it produced to
/// completion, folding each outcome back into the state. Commands run
/// serially; the redraw before the first await shows the sync status.
async fn dispatch<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    engine: &SyncEngine,
    action: Action,
) -> io::Result<()> {
    let commands = app.apply(action);
    if commands.is_empty() {
        return Ok(());
    }

    terminal.draw(|f| ui(f, app))?;

    for command in commands {
        let outcome = engine.execute(command).await;
        app.apply_outcome(outcome);
    }

    Ok(())
}

async fn handle_delete_confirmation<B: ratatui::backend::Backend>(
    code: KeyCode,
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    engine: &SyncEngine,
) -> io::Result<()> {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(event_id) = app.confirm_delete_id.take() {
                tracing::info!("Deleting event: {}", event_id);
                dispatch(terminal, app, engine, Action::SubmitDelete(event_id)).await?;
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.confirm_delete_id = None;
        }
        _ => {}
    }
    Ok(())
}
