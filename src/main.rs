mod cli;
use cli::{parse_cli, run_agenda_mode, CliMode};
mod tui;
use tui::run_tui;

use schoolcal::storage::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let options = match parse_cli() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("Usage: schoolcal [--agenda [YYYY-MM-DD]] [--lang zh|en]");
            return Ok(());
        }
    };

    match options.mode {
        CliMode::Agenda(date) => run_agenda_mode(date, options.language).await?,
        CliMode::Tui => run_tui(options.language).await?,
    }

    Ok(())
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "schoolcal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("schoolcal started");
}
