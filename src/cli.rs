use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use chrono::{Local, NaiveDate};

use schoolcal::{
    calendar::locale::{grade_label, kind_label, Language},
    calendar::Event,
    storage::config::Config,
    sync::engine::SyncEngine,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CliMode {
    Tui,
    Agenda(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub language: Option<Language>,
}

pub fn parse_cli() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1).collect())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut mode = CliMode::Tui;
    let mut language = None;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--agenda" => {
                let date = if let Some(next) = args.peek() {
                    if !next.starts_with("--") {
                        let date_str = args.next().expect("peeked value must exist");
                        NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                            .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", date_str))?
                    } else {
                        Local::now().date_naive()
                    }
                } else {
                    Local::now().date_naive()
                };
                mode = CliMode::Agenda(date);
            }
            "--lang" => {
                let code = args
                    .next()
                    .ok_or_else(|| "--lang requires a value (zh or en)".to_string())?;
                language = Some(
                    Language::parse(&code)
                        .ok_or_else(|| format!("Unknown language '{}'. Use zh or en.", code))?,
                );
            }
            "--help" => {
                println!("Usage: schoolcal [--agenda [YYYY-MM-DD]] [--lang zh|en]");
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(CliOptions { mode, language })
}

pub async fn run_agenda_mode(date: NaiveDate, language: Option<Language>) -> io::Result<()> {
    let config = Config::load_or_create().map_err(|e| io::Error::other(e.to_string()))?;
    let language = language.unwrap_or(config.ui.language);
    let engine = SyncEngine::new(&config);

    let mut events = match engine.fetch_events().await {
        Ok(list) => list,
        Err(e) => {
            eprintln!("Failed to fetch events: {}", e);
            Vec::new()
        }
    };

    events.retain(|event| event.occurs_on(date));
    events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    let agenda = format_agenda_text(date, &events, language);
    display_with_pager(&agenda)
}

fn format_agenda_text(date: NaiveDate, events: &[Event], language: Language) -> String {
    let labels = language.labels();
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        labels.events_for_date,
        date.format("%Y-%m-%d")
    ));
    lines.push(String::new());

    if events.is_empty() {
        lines.push(labels.no_events.to_string());
    } else {
        for event in events {
            lines.push(format!("- {}", build_agenda_line(event, language)));
        }
    }

    lines.join("\n")
}

fn build_agenda_line(event: &Event, language: Language) -> String {
    let date_label = if event.start == event.end {
        event.start.format("%m-%d").to_string()
    } else {
        format!("{}~{}", event.start.format("%m-%d"), event.end.format("%m-%d"))
    };

    let mut line = format!(
        "{:<12} [{}] {}",
        date_label,
        kind_label(event.kind, language),
        event.title.get(language)
    );

    if !event.grades.is_empty() {
        let grades: Vec<String> = event
            .grades
            .iter()
            .map(|g| grade_label(g, language))
            .collect();
        line.push_str(&format!(" ({})", grades.join(", ")));
    }

    if let Some(link) = &event.link {
        line.push_str(&format!(" <{}>", link));
    }

    line
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            print!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd).args(&args).stdin(Stdio::piped()).spawn() {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolcal::calendar::{EventKind, Localized};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn no_arguments_selects_the_tui() {
        let options = parse_args(args(&[])).unwrap();

        assert_eq!(options.mode, CliMode::Tui);
        assert_eq!(options.language, None);
    }

    #[test]
    fn agenda_with_a_date_parses_it() {
        let options = parse_args(args(&["--agenda", "2025-04-11"])).unwrap();

        assert_eq!(options.mode, CliMode::Agenda(date(2025, 4, 11)));
    }

    #[test]
    fn agenda_without_a_date_uses_today() {
        let options = parse_args(args(&["--agenda"])).unwrap();

        assert_eq!(options.mode, CliMode::Agenda(Local::now().date_naive()));
    }

    #[test]
    fn agenda_rejects_a_malformed_date() {
        let result = parse_args(args(&["--agenda", "11/04/2025"]));

        assert!(result.is_err());
    }

    #[test]
    fn lang_flag_overrides_the_language() {
        let options = parse_args(args(&["--lang", "en"])).unwrap();

        assert_eq!(options.language, Some(Language::En));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(parse_args(args(&["--frobnicate"])).is_err());
        assert!(parse_args(args(&["--lang", "fr"])).is_err());
    }

    #[test]
    fn agenda_text_lists_events_with_localized_labels() {
        let event = Event {
            id: "ev1".to_string(),
            title: Localized::new("運動會", "Sports Day"),
            description: Localized::default(),
            start: date(2025, 4, 10),
            end: date(2025, 4, 12),
            kind: EventKind::SchoolActivity,
            grades: vec!["all-grades".to_string()],
            link: None,
        };

        let zh = format_agenda_text(date(2025, 4, 11), &[event.clone()], Language::Zh);
        let en = format_agenda_text(date(2025, 4, 11), &[event], Language::En);

        assert!(zh.contains("運動會"));
        assert!(zh.contains("全年級"));
        assert!(en.contains("Sports Day"));
        assert!(en.contains("All grades"));
    }

    #[test]
    fn agenda_text_mentions_an_empty_day() {
        let text = format_agenda_text(date(2025, 4, 11), &[], Language::En);

        assert!(text.contains("No events"));
    }
}
