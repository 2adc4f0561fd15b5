use ratatui::style::Color;

use crate::calendar::EventKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    pub event_indicator: Color,
    pub weekday_header: Color,
    pub inactive_day: Color,
    pub status_bar: Color,
    pub grade_chip: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            today: Color::Green,
            event_indicator: Color::Cyan,
            weekday_header: Color::Yellow,
            inactive_day: Color::DarkGray,
            status_bar: Color::White,
            grade_chip: Color::Magenta,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            today: Color::Rgb(184, 187, 38),
            event_indicator: Color::Rgb(142, 192, 124),
            weekday_header: Color::Rgb(254, 128, 25),
            inactive_day: Color::Rgb(146, 131, 116),
            status_bar: Color::Rgb(235, 219, 178),
            grade_chip: Color::Rgb(211, 134, 155),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name {
            "gruvbox" => Self::gruvbox(),
            _ => Self::default_theme(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

/// Badge colors per event category, shared by all themes.
pub fn kind_color(kind: EventKind) -> Color {
    match kind {
        EventKind::ImportantExam | EventKind::Exam => Color::Rgb(249, 115, 22),
        EventKind::SchoolActivity => Color::Rgb(59, 130, 246),
        EventKind::Announcement => Color::Rgb(234, 179, 8),
        EventKind::Holiday => Color::Rgb(34, 197, 94),
        EventKind::Meeting => Color::Rgb(139, 92, 246),
        EventKind::Lecture => Color::Rgb(20, 184, 166),
        EventKind::UniformInspection => Color::Rgb(236, 72, 153),
        EventKind::Other => Color::Rgb(107, 114, 128),
    }
}
