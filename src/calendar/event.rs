use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::locale::Language;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Localized {
    pub zh: String,
    pub en: String,
}

impl Localized {
    pub fn new(zh: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            zh: zh.into(),
            en: en.into(),
        }
    }

    /// Text for the requested language, falling back to the other one
    /// when the requested side is empty.
    pub fn get(&self, language: Language) -> &str {
        let (preferred, fallback) = match language {
            Language::Zh => (&self.zh, &self.en),
            Language::En => (&self.en, &self.zh),
        };
        if preferred.is_empty() { fallback } else { preferred }
    }

    pub fn is_empty(&self) -> bool {
        self.zh.is_empty() && self.en.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    ImportantExam,
    SchoolActivity,
    Announcement,
    Holiday,
    Meeting,
    Exam,
    Lecture,
    UniformInspection,
    #[serde(other)]
    Other,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::ImportantExam,
        EventKind::SchoolActivity,
        EventKind::Announcement,
        EventKind::Holiday,
        EventKind::Meeting,
        EventKind::Exam,
        EventKind::Lecture,
        EventKind::UniformInspection,
        EventKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ImportantExam => "important-exam",
            EventKind::SchoolActivity => "school-activity",
            EventKind::Announcement => "announcement",
            EventKind::Holiday => "holiday",
            EventKind::Meeting => "meeting",
            EventKind::Exam => "exam",
            EventKind::Lecture => "lecture",
            EventKind::UniformInspection => "uniform-inspection",
            EventKind::Other => "other",
        }
    }

    pub fn parse(value: &str) -> EventKind {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .unwrap_or(EventKind::Other)
    }

    pub fn next(&self) -> EventKind {
        let index = EventKind::ALL.iter().position(|k| k == self).unwrap_or(0);
        EventKind::ALL[(index + 1) % EventKind::ALL.len()]
    }

    pub fn prev(&self) -> EventKind {
        let index = EventKind::ALL.iter().position(|k| k == self).unwrap_or(0);
        EventKind::ALL[(index + EventKind::ALL.len() - 1) % EventKind::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: Localized,
    pub description: Localized,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kind: EventKind,
    pub grades: Vec<String>,
    pub link: Option<String>,
}

impl Event {
    /// Inclusive date-range containment, the filter the event list uses.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return false;
        }
        [
            &self.title.zh,
            &self.title.en,
            &self.description.zh,
            &self.description.en,
        ]
        .iter()
        .any(|text| text.to_lowercase().contains(&needle))
    }
}

/// An event as the admin form produces it; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: Localized,
    pub description: Localized,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kind: EventKind,
    pub grades: Vec<String>,
    pub link: Option<String>,
}

impl EventDraft {
    pub fn new(title: Localized, start: NaiveDate, end: Option<NaiveDate>, kind: EventKind) -> Self {
        Self {
            title,
            description: Localized::default(),
            start,
            end: end.unwrap_or(start).max(start),
            kind,
            grades: Vec::new(),
            link: None,
        }
    }

    pub fn with_grades(mut self, grades: Vec<String>) -> Self {
        self.grades = grades;
        self
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }
}
