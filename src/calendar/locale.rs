use serde::{Deserialize, Serialize};

use crate::calendar::event::EventKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

impl Language {
    pub fn toggle(&self) -> Language {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    pub fn parse(value: &str) -> Option<Language> {
        match value {
            "zh" => Some(Language::Zh),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::Zh => &ZH,
            Language::En => &EN,
        }
    }
}

/// UI strings for one language.
#[derive(Debug)]
pub struct Labels {
    pub app_title: &'static str,
    pub public_page: &'static str,
    pub admin_page: &'static str,
    pub today_events: &'static str,
    pub events_for_date: &'static str,
    pub no_events: &'static str,
    pub all_types: &'static str,
    pub search: &'static str,
    pub no_results: &'static str,
    pub add_event: &'static str,
    pub edit_event: &'static str,
    pub delete_event: &'static str,
    pub confirm_delete: &'static str,
    pub view_details: &'static str,
    pub title_zh: &'static str,
    pub title_en: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub event_type: &'static str,
    pub grade: &'static str,
    pub link: &'static str,
    pub submit: &'static str,
    pub cancel: &'static str,
    pub login: &'static str,
    pub logout: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub login_failed: &'static str,
    pub login_required: &'static str,
    pub weekdays: [&'static str; 7],
}

static ZH: Labels = Labels {
    app_title: "學校日曆",
    public_page: "行事曆",
    admin_page: "管理頁面",
    today_events: "今日事件",
    events_for_date: "日期事件:",
    no_events: "無事件",
    all_types: "所有類型",
    search: "搜尋",
    no_results: "查無結果",
    add_event: "新增事件",
    edit_event: "修改",
    delete_event: "刪除",
    confirm_delete: "確定要刪除嗎?",
    view_details: "查看詳情",
    title_zh: "標題 (中)",
    title_en: "標題 (英)",
    start_date: "開始日期",
    end_date: "結束日期",
    event_type: "類別",
    grade: "年級",
    link: "連結",
    submit: "提交",
    cancel: "取消",
    login: "登入",
    logout: "登出",
    username: "用戶名",
    password: "密碼",
    login_failed: "帳號或密碼錯誤",
    login_required: "請先登入",
    weekdays: ["一", "二", "三", "四", "五", "六", "日"],
};

static EN: Labels = Labels {
    app_title: "School Calendar",
    public_page: "Calendar",
    admin_page: "Admin",
    today_events: "Today's Events",
    events_for_date: "Events for",
    no_events: "No events",
    all_types: "All Types",
    search: "Search",
    no_results: "No results",
    add_event: "Add Event",
    edit_event: "Edit",
    delete_event: "Delete",
    confirm_delete: "Delete this event?",
    view_details: "View Details",
    title_zh: "Title (zh)",
    title_en: "Title (en)",
    start_date: "Start Date",
    end_date: "End Date",
    event_type: "Type",
    grade: "Grade",
    link: "Link",
    submit: "Submit",
    cancel: "Cancel",
    login: "Log in",
    logout: "Log out",
    username: "Username",
    password: "Password",
    login_failed: "Invalid username or password",
    login_required: "Please log in first",
    weekdays: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
};

pub fn kind_label(kind: EventKind, language: Language) -> &'static str {
    match language {
        Language::Zh => match kind {
            EventKind::ImportantExam => "重要考試",
            EventKind::SchoolActivity => "活動/務實",
            EventKind::Announcement => "公告",
            EventKind::Holiday => "假期",
            EventKind::Meeting => "會議/研習",
            EventKind::Exam => "檢定/測驗",
            EventKind::Lecture => "課程/講座",
            EventKind::UniformInspection => "服儀定期檢查",
            EventKind::Other => "其他",
        },
        Language::En => match kind {
            EventKind::ImportantExam => "Important Exam",
            EventKind::SchoolActivity => "School Activity",
            EventKind::Announcement => "Announcement",
            EventKind::Holiday => "Holiday",
            EventKind::Meeting => "Meeting",
            EventKind::Exam => "Exam",
            EventKind::Lecture => "Lecture",
            EventKind::UniformInspection => "Uniform Inspection",
            EventKind::Other => "Other",
        },
    }
}

pub fn grade_label(grade: &str, language: Language) -> String {
    match language {
        Language::Zh => match grade {
            "grade-1" => "高一".to_string(),
            "grade-2" => "高二".to_string(),
            "grade-3" => "高三".to_string(),
            "all-grades" => "全年級".to_string(),
            other => other.to_string(),
        },
        Language::En => match grade {
            "grade-1" => "Grade 1".to_string(),
            "grade-2" => "Grade 2".to_string(),
            "grade-3" => "Grade 3".to_string(),
            "all-grades" => "All grades".to_string(),
            other => other.to_string(),
        },
    }
}

pub fn month_title(year: i32, month0: u32, language: Language) -> String {
    match language {
        Language::Zh => format!("{}年{}月", year, month0 + 1),
        Language::En => {
            const MONTHS: [&str; 12] = [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ];
            format!("{} {}", MONTHS[month0 as usize % 12], year)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_languages() {
        assert_eq!(Language::Zh.toggle(), Language::En);
        assert_eq!(Language::En.toggle(), Language::Zh);
    }

    #[test]
    fn parse_accepts_known_codes_only() {
        assert_eq!(Language::parse("zh"), Some(Language::Zh));
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("fr"), None);
    }

    #[test]
    fn language_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Zh).unwrap(), "\"zh\"");
        assert_eq!(serde_json::from_str::<Language>("\"en\"").unwrap(), Language::En);
    }

    #[test]
    fn every_kind_has_a_label_in_both_languages() {
        for kind in EventKind::ALL {
            assert!(!kind_label(kind, Language::Zh).is_empty());
            assert!(!kind_label(kind, Language::En).is_empty());
        }
    }

    #[test]
    fn known_grades_are_localized() {
        assert_eq!(grade_label("grade-1", Language::Zh), "高一");
        assert_eq!(grade_label("all-grades", Language::En), "All grades");
    }

    #[test]
    fn unknown_grades_pass_through() {
        assert_eq!(grade_label("grade-7", Language::Zh), "grade-7");
    }

    #[test]
    fn month_title_is_localized() {
        assert_eq!(month_title(2025, 3, Language::Zh), "2025年4月");
        assert_eq!(month_title(2025, 3, Language::En), "April 2025");
    }
}
