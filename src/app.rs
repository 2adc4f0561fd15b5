use chrono::{Datelike, Local, NaiveDate};

use crate::calendar::locale::Language;
use crate::calendar::{Event, EventDraft, EventKind, Localized};
use crate::session::{AuthError, Session};
use crate::sync::engine::SyncError;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Public,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Form,
    Login,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Idle,
    Syncing,
    Synced,
    Error(String),
}

/// A store operation requested by the UI. Applying an action never
/// performs I/O itself; network effects come back as commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLanguage(Language),
    PrevMonth,
    NextMonth,
    GoToToday,
    SelectDate(Option<NaiveDate>),
    ToggleEventList,
    SetKindFilter(Option<EventKind>),
    SetSearchQuery(String),
    Refresh,
    SubmitAdd(EventDraft),
    SubmitUpdate(Event),
    SubmitDelete(String),
    LogIn { username: String, password: String },
    LogOut,
}

/// A side effect the driving loop must execute. Network commands carry
/// the sequence number their outcome will be checked against.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchEvents { seq: u64 },
    CreateEvent { seq: u64, draft: EventDraft },
    UpdateEvent { seq: u64, event: Event },
    DeleteEvent { seq: u64, id: String },
    LogIn { username: String, password: String },
    LogOut,
}

#[derive(Debug)]
pub enum Outcome {
    EventsFetched { seq: u64, result: Result<Vec<Event>, SyncError> },
    EventCreated { seq: u64, result: Result<Event, SyncError> },
    EventUpdated { seq: u64, result: Result<Event, SyncError> },
    EventDeleted { seq: u64, result: Result<String, SyncError> },
    LoggedIn(Result<Session, AuthError>),
    LoggedOut(Result<(), AuthError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    TitleZh,
    TitleEn,
    Start,
    End,
    Kind,
    Grades,
    Link,
}

pub const GRADE_CHOICES: [&str; 4] = ["grade-1", "grade-2", "grade-3", "all-grades"];

/// Ephemeral state of the add/edit dialog. Descriptions are carried
/// through edits but not edited here, matching the admin form surface.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub title_zh: String,
    pub title_en: String,
    pub start_input: String,
    pub end_input: String,
    pub kind: EventKind,
    pub grades: Vec<String>,
    pub link: String,
    pub active_field: FormField,
    pub event_id: Option<String>,
    description: Localized,
}

impl EventForm {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title_zh: String::new(),
            title_en: String::new(),
            start_input: date.format("%Y-%m-%d").to_string(),
            end_input: String::new(),
            kind: EventKind::ImportantExam,
            grades: Vec::new(),
            link: String::new(),
            active_field: FormField::TitleZh,
            event_id: None,
            description: Localized::default(),
        }
    }

    pub fn for_event(event: &Event) -> Self {
        Self {
            title_zh: event.title.zh.clone(),
            title_en: event.title.en.clone(),
            start_input: event.start.format("%Y-%m-%d").to_string(),
            end_input: event.end.format("%Y-%m-%d").to_string(),
            kind: event.kind,
            grades: event.grades.clone(),
            link: event.link.clone().unwrap_or_default(),
            active_field: FormField::TitleZh,
            event_id: Some(event.id.clone()),
            description: event.description.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.event_id.is_some()
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::TitleZh => FormField::TitleEn,
            FormField::TitleEn => FormField::Start,
            FormField::Start => FormField::End,
            FormField::End => FormField::Kind,
            FormField::Kind => FormField::Grades,
            FormField::Grades => FormField::Link,
            FormField::Link => FormField::TitleZh,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::TitleZh => FormField::Link,
            FormField::TitleEn => FormField::TitleZh,
            FormField::Start => FormField::TitleEn,
            FormField::End => FormField::Start,
            FormField::Kind => FormField::End,
            FormField::Grades => FormField::Kind,
            FormField::Link => FormField::Grades,
        };
    }

    pub fn toggle_grade(&mut self, grade: &str) {
        if let Some(index) = self.grades.iter().position(|g| g == grade) {
            self.grades.remove(index);
        } else {
            self.grades.push(grade.to_string());
        }
    }

    fn parsed_dates(&self) -> Result<(NaiveDate, Option<NaiveDate>), String> {
        let start = NaiveDate::parse_from_str(self.start_input.trim(), "%Y-%m-%d")
            .map_err(|_| format!("Invalid start date '{}'", self.start_input))?;

        let end = if self.end_input.trim().is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(self.end_input.trim(), "%Y-%m-%d")
                    .map_err(|_| format!("Invalid end date '{}'", self.end_input))?,
            )
        };

        Ok((start, end))
    }

    fn title(&self) -> Result<Localized, String> {
        let title = Localized::new(self.title_zh.trim(), self.title_en.trim());
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        Ok(title)
    }

    fn link(&self) -> Option<String> {
        let link = self.link.trim();
        (!link.is_empty()).then(|| link.to_string())
    }

    pub fn draft(&self) -> Result<EventDraft, String> {
        let (start, end) = self.parsed_dates()?;
        Ok(EventDraft::new(self.title()?, start, end, self.kind)
            .with_grades(self.grades.clone())
            .with_link(self.link()))
    }

    pub fn updated_event(&self) -> Result<Event, String> {
        let id = self
            .event_id
            .clone()
            .ok_or_else(|| "Form is not editing an event".to_string())?;
        let (start, end) = self.parsed_dates()?;
        let end = end.unwrap_or(start).max(start);

        Ok(Event {
            id,
            title: self.title()?,
            description: self.description.clone(),
            start,
            end,
            kind: self.kind,
            grades: self.grades.clone(),
            link: self.link(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub active_field: Option<LoginField>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            active_field: Some(LoginField::Username),
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            Some(LoginField::Username) => Some(LoginField::Password),
            _ => Some(LoginField::Username),
        };
    }
}

pub struct AppState {
    pub year: i32,
    pub month0: u32,
    pub language: Language,
    pub events: Vec<Event>,
    pub selected_date: Option<NaiveDate>,
    pub event_list_visible: bool,
    pub kind_filter: Option<EventKind>,
    pub search_query: String,
    pub search_selected: usize,
    pub session: Session,
    pub page: Page,
    pub mode: Mode,
    pub sync_status: SyncStatus,
    pub alert: Option<String>,
    pub event_form: Option<EventForm>,
    pub login_form: Option<LoginForm>,
    pub confirm_delete_id: Option<String>,
    pub selected_event: usize,
    pub show_help: bool,
    pub theme: Theme,
    next_seq: u64,
    applied_seq: u64,
}

impl AppState {
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month0: today.month0(),
            language: Language::Zh,
            events: Vec::new(),
            selected_date: None,
            event_list_visible: true,
            kind_filter: None,
            search_query: String::new(),
            search_selected: 0,
            session: Session::anonymous(),
            page: Page::Public,
            mode: Mode::Normal,
            sync_status: SyncStatus::Idle,
            alert: None,
            event_form: None,
            login_form: None,
            confirm_delete_id: None,
            selected_event: 0,
            show_help: false,
            theme: Theme::default(),
            next_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Apply one store action and return the commands it implies. The
    /// transition itself is pure: commands are handed back to the caller
    /// instead of being executed here.
    pub fn apply(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::SetLanguage(language) => {
                self.language = language;
                Vec::new()
            }
            Action::PrevMonth => {
                self.prev_month();
                Vec::new()
            }
            Action::NextMonth => {
                self.next_month();
                Vec::new()
            }
            Action::GoToToday => {
                self.go_to_today(Local::now().date_naive());
                Vec::new()
            }
            Action::SelectDate(date) => {
                self.selected_date = date;
                self.selected_event = 0;
                if let Some(date) = date {
                    self.show_month_of(date);
                }
                Vec::new()
            }
            Action::ToggleEventList => {
                self.event_list_visible = !self.event_list_visible;
                Vec::new()
            }
            Action::SetKindFilter(kind) => {
                self.kind_filter = kind;
                self.selected_event = 0;
                Vec::new()
            }
            Action::SetSearchQuery(query) => {
                self.search_query = query;
                self.search_selected = 0;
                Vec::new()
            }
            Action::Refresh => {
                self.sync_status = SyncStatus::Syncing;
                vec![Command::FetchEvents { seq: self.next_seq() }]
            }
            Action::SubmitAdd(draft) => {
                if !self.require_admin() {
                    return Vec::new();
                }
                self.sync_status = SyncStatus::Syncing;
                vec![Command::CreateEvent { seq: self.next_seq(), draft }]
            }
            Action::SubmitUpdate(event) => {
                if !self.require_admin() {
                    return Vec::new();
                }
                self.sync_status = SyncStatus::Syncing;
                vec![Command::UpdateEvent { seq: self.next_seq(), event }]
            }
            Action::SubmitDelete(id) => {
                if !self.require_admin() {
                    return Vec::new();
                }
                self.sync_status = SyncStatus::Syncing;
                vec![Command::DeleteEvent { seq: self.next_seq(), id }]
            }
            Action::LogIn { username, password } => {
                vec![Command::LogIn { username, password }]
            }
            Action::LogOut => {
                vec![Command::LogOut]
            }
        }
    }

    /// Fold a command outcome back into the state. Stale network
    /// outcomes (older sequence number than one already applied) are
    /// discarded rather than overwriting newer state.
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::EventsFetched { seq, result } => {
                if self.is_stale(seq) {
                    return;
                }
                match result {
                    Ok(events) => {
                        self.events = events;
                        self.sync_status = SyncStatus::Synced;
                    }
                    Err(e) => {
                        tracing::error!("Failed to fetch events: {}", e);
                        self.sync_status = SyncStatus::Error(e.to_string());
                    }
                }
            }
            Outcome::EventCreated { seq, result } => {
                if self.is_stale(seq) {
                    return;
                }
                match result {
                    Ok(event) => {
                        self.events.push(event);
                        self.sync_status = SyncStatus::Synced;
                    }
                    Err(e) => self.write_failed("add event", e),
                }
            }
            Outcome::EventUpdated { seq, result } => {
                if self.is_stale(seq) {
                    return;
                }
                match result {
                    Ok(updated) => {
                        if let Some(entry) = self.events.iter_mut().find(|e| e.id == updated.id) {
                            *entry = updated;
                        }
                        self.sync_status = SyncStatus::Synced;
                    }
                    Err(e) => self.write_failed("update event", e),
                }
            }
            Outcome::EventDeleted { seq, result } => {
                if self.is_stale(seq) {
                    return;
                }
                match result {
                    Ok(id) => {
                        self.events.retain(|e| e.id != id);
                        self.selected_event = self.selected_event.saturating_sub(1);
                        self.sync_status = SyncStatus::Synced;
                    }
                    Err(e) => self.write_failed("delete event", e),
                }
            }
            Outcome::LoggedIn(result) => match result {
                Ok(session) => {
                    self.session = session;
                    self.login_form = None;
                    self.page = Page::Admin;
                    self.mode = Mode::Normal;
                    self.go_to_today(Local::now().date_naive());
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    self.alert = Some(self.language.labels().login_failed.to_string());
                }
            },
            Outcome::LoggedOut(result) => {
                if let Err(e) = result {
                    tracing::error!("Failed to clear session token: {}", e);
                }
                self.session = Session::anonymous();
                self.page = Page::Public;
                self.mode = Mode::Normal;
            }
        }
    }

    fn require_admin(&mut self) -> bool {
        if self.session.logged_in {
            return true;
        }
        tracing::warn!("Rejected admin action without a session");
        self.alert = Some(self.language.labels().login_required.to_string());
        false
    }

    fn write_failed(&mut self, operation: &str, error: SyncError) {
        tracing::error!("Failed to {}: {}", operation, error);
        self.sync_status = SyncStatus::Idle;
        self.alert = Some(format!("Failed to {}: {}", operation, error));
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn is_stale(&mut self, seq: u64) -> bool {
        if seq <= self.applied_seq {
            tracing::warn!("Discarding stale response (seq {} <= {})", seq, self.applied_seq);
            return true;
        }
        self.applied_seq = seq;
        false
    }

    pub fn prev_month(&mut self) {
        if self.month0 == 0 {
            self.month0 = 11;
            self.year -= 1;
        } else {
            self.month0 -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.month0 == 11 {
            self.month0 = 0;
            self.year += 1;
        } else {
            self.month0 += 1;
        }
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.selected_date = Some(today);
        self.selected_event = 0;
        self.show_month_of(today);
    }

    /// Keep the visible month in sync with a date picked outside it.
    pub fn show_month_of(&mut self, date: NaiveDate) {
        self.year = date.year();
        self.month0 = date.month0();
    }

    pub fn first_of_month(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().filter(|e| e.occurs_on(date)).collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        events
    }

    /// The event list contents: date filter and kind filter compose.
    pub fn visible_events(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| self.selected_date.is_none_or(|date| e.occurs_on(date)))
            .filter(|e| self.kind_filter.is_none_or(|kind| e.kind == kind))
            .collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        events
    }

    pub fn search_results(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.matches_query(&self.search_query))
            .collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        events
    }

    pub fn selected_visible_event(&self) -> Option<&Event> {
        self.visible_events().get(self.selected_event).copied()
    }

    pub fn move_event_selection_down(&mut self) {
        let count = self.visible_events().len();
        if count > 0 && self.selected_event < count - 1 {
            self.selected_event += 1;
        }
    }

    pub fn move_event_selection_up(&mut self) {
        self.selected_event = self.selected_event.saturating_sub(1);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AdminUser;
    use crate::sync::api::ApiError;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event(id: &str, start: NaiveDate, end: NaiveDate, kind: EventKind) -> Event {
        Event {
            id: id.to_string(),
            title: Localized::new(format!("事件{}", id), format!("Event {}", id)),
            description: Localized::default(),
            start,
            end,
            kind,
            grades: vec!["all-grades".to_string()],
            link: None,
        }
    }

    fn logged_in_state() -> AppState {
        AppState::new().with_session(Session::authenticated(AdminUser::admin("aa")))
    }

    fn network_error() -> SyncError {
        SyncError::Api(ApiError::RequestError("Status 500: boom".to_string()))
    }

    #[test]
    fn new_state_starts_on_the_public_page() {
        let state = AppState::new();

        assert_eq!(state.page, Page::Public);
        assert_eq!(state.mode, Mode::Normal);
        assert!(!state.session.logged_in);
        assert!(state.events.is_empty());
    }

    #[test]
    fn prev_month_rolls_the_year_back_at_january() {
        let mut state = AppState::new();
        state.year = 2025;
        state.month0 = 0;

        state.apply(Action::PrevMonth);

        assert_eq!((state.year, state.month0), (2024, 11));
    }

    #[test]
    fn next_month_rolls_the_year_forward_at_december() {
        let mut state = AppState::new();
        state.year = 2025;
        state.month0 = 11;

        state.apply(Action::NextMonth);

        assert_eq!((state.year, state.month0), (2026, 0));
    }

    proptest! {
        #[test]
        fn prev_then_next_restores_any_month(year in 1990i32..2100, month0 in 0u32..12) {
            let mut state = AppState::new();
            state.year = year;
            state.month0 = month0;

            state.apply(Action::PrevMonth);
            state.apply(Action::NextMonth);
            prop_assert_eq!((state.year, state.month0), (year, month0));

            state.apply(Action::NextMonth);
            state.apply(Action::PrevMonth);
            prop_assert_eq!((state.year, state.month0), (year, month0));
        }
    }

    #[test]
    fn go_to_today_resets_navigation_and_selection() {
        let mut state = AppState::new();
        state.year = 1999;
        state.month0 = 3;

        state.go_to_today(date(2025, 4, 11));

        assert_eq!((state.year, state.month0), (2025, 3));
        assert_eq!(state.selected_date, Some(date(2025, 4, 11)));
    }

    #[test]
    fn selecting_a_date_outside_the_month_moves_the_view() {
        let mut state = AppState::new();
        state.year = 2025;
        state.month0 = 3;

        state.apply(Action::SelectDate(Some(date(2025, 6, 20))));

        assert_eq!((state.year, state.month0), (2025, 5));
    }

    #[test]
    fn toggle_event_list_flips_visibility() {
        let mut state = AppState::new();
        assert!(state.event_list_visible);

        state.apply(Action::ToggleEventList);
        assert!(!state.event_list_visible);

        state.apply(Action::ToggleEventList);
        assert!(state.event_list_visible);
    }

    #[test]
    fn set_language_replaces_the_language() {
        let mut state = AppState::new();

        state.apply(Action::SetLanguage(Language::En));

        assert_eq!(state.language, Language::En);
    }

    #[test]
    fn selected_date_filters_by_inclusive_range() {
        let mut state = AppState::new();
        state.events = vec![event(
            "ev1",
            date(2025, 4, 10),
            date(2025, 4, 12),
            EventKind::SchoolActivity,
        )];

        state.apply(Action::SelectDate(Some(date(2025, 4, 11))));
        assert_eq!(state.visible_events().len(), 1);

        state.apply(Action::SelectDate(Some(date(2025, 4, 13))));
        assert!(state.visible_events().is_empty());
    }

    #[test]
    fn clearing_the_selected_date_shows_all_events() {
        let mut state = AppState::new();
        state.events = vec![
            event("ev1", date(2025, 4, 1), date(2025, 4, 1), EventKind::Holiday),
            event("ev2", date(2025, 6, 2), date(2025, 6, 3), EventKind::Meeting),
        ];
        state.apply(Action::SelectDate(Some(date(2025, 4, 1))));
        assert_eq!(state.visible_events().len(), 1);

        state.apply(Action::SelectDate(None));

        assert_eq!(state.visible_events().len(), 2);
    }

    #[test]
    fn kind_filter_composes_with_the_date_filter() {
        let mut state = AppState::new();
        state.events = vec![
            event("ev1", date(2025, 4, 10), date(2025, 4, 12), EventKind::Exam),
            event("ev2", date(2025, 4, 11), date(2025, 4, 11), EventKind::Holiday),
        ];
        state.apply(Action::SelectDate(Some(date(2025, 4, 11))));

        state.apply(Action::SetKindFilter(Some(EventKind::Holiday)));

        let visible = state.visible_events();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "ev2");
    }

    #[test]
    fn search_matches_either_language() {
        let mut state = AppState::new();
        let mut ev = event("ev1", date(2025, 4, 1), date(2025, 4, 1), EventKind::Lecture);
        ev.title = Localized::new("親師座談", "Parent Meeting");
        state.events = vec![ev];

        state.apply(Action::SetSearchQuery("parent".to_string()));
        assert_eq!(state.search_results().len(), 1);

        state.apply(Action::SetSearchQuery("親師".to_string()));
        assert_eq!(state.search_results().len(), 1);

        state.apply(Action::SetSearchQuery("exam".to_string()));
        assert!(state.search_results().is_empty());
    }

    #[test]
    fn refresh_emits_a_sequenced_fetch_command() {
        let mut state = AppState::new();

        let first = state.apply(Action::Refresh);
        let second = state.apply(Action::Refresh);

        assert_eq!(first, vec![Command::FetchEvents { seq: 1 }]);
        assert_eq!(second, vec![Command::FetchEvents { seq: 2 }]);
        assert_eq!(state.sync_status, SyncStatus::Syncing);
    }

    #[test]
    fn admin_actions_while_anonymous_emit_no_commands() {
        let mut state = AppState::new();
        let before = vec![event(
            "ev1",
            date(2025, 4, 1),
            date(2025, 4, 1),
            EventKind::Holiday,
        )];
        state.events = before.clone();

        let commands = state.apply(Action::SubmitDelete("ev1".to_string()));

        assert!(commands.is_empty());
        assert_eq!(state.events, before);
        assert_eq!(
            state.alert.as_deref(),
            Some(Language::Zh.labels().login_required)
        );
    }

    #[test]
    fn add_while_anonymous_leaves_the_cache_unchanged() {
        let mut state = AppState::new();
        let draft = EventDraft::new(
            Localized::new("段考", "Exam"),
            date(2025, 5, 1),
            None,
            EventKind::Exam,
        );

        let commands = state.apply(Action::SubmitAdd(draft));

        assert!(commands.is_empty());
        assert!(state.events.is_empty());
        assert!(state.alert.is_some());
    }

    #[test]
    fn admin_actions_while_logged_in_emit_commands() {
        let mut state = logged_in_state();

        let commands = state.apply(Action::SubmitDelete("ev1".to_string()));

        assert_eq!(
            commands,
            vec![Command::DeleteEvent { seq: 1, id: "ev1".to_string() }]
        );
        assert!(state.alert.is_none());
    }

    #[test]
    fn fetched_events_replace_the_cache() {
        let mut state = AppState::new();
        state.apply(Action::Refresh);

        state.apply_outcome(Outcome::EventsFetched {
            seq: 1,
            result: Ok(vec![event(
                "ev1",
                date(2025, 4, 1),
                date(2025, 4, 1),
                EventKind::Holiday,
            )]),
        });

        assert_eq!(state.events.len(), 1);
        assert_eq!(state.sync_status, SyncStatus::Synced);
    }

    #[test]
    fn failed_fetch_keeps_the_previous_cache() {
        let mut state = AppState::new();
        state.events = vec![event(
            "ev1",
            date(2025, 4, 1),
            date(2025, 4, 1),
            EventKind::Holiday,
        )];
        state.apply(Action::Refresh);

        state.apply_outcome(Outcome::EventsFetched {
            seq: 1,
            result: Err(network_error()),
        });

        assert_eq!(state.events.len(), 1);
        assert!(matches!(state.sync_status, SyncStatus::Error(_)));
        assert!(state.alert.is_none());
    }

    #[test]
    fn created_event_is_appended() {
        let mut state = logged_in_state();
        let draft = EventDraft::new(
            Localized::new("段考", "Exam"),
            date(2025, 5, 1),
            None,
            EventKind::Exam,
        );
        state.apply(Action::SubmitAdd(draft));

        state.apply_outcome(Outcome::EventCreated {
            seq: 1,
            result: Ok(event("ev9", date(2025, 5, 1), date(2025, 5, 1), EventKind::Exam)),
        });

        assert_eq!(state.events.len(), 1);
        assert_eq!(state.events[0].id, "ev9");
    }

    #[test]
    fn failed_write_raises_an_alert_and_keeps_the_cache() {
        let mut state = logged_in_state();
        state.events = vec![event(
            "ev1",
            date(2025, 4, 1),
            date(2025, 4, 1),
            EventKind::Holiday,
        )];
        state.apply(Action::SubmitDelete("ev1".to_string()));

        state.apply_outcome(Outcome::EventDeleted {
            seq: 1,
            result: Err(network_error()),
        });

        assert_eq!(state.events.len(), 1);
        assert!(state.alert.as_deref().unwrap().contains("delete event"));
    }

    #[test]
    fn updated_event_replaces_the_matching_entry() {
        let mut state = logged_in_state();
        state.events = vec![
            event("ev1", date(2025, 4, 1), date(2025, 4, 1), EventKind::Holiday),
            event("ev2", date(2025, 4, 2), date(2025, 4, 2), EventKind::Meeting),
        ];
        let mut updated = event("ev2", date(2025, 4, 5), date(2025, 4, 6), EventKind::Meeting);
        updated.title = Localized::new("改期", "Rescheduled");
        state.apply(Action::SubmitUpdate(updated.clone()));

        state.apply_outcome(Outcome::EventUpdated { seq: 1, result: Ok(updated) });

        assert_eq!(state.events.len(), 2);
        assert_eq!(state.events[1].start, date(2025, 4, 5));
        assert_eq!(state.events[1].title.en, "Rescheduled");
    }

    #[test]
    fn deleted_event_is_removed_by_id() {
        let mut state = logged_in_state();
        state.events = vec![
            event("ev1", date(2025, 4, 1), date(2025, 4, 1), EventKind::Holiday),
            event("ev2", date(2025, 4, 2), date(2025, 4, 2), EventKind::Meeting),
        ];
        state.apply(Action::SubmitDelete("ev1".to_string()));

        state.apply_outcome(Outcome::EventDeleted {
            seq: 1,
            result: Ok("ev1".to_string()),
        });

        assert_eq!(state.events.len(), 1);
        assert_eq!(state.events[0].id, "ev2");
    }

    #[test]
    fn stale_fetch_outcome_is_discarded() {
        let mut state = AppState::new();
        state.apply(Action::Refresh);
        state.apply(Action::Refresh);

        state.apply_outcome(Outcome::EventsFetched {
            seq: 2,
            result: Ok(vec![event(
                "fresh",
                date(2025, 4, 2),
                date(2025, 4, 2),
                EventKind::Meeting,
            )]),
        });
        state.apply_outcome(Outcome::EventsFetched {
            seq: 1,
            result: Ok(vec![event(
                "stale",
                date(2025, 4, 1),
                date(2025, 4, 1),
                EventKind::Holiday,
            )]),
        });

        assert_eq!(state.events.len(), 1);
        assert_eq!(state.events[0].id, "fresh");
    }

    #[test]
    fn successful_login_enters_the_admin_page() {
        let mut state = AppState::new();
        state.login_form = Some(LoginForm::new());

        state.apply_outcome(Outcome::LoggedIn(Ok(Session::authenticated(
            AdminUser::admin("aa"),
        ))));

        assert!(state.session.logged_in);
        assert_eq!(state.page, Page::Admin);
        assert!(state.login_form.is_none());
    }

    #[test]
    fn failed_login_alerts_and_stays_anonymous() {
        let mut state = AppState::new();

        state.apply_outcome(Outcome::LoggedIn(Err(AuthError::InvalidCredentials)));

        assert!(!state.session.logged_in);
        assert_eq!(state.page, Page::Public);
        assert_eq!(state.alert.as_deref(), Some(Language::Zh.labels().login_failed));
    }

    #[test]
    fn logout_returns_to_the_public_page() {
        let mut state = logged_in_state();
        state.page = Page::Admin;

        state.apply_outcome(Outcome::LoggedOut(Ok(())));

        assert!(!state.session.logged_in);
        assert_eq!(state.page, Page::Public);
    }

    #[test]
    fn event_selection_moves_within_bounds() {
        let mut state = AppState::new();
        state.events = vec![
            event("ev1", date(2025, 4, 1), date(2025, 4, 1), EventKind::Holiday),
            event("ev2", date(2025, 4, 2), date(2025, 4, 2), EventKind::Meeting),
        ];

        state.move_event_selection_down();
        assert_eq!(state.selected_event, 1);

        state.move_event_selection_down();
        assert_eq!(state.selected_event, 1);

        state.move_event_selection_up();
        state.move_event_selection_up();
        assert_eq!(state.selected_event, 0);
    }

    #[test]
    fn form_draft_defaults_empty_end_to_start() {
        let mut form = EventForm::new(date(2025, 5, 1));
        form.title_zh = "段考".to_string();

        let draft = form.draft().unwrap();

        assert_eq!(draft.start, date(2025, 5, 1));
        assert_eq!(draft.end, date(2025, 5, 1));
    }

    #[test]
    fn form_requires_a_title() {
        let form = EventForm::new(date(2025, 5, 1));

        assert!(form.draft().is_err());
    }

    #[test]
    fn form_rejects_an_unparseable_date() {
        let mut form = EventForm::new(date(2025, 5, 1));
        form.title_zh = "段考".to_string();
        form.start_input = "next tuesday".to_string();

        assert!(form.draft().is_err());
    }

    #[test]
    fn form_field_cycle_is_closed() {
        let mut form = EventForm::new(date(2025, 5, 1));
        let start = form.active_field;

        for _ in 0..7 {
            form.next_field();
        }
        assert_eq!(form.active_field, start);

        form.next_field();
        form.prev_field();
        assert_eq!(form.active_field, start);
    }

    #[test]
    fn form_toggles_grades_in_insertion_order() {
        let mut form = EventForm::new(date(2025, 5, 1));

        form.toggle_grade("grade-1");
        form.toggle_grade("grade-2");
        assert_eq!(form.grades, vec!["grade-1", "grade-2"]);

        form.toggle_grade("grade-1");
        assert_eq!(form.grades, vec!["grade-2"]);
    }

    #[test]
    fn edit_form_preserves_description_and_link() {
        let mut ev = event("ev1", date(2025, 4, 1), date(2025, 4, 2), EventKind::Lecture);
        ev.description = Localized::new("說明", "Details");
        ev.link = Some("https://school.example/talk".to_string());

        let form = EventForm::for_event(&ev);
        let rebuilt = form.updated_event().unwrap();

        assert_eq!(rebuilt.description, ev.description);
        assert_eq!(rebuilt.link, ev.link);
        assert_eq!(rebuilt.id, "ev1");
    }
}
