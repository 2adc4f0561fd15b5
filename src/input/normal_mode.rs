use chrono::{Days, Local};
use crossterm::event::KeyCode;

use crate::app::{Action, AppState, EventForm, LoginForm, Mode, Page};
use crate::calendar::EventKind;

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Vec<Action> {
    match key {
        KeyCode::Char('h') | KeyCode::Left => move_selected_date(state, -1),
        KeyCode::Char('l') | KeyCode::Right => move_selected_date(state, 1),
        KeyCode::Char('j') | KeyCode::Down => {
            if !state.visible_events().is_empty() {
                state.move_event_selection_down();
                Vec::new()
            } else {
                move_selected_date(state, 7)
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if !state.visible_events().is_empty() {
                state.move_event_selection_up();
                Vec::new()
            } else {
                move_selected_date(state, -7)
            }
        }
        KeyCode::Char('{') => vec![Action::PrevMonth],
        KeyCode::Char('}') => vec![Action::NextMonth],
        KeyCode::Char('t') => vec![Action::GoToToday],
        KeyCode::Tab => vec![Action::ToggleEventList],
        KeyCode::Char('L') => vec![Action::SetLanguage(state.language.toggle())],
        KeyCode::Char('f') => vec![cycle_kind_filter(state)],
        KeyCode::Char('r') => vec![Action::Refresh],
        KeyCode::Char('/') => {
            state.mode = Mode::Search;
            Vec::new()
        }
        KeyCode::Char('?') => {
            state.show_help = !state.show_help;
            Vec::new()
        }
        KeyCode::Char('o') => {
            open_selected_link(state);
            Vec::new()
        }
        KeyCode::Char('A') => enter_admin(state),
        KeyCode::Esc => {
            if state.page == Page::Admin {
                state.page = Page::Public;
            }
            Vec::new()
        }
        KeyCode::Char('a') if state.page == Page::Admin => {
            let date = state
                .selected_date
                .unwrap_or_else(|| Local::now().date_naive());
            state.event_form = Some(EventForm::new(date));
            state.mode = Mode::Form;
            Vec::new()
        }
        KeyCode::Char('e') if state.page == Page::Admin => {
            if let Some(event) = state.selected_visible_event() {
                state.event_form = Some(EventForm::for_event(event));
                state.mode = Mode::Form;
            }
            Vec::new()
        }
        KeyCode::Char('x') if state.page == Page::Admin => {
            if let Some(event) = state.selected_visible_event() {
                state.confirm_delete_id = Some(event.id.clone());
            }
            Vec::new()
        }
        KeyCode::Char('O') if state.page == Page::Admin => vec![Action::LogOut],
        _ => Vec::new(),
    }
}

fn move_selected_date(state: &mut AppState, days: i64) -> Vec<Action> {
    let current = state
        .selected_date
        .or_else(|| state.first_of_month())
        .unwrap_or_else(|| Local::now().date_naive());

    let moved = if days >= 0 {
        current.checked_add_days(Days::new(days as u64))
    } else {
        current.checked_sub_days(Days::new((-days) as u64))
    };

    match moved {
        Some(date) => vec![Action::SelectDate(Some(date))],
        None => Vec::new(),
    }
}

fn cycle_kind_filter(state: &AppState) -> Action {
    let next = match state.kind_filter {
        None => Some(EventKind::ALL[0]),
        Some(kind) => {
            let index = EventKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
            EventKind::ALL.get(index + 1).copied()
        }
    };
    Action::SetKindFilter(next)
}

fn enter_admin(state: &mut AppState) -> Vec<Action> {
    if state.session.logged_in {
        state.page = Page::Admin;
        let today = Local::now().date_naive();
        vec![Action::SelectDate(Some(today))]
    } else {
        state.login_form = Some(LoginForm::new());
        state.mode = Mode::Login;
        Vec::new()
    }
}

fn open_selected_link(state: &AppState) {
    let Some(event) = state.selected_visible_event() else {
        return;
    };
    let Some(link) = &event.link else {
        tracing::info!("Event {} has no link to open", event.id);
        return;
    };

    tracing::info!("Opening event link: {}", link);
    match std::process::Command::new("xdg-open").arg(link).spawn() {
        Ok(_) => tracing::info!("Launched xdg-open"),
        Err(e) => tracing::error!("Failed to open link: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Event, Localized};
    use crate::session::{AdminUser, Session};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event_on(id: &str, day: NaiveDate) -> Event {
        Event {
            id: id.to_string(),
            title: Localized::new("事件", "Event"),
            description: Localized::default(),
            start: day,
            end: day,
            kind: EventKind::Holiday,
            grades: Vec::new(),
            link: None,
        }
    }

    #[test]
    fn h_moves_the_selected_date_back_one_day() {
        let mut state = AppState::new();
        state.selected_date = Some(date(2025, 1, 15));

        let actions = handle_key(KeyCode::Char('h'), &mut state);

        assert_eq!(actions, vec![Action::SelectDate(Some(date(2025, 1, 14)))]);
    }

    #[test]
    fn l_moves_the_selected_date_forward_one_day() {
        let mut state = AppState::new();
        state.selected_date = Some(date(2025, 1, 15));

        let actions = handle_key(KeyCode::Char('l'), &mut state);

        assert_eq!(actions, vec![Action::SelectDate(Some(date(2025, 1, 16)))]);
    }

    #[test]
    fn j_moves_down_a_week_when_the_list_is_empty() {
        let mut state = AppState::new();
        state.selected_date = Some(date(2025, 1, 15));

        let actions = handle_key(KeyCode::Char('j'), &mut state);

        assert_eq!(actions, vec![Action::SelectDate(Some(date(2025, 1, 22)))]);
    }

    #[test]
    fn j_moves_the_list_selection_when_events_are_visible() {
        let mut state = AppState::new();
        let day = date(2025, 1, 15);
        state.selected_date = Some(day);
        state.events = vec![event_on("ev1", day), event_on("ev2", day)];

        let actions = handle_key(KeyCode::Char('j'), &mut state);

        assert!(actions.is_empty());
        assert_eq!(state.selected_event, 1);
    }

    #[test]
    fn braces_browse_months() {
        let mut state = AppState::new();

        assert_eq!(handle_key(KeyCode::Char('{'), &mut state), vec![Action::PrevMonth]);
        assert_eq!(handle_key(KeyCode::Char('}'), &mut state), vec![Action::NextMonth]);
    }

    #[test]
    fn capital_l_toggles_the_language() {
        let mut state = AppState::new();

        let actions = handle_key(KeyCode::Char('L'), &mut state);

        assert_eq!(
            actions,
            vec![Action::SetLanguage(state.language.toggle())]
        );
    }

    #[test]
    fn f_cycles_the_kind_filter_through_all_kinds_and_back() {
        let mut state = AppState::new();

        for expected in EventKind::ALL {
            let actions = handle_key(KeyCode::Char('f'), &mut state);
            assert_eq!(actions, vec![Action::SetKindFilter(Some(expected))]);
            state.apply(actions.into_iter().next().unwrap());
        }

        let actions = handle_key(KeyCode::Char('f'), &mut state);
        assert_eq!(actions, vec![Action::SetKindFilter(None)]);
    }

    #[test]
    fn slash_opens_the_search_panel() {
        let mut state = AppState::new();

        handle_key(KeyCode::Char('/'), &mut state);

        assert_eq!(state.mode, Mode::Search);
    }

    #[test]
    fn admin_key_opens_login_when_anonymous() {
        let mut state = AppState::new();

        let actions = handle_key(KeyCode::Char('A'), &mut state);

        assert!(actions.is_empty());
        assert_eq!(state.mode, Mode::Login);
        assert!(state.login_form.is_some());
        assert_eq!(state.page, Page::Public);
    }

    #[test]
    fn admin_key_enters_the_admin_page_when_logged_in() {
        let mut state =
            AppState::new().with_session(Session::authenticated(AdminUser::admin("aa")));

        let actions = handle_key(KeyCode::Char('A'), &mut state);

        assert_eq!(state.page, Page::Admin);
        assert!(matches!(actions[..], [Action::SelectDate(Some(_))]));
    }

    #[test]
    fn mutating_keys_are_inert_on_the_public_page() {
        let mut state = AppState::new();
        let day = date(2025, 1, 15);
        state.selected_date = Some(day);
        state.events = vec![event_on("ev1", day)];

        handle_key(KeyCode::Char('e'), &mut state);
        handle_key(KeyCode::Char('x'), &mut state);

        assert!(state.event_form.is_none());
        assert!(state.confirm_delete_id.is_none());
    }

    #[test]
    fn delete_key_asks_for_confirmation_on_the_admin_page() {
        let mut state =
            AppState::new().with_session(Session::authenticated(AdminUser::admin("aa")));
        state.page = Page::Admin;
        let day = date(2025, 1, 15);
        state.selected_date = Some(day);
        state.events = vec![event_on("ev1", day)];

        handle_key(KeyCode::Char('x'), &mut state);

        assert_eq!(state.confirm_delete_id.as_deref(), Some("ev1"));
    }

    #[test]
    fn escape_leaves_the_admin_page() {
        let mut state =
            AppState::new().with_session(Session::authenticated(AdminUser::admin("aa")));
        state.page = Page::Admin;

        handle_key(KeyCode::Esc, &mut state);

        assert_eq!(state.page, Page::Public);
    }
}
