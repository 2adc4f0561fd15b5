use crossterm::event::KeyCode;

use crate::app::{Action, AppState, Mode};

/// Keys for the search panel. Enter jumps to the highlighted result's
/// start date and closes the panel.
pub fn handle_key(key: KeyCode, state: &mut AppState) -> Vec<Action> {
    match key {
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            vec![Action::SetSearchQuery(String::new())]
        }
        KeyCode::Enter => {
            let target = state
                .search_results()
                .get(state.search_selected)
                .map(|event| event.start);

            match target {
                Some(start) => {
                    state.mode = Mode::Normal;
                    vec![
                        Action::SelectDate(Some(start)),
                        Action::SetSearchQuery(String::new()),
                    ]
                }
                None => Vec::new(),
            }
        }
        KeyCode::Down => {
            let count = state.search_results().len();
            if count > 0 && state.search_selected < count - 1 {
                state.search_selected += 1;
            }
            Vec::new()
        }
        KeyCode::Up => {
            state.search_selected = state.search_selected.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Backspace => {
            let mut query = state.search_query.clone();
            query.pop();
            vec![Action::SetSearchQuery(query)]
        }
        KeyCode::Char(c) => {
            let mut query = state.search_query.clone();
            query.push(c);
            vec![Action::SetSearchQuery(query)]
        }
        _ => Vec::new(),
    }
}
