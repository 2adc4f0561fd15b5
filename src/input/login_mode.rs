use crossterm::event::KeyCode;

use crate::app::{Action, AppState, LoginField, Mode};

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Vec<Action> {
    let Some(form) = state.login_form.as_mut() else {
        return Vec::new();
    };

    match key {
        KeyCode::Esc => {
            state.login_form = None;
            state.mode = Mode::Normal;
            Vec::new()
        }
        KeyCode::Tab | KeyCode::BackTab => {
            form.next_field();
            Vec::new()
        }
        KeyCode::Enter => {
            let username = form.username.clone();
            let password = form.password.clone();
            state.mode = Mode::Normal;
            vec![Action::LogIn { username, password }]
        }
        KeyCode::Backspace => {
            match form.active_field {
                Some(LoginField::Password) => {
                    form.password.pop();
                }
                _ => {
                    form.username.pop();
                }
            }
            Vec::new()
        }
        KeyCode::Char(c) => {
            match form.active_field {
                Some(LoginField::Password) => form.password.push(c),
                _ => form.username.push(c),
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}
