use crossterm::event::KeyCode;

use crate::app::{Action, AppState, FormField, Mode};

/// Keys for the add/edit event dialog. Enter submits the form as a
/// store action; validation failures surface as the blocking alert.
pub fn handle_key(key: KeyCode, state: &mut AppState) -> Vec<Action> {
    let Some(form) = state.event_form.as_mut() else {
        return Vec::new();
    };

    match key {
        KeyCode::Esc => {
            state.event_form = None;
            state.mode = Mode::Normal;
            Vec::new()
        }
        KeyCode::Tab => {
            form.next_field();
            Vec::new()
        }
        KeyCode::BackTab => {
            form.prev_field();
            Vec::new()
        }
        KeyCode::Enter => submit(state),
        KeyCode::Backspace => {
            match form.active_field {
                FormField::TitleZh => {
                    form.title_zh.pop();
                }
                FormField::TitleEn => {
                    form.title_en.pop();
                }
                FormField::Start => {
                    form.start_input.pop();
                }
                FormField::End => {
                    form.end_input.pop();
                }
                FormField::Link => {
                    form.link.pop();
                }
                FormField::Kind | FormField::Grades => {}
            }
            Vec::new()
        }
        KeyCode::Left if form.active_field == FormField::Kind => {
            form.kind = form.kind.prev();
            Vec::new()
        }
        KeyCode::Right if form.active_field == FormField::Kind => {
            form.kind = form.kind.next();
            Vec::new()
        }
        KeyCode::Char(c) => {
            match form.active_field {
                FormField::TitleZh => form.title_zh.push(c),
                FormField::TitleEn => form.title_en.push(c),
                FormField::Start => {
                    if c.is_ascii_digit() || c == '-' {
                        form.start_input.push(c);
                    }
                }
                FormField::End => {
                    if c.is_ascii_digit() || c == '-' {
                        form.end_input.push(c);
                    }
                }
                FormField::Link => form.link.push(c),
                FormField::Kind => {
                    if c == ' ' {
                        form.kind = form.kind.next();
                    }
                }
                FormField::Grades => match c {
                    '1' => form.toggle_grade("grade-1"),
                    '2' => form.toggle_grade("grade-2"),
                    '3' => form.toggle_grade("grade-3"),
                    'a' => form.toggle_grade("all-grades"),
                    _ => {}
                },
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn submit(state: &mut AppState) -> Vec<Action> {
    let Some(form) = state.event_form.take() else {
        return Vec::new();
    };

    let action = if form.is_editing() {
        form.updated_event().map(Action::SubmitUpdate)
    } else {
        form.draft().map(Action::SubmitAdd)
    };

    state.mode = Mode::Normal;

    match action {
        Ok(action) => vec![action],
        Err(message) => {
            state.alert = Some(message);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventForm;
    use crate::calendar::EventKind;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn state_with_form() -> AppState {
        let mut state = AppState::new();
        state.event_form = Some(EventForm::new(date(2025, 5, 1)));
        state.mode = Mode::Form;
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(KeyCode::Char(c), state);
        }
    }

    #[test]
    fn typing_fills_the_active_field() {
        let mut state = state_with_form();

        type_text(&mut state, "段考");

        assert_eq!(state.event_form.as_ref().unwrap().title_zh, "段考");
    }

    #[test]
    fn tab_moves_to_the_english_title() {
        let mut state = state_with_form();

        handle_key(KeyCode::Tab, &mut state);
        type_text(&mut state, "Exam");

        assert_eq!(state.event_form.as_ref().unwrap().title_en, "Exam");
    }

    #[test]
    fn date_fields_accept_digits_and_dashes_only() {
        let mut state = state_with_form();
        state.event_form.as_mut().unwrap().active_field = FormField::End;

        type_text(&mut state, "2025-05-x3");

        assert_eq!(state.event_form.as_ref().unwrap().end_input, "2025-05-3");
    }

    #[test]
    fn space_cycles_the_kind() {
        let mut state = state_with_form();
        state.event_form.as_mut().unwrap().active_field = FormField::Kind;

        handle_key(KeyCode::Char(' '), &mut state);

        assert_eq!(
            state.event_form.as_ref().unwrap().kind,
            EventKind::ImportantExam.next()
        );
    }

    #[test]
    fn grade_keys_toggle_grades() {
        let mut state = state_with_form();
        state.event_form.as_mut().unwrap().active_field = FormField::Grades;

        handle_key(KeyCode::Char('1'), &mut state);
        handle_key(KeyCode::Char('a'), &mut state);

        assert_eq!(
            state.event_form.as_ref().unwrap().grades,
            vec!["grade-1", "all-grades"]
        );
    }

    #[test]
    fn enter_submits_a_valid_form_as_an_add_action() {
        let mut state = state_with_form();
        type_text(&mut state, "段考");

        let actions = handle_key(KeyCode::Enter, &mut state);

        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::SubmitAdd(_)));
        assert!(state.event_form.is_none());
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn enter_on_an_invalid_form_raises_the_alert() {
        let mut state = state_with_form();

        let actions = handle_key(KeyCode::Enter, &mut state);

        assert!(actions.is_empty());
        assert!(state.alert.is_some());
    }

    #[test]
    fn escape_cancels_without_submitting() {
        let mut state = state_with_form();

        let actions = handle_key(KeyCode::Esc, &mut state);

        assert!(actions.is_empty());
        assert!(state.event_form.is_none());
        assert_eq!(state.mode, Mode::Normal);
    }
}
