use crossterm::event::KeyCode;
use kanban_core::InputState;

pub enum DialogAction {
    None,
    Cancel,
    Confirm,
}

/// Single-line text editing shared by the search bar and the column prompt.
pub fn handle_dialog_input(
    input: &mut InputState,
    key_code: KeyCode,
    allow_empty: bool,
) -> DialogAction {
    match key_code {
        KeyCode::Esc => DialogAction::Cancel,
        KeyCode::Enter => {
            if allow_empty || !input.is_blank() {
                DialogAction::Confirm
            } else {
                DialogAction::None
            }
        }
        _ => {
            edit_text(input, key_code);
            DialogAction::None
        }
    }
}

/// Applies a cursor-movement or editing key. Returns false for keys it ignores.
pub fn edit_text(input: &mut InputState, key_code: KeyCode) -> bool {
    match key_code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_not_confirmed() {
        let mut input = InputState::new();
        input.insert_char(' ');
        assert!(matches!(
            handle_dialog_input(&mut input, KeyCode::Enter, false),
            DialogAction::None
        ));
        assert!(matches!(
            handle_dialog_input(&mut input, KeyCode::Enter, true),
            DialogAction::Confirm
        ));
    }

    #[test]
    fn test_typing_and_cancel() {
        let mut input = InputState::new();
        for c in "Backlog".chars() {
            handle_dialog_input(&mut input, KeyCode::Char(c), false);
        }
        handle_dialog_input(&mut input, KeyCode::Backspace, false);
        assert_eq!(input.as_str(), "Backlo");
        assert!(matches!(
            handle_dialog_input(&mut input, KeyCode::Esc, false),
            DialogAction::Cancel
        ));
        assert!(!edit_text(&mut input, KeyCode::Tab));
    }
}
