//! Input Module
//!
//! Maps crossterm key events to actions for the current screen mode.

pub mod buffer;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// Re-exports
pub use buffer::{EditBuffers, FieldBuffer};

/// Everything a key press can ask of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    BeginEdit,
    CopyUsername,
    CopyPassword,
    RequestDelete,
    Refresh,
    // Editing
    InsertChar(char),
    Backspace,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Return/tab pressed in a field: run the field navigation protocol
    SubmitField,
    /// Leave edit mode; always a commit attempt, there is no cancel
    EndEdit,
    // Confirm dialog
    ConfirmYes,
    ConfirmNo,
}

/// Key handling while viewing
pub fn viewing_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('e') | KeyCode::Char('i') => Action::BeginEdit,
        KeyCode::Char('u') => Action::CopyUsername,
        KeyCode::Char('c') => Action::CopyPassword,
        KeyCode::Char('d') => Action::RequestDelete,
        KeyCode::Char('r') => Action::Refresh,
        _ => Action::None,
    }
}

/// Key handling while editing a field
pub fn editing_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('a') => Action::CursorHome,
            KeyCode::Char('e') => Action::CursorEnd,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char(c) => Action::InsertChar(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::DeleteForward,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::Enter | KeyCode::Tab => Action::SubmitField,
        KeyCode::Esc => Action::EndEdit,
        _ => Action::None,
    }
}

/// Key handling while the confirm dialog is open
pub fn confirm_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmYes,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::ConfirmNo,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_viewing_keys() {
        assert_eq!(viewing_action(key(KeyCode::Char('e'))), Action::BeginEdit);
        assert_eq!(viewing_action(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(viewing_action(key(KeyCode::Char('d'))), Action::RequestDelete);
        assert_eq!(viewing_action(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_editing_enter_and_tab_submit() {
        assert_eq!(editing_action(key(KeyCode::Enter)), Action::SubmitField);
        assert_eq!(editing_action(key(KeyCode::Tab)), Action::SubmitField);
    }

    #[test]
    fn test_editing_escape_commits() {
        assert_eq!(editing_action(key(KeyCode::Esc)), Action::EndEdit);
    }

    #[test]
    fn test_editing_text_input() {
        assert_eq!(
            editing_action(key(KeyCode::Char('a'))),
            Action::InsertChar('a')
        );
        assert_eq!(editing_action(key(KeyCode::Backspace)), Action::Backspace);
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(editing_action(ctrl_a), Action::CursorHome);
    }

    #[test]
    fn test_confirm_keys() {
        assert_eq!(confirm_action(key(KeyCode::Char('y'))), Action::ConfirmYes);
        assert_eq!(confirm_action(key(KeyCode::Esc)), Action::ConfirmNo);
        assert_eq!(confirm_action(key(KeyCode::Char('z'))), Action::None);
    }
}
