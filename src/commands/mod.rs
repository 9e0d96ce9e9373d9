use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Buttons shown along the bottom of the window, in display order.
pub const BUTTONS: [Button; 6] = [
    Button::Refresh,
    Button::AddCandidate,
    Button::Vote,
    Button::ViewResults,
    Button::DeleteCandidate,
    Button::Exit,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Refresh,
    AddCandidate,
    Vote,
    ViewResults,
    DeleteCandidate,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Press(Button),
    SelectNext,
    SelectPrevious,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::Refresh => "Refresh Candidates",
            Button::AddCandidate => "Add Candidate",
            Button::Vote => "Vote",
            Button::ViewResults => "View Results",
            Button::DeleteCandidate => "Delete Candidate",
            Button::Exit => "Exit",
        }
    }

    pub fn key(&self) -> char {
        match self {
            Button::Refresh => 'r',
            Button::AddCandidate => 'a',
            Button::Vote => 'v',
            Button::ViewResults => 's',
            Button::DeleteCandidate => 'd',
            Button::Exit => 'q',
        }
    }
}

/// Map a key press in the main window to an action. Overlays read keys
/// themselves and never come through here.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        // Ctrl+C always quits
        return match key.code {
            KeyCode::Char('c') => Some(Action::Press(Button::Exit)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Esc => Some(Action::Press(Button::Exit)),
        KeyCode::Char(c) => BUTTONS
            .iter()
            .find(|button| button.key() == c.to_ascii_lowercase())
            .map(|button| Action::Press(*button)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_button_keys() {
        let cases = [
            (KeyCode::Char('r'), Button::Refresh),
            (KeyCode::Char('a'), Button::AddCandidate),
            (KeyCode::Char('v'), Button::Vote),
            (KeyCode::Char('s'), Button::ViewResults),
            (KeyCode::Char('D'), Button::DeleteCandidate),
            (KeyCode::Char('q'), Button::Exit),
            (KeyCode::Esc, Button::Exit),
        ];
        for (code, button) in cases {
            assert_eq!(action_for_key(press(code)), Some(Action::Press(button)));
        }
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(action_for_key(press(KeyCode::Down)), Some(Action::SelectNext));
        assert_eq!(
            action_for_key(press(KeyCode::Char('k'))),
            Some(Action::SelectPrevious)
        );
        assert_eq!(action_for_key(press(KeyCode::Char('x'))), None);
        assert_eq!(action_for_key(press(KeyCode::Tab)), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(key), Some(Action::Press(Button::Exit)));
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(key), None);
    }

    #[test]
    fn test_keys_are_unique() {
        for (i, a) in BUTTONS.iter().enumerate() {
            for b in &BUTTONS[i + 1..] {
                assert_ne!(a.key(), b.key());
            }
        }
    }
}
