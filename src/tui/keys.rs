//! Key bindings for the interactive navigator.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::navigator::{Direction, Jump, Navigator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Move(Direction),
    Page(Direction),
    Jump(Jump),
    Toggle,
    ExpandAll,
    CollapseAll,
    ZoomIn,
    ZoomOut,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Down | KeyCode::Char('j') => Action::Move(Direction::Down),
            KeyCode::Up | KeyCode::Char('k') => Action::Move(Direction::Up),
            KeyCode::PageDown => Action::Page(Direction::Down),
            KeyCode::PageUp => Action::Page(Direction::Up),
            KeyCode::Home | KeyCode::Char('g') => Action::Jump(Jump::First),
            KeyCode::End | KeyCode::Char('G') => Action::Jump(Jump::Last),
            KeyCode::Enter | KeyCode::Char(' ') => Action::Toggle,
            KeyCode::Char('e') => Action::ExpandAll,
            KeyCode::Char('c') => Action::CollapseAll,
            KeyCode::Right | KeyCode::Char('l') => Action::ZoomIn,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace | KeyCode::Esc => Action::ZoomOut,
            _ => return None,
        };
        Some(action)
    }

    /// Apply to `navigator`; `false` means the session should end.
    pub fn apply(self, navigator: &mut Navigator) -> bool {
        match self {
            Action::Quit => return false,
            Action::Move(direction) => {
                navigator.move_cursor(direction);
            }
            Action::Page(direction) => navigator.page(direction),
            Action::Jump(jump) => navigator.jump(jump),
            Action::Toggle => navigator.toggle_selected(),
            Action::ExpandAll => navigator.expand_all(),
            Action::CollapseAll => navigator.collapse_all(),
            Action::ZoomIn => {
                navigator.enter_selected();
            }
            Action::ZoomOut => {
                navigator.exit_subtree();
            }
        }
        true
    }
}
