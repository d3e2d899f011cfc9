use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    JumpTo(i64),
    AddPage,
    RemovePage,
    /// Left click at a terminal cell
    Click { column: u16, row: u16 },
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Page navigation
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevPage,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextPage,
        (KeyCode::Left, KeyModifiers::NONE) => Action::PrevPage,
        (KeyCode::Right, KeyModifiers::NONE) => Action::NextPage,
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::FirstPage,
        (KeyCode::Char('G'), _) => Action::LastPage,
        (KeyCode::Home, _) => Action::FirstPage,
        (KeyCode::End, _) => Action::LastPage,

        // Direct index assignment
        (KeyCode::Char(c @ '0'..='9'), KeyModifiers::NONE) => {
            Action::JumpTo(c.to_digit(10).map(i64::from).unwrap_or_default())
        }

        // Page count
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), KeyModifiers::NONE) => Action::AddPage,
        (KeyCode::Char('-'), KeyModifiers::NONE) => Action::RemovePage,

        _ => Action::None,
    }
}

/// Handle a mouse event; only left button presses do anything
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::Click {
            column: mouse.column,
            row: mouse.row,
        },
        _ => Action::None,
    }
}
