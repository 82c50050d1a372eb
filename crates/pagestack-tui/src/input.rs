use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use pagestack_core::{PageKey, WheelInput};

use crate::app::Mode;
use crate::keymap::Keymap;

/// Wheel delta reported per terminal scroll event, in `deltaY` units
pub const WHEEL_STEP: f64 = 100.0;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    ScrollDown,
    ScrollUp,
    ToggleHelp,
    EditAddress,
    /// Arrow/Page/Home/End routed to the engine's keyboard adapter
    Page(PageKey),
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, mode: &Mode, keymap: &Keymap) -> Action {
    match mode {
        Mode::Help => return Action::ExitMode,
        Mode::Address(_) => return handle_input_mode(key),
        Mode::Normal => {}
    }

    if let Some(action) = keymap.lookup(key.code, key.modifiers) {
        return action.clone();
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return Action::None;
    }
    page_key(key.code).map(Action::Page).unwrap_or(Action::None)
}

/// Key events while the address prompt is open
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

pub fn page_key(code: KeyCode) -> Option<PageKey> {
    match code {
        KeyCode::Up => Some(PageKey::ArrowUp),
        KeyCode::Down => Some(PageKey::ArrowDown),
        KeyCode::Left => Some(PageKey::ArrowLeft),
        KeyCode::Right => Some(PageKey::ArrowRight),
        KeyCode::PageUp => Some(PageKey::PageUp),
        KeyCode::PageDown => Some(PageKey::PageDown),
        KeyCode::Home => Some(PageKey::Home),
        KeyCode::End => Some(PageKey::End),
        _ => None,
    }
}

/// Terminal wheel events in browser wheel conventions
pub fn wheel_input(kind: MouseEventKind) -> Option<WheelInput> {
    match kind {
        MouseEventKind::ScrollDown => Some(WheelInput::vertical(WHEEL_STEP)),
        MouseEventKind::ScrollUp => Some(WheelInput::vertical(-WHEEL_STEP)),
        MouseEventKind::ScrollRight => Some(WheelInput::horizontal(WHEEL_STEP)),
        MouseEventKind::ScrollLeft => Some(WheelInput::horizontal(-WHEEL_STEP)),
        _ => None,
    }
}
