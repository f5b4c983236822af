//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    MoveUp,
    MoveDown,
    ScrollUp,
    ScrollDown,

    // Catalog tree
    ToggleSelected,
    ExpandAll,
    CollapseAll,

    // Search
    StartSearch,
    SearchChar(char),
    SearchBackspace,
    EndSearch,
    ClearSearch,

    // Form editing
    StartEditing,
    StopEditing,
    NextField,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Request actions
    Execute,
    CancelRequest,
    ClearResponse,
    CopyUrl,
    CopyResponse,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Panel {
    Catalog,
    Form,
    Response,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Catalog => Panel::Form,
            Panel::Form => Panel::Response,
            Panel::Response => Panel::Catalog,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Catalog => Panel::Response,
            Panel::Form => Panel::Catalog,
            Panel::Response => Panel::Form,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
    Searching,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('x') => return Some(UiEvent::CancelRequest),
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Searching => match key.code {
            KeyCode::Esc => Some(UiEvent::ClearSearch),
            KeyCode::Enter => Some(UiEvent::EndSearch),
            KeyCode::Backspace => Some(UiEvent::SearchBackspace),
            KeyCode::Char(c) => Some(UiEvent::SearchChar(c)),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
        InputMode::Normal => handle_normal_keys(key, active_panel),
    }
}

fn handle_normal_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('/') => Some(UiEvent::StartSearch),
        KeyCode::Esc => Some(UiEvent::ClearSearch),
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),
        KeyCode::Char('s') => Some(UiEvent::Execute),
        KeyCode::Char('d') => Some(UiEvent::ClearResponse),
        KeyCode::Char('u') => Some(UiEvent::CopyUrl),
        KeyCode::Char('y') => Some(UiEvent::CopyResponse),
        KeyCode::Char('E') => Some(UiEvent::ExpandAll),
        KeyCode::Char('C') => Some(UiEvent::CollapseAll),
        KeyCode::Up | KeyCode::Char('k') => match active_panel {
            Panel::Response => Some(UiEvent::ScrollUp),
            _ => Some(UiEvent::MoveUp),
        },
        KeyCode::Down | KeyCode::Char('j') => match active_panel {
            Panel::Response => Some(UiEvent::ScrollDown),
            _ => Some(UiEvent::MoveDown),
        },
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('e') => match active_panel {
            Panel::Catalog => Some(UiEvent::ToggleSelected),
            Panel::Form => Some(UiEvent::StartEditing),
            Panel::Response => None,
        },
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
    fn test_enter_depends_on_panel() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), Panel::Catalog, InputMode::Normal, false),
            Some(UiEvent::ToggleSelected)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), Panel::Form, InputMode::Normal, false),
            Some(UiEvent::StartEditing)
        );
    }

    #[test]
    fn test_search_mode_captures_letters() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), Panel::Catalog, InputMode::Searching, false),
            Some(UiEvent::SearchChar('q'))
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Esc), Panel::Catalog, InputMode::Searching, false),
            Some(UiEvent::ClearSearch)
        );
    }

    #[test]
    fn test_help_swallows_keys_but_not_ctrl_c() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('s')), Panel::Form, InputMode::Normal, true),
            Some(UiEvent::CloseHelp)
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(ctrl_c, Panel::Form, InputMode::Normal, true),
            Some(UiEvent::Quit)
        );
    }
}
