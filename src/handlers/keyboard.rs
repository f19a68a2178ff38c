//! Keyboard Input Handler
//!
//! Maps keys to app actions. Vim mode adds hjkl on top of the arrow keys.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::App;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Quit,
    SwitchSide,
    CursorUp,
    CursorDown,
    Load,
    NudgeLeft,
    NudgeRight,
    EdgeLeft,
    EdgeRight,
    ToggleMenu,
    Snapshot,
}

/// Resolve a key press to an action (extracted for testability)
pub(crate) fn key_action(key: KeyEvent, vim_mode: bool) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(KeyAction::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab | KeyCode::BackTab => KeyAction::SwitchSide,
        KeyCode::Up => KeyAction::CursorUp,
        KeyCode::Down => KeyAction::CursorDown,
        KeyCode::Enter => KeyAction::Load,
        KeyCode::Left => KeyAction::NudgeLeft,
        KeyCode::Right => KeyAction::NudgeRight,
        KeyCode::Home => KeyAction::EdgeLeft,
        KeyCode::End => KeyAction::EdgeRight,
        KeyCode::Char('m') => KeyAction::ToggleMenu,
        KeyCode::Char('s') => KeyAction::Snapshot,
        KeyCode::Char('k') if vim_mode => KeyAction::CursorUp,
        KeyCode::Char('j') if vim_mode => KeyAction::CursorDown,
        KeyCode::Char('h') if vim_mode => KeyAction::NudgeLeft,
        KeyCode::Char('l') if vim_mode => KeyAction::NudgeRight,
        _ => return None,
    };
    Some(action)
}

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let Some(action) = key_action(key, app.model.ui.vim_mode) else {
        return Ok(());
    };

    match action {
        KeyAction::Quit => app.model.ui.should_quit = true,
        KeyAction::SwitchSide => app.switch_side(),
        KeyAction::CursorUp => app.move_menu_cursor(-1),
        KeyAction::CursorDown => app.move_menu_cursor(1),
        KeyAction::Load => app.load_selected(),
        KeyAction::NudgeLeft => app.nudge_split(-1),
        KeyAction::NudgeRight => app.nudge_split(1),
        KeyAction::EdgeLeft => app.split_to_edge(false),
        KeyAction::EdgeRight => app.split_to_edge(true),
        KeyAction::ToggleMenu => app.toggle_menu(),
        KeyAction::Snapshot => app.save_snapshot(),
    }

    Ok(())
}
