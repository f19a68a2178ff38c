//! Mouse Input Handler
//!
//! Pointer movement, drags and left clicks over the view retarget the split.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::App;

/// Whether this mouse event should move the split
fn moves_split(kind: MouseEventKind) -> bool {
    matches!(
        kind,
        MouseEventKind::Moved
            | MouseEventKind::Down(MouseButton::Left)
            | MouseEventKind::Drag(MouseButton::Left)
    )
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if moves_split(mouse.kind) {
        app.point_split_at(mouse.column, mouse.row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_and_left_click_move_split() {
        assert!(moves_split(MouseEventKind::Moved));
        assert!(moves_split(MouseEventKind::Down(MouseButton::Left)));
        assert!(moves_split(MouseEventKind::Drag(MouseButton::Left)));
    }

    #[test]
    fn test_other_buttons_and_scroll_ignored() {
        assert!(!moves_split(MouseEventKind::Down(MouseButton::Right)));
        assert!(!moves_split(MouseEventKind::Up(MouseButton::Left)));
        assert!(!moves_split(MouseEventKind::ScrollDown));
    }
}
