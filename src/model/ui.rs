//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! preferences, menu cursor, and transient messages.

use std::time::Instant;

use crate::Side;

#[derive(Clone, Debug)]
pub struct UiModel {
    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    /// Whether the catalog menu pane is shown
    pub show_menu: bool,

    /// Side that Enter loads into
    pub active_side: Side,

    /// Menu cursor (index into the flattened menu rows)
    pub menu_selection: Option<usize>,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Persistent status line (e.g. catalog errors)
    pub status_message: Option<String>,

    /// Font size of the terminal cells in pixels (width, height)
    pub font_size: (u16, u16),

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool, show_menu: bool) -> Self {
        Self {
            vim_mode,
            show_menu,
            active_side: Side::Left,
            menu_selection: None,
            toast_message: None,
            status_message: None,
            font_size: (8, 16),
            should_quit: false,
        }
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}
