//! Menu orchestration methods
//!
//! Cursor movement over the catalog, target side selection and loading the
//! selected file.

use crate::App;
use splitview::logic;

impl App {
    /// Move the menu cursor by `delta` files, skipping group headers
    pub(crate) fn move_menu_cursor(&mut self, delta: isize) {
        self.model.ui.menu_selection =
            logic::catalog::move_file_cursor(&self.model.catalog.rows, self.model.ui.menu_selection, delta);
    }

    pub(crate) fn switch_side(&mut self) {
        self.model.ui.active_side = self.model.ui.active_side.other();
    }

    pub(crate) fn toggle_menu(&mut self) {
        self.model.ui.show_menu = !self.model.ui.show_menu;
    }

    /// Load the file under the cursor into the target side
    pub(crate) fn load_selected(&mut self) {
        let Some(path) = self.model.selected_record().map(|record| record.path.clone()) else {
            return;
        };
        let side = self.model.ui.active_side;
        self.load_into(side, path);
    }
}
