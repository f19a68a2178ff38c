//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models:
//!
//! - **CatalogModel**: Codec folders and their images
//! - **ViewModel**: Images shown on each side and the split position
//! - **UiModel**: Preferences, menu cursor, messages
//!
//! Key principles:
//! - Clone + Debug: Can snapshot state
//! - No services: All I/O lives in the App runtime

pub mod catalog;
pub mod ui;
pub mod view;

pub use catalog::{Catalog, CatalogGroup, CatalogModel, CatalogState, ImageRecord, MenuRow};
pub use ui::UiModel;
pub use view::{ImageSlot, LoadedImage, SideView, ViewModel};

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub catalog: CatalogModel,
    pub view: ViewModel,
    pub ui: UiModel,
}

impl Model {
    pub fn new(vim_mode: bool, show_menu: bool) -> Self {
        Self {
            catalog: CatalogModel::new(),
            view: ViewModel::new(),
            ui: UiModel::new(vim_mode, show_menu),
        }
    }

    /// Record under the menu cursor, if the cursor is on a file
    pub fn selected_record(&self) -> Option<&ImageRecord> {
        let row = *self.catalog.rows.get(self.ui.menu_selection?)?;
        self.catalog.catalog.row_record(row)
    }

    /// Catalog record shown on a side
    pub fn side_record(&self, side: crate::Side) -> Option<&ImageRecord> {
        let path = self.view.side(side).slot.path()?;
        self.catalog.catalog.record(path)
    }

    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_record_follows_cursor() {
        let mut model = Model::new(false, true);
        model.catalog.set_catalog(Catalog::new(vec![CatalogGroup {
            dir: "jpg".to_string(),
            label: "jpg - JPEG".to_string(),
            files: vec![ImageRecord {
                path: "/output/jpg/a.jpg".to_string(),
                name: "a.jpg".to_string(),
                size: 10,
                codec: "jpg".to_string(),
            }],
        }]));

        model.ui.menu_selection = Some(0);
        assert!(model.selected_record().is_none(), "header row has no record");

        model.ui.menu_selection = Some(1);
        assert_eq!(model.selected_record().map(|r| r.name.as_str()), Some("a.jpg"));
    }
}
