//! Image loading orchestration methods
//!
//! Methods for putting images on the two sides:
//! - Starting a background load for a selection
//! - Applying load results (dropping stale ones)
//! - Keeping fitted rasters in step with the view size

use ratatui::layout::Rect;

use crate::services::{loader, LoadRequest, LoadUpdate};
use crate::{ui, App};
use splitview::logic;
use splitview::model::ImageSlot;
use splitview::Side;

impl App {
    /// Start loading `path` into `side`
    ///
    /// Paths whose format is not registered are rejected here, before the
    /// side's state is touched or anything is fetched.
    pub(crate) fn load_into(&mut self, side: Side, path: String) {
        if let Err(reason) = self.dispatcher.check(&path) {
            log::warn!("{}", reason.message());
            self.model.show_toast(format!("Error: {}", reason.message()));
            return;
        }

        let request_id = self.model.view.begin_load(side, path.clone());
        let request = LoadRequest {
            side,
            request_id,
            path,
            view_px: self.model.view.view_px,
        };
        loader::spawn_load(
            self.client.clone(),
            self.dispatcher.clone(),
            request,
            self.load_tx.clone(),
        );
    }

    pub(crate) fn handle_load_update(&mut self, update: LoadUpdate) {
        match update {
            LoadUpdate::Loaded {
                side,
                request_id,
                image,
            } => {
                let stale_fit = image.fitted_for != self.model.view.view_px;
                if !self.model.view.finish_load(side, request_id, ImageSlot::Ready(image)) {
                    log::debug!("Dropping stale load #{} for {}", request_id, side.as_str());
                    return;
                }
                // The view changed size while this was loading
                if stale_fit {
                    self.refit_images();
                }
            }
            LoadUpdate::Failed {
                side,
                request_id,
                path,
                error,
            } => {
                let message = logic::errors::format_error_message(&error);
                let slot = ImageSlot::Failed {
                    path,
                    message: message.clone(),
                };
                if self.model.view.finish_load(side, request_id, slot) {
                    self.model
                        .show_toast(format!("Error: {} side failed to load: {}", side.as_str(), message));
                }
            }
            LoadUpdate::Aborted {
                side,
                request_id,
                reason,
            } => {
                if self.model.view.abandon_load(side, request_id) {
                    self.model.show_toast(format!("Error: {}", reason.message()));
                }
            }
            LoadUpdate::Refitted {
                side,
                path,
                fitted,
                fitted_for,
            } => {
                let view_px = self.model.view.view_px;
                if let ImageSlot::Ready(image) = &mut self.model.view.side_mut(side).slot {
                    if image.path == path && fitted_for == view_px {
                        image.fitted = fitted;
                        image.fitted_for = fitted_for;
                        self.model.view.content_version += 1;
                    }
                }
            }
        }
    }

    /// Recompute the layout for this terminal size and adopt the view size
    pub(crate) fn sync_view_area(&mut self, terminal_area: Rect) {
        let layout =
            ui::layout::calculate_layout(terminal_area, self.model.ui.show_menu, self.model.ui.vim_mode);
        self.view_area = layout.image_area;

        let view_px = logic::layout::cells_to_pixels(
            (layout.image_area.width, layout.image_area.height),
            self.model.ui.font_size,
        );
        if self.model.view.resize_view(view_px) {
            log::debug!("View is now {}x{} px", view_px.0, view_px.1);
            self.refit_images();
        }
    }

    /// Re-fit shown images that were fitted for another view size
    fn refit_images(&mut self) {
        let view_px = self.model.view.view_px;
        for side in [Side::Left, Side::Right] {
            if let ImageSlot::Ready(image) = &self.model.view.side(side).slot {
                if image.fitted_for != view_px {
                    loader::spawn_refit(
                        side,
                        image.path.clone(),
                        image.source.clone(),
                        view_px,
                        self.load_tx.clone(),
                    );
                }
            }
        }
    }
}
