//! Split line orchestration methods
//!
//! Every input that moves the split only sets a new target; the animator
//! eases toward it one tick at a time from the event loop.

use std::time::Instant;

use crate::App;
use splitview::logic::{self, split::Point};

impl App {
    /// Retarget the split, clamping the target into the view
    fn retarget_split(&mut self, x: f64, y: f64) {
        let (width, height) = self.model.view.view_px;
        if width == 0 || height == 0 {
            return;
        }
        let target = logic::split::clamp_target(x, y, width as f64, height as f64);
        self.model.view.split.set_target(target, Instant::now());
    }

    fn split_target(&self) -> Point {
        self.model.view.split.state().target
    }

    /// Nudge the split target left (negative) or right
    pub(crate) fn nudge_split(&mut self, steps: i32) {
        let target = self.split_target();
        let width = self.model.view.view_px.0 as f64;
        let x = logic::ui::nudge_split_x(target.x, steps, width);
        self.retarget_split(x, target.y);
    }

    /// Send the split to the left or right edge
    pub(crate) fn split_to_edge(&mut self, right: bool) {
        let target = self.split_target();
        let x = if right {
            self.model.view.view_px.0 as f64
        } else {
            0.0
        };
        self.retarget_split(x, target.y);
    }

    /// Pointer moved or clicked at a terminal cell
    ///
    /// Cells outside the composited frame are ignored.
    pub(crate) fn point_split_at(&mut self, column: u16, row: u16) {
        let area = self.view_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return;
        }

        let (x, y) = logic::layout::cell_to_pixel(
            ((column - area.x) as i32, (row - area.y) as i32),
            self.model.ui.font_size,
        );
        self.retarget_split(x, y);
    }

    /// Advance the split animation if a tick is due
    pub(crate) fn tick_split(&mut self, now: Instant) {
        if self.model.view.split.advance(now) && !self.model.view.split.is_animating() {
            log::debug!("Split settled at {:?}", self.model.view.split.position());
        }
    }
}
