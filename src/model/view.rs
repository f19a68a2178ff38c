//! View Model
//!
//! What each side of the comparison currently shows, and where the split is.

use image::RgbaImage;
use std::sync::Arc;

use crate::logic::split::{Point, SplitAnimator};
use crate::Side;

/// A decoded image, with a copy fitted to the current view
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub path: String,
    pub format: String,
    /// Decode strategy that produced it ("native", "worker", "dedicated")
    pub strategy: &'static str,
    pub source: Arc<RgbaImage>,
    pub fitted: Arc<RgbaImage>,
    /// View pixel size `fitted` was made for
    pub fitted_for: (u32, u32),
}

impl LoadedImage {
    pub fn source_dimensions(&self) -> (u32, u32) {
        self.source.dimensions()
    }
}

#[derive(Clone, Debug)]
pub enum ImageSlot {
    Empty,
    Ready(LoadedImage),
    Failed { path: String, message: String },
}

impl ImageSlot {
    pub fn path(&self) -> Option<&str> {
        match self {
            ImageSlot::Empty => None,
            ImageSlot::Ready(image) => Some(&image.path),
            ImageSlot::Failed { path, .. } => Some(path),
        }
    }

    pub fn fitted(&self) -> Option<&RgbaImage> {
        match self {
            ImageSlot::Ready(image) => Some(&image.fitted),
            _ => None,
        }
    }
}

/// A load in flight for one side
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingLoad {
    pub request_id: u64,
    pub path: String,
}

#[derive(Clone, Debug)]
pub struct SideView {
    pub slot: ImageSlot,
    pub pending: Option<PendingLoad>,
}

impl SideView {
    pub fn new() -> Self {
        Self {
            slot: ImageSlot::Empty,
            pending: None,
        }
    }

    /// Whether a result with this id is still wanted
    pub fn is_current(&self, request_id: u64) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.request_id == request_id)
    }
}

impl Default for SideView {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct ViewModel {
    pub left: SideView,
    pub right: SideView,
    pub split: SplitAnimator,
    /// View size in pixels
    pub view_px: (u32, u32),
    /// Bumped whenever a side's raster changes
    pub content_version: u64,
    next_request_id: u64,
}

impl ViewModel {
    pub fn new() -> Self {
        Self {
            left: SideView::new(),
            right: SideView::new(),
            split: SplitAnimator::new(Point::default()),
            view_px: (0, 0),
            content_version: 0,
            next_request_id: 1,
        }
    }

    pub fn side(&self, side: Side) -> &SideView {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideView {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Register a new load for `side`, superseding any in flight
    pub fn begin_load(&mut self, side: Side, path: String) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.side_mut(side).pending = Some(PendingLoad { request_id, path });
        request_id
    }

    /// Store a finished load's slot if it is still the current request
    pub fn finish_load(&mut self, side: Side, request_id: u64, slot: ImageSlot) -> bool {
        let view = self.side_mut(side);
        if !view.is_current(request_id) {
            return false;
        }
        view.pending = None;
        view.slot = slot;
        self.content_version += 1;
        true
    }

    /// Drop a pending load without touching what the side shows
    pub fn abandon_load(&mut self, side: Side, request_id: u64) -> bool {
        let view = self.side_mut(side);
        if !view.is_current(request_id) {
            return false;
        }
        view.pending = None;
        true
    }

    /// Split line position as a pixel column of the view
    pub fn split_x(&self) -> u32 {
        self.split.position().x.round().max(0.0) as u32
    }

    /// Adopt a new view size; the split keeps its relative position
    ///
    /// Returns true when the size actually changed.
    pub fn resize_view(&mut self, view_px: (u32, u32)) -> bool {
        if view_px == self.view_px {
            return false;
        }

        let (old_w, old_h) = self.view_px;
        let (new_w, new_h) = (view_px.0 as f64, view_px.1 as f64);
        let position = if old_w == 0 || old_h == 0 {
            Point::new(0.5 * new_w, 0.5 * new_h)
        } else {
            let current = self.split.position();
            Point::new(
                (current.x / old_w as f64 * new_w).round(),
                (current.y / old_h as f64 * new_h).round(),
            )
        };

        self.split.reset(position);
        self.view_px = view_px;
        self.content_version += 1;
        true
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_result_is_ignored() {
        let mut view = ViewModel::new();
        let first = view.begin_load(Side::Left, "/output/jpg/a.jpg".to_string());
        let second = view.begin_load(Side::Left, "/output/jpg/b.jpg".to_string());
        assert_ne!(first, second);

        let stale = ImageSlot::Failed {
            path: "/output/jpg/a.jpg".to_string(),
            message: "late".to_string(),
        };
        assert!(!view.finish_load(Side::Left, first, stale));
        assert!(view.left.pending.is_some());

        let fresh = ImageSlot::Failed {
            path: "/output/jpg/b.jpg".to_string(),
            message: "404".to_string(),
        };
        assert!(view.finish_load(Side::Left, second, fresh));
        assert!(view.left.pending.is_none());
        assert_eq!(view.left.slot.path(), Some("/output/jpg/b.jpg"));
    }

    #[test]
    fn test_sides_are_independent() {
        let mut view = ViewModel::new();
        let left = view.begin_load(Side::Left, "/output/jpg/a.jpg".to_string());
        let right = view.begin_load(Side::Right, "/output/png/a.png".to_string());
        assert!(view.abandon_load(Side::Right, right));
        assert!(view.left.is_current(left));
        assert!(view.right.pending.is_none());
    }

    #[test]
    fn test_first_resize_centers_split() {
        let mut view = ViewModel::new();
        assert!(view.resize_view((640, 384)));
        assert_eq!(view.split.position(), Point::new(320.0, 192.0));
        assert!(!view.resize_view((640, 384)));
    }

    #[test]
    fn test_resize_keeps_relative_split() {
        let mut view = ViewModel::new();
        view.resize_view((400, 200));
        view.split.reset(Point::new(100.0, 50.0));
        view.resize_view((800, 400));
        assert_eq!(view.split.position(), Point::new(200.0, 100.0));
        assert!(!view.split.is_animating());
    }
}
