//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - catalog: Catalog building from listings and menu cursor movement
//! - errors: Error classification for the status bar
//! - formatting: Info label and size formatting
//! - layout: Cell/pixel mapping and label placement
//! - raster: Resize, composite and PNG encoding
//! - split: Split line easing and its animation timer
//! - ui: UI timing and split nudging

pub mod catalog;
pub mod errors;
pub mod formatting;
pub mod layout;
pub mod raster;
pub mod split;
pub mod ui;
