//! Event Handlers
//!
//! This module contains handlers for terminal input:
//! - keyboard: Key presses (menu, split, snapshot, quit)
//! - mouse: Pointer movement over the split view
//!
//! Handlers take &mut App and dispatch to its orchestration methods.

pub mod keyboard;
pub mod mouse;

// Re-export for convenience
pub use keyboard::handle_key;
pub use mouse::handle_mouse;
