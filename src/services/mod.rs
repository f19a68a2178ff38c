//! Background Services
//!
//! This module contains tasks that run off the UI loop:
//! - loader: Image fetch, decode and fit pipeline

pub mod loader;

// Re-export commonly used types for convenience
pub use loader::{LoadRequest, LoadUpdate};
