//! splitview library
//!
//! Exposes modules for testing

pub mod api;
pub mod codec;
pub mod config;
pub mod logic;
pub mod model;
pub mod utils;

/// Which half of the comparison view an image is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
