//! UI state transition logic
//!
//! Pure functions for UI timing and nudging.

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 2500;

/// Fraction of the view width one arrow key press moves the split
pub const NUDGE_FRACTION: f64 = 0.05;

pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

/// New split x after nudging `steps` times (negative = left)
///
/// # Examples
/// ```
/// use splitview::logic::ui::nudge_split_x;
///
/// assert_eq!(nudge_split_x(100.0, 1, 400.0), 120.0);
/// assert_eq!(nudge_split_x(10.0, -1, 400.0), 0.0);
/// assert_eq!(nudge_split_x(395.0, 1, 400.0), 399.0);
/// ```
pub fn nudge_split_x(current: f64, steps: i32, view_width: f64) -> f64 {
    let moved = current + steps as f64 * view_width * NUDGE_FRACTION;
    moved.clamp(0.0, (view_width - 1.0).max(0.0))
}
