// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (menu, split view, legend, status bar)
// - render: Main orchestration function that coordinates all rendering
// - menu: Renders the grouped catalog menu
// - split_view: Renders the composited comparison frame and its labels
// - legend: Renders hotkey legend
// - status_bar: Renders bottom status bar with catalog and codec state
// - toast: Renders toast notifications (brief pop-up messages)

pub mod layout;
pub mod legend;
pub mod menu;
pub mod render;
pub mod split_view;
pub mod status_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
