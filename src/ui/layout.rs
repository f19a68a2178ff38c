use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Widest the catalog menu gets
const MENU_MAX_WIDTH: u16 = 40;
const MENU_MIN_WIDTH: u16 = 16;

/// Layout information for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInfo {
    /// Catalog menu pane (if visible)
    pub menu_area: Option<Rect>,
    /// Bordered split view pane
    pub view_area: Rect,
    /// Row above the image holding the two info labels
    pub label_area: Rect,
    /// Where the composited frame is drawn
    pub image_area: Rect,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, show_menu: bool, vim_mode: bool) -> LayoutInfo {
    let legend_height = super::legend::calculate_legend_height(terminal_size.width, vim_mode, show_menu);

    // Content area (menu + view) + legend + status bar (bottom)
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(legend_height),
            Constraint::Length(3),
        ])
        .split(terminal_size);

    let content_area = main_chunks[0];
    let legend_area = main_chunks[1];
    let status_area = main_chunks[2];

    let (menu_area, view_area) = if show_menu {
        let menu_width = (content_area.width / 3)
            .clamp(MENU_MIN_WIDTH, MENU_MAX_WIDTH)
            .min(content_area.width);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(menu_width), Constraint::Min(0)])
            .split(content_area);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, content_area)
    };

    // Inside the view border: one label row, then the image
    let inner = view_area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    let view_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    LayoutInfo {
        menu_area,
        view_area,
        label_area: view_chunks[0],
        image_area: view_chunks[1],
        legend_area,
        status_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_takes_a_third_up_to_limit() {
        let layout = calculate_layout(Rect::new(0, 0, 90, 40), true, false);
        assert_eq!(layout.menu_area.map(|a| a.width), Some(30));

        let wide = calculate_layout(Rect::new(0, 0, 300, 40), true, false);
        assert_eq!(wide.menu_area.map(|a| a.width), Some(MENU_MAX_WIDTH));
    }

    #[test]
    fn test_hidden_menu_gives_view_full_width() {
        let layout = calculate_layout(Rect::new(0, 0, 100, 40), false, false);
        assert!(layout.menu_area.is_none());
        assert_eq!(layout.view_area.width, 100);
        assert_eq!(layout.image_area.width, 98);
    }

    #[test]
    fn test_image_sits_below_label_row() {
        let layout = calculate_layout(Rect::new(0, 0, 100, 40), true, false);
        assert_eq!(layout.label_area.height, 1);
        assert_eq!(layout.image_area.y, layout.label_area.y + 1);
        assert_eq!(layout.image_area.x, layout.label_area.x);
    }
}
