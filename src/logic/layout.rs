//! Layout calculation logic
//!
//! Pure functions mapping between terminal cells and image pixels, and
//! placing the info labels against the split line.

/// Pixel size of a view spanning `cells` terminal cells
pub fn cells_to_pixels(cells: (u16, u16), font_size: (u16, u16)) -> (u32, u32) {
    (
        cells.0 as u32 * font_size.0 as u32,
        cells.1 as u32 * font_size.1 as u32,
    )
}

/// Pointer position in view pixels, from a cell relative to the view origin
///
/// Points at the center of the cell so a click lands where the eye expects.
pub fn cell_to_pixel(offset: (i32, i32), font_size: (u16, u16)) -> (f64, f64) {
    let (font_w, font_h) = (font_size.0.max(1) as f64, font_size.1.max(1) as f64);
    (
        offset.0 as f64 * font_w + font_w / 2.0,
        offset.1 as f64 * font_h + font_h / 2.0,
    )
}

/// Terminal column (relative to the view) that contains pixel `x`
pub fn pixel_to_column(x: f64, font_width: u16) -> u16 {
    if x <= 0.0 {
        return 0;
    }
    (x / font_width.max(1) as f64).floor() as u16
}

/// Horizontal positions of the two info labels
///
/// The left label ends at the split column, the right label starts just
/// after it. Both are pushed back inside the view when they would overflow.
///
/// # Examples
/// ```
/// use splitview::logic::layout::label_offsets;
///
/// // Split in the middle of an 80-column view
/// assert_eq!(label_offsets(40, 80, 10, 12), (30, 41));
/// // Split hard left: left label pinned at 0
/// assert_eq!(label_offsets(3, 80, 10, 12), (0, 4));
/// ```
pub fn label_offsets(split_col: u16, view_width: u16, left_width: u16, right_width: u16) -> (u16, u16) {
    let left_x = split_col.saturating_sub(left_width);

    let right_start = split_col.saturating_add(1);
    let right_x = right_start.min(view_width.saturating_sub(right_width));

    (left_x, right_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_to_pixels() {
        assert_eq!(cells_to_pixels((80, 24), (8, 16)), (640, 384));
    }

    #[test]
    fn test_cell_to_pixel_centers() {
        assert_eq!(cell_to_pixel((0, 0), (8, 16)), (4.0, 8.0));
        assert_eq!(cell_to_pixel((2, 1), (8, 16)), (20.0, 24.0));
    }

    #[test]
    fn test_cell_to_pixel_negative_offset() {
        let (x, _) = cell_to_pixel((-1, 0), (8, 16));
        assert!(x < 0.0);
    }

    #[test]
    fn test_pixel_to_column() {
        assert_eq!(pixel_to_column(0.0, 8), 0);
        assert_eq!(pixel_to_column(-3.0, 8), 0);
        assert_eq!(pixel_to_column(15.9, 8), 1);
        assert_eq!(pixel_to_column(16.0, 8), 2);
    }

    #[test]
    fn test_label_offsets_right_edge() {
        // Split near the right edge: right label pulled back inside
        assert_eq!(label_offsets(78, 80, 10, 12), (68, 68));
    }

    #[test]
    fn test_label_offsets_narrow_view() {
        assert_eq!(label_offsets(5, 8, 10, 12), (0, 0));
    }
}
