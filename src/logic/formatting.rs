//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use unicode_width::UnicodeWidthStr;

use crate::model::catalog::ImageRecord;
use crate::utils;

/// Info label text for one side: `webp · photo.webp · 12.00 KB · 800×600`
///
/// # Examples
/// ```
/// use splitview::logic::formatting::format_info_label;
/// use splitview::model::catalog::ImageRecord;
///
/// let record = ImageRecord {
///     path: "/output/webp/photo.webp".to_string(),
///     name: "photo.webp".to_string(),
///     size: 2048,
///     codec: "webp".to_string(),
/// };
/// assert_eq!(format_info_label(&record, Some((800, 600))), "webp · photo.webp · 2.00 KB · 800×600");
/// assert_eq!(format_info_label(&record, None), "webp · photo.webp · 2.00 KB");
/// ```
pub fn format_info_label(record: &ImageRecord, dimensions: Option<(u32, u32)>) -> String {
    let mut label = format!(
        "{} · {} · {}",
        record.codec,
        record.name,
        utils::format_bytes(record.size)
    );
    if let Some((width, height)) = dimensions {
        label.push_str(&format!(" · {}×{}", width, height));
    }
    label
}

/// Bits per pixel of an encoded image, the usual codec comparison figure
pub fn bits_per_pixel(size_bytes: u64, dimensions: (u32, u32)) -> Option<f64> {
    let pixels = dimensions.0 as u64 * dimensions.1 as u64;
    if pixels == 0 {
        return None;
    }
    Some(size_bytes as f64 * 8.0 / pixels as f64)
}

/// Truncate to a display width, marking the cut with an ellipsis
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_per_pixel() {
        assert_eq!(bits_per_pixel(100, (10, 10)), Some(8.0));
        assert_eq!(bits_per_pixel(100, (0, 10)), None);
    }

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_to_width("photo.jpg", 20), "photo.jpg");
    }

    #[test]
    fn test_truncate_long_text() {
        let out = truncate_to_width("a-very-long-file-name.webp", 10);
        assert_eq!(out, "a-very-lo…");
        assert_eq!(out.width(), 10);
    }

    #[test]
    fn test_truncate_zero_width() {
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
