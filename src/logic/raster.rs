//! Raster operations
//!
//! Resizing decoded images to the view, compositing the two sides around the
//! split line, and PNG serialization.

use anyhow::Result;
use image::imageops::FilterType;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

const BACKGROUND: Rgba<u8> = Rgba([24, 24, 24, 255]);
const DIVIDER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Pick a resampling filter for a downscale factor
///
/// Lanczos3 keeps detail for moderate downscales; heavier downscales trade
/// quality for speed.
pub fn choose_filter(scale_factor: f32) -> FilterType {
    if scale_factor > 4.0 {
        FilterType::Triangle
    } else if scale_factor > 2.0 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}

/// Largest size with the image's aspect ratio that fits the bounds
///
/// Never upscales and never returns a zero dimension.
///
/// # Examples
/// ```
/// use splitview::logic::raster::fit_within;
///
/// assert_eq!(fit_within((1000, 500), (200, 200)), (200, 100));
/// assert_eq!(fit_within((100, 50), (800, 600)), (100, 50));
/// ```
pub fn fit_within(size: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (width, height) = size;
    let (max_width, max_height) = bounds;
    if width == 0 || height == 0 || (width <= max_width && height <= max_height) {
        return size;
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let fitted_width = ((width as f64 * scale).round() as u32).max(1);
    let fitted_height = ((height as f64 * scale).round() as u32).max(1);
    (fitted_width, fitted_height)
}

/// Resize a decoded image to fit the view's pixel size
pub fn resize_to_fit(image: &RgbaImage, bounds: (u32, u32)) -> RgbaImage {
    let (width, height) = fit_within(image.dimensions(), bounds);
    if (width, height) == image.dimensions() {
        return image.clone();
    }

    let scale_factor = image.width() as f32 / width as f32;
    let filter = choose_filter(scale_factor);
    log::debug!(
        "Resizing {}x{} to {}x{} with {:?}",
        image.width(),
        image.height(),
        width,
        height,
        filter
    );
    image::imageops::resize(image, width, height, filter)
}

/// Copy the columns in `columns` of `image`, centered on the canvas
fn blit_columns(canvas: &mut RgbaImage, image: &RgbaImage, columns: std::ops::Range<u32>) {
    let offset_x = canvas.width().saturating_sub(image.width()) / 2;
    let offset_y = canvas.height().saturating_sub(image.height()) / 2;
    let rows = offset_y..(offset_y + image.height()).min(canvas.height());

    for x in columns {
        if x < offset_x || x - offset_x >= image.width() {
            continue;
        }
        for y in rows.clone() {
            canvas.put_pixel(x, y, *image.get_pixel(x - offset_x, y - offset_y));
        }
    }
}

/// Compose the comparison frame
///
/// Columns left of `split_x` come from `left`, the rest from `right`; a one
/// pixel divider marks `split_x`. Missing sides stay background.
pub fn composite(
    left: Option<&RgbaImage>,
    right: Option<&RgbaImage>,
    size: (u32, u32),
    split_x: u32,
) -> RgbaImage {
    let (width, height) = size;
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
    let split_x = split_x.min(width);

    if let Some(image) = left {
        blit_columns(&mut canvas, image, 0..split_x);
    }
    if let Some(image) = right {
        blit_columns(&mut canvas, image, split_x..width);
    }
    if split_x < width {
        for y in 0..height {
            canvas.put_pixel(split_x, y, DIVIDER);
        }
    }

    canvas
}

/// Serialize to PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}
