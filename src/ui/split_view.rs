//! The comparison pane
//!
//! Both sides are composited into a single frame around the split column and
//! handed to the terminal graphics protocol. The encoded frame is cached
//! until the split column, view size or either side's raster changes.

use image::DynamicImage;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui_image::{protocol::Protocol, Image, Resize};
use unicode_width::UnicodeWidthStr;

use splitview::logic::{self, formatting::truncate_to_width};
use splitview::model::{ImageSlot, Model};
use splitview::Side;

use super::layout::LayoutInfo;
use crate::App;

/// Everything the composited frame depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameKey {
    split_x: u32,
    view_px: (u32, u32),
    content_version: u64,
    area: Rect,
}

/// Encoded composite, ready to draw
pub struct SplitFrame {
    key: FrameKey,
    protocol: Protocol,
}

pub fn render_split_view(f: &mut Frame, layout: &LayoutInfo, app: &mut App) {
    let active = app.model.ui.active_side;
    let title = Line::from(vec![
        Span::raw(" Split view · target: "),
        Span::styled(
            active.as_str(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ]);
    f.render_widget(
        Block::default().borders(Borders::ALL).title(title),
        layout.view_area,
    );

    let split_x = app.model.view.split_x();
    render_labels(f, layout.label_area, &app.model, split_x);
    render_frame(f, layout.image_area, app, split_x);
}

/// Info labels hugging the split column
fn render_labels(f: &mut Frame, area: Rect, model: &Model, split_x: u32) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let split_col = logic::layout::pixel_to_column(split_x as f64, model.ui.font_size.0).min(area.width);
    let left_room = split_col as usize;
    let right_room = area.width.saturating_sub(split_col + 1) as usize;

    let (left_text, left_style) = side_label(model, Side::Left);
    let (right_text, right_style) = side_label(model, Side::Right);
    let left_text = truncate_to_width(&left_text, left_room);
    let right_text = truncate_to_width(&right_text, right_room);

    let (left_x, right_x) = logic::layout::label_offsets(
        split_col,
        area.width,
        left_text.width() as u16,
        right_text.width() as u16,
    );

    for (text, style, x) in [(left_text, left_style, left_x), (right_text, right_style, right_x)] {
        let width = text.width() as u16;
        if width == 0 {
            continue;
        }
        let label_area = Rect {
            x: area.x + x,
            y: area.y,
            width: width.min(area.width.saturating_sub(x)),
            height: 1,
        };
        f.render_widget(Paragraph::new(Span::styled(text, style)), label_area);
    }
}

/// Label text and style for one side
fn side_label(model: &Model, side: Side) -> (String, Style) {
    let view = model.view.side(side);
    let base = if side == model.ui.active_side {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    if let Some(pending) = &view.pending {
        return (format!("Loading {}...", file_name(&pending.path)), base);
    }

    match &view.slot {
        ImageSlot::Empty => (format!("{}: empty", side.as_str()), base.fg(Color::DarkGray)),
        ImageSlot::Ready(image) => {
            let text = match model.side_record(side) {
                Some(record) => {
                    logic::formatting::format_info_label(record, Some(image.source_dimensions()))
                }
                None => {
                    let (width, height) = image.source_dimensions();
                    format!("{} · {}×{}", file_name(&image.path), width, height)
                }
            };
            (text, base)
        }
        ImageSlot::Failed { path, message } => (
            format!("{}: {}", file_name(path), message),
            base.fg(Color::Red),
        ),
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Draw the composited frame, re-encoding it only when its inputs changed
fn render_frame(f: &mut Frame, area: Rect, app: &mut App, split_x: u32) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let view = &app.model.view;
    let left = view.left.slot.fitted();
    let right = view.right.slot.fitted();
    if left.is_none() && right.is_none() {
        app.frame = None;
        let hint = Paragraph::new(format!(
            "Pick an image and press Enter to load it on the {} side",
            app.model.ui.active_side.as_str()
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, area);
        return;
    }

    let key = FrameKey {
        split_x,
        view_px: view.view_px,
        content_version: view.content_version,
        area,
    };

    let cached = app.frame.as_ref().is_some_and(|frame| frame.key == key);
    if !cached {
        let composite = logic::raster::composite(left, right, view.view_px, split_x);
        match app
            .picker
            .new_protocol(DynamicImage::ImageRgba8(composite), area, Resize::Fit(None))
        {
            Ok(protocol) => app.frame = Some(SplitFrame { key, protocol }),
            Err(e) => {
                log::warn!("Failed to encode split frame: {:?}", e);
                app.frame = None;
            }
        }
    }

    match &app.frame {
        Some(frame) => f.render_widget(Image::new(&frame.protocol), area),
        None => f.render_widget(
            Paragraph::new("Terminal graphics unavailable")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red)),
            area,
        ),
    }
}
