use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use splitview::logic::formatting::bits_per_pixel;
use splitview::model::{CatalogState, ImageSlot, Model};
use splitview::Side;

/// `jpg:native webp:worker pik:unsupported`, with `...` for probes still running
pub fn capability_summary(formats: &[(String, Option<&'static str>)]) -> String {
    formats
        .iter()
        .map(|(name, label)| format!("{}:{}", name, label.unwrap_or("...")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bits per pixel of the encoded file shown on a side
fn side_bpp(model: &Model, side: Side) -> Option<String> {
    let ImageSlot::Ready(image) = &model.view.side(side).slot else {
        return None;
    };
    let record = model.side_record(side)?;
    bits_per_pixel(record.size, image.source_dimensions())
        .map(|bpp| format!("{}: {:.3} bpp ({})", side.as_str(), bpp, image.strategy))
}

/// Render the bottom status bar
///
/// Shows catalog state (or the last error), bits per pixel of each side and
/// the capability each format settled on.
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    model: &Model,
    formats: &[(String, Option<&'static str>)],
) {
    let mut metrics = Vec::new();

    match &model.catalog.state {
        CatalogState::Loading => metrics.push("Loading catalog...".to_string()),
        CatalogState::Loaded => metrics.push(format!(
            "{} images in {} folders",
            model.catalog.catalog.file_count(),
            model.catalog.catalog.groups.len()
        )),
        // The menu pane shows the full error
        CatalogState::Failed(_) => {}
    }

    for side in [Side::Left, Side::Right] {
        if let Some(bpp) = side_bpp(model, side) {
            metrics.push(bpp);
        }
    }

    metrics.push(capability_summary(formats));

    let mut spans = Vec::new();
    if let Some(status) = &model.ui.status_message {
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Red)));
        spans.push(Span::raw(" │ "));
    }
    spans.push(Span::raw(metrics.join(" │ ")));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_summary_marks_pending_probes() {
        let formats = vec![
            ("jpg".to_string(), Some("native")),
            ("bpg".to_string(), None),
            ("pik".to_string(), Some("unsupported")),
        ];
        assert_eq!(
            capability_summary(&formats),
            "jpg:native bpg:... pik:unsupported"
        );
    }

    #[test]
    fn test_side_bpp_needs_loaded_image() {
        let model = Model::new(false, true);
        assert!(side_bpp(&model, Side::Left).is_none());
    }
}
