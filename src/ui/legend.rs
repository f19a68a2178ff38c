use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(vim_mode: bool, show_menu: bool) -> Vec<Span<'static>> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let mut hotkey_spans = vec![key("Tab"), Span::raw(":Side  ")];

    // Navigation keys (different for vim mode)
    if vim_mode {
        hotkey_spans.extend(vec![
            key("j/k"),
            Span::raw(":Select  "),
            key("Enter"),
            Span::raw(":Load  "),
            key("h/l"),
            Span::raw(":Split  "),
        ]);
    } else {
        hotkey_spans.extend(vec![
            key("↑/↓"),
            Span::raw(":Select  "),
            key("Enter"),
            Span::raw(":Load  "),
            key("←/→"),
            Span::raw(":Split  "),
        ]);
    }

    hotkey_spans.extend(vec![
        key("Home/End"),
        Span::raw(":Edges  "),
        key("Mouse"),
        Span::raw(":Move Split  "),
        key("m"),
        Span::raw(if show_menu { ":Hide Menu  " } else { ":Show Menu  " }),
        key("s"),
        Span::raw(":Snapshot  "),
    ]);

    // Quit - always available
    hotkey_spans.extend(vec![key("q"), Span::raw(":Quit")]);

    hotkey_spans
}

/// Build the legend paragraph
pub fn build_legend_paragraph(vim_mode: bool, show_menu: bool) -> Paragraph<'static> {
    let hotkey_line = Line::from(build_hotkey_spans(vim_mode, show_menu));

    Paragraph::new(vec![hotkey_line])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

/// Render the hotkey legend
pub fn render_legend(f: &mut Frame, area: Rect, vim_mode: bool, show_menu: bool) {
    f.render_widget(build_legend_paragraph(vim_mode, show_menu), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, vim_mode: bool, show_menu: bool) -> u16 {
    // line_count() doesn't account for borders when a block is attached
    let hotkey_line = Line::from(build_hotkey_spans(vim_mode, show_menu));
    let paragraph_for_counting =
        Paragraph::new(vec![hotkey_line]).wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper function to convert spans to plain text for assertions
    fn spans_to_text(spans: &[Span]) -> String {
        spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect::<Vec<_>>()
            .join("")
    }

    #[test]
    fn test_legend_uses_vim_keys_in_vim_mode() {
        let text = spans_to_text(&build_hotkey_spans(true, true));
        assert!(text.contains("j/k:Select"), "got: {}", text);
        assert!(text.contains("h/l:Split"), "got: {}", text);
        assert!(!text.contains("↑/↓"), "got: {}", text);
    }

    #[test]
    fn test_legend_uses_arrows_by_default() {
        let text = spans_to_text(&build_hotkey_spans(false, true));
        assert!(text.contains("↑/↓:Select"), "got: {}", text);
        assert!(text.contains("←/→:Split"), "got: {}", text);
    }

    #[test]
    fn test_legend_menu_toggle_label_follows_state() {
        let shown = spans_to_text(&build_hotkey_spans(false, true));
        let hidden = spans_to_text(&build_hotkey_spans(false, false));
        assert!(shown.contains("m:Hide Menu"));
        assert!(hidden.contains("m:Show Menu"));
    }

    #[test]
    fn test_legend_always_ends_with_quit() {
        let text = spans_to_text(&build_hotkey_spans(false, false));
        assert!(text.ends_with("q:Quit"), "got: {}", text);
    }

    #[test]
    fn test_narrow_terminal_wraps_legend() {
        let wide = calculate_legend_height(400, false, true);
        let narrow = calculate_legend_height(40, false, true);
        assert_eq!(wide, 3);
        assert!(narrow > wide);
    }
}
