use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use splitview::model::{CatalogModel, CatalogState, MenuRow};
use splitview::utils;

/// Render the grouped catalog menu
///
/// Files shown on a side carry an `L`/`R` marker.
pub fn render_menu(
    f: &mut Frame,
    area: Rect,
    catalog: &CatalogModel,
    selection: Option<usize>,
    left_path: Option<&str>,
    right_path: Option<&str>,
) {
    let title = match catalog.state {
        CatalogState::Loaded => format!("Catalog ({})", catalog.catalog.file_count()),
        _ => "Catalog".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    match &catalog.state {
        CatalogState::Loading => {
            let text = Paragraph::new("Loading catalog...")
                .style(Style::default().fg(Color::Gray))
                .block(block);
            f.render_widget(text, area);
            return;
        }
        CatalogState::Failed(message) => {
            let text = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(text, area);
            return;
        }
        CatalogState::Loaded => {}
    }

    let items: Vec<ListItem> = catalog
        .rows
        .iter()
        .map(|row| match *row {
            MenuRow::Group(group) => {
                let label = catalog.catalog.groups[group].label.as_str();
                ListItem::new(Line::from(Span::styled(
                    label.to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )))
            }
            MenuRow::File { .. } => match catalog.catalog.row_record(*row) {
                Some(record) => {
                    let marker = match (
                        left_path == Some(record.path.as_str()),
                        right_path == Some(record.path.as_str()),
                    ) {
                        (true, true) => "LR",
                        (true, false) => "L ",
                        (false, true) => " R",
                        (false, false) => "  ",
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Yellow)),
                        Span::raw(" "),
                        Span::raw(record.name.clone()),
                        Span::styled(
                            format!(" {}", utils::format_bytes(record.size)),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                }
                None => ListItem::new(""),
            },
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    // Create temporary ListState for rendering
    let mut state = ListState::default();
    state.select(selection);
    f.render_stateful_widget(list, area, &mut state);
}
