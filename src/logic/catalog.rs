//! Catalog building and menu navigation
//!
//! Pure functions turning directory listings into the grouped catalog and
//! moving the menu cursor across it.

use crate::api::ListingEntry;
use crate::codec::registry::Registry;
use crate::model::catalog::{Catalog, CatalogGroup, ImageRecord, MenuRow};

/// Encoder logs sit next to the images and are never shown
pub const LOG_SUFFIX: &str = ".log";

pub fn is_log_file(name: &str) -> bool {
    name.ends_with(LOG_SUFFIX)
}

/// Build the catalog from `(folder, listing)` pairs
///
/// Group order follows the listing order; `*.log` files are dropped.
pub fn build_catalog(listings: Vec<(String, Vec<ListingEntry>)>, registry: &Registry) -> Catalog {
    let groups = listings
        .into_iter()
        .map(|(dir, entries)| {
            let files = entries
                .into_iter()
                .filter(|entry| !is_log_file(&entry.name))
                .map(|entry| ImageRecord {
                    path: format!("/output/{}/{}", dir, entry.name),
                    name: entry.name,
                    size: entry.size,
                    codec: dir.clone(),
                })
                .collect();

            CatalogGroup {
                label: registry.group_label(&dir),
                dir,
                files,
            }
        })
        .collect();

    Catalog::new(groups)
}

/// Index of the first file row, if any
pub fn first_file_row(rows: &[MenuRow]) -> Option<usize> {
    rows.iter().position(MenuRow::is_file)
}

/// Move the cursor by `delta` file rows, skipping group headers
///
/// Stops at the first/last file instead of wrapping.
///
/// # Examples
/// ```
/// use splitview::logic::catalog::move_file_cursor;
/// use splitview::model::catalog::MenuRow;
///
/// let rows = vec![
///     MenuRow::Group(0),
///     MenuRow::File { group: 0, file: 0 },
///     MenuRow::Group(1),
///     MenuRow::File { group: 1, file: 0 },
/// ];
/// assert_eq!(move_file_cursor(&rows, Some(1), 1), Some(3));
/// assert_eq!(move_file_cursor(&rows, Some(3), 1), Some(3));
/// assert_eq!(move_file_cursor(&rows, None, 1), Some(1));
/// ```
pub fn move_file_cursor(rows: &[MenuRow], current: Option<usize>, delta: isize) -> Option<usize> {
    let file_rows: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.is_file())
        .map(|(idx, _)| idx)
        .collect();

    if file_rows.is_empty() {
        return None;
    }

    let Some(current) = current else {
        return file_rows.first().copied();
    };

    // Position among file rows; a header cursor counts as the file after it
    let pos = file_rows
        .iter()
        .position(|&idx| idx >= current)
        .unwrap_or(file_rows.len() - 1);

    let target = (pos as isize + delta).clamp(0, file_rows.len() as isize - 1);
    Some(file_rows[target as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, entry_type: &str, size: u64) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            entry_type: entry_type.to_string(),
            size,
        }
    }

    #[test]
    fn test_is_log_file() {
        assert!(is_log_file("encode.log"));
        assert!(!is_log_file("photo.jpg"));
        assert!(!is_log_file("logo.png"));
    }

    #[test]
    fn test_build_catalog_drops_logs() {
        let registry = Registry::builtin();
        let catalog = build_catalog(
            vec![(
                "webp".to_string(),
                vec![
                    entry("photo.webp", "file", 1200),
                    entry("cwebp.log", "file", 80),
                ],
            )],
            &registry,
        );

        assert_eq!(catalog.groups.len(), 1);
        assert_eq!(catalog.groups[0].label, "webp - Google WebP");
        assert_eq!(catalog.groups[0].files.len(), 1);
        assert!(catalog.record("/output/webp/cwebp.log").is_none());

        let record = catalog.record("/output/webp/photo.webp").unwrap();
        assert_eq!(record.size, 1200);
        assert_eq!(record.codec, "webp");
    }

    #[test]
    fn test_build_catalog_keeps_listing_order() {
        let registry = Registry::builtin();
        let catalog = build_catalog(
            vec![
                ("png".to_string(), vec![entry("a.png", "file", 1)]),
                ("original".to_string(), vec![entry("a.jpg", "file", 1)]),
            ],
            &registry,
        );
        let dirs: Vec<&str> = catalog.groups.iter().map(|g| g.dir.as_str()).collect();
        assert_eq!(dirs, vec!["png", "original"]);
        assert_eq!(catalog.groups[1].label, "original");
    }

    #[test]
    fn test_move_file_cursor_skips_headers_backwards() {
        let rows = vec![
            MenuRow::Group(0),
            MenuRow::File { group: 0, file: 0 },
            MenuRow::Group(1),
            MenuRow::File { group: 1, file: 0 },
        ];
        assert_eq!(move_file_cursor(&rows, Some(3), -1), Some(1));
        assert_eq!(move_file_cursor(&rows, Some(1), -1), Some(1));
        assert_eq!(move_file_cursor(&rows, Some(1), 10), Some(3));
    }

    #[test]
    fn test_move_file_cursor_empty() {
        let rows = vec![MenuRow::Group(0)];
        assert_eq!(move_file_cursor(&rows, None, 1), None);
        assert_eq!(first_file_row(&rows), None);
    }
}
