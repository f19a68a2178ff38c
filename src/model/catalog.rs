//! Catalog Model
//!
//! Images available for comparison, grouped by the codec folder they came from.

use std::collections::HashMap;

/// One image in the catalog; immutable once loaded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRecord {
    /// Absolute catalog path, `/output/<codec>/<file>`
    pub path: String,
    pub name: String,
    /// Size in bytes as reported by the listing
    pub size: u64,
    /// Codec folder the file lives in
    pub codec: String,
}

/// A codec folder and the images in it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogGroup {
    pub dir: String,
    pub label: String,
    pub files: Vec<ImageRecord>,
}

/// One row of the selection menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuRow {
    Group(usize),
    File { group: usize, file: usize },
}

impl MenuRow {
    pub fn is_file(&self) -> bool {
        matches!(self, MenuRow::File { .. })
    }
}

/// Loading state of the catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct Catalog {
    pub groups: Vec<CatalogGroup>,
    records: HashMap<String, ImageRecord>,
}

impl Catalog {
    pub fn new(groups: Vec<CatalogGroup>) -> Self {
        let records = groups
            .iter()
            .flat_map(|group| group.files.iter())
            .map(|record| (record.path.clone(), record.clone()))
            .collect();
        Self { groups, records }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn record(&self, path: &str) -> Option<&ImageRecord> {
        self.records.get(path)
    }

    pub fn file_count(&self) -> usize {
        self.records.len()
    }

    /// Flattened menu: each group header followed by its files
    pub fn menu_rows(&self) -> Vec<MenuRow> {
        let mut rows = Vec::new();
        for (group_idx, group) in self.groups.iter().enumerate() {
            rows.push(MenuRow::Group(group_idx));
            rows.extend((0..group.files.len()).map(|file| MenuRow::File {
                group: group_idx,
                file,
            }));
        }
        rows
    }

    pub fn row_record(&self, row: MenuRow) -> Option<&ImageRecord> {
        match row {
            MenuRow::Group(_) => None,
            MenuRow::File { group, file } => self.groups.get(group)?.files.get(file),
        }
    }
}

/// Catalog sub-model
#[derive(Clone, Debug)]
pub struct CatalogModel {
    pub state: CatalogState,
    pub catalog: Catalog,
    /// Cached `catalog.menu_rows()`
    pub rows: Vec<MenuRow>,
}

impl CatalogModel {
    pub fn new() -> Self {
        Self {
            state: CatalogState::Loading,
            catalog: Catalog::empty(),
            rows: Vec::new(),
        }
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.rows = catalog.menu_rows();
        self.catalog = catalog;
        self.state = CatalogState::Loaded;
    }
}

impl Default for CatalogModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(codec: &str, name: &str) -> ImageRecord {
        ImageRecord {
            path: format!("/output/{}/{}", codec, name),
            name: name.to_string(),
            size: 100,
            codec: codec.to_string(),
        }
    }

    #[test]
    fn test_menu_rows_interleave_headers() {
        let catalog = Catalog::new(vec![
            CatalogGroup {
                dir: "jpg".to_string(),
                label: "jpg - JPEG".to_string(),
                files: vec![record("jpg", "a.jpg"), record("jpg", "b.jpg")],
            },
            CatalogGroup {
                dir: "empty".to_string(),
                label: "empty".to_string(),
                files: vec![],
            },
        ]);

        assert_eq!(
            catalog.menu_rows(),
            vec![
                MenuRow::Group(0),
                MenuRow::File { group: 0, file: 0 },
                MenuRow::File { group: 0, file: 1 },
                MenuRow::Group(1),
            ]
        );
        assert_eq!(catalog.file_count(), 2);
        assert_eq!(
            catalog.row_record(MenuRow::File { group: 0, file: 1 }).map(|r| r.name.as_str()),
            Some("b.jpg")
        );
        assert!(catalog.record("/output/jpg/a.jpg").is_some());
    }
}
