//! Capability registry
//!
//! Static table of the image formats the viewer knows about, with whether the
//! built-in decoder handles them out of the box and which out-of-band decoder
//! to fall back to when it does not.

use serde::Deserialize;
use std::collections::HashMap;

/// 1x1 lossy WebP
pub const WEBP_SAMPLE: &[u8] = &[
    0x52, 0x49, 0x46, 0x46, 0x24, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50, 0x56, 0x50, 0x38, 0x20,
    0x18, 0x00, 0x00, 0x00, 0x30, 0x01, 0x00, 0x9d, 0x01, 0x2a, 0x01, 0x00, 0x01, 0x00, 0x02, 0x00,
    0x26, 0x25, 0xa4, 0x00, 0x03, 0x70, 0x00, 0xfe, 0xfd, 0x36, 0x68, 0x00,
];

/// 1x1 BPG
pub const BPG_SAMPLE: &[u8] = &[
    0x42, 0x50, 0x47, 0xfb, 0x20, 0x00, 0x20, 0x20, 0x00, 0x03, 0x92, 0x47, 0x40, 0x44, 0x01, 0xc1,
    0x71, 0x81, 0x12, 0x00, 0x00, 0x01, 0x26, 0x01, 0xaf, 0xe0, 0xe5, 0x0a, 0xbf, 0xfb, 0xa6, 0x96,
];

/// 1x1 pik
pub const PIK_SAMPLE: &[u8] = &[
    0x50, 0xcc, 0x4b, 0x0a, 0x00, 0x00, 0x00, 0x00, 0x12, 0x80, 0x00, 0x02, 0x00, 0x10, 0x01, 0x01,
    0x00, 0x19, 0x98, 0x3f, 0x0f, 0x28, 0x00, 0x64, 0x00, 0xc4, 0x81, 0xf4, 0xdf, 0x66, 0x9b, 0x0b,
    0x06, 0x00, 0x00, 0x00, 0x76, 0x0c, 0x30, 0x10, 0x00, 0xb4, 0x00, 0x00, 0x23,
];

/// Metadata for one supported format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEntry {
    /// Format tag, matches codec folder names and file extensions
    pub name: String,
    pub description: String,
    /// Decodable by the built-in decoder without probing
    pub native_supported: bool,
    /// Out-of-band decoder: a worker name, or the program a dedicated decoder runs
    pub decoder: Option<String>,
    /// Minimal (>= 1 pixel wide) image used to probe native support
    pub sample: Option<&'static [u8]>,
    /// Whether the decoder is hosted on a worker thread
    pub worker: bool,
}

impl FormatEntry {
    fn native(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            native_supported: true,
            decoder: None,
            sample: None,
            worker: false,
        }
    }
}

/// Partial entry read from the config file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FormatOverride {
    pub description: Option<String>,
    pub native_supported: Option<bool>,
    pub decoder: Option<String>,
    pub worker: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<FormatEntry>,
}

impl Registry {
    /// The formats shipped with the viewer
    pub fn builtin() -> Self {
        Self::from_entries(vec![
            FormatEntry::native("jpg", "JPEG"),
            FormatEntry::native("png", "Portable Network Graphics"),
            FormatEntry::native("guetzli", "Google Guetzli JPEG compressor"),
            FormatEntry {
                name: "webp".to_string(),
                description: "Google WebP".to_string(),
                native_supported: false,
                decoder: Some("webp-worker".to_string()),
                sample: Some(WEBP_SAMPLE),
                worker: true,
            },
            FormatEntry {
                name: "bpg".to_string(),
                description: "Fabrice Bellard's BPG".to_string(),
                native_supported: false,
                decoder: Some("bpgdec".to_string()),
                sample: Some(BPG_SAMPLE),
                worker: false,
            },
            FormatEntry {
                name: "pik".to_string(),
                description: "Google pik".to_string(),
                native_supported: false,
                decoder: None,
                sample: Some(PIK_SAMPLE),
                worker: false,
            },
        ])
    }

    pub fn from_entries(entries: Vec<FormatEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, tag: &str) -> Option<&FormatEntry> {
        let tag = tag.to_lowercase();
        self.entries.iter().find(|entry| entry.name == tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    pub fn entries(&self) -> &[FormatEntry] {
        &self.entries
    }

    /// Menu group label for a codec folder: `"webp - Google WebP"`, or the
    /// bare folder name when it is not a registered format
    pub fn group_label(&self, dir: &str) -> String {
        match self.get(dir) {
            Some(entry) => format!("{} - {}", dir, entry.description),
            None => dir.to_string(),
        }
    }

    /// Merge config overrides; tags not in the table become new entries
    ///
    /// Overrides are applied in tag order so the result does not depend on
    /// map iteration order.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, FormatOverride>) {
        let mut tags: Vec<&String> = overrides.keys().collect();
        tags.sort();

        for tag in tags {
            let patch = &overrides[tag];
            let name = tag.to_lowercase();

            let index = match self.entries.iter().position(|e| e.name == name) {
                Some(index) => index,
                None => {
                    self.entries.push(FormatEntry {
                        name: name.clone(),
                        description: name.clone(),
                        native_supported: false,
                        decoder: None,
                        sample: None,
                        worker: false,
                    });
                    self.entries.len() - 1
                }
            };

            let entry = &mut self.entries[index];
            if let Some(description) = &patch.description {
                entry.description = description.clone();
            }
            if let Some(native) = patch.native_supported {
                entry.native_supported = native;
            }
            if let Some(decoder) = &patch.decoder {
                entry.decoder = Some(decoder.clone());
            }
            if let Some(worker) = patch.worker {
                entry.worker = worker;
            }
            log::debug!("Format override applied: {:?}", entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_native_formats() {
        let registry = Registry::builtin();
        for tag in ["jpg", "png", "guetzli"] {
            let entry = registry.get(tag).unwrap();
            assert!(entry.native_supported, "{} should be native", tag);
            assert!(entry.decoder.is_none());
        }
    }

    #[test]
    fn test_builtin_probed_formats_carry_samples() {
        let registry = Registry::builtin();
        for tag in ["webp", "bpg", "pik"] {
            let entry = registry.get(tag).unwrap();
            assert!(!entry.native_supported);
            assert!(entry.sample.is_some_and(|s| !s.is_empty()));
        }
        assert!(registry.get("webp").unwrap().worker);
        assert_eq!(registry.get("bpg").unwrap().decoder.as_deref(), Some("bpgdec"));
        assert!(registry.get("pik").unwrap().decoder.is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = Registry::builtin();
        assert!(registry.contains("JPG"));
        assert!(!registry.contains("original"));
    }

    #[test]
    fn test_group_label() {
        let registry = Registry::builtin();
        assert_eq!(registry.group_label("webp"), "webp - Google WebP");
        assert_eq!(registry.group_label("original"), "original");
    }

    #[test]
    fn test_apply_overrides_patches_and_adds() {
        let mut registry = Registry::builtin();
        let mut overrides = HashMap::new();
        overrides.insert(
            "bpg".to_string(),
            FormatOverride {
                decoder: Some("/opt/bpg/bin/bpgdec".to_string()),
                ..Default::default()
            },
        );
        overrides.insert(
            "JXL".to_string(),
            FormatOverride {
                description: Some("JPEG XL".to_string()),
                decoder: Some("djxl".to_string()),
                ..Default::default()
            },
        );

        registry.apply_overrides(&overrides);

        let bpg = registry.get("bpg").unwrap();
        assert_eq!(bpg.decoder.as_deref(), Some("/opt/bpg/bin/bpgdec"));
        assert_eq!(bpg.description, "Fabrice Bellard's BPG");

        let jxl = registry.get("jxl").unwrap();
        assert_eq!(jxl.description, "JPEG XL");
        assert!(!jxl.native_supported);
        assert!(jxl.sample.is_none());
    }
}
