use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::codec::registry::FormatOverride;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Server hosting the `/output/` listing
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub vim_mode: bool,
    #[serde(default = "default_image_protocol")]
    pub image_protocol: String,
    #[serde(default = "default_show_menu")]
    pub show_menu: bool,
    /// Per-format registry overrides, keyed by format tag
    #[serde(default)]
    pub formats: HashMap<String, FormatOverride>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_image_protocol() -> String {
    "auto".to_string()
}

fn default_show_menu() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            vim_mode: false,
            image_protocol: default_image_protocol(),
            show_menu: default_show_menu(),
            formats: HashMap::new(),
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty file is a valid, all-defaults config
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("Invalid config file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&text)
    }
}
