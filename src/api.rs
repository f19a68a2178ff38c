use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

/// Root of the directory-listing endpoint
pub const OUTPUT_ROOT: &str = "/output/";

/// One entry of a directory listing
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: String, // "directory" or "file"
    #[serde(default)]
    pub size: u64,
}

impl ListingEntry {
    pub fn is_directory(&self) -> bool {
        self.entry_type == "directory"
    }
}

/// Listing path for a codec folder, e.g. `/output/webp/`
pub fn folder_listing_path(dir: &str) -> String {
    format!("{}{}/", OUTPUT_ROOT, urlencoding::encode(dir))
}

/// Percent-encode every segment of an absolute catalog path
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    client: Client,
}

impl CatalogClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and parse a JSON directory listing
    ///
    /// Non-2xx responses are errors. There is no retry.
    async fn fetch_dir(&self, path: &str) -> Result<Vec<ListingEntry>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch listing {}", path))?
            .error_for_status()?;

        let entries: Vec<ListingEntry> = response.json().await?;
        log::debug!("Listing {} returned {} entries", path, entries.len());

        Ok(entries)
    }

    /// Names of all top-level codec folders
    pub async fn get_folders(&self) -> Result<Vec<String>> {
        let entries = self.fetch_dir(OUTPUT_ROOT).await?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.is_directory())
            .map(|entry| entry.name)
            .collect())
    }

    /// Fetch every folder's listing concurrently
    ///
    /// Listings come back paired with their folder name, in the order the
    /// folders were given. Any failed listing fails the whole call.
    pub async fn get_files(&self, dirs: Vec<String>) -> Result<Vec<(String, Vec<ListingEntry>)>> {
        let handles: Vec<_> = dirs
            .into_iter()
            .map(|dir| {
                let client = self.clone();
                tokio::spawn(async move {
                    let entries = client.fetch_dir(&folder_listing_path(&dir)).await;
                    (dir, entries)
                })
            })
            .collect();

        let mut listings = Vec::with_capacity(handles.len());
        for handle in handles {
            let (dir, entries) = handle.await.context("Listing task failed")?;
            listings.push((dir, entries?));
        }

        Ok(listings)
    }

    /// Download the raw bytes of one catalog image
    pub async fn fetch_image(&self, path: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, encode_path(path));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch image {}", path))?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_entry_defaults_size() {
        let entries: Vec<ListingEntry> =
            serde_json::from_str(r#"[{"name":"webp","type":"directory","mtime":"x"}]"#).unwrap();
        assert_eq!(entries[0].size, 0);
        assert!(entries[0].is_directory());
    }

    #[test]
    fn test_folder_listing_path_encodes_name() {
        assert_eq!(folder_listing_path("webp"), "/output/webp/");
        assert_eq!(folder_listing_path("my codec"), "/output/my%20codec/");
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("/output/jpg/a b.jpg"), "/output/jpg/a%20b.jpg");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = CatalogClient::new("http://localhost:8080/".to_string());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
