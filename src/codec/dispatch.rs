//! Format dispatch
//!
//! Catalog paths look like `/output/<codec-folder>/<filename>`. The codec
//! folder names the format, except for the `original` folder whose files are
//! identified by extension.

use std::path::Path;
use std::sync::Arc;

use super::probe::{Capability, CapabilityTable};
use super::registry::Registry;

/// Folder holding the unencoded source images
pub const ORIGINAL_FOLDER: &str = "original";

/// Resolve the format tag of a catalog path
///
/// # Examples
/// ```
/// use splitview::codec::dispatch::resolve_format;
///
/// assert_eq!(resolve_format("/output/webp/photo.webp").as_deref(), Some("webp"));
/// assert_eq!(resolve_format("/output/original/photo.JPG").as_deref(), Some("jpg"));
/// assert_eq!(resolve_format("/output/WebP/photo.webp").as_deref(), Some("webp"));
/// assert_eq!(resolve_format("/output/original/README"), None);
/// ```
pub fn resolve_format(path: &str) -> Option<String> {
    let folder = path.split('/').nth(2).filter(|s| !s.is_empty())?;

    if folder != ORIGINAL_FOLDER {
        return Some(folder.to_lowercase());
    }

    let file_name = path.rsplit('/').next()?;
    let extension = Path::new(file_name).extension()?.to_str()?;
    Some(extension.to_lowercase())
}

/// Outcome of dispatching a path
#[derive(Debug, Clone)]
pub enum Dispatch {
    /// Decode with this strategy
    Decode { format: String, strategy: Capability },
    /// Nothing to do; the reason has already been logged
    Abort(AbortReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// Path does not have the `/output/<folder>/<file>` shape
    BadPath(String),
    /// Format is not in the registry
    UnknownFormat(String),
    /// Registered, but neither native nor any decoder can handle it
    Undecodable(String),
}

impl AbortReason {
    pub fn message(&self) -> String {
        match self {
            AbortReason::BadPath(path) => format!("Not a catalog path: {}", path),
            AbortReason::UnknownFormat(format) => format!("Unsupported type {} chosen", format),
            AbortReason::Undecodable(format) => format!("No way to decode {} images", format),
        }
    }
}

/// Picks the decode strategy for a selected path
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    capabilities: CapabilityTable,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, capabilities: CapabilityTable) -> Self {
        Self {
            registry,
            capabilities,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }

    /// Synchronous part of dispatch: format resolution and registry lookup
    ///
    /// Lets callers reject unknown formats before touching any state.
    pub fn check(&self, path: &str) -> Result<String, AbortReason> {
        let format = resolve_format(path).ok_or_else(|| AbortReason::BadPath(path.to_string()))?;
        if !self.registry.contains(&format) {
            return Err(AbortReason::UnknownFormat(format));
        }
        Ok(format)
    }

    /// Resolve a path to a decode strategy, waiting for its probe to settle
    pub async fn dispatch(&self, path: &str) -> Dispatch {
        let format = match self.check(path) {
            Ok(format) => format,
            Err(reason) => {
                log::warn!("{}", reason.message());
                return Dispatch::Abort(reason);
            }
        };

        match self.capabilities.settled(&format).await {
            Some(Capability::Unsupported) | None => {
                log::warn!("Don't know what to do with format {}", format);
                Dispatch::Abort(AbortReason::Undecodable(format))
            }
            Some(strategy) => {
                log::debug!("Dispatch {} as {} via {:?}", path, format, strategy);
                Dispatch::Decode { format, strategy }
            }
        }
    }
}
