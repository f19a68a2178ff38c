//! Snapshot export
//!
//! Writes the comparison exactly as composited on screen to a PNG in the
//! working directory.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::App;
use splitview::logic::raster;

/// `splitview-20240131-235959.png`
fn snapshot_file_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!("splitview-{}.png", now.format("%Y%m%d-%H%M%S"))
}

impl App {
    pub(crate) fn save_snapshot(&mut self) {
        match self.write_snapshot() {
            Ok(path) => {
                log::info!("Snapshot written to {}", path.display());
                self.model.show_toast(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::warn!("Snapshot failed: {:#}", e);
                self.model.show_toast(format!("Error: Snapshot failed: {}", e));
            }
        }
    }

    fn write_snapshot(&self) -> Result<PathBuf> {
        let view = &self.model.view;
        let left = view.left.slot.fitted();
        let right = view.right.slot.fitted();
        if left.is_none() && right.is_none() {
            anyhow::bail!("nothing loaded");
        }
        let (width, height) = view.view_px;
        if width == 0 || height == 0 {
            anyhow::bail!("view has no size");
        }

        let frame = raster::composite(left, right, view.view_px, view.split_x());
        let png = raster::encode_png(&frame).context("Failed to encode PNG")?;

        let path = PathBuf::from(snapshot_file_name(chrono::Local::now()));
        std::fs::write(&path, png).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_snapshot_file_name() {
        let when = chrono::Local
            .with_ymd_and_hms(2024, 1, 31, 23, 59, 5)
            .single()
            .expect("unambiguous local time");
        assert_eq!(snapshot_file_name(when), "splitview-20240131-235905.png");
    }
}
