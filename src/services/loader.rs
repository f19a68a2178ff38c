//! Image loader service
//!
//! One background task per selection: wait for the format's capability,
//! fetch the bytes, decode, fit to the view, and hand the result back to the UI
//! loop over a channel. Results carry the request id so the UI can drop
//! stale ones.

use anyhow::{Context, Result};
use image::RgbaImage;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

use splitview::api::CatalogClient;
use splitview::codec::{AbortReason, Capability, Dispatch, Dispatcher};
use splitview::logic;
use splitview::model::LoadedImage;
use splitview::Side;

/// A selection to load into one side
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub side: Side,
    pub request_id: u64,
    pub path: String,
    /// View size the result should be fitted to
    pub view_px: (u32, u32),
}

/// Results reported back to the UI loop
#[derive(Debug)]
pub enum LoadUpdate {
    Loaded {
        side: Side,
        request_id: u64,
        image: LoadedImage,
    },
    Failed {
        side: Side,
        request_id: u64,
        path: String,
        error: anyhow::Error,
    },
    /// Dispatch declined the path; what the side shows is left alone
    Aborted {
        side: Side,
        request_id: u64,
        reason: AbortReason,
    },
    /// A shown image was fitted to a new view size
    Refitted {
        side: Side,
        path: String,
        fitted: Arc<RgbaImage>,
        fitted_for: (u32, u32),
    },
}

/// Spawn the load pipeline for one request
pub fn spawn_load(
    client: CatalogClient,
    dispatcher: Dispatcher,
    request: LoadRequest,
    tx: mpsc::UnboundedSender<LoadUpdate>,
) {
    tokio::spawn(async move {
        let started = Instant::now();
        log::debug!(
            "Load #{} ({}): {}",
            request.request_id,
            request.side.as_str(),
            request.path
        );

        let update = run_load(&client, &dispatcher, &request).await;
        match &update {
            LoadUpdate::Loaded { image, .. } => log::info!(
                "Load #{} done in {:.2}s: {} via {}",
                request.request_id,
                started.elapsed().as_secs_f32(),
                image.path,
                image.strategy
            ),
            LoadUpdate::Failed { error, .. } => {
                log::warn!("Load #{} failed: {:#}", request.request_id, error)
            }
            _ => {}
        }

        let _ = tx.send(update);
    });
}

async fn run_load(client: &CatalogClient, dispatcher: &Dispatcher, request: &LoadRequest) -> LoadUpdate {
    let LoadRequest {
        side,
        request_id,
        ref path,
        view_px,
    } = *request;

    // Only a decodable format is worth downloading
    let (format, strategy) = match dispatcher.dispatch(path).await {
        Dispatch::Decode { format, strategy } => (format, strategy),
        Dispatch::Abort(reason) => {
            return LoadUpdate::Aborted {
                side,
                request_id,
                reason,
            }
        }
    };

    let bytes = client.fetch_image(path).await;

    let result = match bytes {
        Ok(bytes) => decode_and_fit(&strategy, bytes, view_px).await,
        Err(error) => Err(error),
    };

    match result {
        Ok((source, fitted)) => LoadUpdate::Loaded {
            side,
            request_id,
            image: LoadedImage {
                path: path.clone(),
                format,
                strategy: strategy.label(),
                source: Arc::new(source),
                fitted: Arc::new(fitted),
                fitted_for: view_px,
            },
        },
        Err(error) => LoadUpdate::Failed {
            side,
            request_id,
            path: path.clone(),
            error,
        },
    }
}

async fn decode_and_fit(
    strategy: &Capability,
    bytes: Vec<u8>,
    view_px: (u32, u32),
) -> Result<(RgbaImage, RgbaImage)> {
    let source = strategy.decode(bytes).await?;
    log::debug!(
        "Decoded {}x{} with {:?}",
        source.width(),
        source.height(),
        strategy
    );

    tokio::task::spawn_blocking(move || {
        let fitted = fit_to_view(&source, view_px);
        (source, fitted)
    })
    .await
    .context("Resize task failed")
}

/// Fit a decoded image to the view; an unknown view size keeps it as is
fn fit_to_view(source: &RgbaImage, view_px: (u32, u32)) -> RgbaImage {
    if view_px.0 == 0 || view_px.1 == 0 {
        return source.clone();
    }
    let resize_start = Instant::now();
    let fitted = logic::raster::resize_to_fit(source, view_px);
    log::debug!(
        "Fit {}x{} -> {}x{} took {:.2}s",
        source.width(),
        source.height(),
        fitted.width(),
        fitted.height(),
        resize_start.elapsed().as_secs_f32()
    );
    fitted
}

/// Re-fit an already decoded image after the view changed size
pub fn spawn_refit(
    side: Side,
    path: String,
    source: Arc<RgbaImage>,
    view_px: (u32, u32),
    tx: mpsc::UnboundedSender<LoadUpdate>,
) {
    tokio::spawn(async move {
        let fitted = tokio::task::spawn_blocking(move || fit_to_view(&source, view_px)).await;
        match fitted {
            Ok(fitted) => {
                let _ = tx.send(LoadUpdate::Refitted {
                    side,
                    path,
                    fitted: Arc::new(fitted),
                    fitted_for: view_px,
                });
            }
            Err(e) => log::warn!("Refit of {} failed: {}", path, e),
        }
    });
}
