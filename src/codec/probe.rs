//! Capability probing
//!
//! Every registered format gets one asynchronous probe that settles a single
//! [`Capability`]. Formats flagged native settle immediately. The others try
//! to decode their embedded sample with the built-in decoder; when that fails
//! and the format declares a decoder, the decoder backend is activated once.
//!
//! Consumers never read a half-probed table: [`CapabilityTable::settled`]
//! waits for the format's probe to finish.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

use super::decoders::{decode_native, ExternalDecoder, FrameDecoder, WorkerDecoder};
use super::registry::{FormatEntry, Registry};
use image::RgbaImage;

/// Settled decode capability of one format
#[derive(Clone)]
pub enum Capability {
    /// Built-in decoder handles it
    Native,
    /// Worker-hosted decoder
    Worker(Arc<dyn FrameDecoder>),
    /// Format-specific decoder object
    Dedicated(Arc<dyn FrameDecoder>),
    /// Nothing can decode it
    Unsupported,
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Native => "native",
            Capability::Worker(_) => "worker",
            Capability::Dedicated(_) => "dedicated",
            Capability::Unsupported => "unsupported",
        }
    }

    pub fn is_decodable(&self) -> bool {
        !matches!(self, Capability::Unsupported)
    }

    /// Run this decode strategy and normalize the result to RGBA8
    pub async fn decode(&self, bytes: Vec<u8>) -> Result<RgbaImage> {
        match self {
            Capability::Native => decode_native(bytes).await,
            Capability::Worker(decoder) | Capability::Dedicated(decoder) => decoder
                .load(bytes)
                .await
                .with_context(|| format!("Decoder '{}' failed", decoder.name()))?
                .into_rgba(),
            Capability::Unsupported => anyhow::bail!("No decoder available for this format"),
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Worker(decoder) => write!(f, "Capability::Worker({})", decoder.name()),
            Capability::Dedicated(decoder) => write!(f, "Capability::Dedicated({})", decoder.name()),
            Capability::Native => write!(f, "Capability::Native"),
            Capability::Unsupported => write!(f, "Capability::Unsupported"),
        }
    }
}

/// Decodes a probe sample with the built-in decoder
pub trait SampleDecoder: Send + Sync {
    /// Width of the decoded sample, or None if it did not decode
    fn decoded_width(&self, format: &str, sample: &[u8]) -> Option<u32>;
}

/// Activates a format's out-of-band decoder
pub trait DecoderLoader: Send + Sync {
    fn load(&self, entry: &FormatEntry) -> Result<Capability>;
}

/// Sample decoding through the `image` crate
pub struct ImageSampleDecoder;

impl SampleDecoder for ImageSampleDecoder {
    fn decoded_width(&self, format: &str, sample: &[u8]) -> Option<u32> {
        match image::load_from_memory(sample) {
            Ok(decoded) => Some(decoded.width()),
            Err(e) => {
                log::debug!("Probe sample for {} did not decode: {}", format, e);
                None
            }
        }
    }
}

/// Statically linked decoder backends
///
/// Worker formats get a decode thread for the matching `image` format;
/// dedicated formats resolve their converter program.
pub struct BuiltinDecoderLoader;

impl DecoderLoader for BuiltinDecoderLoader {
    fn load(&self, entry: &FormatEntry) -> Result<Capability> {
        let decoder = entry
            .decoder
            .as_deref()
            .with_context(|| format!("No decoder configured for {}", entry.name))?;

        if entry.worker {
            let format = image::ImageFormat::from_extension(&entry.name)
                .with_context(|| format!("No worker decoder can handle {}", entry.name))?;
            Ok(Capability::Worker(Arc::new(WorkerDecoder::spawn(decoder, format)?)))
        } else {
            Ok(Capability::Dedicated(Arc::new(ExternalDecoder::locate(
                decoder,
                &entry.name,
            )?)))
        }
    }
}

/// Probe a single format
pub async fn probe_format(
    entry: FormatEntry,
    samples: Arc<dyn SampleDecoder>,
    loader: Arc<dyn DecoderLoader>,
) -> Capability {
    if entry.native_supported {
        return Capability::Native;
    }

    let width = match entry.sample {
        Some(sample) => {
            let format = entry.name.clone();
            tokio::task::spawn_blocking(move || samples.decoded_width(&format, sample))
                .await
                .unwrap_or(None)
        }
        None => None,
    };

    // Native decoding wins over any configured decoder
    if width.is_some_and(|w| w >= 1) {
        log::info!("Probe: {} decodes natively", entry.name);
        return Capability::Native;
    }

    if entry.decoder.is_none() {
        log::info!("Probe: {} has no native support and no decoder", entry.name);
        return Capability::Unsupported;
    }

    match loader.load(&entry) {
        Ok(capability) => {
            log::info!("Probe: {} falls back to {:?}", entry.name, capability);
            capability
        }
        Err(e) => {
            log::warn!("Probe: decoder for {} unavailable: {:#}", entry.name, e);
            Capability::Unsupported
        }
    }
}

/// Per-format probe results, awaitable
#[derive(Clone)]
pub struct CapabilityTable {
    slots: HashMap<String, watch::Receiver<Option<Capability>>>,
}

impl CapabilityTable {
    /// Wait for a format's probe to settle
    ///
    /// Returns None for formats that are not registered.
    pub async fn settled(&self, format: &str) -> Option<Capability> {
        let mut rx = self.slots.get(&format.to_lowercase())?.clone();
        let settled = match rx.wait_for(Option::is_some).await {
            Ok(value) => value.clone(),
            // Probe task died without settling
            Err(_) => Some(Capability::Unsupported),
        };
        settled
    }

    /// Current value without waiting; None while the probe is running
    pub fn peek(&self, format: &str) -> Option<Capability> {
        self.slots
            .get(&format.to_lowercase())
            .and_then(|rx| rx.borrow().clone())
    }

    pub fn all_settled(&self) -> bool {
        self.slots.values().all(|rx| rx.borrow().is_some())
    }
}

/// Start one probe per registered format
pub fn spawn_probes(
    registry: &Registry,
    samples: Arc<dyn SampleDecoder>,
    loader: Arc<dyn DecoderLoader>,
) -> CapabilityTable {
    let mut slots = HashMap::new();

    for entry in registry.entries() {
        if entry.native_supported {
            let (_tx, rx) = watch::channel(Some(Capability::Native));
            slots.insert(entry.name.clone(), rx);
            continue;
        }

        let (tx, rx) = watch::channel(None);
        slots.insert(entry.name.clone(), rx);

        let entry = entry.clone();
        let samples = samples.clone();
        let loader = loader.clone();
        tokio::spawn(async move {
            let capability = probe_format(entry, samples, loader).await;
            let _ = tx.send(Some(capability));
        });
    }

    CapabilityTable { slots }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::registry::{BPG_SAMPLE, PIK_SAMPLE};

    #[test]
    fn test_image_sample_decoder_rejects_pik() {
        assert_eq!(ImageSampleDecoder.decoded_width("pik", PIK_SAMPLE), None);
    }

    #[test]
    fn test_image_sample_decoder_rejects_bpg() {
        assert_eq!(ImageSampleDecoder.decoded_width("bpg", BPG_SAMPLE), None);
    }

    #[test]
    fn test_builtin_loader_requires_decoder() {
        let entry = Registry::builtin().get("pik").unwrap().clone();
        assert!(BuiltinDecoderLoader.load(&entry).is_err());
    }

    #[test]
    fn test_capability_labels() {
        assert_eq!(Capability::Native.label(), "native");
        assert!(!Capability::Unsupported.is_decodable());
        assert_eq!(format!("{:?}", Capability::Unsupported), "Capability::Unsupported");
    }
}
