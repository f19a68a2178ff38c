//! Decoder backends
//!
//! Every decode path ends in an `RgbaImage`:
//! - native: the `image` crate on a blocking thread
//! - worker: a long-lived decode thread fed over a channel
//! - dedicated: an external program that converts the file to PNG

use anyhow::{anyhow, bail, Context, Result};
use image::RgbaImage;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};

/// Raw RGBA8 pixels handed back by out-of-band decoders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RawImage {
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.into_raw(),
        }
    }

    /// Normalize into the common raster type
    pub fn into_rgba(self) -> Result<RgbaImage> {
        let (width, height) = (self.width, self.height);
        RgbaImage::from_raw(width, height, self.data).with_context(|| {
            format!("Decoder returned a buffer that does not hold {}x{} RGBA pixels", width, height)
        })
    }
}

pub type DecodeFuture<'a> = Pin<Box<dyn Future<Output = Result<RawImage>> + Send + 'a>>;

/// An out-of-band decoder: `load(bytes)` resolves to raw pixel data
pub trait FrameDecoder: Send + Sync {
    fn name(&self) -> &str;
    fn load(&self, bytes: Vec<u8>) -> DecodeFuture<'_>;
}

/// Decode with the `image` crate's built-in decoders
pub async fn decode_native(bytes: Vec<u8>) -> Result<RgbaImage> {
    let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .context("Decode task failed")?
        .context("Native decode failed")?;
    Ok(decoded.to_rgba8())
}

struct DecodeJob {
    bytes: Vec<u8>,
    reply: oneshot::Sender<Result<RawImage>>,
}

/// Decoder hosted on its own thread
///
/// The thread lives as long as this handle; dropping the handle closes the
/// job channel and lets the thread exit.
pub struct WorkerDecoder {
    name: String,
    jobs: mpsc::UnboundedSender<DecodeJob>,
}

impl WorkerDecoder {
    pub fn spawn(name: &str, format: image::ImageFormat) -> Result<Self> {
        let (jobs, mut rx) = mpsc::unbounded_channel::<DecodeJob>();

        std::thread::Builder::new()
            .name(format!("decode-{}", name))
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    let result = image::load_from_memory_with_format(&job.bytes, format)
                        .map(|decoded| RawImage::from_rgba(decoded.to_rgba8()))
                        .map_err(anyhow::Error::from);
                    let _ = job.reply.send(result);
                }
            })
            .with_context(|| format!("Failed to start decoder worker {}", name))?;

        log::info!("Decoder worker '{}' started for {:?}", name, format);

        Ok(Self {
            name: name.to_string(),
            jobs,
        })
    }
}

impl FrameDecoder for WorkerDecoder {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self, bytes: Vec<u8>) -> DecodeFuture<'_> {
        Box::pin(async move {
            let (reply, response) = oneshot::channel();
            self.jobs
                .send(DecodeJob { bytes, reply })
                .map_err(|_| anyhow!("Decoder worker '{}' has stopped", self.name))?;
            response.await.context("Decoder worker dropped the job")?
        })
    }
}

static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Decoder that shells out to a converter program
///
/// Invoked as `<program> -o <output.png> <input>`, which is the calling
/// convention of `bpgdec`.
pub struct ExternalDecoder {
    program: PathBuf,
    extension: String,
}

impl ExternalDecoder {
    /// Resolve the program (absolute/relative path or a name on `PATH`)
    pub fn locate(program: &str, extension: &str) -> Result<Self> {
        let program = find_program(program)
            .with_context(|| format!("Decoder program '{}' not found", program))?;
        log::info!("Dedicated decoder for {} at {}", extension, program.display());

        Ok(Self {
            program,
            extension: extension.to_string(),
        })
    }

    async fn run(&self, input: &Path, output: &Path) -> Result<RawImage> {
        let result = tokio::process::Command::new(&self.program)
            .arg("-o")
            .arg(output)
            .arg(input)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.program.display()))?;

        if !result.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.program.display(),
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            );
        }

        let png = tokio::fs::read(output).await.context("Decoder produced no output")?;
        let decoded = decode_native(png).await?;
        Ok(RawImage::from_rgba(decoded))
    }
}

impl FrameDecoder for ExternalDecoder {
    fn name(&self) -> &str {
        self.program.to_str().unwrap_or("external")
    }

    fn load(&self, bytes: Vec<u8>) -> DecodeFuture<'_> {
        Box::pin(async move {
            let id = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed).to_string();
            let input = crate::utils::get_scratch_path(&id, &self.extension);
            let output = crate::utils::get_scratch_path(&id, "png");

            tokio::fs::write(&input, &bytes).await.context("Failed to stage decoder input")?;
            let result = self.run(&input, &output).await;

            let _ = tokio::fs::remove_file(&input).await;
            let _ = tokio::fs::remove_file(&output).await;
            result
        })
    }
}

fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}
