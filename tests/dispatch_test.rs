// Tests for path-to-strategy dispatch over the built-in format table

use anyhow::{bail, Result};
use std::sync::Arc;

use splitview::codec::dispatch::{resolve_format, AbortReason};
use splitview::codec::probe::{spawn_probes, DecoderLoader, SampleDecoder};
use splitview::codec::{Capability, Dispatch, Dispatcher, FormatEntry, Registry};

/// No sample ever decodes in the terminal
struct NoSamples;

impl SampleDecoder for NoSamples {
    fn decoded_width(&self, _format: &str, _sample: &[u8]) -> Option<u32> {
        None
    }
}

/// Refuses every decoder
struct NoDecoders;

impl DecoderLoader for NoDecoders {
    fn load(&self, entry: &FormatEntry) -> Result<Capability> {
        bail!("{} is not available", entry.name)
    }
}

fn dispatcher() -> Dispatcher {
    let registry = Arc::new(Registry::builtin());
    let table = spawn_probes(&registry, Arc::new(NoSamples), Arc::new(NoDecoders));
    Dispatcher::new(registry, table)
}

#[tokio::test]
async fn test_original_folder_dispatches_by_extension() {
    let dispatcher = dispatcher();

    match dispatcher.dispatch("/output/original/photo.jpg").await {
        Dispatch::Decode { format, strategy } => {
            assert_eq!(format, "jpg");
            assert!(matches!(strategy, Capability::Native));
        }
        other => panic!("expected Decode, got {:?}", other),
    }
}

#[tokio::test]
async fn test_codec_folder_names_the_format() {
    let dispatcher = dispatcher();

    assert_eq!(dispatcher.check("/output/webp/photo.webp"), Ok("webp".to_string()));
    assert_eq!(dispatcher.check("/output/guetzli/photo.jpg"), Ok("guetzli".to_string()));
    assert!(matches!(
        dispatcher.dispatch("/output/guetzli/photo.jpg").await,
        Dispatch::Decode { strategy: Capability::Native, .. }
    ));
}

#[tokio::test]
async fn test_mixed_case_folder_dispatches_lowercase_format() {
    let dispatcher = dispatcher();

    match dispatcher.dispatch("/output/Guetzli/photo.jpg").await {
        Dispatch::Decode { format, .. } => assert_eq!(format, "guetzli"),
        other => panic!("expected Decode, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_format_aborts() {
    let dispatcher = dispatcher();

    assert_eq!(
        dispatcher.check("/output/original/photo.heic"),
        Err(AbortReason::UnknownFormat("heic".to_string()))
    );
    match dispatcher.dispatch("/output/heic/photo.heic").await {
        Dispatch::Abort(reason) => {
            assert_eq!(reason, AbortReason::UnknownFormat("heic".to_string()));
            assert_eq!(reason.message(), "Unsupported type heic chosen");
        }
        other => panic!("expected Abort, got {:?}", other),
    }
}

#[tokio::test]
async fn test_format_without_any_decoder_aborts_once_settled() {
    let dispatcher = dispatcher();

    // pik has no decoder; webp's decoder refuses to activate
    assert!(matches!(
        dispatcher.dispatch("/output/pik/photo.pik").await,
        Dispatch::Abort(AbortReason::Undecodable(ref format)) if format == "pik"
    ));
    assert!(matches!(
        dispatcher.dispatch("/output/webp/photo.webp").await,
        Dispatch::Abort(AbortReason::Undecodable(_))
    ));
}

#[tokio::test]
async fn test_malformed_paths_are_rejected() {
    assert_eq!(resolve_format("photo.jpg"), None);
    assert_eq!(resolve_format("/output//photo.jpg"), None);
    assert_eq!(resolve_format("/output/original/no-extension"), None);

    let dispatcher = dispatcher();
    assert!(matches!(dispatcher.check("photo.jpg"), Err(AbortReason::BadPath(_))));
    assert!(matches!(dispatcher.dispatch("photo.jpg").await, Dispatch::Abort(AbortReason::BadPath(_))));
}
