//! Codec capability negotiation
//!
//! - registry: supported formats and their decoder metadata
//! - probe: per-format native-support probes and decoder activation
//! - decoders: native, worker-hosted and dedicated decoder backends
//! - dispatch: path → format → decode strategy

pub mod decoders;
pub mod dispatch;
pub mod probe;
pub mod registry;

pub use decoders::{FrameDecoder, RawImage};
pub use dispatch::{AbortReason, Dispatch, Dispatcher};
pub use probe::{Capability, CapabilityTable};
pub use registry::{FormatEntry, Registry};
