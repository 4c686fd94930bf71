//! Telemetry packet preprocessing for CCSDS space packet links.
//!
//! tmprep sits between a telemetry link and the rest of a ground pipeline. For
//! every frame a link receives it:
//!
//! - **Validates framing**: frames shorter than the 6-byte primary header are dropped
//! - **Tracks continuity**: per-APID sequence counters, with jumps reported
//! - **Stamps generation time**: decoded from a secondary header time field
//!   with a configurable offset, width, binary fraction and epoch, or taken
//!   from the wall clock when no usable time field is present
//!
//! Anomalies never fail a call. They are reported as [`Diagnostic`] events to
//! an [`EventSink`] (by default, `tracing` warnings) and the only visible
//! effect on control flow is [`Disposition::Accept`] vs [`Disposition::Drop`].
//!
//! # Quick Start
//!
//! ```rust
//! use tmprep::{PacketPreprocessor, TmPacket, Timestamp};
//!
//! let mut preprocessor = PacketPreprocessor::from_yaml_str(
//!     "timeOffset: 6\ntimeLength: 6\nfractionLength: 2\ntimeEpoch: J2000",
//! )?;
//!
//! let frame = vec![0x08, 0x64, 0xC0, 0x01, 0x00, 0x05, 0, 0, 0, 1, 0, 0];
//! let mut packet = TmPacket::new(Timestamp::from_unix_millis(0), frame);
//!
//! if preprocessor.process(&mut packet).is_accept() {
//!     let gentime = packet.generation_time().expect("accepted packets are stamped");
//!     assert_eq!(gentime, tmprep::Epoch::J2000.to_timestamp(1000));
//! }
//! # Ok::<(), tmprep::PrepError>(())
//! ```

// Core types and error handling
pub mod config;
pub mod diagnostics;
mod error;
pub mod header;
mod packet;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod time;

// Packet processing
pub mod decoder;
pub mod preprocessor;
pub mod sequence;
pub mod stream;

// Core exports
pub use config::{PreprocessorConfig, TimeDecodeConfig};
pub use diagnostics::{Category, Diagnostic, EventSink, MemorySink, TracingSink};
pub use error::*;
pub use header::PrimaryHeader;
pub use packet::TmPacket;
pub use time::{Clock, Epoch, FixedClock, SystemClock, Timestamp};

// Processing exports
pub use decoder::{TimeDecoder, TimeField};
pub use preprocessor::{Disposition, PacketPreprocessor};
pub use sequence::{Continuity, SequenceTracker};
pub use stream::PreprocessExt;
