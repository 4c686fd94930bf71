//! Error types for packet preprocessing.
//!
//! Packet processing itself never fails: every anomaly on the hot path degrades
//! to a [`Diagnostic`](crate::Diagnostic) and an accept/drop decision. The
//! errors here cover the few explicit, caller-driven operations:
//!
//! - **Configuration Errors**: YAML text that cannot be deserialized at all
//! - **Framing Errors**: explicit primary header parsing of a short buffer
//! - **Time Field Errors**: explicit time field reads outside the frame
//!
//! ```rust
//! use tmprep::PrepError;
//!
//! let error = PrepError::short_packet(4);
//! assert!(error.drops_packet());
//! assert!(error.to_string().contains("length: 4"));
//! ```

use thiserror::Error;

use crate::header::PRIMARY_HEADER_SIZE;

/// Result type alias for preprocessing operations.
pub type Result<T, E = PrepError> = std::result::Result<T, E>;

/// Main error type for preprocessing operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PrepError {
    #[error("Short packet received, length: {length}; minimum required length is {required} bytes")]
    ShortPacket { length: usize, required: usize },

    #[error(
        "Time field [{offset}, {offset}+{length}) lies outside frame of {frame_len} bytes"
    )]
    TimeFieldOutOfBounds { offset: usize, length: usize, frame_len: usize },

    #[error("Invalid preprocessor configuration: {context}")]
    Config {
        context: String,
        #[source]
        source: Option<serde_yaml_ng::Error>,
    },
}

impl PrepError {
    /// Returns whether a packet hitting this condition must be discarded.
    pub fn drops_packet(&self) -> bool {
        match self {
            PrepError::ShortPacket { .. } => true,
            PrepError::TimeFieldOutOfBounds { .. } => false,
            PrepError::Config { .. } => false,
        }
    }

    /// Helper constructor for frames shorter than the primary header.
    pub fn short_packet(length: usize) -> Self {
        PrepError::ShortPacket { length, required: PRIMARY_HEADER_SIZE }
    }

    /// Helper constructor for configuration errors without an underlying parser error.
    pub fn config(context: impl Into<String>) -> Self {
        PrepError::Config { context: context.into(), source: None }
    }
}

impl From<serde_yaml_ng::Error> for PrepError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        PrepError::Config { context: err.to_string(), source: Some(err) }
    }
}
