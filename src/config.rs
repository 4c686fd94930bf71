//! Preprocessor configuration.
//!
//! The link configuration supplies up to four keys to the preprocessor:
//!
//! ```yaml
//! timeOffset: 6       # byte offset of the time field, negative disables decoding
//! timeLength: 6       # width of the time field in bytes, 0..=8
//! fractionLength: 2   # trailing bytes that are binary fraction of a second
//! timeEpoch: J2000    # TAI, UNIX, GPS or J2000 (any case)
//! ```
//!
//! Validation is fail-soft: [`PreprocessorConfig::validate`] always yields a
//! usable [`TimeDecodeConfig`], and reports every value it had to replace as a
//! [`Diagnostic`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Diagnostic, Epoch, Result};

/// Largest time field that fits the 64-bit raw accumulator.
pub const MAX_TIME_LENGTH: i64 = 8;

/// Raw preprocessor settings as supplied by the link configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct PreprocessorConfig {
    /// Byte offset of the time field in the frame; negative disables decoding.
    pub time_offset: i64,
    /// Width of the time field in bytes.
    pub time_length: i64,
    /// Number of trailing time field bytes holding the binary fraction.
    pub fraction_length: i64,
    /// Epoch name, matched case-insensitively.
    pub time_epoch: String,
}

impl Default for PreprocessorConfig {
    /// Time decoding off; when enabled, defaults to a 4+2 byte seconds+fraction UNIX time.
    fn default() -> Self {
        Self {
            time_offset: -1,
            time_length: 6,
            fraction_length: 2,
            time_epoch: Epoch::Unix.as_str().to_string(),
        }
    }
}

impl PreprocessorConfig {
    /// Parse configuration from YAML text. Missing keys take their defaults.
    ///
    /// Only structurally invalid YAML (or wrongly typed values) fails here;
    /// out-of-range values are handled later by [`validate`](Self::validate).
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Resolve into an immutable decode configuration plus any warnings.
    pub fn validate(&self) -> (TimeDecodeConfig, Vec<Diagnostic>) {
        let mut warnings = Vec::new();

        let mut offset = usize::try_from(self.time_offset).ok();
        let length = match u8::try_from(self.time_length) {
            Ok(length) if i64::from(length) <= MAX_TIME_LENGTH => length,
            _ => {
                warnings.push(Diagnostic::InvalidTimeLength { time_length: self.time_length });
                offset = None;
                0
            }
        };

        let epoch = self.time_epoch.parse::<Epoch>().unwrap_or_else(|_| {
            warnings.push(Diagnostic::InvalidTimeEpoch { name: self.time_epoch.clone() });
            Epoch::Unix
        });

        let time = TimeDecodeConfig {
            offset,
            length,
            scale: fraction_scale(self.fraction_length),
            epoch,
        };

        debug!(
            "Resolved time decoding: offset={:?}, length={}, scale={}, epoch={}",
            time.offset, time.length, time.scale, time.epoch
        );

        (time, warnings)
    }
}

/// Validated, immutable time decoding parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDecodeConfig {
    /// Byte offset of the time field; `None` when decoding is disabled.
    pub offset: Option<usize>,
    /// Field width in bytes, 0..=8.
    pub length: u8,
    /// Seconds per least significant unit, `256^-fractionLength`.
    pub scale: f64,
    pub epoch: Epoch,
}

impl TimeDecodeConfig {
    pub fn is_enabled(&self) -> bool {
        self.offset.is_some()
    }

    /// Exclusive end of the time field within a frame, when enabled.
    pub fn field_end(&self) -> Option<usize> {
        self.offset.map(|offset| offset.saturating_add(usize::from(self.length)))
    }
}

impl Default for TimeDecodeConfig {
    fn default() -> Self {
        PreprocessorConfig::default().validate().0
    }
}

/// Exact `256^-fraction_length`; negative lengths mean no fraction.
///
/// Underflows to 0.0 once the power leaves the `f64` range.
fn fraction_scale(fraction_length: i64) -> f64 {
    if fraction_length <= 0 {
        return 1.0;
    }
    i32::try_from(fraction_length)
        .ok()
        .and_then(|bytes| bytes.checked_mul(-8))
        .map_or(0.0, |exponent| 2f64.powi(exponent))
}
