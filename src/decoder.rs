//! Secondary header time field decoding.
//!
//! The time field is an unsigned big-endian binary fixed-point number of
//! seconds: the last `fractionLength` bytes are the binary fraction. A common
//! layout is 4 bytes of whole seconds followed by 2 bytes of fraction
//! (`timeLength: 6`, `fractionLength: 2`), where one millisecond is 65.536
//! fractional units.
//!
//! Decoding only happens when it is enabled, the header flags a secondary
//! header, and the frame reaches the end of the configured field. Otherwise
//! the caller falls back to wall-clock time.

use tracing::trace;

use crate::{PrepError, PrimaryHeader, Result, TimeDecodeConfig, Timestamp};

/// Result of looking for a time field in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    /// Time field present and converted.
    Decoded(Timestamp),
    /// Decoding disabled or no secondary header; not an anomaly.
    Absent,
    /// Secondary header flagged but the frame stops short of the field.
    Truncated { length: usize, required: usize },
}

/// Converts raw time fields using a fixed [`TimeDecodeConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDecoder {
    config: TimeDecodeConfig,
}

impl TimeDecoder {
    pub fn new(config: TimeDecodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TimeDecodeConfig {
        &self.config
    }

    /// Look up and convert the time field of `frame`.
    pub fn decode(&self, frame: &[u8], header: &PrimaryHeader) -> TimeField {
        let Some(offset) = self.config.offset else {
            return TimeField::Absent;
        };
        if !header.has_secondary_header() {
            return TimeField::Absent;
        }

        let length = usize::from(self.config.length);
        let raw = match read_raw(frame, offset, length) {
            Ok(raw) => raw,
            Err(_) => {
                return TimeField::Truncated {
                    length: frame.len(),
                    required: offset.saturating_add(length),
                };
            }
        };

        let millis = self.raw_to_millis(raw);
        trace!("Decoded time field: raw={:#x}, millis={}, epoch={}", raw, millis, self.config.epoch);
        TimeField::Decoded(self.config.epoch.to_timestamp(millis))
    }

    /// Scale a raw field value to whole milliseconds, rounding half away from zero.
    pub fn raw_to_millis(&self, raw: u64) -> i64 {
        // `as` saturates for values beyond the i64 range.
        (raw as f64 * self.config.scale * 1000.0).round() as i64
    }
}

/// Read `length` bytes (at most 8) at `offset` as a big-endian unsigned integer.
pub fn read_raw(frame: &[u8], offset: usize, length: usize) -> Result<u64> {
    let out_of_bounds =
        || PrepError::TimeFieldOutOfBounds { offset, length, frame_len: frame.len() };

    if length > 8 {
        return Err(out_of_bounds());
    }
    let end = offset.checked_add(length).ok_or_else(out_of_bounds)?;
    let bytes = frame.get(offset..end).ok_or_else(out_of_bounds)?;

    Ok(bytes.iter().fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)))
}
