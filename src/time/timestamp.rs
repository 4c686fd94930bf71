//! Absolute time representation

use serde::{Deserialize, Serialize};

use super::leap;

/// Absolute instant on the TAI time scale.
///
/// Counts milliseconds since 1970-01-01T00:00:00 TAI, leap seconds included,
/// so differences between two timestamps are true elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Build from raw milliseconds on the crate's TAI scale.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Raw milliseconds on the crate's TAI scale.
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Convert UTC milliseconds since the Unix epoch.
    pub fn from_unix_millis(unix_millis: i64) -> Self {
        Self(unix_millis.saturating_add(leap::tai_minus_utc_at_utc(unix_millis)))
    }

    /// Convert back to UTC milliseconds since the Unix epoch.
    ///
    /// An instant inside an inserted leap second maps onto the following
    /// second's UTC label; Unix time has no representation for 23:59:60.
    pub fn to_unix_millis(self) -> i64 {
        self.0.saturating_sub(leap::tai_minus_utc_at_tai(self.0))
    }

    /// Milliseconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    pub fn millis_since(self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms TAI", self.0)
    }
}
