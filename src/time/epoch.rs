//! Reference epochs for packet time fields

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Timestamp;

/// Milliseconds from 1958-01-01T00:00:00 TAI to the crate's TAI zero.
const TAI_EPOCH_OFFSET_MS: i64 = 378_691_200_000;

/// Crate timestamp of 1980-01-06T00:00:00 UTC (TAI-UTC was 19 s).
const GPS_EPOCH_MS: i64 = 315_964_819_000;

/// Crate timestamp of 2000-01-01T11:58:55.816 UTC, i.e. 12:00:00 TT.
const J2000_EPOCH_MS: i64 = 946_727_967_816;

/// Epoch a decoded time field counts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Epoch {
    /// International Atomic Time, counted from 1958-01-01.
    Tai,
    /// UTC milliseconds since 1970-01-01, leap seconds excluded.
    #[default]
    Unix,
    /// GPS time, counted from 1980-01-06 without leap seconds.
    Gps,
    /// Terrestrial time counted from J2000.0.
    J2000,
}

impl Epoch {
    pub const ALL: [Epoch; 4] = [Epoch::Tai, Epoch::Unix, Epoch::Gps, Epoch::J2000];

    /// Convert a millisecond offset from this epoch to an absolute timestamp.
    pub fn to_timestamp(self, millis: i64) -> Timestamp {
        match self {
            Epoch::Tai => Timestamp::from_millis(millis.saturating_sub(TAI_EPOCH_OFFSET_MS)),
            Epoch::Unix => Timestamp::from_unix_millis(millis),
            Epoch::Gps => Timestamp::from_millis(millis.saturating_add(GPS_EPOCH_MS)),
            Epoch::J2000 => Timestamp::from_millis(millis.saturating_add(J2000_EPOCH_MS)),
        }
    }

    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Epoch::Tai => "TAI",
            Epoch::Unix => "UNIX",
            Epoch::Gps => "GPS",
            Epoch::J2000 => "J2000",
        }
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a name matches none of the supported epochs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time epoch: {0}")]
pub struct UnknownEpoch(pub String);

impl FromStr for Epoch {
    type Err = UnknownEpoch;

    /// Case-insensitive match against the canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Epoch::ALL
            .into_iter()
            .find(|epoch| epoch.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEpoch(s.to_string()))
    }
}

impl TryFrom<String> for Epoch {
    type Error = UnknownEpoch;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("unix".parse::<Epoch>(), Ok(Epoch::Unix));
        assert_eq!("Gps".parse::<Epoch>(), Ok(Epoch::Gps));
        assert_eq!("j2000".parse::<Epoch>(), Ok(Epoch::J2000));
        assert_eq!("TAI".parse::<Epoch>(), Ok(Epoch::Tai));
        assert_eq!("GMT".parse::<Epoch>(), Err(UnknownEpoch("GMT".to_string())));
        assert!(" unix".parse::<Epoch>().is_err());
    }

    #[test]
    fn deserializes_case_insensitively() {
        assert_eq!(serde_yaml_ng::from_str::<Epoch>("unix").unwrap(), Epoch::Unix);
        assert_eq!(serde_yaml_ng::from_str::<Epoch>("J2000").unwrap(), Epoch::J2000);
        assert_eq!(serde_yaml_ng::from_str::<Epoch>("gps").unwrap(), Epoch::Gps);
        assert!(serde_yaml_ng::from_str::<Epoch>("MARS").is_err());

        let yaml = serde_yaml_ng::to_string(&Epoch::Tai).unwrap();
        assert_eq!(yaml.trim(), "TAI");
        assert_eq!(serde_yaml_ng::from_str::<Epoch>(&yaml).unwrap(), Epoch::Tai);
    }

    #[test]
    fn epochs_land_on_their_reference_instants() {
        // GPS zero is 1980-01-06 UTC.
        assert_eq!(Epoch::Gps.to_timestamp(0).to_unix_millis(), 315_964_800_000);
        // J2000 is 2000-01-01T11:58:55.816 UTC.
        assert_eq!(Epoch::J2000.to_timestamp(0).to_unix_millis(), 946_727_935_816);
        // TAI 1958 + 12 years of days is the crate's zero.
        assert_eq!(Epoch::Tai.to_timestamp(TAI_EPOCH_OFFSET_MS).as_millis(), 0);
        assert_eq!(Epoch::Unix.to_timestamp(0), Timestamp::from_unix_millis(0));
    }

    #[test]
    fn gps_runs_nineteen_seconds_behind_tai() {
        let now_unix = 1_700_000_000_000;
        let ts = Timestamp::from_unix_millis(now_unix);
        let gps_millis = ts.as_millis() - GPS_EPOCH_MS;
        let tai_millis = ts.as_millis() + TAI_EPOCH_OFFSET_MS;
        assert_eq!(Epoch::Gps.to_timestamp(gps_millis), ts);
        assert_eq!(Epoch::Tai.to_timestamp(tai_millis), ts);
    }

    proptest! {
        #[test]
        fn display_round_trips_through_parse(index in 0usize..4) {
            let epoch = Epoch::ALL[index];
            prop_assert_eq!(epoch.to_string().to_lowercase().parse::<Epoch>(), Ok(epoch));
        }

        #[test]
        fn conversion_is_monotonic(index in 0usize..4, a in 0i64..1 << 50, b in 0i64..1 << 50) {
            let epoch = Epoch::ALL[index];
            prop_assert_eq!(a.cmp(&b), epoch.to_timestamp(a).cmp(&epoch.to_timestamp(b)));
        }
    }
}
