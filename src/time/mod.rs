//! Time scale, epochs and clocks.
//!
//! Generation times are expressed as [`Timestamp`], a millisecond count on
//! the TAI scale. Decoded time fields are offsets from one of the four
//! supported [`Epoch`]s; packets without a usable time field are stamped from
//! a [`Clock`].
//!
//! ```rust
//! use tmprep::time::{Epoch, Timestamp};
//!
//! let gps_zero = Epoch::Gps.to_timestamp(0);
//! assert_eq!(gps_zero.to_unix_millis(), 315_964_800_000);
//! assert_eq!(Epoch::Unix.to_timestamp(1000), Timestamp::from_unix_millis(1000));
//! ```

mod clock;
mod epoch;
mod leap;
mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use epoch::{Epoch, UnknownEpoch};
pub use timestamp::Timestamp;
