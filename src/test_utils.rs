//! Test utilities for building CCSDS frames and packets
//!
//! These helpers are shared by unit tests, integration tests and benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use crate::{TmPacket, Timestamp};

/// Reception time stamped on packets built by [`make_packet`].
pub const TEST_RECEPTION_TIME: Timestamp = Timestamp::from_millis(0);

/// Build a CCSDS frame: 6-byte primary header followed by `user_data`.
///
/// The header carries version 0, telemetry type, unsegmented sequence flags
/// and a data length matching `user_data`. An empty `user_data` is replaced
/// by a single zero byte, since a packet always has at least one data byte.
pub fn make_frame(
    has_secondary_header: bool,
    apid: u16,
    seq_count: u16,
    user_data: &[u8],
) -> Vec<u8> {
    let user_data: &[u8] = if user_data.is_empty() { &[0] } else { user_data };

    let mut apid_flags = apid & 0x07FF;
    if has_secondary_header {
        apid_flags |= 0x0800;
    }
    let seq_flags = (seq_count & 0x3FFF) | (0x03 << 14);
    let packet_length = (user_data.len() - 1) as u16;

    let mut frame = Vec::with_capacity(6 + user_data.len());
    frame.extend_from_slice(&apid_flags.to_be_bytes());
    frame.extend_from_slice(&seq_flags.to_be_bytes());
    frame.extend_from_slice(&packet_length.to_be_bytes());
    frame.extend_from_slice(user_data);
    frame
}

/// Build a packet around [`make_frame`] with [`TEST_RECEPTION_TIME`].
pub fn make_packet(
    has_secondary_header: bool,
    apid: u16,
    seq_count: u16,
    user_data: &[u8],
) -> TmPacket {
    TmPacket::new(TEST_RECEPTION_TIME, make_frame(has_secondary_header, apid, seq_count, user_data))
}
