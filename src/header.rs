//! CCSDS space packet primary header access.
//!
//! Every frame handed to the preprocessor starts with the 6-byte CCSDS
//! primary header:
//!
//! ```text
//! ┌─────────┬──────┬─────────┬──────────┬───────────┬──────────┬─────────────┐
//! │ Version │ Type │ Sec Hdr │ APID     │ Seq Flags │ Seq Cnt  │ Data Length │
//! │ 3 bits  │ 1 b  │ 1 bit   │ 11 bits  │ 2 bits    │ 14 bits  │ 16 bits     │
//! └─────────┴──────┴─────────┴──────────┴───────────┴──────────┴─────────────┘
//!   byte 0 ────────────── byte 1   byte 2 ──────────── byte 3   bytes 4-5
//! ```
//!
//! The first four bytes, read as one big-endian word, carry everything the
//! preprocessor needs: channel identifier (APID), sequence number and the
//! secondary header flag. That word is also what ends up in the packet's
//! sequence count attribute.

use crate::{PrepError, Result};

/// Size of the CCSDS primary header. Frames shorter than this are dropped.
pub const PRIMARY_HEADER_SIZE: usize = 6;

/// Mask for the 11-bit APID once the header word is shifted right by 16.
pub const APID_MASK: u32 = 0x07FF;

/// Mask for the 14-bit in-channel sequence number.
pub const SEQUENCE_MASK: u32 = 0x3FFF;

/// Secondary header flag (bit 11 of the first header half-word).
pub const SECONDARY_HEADER_FLAG: u32 = 0x0800_0000;

/// Modulus of the sequence counter space.
pub const SEQUENCE_MODULUS: u32 = SEQUENCE_MASK + 1;

/// Parsed view over the fixed part of a CCSDS primary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryHeader {
    word: u32,
    data_length: u16,
}

impl PrimaryHeader {
    /// Parse the primary header from the start of a frame.
    ///
    /// Fails with [`PrepError::ShortPacket`] when the frame cannot hold a full
    /// primary header.
    pub fn parse(frame: &[u8]) -> Result<Self> {
        validate_length(frame)?;

        let word = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]);
        let data_length = u16::from_be_bytes([frame[4], frame[5]]);

        Ok(Self { word, data_length })
    }

    /// Raw big-endian value of the first four header bytes.
    pub fn word(&self) -> u32 {
        self.word
    }

    /// Channel identifier (APID), 0..=2047.
    pub fn apid(&self) -> u16 {
        ((self.word >> 16) & APID_MASK) as u16
    }

    /// In-channel sequence number, 0..=16383.
    pub fn sequence_number(&self) -> u16 {
        (self.word & SEQUENCE_MASK) as u16
    }

    pub fn has_secondary_header(&self) -> bool {
        self.word & SECONDARY_HEADER_FLAG != 0
    }

    /// Packet version number (3 bits, 0 for CCSDS version 1).
    pub fn version(&self) -> u8 {
        (self.word >> 29) as u8
    }

    /// Packet type bit: telemetry is 0, telecommand is 1.
    pub fn is_telecommand(&self) -> bool {
        self.word & 0x1000_0000 != 0
    }

    /// Sequence flags (2 bits, 0b11 for an unsegmented packet).
    pub fn sequence_flags(&self) -> u8 {
        ((self.word >> 14) & 0x03) as u8
    }

    /// Packet data length field (number of data bytes minus one).
    pub fn data_length(&self) -> u16 {
        self.data_length
    }
}

/// Check that a frame is long enough to carry a primary header.
pub fn validate_length(frame: &[u8]) -> Result<()> {
    if frame.len() < PRIMARY_HEADER_SIZE {
        return Err(PrepError::short_packet(frame.len()));
    }
    Ok(())
}
