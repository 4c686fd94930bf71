//! Diagnostic events and the sinks that receive them.
//!
//! The preprocessor never fails a call: anything unusual about a packet or the
//! configuration becomes a [`Diagnostic`] handed to an [`EventSink`]. The
//! default [`TracingSink`] logs each one as a `tracing` warning; [`MemorySink`]
//! keeps them for inspection.

use tracing::warn;

use crate::header::PRIMARY_HEADER_SIZE;

/// Event category, matching the names downstream event consumers filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Invalid configuration value replaced by a default.
    Config,
    /// Frame too short for the header or the configured time field.
    ShortPacket,
    /// Per-channel sequence number did not advance by exactly one.
    SeqCountJump,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "CONFIG",
            Self::ShortPacket => "SHORT_PACKET",
            Self::SeqCountJump => "SEQ_COUNT_JUMP",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single warning raised while configuring or processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `timeLength` outside 0..=8; time decoding was disabled.
    InvalidTimeLength { time_length: i64 },
    /// `timeEpoch` did not name a supported epoch; UNIX was used.
    InvalidTimeEpoch { name: String },
    /// Frame shorter than the primary header; the packet was dropped.
    ShortPacket { length: usize },
    /// Secondary header flagged but the frame ends before the time field.
    TruncatedTimeField { length: usize, required: usize },
    /// Sequence discontinuity on one channel.
    SequenceJump { apid: u16, old_seq: u16, new_seq: u16 },
}

impl Diagnostic {
    pub fn category(&self) -> Category {
        match self {
            Diagnostic::InvalidTimeLength { .. } | Diagnostic::InvalidTimeEpoch { .. } => {
                Category::Config
            }
            Diagnostic::ShortPacket { .. } | Diagnostic::TruncatedTimeField { .. } => {
                Category::ShortPacket
            }
            Diagnostic::SequenceJump { .. } => Category::SeqCountJump,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::InvalidTimeLength { time_length } => write!(
                f,
                "Time length in secondary header must be between 0 and 8, timeLength: {}",
                time_length
            ),
            Diagnostic::InvalidTimeEpoch { name } => write!(f, "Time epoch is invalid: {}", name),
            Diagnostic::ShortPacket { length } => write!(
                f,
                "Short packet received, length: {}; minimum required length is {} bytes",
                length, PRIMARY_HEADER_SIZE
            ),
            Diagnostic::TruncatedTimeField { length, required } => write!(
                f,
                "Packet has secondary header but is too short for time field, length: {}; required: {}",
                length, required
            ),
            Diagnostic::SequenceJump { apid, old_seq, new_seq } => write!(
                f,
                "Sequence count jump for APID: {} old seq: {} newseq: {}",
                apid, old_seq, new_seq
            ),
        }
    }
}

/// Receiver of preprocessing diagnostics.
pub trait EventSink {
    fn emit(&mut self, event: Diagnostic);
}

/// Logs every diagnostic as a `tracing` warning with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: Diagnostic) {
        let category = event.category().as_str();
        match &event {
            Diagnostic::SequenceJump { apid, old_seq, new_seq } => {
                warn!(category, apid, old_seq, new_seq, "{}", event)
            }
            Diagnostic::ShortPacket { length } => warn!(category, length, "{}", event),
            Diagnostic::TruncatedTimeField { length, required } => {
                warn!(category, length, required, "{}", event)
            }
            Diagnostic::InvalidTimeLength { .. } | Diagnostic::InvalidTimeEpoch { .. } => {
                warn!(category, "{}", event)
            }
        }
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Vec<Diagnostic>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    /// Events of one category, in emission order.
    pub fn of_category(&self, category: Category) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter().filter(move |event| event.category() == category)
    }

    /// Take all collected events, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: Diagnostic) {
        self.events.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: Diagnostic) {
        (**self).emit(event)
    }
}
