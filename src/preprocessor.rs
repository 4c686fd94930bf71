//! Packet preprocessor: framing check, sequence continuity and generation time.

use tracing::trace;

use crate::decoder::{TimeDecoder, TimeField};
use crate::{
    Clock, Diagnostic, EventSink, PreprocessorConfig, PrimaryHeader, Result, SequenceTracker,
    SystemClock, TimeDecodeConfig, TmPacket, TracingSink,
};

/// Whether the caller should forward or discard a processed packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Disposition {
    /// Packet stamped with generation time and sequence count.
    Accept,
    /// Packet is unusable and was left untouched.
    Drop,
}

impl Disposition {
    pub fn is_accept(self) -> bool {
        self == Disposition::Accept
    }
}

/// Stateful preprocessor for the packets of one link.
///
/// Holds the per-APID sequence state, so use one instance per link and feed
/// it packets in arrival order.
///
/// ```rust
/// use tmprep::{Disposition, FixedClock, MemorySink, PacketPreprocessor, PreprocessorConfig, Timestamp, TmPacket};
///
/// let config = PreprocessorConfig::from_yaml_str("timeOffset: 6\ntimeLength: 1\nfractionLength: 0")?;
/// let clock = FixedClock(Timestamp::from_unix_millis(0));
/// let mut preprocessor = PacketPreprocessor::with_parts(&config, MemorySink::new(), clock);
///
/// // APID 0 with secondary header, sequence 1, one time byte = 5 s.
/// let mut packet = TmPacket::new(clock.0, vec![0x08, 0x00, 0xC0, 0x01, 0x00, 0x00, 5]);
/// assert_eq!(preprocessor.process(&mut packet), Disposition::Accept);
/// assert_eq!(packet.generation_time(), Some(Timestamp::from_unix_millis(5000)));
/// assert_eq!(packet.sequence_count(), Some(0x0800_C001));
/// # Ok::<(), tmprep::PrepError>(())
/// ```
#[derive(Debug)]
pub struct PacketPreprocessor<S = TracingSink, C = SystemClock> {
    decoder: TimeDecoder,
    sequences: SequenceTracker,
    sink: S,
    clock: C,
}

impl PacketPreprocessor {
    /// Preprocessor logging diagnostics through `tracing` and using the host clock.
    pub fn new(config: &PreprocessorConfig) -> Self {
        Self::with_parts(config, TracingSink, SystemClock)
    }

    /// Parse YAML configuration and build a default preprocessor from it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(Self::new(&PreprocessorConfig::from_yaml_str(yaml)?))
    }
}

impl Default for PacketPreprocessor {
    fn default() -> Self {
        Self::new(&PreprocessorConfig::default())
    }
}

impl<S: EventSink, C: Clock> PacketPreprocessor<S, C> {
    /// Build with an explicit diagnostic sink and wall clock.
    ///
    /// Configuration problems are emitted to `sink` right away; construction
    /// itself always succeeds.
    pub fn with_parts(config: &PreprocessorConfig, mut sink: S, clock: C) -> Self {
        let (time, warnings) = config.validate();
        for warning in warnings {
            sink.emit(warning);
        }
        Self { decoder: TimeDecoder::new(time), sequences: SequenceTracker::new(), sink, clock }
    }

    /// Validate, track and stamp one packet.
    ///
    /// On [`Disposition::Drop`] the packet attributes are left as they were.
    pub fn process(&mut self, packet: &mut TmPacket) -> Disposition {
        let frame = packet.data();
        let header = match PrimaryHeader::parse(frame) {
            Ok(header) => header,
            Err(_) => {
                self.sink.emit(Diagnostic::ShortPacket { length: frame.len() });
                return Disposition::Drop;
            }
        };

        let apid = header.apid();
        let continuity = self.sequences.observe(apid, header.sequence_number());
        if let crate::Continuity::Jump { old_seq, new_seq } = continuity {
            self.sink.emit(Diagnostic::SequenceJump { apid, old_seq, new_seq });
        }

        let generation_time = match self.decoder.decode(frame, &header) {
            TimeField::Decoded(time) => time,
            TimeField::Absent => self.clock.now(),
            TimeField::Truncated { length, required } => {
                self.sink.emit(Diagnostic::TruncatedTimeField { length, required });
                self.clock.now()
            }
        };

        trace!(
            "Stamped packet: apid={}, seq={}, len={}, gentime={}",
            apid,
            header.sequence_number(),
            frame.len(),
            generation_time
        );

        packet.set_generation_time(generation_time);
        packet.set_sequence_count(header.word());
        Disposition::Accept
    }

    pub fn time_config(&self) -> &TimeDecodeConfig {
        self.decoder.config()
    }

    pub fn sequences(&self) -> &SequenceTracker {
        &self.sequences
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Consume the preprocessor, returning its diagnostic sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_frame, make_packet};
    use crate::{Category, Epoch, FixedClock, MemorySink, Timestamp};

    const NOW: Timestamp = Timestamp::from_millis(1_700_000_037_000);

    fn preprocessor(yaml: &str) -> PacketPreprocessor<MemorySink, FixedClock> {
        let config = PreprocessorConfig::from_yaml_str(yaml).unwrap();
        PacketPreprocessor::with_parts(&config, MemorySink::new(), FixedClock(NOW))
    }

    #[test]
    fn empty_config_stamps_wall_clock() {
        let mut pp = preprocessor("");
        let mut packet = make_packet(false, 0, 1, &[0]);

        assert_eq!(pp.process(&mut packet), Disposition::Accept);
        assert_eq!(packet.generation_time(), Some(NOW));
        assert!(pp.sink().events().is_empty());
    }

    #[test]
    fn default_preprocessor_uses_host_clock() {
        let mut pp = PacketPreprocessor::default();
        let mut packet = make_packet(false, 0, 1, &[0]);
        let before = crate::SystemClock.now();

        assert!(pp.process(&mut packet).is_accept());
        let stamped = packet.generation_time().unwrap();
        assert!(stamped >= before);
        assert!(stamped.millis_since(before) < 60_000);
    }

    #[test]
    fn short_frame_is_dropped_untouched() {
        let mut pp = preprocessor("timeOffset: 6");
        let mut packet = TmPacket::new(NOW, vec![0x08, 0x00, 0xC0, 0x01, 0x00]);

        assert_eq!(pp.process(&mut packet), Disposition::Drop);
        assert_eq!(packet.generation_time(), None);
        assert_eq!(packet.sequence_count(), None);
        assert_eq!(pp.sink().events(), &[Diagnostic::ShortPacket { length: 5 }]);
        assert_eq!(pp.sequences().channels(), 0);
    }

    #[test]
    fn minimal_frame_is_accepted() {
        let mut pp = preprocessor("timeOffset: 6");
        let mut packet = TmPacket::new(NOW, vec![0x00, 0x05, 0xC0, 0x01, 0x00, 0x00]);

        assert_eq!(pp.process(&mut packet), Disposition::Accept);
        assert_eq!(packet.generation_time(), Some(NOW));
        assert_eq!(packet.sequence_count(), Some(0x0005_C001));
    }

    #[test]
    fn truncated_time_field_warns_and_falls_back() {
        let mut pp = preprocessor("timeOffset: 6\ntimeLength: 6");
        let mut packet = make_packet(true, 3, 1, &[1, 2]);

        assert_eq!(pp.process(&mut packet), Disposition::Accept);
        assert_eq!(packet.generation_time(), Some(NOW));
        assert_eq!(
            pp.sink().events(),
            &[Diagnostic::TruncatedTimeField { length: 8, required: 12 }]
        );
    }

    #[test]
    fn sequence_jumps_are_reported_but_accepted() {
        let mut pp = preprocessor("");

        for seq in [1u16, 2, 5, 6] {
            let mut packet = make_packet(false, 42, seq, &[0]);
            assert!(pp.process(&mut packet).is_accept());
        }

        let jumps: Vec<_> = pp.sink().of_category(Category::SeqCountJump).cloned().collect();
        assert_eq!(jumps, vec![Diagnostic::SequenceJump { apid: 42, old_seq: 2, new_seq: 5 }]);
        assert_eq!(pp.sequences().last_sequence(42), Some(6));
    }

    #[test]
    fn config_warnings_reach_the_sink_at_construction() {
        let pp = preprocessor("timeOffset: 6\ntimeLength: 12\ntimeEpoch: lunar");

        assert!(!pp.time_config().is_enabled());
        assert_eq!(pp.time_config().epoch, Epoch::Unix);
        assert_eq!(pp.sink().of_category(Category::Config).count(), 2);
    }

    #[test]
    fn sequence_count_is_the_raw_header_word() {
        let mut pp = preprocessor("");
        let frame = make_frame(true, 0x7FF, 0x3FFF, &[9, 9]);
        let expected = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]);
        let mut packet = TmPacket::new(NOW, frame);

        assert!(pp.process(&mut packet).is_accept());
        assert_eq!(packet.sequence_count(), Some(expected));
    }

    #[test]
    fn into_sink_hands_back_collected_events() {
        let mut pp = preprocessor("");
        let mut packet = TmPacket::new(NOW, vec![0u8; 2]);
        let _ = pp.process(&mut packet);

        let sink = pp.into_sink();
        assert_eq!(sink.events().len(), 1);
    }
}
