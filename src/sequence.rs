//! Per-channel sequence continuity tracking.

use std::collections::HashMap;

use crate::header::{SEQUENCE_MASK, SEQUENCE_MODULUS};

/// Outcome of recording one sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuity {
    /// Sequence advanced by exactly one (modulo 16384).
    Contiguous,
    /// Anything else, including the first packet on a channel unless it carries 1.
    Jump { old_seq: u16, new_seq: u16 },
}

impl Continuity {
    pub fn is_jump(&self) -> bool {
        matches!(self, Continuity::Jump { .. })
    }
}

/// Last seen sequence number per APID.
///
/// Unseen channels behave as if their last sequence number were 0. Entries are
/// created on first sight and overwritten on every packet, jump or not.
#[derive(Debug, Clone, Default)]
pub struct SequenceTracker {
    last: HashMap<u16, u16>,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `seq` as the latest number on `apid` and report continuity.
    pub fn observe(&mut self, apid: u16, seq: u16) -> Continuity {
        let seq = seq & SEQUENCE_MASK as u16;
        let old_seq = std::mem::replace(self.last.entry(apid).or_insert(0), seq);

        let delta = (u32::from(seq) + SEQUENCE_MODULUS - u32::from(old_seq)) & SEQUENCE_MASK;
        if delta == 1 {
            Continuity::Contiguous
        } else {
            Continuity::Jump { old_seq, new_seq: seq }
        }
    }

    /// Last recorded sequence number on a channel, if it has been seen.
    pub fn last_sequence(&self, apid: u16) -> Option<u16> {
        self.last.get(&apid).copied()
    }

    /// Number of channels seen so far.
    pub fn channels(&self) -> usize {
        self.last.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_packet_with_one_is_contiguous() {
        let mut tracker = SequenceTracker::new();
        assert_eq!(tracker.observe(100, 1), Continuity::Contiguous);
        assert_eq!(tracker.last_sequence(100), Some(1));
    }

    #[test]
    fn first_packet_with_other_value_jumps_from_zero() {
        let mut tracker = SequenceTracker::new();
        assert_eq!(tracker.observe(7, 42), Continuity::Jump { old_seq: 0, new_seq: 42 });
        assert_eq!(tracker.observe(7, 43), Continuity::Contiguous);
    }

    #[test]
    fn first_packet_with_zero_is_a_jump() {
        let mut tracker = SequenceTracker::new();
        assert!(tracker.observe(3, 0).is_jump());
    }

    #[test]
    fn wraparound_is_contiguous() {
        let mut tracker = SequenceTracker::new();
        tracker.observe(5, 16383);
        assert_eq!(tracker.observe(5, 0), Continuity::Contiguous);
        assert_eq!(tracker.observe(5, 1), Continuity::Contiguous);
    }

    #[test]
    fn repeated_and_backwards_numbers_jump_and_still_overwrite() {
        let mut tracker = SequenceTracker::new();
        tracker.observe(9, 10);
        assert_eq!(tracker.observe(9, 10), Continuity::Jump { old_seq: 10, new_seq: 10 });
        assert_eq!(tracker.observe(9, 4), Continuity::Jump { old_seq: 10, new_seq: 4 });
        assert_eq!(tracker.last_sequence(9), Some(4));
        assert_eq!(tracker.observe(9, 5), Continuity::Contiguous);
    }

    #[test]
    fn channels_are_independent() {
        let mut tracker = SequenceTracker::new();
        tracker.observe(1, 1);
        tracker.observe(2, 100);
        assert_eq!(tracker.observe(1, 2), Continuity::Contiguous);
        assert_eq!(tracker.observe(2, 101), Continuity::Contiguous);
        assert_eq!(tracker.channels(), 2);
        assert_eq!(tracker.last_sequence(3), None);
    }

    proptest! {
        #[test]
        fn increments_never_jump(apid in 0u16..2048, start in 0u16..16384, steps in 1usize..200) {
            let mut tracker = SequenceTracker::new();
            tracker.observe(apid, start);
            let mut seq = start;
            for _ in 0..steps {
                seq = (seq + 1) & 0x3FFF;
                prop_assert_eq!(tracker.observe(apid, seq), Continuity::Contiguous);
            }
        }

        #[test]
        fn jump_iff_delta_is_not_one(old in 0u16..16384, new in 0u16..16384) {
            let mut tracker = SequenceTracker::new();
            tracker.observe(0, old);
            let expected_jump = (i32::from(new) - i32::from(old)).rem_euclid(16384) != 1;
            prop_assert_eq!(tracker.observe(0, new).is_jump(), expected_jump);
            prop_assert_eq!(tracker.last_sequence(0), Some(new));
        }
    }
}
