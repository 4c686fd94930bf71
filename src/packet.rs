//! Telemetry packet record

use std::sync::Arc;

use crate::Timestamp;

/// One telemetry frame as received from a link, plus the attributes the
/// preprocessor stamps onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmPacket {
    /// Frame bytes (zero-copy via Arc)
    data: Arc<[u8]>,

    /// When the link received the frame
    reception_time: Timestamp,

    /// When the source produced the frame; `None` until preprocessed
    generation_time: Option<Timestamp>,

    /// Raw first header word (APID and sequence bits); `None` until preprocessed
    sequence_count: Option<u32>,
}

impl TmPacket {
    pub fn new(reception_time: Timestamp, data: impl Into<Arc<[u8]>>) -> Self {
        Self { data: data.into(), reception_time, generation_time: None, sequence_count: None }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Shared handle to the frame bytes.
    pub fn data_arc(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    pub fn reception_time(&self) -> Timestamp {
        self.reception_time
    }

    pub fn generation_time(&self) -> Option<Timestamp> {
        self.generation_time
    }

    pub fn set_generation_time(&mut self, time: Timestamp) {
        self.generation_time = Some(time);
    }

    pub fn sequence_count(&self) -> Option<u32> {
        self.sequence_count
    }

    pub fn set_sequence_count(&mut self, sequence_count: u32) {
        self.sequence_count = Some(sequence_count);
    }

    /// Whether both preprocessing attributes have been assigned.
    pub fn is_stamped(&self) -> bool {
        self.generation_time.is_some() && self.sequence_count.is_some()
    }
}
