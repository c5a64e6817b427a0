use super::{Record, Recorder};

/// Keeps every written record in memory, in order.
///
/// Evaluation runs use it for per-step traces such as reward components.
#[derive(Default)]
pub struct BufferedRecorder {
    records: Vec<Record>,
}

impl BufferedRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in the order they were written.
    pub fn iter(&self) -> std::slice::Iter<Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Recorder for BufferedRecorder {
    fn write(&mut self, record: Record) {
        self.records.push(record);
    }
}
