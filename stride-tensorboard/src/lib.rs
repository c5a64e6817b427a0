//! Writes training records in TensorBoard's format.
use log::warn;
use std::path::Path;
use stride_core::record::{AggregateRecorder, Record, RecordStorage, RecordValue, Recorder};
use tensorboard_rs::summary_writer::SummaryWriter;

/// Writes records to TFRecord files.
///
/// Records given to [`AggregateRecorder::store`] are aggregated with
/// [`RecordStorage`] and written at the step given to
/// [`AggregateRecorder::flush`]. Records given to [`Recorder::write`] are
/// written immediately at the step found under the step key, `env_steps` by
/// default.
pub struct TensorboardRecorder {
    writer: SummaryWriter,
    storage: RecordStorage,
    step_key: String,
}

impl TensorboardRecorder {
    /// Constructs a [`TensorboardRecorder`].
    ///
    /// TFRecord files will be stored in `logdir`.
    pub fn new<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            writer: SummaryWriter::new(logdir),
            storage: RecordStorage::new(),
            step_key: "env_steps".to_string(),
        }
    }

    /// Sets the key of the step in records given to [`Recorder::write`].
    pub fn step_key(mut self, v: impl Into<String>) -> Self {
        self.step_key = v.into();
        self
    }

    fn write_at(&mut self, record: &Record, step: usize) {
        for (k, v) in record.iter() {
            if *k == self.step_key {
                continue;
            }
            // Only scalars are supported.
            if let RecordValue::Scalar(v) = v {
                self.writer.add_scalar(k, *v, step);
            }
        }
        self.writer.flush();
    }
}

impl Recorder for TensorboardRecorder {
    /// Writes a [`Record`] at the step under the step key.
    ///
    /// A record without the step key is dropped with a warning.
    fn write(&mut self, record: Record) {
        match record.get_scalar(&self.step_key) {
            Ok(step) => self.write_at(&record, step as usize),
            Err(e) => warn!("Record dropped: {}", e),
        }
    }
}

impl AggregateRecorder for TensorboardRecorder {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        if self.storage.is_empty() {
            return;
        }
        let record = self.storage.aggregate();
        self.write_at(&record, step.max(0) as usize);
    }
}
