//! Types and traits for recording training metrics.
//!
//! * [`Record`] - key-value container of [`RecordValue`]s
//! * [`Recorder`] - writes a record immediately
//! * [`AggregateRecorder`] - stores records and writes aggregated values on flush
//! * [`RecordStorage`] - aggregation of stored records (min, max, mean, median)
//! * [`BufferedRecorder`] - keeps records in memory, e.g. per-step traces of an evaluation run
//! * [`LogRecorder`] - writes aggregated records through the [`log`] facade
//!
//! ```rust
//! use stride_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("raw_reward", RecordValue::Scalar(-0.12));
//! record.insert("shaped_reward", RecordValue::Scalar(0.43));
//! assert_eq!(record.get_scalar("shaped_reward").unwrap(), 0.43);
//! ```
mod base;
mod buffered_recorder;
mod log_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
