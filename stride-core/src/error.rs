//! Errors of record access.
use thiserror::Error;

/// Errors in reading values from a [`Record`](crate::record::Record).
#[derive(Error, Debug, PartialEq)]
pub enum StrideError {
    /// The record has no value under the key.
    #[error("No value for key {0:?} in the record")]
    RecordKey(String),

    /// The value under the key is of another type.
    #[error("Value for key {key:?} is not of type {expected}")]
    RecordValueType {
        /// Key of the value.
        key: String,

        /// Name of the requested type.
        expected: &'static str,
    },
}
