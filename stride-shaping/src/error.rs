use thiserror::Error;

/// Errors raised while shaping a reward.
#[derive(Error, Debug, PartialEq)]
pub enum ShapingError {
    /// The observation has no element at an index the layout refers to.
    #[error("Observation of length {len} has no element at index {index}")]
    ObsTooShort {
        /// Index the layout refers to.
        index: usize,
        /// Length of the observation.
        len: usize,
    },

    /// The action differs in length from the previous one.
    #[error("Action of length {got} does not match the previous action of length {expected}")]
    ActionLength {
        /// Length of the previous action.
        expected: usize,
        /// Length of the given action.
        got: usize,
    },
}
