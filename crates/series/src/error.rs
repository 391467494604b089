use primitives::TimestampMs;
use thiserror::Error;

/// Reasons a raw batch is rejected before it touches the store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("malformed batch: date {next} at index {index} does not follow {prev}")]
    MalformedBatch {
        index: usize,
        prev: TimestampMs,
        next: TimestampMs,
    },

    #[error("malformed batch: non-finite {field} at index {index}")]
    NonFiniteValue { index: usize, field: &'static str },
}
