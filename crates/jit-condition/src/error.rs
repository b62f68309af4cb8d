use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConditionError {
    #[error("malformed timestamp in temporary-access window: {0}")]
    MalformedTimestamp(String),

    #[error("temporary-access window end ({end}) precedes start ({start})")]
    InvertedWindow { start: String, end: String },

    #[error("topic exceeds {max} characters: {actual}")]
    TopicTooLong { max: usize, actual: usize },
}
