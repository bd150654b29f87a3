use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Timestamps must be strictly increasing: point {index} ({current}) does not follow {previous}")]
    UnorderedTimestamps {
        index: usize,
        previous: String,
        current: String,
    },
}
