use thiserror::Error;

/// Result type for answer aggregation and scoring
pub type Result<T> = std::result::Result<T, SpaError>;

/// Errors that can occur while scoring a question
#[derive(Error, Debug)]
pub enum SpaError {
    /// The expected share was read before `calc_mean_meta` ran on that answer.
    #[error("Mean meta is not set, run calc_mean_meta first")]
    MeanMetaNotComputed,

    #[error("No votes were cast")]
    NoVotes,

    #[error("Unknown voting method: {0}")]
    UnknownMethod(String),

    #[error("Error serializing results: {0}")]
    Serialization(#[from] serde_json::Error),
}
