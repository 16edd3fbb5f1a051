use thiserror::Error;

/// Simplified `Result` using [`KnnError`](crate::KnnError) as error type
pub type Result<T> = std::result::Result<T, KnnError>;

/// Error variants from hyper-parameter construction or model estimation
#[derive(Error, Debug, Clone)]
pub enum KnnError {
    /// The number of neighbours must be positive
    #[error("invalid number of neighbours {0}")]
    InvalidK(usize),
    /// More neighbours requested than training samples available
    #[error("requested {k} neighbours from only {nsamples} training samples")]
    TooFewSamples { k: usize, nsamples: usize },
    /// Training data without feature columns
    #[error("training data has no feature columns")]
    EmptyFeatures,
    /// Invalid resampling descriptor
    #[error("invalid resampling: {0}")]
    InvalidResampling(String),
    /// Grid search over an empty candidate set
    #[error("grid search requires at least one candidate value")]
    EmptyGrid,
    #[error(transparent)]
    BaseCrate(#[from] vicino::Error),
}
