//! Error types in vicino
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("unknown feature column {0}")]
    MissingFeature(String),
    #[error("empty feature selection")]
    EmptySelection,
    #[error("prediction and ground truth differ in length ({0} != {1})")]
    LengthMismatch(usize, usize),
}
