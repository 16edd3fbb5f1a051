//!
//! # k-nearest-neighbour classification
//! `vicino-knn` provides a pure Rust implementation of the k-nearest-
//! neighbour classifier together with the resampling and tuning machinery
//! usually wrapped around it.
//!
//! # The big picture
//!
//! `vicino-knn` is a crate in the `vicino` ecosystem, a typed toolkit for
//! classification workflows over small tabular datasets.
//!
//! A kNN model memorises the training task and classifies a query point by
//! letting its k closest training points vote on the label. The crate covers
//! the surrounding workflow as well: [`RepeatedKFold`] estimates the
//! generalisation error of a parameter set by repeated k-fold
//! cross-validation and [`KnnGridSearch`] selects the best neighbour count
//! from a candidate grid.
//!
//! # Current state
//!
//! `vicino-knn` currently provides [`Knn`](Knn) fitting with exact
//! brute-force neighbour search under L1, L2 and Chebyshev distances.
//!

pub mod distance;
mod error;
mod knn;

pub use error::{KnnError, Result};
pub use knn::*;
