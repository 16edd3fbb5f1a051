//! `vicino` is a typed toolkit for k-nearest-neighbour classification of
//! small tabular datasets.
//!
//! It grew out of the observation that exploratory classification workflows
//! are usually held together by interpreter state: a dataset variable here, a
//! fitted model there, a resampling object defined three cells further down.
//! `vicino` replaces that with an explicit pipeline of immutable values: a
//! [`Dataset`] binds a feature matrix to a target column, a checked parameter
//! set is fitted into a model, and the model predicts labels which are scored
//! against the ground truth.
//!
//! The crate family is split the usual way:
//!
//! * `vicino` (this crate): dataset and task abstractions, the
//!   [`Fit`](traits::Fit)/[`Predict`](traits::Predict) capability traits,
//!   hyperparameter checking and classification metrics
//! * `vicino-knn`: the k-nearest-neighbour classifier with distance metrics,
//!   repeated k-fold resampling and grid-search tuning
//! * `vicino-datasets`: bundled sample datasets ready for tests and examples
//!
//! ```ignore
//! use vicino::prelude::*;
//! use vicino_knn::Knn;
//!
//! let (train, valid) = vicino_datasets::diabetes().split_with_ratio(0.8);
//!
//! let model = Knn::params().k(2).fit(&train)?;
//! let cm = model.predict(&valid).confusion_matrix(&valid)?;
//! println!("{:?}", cm);
//! ```

pub mod dataset;
pub mod error;
mod metrics_classification;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float, Label};
pub use error::{Error, Result};
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{ConfusionMatrix, ToConfusionMatrix};
}
