//! Capability traits shared by every learner in the vicino ecosystem.
//!
//! A parameter set implementing [`Fit`] is a learner: applying it to a
//! dataset produces a fitted model. Models implement [`PredictInplace`] and
//! get the more convenient [`Predict`] sugar for free, both for plain
//! feature matrices and for whole datasets.

use ndarray::{ArrayBase, Data, Ix2};

use crate::dataset::{DatasetBase, Records};

/// Fit a model from a dataset
///
/// The obligatory error type makes hyperparameter or data problems explicit
/// at the call site; implementations propagate them instead of panicking.
pub trait Fit<R: Records, T, E: std::error::Error> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> std::result::Result<Self::Object, E>;
}

/// Predict into a caller-provided target container
pub trait PredictInplace<R: Records, T> {
    /// Predict something for the records `x` and store it in `y`
    fn predict_inplace(&self, x: &R, y: &mut T);

    /// Create a container of the correct shape to hold the prediction for `x`
    fn default_target(&self, x: &R) -> T;
}

/// Predict with an allocated target container
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}

impl<D, T, O> Predict<&ArrayBase<D, Ix2>, T> for O
where
    D: Data,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    fn predict(&self, records: &ArrayBase<D, Ix2>) -> T {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets);
        targets
    }
}

impl<R, T, S, O> Predict<&DatasetBase<R, T>, S> for O
where
    R: Records,
    O: PredictInplace<R, S>,
{
    fn predict(&self, dataset: &DatasetBase<R, T>) -> S {
        let mut targets = self.default_target(&dataset.records);
        self.predict_inplace(&dataset.records, &mut targets);
        targets
    }
}
