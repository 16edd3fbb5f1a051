use std::marker::PhantomData;

use vicino::{Float, Label, ParamGuard};

use crate::distance::CommonDistance;
use crate::error::KnnError;
use crate::knn::algorithm::Knn;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// The set of hyperparameters that can be specified for fitting a
/// [k-nearest-neighbour classifier](Knn).
///
/// ### Example
///
/// ```rust
/// use vicino_knn::Knn;
/// use vicino::prelude::*;
/// use ndarray::array;
///
/// let records = array![[0., 0.], [1., 0.], [9., 9.], [10., 9.]];
/// let targets = array![0usize, 0, 1, 1];
/// let dataset = Dataset::new(records, targets);
///
/// // Initialize the parameters and fit the classifier
/// let model = Knn::params().k(2).fit(&dataset).unwrap();
///
/// let prediction = model.predict(&array![[0.5, 0.1]]);
/// assert_eq!(prediction[0], 0);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnnValidParams<F, L> {
    k: usize,
    distance: CommonDistance,

    marker: PhantomData<(F, L)>,
}

impl<F: Float, L> KnnValidParams<F, L> {
    /// Return the number of neighbours consulted per query
    pub fn k(&self) -> usize {
        self.k
    }

    /// Return the distance metric
    pub fn distance(&self) -> CommonDistance {
        self.distance
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnnParams<F, L>(KnnValidParams<F, L>);

impl<F: Float, L: Label> KnnParams<F, L> {
    pub fn new() -> Self {
        Self(KnnValidParams {
            k: 5,
            distance: CommonDistance::L2Dist,
            marker: PhantomData,
        })
    }

    /// Sets the number of neighbours consulted per query
    pub fn k(mut self, k: usize) -> Self {
        self.0.k = k;
        self
    }

    /// Sets the distance metric used to rank neighbours
    pub fn distance(mut self, distance: CommonDistance) -> Self {
        self.0.distance = distance;
        self
    }
}

impl<F: Float, L: Label> Default for KnnParams<F, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, L: Label> Knn<F, L> {
    /// Construct a new set of hyperparameters
    ///
    /// Defaults are provided if the optional parameters are not specified:
    /// * `k = 5`
    /// * `distance = CommonDistance::L2Dist`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> KnnParams<F, L> {
        KnnParams::new()
    }
}

impl<F: Float, L: Label> ParamGuard for KnnParams<F, L> {
    type Checked = KnnValidParams<F, L>;
    type Error = KnnError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.k == 0 {
            Err(KnnError::InvalidK(self.0.k))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}
