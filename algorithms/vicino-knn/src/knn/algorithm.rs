//! k-nearest-neighbour classification
//!
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Data, Ix2};
use noisy_float::{checkers::FiniteChecker, NoisyFloat};

use vicino::dataset::AsTargets;
use vicino::traits::{Fit, PredictInplace};
use vicino::{DatasetBase, Float, Label};

use crate::distance::Distance;
use crate::error::{KnnError, Result};
use crate::knn::hyperparams::KnnValidParams;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A neighbour candidate, ordered by its reduced distance to the query point
struct Neighbour<'a, F: Float, L> {
    rdist: Reverse<NoisyFloat<F, FiniteChecker>>,
    label: &'a L,
}

impl<'a, F: Float, L> Neighbour<'a, F, L> {
    fn new(rdist: F, label: &'a L) -> Self {
        Neighbour {
            rdist: Reverse(NoisyFloat::new(rdist)),
            label,
        }
    }
}

impl<'a, F: Float, L> PartialEq for Neighbour<'a, F, L> {
    fn eq(&self, other: &Self) -> bool {
        self.rdist.eq(&other.rdist)
    }
}

impl<'a, F: Float, L> Eq for Neighbour<'a, F, L> {}

impl<'a, F: Float, L> PartialOrd for Neighbour<'a, F, L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, F: Float, L> Ord for Neighbour<'a, F, L> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rdist.cmp(&other.rdist)
    }
}

/// Fitted k-nearest-neighbour classifier.
///
/// See [KnnParams](crate::KnnParams) for more information on the
/// hyper-parameters.
///
/// kNN is a lazy learner: training stores the task's records and labels, and
/// every query scans them for the k closest training points, which then vote
/// on the predicted label with their majority. Vote ties are broken in
/// favour of the label whose neighbours lie closer to the query.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Knn<F: Float, L: Label> {
    params: KnnValidParams<F, L>,
    records: Array2<F>,
    targets: Array1<L>,
}

impl<F, L, D, T> Fit<ArrayBase<D, Ix2>, T, KnnError> for KnnValidParams<F, L>
where
    F: Float,
    L: Label,
    D: Data<Elem = F>,
    T: AsTargets<Elem = L>,
{
    type Object = Knn<F, L>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        if dataset.nfeatures() == 0 {
            return Err(KnnError::EmptyFeatures);
        }
        if self.k() > dataset.nsamples() {
            return Err(KnnError::TooFewSamples {
                k: self.k(),
                nsamples: dataset.nsamples(),
            });
        }

        Ok(Knn {
            params: self.clone(),
            records: dataset.records().to_owned(),
            targets: dataset.as_targets().to_owned(),
        })
    }
}

impl<F: Float, L: Label, D> PredictInplace<ArrayBase<D, Ix2>, Array1<L>> for Knn<F, L>
where
    D: Data<Elem = F>,
{
    /// Predict a label per query row
    ///
    /// # Panics
    ///
    /// When the query rows do not have the feature count the model was
    /// trained with, or when `y` does not have one slot per query row.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<L>) {
        assert_eq!(
            x.ncols(),
            self.records.ncols(),
            "query points must have the same number of features as the training data"
        );
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );

        for (row, target) in x.rows().into_iter().zip(y.iter_mut()) {
            *target = self.classify(row);
        }
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<L> {
        Array1::default(x.nrows())
    }
}

impl<F: Float, L: Label> Knn<F, L> {
    /// Return the number of neighbours consulted per query
    pub fn k(&self) -> usize {
        self.params.k()
    }

    /// Return the number of stored training samples
    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    fn classify(&self, point: ArrayView1<F>) -> L {
        let metric = self.params.distance();

        let mut heap = BinaryHeap::with_capacity(self.records.nrows());
        for (record, label) in self.records.rows().into_iter().zip(self.targets.iter()) {
            heap.push(Neighbour::new(metric.rdistance(point, record), label));
        }

        // tally the k nearest: vote count and summed distance per label
        let mut votes: Vec<(&L, usize, F)> = Vec::new();
        for _ in 0..self.params.k() {
            let neighbour = match heap.pop() {
                Some(neighbour) => neighbour,
                None => break,
            };

            let dist = metric.rdist_to_dist(neighbour.rdist.0.raw());
            match votes.iter_mut().find(|(label, _, _)| *label == neighbour.label) {
                Some((_, count, sum)) => {
                    *count += 1;
                    *sum = *sum + dist;
                }
                None => votes.push((neighbour.label, 1, dist)),
            }
        }

        // majority vote; ties fall to the label with the smaller summed
        // distance, then to the label seen nearer to the query
        let mut best = 0;
        for (index, vote) in votes.iter().enumerate().skip(1) {
            let leader = &votes[best];
            if vote.1 > leader.1 || (vote.1 == leader.1 && vote.2 < leader.2) {
                best = index;
            }
        }

        votes[best].0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CommonDistance;
    use ndarray::array;
    use vicino::dataset::{Dataset, Labels};
    use vicino::prelude::Predict;

    fn two_clusters() -> Dataset<f64, usize> {
        Dataset::new(
            array![
                [0.0, 0.0],
                [1.0, 0.0],
                [0.0, 1.0],
                [9.0, 9.0],
                [10.0, 9.0],
                [9.0, 10.0]
            ],
            array![0usize, 0, 0, 1, 1, 1],
        )
    }

    #[test]
    fn classifies_clusters() {
        let dataset = two_clusters();
        let model = Knn::params().k(3).fit(&dataset).unwrap();

        let prediction = model.predict(&array![[0.5, 0.5], [9.5, 9.5]]);
        assert_eq!(prediction, array![0, 1]);
    }

    #[test]
    fn fit_on_view_works() {
        let dataset = two_clusters();
        let model = Knn::params().k(1).fit(&dataset.view()).unwrap();

        let prediction = model.predict(&array![[10.0, 10.0]]);
        assert_eq!(prediction[0], 1);
    }

    #[test]
    fn prediction_stays_in_training_label_set() {
        let dataset = two_clusters();
        let labels = dataset.label_set();
        let model = Knn::params().k(2).fit(&dataset).unwrap();

        let prediction = model.predict(&array![[4.0, 4.0], [-3.0, 0.0], [20.0, 20.0]]);
        for label in prediction.iter() {
            assert!(labels.contains(label));
        }
    }

    #[test]
    fn vote_ties_prefer_the_closer_label() {
        // one neighbour of either label; the query sits closer to label 0
        let dataset = Dataset::new(array![[0.0], [1.0]], array![0usize, 1]);
        let model = Knn::params().k(2).fit(&dataset).unwrap();

        assert_eq!(model.predict(&array![[0.4]])[0], 0);
        assert_eq!(model.predict(&array![[0.6]])[0], 1);
    }

    #[test]
    fn manhattan_metric_is_honoured() {
        let dataset = two_clusters();
        let model = Knn::params()
            .k(1)
            .distance(CommonDistance::L1Dist)
            .fit(&dataset)
            .unwrap();

        assert_eq!(model.predict(&array![[8.0, 8.0]])[0], 1);
    }

    #[test]
    fn too_few_samples_is_a_fit_error() {
        let dataset = Dataset::new(array![[0.0], [1.0]], array![0usize, 1]);
        let result = Knn::params().k(3).fit(&dataset);

        assert!(matches!(
            result,
            Err(KnnError::TooFewSamples { k: 3, nsamples: 2 })
        ));
    }

    #[test]
    fn empty_features_is_a_fit_error() {
        let dataset = Dataset::new(
            Array2::<f64>::zeros((3, 0)),
            array![0usize, 1, 0],
        );
        let result = Knn::params().k(1).fit(&dataset);

        assert!(matches!(result, Err(KnnError::EmptyFeatures)));
    }

    #[test]
    #[should_panic]
    fn feature_mismatch_panics_at_prediction() {
        let dataset = two_clusters();
        let model = Knn::params().k(1).fit(&dataset).unwrap();

        // trained on two features, queried with three
        let _ = model.predict(&array![[1.0, 2.0, 3.0]]);
    }
}
