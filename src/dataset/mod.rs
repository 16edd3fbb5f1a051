//! Datasets
//!
//! This module implements the dataset struct and various helper traits to
//! extend its functionality.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ScalarOperand};

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;

mod impl_dataset;
mod impl_records;
mod impl_targets;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumptions on floating
/// point numbers and implements them for 32bit and 64bit floating points.
/// They are used in the records of a dataset.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}
impl Float for f64 {}

/// Discrete labels
///
/// Labels are countable, comparable and hashable. Currently boolean (binary
/// task), usize and string labels are supported.
pub trait Label: PartialEq + Eq + Hash + Clone + Default + fmt::Debug {}

impl Label for bool {}
impl Label for usize {}
impl Label for String {}
impl Label for () {}
impl Label for &str {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It binds a feature matrix
/// to a target column and optionally to descriptive feature names. In the
/// classification setting it plays the role of a *task*: the target column is
/// fixed at construction and re-constructing (e.g. with
/// [`select_features`](DatasetBase::select_features)) is the only way to
/// change the feature/target selection.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples,
///   nfeatures)
/// * `targets`: a one-dimensional label vector with dimensionality (nsamples)
/// * `feature_names`: optional descriptive feature names with dimensionality
///   (nfeatures)
///
/// # Trait bounds
///
/// * `R: Records`: generic over feature matrices
/// * `T`: generic over any one-dimensional `ndarray` container usable as
///   targets. The `AsTargets` trait bound is omitted here to avoid repetition
///   in `src/dataset/impl_dataset.rs`
#[derive(Clone)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    feature_names: Vec<String>,
}

/// Dataset
///
/// The most commonly used type of dataset. It contains a number of records
/// stored as an `Array2` and each record corresponds to a single target
/// label, stored as an `Array1`.
pub type Dataset<D, T> = DatasetBase<Array2<D>, Array1<T>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, D, T> = DatasetBase<ArrayView2<'a, D>, ArrayView1<'a, T>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Return a reference to the single target column
pub trait AsTargets {
    type Elem;

    /// Returns a view on the targets as one-dimensional array
    fn as_targets(&self) -> ArrayView1<Self::Elem>;
}

/// Get the labels in the target column
///
/// The label set of a classification task is fixed the moment the dataset is
/// constructed; this trait exposes it together with per-label counts.
pub trait Labels {
    type Elem: Label;

    fn label_count(&self) -> HashMap<Self::Elem, usize>;

    fn label_set(&self) -> HashSet<Self::Elem> {
        self.label_count().into_iter().map(|(k, _)| k).collect()
    }

    fn labels(&self) -> Vec<Self::Elem> {
        self.label_set().into_iter().collect()
    }
}

impl<L: Label, T: AsTargets<Elem = L>> Labels for T {
    type Elem = L;

    fn label_count(&self) -> HashMap<L, usize> {
        let mut map = HashMap::new();
        for label in self.as_targets().iter() {
            *map.entry(label.clone()).or_insert(0) += 1;
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::traits::{Fit, PredictInplace};
    use ndarray::{array, Array1, Array2};
    use rand::{rngs::SmallRng, SeedableRng};
    use thiserror::Error;

    #[test]
    fn dataset_implements_required_methods() {
        let mut rng = SmallRng::seed_from_u64(42);

        // Shuffle keeps every (record, target) pair intact
        let dataset = Dataset::new(
            array![[1., 1.], [2., 2.], [3., 3.], [4., 4.], [5., 5.]],
            array![1usize, 2, 3, 4, 5],
        )
        .shuffle(&mut rng);

        for (record, target) in dataset
            .records()
            .rows()
            .into_iter()
            .zip(dataset.targets().iter())
        {
            assert_eq!(record[0] as usize, *target);
            assert_eq!(record[1] as usize, *target);
        }

        // Split with ratio
        let linspace: Array1<f64> = Array1::linspace(0.0, 0.8, 100);
        let records = Array2::from_shape_vec((50, 2), linspace.to_vec()).unwrap();
        let targets: Array1<usize> = (0..50).collect();
        let dataset = Dataset::from((records, targets));

        let (train, valid) = dataset.split_with_ratio(0.5);
        assert_eq!(train.nsamples(), 25);
        assert_eq!(valid.nsamples(), 25);

        // ------ Labels ------
        let dataset_multiclass = Dataset::from((
            array![[1., 2.], [2., 1.], [0., 0.], [2., 2.]],
            array![0usize, 1, 2, 2],
        ));

        let mut labels = dataset_multiclass.labels();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 1, 2]);

        let counts = dataset_multiclass.label_count();
        assert_eq!(counts[&0], 1);
        assert_eq!(counts[&1], 1);
        assert_eq!(counts[&2], 2);
    }

    #[test]
    fn split_with_ratio_floors_train_size() {
        for &(n, ratio) in &[(50usize, 0.25f32), (50, 0.8), (145, 0.8), (7, 0.5), (10, 0.33)] {
            let records = Array2::<f64>::zeros((n, 2));
            let targets: Array1<usize> = (0..n).collect();
            let (train, valid) = Dataset::new(records, targets).split_with_ratio(ratio);

            assert_eq!(train.nsamples(), (n as f32 * ratio).floor() as usize);
            assert_eq!(train.nsamples() + valid.nsamples(), n);

            // splits are disjoint: together they carry each target exactly once
            let mut seen: Vec<usize> = train
                .targets()
                .iter()
                .chain(valid.targets().iter())
                .copied()
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn select_features_by_name() -> Result<()> {
        let dataset = Dataset::new(
            array![[1., 10., 100.], [2., 20., 200.]],
            array![0usize, 1],
        )
        .with_feature_names(vec!["a", "b", "c"]);

        let selected = dataset.select_features(&["c", "a"])?;
        assert_eq!(selected.nfeatures(), 2);
        assert_eq!(selected.feature_names(), vec!["c", "a"]);
        assert_eq!(selected.records(), &array![[100., 1.], [200., 2.]]);

        assert!(matches!(
            dataset.select_features(&["d"]),
            Err(Error::MissingFeature(_))
        ));
        assert!(matches!(
            dataset.select_features(&[]),
            Err(Error::EmptySelection)
        ));

        Ok(())
    }

    #[test]
    fn drop_missing_removes_exactly_incomplete_rows() -> Result<()> {
        let nan = f64::NAN;
        let dataset = Dataset::new(
            array![[1., 2.], [nan, 3.], [4., nan], [5., 6.]],
            array![0usize, 1, 2, 3],
        )
        .with_feature_names(vec!["x", "y"]);

        // restricted to column x, only the NaN-in-x row goes
        let cleaned = dataset.drop_missing(&["x"])?;
        assert_eq!(cleaned.nsamples(), 3);
        assert_eq!(cleaned.targets(), &array![0, 2, 3]);

        // any column
        let cleaned = dataset.drop_missing_any();
        assert_eq!(cleaned.nsamples(), 2);
        assert_eq!(cleaned.targets(), &array![0, 3]);
        assert_eq!(cleaned.records(), &array![[1., 2.], [5., 6.]]);

        // idempotent
        let twice = cleaned.drop_missing_any();
        assert_eq!(twice.nsamples(), 2);
        assert_eq!(twice.records(), cleaned.records());

        Ok(())
    }

    #[test]
    fn datasets_have_k_fold() {
        let records =
            Array2::from_shape_vec((5, 2), vec![1., 1., 2., 2., 3., 3., 4., 4., 5., 5.]).unwrap();
        let targets = Array1::from_shape_vec(5, vec![1usize, 2, 3, 4, 5]).unwrap();
        for (i, (train, valid)) in Dataset::from((records, targets))
            .fold(5)
            .into_iter()
            .enumerate()
        {
            assert_eq!(valid.records().row(0)[0] as usize, i + 1);
            assert_eq!(valid.targets()[0], i + 1);

            for j in 0..4 {
                assert!(train.records().row(j)[0] as usize != i + 1);
                assert!(train.targets()[j] != i + 1);
            }
        }
    }

    #[test]
    fn k_fold_puts_remainder_rows_into_train() {
        let records = Array2::<f64>::zeros((5, 2));
        let targets: Array1<usize> = (0..5).collect();
        let dataset = Dataset::new(records, targets);

        // 5 samples in 3 folds: the two remainder rows always train
        for (train, valid) in dataset.fold(3) {
            assert_eq!(valid.nsamples(), 1);
            assert_eq!(train.nsamples(), 4);
        }
    }

    #[test]
    #[should_panic]
    fn fold_panics_k_0() {
        let dataset = Dataset::new(Array2::<f64>::zeros((5, 2)), Array1::<usize>::zeros(5));
        let _ = dataset.fold(0);
    }

    #[test]
    #[should_panic]
    fn fold_panics_k_more_than_samples() {
        let dataset = Dataset::new(Array2::<f64>::zeros((5, 2)), Array1::<usize>::zeros(5));
        let _ = dataset.fold(6);
    }

    #[test]
    fn stratified_fold_keeps_class_proportions() {
        let mut rng = SmallRng::seed_from_u64(3);

        // 8 samples of class 0, 4 of class 1, over 4 folds
        let records = Array2::<f64>::zeros((12, 2));
        let targets = array![0usize, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1];
        let dataset = Dataset::new(records, targets);

        for (train, valid) in dataset.stratified_fold(4, &mut rng) {
            assert_eq!(valid.nsamples(), 3);
            assert_eq!(train.nsamples(), 9);

            let ones = valid.targets().iter().filter(|x| **x == 1).count();
            assert_eq!(ones, 1);
        }
    }

    struct MockFittable {
        mock_var: usize,
    }

    struct MockFittableResult {
        mock_var: usize,
    }

    #[derive(Error, Debug)]
    enum MockError {
        #[error(transparent)]
        BaseCrate(#[from] Error),
    }

    impl Fit<Array2<f64>, Array1<usize>, MockError> for MockFittable {
        type Object = MockFittableResult;

        fn fit(
            &self,
            training_data: &Dataset<f64, usize>,
        ) -> std::result::Result<Self::Object, MockError> {
            if self.mock_var == 0 {
                Err(MockError::BaseCrate(Error::Parameters("0".to_string())))
            } else {
                Ok(MockFittableResult {
                    mock_var: training_data.nsamples(),
                })
            }
        }
    }

    impl PredictInplace<Array2<f64>, Array1<usize>> for MockFittableResult {
        fn predict_inplace(&self, x: &Array2<f64>, y: &mut Array1<usize>) {
            assert_eq!(
                x.nrows(),
                y.len(),
                "The number of data points must match the number of output targets."
            );
            *y = Array1::from_elem(x.nrows(), self.mock_var);
        }

        fn default_target(&self, x: &Array2<f64>) -> Array1<usize> {
            Array1::default(x.nrows())
        }
    }

    #[test]
    fn test_iter_fold() {
        let records =
            Array2::from_shape_vec((5, 2), vec![1., 1., 2., 2., 3., 3., 4., 4., 5., 5.]).unwrap();
        let targets = Array1::from_shape_vec(5, vec![1usize, 2, 3, 4, 5]).unwrap();
        let dataset: Dataset<f64, usize> = (records, targets).into();
        let params = MockFittable { mock_var: 1 };

        for (i, (model, validation_set)) in dataset
            .iter_fold(5, |v| params.fit(v).unwrap())
            .enumerate()
        {
            assert_eq!(model.mock_var, 4);
            assert_eq!(validation_set.records().row(0)[0] as usize, i + 1);
            assert_eq!(validation_set.targets()[0], i + 1);
            assert_eq!(validation_set.nsamples(), 1);
        }
    }

    #[test]
    fn test_st_cv_all_correct() {
        let records =
            Array2::from_shape_vec((5, 2), vec![1., 1., 2., 2., 3., 3., 4., 4., 5., 5.]).unwrap();
        let targets = Array1::from_shape_vec(5, vec![1usize, 2, 3, 4, 5]).unwrap();
        let dataset: Dataset<f64, usize> = (records, targets).into();
        let params = vec![MockFittable { mock_var: 1 }, MockFittable { mock_var: 2 }];
        let acc: std::result::Result<Array1<f64>, MockError> =
            dataset.cross_validate(5, &params, |_pred, _truth| Ok(3.));
        assert_eq!(acc.unwrap(), array![3., 3.]);
    }

    #[test]
    fn test_st_cv_one_incorrect() {
        let records =
            Array2::from_shape_vec((5, 2), vec![1., 1., 2., 2., 3., 3., 4., 4., 5., 5.]).unwrap();
        let targets = Array1::from_shape_vec(5, vec![1usize, 2, 3, 4, 5]).unwrap();
        let dataset: Dataset<f64, usize> = (records, targets).into();
        // second parameter set fails to train
        let params = vec![MockFittable { mock_var: 1 }, MockFittable { mock_var: 0 }];
        let err: std::result::Result<Array1<f64>, MockError> =
            dataset.cross_validate(5, &params, |_pred, _truth| Ok(0.));

        assert_eq!(err.unwrap_err().to_string(), "invalid parameter 0");
    }

    #[test]
    fn test_st_cv_incorrect_eval() {
        let records =
            Array2::from_shape_vec((5, 2), vec![1., 1., 2., 2., 3., 3., 4., 4., 5., 5.]).unwrap();
        let targets = Array1::from_shape_vec(5, vec![1usize, 2, 3, 4, 5]).unwrap();
        let dataset: Dataset<f64, usize> = (records, targets).into();
        let params = vec![MockFittable { mock_var: 1 }];
        let err: std::result::Result<Array1<f64>, MockError> =
            dataset.cross_validate(5, &params, |_pred, _truth| {
                Err(Error::Parameters("eval".to_string()))
            });

        assert_eq!(err.unwrap_err().to_string(), "invalid parameter eval");
    }
}
