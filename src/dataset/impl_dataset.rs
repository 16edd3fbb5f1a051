use ndarray::{s, Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;

use super::{AsTargets, Dataset, DatasetBase, DatasetView, Float, Label, Records};
use crate::error::{Error, Result};
use crate::traits::{Fit, Predict, PredictInplace};

impl<R: Records, T: AsTargets> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Panics
    ///
    /// When records and targets disagree on the number of samples.
    pub fn new(records: R, targets: T) -> Self {
        assert_eq!(
            records.nsamples(),
            targets.as_targets().len(),
            "records and targets must agree on the number of samples"
        );

        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }
}

impl<R: Records, T> DatasetBase<R, T> {
    /// Return references to the underlying records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Return references to the underlying targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Return the number of samples
    pub fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    /// Return the number of feature columns
    pub fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }

    /// Set descriptive feature names, one per feature column
    pub fn with_feature_names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        let names: Vec<String> = names.into_iter().map(|x| x.into()).collect();
        assert_eq!(
            names.len(),
            self.nfeatures(),
            "one name per feature column is required"
        );

        self.feature_names = names;
        self
    }

    /// Return the feature names, falling back to `feature-N` placeholders
    pub fn feature_names(&self) -> Vec<String> {
        if self.feature_names.is_empty() {
            (0..self.nfeatures()).map(|i| format!("feature-{}", i)).collect()
        } else {
            self.feature_names.clone()
        }
    }

    fn feature_index(&self, name: &str) -> Result<usize> {
        self.feature_names()
            .iter()
            .position(|feature| feature == name)
            .ok_or_else(|| Error::MissingFeature(name.to_string()))
    }
}

impl<F: Float, L: Clone> Dataset<F, L> {
    /// Return a read-only view of this dataset
    pub fn view(&self) -> DatasetView<F, L> {
        DatasetBase {
            records: self.records.view(),
            targets: self.targets.view(),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Apply a function to the targets, yielding a dataset with a new target
    /// type
    pub fn map_targets<T, G: FnMut(&L) -> T>(self, fnc: G) -> Dataset<F, T> {
        let DatasetBase {
            records,
            targets,
            feature_names,
        } = self;

        DatasetBase {
            records,
            targets: targets.map(fnc),
            feature_names,
        }
    }

    fn take_rows(&self, indices: &[usize]) -> Self {
        DatasetBase {
            records: self.records.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Shuffle the samples with the given random number generator
    ///
    /// Row order is the only source of randomness in the splitting and
    /// folding operations below, so seeding the generator makes a whole
    /// train/test workflow reproducible.
    pub fn shuffle<R: Rng>(self, rng: &mut R) -> Self {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        self.take_rows(&indices)
    }

    /// Split the dataset into two disjoint datasets with the first
    /// containing `floor(ratio * nsamples)` samples
    ///
    /// The split runs along the current row order; shuffle beforehand for a
    /// random split.
    pub fn split_with_ratio(self, ratio: f32) -> (Self, Self) {
        let n_train = (self.nsamples() as f32 * ratio).floor() as usize;

        let train = DatasetBase {
            records: self.records.slice(s![..n_train, ..]).to_owned(),
            targets: self.targets.slice(s![..n_train]).to_owned(),
            feature_names: self.feature_names.clone(),
        };
        let valid = DatasetBase {
            records: self.records.slice(s![n_train.., ..]).to_owned(),
            targets: self.targets.slice(s![n_train..]).to_owned(),
            feature_names: self.feature_names,
        };

        (train, valid)
    }

    /// Restrict the dataset to the named feature columns, in the given order
    pub fn select_features(&self, names: &[&str]) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::EmptySelection);
        }

        let columns = names
            .iter()
            .map(|name| self.feature_index(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(DatasetBase {
            records: self.records.select(Axis(1), &columns),
            targets: self.targets.clone(),
            feature_names: names.iter().map(|name| name.to_string()).collect(),
        })
    }

    /// Drop every sample with a non-finite value in one of the named columns
    ///
    /// All other samples and all columns are left untouched, which makes the
    /// operation idempotent.
    pub fn drop_missing(&self, names: &[&str]) -> Result<Self> {
        let columns = names
            .iter()
            .map(|name| self.feature_index(name))
            .collect::<Result<Vec<_>>>()?;

        let complete = (0..self.nsamples())
            .filter(|&row| columns.iter().all(|&col| self.records[[row, col]].is_finite()))
            .collect::<Vec<_>>();

        Ok(self.take_rows(&complete))
    }

    /// Drop every sample with a non-finite value in any column
    pub fn drop_missing_any(&self) -> Self {
        let complete = (0..self.nsamples())
            .filter(|&row| self.records.row(row).iter().all(|x| x.is_finite()))
            .collect::<Vec<_>>();

        self.take_rows(&complete)
    }

    /// Split the dataset into k folds, returning (train, validation) pairs
    ///
    /// The validation sets are k disjoint chunks of `nsamples / k` samples in
    /// row order; when k does not divide the number of samples the remainder
    /// rows join the train side of every fold.
    ///
    /// # Panics
    ///
    /// When `k == 0` or `k` exceeds the number of samples.
    pub fn fold(&self, k: usize) -> Vec<(Self, Self)> {
        assert!(k > 0, "the number of folds must be positive");
        let n = self.nsamples();
        assert!(
            k <= n,
            "cannot partition {} samples into {} folds",
            n,
            k
        );

        let fold_size = n / k;

        (0..k)
            .map(|i| {
                let start = i * fold_size;
                let end = start + fold_size;

                let valid = (start..end).collect::<Vec<_>>();
                let train = (0..start).chain(end..n).collect::<Vec<_>>();

                (self.take_rows(&train), self.take_rows(&valid))
            })
            .collect()
    }

    /// Fit a model per fold, lazily yielding (model, validation set) pairs
    pub fn iter_fold<O, C: FnMut(&Self) -> O>(
        &self,
        k: usize,
        mut fit: C,
    ) -> impl Iterator<Item = (O, Self)> {
        self.fold(k)
            .into_iter()
            .map(move |(train, valid)| (fit(&train), valid))
    }

    /// Cross-validate every parameter set over k folds
    ///
    /// For each parameter set a model is fitted per fold and evaluated
    /// against the validation split with the `eval` closure; the returned
    /// array holds the score means in parameter order.
    pub fn cross_validate<O, E, P, C>(
        &self,
        k: usize,
        parameters: &[P],
        eval: C,
    ) -> std::result::Result<Array1<f64>, E>
    where
        P: Fit<Array2<F>, Array1<L>, E, Object = O>,
        O: PredictInplace<Array2<F>, Array1<L>>,
        E: std::error::Error + From<Error>,
        C: Fn(&Array1<L>, &Array1<L>) -> Result<f64>,
    {
        let folds = self.fold(k);

        let mut evaluations = Vec::with_capacity(parameters.len());
        for params in parameters {
            let mut sum = 0.0;
            for (train, valid) in &folds {
                let model = params.fit(train)?;
                let prediction = model.predict(valid.records());
                sum += eval(&prediction, valid.targets())?;
            }

            evaluations.push(sum / folds.len() as f64);
        }

        Ok(Array1::from(evaluations))
    }
}

impl<F: Float, L: Label> Dataset<F, L> {
    /// Split the dataset into k folds preserving the label proportions
    ///
    /// The samples of every label are shuffled and dealt round-robin over the
    /// folds, so each validation set carries roughly the class distribution
    /// of the whole dataset.
    ///
    /// # Panics
    ///
    /// When `k == 0` or `k` exceeds the number of samples.
    pub fn stratified_fold<R: Rng>(&self, k: usize, rng: &mut R) -> Vec<(Self, Self)> {
        assert!(k > 0, "the number of folds must be positive");
        let n = self.nsamples();
        assert!(
            k <= n,
            "cannot partition {} samples into {} folds",
            n,
            k
        );

        // group row indices by label, in first-seen label order
        let mut groups: Vec<(L, Vec<usize>)> = Vec::new();
        for (row, label) in self.targets.iter().enumerate() {
            match groups.iter_mut().find(|(known, _)| known == label) {
                Some((_, rows)) => rows.push(row),
                None => groups.push((label.clone(), vec![row])),
            }
        }

        let mut members = vec![Vec::new(); k];
        let mut next = 0;
        for (_, mut rows) in groups {
            rows.shuffle(rng);
            for row in rows {
                members[next % k].push(row);
                next += 1;
            }
        }

        (0..k)
            .map(|i| {
                let train = members
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .flat_map(|(_, rows)| rows.iter().copied())
                    .collect::<Vec<_>>();

                (self.take_rows(&train), self.take_rows(&members[i]))
            })
            .collect()
    }
}

impl<F: Float, L: Label> From<(Array2<F>, Array1<L>)> for Dataset<F, L> {
    fn from(rec_tar: (Array2<F>, Array1<L>)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}
