//! Resampling and hyperparameter tuning
//!
//! Cross-validated performance estimates drive the choice of the neighbour
//! count k: [`RepeatedKFold`] describes how to partition the samples and
//! [`KnnGridSearch`] scores a set of candidate values with it, selecting the
//! candidate with the smallest aggregated misclassification rate.
use std::fmt;

use rand::Rng;

use vicino::metrics::ToConfusionMatrix;
use vicino::traits::{Fit, Predict};
use vicino::{Dataset, Float, Label, ParamGuard};

use crate::distance::CommonDistance;
use crate::error::{KnnError, Result};
use crate::knn::hyperparams::{KnnParams, KnnValidParams};

/// A verified repeated k-fold resampling descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatedKFoldValid {
    folds: usize,
    repeats: usize,
    stratified: bool,
}

impl RepeatedKFoldValid {
    /// Return the number of folds per repetition
    pub fn folds(&self) -> usize {
        self.folds
    }

    /// Return the number of repetitions
    pub fn repeats(&self) -> usize {
        self.repeats
    }

    /// Whether folds preserve the label proportions
    pub fn stratified(&self) -> bool {
        self.stratified
    }
}

/// A repeated k-fold resampling descriptor during construction
///
/// The samples are shuffled and partitioned into `folds` folds, `repeats`
/// times over; every fold serves as validation split exactly once per
/// repetition. The descriptor has to pass [`ParamGuard::check`] before any
/// evaluation can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatedKFold(RepeatedKFoldValid);

impl RepeatedKFold {
    pub fn new(folds: usize) -> Self {
        Self(RepeatedKFoldValid {
            folds,
            repeats: 1,
            stratified: false,
        })
    }

    /// Sets the number of repetitions, each with a fresh shuffle
    pub fn repeats(mut self, repeats: usize) -> Self {
        self.0.repeats = repeats;
        self
    }

    /// Sets whether every fold preserves the label proportions of the whole
    /// dataset
    pub fn stratified(mut self, stratified: bool) -> Self {
        self.0.stratified = stratified;
        self
    }
}

impl ParamGuard for RepeatedKFold {
    type Checked = RepeatedKFoldValid;
    type Error = KnnError;

    fn check_ref(&self) -> std::result::Result<&Self::Checked, Self::Error> {
        if self.0.folds < 2 {
            return Err(KnnError::InvalidResampling(format!(
                "at least two folds are required, got {}",
                self.0.folds
            )));
        }
        if self.0.repeats == 0 {
            return Err(KnnError::InvalidResampling(
                "at least one repetition is required".to_string(),
            ));
        }

        Ok(&self.0)
    }

    fn check(self) -> std::result::Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// Estimate the misclassification rate of a parameter set by repeated k-fold
/// cross-validation
///
/// Each repetition reshuffles the samples with `rng`, partitions them
/// (stratified when the descriptor says so), fits a model per fold and scores
/// it on the validation split. The returned value is the mean error over all
/// `folds * repeats` evaluations.
pub fn cross_validate_error<F: Float, L: Label + Ord, R: Rng>(
    dataset: &Dataset<F, L>,
    params: &KnnValidParams<F, L>,
    resampling: &RepeatedKFoldValid,
    rng: &mut R,
) -> Result<f64> {
    let mut working = dataset.clone();

    let mut sum = 0.0;
    let mut evaluations = 0;
    for _ in 0..resampling.repeats() {
        working = working.shuffle(rng);

        let folds = if resampling.stratified() {
            working.stratified_fold(resampling.folds(), rng)
        } else {
            working.fold(resampling.folds())
        };

        for (train, valid) in folds {
            let model = params.fit(&train)?;
            let confusion = model.predict(&valid).confusion_matrix(&valid)?;

            sum += confusion.error() as f64;
            evaluations += 1;
        }
    }

    Ok(sum / evaluations as f64)
}

/// A verified grid search over candidate neighbour counts
#[derive(Clone, Debug)]
pub struct KnnGridSearchValid {
    candidates: Vec<usize>,
    resampling: RepeatedKFoldValid,
    distance: CommonDistance,
}

/// A grid search over candidate neighbour counts during construction
///
/// Every candidate k is scored with
/// [`cross_validate_error`](cross_validate_error) under the same resampling
/// descriptor and the same fold assignments, so the comparison between
/// candidates is apples to apples.
///
/// ### Example
///
/// ```ignore
/// let grid = KnnGridSearch::new()
///     .candidates(1..=12)
///     .resampling(RepeatedKFold::new(10).repeats(5))
///     .check()?;
///
/// let result = grid.evaluate(&dataset, &mut rng)?;
/// println!("{}", result);
/// let model = Knn::params().k(result.best_k()).fit(&dataset)?;
/// ```
#[derive(Clone, Debug)]
pub struct KnnGridSearch(KnnGridSearchValid);

impl KnnGridSearch {
    pub fn new() -> Self {
        Self(KnnGridSearchValid {
            candidates: (1..=10).collect(),
            resampling: RepeatedKFoldValid {
                folds: 10,
                repeats: 1,
                stratified: false,
            },
            distance: CommonDistance::L2Dist,
        })
    }

    /// Sets the candidate neighbour counts, evaluated in the given order
    pub fn candidates<I: IntoIterator<Item = usize>>(mut self, candidates: I) -> Self {
        self.0.candidates = candidates.into_iter().collect();
        self
    }

    /// Sets the resampling descriptor scoring each candidate
    pub fn resampling(mut self, resampling: RepeatedKFold) -> Self {
        self.0.resampling = resampling.0;
        self
    }

    /// Sets the distance metric passed to every candidate
    pub fn distance(mut self, distance: CommonDistance) -> Self {
        self.0.distance = distance;
        self
    }
}

impl Default for KnnGridSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamGuard for KnnGridSearch {
    type Checked = KnnGridSearchValid;
    type Error = KnnError;

    fn check_ref(&self) -> std::result::Result<&Self::Checked, Self::Error> {
        if self.0.candidates.is_empty() {
            return Err(KnnError::EmptyGrid);
        }
        if let Some(invalid) = self.0.candidates.iter().find(|k| **k == 0) {
            return Err(KnnError::InvalidK(*invalid));
        }
        if self.0.resampling.folds < 2 {
            return Err(KnnError::InvalidResampling(format!(
                "at least two folds are required, got {}",
                self.0.resampling.folds
            )));
        }
        if self.0.resampling.repeats == 0 {
            return Err(KnnError::InvalidResampling(
                "at least one repetition is required".to_string(),
            ));
        }

        Ok(&self.0)
    }

    fn check(self) -> std::result::Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl KnnGridSearchValid {
    /// Score every candidate and return the per-candidate error table
    ///
    /// The generator is cloned per candidate, so all candidates are compared
    /// on identical shuffles and fold assignments.
    pub fn evaluate<F: Float, L: Label + Ord, R: Rng + Clone>(
        &self,
        dataset: &Dataset<F, L>,
        rng: &mut R,
    ) -> Result<TuningResult> {
        let template = rng.clone();

        let mut scores = Vec::with_capacity(self.candidates.len());
        for &k in &self.candidates {
            let params = KnnParams::<F, L>::new()
                .k(k)
                .distance(self.distance)
                .check()?;

            let mut fold_rng = template.clone();
            let error = cross_validate_error(dataset, &params, &self.resampling, &mut fold_rng)?;

            scores.push((k, error));
        }

        Ok(TuningResult { scores })
    }
}

/// The outcome of a grid search: one cross-validated misclassification rate
/// per candidate, in candidate order
pub struct TuningResult {
    scores: Vec<(usize, f64)>,
}

impl TuningResult {
    /// Return (candidate, error) pairs in evaluation order
    pub fn scores(&self) -> &[(usize, f64)] {
        &self.scores
    }

    /// Return the winning candidate and its error
    ///
    /// The winner has an error less than or equal to every other candidate's;
    /// among equally scored candidates the smallest k wins.
    pub fn best(&self) -> (usize, f64) {
        // non-empty by construction, the grid rejects empty candidate sets
        let mut best = self.scores[0];
        for &(k, error) in &self.scores[1..] {
            if error < best.1 || (error == best.1 && k < best.0) {
                best = (k, error);
            }
        }

        best
    }

    /// Return the winning neighbour count
    pub fn best_k(&self) -> usize {
        self.best().0
    }

    /// Return the winner's cross-validated misclassification rate
    pub fn best_error(&self) -> f64 {
        self.best().1
    }
}

impl fmt::Display for TuningResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:>4}  {:>8}", "k", "error")?;
        for (k, error) in &self.scores {
            writeln!(f, "{:>4}  {:>8.4}", k, error)?;
        }

        Ok(())
    }
}
