//! Common metrics for performance evaluation of classifiers
//!
//! Scoring is essential for classification tasks. This module implements
//! confusion matrices and the scalar measures derived from them, like
//! accuracy, misclassification rate, precision and recall.
use std::collections::HashMap;
use std::fmt;
use std::iter::FromIterator;

use ndarray::prelude::*;
use ndarray::Data;

use crate::dataset::{AsTargets, DatasetBase, Label, Records};
use crate::error::{Error, Result};

/// Confusion matrix for multi-class evaluation
///
/// A confusion matrix shows predictions in a matrix, where rows correspond
/// to ground truth and columns to the predicted label. The diagonal entries
/// are correct predictions.
pub struct ConfusionMatrix<L> {
    matrix: Array2<usize>,
    members: Vec<L>,
}

impl<L> ConfusionMatrix<L> {
    /// Return the raw prediction counts
    pub fn counts(&self) -> ArrayView2<usize> {
        self.matrix.view()
    }

    /// Return the classes, in the order of the matrix rows and columns
    pub fn classes(&self) -> &[L] {
        &self.members
    }

    /// Return the fraction of correct predictions
    pub fn accuracy(&self) -> f32 {
        self.matrix.diag().sum() as f32 / self.matrix.sum() as f32
    }

    /// Return the misclassification rate
    pub fn error(&self) -> f32 {
        1.0 - self.accuracy()
    }

    /// Calculate precision for every class
    ///
    /// Column sums hold the number of predictions per class, so precision is
    /// the diagonal divided by its column sum.
    pub fn precision(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(0));

        Array1::from_iter(
            self.matrix
                .diag()
                .iter()
                .zip(sum.iter())
                .map(|(a, b)| *a as f32 / *b as f32),
        )
    }

    /// Calculate recall for every class
    pub fn recall(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(1));

        Array1::from_iter(
            self.matrix
                .diag()
                .iter()
                .zip(sum.iter())
                .map(|(a, b)| *a as f32 / *b as f32),
        )
    }

    /// Return the harmonic mean of precision and recall for every class
    pub fn f1_score(&self) -> Array1<f32> {
        let precision = self.precision();
        let recall = self.recall();

        Array1::from_iter(
            precision
                .iter()
                .zip(recall.iter())
                .map(|(p, r)| 2.0 * (p * r) / (p + r)),
        )
    }

    /// Return the Matthews Correlation Coefficient
    ///
    /// Estimates the normalized cross-correlation between ground truth and
    /// predicted variable.
    pub fn mcc(&self) -> f32 {
        let mut cov_xy = 0.0;
        for k in 0..self.members.len() {
            for l in 0..self.members.len() {
                for m in 0..self.members.len() {
                    cov_xy += self.matrix[(k, k)] as f32 * self.matrix[(l, m)] as f32;
                    cov_xy -= self.matrix[(k, l)] as f32 * self.matrix[(m, k)] as f32;
                }
            }
        }

        let sum = self.matrix.sum();
        let sum_over_rows = self.matrix.sum_axis(Axis(1));
        let sum_over_cols = self.matrix.sum_axis(Axis(0));

        let mut cov_xx: f32 = 0.0;
        let mut cov_yy: f32 = 0.0;
        for k in 0..self.members.len() {
            cov_xx += (sum_over_rows[k] * (sum - sum_over_rows[k])) as f32;
            cov_yy += (sum_over_cols[k] * (sum - sum_over_cols[k])) as f32;
        }

        cov_xy / cov_xx.sqrt() / cov_yy.sqrt()
    }

    /// Return the counts normalized over the ground truth, i.e. every
    /// non-empty row sums to one
    pub fn normalized_rows(&self) -> Array2<f32> {
        let mut normalized = self.matrix.mapv(|x| x as f32);
        for mut row in normalized.rows_mut() {
            let sum: f32 = row.sum();
            if sum > 0.0 {
                row.mapv_inplace(|x| x / sum);
            }
        }

        normalized
    }

    /// Return the counts normalized over the predictions, i.e. every
    /// non-empty column sums to one
    pub fn normalized_columns(&self) -> Array2<f32> {
        let mut normalized = self.matrix.mapv(|x| x as f32);
        for mut column in normalized.columns_mut() {
            let sum: f32 = column.sum();
            if sum > 0.0 {
                column.mapv_inplace(|x| x / sum);
            }
        }

        normalized
    }
}

/// Print a confusion matrix with class headers
impl<L: fmt::Display> fmt::Debug for ConfusionMatrix<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        write!(f, "{:>10}", "classes")?;
        for member in &self.members {
            write!(f, " | {:>10}", member)?;
        }
        writeln!(f)?;

        for (member, row) in self.members.iter().zip(self.matrix.rows()) {
            write!(f, "{:>10}", member)?;
            for entry in row {
                write!(f, " | {:>10}", entry)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Classification functions
///
/// Contains only the confusion matrix routine, as all other supported
/// metrics can be derived from the entries in the matrix.
pub trait ToConfusionMatrix<L, T> {
    fn confusion_matrix(&self, ground_truth: T) -> Result<ConfusionMatrix<L>>;
}

impl<L: Label + Ord, S: Data<Elem = L>, T: Data<Elem = L>> ToConfusionMatrix<L, &ArrayBase<T, Ix1>>
    for ArrayBase<S, Ix1>
{
    fn confusion_matrix(&self, ground_truth: &ArrayBase<T, Ix1>) -> Result<ConfusionMatrix<L>> {
        if self.len() != ground_truth.len() {
            return Err(Error::LengthMismatch(self.len(), ground_truth.len()));
        }

        // the classes are the union of the two label sets
        let mut classes = ground_truth
            .iter()
            .chain(self.iter())
            .cloned()
            .collect::<Vec<_>>();
        classes.sort_unstable();
        classes.dedup();

        let indices = classes
            .iter()
            .enumerate()
            .map(|(index, class)| (class.clone(), index))
            .collect::<HashMap<L, usize>>();

        let mut matrix = Array2::zeros((classes.len(), classes.len()));
        for (truth, prediction) in ground_truth.iter().zip(self.iter()) {
            matrix[(indices[truth], indices[prediction])] += 1;
        }

        Ok(ConfusionMatrix {
            matrix,
            members: classes,
        })
    }
}

impl<L: Label + Ord, R: Records, T: AsTargets<Elem = L>> ToConfusionMatrix<L, &DatasetBase<R, T>>
    for Array1<L>
{
    fn confusion_matrix(&self, ground_truth: &DatasetBase<R, T>) -> Result<ConfusionMatrix<L>> {
        self.confusion_matrix(&ground_truth.as_targets())
    }
}
