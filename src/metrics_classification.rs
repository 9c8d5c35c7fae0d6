//! Common metrics for performance evaluation of classifiers
//!
//! Scoring is done by counting predictions against the ground truth in a confusion matrix. Every
//! other metric (accuracy, precision, recall) is derived from the entries of the matrix.
use std::collections::HashMap;
use std::fmt;

use ndarray::prelude::*;

use crate::error::{Error, Result};

/// Confusion matrix for multi-label evaluation
///
/// A confusion matrix shows predictions in a matrix, where rows correspond to target and columns
/// to predicted. The diagonal entries are correct predictions.
#[derive(Clone, PartialEq)]
pub struct ConfusionMatrix {
    matrix: Array2<usize>,
    members: Vec<String>,
}

impl ConfusionMatrix {
    /// Class labels in the order of rows and columns
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Raw counts, rows are targets and columns predictions
    pub fn matrix(&self) -> ArrayView2<'_, usize> {
        self.matrix.view()
    }

    /// Number of evaluated instances
    pub fn nsamples(&self) -> usize {
        self.matrix.sum()
    }

    /// Calculate precision for every class
    ///
    /// Classes which were never predicted have a precision of zero.
    pub fn precision(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(0));

        self.matrix
            .diag()
            .iter()
            .zip(sum.iter())
            .map(|(a, b)| if *b == 0 { 0.0 } else { *a as f32 / *b as f32 })
            .collect()
    }

    /// Calculate recall for every class
    ///
    /// Classes which never occur in the ground truth have a recall of zero.
    pub fn recall(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(1));

        self.matrix
            .diag()
            .iter()
            .zip(sum.iter())
            .map(|(a, b)| if *b == 0 { 0.0 } else { *a as f32 / *b as f32 })
            .collect()
    }

    /// Return mean accuracy, zero for an empty evaluation
    pub fn accuracy(&self) -> f32 {
        let total = self.matrix.sum();
        if total == 0 {
            return 0.0;
        }

        self.matrix.diag().sum() as f32 / total as f32
    }
}

/// Print a confusion matrix
impl fmt::Debug for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self.members.iter().map(|x| x.len()).max().unwrap_or(0).max(6);

        write!(f, "{:width$} |", "classes", width = width)?;
        for member in &self.members {
            write!(f, " {:width$} |", member, width = width)?;
        }
        writeln!(f)?;

        for (member, row) in self.members.iter().zip(self.matrix.rows()) {
            write!(f, "{:width$} |", member, width = width)?;
            for count in row {
                write!(f, " {:width$} |", count, width = width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Create a confusion matrix from predicted labels and a ground truth
///
/// Rows without a ground truth label (missing values) are not counted.
pub trait ToConfusionMatrix {
    fn confusion_matrix(&self, ground_truth: &[Option<String>]) -> Result<ConfusionMatrix>;
}

impl ToConfusionMatrix for [String] {
    fn confusion_matrix(&self, ground_truth: &[Option<String>]) -> Result<ConfusionMatrix> {
        if self.len() != ground_truth.len() {
            return Err(Error::MismatchedShapes(self.len(), ground_truth.len()));
        }

        let pairs = ground_truth
            .iter()
            .zip(self.iter())
            .filter_map(|(truth, pred)| truth.as_deref().map(|truth| (truth, pred.as_str())))
            .collect::<Vec<_>>();

        let mut members = pairs
            .iter()
            .flat_map(|(truth, pred)| vec![*truth, *pred])
            .collect::<Vec<_>>();
        members.sort_unstable();
        members.dedup();

        // map from class label to index
        let index = members
            .iter()
            .enumerate()
            .map(|(idx, label)| (*label, idx))
            .collect::<HashMap<_, _>>();

        let mut matrix = Array2::zeros((members.len(), members.len()));
        for (truth, pred) in pairs {
            matrix[(index[truth], index[pred])] += 1;
        }

        Ok(ConfusionMatrix {
            matrix,
            members: members.into_iter().map(String::from).collect(),
        })
    }
}

impl ToConfusionMatrix for Vec<String> {
    fn confusion_matrix(&self, ground_truth: &[Option<String>]) -> Result<ConfusionMatrix> {
        self.as_slice().confusion_matrix(ground_truth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn labels(x: &[&str]) -> Vec<String> {
        x.iter().map(|x| x.to_string()).collect()
    }

    fn truth(x: &[Option<&str>]) -> Vec<Option<String>> {
        x.iter().map(|x| x.map(String::from)).collect()
    }

    #[test]
    fn test_confusion_matrix() -> Result<()> {
        let predicted = labels(&["a", "b", "a", "a", "b"]);
        let ground_truth = truth(&[Some("a"), Some("b"), Some("b"), Some("a"), Some("b")]);

        let cm = predicted.confusion_matrix(&ground_truth)?;

        assert_eq!(cm.members(), &["a".to_string(), "b".to_string()]);
        assert_eq!(cm.matrix(), array![[2, 0], [1, 2]]);
        assert_abs_diff_eq!(cm.accuracy(), 0.8);
        assert_abs_diff_eq!(cm.precision(), array![2.0 / 3.0, 1.0]);
        assert_abs_diff_eq!(cm.recall(), array![1.0, 2.0 / 3.0]);

        Ok(())
    }

    #[test]
    fn missing_ground_truth_is_skipped() -> Result<()> {
        let predicted = labels(&["a", "b", "c"]);
        let ground_truth = truth(&[Some("a"), None, Some("c")]);

        let cm = predicted.confusion_matrix(&ground_truth)?;

        assert_eq!(cm.nsamples(), 2);
        assert_eq!(cm.members().len(), 2);
        assert_abs_diff_eq!(cm.accuracy(), 1.0);

        Ok(())
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let predicted = labels(&["a"]);
        let ground_truth = truth(&[Some("a"), Some("b")]);

        assert_eq!(
            predicted.confusion_matrix(&ground_truth),
            Err(Error::MismatchedShapes(1, 2))
        );
    }
}
