//! Weighted misclassification rate
//!
//! Σ_row (row_total / total) * (1 - max_col count / row_total)
use crate::confusion_matrix::ConfusionMatrix;
use crate::purity_functions::PurityFunction;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Deserialize, Serialize, Clone)]
pub struct Misclassification {}

impl PurityFunction for Misclassification {
    #[inline]
    fn calculate(&self, matrix: &ConfusionMatrix) -> f64 {
        let total = matrix.total() as f64;
        if total <= 0.0 {
            return 0.0;
        }
        let misclassified: usize = matrix
            .row_values()
            .iter()
            .map(|row| {
                let majority = matrix
                    .column_values()
                    .iter()
                    .map(|column| matrix.count_at(row, column))
                    .max()
                    .unwrap_or(0);
                matrix.row_total(row) - majority
            })
            .sum();
        misclassified as f64 / total
    }
}
