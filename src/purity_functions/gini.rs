//! Weighted Gini impurity
//!
//! Σ_row (row_total / total) * (1 - Σ_col (count / row_total)²)
use crate::confusion_matrix::ConfusionMatrix;
use crate::purity_functions::PurityFunction;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Deserialize, Serialize, Clone)]
pub struct Gini {}

impl PurityFunction for Gini {
    #[inline]
    fn calculate(&self, matrix: &ConfusionMatrix) -> f64 {
        let total = matrix.total() as f64;
        if total <= 0.0 {
            return 0.0;
        }
        matrix
            .row_values()
            .iter()
            .map(|row| {
                let row_total = matrix.row_total(row) as f64;
                let correct: f64 = matrix
                    .column_values()
                    .iter()
                    .map(|column| (matrix.count_at(row, column) as f64 / row_total).powi(2))
                    .sum();
                (1.0 - correct).max(0.0) * row_total / total
            })
            .sum()
    }
}
