//! Conditional entropy
//!
//! H(outcome | attribute) = Σ_row (row_total / total) * H(outcome | attribute = row)
use crate::confusion_matrix::ConfusionMatrix;
use crate::purity_functions::PurityFunction;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Deserialize, Serialize, Clone)]
pub struct Entropy {}

impl Entropy {
    /// Entropy of the outcome restricted to one row of the matrix, in bits.
    #[inline]
    pub fn row_entropy(matrix: &ConfusionMatrix, row: &str) -> f64 {
        let row_total = matrix.row_total(row) as f64;
        if row_total <= 0.0 {
            return 0.0;
        }
        matrix
            .column_values()
            .iter()
            .map(|column| {
                let count = matrix.count_at(row, column) as f64;
                if count == 0.0 {
                    0.0
                } else {
                    (count / row_total) * (row_total / count).log2()
                }
            })
            .sum()
    }
}

impl PurityFunction for Entropy {
    #[inline]
    fn calculate(&self, matrix: &ConfusionMatrix) -> f64 {
        let total = matrix.total() as f64;
        if total <= 0.0 {
            return 0.0;
        }
        matrix
            .row_values()
            .iter()
            .map(|row| Entropy::row_entropy(matrix, row) * matrix.row_total(row) as f64 / total)
            .sum()
    }
}
