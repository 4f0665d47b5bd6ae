//! Confusion Matrix
//!
//! Cross-tabulation of the values of two attributes over a dataset. The row
//! attribute is a split candidate and the column attribute is conventionally
//! the outcome.
//!
//! ```text
//!                      outcome            total
//!                   no        yes
//!  candidate  A1    nA1       pA1        totalA1
//!             B1    nB1       pB1        totalB1
//!                   total_no  total_yes  total
//! ```
use crate::constants::MARGINAL_ROW;
use crate::dataset::Dataset;
use crate::errors::TreeError;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// What to do with a row that lacks the row or the column attribute.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MissingPolicy {
    /// Exclude the row from the counts.
    #[default]
    Skip,
    /// Fail with `TreeError::MissingAttribute`.
    Error,
}

#[derive(Clone, Debug)]
pub struct ConfusionMatrix {
    row_label: String,
    column_label: String,
    row_values: Vec<String>,
    column_values: Vec<String>,
    counts: HashMap<(String, String), usize>,
    row_totals: HashMap<String, usize>,
    column_totals: HashMap<String, usize>,
    total: usize,
}

impl ConfusionMatrix {
    fn empty(row_label: &str, column_label: &str) -> Self {
        ConfusionMatrix {
            row_label: row_label.to_string(),
            column_label: column_label.to_string(),
            row_values: Vec::new(),
            column_values: Vec::new(),
            counts: HashMap::new(),
            row_totals: HashMap::new(),
            column_totals: HashMap::new(),
            total: 0,
        }
    }

    /// Cross-tabulate `row_label` against `column_label` over every row of `dataset`.
    ///
    /// * `dataset` - Rows to count.
    /// * `row_label` - Name of the candidate attribute.
    /// * `column_label` - Name of the outcome attribute.
    /// * `policy` - Treatment of rows that lack either attribute.
    pub fn build(
        dataset: &Dataset,
        row_label: &str,
        column_label: &str,
        policy: MissingPolicy,
    ) -> Result<Self, TreeError> {
        let mut matrix = ConfusionMatrix::empty(row_label, column_label);
        for instance in dataset.iter() {
            let (row, column) = match (instance.value(row_label), instance.value(column_label)) {
                (Some(row), Some(column)) => (row, column),
                (row, _) => match policy {
                    MissingPolicy::Skip => continue,
                    MissingPolicy::Error => {
                        let missing = if row.is_none() { row_label } else { column_label };
                        return Err(TreeError::MissingAttribute(missing.to_string()));
                    }
                },
            };
            matrix.add(row, column);
        }
        Ok(matrix)
    }

    /// Tabulate `column_label` against a single constant row.
    /// Its purity is the impurity of the column distribution itself.
    pub fn marginal(dataset: &Dataset, column_label: &str, policy: MissingPolicy) -> Result<Self, TreeError> {
        let mut matrix = ConfusionMatrix::empty(MARGINAL_ROW, column_label);
        for instance in dataset.iter() {
            match instance.value(column_label) {
                Some(column) => matrix.add(MARGINAL_ROW, column),
                None if policy == MissingPolicy::Skip => continue,
                None => return Err(TreeError::MissingAttribute(column_label.to_string())),
            }
        }
        Ok(matrix)
    }

    fn add(&mut self, row: &str, column: &str) {
        if !self.row_totals.contains_key(row) {
            self.row_values.push(row.to_string());
        }
        if !self.column_totals.contains_key(column) {
            self.column_values.push(column.to_string());
        }
        *self.counts.entry((row.to_string(), column.to_string())).or_insert(0) += 1;
        *self.row_totals.entry_ref(row).or_insert(0) += 1;
        *self.column_totals.entry_ref(column).or_insert(0) += 1;
        self.total += 1;
    }

    /// Count of rows with `row` and `column`, 0 when absent.
    pub fn count_at(&self, row: &str, column: &str) -> usize {
        self.counts
            .get(&(row.to_string(), column.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn row_total(&self, row: &str) -> usize {
        self.row_totals.get(row).copied().unwrap_or(0)
    }

    pub fn column_total(&self, column: &str) -> usize {
        self.column_totals.get(column).copied().unwrap_or(0)
    }

    /// Number of rows that contributed to the matrix.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Row values in the order they were first encountered.
    pub fn row_values(&self) -> &[String] {
        &self.row_values
    }

    /// Column values in the order they were first encountered.
    pub fn column_values(&self) -> &[String] {
        &self.column_values
    }

    pub fn row_label(&self) -> &str {
        &self.row_label
    }

    pub fn column_label(&self) -> &str {
        &self.column_label
    }

    /// The candidate attribute is constant and carries no information.
    pub fn is_useless(&self) -> bool {
        self.row_totals.values().filter(|t| **t > 0).count() == 1
    }

    /// The outcome is constant, the partition is already pure.
    pub fn is_same_label(&self) -> bool {
        self.column_totals.values().filter(|t| **t > 0).count() == 1
    }
}

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} \\ {}", self.row_label, self.column_label)?;
        for column in self.column_values.iter() {
            write!(f, "\t{}", column)?;
        }
        writeln!(f, "\ttotal")?;
        for row in self.row_values.iter() {
            write!(f, "{}", row)?;
            for column in self.column_values.iter() {
                write!(f, "\t{}", self.count_at(row, column))?;
            }
            writeln!(f, "\t{}", self.row_total(row))?;
        }
        write!(f, "total")?;
        for column in self.column_values.iter() {
            write!(f, "\t{}", self.column_total(column))?;
        }
        writeln!(f, "\t{}", self.total)
    }
}
