//! Discretizer
//!
//! Supervised binning of continuous attributes. The values of an attribute are
//! placed on the real axis together with the outcome of their row, every point
//! where two neighbouring outcomes differ becomes a candidate threshold, and the
//! threshold that misclassifies the fewest training rows wins.
//!
//! Only one threshold is ever chosen, so values are always split into the first
//! two output classes. Any further class is unreachable.
use crate::dataset::Dataset;
use crate::errors::TreeError;
use crate::utils::{parse_numeric, validate_output_classes};
use log::debug;

/// Result of discretizing one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Discretization {
    pub attribute: String,
    /// Values below go to `lower`, values at or above go to `upper`.
    pub split_point: f64,
    pub lower: String,
    pub upper: String,
    /// Every distinct value in ascending order with the label it is mapped to.
    pub assignments: Vec<(f64, String)>,
    /// Training rows whose outcome differs from their bin label.
    pub misclassified: usize,
    /// Number of candidate split points that were evaluated.
    pub candidates: usize,
}

impl Discretization {
    /// Bin label of a value.
    pub fn label_for(&self, value: f64) -> &str {
        if value < self.split_point {
            &self.lower
        } else {
            &self.upper
        }
    }

    /// Rewrite the attribute of every row of `dataset` to its bin label.
    pub fn apply(&self, dataset: &mut Dataset) -> Result<(), TreeError> {
        for instance in dataset.instances_mut().iter_mut() {
            let value = match instance.value(&self.attribute) {
                Some(v) => parse_numeric(&self.attribute, v)?,
                None => return Err(TreeError::MissingAttribute(self.attribute.clone())),
            };
            let label = self.label_for(value).to_string();
            instance.set_value(&self.attribute, label);
        }
        Ok(())
    }
}

/// A discretized copy of a dataset and the discretizations used to produce it.
#[derive(Debug, Clone)]
pub struct DiscretizedDataset {
    pub dataset: Dataset,
    pub discretizations: Vec<Discretization>,
}

impl DiscretizedDataset {
    pub fn get(&self, attribute: &str) -> Option<&Discretization> {
        self.discretizations.iter().find(|d| d.attribute == attribute)
    }
}

#[derive(Debug, Clone)]
pub struct Discretizer {
    output_classes: Vec<String>,
}

impl Discretizer {
    /// Create a discretizer.
    ///
    /// * `output_classes` - Ordered bin labels, at least two distinct values.
    ///   Values below the split point take the first label, the others the second.
    pub fn new(output_classes: Vec<String>) -> Result<Self, TreeError> {
        validate_output_classes(&output_classes)?;
        Ok(Discretizer { output_classes })
    }

    /// Create a discretizer with the labels `"0"` to `"n - 1"`.
    pub fn with_class_count(n: usize) -> Result<Self, TreeError> {
        Discretizer::new((0..n).map(|i| i.to_string()).collect())
    }

    pub fn output_classes(&self) -> &[String] {
        &self.output_classes
    }

    /// Find the split point of one continuous attribute.
    ///
    /// * `dataset` - Rows holding the continuous values and their outcomes.
    /// * `attribute` - Name of the attribute to discretize.
    pub fn discretize_attribute(&self, dataset: &Dataset, attribute: &str) -> Result<Discretization, TreeError> {
        let outcome = dataset.outcome_name();
        let mut points: Vec<(f64, &str)> = Vec::with_capacity(dataset.len());
        for instance in dataset.iter() {
            let value = instance
                .value(attribute)
                .ok_or_else(|| TreeError::MissingAttribute(attribute.to_string()))?;
            let label = instance
                .value(outcome)
                .ok_or_else(|| TreeError::MissingAttribute(outcome.to_string()))?;
            points.push((parse_numeric(attribute, value)?, label));
        }
        // stable, rows with equal values keep their original order
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut distinct: Vec<f64> = points.iter().map(|p| p.0).collect();
        distinct.dedup();
        if distinct.len() < 2 {
            return Err(TreeError::DegenerateDiscretization(
                attribute.to_string(),
                format!("{} distinct values", distinct.len()),
            ));
        }

        let candidates: Vec<f64> = points
            .windows(2)
            .filter(|w| w[0].1 != w[1].1)
            .map(|w| (w[0].0 + w[1].0) / 2.0)
            .collect();
        if candidates.is_empty() {
            return Err(TreeError::DegenerateDiscretization(
                attribute.to_string(),
                "no candidate split points".to_string(),
            ));
        }

        let (lower, upper) = (&self.output_classes[0], &self.output_classes[1]);
        // prefix counts of rows not labeled `lower` and not labeled `upper`
        let mut not_lower = vec![0usize; points.len() + 1];
        let mut not_upper = vec![0usize; points.len() + 1];
        for (i, (_, label)) in points.iter().enumerate() {
            not_lower[i + 1] = not_lower[i] + usize::from(*label != lower.as_str());
            not_upper[i + 1] = not_upper[i] + usize::from(*label != upper.as_str());
        }
        let total_not_upper = not_upper[points.len()];

        let (mut split_point, mut misclassified) = (candidates[0], usize::MAX);
        for candidate in candidates.iter().copied() {
            let below = points.partition_point(|p| p.0 < candidate);
            let errors = not_lower[below] + total_not_upper - not_upper[below];
            // first candidate wins ties
            if errors < misclassified {
                split_point = candidate;
                misclassified = errors;
            }
        }

        let assignments = distinct
            .into_iter()
            .map(|v| {
                let bin = if v < split_point { lower } else { upper };
                (v, bin.clone())
            })
            .collect();

        debug!(
            "discretized {} at {} with {} misclassified rows out of {} ({} candidates)",
            attribute,
            split_point,
            misclassified,
            points.len(),
            candidates.len()
        );

        Ok(Discretization {
            attribute: attribute.to_string(),
            split_point,
            lower: lower.clone(),
            upper: upper.clone(),
            assignments,
            misclassified,
            candidates: candidates.len(),
        })
    }

    /// Discretize every attribute in `attributes`, returning a rewritten copy of `dataset`.
    /// The input dataset is left untouched.
    pub fn discretize<S: AsRef<str>>(&self, dataset: &Dataset, attributes: &[S]) -> Result<DiscretizedDataset, TreeError> {
        let discretizations = attributes
            .iter()
            .map(|a| self.discretize_attribute(dataset, a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut binned = dataset.clone();
        for discretization in discretizations.iter() {
            discretization.apply(&mut binned)?;
        }
        Ok(DiscretizedDataset {
            dataset: binned,
            discretizations,
        })
    }
}
