use super::tree::Tree;
use crate::constants::ROOT_PARTITION;
use crate::data::Instance;
use crate::dataset::Dataset;
use crate::errors::TreeError;
use crate::node::Node;
use rayon::prelude::*;

impl Tree {
    /// Predict the label of one instance.
    pub fn evaluate(&self, instance: &Instance) -> Result<&str, TreeError> {
        let mut node = &self.root;
        loop {
            match node {
                Node::Terminal(leaf) => return Ok(&leaf.label),
                Node::Inner(inner) => node = inner.select(instance)?,
            }
        }
    }

    /// Predict the label of every row, in row order.
    pub fn evaluate_dataset(&self, dataset: &Dataset) -> Result<Vec<String>, TreeError> {
        dataset
            .instances()
            .par_iter()
            .map(|i| self.evaluate(i).map(|l| l.to_string()))
            .collect()
    }

    /// Share of rows whose predicted label equals the value of the tree's outcome attribute.
    pub fn accuracy(&self, dataset: &Dataset) -> Result<f64, TreeError> {
        if dataset.is_empty() {
            return Err(TreeError::EmptyPartition(ROOT_PARTITION.to_string()));
        }
        let predictions = self.evaluate_dataset(dataset)?;
        let hits = predictions
            .iter()
            .zip(dataset.values(&self.outcome))
            .filter(|(p, y)| Some(p.as_str()) == *y)
            .count();
        Ok(hits as f64 / dataset.len() as f64)
    }
}
