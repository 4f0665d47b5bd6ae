//! Dataset
//!
//! An ordered collection of labeled instances, together with the name of the
//! outcome attribute and the names of the attributes that hold continuous values.
use crate::data::{Attribute, Instance};
use crate::errors::TreeError;
use hashbrown::HashMap;
use std::fmt::{self, Display};

/// Labeled rows used to train and score a tree.
///
/// Cloning a dataset produces independent copies of every instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    instances: Vec<Instance>,
    outcome: String,
    continuous: Vec<String>,
}

impl Dataset {
    /// Create an empty dataset predicting `outcome`.
    pub fn new(outcome: impl Into<String>) -> Self {
        Dataset {
            instances: Vec::new(),
            outcome: outcome.into(),
            continuous: Vec::new(),
        }
    }

    /// Create a dataset from existing instances.
    pub fn from_instances(outcome: impl Into<String>, instances: Vec<Instance>) -> Self {
        Dataset {
            instances,
            outcome: outcome.into(),
            continuous: Vec::new(),
        }
    }

    /// Declare the attributes to discretize before they are used as split candidates.
    /// Duplicated names are ignored.
    pub fn with_continuous_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.continuous.clear();
        for name in names {
            let name = name.into();
            if !self.continuous.contains(&name) {
                self.continuous.push(name);
            }
        }
        self
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }

    pub fn push(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub(crate) fn instances_mut(&mut self) -> &mut [Instance] {
        &mut self.instances
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.instances.iter()
    }

    pub fn outcome_name(&self) -> &str {
        &self.outcome
    }

    pub fn continuous_attributes(&self) -> &[String] {
        &self.continuous
    }

    pub fn is_continuous(&self, name: &str) -> bool {
        self.continuous.iter().any(|c| c == name)
    }

    /// Attribute names of the first instance, the schema is assumed uniform.
    pub fn schema(&self) -> Vec<&str> {
        match self.instances.first() {
            Some(instance) => instance.names().collect(),
            None => Vec::new(),
        }
    }

    /// Values of `name` for every row, `None` where the row lacks it.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.instances.iter().map(move |i| i.value(name))
    }

    /// Distinct values of `name` in the order they are first encountered.
    pub fn distinct_values(&self, name: &str) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        for value in self.values(name).flatten() {
            if !result.iter().any(|r| r == value) {
                result.push(value.to_string());
            }
        }
        result
    }

    pub fn outcome_values(&self) -> Vec<Option<&str>> {
        self.values(&self.outcome).collect()
    }

    /// The value of `name` that occurs most often.
    /// Ties resolve to the value encountered first.
    pub fn majority_value(&self, name: &str) -> Option<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for value in self.values(name).flatten() {
            let count = counts.entry(value).or_insert_with(|| {
                order.push(value);
                0
            });
            *count += 1;
        }
        let mut best: Option<(&str, usize)> = None;
        for value in order {
            let count = counts[value];
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((value, count));
            }
        }
        best.map(|(v, _)| v.to_string())
    }

    /// Copy of the metadata without any rows.
    fn empty_like(&self) -> Dataset {
        Dataset {
            instances: Vec::new(),
            outcome: self.outcome.clone(),
            continuous: self.continuous.clone(),
        }
    }

    /// Rows that contain exactly `attribute`.
    pub fn split(&self, attribute: &Attribute) -> Dataset {
        let mut result = self.empty_like();
        result.instances = self.instances.iter().filter(|i| i.contains(attribute)).cloned().collect();
        result
    }

    /// Rows of `self` whose aligned row in `binned` contains `attribute`.
    ///
    /// `binned` must have the same number of rows as `self`, in the same order,
    /// as produced by discretizing `self`.
    pub fn split_aligned(&self, binned: &Dataset, attribute: &Attribute) -> Dataset {
        debug_assert_eq!(self.len(), binned.len());
        let mut result = self.empty_like();
        result.instances = self
            .instances
            .iter()
            .zip(binned.instances.iter())
            .filter(|(_, b)| b.contains(attribute))
            .map(|(i, _)| i.clone())
            .collect();
        result
    }

    /// Check that the dataset can be trained on to predict `outcome`.
    pub fn validate(&self, outcome: &str) -> Result<(), TreeError> {
        let first = match self.instances.first() {
            Some(first) => first,
            None => return Err(TreeError::EmptyPartition(crate::constants::ROOT_PARTITION.to_string())),
        };
        if first.get(outcome).is_none() {
            return Err(TreeError::InvalidConfiguration(format!(
                "outcome attribute {} is not part of the dataset schema",
                outcome
            )));
        }
        for instance in self.instances.iter() {
            if instance.get(outcome).is_none() {
                return Err(TreeError::MissingAttribute(outcome.to_string()));
            }
            if let Some(name) = self.continuous.iter().find(|c| instance.get(c).is_none()) {
                return Err(TreeError::MissingAttribute(name.clone()));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Dataset(outcome={}, rows={})", self.outcome, self.len())?;
        for instance in self.instances.iter() {
            writeln!(f, "  {}", instance)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Dataset {
        let rows = [
            ("sunny", "hot", "no"),
            ("rainy", "mild", "yes"),
            ("rainy", "hot", "yes"),
            ("sunny", "mild", "no"),
            ("overcast", "hot", "yes"),
        ];
        let mut dataset = Dataset::new("Y");
        for (a, t, y) in rows {
            dataset.push(Instance::from_pairs(&[("A", a), ("T", t), ("Y", y)]).unwrap());
        }
        dataset
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let dataset = weather();
        assert_eq!(dataset.distinct_values("A"), vec!["sunny", "rainy", "overcast"]);
        assert_eq!(dataset.distinct_values("missing"), Vec::<String>::new());
        assert_eq!(dataset.schema(), vec!["A", "T", "Y"]);
    }

    #[test]
    fn test_majority_value() {
        let dataset = weather();
        assert_eq!(dataset.majority_value("Y").as_deref(), Some("yes"));
        // "hot" appears three times
        assert_eq!(dataset.majority_value("T").as_deref(), Some("hot"));
        assert_eq!(Dataset::new("Y").majority_value("Y"), None);
    }

    #[test]
    fn test_majority_value_tie_goes_to_first_seen() {
        let mut dataset = Dataset::new("Y");
        for y in ["b", "a", "a", "b"] {
            dataset.push(Instance::from_pairs(&[("Y", y)]).unwrap());
        }
        assert_eq!(dataset.majority_value("Y").as_deref(), Some("b"));
    }

    #[test]
    fn test_split() {
        let dataset = weather().with_continuous_attributes(["T"]);
        let sunny = dataset.split(&Attribute::new("A", "sunny"));
        assert_eq!(sunny.len(), 2);
        assert_eq!(sunny.outcome_name(), "Y");
        assert_eq!(sunny.continuous_attributes().to_vec(), vec!["T".to_string()]);
        assert!(sunny.iter().all(|i| i.value("Y") == Some("no")));
        assert!(dataset.split(&Attribute::new("A", "snowy")).is_empty());
    }

    #[test]
    fn test_split_aligned() {
        let dataset = weather();
        let mut binned = dataset.clone();
        for (i, instance) in binned.instances_mut().iter_mut().enumerate() {
            instance.set_value("T", if i % 2 == 0 { "even" } else { "odd" });
        }
        let even = dataset.split_aligned(&binned, &Attribute::new("T", "even"));
        assert_eq!(even.len(), 3);
        // original values are kept
        assert_eq!(even.distinct_values("T"), vec!["hot"]);
    }

    #[test]
    fn test_clone_is_deep() {
        let dataset = weather();
        let mut copy = dataset.clone();
        copy.instances_mut()[0].set_value("A", "snowy");
        assert_eq!(dataset.instances()[0].value("A"), Some("sunny"));
        assert_eq!(copy.instances()[0].value("A"), Some("snowy"));
    }

    #[test]
    fn test_validate() {
        let dataset = weather();
        assert!(dataset.validate("Y").is_ok());
        assert!(matches!(dataset.validate("Z"), Err(TreeError::InvalidConfiguration(_))));
        assert!(matches!(Dataset::new("Y").validate("Y"), Err(TreeError::EmptyPartition(_))));

        let mut ragged = weather().with_continuous_attributes(["T"]);
        ragged.push(Instance::from_pairs(&[("A", "sunny"), ("Y", "no")]).unwrap());
        assert_eq!(ragged.validate("Y"), Err(TreeError::MissingAttribute("T".to_string())));

        let mut unlabeled = weather();
        unlabeled.push(Instance::from_pairs(&[("A", "sunny"), ("T", "hot")]).unwrap());
        assert_eq!(unlabeled.validate("Y"), Err(TreeError::MissingAttribute("Y".to_string())));
    }
}
