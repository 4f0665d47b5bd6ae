//! Tree Configuration
//!
//! Defines the configuration structures and enums used by the `TreeBuilder`,
//! including the induction strategy and the JSON persistence of a configuration.
use crate::confusion_matrix::MissingPolicy;
use crate::errors::TreeError;
use crate::purity_functions::Purity;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the tree is grown.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub enum Strategy {
    /// Every attribute is treated as categorical, no pruning.
    #[default]
    Baseline,
    /// Continuous attributes are discretized again at every node, and a node
    /// only splits when its best purity is below `pruning_threshold`.
    Extended {
        /// Ordered bin labels, values below the split point take the first one.
        output_classes: Vec<String>,
        pruning_threshold: f64,
    },
}

fn default_retain_datasets() -> bool {
    true
}

/// Configuration for the `TreeBuilder`.
#[derive(Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Impurity of a split candidate, lower is better.
    #[serde(default)]
    pub purity: Purity,
    /// Induction strategy.
    #[serde(default)]
    pub strategy: Strategy,
    /// Treatment of rows lacking a candidate attribute.
    #[serde(default)]
    pub missing_policy: MissingPolicy,
    /// Nodes at this depth become leaves.
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Number of threads used to grow sibling branches.
    #[serde(default)]
    pub num_threads: Option<usize>,
    /// Keep the sub-dataset of every node in the trained tree.
    #[serde(default = "default_retain_datasets")]
    pub retain_datasets: bool,
    /// Log every node as it is created.
    #[serde(default)]
    pub log_nodes: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            purity: Purity::Entropy,
            strategy: Strategy::Baseline,
            missing_policy: MissingPolicy::Skip,
            max_depth: None,
            num_threads: None,
            retain_datasets: true,
            log_nodes: false,
        }
    }
}

/// IO
pub trait TreeIO: Serialize + DeserializeOwned + Sized {
    /// Save a configuration as a json object to a file.
    ///
    /// * `path` - Path to save the configuration.
    fn save_config<P: AsRef<Path>>(&self, path: P) -> Result<(), TreeError> {
        fs::write(path, self.json_dump()?).map_err(|e| TreeError::UnableToWrite(e.to_string()))
    }

    /// Dump a configuration as a json object
    fn json_dump(&self) -> Result<String, TreeError> {
        serde_json::to_string(self).map_err(|e| TreeError::UnableToWrite(e.to_string()))
    }

    /// Load a configuration from a json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, TreeError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| TreeError::UnableToRead(e.to_string()))
    }

    /// Load a configuration from a path to a json object.
    ///
    /// * `path` - Path to load the configuration from.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, TreeError> {
        let json_str = fs::read_to_string(path).map_err(|e| TreeError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl TreeIO for TreeConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn extended() -> Strategy {
        Strategy::Extended {
            output_classes: vec!["2".to_string(), "1".to_string()],
            pruning_threshold: 0.1,
        }
    }

    #[test]
    fn test_tree_config_default() {
        let config = TreeConfig::default();
        assert_eq!(config.strategy, Strategy::Baseline);
        assert_eq!(config.missing_policy, MissingPolicy::Skip);
        assert!(config.retain_datasets);
        assert!(!config.log_nodes);
        assert_eq!(config.purity.to_string(), "Entropy");
    }

    #[test]
    fn test_tree_io_json() {
        let config = TreeConfig {
            purity: Purity::Gini,
            strategy: extended(),
            max_depth: Some(4),
            ..TreeConfig::default()
        };
        let json = config.json_dump().unwrap();
        let config2 = TreeConfig::from_json(&json).unwrap();
        assert_eq!(config2.strategy, extended());
        assert_eq!(config2.max_depth, Some(4));
        assert_eq!(config2.purity.to_string(), "Gini");
    }

    #[test]
    fn test_tree_io_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tree.json");
        let config = TreeConfig {
            num_threads: Some(2),
            retain_datasets: false,
            ..TreeConfig::default()
        };
        config.save_config(&file_path).unwrap();
        let config2 = TreeConfig::load_config(&file_path).unwrap();
        assert_eq!(config2.num_threads, Some(2));
        assert!(!config2.retain_datasets);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let json = r#"{"strategy": {"Extended": {"output_classes": ["a", "b"], "pruning_threshold": 0.5}}}"#;
        let config = TreeConfig::from_json(json).unwrap();
        assert!(config.retain_datasets);
        assert_eq!(config.max_depth, None);
        assert!(matches!(config.strategy, Strategy::Extended { pruning_threshold, .. } if pruning_threshold == 0.5));
    }

    #[test]
    fn test_read_errors() {
        assert!(matches!(TreeConfig::from_json("{"), Err(TreeError::UnableToRead(_))));
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(TreeConfig::load_config(missing), Err(TreeError::UnableToRead(_))));
    }
}
