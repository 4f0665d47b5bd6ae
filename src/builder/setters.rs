use crate::builder::config::Strategy;
use crate::builder::core::TreeBuilder;
use crate::confusion_matrix::MissingPolicy;
use crate::purity_functions::Purity;

impl TreeBuilder {
    // Set methods for paramters

    /// Set the purity function on the builder.
    /// * `purity` - Impurity measure used to rank split candidates.
    pub fn set_purity(mut self, purity: Purity) -> Self {
        self.cfg.purity = purity;
        self
    }

    /// Set the induction strategy on the builder.
    /// * `strategy` - `Strategy::Baseline`, or `Strategy::Extended` to discretize
    ///   continuous attributes at every node and pre-prune weak splits.
    pub fn set_strategy(mut self, strategy: Strategy) -> Self {
        self.cfg.strategy = strategy;
        self
    }

    /// Set the treatment of rows lacking a candidate attribute.
    /// * `missing_policy` - Skip such rows, or fail with `TreeError::MissingAttribute`.
    pub fn set_missing_policy(mut self, missing_policy: MissingPolicy) -> Self {
        self.cfg.missing_policy = missing_policy;
        self
    }

    /// Set the maximum depth on the builder.
    /// * `max_depth` - Nodes at this depth become leaves, `None` grows until the partitions are pure.
    pub fn set_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.cfg.max_depth = max_depth;
        self
    }

    /// Set the number of threads on the builder.
    /// * `num_threads` - Set the number of threads to be used during training.
    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.cfg.num_threads = num_threads;
        self
    }

    /// Set whether nodes keep the sub-dataset they were built from.
    /// * `retain_datasets` - Disable to reduce the memory held by large trees.
    pub fn set_retain_datasets(mut self, retain_datasets: bool) -> Self {
        self.cfg.retain_datasets = retain_datasets;
        self
    }

    /// Set per node logging on the builder.
    /// * `log_nodes` - Log every node at debug level as it is created.
    pub fn set_log_nodes(mut self, log_nodes: bool) -> Self {
        self.cfg.log_nodes = log_nodes;
        self
    }
}
