use crate::builder::config::*;
use crate::confusion_matrix::ConfusionMatrix;
use crate::constants::ROOT_PARTITION;
use crate::data::Attribute;
use crate::dataset::Dataset;
use crate::discretizer::{Discretization, Discretizer};
use crate::errors::TreeError;
use crate::node::{Branch, Node};
use crate::purity_functions::{Purity, PurityFunction};
use crate::tree::tree::Tree;
use crate::utils::{validate_output_classes, validate_positive_float_parameter};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::time::Instant;

/// ID3 tree builder
#[derive(Clone, Default)]
pub struct TreeBuilder {
    pub cfg: TreeConfig,
}

impl TreeBuilder {
    /// Create a builder from a configuration.
    ///
    /// * `cfg` - Purity function, strategy and training options. See `TreeConfig`.
    pub fn new(cfg: TreeConfig) -> Result<Self, TreeError> {
        let builder = TreeBuilder { cfg };
        builder.validate_parameters()?;
        Ok(builder)
    }

    pub fn validate_parameters(&self) -> Result<(), TreeError> {
        if let Strategy::Extended {
            output_classes,
            pruning_threshold,
        } = &self.cfg.strategy
        {
            validate_output_classes(output_classes)?;
            validate_positive_float_parameter(*pruning_threshold, "pruning_threshold")?;
        }
        if self.cfg.num_threads == Some(0) {
            return Err(TreeError::InvalidConfiguration(
                "num_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Train a tree on a dataset.
    ///
    /// * `dataset` - Labeled rows. Attributes of the first row are the split candidates.
    /// * `outcome` - Name of the attribute to predict, it replaces the outcome of `dataset`.
    pub fn train(&self, dataset: &Dataset, outcome: &str) -> Result<Tree, TreeError> {
        self.validate_parameters()?;
        dataset.validate(outcome)?;
        let start = Instant::now();

        let discretizer = match &self.cfg.strategy {
            Strategy::Baseline => None,
            Strategy::Extended { output_classes, .. } => Some(Discretizer::new(output_classes.clone())?),
        };
        let pruning_threshold = match &self.cfg.strategy {
            Strategy::Baseline => None,
            Strategy::Extended { pruning_threshold, .. } => Some(*pruning_threshold),
        };
        let grower = Grower {
            cfg: &self.cfg,
            outcome,
            discretizer,
            pruning_threshold,
        };

        let num_threads = match self.cfg.num_threads {
            Some(num_threads) => num_threads,
            None => std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| TreeError::InvalidConfiguration(e.to_string()))?;

        let root_data = dataset.clone().with_outcome(outcome);
        let n_rows = root_data.len();
        let root = pool.install(|| grower.grow(root_data))?;
        let tree = Tree::new(root, self.cfg.purity.clone(), outcome.to_string());

        info!(
            "Trained tree for {} on {} rows: {} nodes, {} leaves, depth {}, {:.3} seconds.",
            outcome,
            n_rows,
            tree.n_nodes,
            tree.n_leaves,
            tree.depth,
            start.elapsed().as_secs_f32()
        );
        Ok(tree)
    }
}

/// Train a tree with default options.
///
/// * `dataset` - Labeled rows.
/// * `outcome` - Name of the attribute to predict.
/// * `purity` - Impurity measure used to rank split candidates.
/// * `strategy` - `Strategy::Baseline` or `Strategy::Extended`.
pub fn train(dataset: &Dataset, outcome: &str, purity: Purity, strategy: Strategy) -> Result<Tree, TreeError> {
    TreeBuilder::default()
        .set_purity(purity)
        .set_strategy(strategy)
        .train(dataset, outcome)
}

/// Best split candidate of a node.
struct Candidate {
    attribute: String,
    purity: f64,
    matrix: ConfusionMatrix,
}

enum Expansion {
    Leaf(Node),
    /// Children are listed in branch order, each with the rows it receives.
    Split {
        split_attribute: String,
        purity: f64,
        dataset: Option<Dataset>,
        children: Vec<(Attribute, Dataset)>,
    },
}

/// An expanded node, branches point at the slots of their children.
enum Slot {
    Leaf(Node),
    Split {
        split_attribute: String,
        purity: f64,
        dataset: Option<Dataset>,
        branches: Vec<(Attribute, usize)>,
    },
}

/// State shared by every node of one training run.
struct Grower<'a> {
    cfg: &'a TreeConfig,
    outcome: &'a str,
    discretizer: Option<Discretizer>,
    pruning_threshold: Option<f64>,
}

impl Grower<'_> {
    fn retain(&self, dataset: Dataset) -> Option<Dataset> {
        if self.cfg.retain_datasets {
            Some(dataset)
        } else {
            None
        }
    }

    fn leaf(&self, dataset: Dataset, purity: f64, depth: usize) -> Result<Node, TreeError> {
        let label = dataset
            .majority_value(self.outcome)
            .ok_or_else(|| TreeError::MissingAttribute(self.outcome.to_string()))?;
        if self.cfg.log_nodes {
            debug!(
                "leaf depth={} rows={} label={} purity={:.4}",
                depth,
                dataset.len(),
                label,
                purity
            );
        }
        Ok(Node::terminal(label, purity, self.retain(dataset)))
    }

    /// Discretize the declared continuous attributes of a node's rows.
    ///
    /// Returns the rewritten copy, the discretizations and the attributes that
    /// could not be discretized at this node.
    fn discretize(&self, dataset: &Dataset) -> Result<(Option<Dataset>, Vec<Discretization>, Vec<String>), TreeError> {
        let discretizer = match &self.discretizer {
            Some(discretizer) => discretizer,
            None => return Ok((None, Vec::new(), Vec::new())),
        };
        let mut discretizations = Vec::new();
        let mut degenerate = Vec::new();
        for name in dataset.continuous_attributes() {
            match discretizer.discretize_attribute(dataset, name) {
                Ok(d) => discretizations.push(d),
                Err(TreeError::DegenerateDiscretization(..)) => degenerate.push(name.clone()),
                Err(e) => return Err(e),
            }
        }
        let mut binned = dataset.clone();
        for d in discretizations.iter() {
            d.apply(&mut binned)?;
        }
        Ok((Some(binned), discretizations, degenerate))
    }

    /// Attribute with the lowest purity, the first one wins ties.
    fn best_candidate(&self, scan: &Dataset, excluded: &[String]) -> Result<Option<Candidate>, TreeError> {
        let mut best: Option<Candidate> = None;
        for name in scan.schema() {
            if name == self.outcome || excluded.iter().any(|e| e == name) {
                continue;
            }
            let matrix = ConfusionMatrix::build(scan, name, self.outcome, self.cfg.missing_policy)?;
            if matrix.is_empty() || matrix.is_useless() {
                continue;
            }
            let purity = self.cfg.purity.calculate(&matrix);
            if best.as_ref().map_or(true, |b| purity < b.purity) {
                best = Some(Candidate {
                    attribute: name.to_string(),
                    purity,
                    matrix,
                });
            }
        }
        Ok(best)
    }

    /// Turn the rows of one node into a leaf or a split with its child partitions.
    fn expand(&self, dataset: Dataset, depth: usize) -> Result<Expansion, TreeError> {
        let (binned, discretizations, degenerate) = self.discretize(&dataset)?;
        let scan = binned.as_ref().unwrap_or(&dataset);

        let best = match self.best_candidate(scan, &degenerate)? {
            Some(best) => best,
            None => {
                let marginal = ConfusionMatrix::marginal(&dataset, self.outcome, self.cfg.missing_policy)?;
                let purity = self.cfg.purity.calculate(&marginal);
                return self.leaf(dataset, purity, depth).map(Expansion::Leaf);
            }
        };
        if best.matrix.is_same_label() {
            return self.leaf(dataset, best.purity, depth).map(Expansion::Leaf);
        }
        if self.pruning_threshold.is_some_and(|t| best.purity >= t) {
            return self.leaf(dataset, best.purity, depth).map(Expansion::Leaf);
        }
        if self.cfg.max_depth.is_some_and(|m| depth >= m) {
            return self.leaf(dataset, best.purity, depth).map(Expansion::Leaf);
        }

        // (branch attribute, bin or value selecting the rows)
        let splits: Vec<(Attribute, Attribute)> = match discretizations.iter().find(|d| d.attribute == best.attribute) {
            Some(d) => {
                let threshold = d.split_point.to_string();
                vec![
                    (
                        Attribute::continuous(&d.attribute, threshold.clone()),
                        Attribute::new(&d.attribute, d.upper.clone()),
                    ),
                    (
                        Attribute::continuous(&d.attribute, threshold),
                        Attribute::new(&d.attribute, d.lower.clone()),
                    ),
                ]
            }
            None => scan
                .distinct_values(&best.attribute)
                .into_iter()
                .map(|v| {
                    let a = Attribute::new(&best.attribute, v);
                    (a.clone(), a)
                })
                .collect(),
        };

        let mut children = Vec::with_capacity(splits.len());
        for (attribute, selector) in splits {
            let child = dataset.split_aligned(scan, &selector);
            if child.is_empty() {
                return Err(TreeError::EmptyPartition(selector.to_string()));
            }
            if child.len() >= dataset.len() {
                warn!(
                    "Partition {} did not shrink the {} rows of its parent, creating a leaf instead.",
                    selector,
                    dataset.len()
                );
                return self.leaf(dataset, best.purity, depth).map(Expansion::Leaf);
            }
            children.push((attribute, child));
        }

        if self.cfg.log_nodes {
            debug!(
                "split depth={} rows={} attribute={} branches={} purity={:.4}",
                depth,
                dataset.len(),
                best.attribute,
                children.len(),
                best.purity
            );
        }

        Ok(Expansion::Split {
            split_attribute: best.attribute,
            purity: best.purity,
            dataset: self.retain(dataset),
            children,
        })
    }

    /// Grow the tree level by level from the root rows.
    ///
    /// The nodes of one level are expanded in parallel. Every expanded node is
    /// stored in a flat list, children always after their parent, and the
    /// list is folded into the tree from the back once no level is left.
    fn grow(&self, dataset: Dataset) -> Result<Node, TreeError> {
        let mut slots: Vec<Slot> = Vec::new();
        let mut level = vec![(dataset, 0)];
        while !level.is_empty() {
            let expanded = level
                .into_par_iter()
                .map(|(dataset, depth)| self.expand(dataset, depth).map(|e| (depth, e)))
                .collect::<Result<Vec<_>, _>>()?;
            level = Vec::new();
            let mut next = slots.len() + expanded.len();
            for (depth, expansion) in expanded {
                let slot = match expansion {
                    Expansion::Leaf(node) => Slot::Leaf(node),
                    Expansion::Split {
                        split_attribute,
                        purity,
                        dataset,
                        children,
                    } => {
                        let mut branches = Vec::with_capacity(children.len());
                        for (attribute, child) in children {
                            branches.push((attribute, next));
                            level.push((child, depth + 1));
                            next += 1;
                        }
                        Slot::Split {
                            split_attribute,
                            purity,
                            dataset,
                            branches,
                        }
                    }
                };
                slots.push(slot);
            }
        }

        let mut built: Vec<Option<Node>> = Vec::with_capacity(slots.len());
        built.resize_with(slots.len(), || None);
        for (idx, slot) in slots.into_iter().enumerate().rev() {
            let node = match slot {
                Slot::Leaf(node) => node,
                Slot::Split {
                    split_attribute,
                    purity,
                    dataset,
                    branches,
                } => {
                    let branches = branches
                        .into_iter()
                        .map(|(attribute, child)| match built[child].take() {
                            Some(node) => Ok(Branch { attribute, node }),
                            None => Err(TreeError::EmptyPartition(attribute.to_string())),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Node::inner(split_attribute, branches, purity, dataset)
                }
            };
            built[idx] = Some(node);
        }
        built
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| TreeError::EmptyPartition(ROOT_PARTITION.to_string()))
    }
}
