//! Node
//!
//! Inner and terminal nodes of a trained tree. A node owns its children, branch
//! order is the order in which decisions are tried during evaluation.
use crate::constants::{RENDER_INDENT, RENDER_PRECISION};
use crate::data::{Attribute, Instance};
use crate::dataset::Dataset;
use crate::errors::TreeError;
use crate::utils::parse_numeric;
use std::fmt::Write;

/// A decision leading from an inner node to one of its children.
#[derive(Debug, Clone)]
pub struct Branch {
    /// Categorical branches hold the value to match, continuous branches the threshold.
    pub attribute: Attribute,
    pub node: Node,
}

#[derive(Debug, Clone)]
pub struct InnerNode {
    pub split_attribute: String,
    pub branches: Vec<Branch>,
    pub purity: f64,
    pub dataset: Option<Dataset>,
}

#[derive(Debug, Clone)]
pub struct TerminalNode {
    pub label: String,
    pub purity: f64,
    pub dataset: Option<Dataset>,
}

#[derive(Debug, Clone)]
pub enum Node {
    Inner(InnerNode),
    Terminal(TerminalNode),
}

impl Node {
    pub fn terminal(label: String, purity: f64, dataset: Option<Dataset>) -> Self {
        Node::Terminal(TerminalNode { label, purity, dataset })
    }

    pub fn inner(split_attribute: String, branches: Vec<Branch>, purity: f64, dataset: Option<Dataset>) -> Self {
        Node::Inner(InnerNode {
            split_attribute,
            branches,
            purity,
            dataset,
        })
    }

    pub fn purity(&self) -> f64 {
        match self {
            Node::Inner(n) => n.purity,
            Node::Terminal(n) => n.purity,
        }
    }

    /// Sub-dataset the node was built from, if it was retained.
    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            Node::Inner(n) => n.dataset.as_ref(),
            Node::Terminal(n) => n.dataset.as_ref(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    pub fn branches(&self) -> &[Branch] {
        match self {
            Node::Inner(n) => &n.branches,
            Node::Terminal(_) => &[],
        }
    }

    /// Every node of the subtree in pre-order, this one first.
    pub fn descendants(&self) -> Vec<(&Node, usize)> {
        let mut visited = Vec::new();
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            visited.push((node, depth));
            stack.extend(node.branches().iter().rev().map(|b| (&b.node, depth + 1)));
        }
        visited
    }

    /// Number of nodes in the subtree, including this one.
    pub fn n_nodes(&self) -> usize {
        self.descendants().len()
    }

    pub fn n_leaves(&self) -> usize {
        self.descendants().iter().filter(|(n, _)| n.is_leaf()).count()
    }

    /// Number of edges on the longest path to a leaf.
    pub fn depth(&self) -> usize {
        self.descendants().iter().map(|(_, d)| *d).max().unwrap_or(0)
    }

    /// Labels of every leaf in render order.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.descendants()
            .into_iter()
            .filter_map(|(n, _)| match n {
                Node::Terminal(t) => Some(t.label.as_str()),
                Node::Inner(_) => None,
            })
            .collect()
    }
}

// Deep trees would overflow the stack with the default recursive drop.
impl Drop for InnerNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.branches);
        while let Some(mut branch) = pending.pop() {
            if let Node::Inner(inner) = &mut branch.node {
                pending.append(&mut inner.branches);
            }
        }
    }
}

impl InnerNode {
    /// True when the branches hold a threshold on a continuous attribute.
    pub fn is_continuous(&self) -> bool {
        self.branches.first().is_some_and(|b| b.attribute.is_continuous())
    }

    /// Pick the child an instance falls into.
    ///
    /// Categorical nodes take the first branch equal to the instance attribute.
    /// Continuous nodes take the first branch when the value is above the
    /// threshold and the second one otherwise.
    pub fn select(&self, instance: &Instance) -> Result<&Node, TreeError> {
        let unmatched = || TreeError::UnmatchedBranch(self.split_attribute.clone());
        let attribute = instance.get(&self.split_attribute).ok_or_else(unmatched)?;
        if self.is_continuous() {
            let (upper, lower) = match self.branches.as_slice() {
                [upper, lower] => (upper, lower),
                _ => return Err(unmatched()),
            };
            let value = parse_numeric(attribute.name(), attribute.value()).map_err(|_| unmatched())?;
            let threshold = parse_numeric(upper.attribute.name(), upper.attribute.value()).map_err(|_| unmatched())?;
            if value > threshold {
                Ok(&upper.node)
            } else {
                Ok(&lower.node)
            }
        } else {
            self.branches
                .iter()
                .find(|b| &b.attribute == attribute)
                .map(|b| &b.node)
                .ok_or_else(unmatched)
        }
    }
}

/// Append the lines of `node` to `out`, `level` is the level of the node's own line.
pub(crate) fn render_node(node: &Node, level: usize, out: &mut String) {
    enum Line<'a> {
        Node(&'a Node, usize),
        Edge(&'a Branch, usize),
    }
    let mut stack = vec![Line::Node(node, level)];
    while let Some(line) = stack.pop() {
        match line {
            Line::Node(Node::Terminal(n), level) => {
                let indent = RENDER_INDENT.repeat(level.saturating_sub(1));
                let _ = writeln!(
                    out,
                    "{}{}) Decision: {}  purity={:.*} *",
                    indent, level, n.label, RENDER_PRECISION, n.purity
                );
            }
            Line::Node(Node::Inner(n), level) => {
                for branch in n.branches.iter().rev() {
                    stack.push(Line::Node(&branch.node, level + 1));
                    stack.push(Line::Edge(branch, level));
                }
            }
            Line::Edge(branch, level) => {
                let indent = RENDER_INDENT.repeat(level.saturating_sub(1));
                let _ = writeln!(
                    out,
                    "{}{}) {}  purity={:.*}",
                    indent,
                    level,
                    branch.attribute,
                    RENDER_PRECISION,
                    branch.node.purity()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str) -> Node {
        Node::terminal(label.to_string(), 0.0, None)
    }

    fn threshold_node() -> InnerNode {
        InnerNode {
            split_attribute: "Elevation".to_string(),
            branches: vec![
                Branch {
                    attribute: Attribute::continuous("Elevation", "250"),
                    node: leaf("2"),
                },
                Branch {
                    attribute: Attribute::continuous("Elevation", "250"),
                    node: leaf("1"),
                },
            ],
            purity: 0.0,
            dataset: None,
        }
    }

    fn label_of(node: &Node) -> &str {
        match node {
            Node::Terminal(n) => &n.label,
            Node::Inner(_) => panic!("expected a leaf"),
        }
    }

    #[test]
    fn test_select_continuous() {
        let node = threshold_node();
        let high = Instance::from_pairs(&[("Elevation", "300")]).unwrap();
        let low = Instance::from_pairs(&[("Elevation", "100")]).unwrap();
        let boundary = Instance::from_pairs(&[("Elevation", "250")]).unwrap();
        assert_eq!(label_of(node.select(&high).unwrap()), "2");
        assert_eq!(label_of(node.select(&low).unwrap()), "1");
        assert_eq!(label_of(node.select(&boundary).unwrap()), "1");

        let word = Instance::from_pairs(&[("Elevation", "high")]).unwrap();
        assert_eq!(
            node.select(&word).unwrap_err(),
            TreeError::UnmatchedBranch("Elevation".to_string())
        );
    }

    #[test]
    fn test_select_malformed_continuous() {
        let mut node = threshold_node();
        node.branches.pop();
        let high = Instance::from_pairs(&[("Elevation", "300")]).unwrap();
        assert!(matches!(node.select(&high), Err(TreeError::UnmatchedBranch(_))));
    }

    #[test]
    fn test_select_categorical() {
        let node = InnerNode {
            split_attribute: "A".to_string(),
            branches: vec![
                Branch {
                    attribute: Attribute::new("A", "sunny"),
                    node: leaf("no"),
                },
                Branch {
                    attribute: Attribute::new("A", "rainy"),
                    node: leaf("yes"),
                },
            ],
            purity: 0.0,
            dataset: None,
        };
        let rainy = Instance::from_pairs(&[("A", "rainy")]).unwrap();
        assert_eq!(label_of(node.select(&rainy).unwrap()), "yes");
        let snowy = Instance::from_pairs(&[("A", "snowy")]).unwrap();
        assert!(matches!(node.select(&snowy), Err(TreeError::UnmatchedBranch(_))));
        let other = Instance::from_pairs(&[("B", "sunny")]).unwrap();
        assert!(matches!(node.select(&other), Err(TreeError::UnmatchedBranch(_))));
    }

    #[test]
    fn test_counts_and_render() {
        let root = Node::Inner(threshold_node());
        assert_eq!(root.n_nodes(), 3);
        assert_eq!(root.n_leaves(), 2);
        assert_eq!(root.depth(), 1);
        assert_eq!(root.leaf_labels(), vec!["2", "1"]);

        let mut out = String::new();
        render_node(&root, 1, &mut out);
        let expected = "1) Elevation=250  purity=0.0000\n  2) Decision: 2  purity=0.0000 *\n1) Elevation=250  purity=0.0000\n  2) Decision: 1  purity=0.0000 *\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_deep_chain_walks_and_drops() {
        let levels = 100_000;
        let mut node = leaf("last");
        for i in 0..levels {
            let mut inner = threshold_node();
            inner.branches[0].node = leaf(&i.to_string());
            inner.branches[1].node = node;
            node = Node::Inner(inner);
        }
        assert_eq!(node.depth(), levels);
        assert_eq!(node.n_leaves(), levels + 1);
        assert_eq!(node.n_nodes(), 2 * levels + 1);
        assert_eq!(node.leaf_labels().last(), Some(&"last"));
        drop(node);
    }
}
