use crate::node::{render_node, Node};
use crate::purity_functions::Purity;
use std::fmt::{self, Display};

/// A trained decision tree. Immutable once built.
#[derive(Clone, Debug)]
pub struct Tree {
    pub root: Node,
    pub purity: Purity,
    pub outcome: String,
    pub n_nodes: usize,
    pub n_leaves: usize,
    pub depth: usize,
}

impl Tree {
    pub fn new(root: Node, purity: Purity, outcome: String) -> Self {
        Tree {
            n_nodes: root.n_nodes(),
            n_leaves: root.n_leaves(),
            depth: root.depth(),
            root,
            purity,
            outcome,
        }
    }

    /// Human readable dump of the tree.
    ///
    /// One line per decision edge, `"<indent><level>) <name>=<value>  purity=<p>"`,
    /// continuous edges as `name>t` and `name<=t`, and one line per leaf,
    /// `"<indent><level>) Decision: <label>  purity=<p> *"`.
    pub fn render(&self) -> String {
        let mut r = String::new();
        render_node(&self.root, 1, &mut r);
        r
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
