// Modules
pub mod builder;
pub mod confusion_matrix;
pub mod constants;
pub mod data;
pub mod dataset;
pub mod discretizer;
pub mod errors;
pub mod node;
pub mod purity_functions;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use builder::config::{Strategy, TreeConfig, TreeIO};
pub use builder::core::{train, TreeBuilder};
pub use confusion_matrix::{ConfusionMatrix, MissingPolicy};
pub use data::{Attribute, Instance};
pub use dataset::Dataset;
pub use discretizer::{Discretization, DiscretizedDataset, Discretizer};
pub use errors::TreeError;
pub use purity_functions::{Purity, PurityFunction};
pub use tree::tree::Tree;
