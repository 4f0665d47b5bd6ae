// import modules
mod entropy;
mod gini;
mod misclassification;

// make purity functions public
pub use entropy::Entropy;
pub use gini::Gini;
pub use misclassification::Misclassification;

pub mod purity;

pub use purity::Purity;
pub use purity::PurityFunction;
