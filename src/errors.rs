//! Errors
//!
//! Custom error types used throughout the `id3_tree` crate.
use thiserror::Error;

/// Errors that can occur while training or evaluating a decision tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    /// An instance lacks an attribute required by the current split or outcome.
    #[error("Instance is missing the required attribute {0}.")]
    MissingAttribute(String),
    /// A partition of the training rows has no rows.
    #[error("Reached an empty partition at {0}.")]
    EmptyPartition(String),
    /// First value is the attribute name, second is the reason.
    #[error("Attribute {0} cannot be discretized: {1}.")]
    DegenerateDiscretization(String, String),
    /// No decision of an inner node applies to the evaluated instance.
    #[error("No branch of the node splitting on {0} matches the instance.")]
    UnmatchedBranch(String),
    /// Malformed configuration or dataset schema.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// First value is the attribute name, second is the value that failed to parse.
    #[error("Continuous attribute {0} has the non numeric value {1}.")]
    NonNumericValue(String, String),
    /// Unable to write a configuration.
    #[error("Unable to write configuration: {0}")]
    UnableToWrite(String),
    /// Unable to read a configuration.
    #[error("Unable to read configuration: {0}")]
    UnableToRead(String),
}
