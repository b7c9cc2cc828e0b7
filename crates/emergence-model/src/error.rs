//! Error types for emergence-model.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the formula layer.
///
/// Inputs are clamped before they reach the formulas, so these indicate a
/// broken invariant upstream rather than bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A configuration reached the formula layer outside its domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
