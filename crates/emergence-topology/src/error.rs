//! Error types for emergence-topology.

use thiserror::Error;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when working with topologies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The topology code is not one of the known codes.
    #[error("unknown topology code: {0:?} (expected bounded, mesh, hub or pipeline)")]
    UnknownTopology(String),
}
