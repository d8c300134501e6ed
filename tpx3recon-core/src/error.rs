//! Error types for tpx3recon-core.

use thiserror::Error;

/// Result type alias for tpx3recon-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types shared by every layer of the reconstruction pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value fell outside its documented domain.
    #[error("configuration error: {0}")]
    Config(String),

    /// A cluster's accumulated weight was zero, so no centroid exists.
    #[error("degenerate cluster: zero accumulated charge")]
    DegenerateCluster,
}
