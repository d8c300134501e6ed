//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file's size is not a multiple of 8 bytes.
    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    /// Configuration file could not be read into a usable state.
    #[error("configuration error: {0}")]
    Config(String),

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] tpx3recon_core::Error),
}
