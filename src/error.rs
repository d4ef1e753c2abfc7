//! Error types for roffdown operations.

use thiserror::Error;

/// Errors that can occur while converting a manual page.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid input file name: {0}")]
    InvalidInputName(String),

    #[error("Malformed description list: {0}")]
    MalformedDescriptionList(String),
}

pub type Result<T> = std::result::Result<T, Error>;
