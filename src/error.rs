//! Error type shared by every stage of the solver.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordleError {
    /// A malformed word or feedback token. Recoverable: the caller may re-prompt.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// The configuration cannot run the requested algorithm.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The game ended without finding the solution.
    #[error("search exhausted: {0}")]
    ExhaustedSearch(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, WordleError>;
