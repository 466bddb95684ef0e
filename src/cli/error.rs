use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::input::TreeError;

/// Errors surfaced by the command-line front end
#[derive(Error, Debug)]
pub enum CliError {
    /// Settings could not be loaded or failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The translation file could not be read
    #[error("Failed to read translation file {path:?}: {source}")]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Input could not be parsed or output could not be serialized
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The parsed document is not a translation tree
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Writing the result failed
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
