use thiserror::Error;

/// Errors raised while building a translation tree from parsed input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The document root is not a JSON object
    #[error("Translation document must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}
