//! Parsed translation input
mod error;
mod tree;

pub use error::TreeError;
pub use tree::{
    DEFAULT_ALIAS_PREFIX,
    TranslationTree,
    TranslationValue,
};
