//! i18n-flatten
//!
//! Flattens nested translation trees into single-level `dotted.key → value`
//! mappings and resolves key aliases (links) through a per-locale link table.

pub mod cli;
pub mod config;
pub mod flatten;
pub mod input;

pub use flatten::{
    FlatMapping,
    Flattener,
};
pub use input::{
    TranslationTree,
    TranslationValue,
};
