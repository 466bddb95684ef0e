//! Translation key flattening and alias resolution
mod flattener;
mod keys;
mod links;
mod normalize;

pub use flattener::{
    FlattenOptions,
    Flattener,
};
pub use keys::{
    FLATTEN_SEPARATOR,
    FlatMapping,
    SEPARATOR_ESCAPE_CHAR,
    escape_default_separator,
    flatten_keys,
};
pub use links::LinkTable;
pub use normalize::{
    NormalizedKeyCache,
    normalize_keys,
};
