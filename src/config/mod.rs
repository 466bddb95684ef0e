//! Settings for flattening and key resolution
mod loader;
mod manager;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    FlattenSettings,
    ValidationError,
};
