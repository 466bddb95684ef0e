//! Settings file loader

use std::path::Path;

use super::{
    ConfigError,
    FlattenSettings,
};

/// Name of the settings file looked up in a directory.
pub const CONFIG_FILE_NAME: &str = ".i18n-flatten.json";

/// Load settings from `dir`.
///
/// Looks for a `.i18n-flatten.json` file.
///
/// # Returns
/// - `Ok(Some(settings))`: file found and parsed
/// - `Ok(None)`: no settings file
/// - `Err(ConfigError)`: read or parse failure
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_dir(dir: &Path) -> Result<Option<FlattenSettings>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: FlattenSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
