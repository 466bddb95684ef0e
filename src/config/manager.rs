//! Settings management

use std::path::PathBuf;

use super::{
    ConfigError,
    FlattenSettings,
    loader,
};

/// Holds the validated settings and where they came from
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Current settings
    current_settings: FlattenSettings,

    /// Directory the settings were loaded from
    config_dir: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: FlattenSettings::default(), config_dir: None }
    }

    /// Load settings from `config_dir`, falling back to defaults.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, config_dir: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from: {:?}", config_dir);

        let settings = if let Some(dir) = &config_dir {
            loader::load_from_dir(dir)?.map_or_else(FlattenSettings::default, |loaded| {
                tracing::debug!("Loaded settings file: {:?}", loaded);
                loaded
            })
        } else {
            FlattenSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.config_dir = config_dir;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replace the current settings after validating them.
    ///
    /// # Errors
    /// - Validation error
    pub fn update_settings(&mut self, new_settings: FlattenSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &FlattenSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn config_dir(&self) -> Option<&PathBuf> {
        self.config_dir.as_ref()
    }
}
