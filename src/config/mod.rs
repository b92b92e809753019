//! Widget settings
//!
//! Read-only settings consumed when a widget is built. They can be written
//! inline, loaded from a TOML file, and overridden through `SLIMSELECT_*`
//! environment variables (`SLIMSELECT_SHOW_SEARCH=false`). Whether the widget
//! is single or multi select is not a setting: it comes from the native
//! control's `multiple` attribute.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "SLIMSELECT";

/// Settings for one widget
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Render a search input inside the dropdown
    pub show_search: bool,

    /// Placeholder of the search input
    pub search_placeholder: String,

    /// Text shown when a search matches nothing
    pub search_text: String,

    /// Text shown when nothing is selected
    pub placeholder: String,

    /// Whether the widget starts enabled
    pub is_enabled: bool,

    /// Close the dropdown after a single-mode selection
    pub close_on_select: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_search: true,
            search_placeholder: "Search".to_string(),
            search_text: "No Results".to_string(),
            placeholder: "Select Value".to_string(),
            is_enabled: true,
            close_on_select: true,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file with environment overrides on top
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or does not match the
    /// settings structure.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    /// Parse settings from an inline TOML document
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is not valid TOML or has fields
    /// of the wrong type.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save settings as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the settings cannot be serialized or the file
    /// cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize settings: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write settings file: {e}")))?;

        Ok(())
    }

    /// Disable the search input
    #[must_use]
    pub fn without_search(mut self) -> Self {
        self.show_search = false;
        self
    }

    /// Start disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    /// Keep the dropdown open after a single-mode selection
    #[must_use]
    pub fn keep_open(mut self) -> Self {
        self.close_on_select = false;
        self
    }

    /// Set the "nothing selected" text
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}
