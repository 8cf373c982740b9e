//! Engine settings
//!
//! Settings come from an optional TOML file and `TABLESIFT_*` environment
//! variables, in that order of precedence (environment wins).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tablesift_shared::NumberFormat;

/// Prefix of environment variables read by [`Settings::load`]
pub const ENV_PREFIX: &str = "TABLESIFT";

/// Settings file looked up in the working directory when none is given
pub const DEFAULT_SETTINGS_FILE: &str = "tablesift.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Page renders numbers as `1.234,5`
    pub comma_num: bool,

    /// List excluded rows alongside visible ones
    pub show_excluded: bool,
}

impl Settings {
    /// Load settings from `path` (required) or from the default file
    /// (optional), then from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::new(DEFAULT_SETTINGS_FILE, config::FileFormat::Toml).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    /// Numeric convention for parsing cell text and boundaries
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::new(self.comma_num)
    }

    /// Render the settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }
}
