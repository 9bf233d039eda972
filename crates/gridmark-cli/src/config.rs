//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use gridmark_domain::RelationValue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File this configuration was loaded from
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Value applied when a grid cell is picked
    #[serde(default = "default_grid_verb")]
    pub grid_verb: GridVerb,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

/// Confirmed value entered by picking a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridVerb {
    /// Mark the pair as belonging together
    Is,
    /// Mark the pair as not belonging together
    Not,
}

impl GridVerb {
    /// The other verb.
    pub fn toggled(self) -> Self {
        match self {
            GridVerb::Is => GridVerb::Not,
            GridVerb::Not => GridVerb::Is,
        }
    }

    /// Parse `is` / `not`.
    pub fn parse(s: &str) -> Option<Self> {
        match RelationValue::parse(s)? {
            RelationValue::True => Some(GridVerb::Is),
            RelationValue::False => Some(GridVerb::Not),
            RelationValue::Unknown => None,
        }
    }
}

impl From<GridVerb> for RelationValue {
    fn from(verb: GridVerb) -> Self {
        match verb {
            GridVerb::Is => RelationValue::True,
            GridVerb::Not => RelationValue::False,
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".gridmark").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load configuration from `path`, or defaults if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Write the file on first run. A failed write is logged, not returned.
    ///
    /// Returns whether the file exists afterwards.
    pub fn save_if_missing(&self) -> bool {
        let Some(path) = self.path() else {
            return false;
        };
        if path.exists() {
            return true;
        }
        match self.save() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not write default config");
                false
            }
        }
    }

    /// Path used by [`Config::save`], if known.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Set the grid verb and persist it.
    pub fn set_grid_verb(&mut self, verb: GridVerb) -> Result<()> {
        self.settings.grid_verb = verb;
        self.save()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            grid_verb: GridVerb::Not,
            history_size: 1000,
            log_level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_grid_verb() -> GridVerb {
    GridVerb::Not
}

fn default_history_size() -> usize {
    1000
}

fn default_log_level() -> String {
    "warn".to_string()
}
