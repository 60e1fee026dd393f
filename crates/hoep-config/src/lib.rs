//! Site configuration for the Hoep formatter.
//!
//! Parses `config.toml` site configuration files into a dynamically typed
//! value tree and provides auto-discovery of config files in parent
//! directories.
//!
//! Values are addressed by slash-separated paths, the way a site generator
//! host addresses them:
//!
//! - `markdown` - the formatter section (must be a table)
//! - `baker/worker_id` - index of the current bake worker, set by the host
//!
//! Host settings can be applied during load via [`Overrides`].

use std::path::{Path, PathBuf};

use toml::{Table, Value};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "config.toml";

/// Path of the bake worker index inside the site configuration.
pub const WORKER_ID_KEY: &str = "baker/worker_id";

/// Host settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Index of the bake worker running this process.
    pub worker_id: Option<u32>,
}

/// Site configuration.
#[derive(Debug, Default)]
pub struct SiteConfig {
    values: Table,
    /// Path to the config file (set after loading).
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl SiteConfig {
    /// Load configuration from file with optional host overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `config.toml` in current directory and parents,
    /// falling back to an empty configuration.
    ///
    /// Overrides are applied after loading and validated with the rest of
    /// the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::Validation` for invalid values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let values: Table = toml::from_str(source)?;
        let config = Self {
            values,
            config_path: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Look up a value by slash-separated path (e.g. `baker/worker_id`).
    ///
    /// Returns `None` if any segment is missing or an intermediate value is
    /// not a table.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('/');
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }

    /// Set a value by slash-separated path, creating intermediate tables.
    ///
    /// Intermediate values that are not tables are replaced.
    pub fn set(&mut self, path: &str, value: Value) {
        let mut segments: Vec<&str> = path.split('/').collect();
        let Some(last) = segments.pop() else {
            return;
        };

        let mut table = &mut self.values;
        for segment in segments {
            let entry = table
                .entry(segment.to_owned())
                .or_insert_with(|| Value::Table(Table::new()));
            if !entry.is_table() {
                *entry = Value::Table(Table::new());
            }
            let Some(next) = entry.as_table_mut() else {
                return;
            };
            table = next;
        }
        table.insert(last.to_owned(), value);
    }

    /// Apply host overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(worker_id) = overrides.worker_id {
            self.set(WORKER_ID_KEY, Value::Integer(i64::from(worker_id)));
        }
    }

    /// Validate configuration values.
    ///
    /// Only values this crate owns are checked; the `markdown` section is
    /// validated by the formatter when it initializes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_worker_id()
    }

    fn validate_worker_id(&self) -> Result<(), ConfigError> {
        match self.get(WORKER_ID_KEY) {
            None => Ok(()),
            Some(Value::Integer(id)) if u32::try_from(*id).is_ok() => Ok(()),
            Some(Value::Integer(_)) => Err(ConfigError::Validation(format!(
                "{WORKER_ID_KEY} must be a non-negative integer"
            ))),
            Some(other) => Err(ConfigError::Validation(format!(
                "{WORKER_ID_KEY} must be an integer, got {}",
                other.type_str()
            ))),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let values: Table = toml::from_str(&content)?;
        Ok(Self {
            values,
            config_path: Some(path.to_path_buf()),
        })
    }
}
