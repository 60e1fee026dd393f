//! Formatter error types.

use hoep_config::ConfigError;

/// Error raised while initializing or running the formatter.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The `markdown` setting is present but is not a table.
    #[error("The `markdown` configuration setting must be a mapping, got {found}")]
    InvalidConfig {
        /// TOML type name of the value found.
        found: &'static str,
    },

    /// A key inside the `markdown` table has the wrong type.
    #[error("Invalid `markdown` setting: {0}")]
    InvalidSetting(#[source] toml::de::Error),

    /// Render was requested for a format this formatter does not handle.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Config(#[from] ConfigError),
}
