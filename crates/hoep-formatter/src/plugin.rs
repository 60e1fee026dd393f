//! Plugin entry point registered with the site generator.

use std::path::Path;
use std::sync::Arc;

use hoep_config::{Overrides, SiteConfig};

use crate::error::FormatError;
use crate::formatter::{ConfigLookup, Formatter, HoepFormatter};

/// A bundle of formatters contributed to the host.
pub trait Plugin {
    fn name(&self) -> &'static str;

    /// Formatters provided by this plugin, in registration order.
    fn formatters(&self) -> Vec<Box<dyn Formatter>>;
}

/// Registers [`HoepFormatter`] for Markdown content.
pub struct HoepPlugin {
    config: Arc<dyn ConfigLookup>,
}

impl HoepPlugin {
    #[must_use]
    pub fn new(config: Arc<dyn ConfigLookup>) -> Self {
        Self { config }
    }

    /// Load the site configuration and create the plugin.
    ///
    /// See [`SiteConfig::load`] for how the configuration file is found.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, FormatError> {
        let config = SiteConfig::load(config_path, overrides)?;
        Ok(Self::new(Arc::new(config)))
    }
}

impl Plugin for HoepPlugin {
    fn name(&self) -> &'static str {
        "Hoep"
    }

    fn formatters(&self) -> Vec<Box<dyn Formatter>> {
        vec![Box::new(HoepFormatter::new(Arc::clone(&self.config)))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::Priority;

    #[test]
    fn test_plugin_registers_single_formatter() {
        let plugin = HoepPlugin::new(Arc::new(SiteConfig::default()));
        let formatters = plugin.formatters();

        assert_eq!(plugin.name(), "Hoep");
        assert_eq!(formatters.len(), 1);
        assert_eq!(formatters[0].priority(), Priority::First);
        assert!(formatters[0].format_names().contains(&"md"));
    }

    #[test]
    fn test_load_missing_config_file() {
        let err = HoepPlugin::load(Some(Path::new("/nonexistent/config.toml")), None)
            .err()
            .unwrap();
        assert!(matches!(err, FormatError::Config(_)));
    }
}
