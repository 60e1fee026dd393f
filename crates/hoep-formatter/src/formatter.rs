//! Formatter registration and lazy engine initialization.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use hoep_config::{SiteConfig, WORKER_ID_KEY};
use toml::Value;

use crate::engine::{EngineFactory, MarkdownEngine, PulldownFactory};
use crate::error::FormatError;
use crate::translate::{TranslationWarning, translate_config};

/// Configuration key of the formatter settings.
pub const MARKDOWN_KEY: &str = "markdown";

/// Input formats handled by [`HoepFormatter`].
pub const FORMAT_NAMES: &[&str] = &["markdown", "mdown", "md"];

/// Output format produced by [`HoepFormatter`].
pub const OUTPUT_FORMAT: &str = "html";

/// Read-only access to the host's site configuration.
pub trait ConfigLookup: Send + Sync {
    /// Look up a value by slash-separated path.
    fn get(&self, path: &str) -> Option<&Value>;
}

impl ConfigLookup for SiteConfig {
    fn get(&self, path: &str) -> Option<&Value> {
        SiteConfig::get(self, path)
    }
}

/// Order in which the host tries competing formatters for a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    First,
    Normal,
    Last,
}

/// A formatter the host can dispatch content to.
pub trait Formatter: Send + Sync {
    /// Input format names this formatter handles.
    fn format_names(&self) -> &'static [&'static str];

    /// Name of the produced format.
    fn output_format(&self) -> &'static str;

    fn priority(&self) -> Priority {
        Priority::Normal
    }

    /// Render `text` written in `format_name`.
    fn render(&self, format_name: &str, text: &str) -> Result<String, FormatError>;
}

/// Whether configuration warnings should be surfaced by this process.
///
/// During a parallel bake only worker 0 reports them, so they are not
/// repeated once per worker. Without a worker id (not baking) they are
/// always shown.
fn show_warnings(config: &dyn ConfigLookup) -> bool {
    match config.get(WORKER_ID_KEY) {
        None => true,
        Some(id) => id.as_integer() == Some(0),
    }
}

/// Markdown formatter producing HTML.
///
/// The engine is built on the first render from the site's `markdown`
/// settings and reused for the lifetime of the formatter. Later changes to
/// the configuration are not picked up. A failed initialization stores
/// nothing, so the next render tries again.
pub struct HoepFormatter<F: EngineFactory = PulldownFactory> {
    config: Arc<dyn ConfigLookup>,
    factory: F,
    engine: Mutex<Option<Arc<F::Engine>>>,
}

impl HoepFormatter {
    /// Create a formatter using the default engine.
    #[must_use]
    pub fn new(config: Arc<dyn ConfigLookup>) -> Self {
        Self::with_factory(config, PulldownFactory)
    }
}

impl<F: EngineFactory> HoepFormatter<F> {
    /// Create a formatter using a custom engine factory.
    #[must_use]
    pub fn with_factory(config: Arc<dyn ConfigLookup>, factory: F) -> Self {
        Self {
            config,
            factory,
            engine: Mutex::new(None),
        }
    }

    /// Whether the engine has been built.
    pub fn is_initialized(&self) -> bool {
        self.lock_engine().is_some()
    }

    fn lock_engine(&self) -> std::sync::MutexGuard<'_, Option<Arc<F::Engine>>> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the engine, building it on first use.
    ///
    /// The lock is held while building so concurrent first renders
    /// construct a single engine.
    fn ensure_initialized(&self) -> Result<Arc<F::Engine>, FormatError> {
        let mut slot = self.lock_engine();
        if let Some(engine) = slot.as_ref() {
            return Ok(Arc::clone(engine));
        }

        let show_warnings = show_warnings(self.config.as_ref());
        let translation = translate_config(self.config.get(MARKDOWN_KEY), show_warnings)?;
        for warning in &translation.warnings {
            match warning {
                TranslationWarning::UnknownCapability(name) => {
                    tracing::warn!(extension = %name, "{warning}");
                }
                TranslationWarning::PartialExtra => tracing::warn!("{warning}"),
            }
        }

        tracing::debug!(
            extensions = ?translation.extensions,
            render_flags = ?translation.render_flags,
            "Creating Markdown engine"
        );
        let engine = Arc::new(
            self.factory
                .create(translation.extensions, translation.render_flags),
        );
        *slot = Some(Arc::clone(&engine));
        Ok(engine)
    }
}

impl<F: EngineFactory> Formatter for HoepFormatter<F> {
    fn format_names(&self) -> &'static [&'static str] {
        FORMAT_NAMES
    }

    fn output_format(&self) -> &'static str {
        OUTPUT_FORMAT
    }

    fn priority(&self) -> Priority {
        Priority::First
    }

    fn render(&self, format_name: &str, text: &str) -> Result<String, FormatError> {
        if !FORMAT_NAMES.contains(&format_name) {
            return Err(FormatError::UnsupportedFormat(format_name.to_owned()));
        }
        let engine = self.ensure_initialized()?;
        Ok(engine.render(text))
    }
}

impl<F: EngineFactory> fmt::Debug for HoepFormatter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoepFormatter")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{Extensions, RenderFlags};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoEngine;

    impl MarkdownEngine for EchoEngine {
        fn render(&self, text: &str) -> String {
            text.to_owned()
        }
    }

    #[derive(Default)]
    struct CountingFactory {
        calls: AtomicUsize,
    }

    impl EngineFactory for CountingFactory {
        type Engine = EchoEngine;

        fn create(&self, _extensions: Extensions, _render_flags: RenderFlags) -> EchoEngine {
            self.calls.fetch_add(1, Ordering::SeqCst);
            EchoEngine
        }
    }

    fn config(source: &str) -> Arc<dyn ConfigLookup> {
        Arc::new(SiteConfig::from_toml_str(source).unwrap())
    }

    #[test]
    fn test_show_warnings_without_worker_id() {
        assert!(show_warnings(config("").as_ref()));
    }

    #[test]
    fn test_show_warnings_first_worker() {
        assert!(show_warnings(config("[baker]\nworker_id = 0").as_ref()));
    }

    #[test]
    fn test_show_warnings_other_worker() {
        assert!(!show_warnings(config("[baker]\nworker_id = 5").as_ref()));
    }

    #[test]
    fn test_registration_metadata() {
        let formatter = HoepFormatter::new(config(""));
        assert_eq!(formatter.format_names(), &["markdown", "mdown", "md"]);
        assert_eq!(formatter.output_format(), "html");
        assert_eq!(formatter.priority(), Priority::First);
    }

    #[test]
    fn test_engine_built_once() {
        let formatter = HoepFormatter::with_factory(config(""), CountingFactory::default());
        assert!(!formatter.is_initialized());

        assert_eq!(formatter.render("md", "one").unwrap(), "one");
        assert_eq!(formatter.render("markdown", "two").unwrap(), "two");
        assert_eq!(formatter.render("mdown", "three").unwrap(), "three");

        assert!(formatter.is_initialized());
        assert_eq!(formatter.factory.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsupported_format_does_not_initialize() {
        let formatter = HoepFormatter::with_factory(config(""), CountingFactory::default());

        let err = formatter.render("textile", "text").unwrap_err();

        assert!(matches!(err, FormatError::UnsupportedFormat(ref name) if name == "textile"));
        assert!(!formatter.is_initialized());
        assert_eq!(formatter.factory.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_config_fails_every_render() {
        let formatter = HoepFormatter::with_factory(
            config(r#"markdown = "not_a_dict""#),
            CountingFactory::default(),
        );

        for _ in 0..2 {
            let err = formatter.render("md", "text").unwrap_err();
            assert!(matches!(err, FormatError::InvalidConfig { .. }));
        }
        assert!(!formatter.is_initialized());
        assert_eq!(formatter.factory.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_concurrent_first_renders_build_once() {
        let formatter = Arc::new(HoepFormatter::with_factory(
            config(""),
            CountingFactory::default(),
        ));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let formatter = Arc::clone(&formatter);
                std::thread::spawn(move || formatter.render("md", &format!("page {i}")).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(formatter.factory.calls.load(Ordering::SeqCst), 1);
    }
}
