//! Markdown formatter plugin with Hoedown-style configuration.
//!
//! This crate provides [`HoepFormatter`], which renders Markdown to HTML for
//! a static site generator. Site configuration names extensions the way
//! generic Markdown tooling does; the formatter translates them into the
//! engine's extension and render-flag bitmasks.
//!
//! # Architecture
//!
//! - [`Extensions`] / [`RenderFlags`]: the engine's two capability namespaces
//! - [`alias`]: compatibility names (`nl2br`, `smarty`, `extra`, ...)
//! - [`translate_config`]: settings → flags, with unknown-name warnings
//! - [`HoepFormatter`]: builds the engine once, on first render
//! - [`PulldownEngine`]: default engine backed by `pulldown-cmark`
//!
//! Warnings are logged with `tracing`. During a parallel bake only worker 0
//! (`baker/worker_id`) logs them.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hoep_config::SiteConfig;
//! use hoep_formatter::{Formatter, HoepFormatter};
//!
//! let config = SiteConfig::from_toml_str(
//!     r#"
//! [markdown]
//! extensions = "tables, nl2br"
//! "#,
//! )?;
//! let formatter = HoepFormatter::new(Arc::new(config));
//! let html = formatter.render("md", "line one\nline two")?;
//! assert_eq!(html, "<p>line one<br />\nline two</p>\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod alias;
mod engine;
mod error;
mod flags;
mod formatter;
mod plugin;
mod translate;

pub use engine::{EngineFactory, MarkdownEngine, PulldownEngine, PulldownFactory};
pub use error::FormatError;
pub use flags::{Extensions, RenderFlags};
pub use formatter::{
    ConfigLookup, FORMAT_NAMES, Formatter, HoepFormatter, MARKDOWN_KEY, OUTPUT_FORMAT, Priority,
};
pub use plugin::{HoepPlugin, Plugin};
pub use translate::{
    MarkdownSettings, Translation, TranslationWarning, translate, translate_config,
};
