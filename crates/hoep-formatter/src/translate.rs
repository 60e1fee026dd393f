//! Translation of `markdown` settings into engine flags.
//!
//! Each configured extension name is resolved, in order, against:
//!
//! 1. the engine's extension namespace (e.g. `tables` → [`Extensions::TABLES`])
//! 2. the engine's render-flag namespace (e.g. `hard_wrap` → [`RenderFlags::HARD_WRAP`])
//! 3. the compatibility alias table (e.g. `nl2br` → [`RenderFlags::HARD_WRAP`])
//!
//! The first match wins. Names matching nothing are reported as warnings and
//! otherwise ignored. [`Extensions::DEFAULT`] is always enabled.

use std::fmt;

use serde::Deserialize;
use toml::Value;

use crate::alias::{self, AliasTarget, EXTRA};
use crate::error::FormatError;
use crate::flags::{Extensions, RenderFlags};

/// Raw `markdown` table as parsed from the site configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MarkdownSettingsRaw {
    extensions: Option<ExtensionList>,
    render_flags: Vec<String>,
    /// Legacy switch from the 1.x configuration schema.
    use_markdown_extra: bool,
}

/// Extensions are accepted as a comma-separated string or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExtensionList {
    Delimited(String),
    Names(Vec<String>),
}

/// Normalized `markdown` settings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MarkdownSettings {
    /// Extension or flag names, in configuration order.
    pub extensions: Vec<String>,
    /// Requested render flags. Read for validation only; translation
    /// resolves render flags from `extensions`.
    pub render_flags: Vec<String>,
}

impl MarkdownSettings {
    /// Normalize the raw `markdown` configuration value.
    ///
    /// A missing value yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidConfig`] if the value is not a table and
    /// [`FormatError::InvalidSetting`] if a known key has the wrong type.
    pub fn from_value(value: Option<&Value>) -> Result<Self, FormatError> {
        let Some(value) = value else {
            return Ok(Self::default());
        };
        if !value.is_table() {
            return Err(FormatError::InvalidConfig {
                found: value.type_str(),
            });
        }

        let raw: MarkdownSettingsRaw = value
            .clone()
            .try_into()
            .map_err(FormatError::InvalidSetting)?;

        let mut extensions = match raw.extensions {
            None => Vec::new(),
            Some(ExtensionList::Delimited(names)) => names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect(),
            Some(ExtensionList::Names(names)) => names,
        };
        if raw.use_markdown_extra {
            extensions.push(EXTRA.to_owned());
        }

        Ok(Self {
            extensions,
            render_flags: raw.render_flags,
        })
    }
}

/// Non-fatal problem found while translating settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationWarning {
    /// Name matched no extension, render flag or alias.
    UnknownCapability(String),
    /// `extra` only enables part of the bundle it stands for.
    PartialExtra,
}

impl fmt::Display for TranslationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCapability(name) => {
                write!(f, "Unknown Hoep Markdown extension or flag: {name}")
            }
            Self::PartialExtra => f.write_str(
                "The 'extra' extension doesn't have a full equivalent in Hoedown Markdown. \
                 Only 'fenced_code', 'footnotes' and 'tables' extensions will be active. \
                 To remove this warning, replace 'extra' with those 3 specific extensions.",
            ),
        }
    }
}

/// Resolved engine flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub extensions: Extensions,
    pub render_flags: RenderFlags,
    /// Empty when warnings were suppressed.
    pub warnings: Vec<TranslationWarning>,
}

/// Resolve normalized settings into engine flags.
///
/// Warnings are only collected when `show_warnings` is set.
#[must_use]
pub fn translate(settings: &MarkdownSettings, show_warnings: bool) -> Translation {
    let mut extensions = Extensions::empty();
    let mut render_flags = RenderFlags::empty();
    let mut warnings = Vec::new();

    for name in &settings.extensions {
        if name.is_empty() {
            continue;
        }
        if let Some(ext) = Extensions::lookup(name) {
            extensions |= ext;
            continue;
        }
        if let Some(flag) = RenderFlags::lookup(name) {
            render_flags |= flag;
            continue;
        }

        let lowered = name.to_ascii_lowercase();
        let Some(targets) = alias::resolve(&lowered) else {
            if show_warnings {
                warnings.push(TranslationWarning::UnknownCapability(name.clone()));
            }
            continue;
        };
        for target in targets {
            match *target {
                AliasTarget::Extension(ext) => extensions |= ext,
                AliasTarget::RenderFlag(flag) => render_flags |= flag,
            }
        }
        if lowered == EXTRA && show_warnings {
            warnings.push(TranslationWarning::PartialExtra);
        }
    }

    extensions |= Extensions::DEFAULT;

    Translation {
        extensions,
        render_flags,
        warnings,
    }
}

/// Normalize and translate a raw `markdown` configuration value.
///
/// # Errors
///
/// Fails before any flag is resolved if the value is malformed; see
/// [`MarkdownSettings::from_value`].
pub fn translate_config(
    value: Option<&Value>,
    show_warnings: bool,
) -> Result<Translation, FormatError> {
    let settings = MarkdownSettings::from_value(value)?;
    Ok(translate(&settings, show_warnings))
}
