//! Compatibility names from generic Markdown tooling.
//!
//! Maps extension names used by other Markdown implementations onto engine
//! capabilities, so the formatter can be dropped in without rewriting the
//! site configuration.

use crate::flags::{Extensions, RenderFlags};

/// A capability an alias resolves to, tagged with its namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasTarget {
    Extension(Extensions),
    RenderFlag(RenderFlags),
}

/// Name of the alias that only partially covers its counterpart.
pub(crate) const EXTRA: &str = "extra";

static ALIASES: &[(&str, &[AliasTarget])] = &[
    ("fenced_code", &[AliasTarget::Extension(Extensions::FENCED_CODE)]),
    ("footnotes", &[AliasTarget::Extension(Extensions::FOOTNOTES)]),
    ("tables", &[AliasTarget::Extension(Extensions::TABLES)]),
    ("nl2br", &[AliasTarget::RenderFlag(RenderFlags::HARD_WRAP)]),
    ("smarty", &[AliasTarget::RenderFlag(RenderFlags::SMARTYPANTS)]),
    ("toc", &[AliasTarget::RenderFlag(RenderFlags::TOC)]),
    // Partial: the full bundle also has abbreviations, attribute lists,
    // definition lists and markdown-in-html.
    (
        EXTRA,
        &[
            AliasTarget::Extension(Extensions::FENCED_CODE),
            AliasTarget::Extension(Extensions::FOOTNOTES),
            AliasTarget::Extension(Extensions::TABLES),
        ],
    ),
];

/// Resolve an alias by its lowercase name.
#[must_use]
pub fn resolve(name: &str) -> Option<&'static [AliasTarget]> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, targets)| *targets)
}
