//! Engine capability namespaces.
//!
//! The engine exposes two disjoint sets of power-of-two flags: parser
//! extensions and HTML render flags. Capabilities are looked up by name
//! through the statically declared flag tables.

use bitflags::bitflags;

bitflags! {
    /// Markdown syntax extensions enabled in the parser.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Extensions: u32 {
        const TABLES = 1 << 0;
        const FENCED_CODE = 1 << 1;
        const FOOTNOTES = 1 << 2;
        const AUTOLINK = 1 << 3;
        const STRIKETHROUGH = 1 << 4;
        const UNDERLINE = 1 << 5;
        const HIGHLIGHT = 1 << 6;
        const QUOTE = 1 << 7;
        const SUPERSCRIPT = 1 << 8;
        const MATH = 1 << 9;
        const NO_INTRA_EMPHASIS = 1 << 11;
        const SPACE_HEADERS = 1 << 12;
        const MATH_EXPLICIT = 1 << 13;
        const DISABLE_INDENTED_CODE = 1 << 14;
    }
}

bitflags! {
    /// HTML output behaviors of the renderer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderFlags: u32 {
        const SKIP_HTML = 1 << 0;
        const ESCAPE = 1 << 1;
        const HARD_WRAP = 1 << 2;
        const USE_XHTML = 1 << 3;
        const SMARTYPANTS = 1 << 4;
        const TOC = 1 << 5;
    }
}

impl Extensions {
    /// Extensions enabled regardless of configuration.
    pub const DEFAULT: Self = Self::NO_INTRA_EMPHASIS;

    /// Look up an extension by name, ignoring case.
    ///
    /// ```
    /// use hoep_formatter::Extensions;
    ///
    /// assert_eq!(Extensions::lookup("fenced_code"), Some(Extensions::FENCED_CODE));
    /// assert_eq!(Extensions::lookup("nl2br"), None);
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::from_name(&name.to_ascii_uppercase())
    }
}

impl RenderFlags {
    /// Look up a render flag by name, ignoring case.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::from_name(&name.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_extension_case_insensitive() {
        assert_eq!(Extensions::lookup("tables"), Some(Extensions::TABLES));
        assert_eq!(Extensions::lookup("Tables"), Some(Extensions::TABLES));
        assert_eq!(
            Extensions::lookup("no_intra_emphasis"),
            Some(Extensions::NO_INTRA_EMPHASIS)
        );
    }

    #[test]
    fn test_lookup_render_flag() {
        assert_eq!(RenderFlags::lookup("hard_wrap"), Some(RenderFlags::HARD_WRAP));
        assert_eq!(RenderFlags::lookup("TOC"), Some(RenderFlags::TOC));
    }

    #[test]
    fn test_namespaces_are_disjoint_by_name() {
        for (name, _) in Extensions::all().iter_names() {
            assert!(RenderFlags::lookup(name).is_none(), "{name} in both namespaces");
        }
    }

    #[test]
    fn test_lookup_unknown_and_empty() {
        assert!(Extensions::lookup("bogus_ext").is_none());
        assert!(Extensions::lookup("").is_none());
        assert!(RenderFlags::lookup("").is_none());
    }
}
