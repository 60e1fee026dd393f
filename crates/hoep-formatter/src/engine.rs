//! Markdown engines the formatter delegates rendering to.
//!
//! The formatter only computes flags; an [`EngineFactory`] turns those flags
//! into a configured [`MarkdownEngine`]. [`PulldownFactory`] is the default,
//! backed by `pulldown-cmark`.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use crate::flags::{Extensions, RenderFlags};

/// A configured Markdown-to-HTML converter.
pub trait MarkdownEngine: Send + Sync {
    /// Render Markdown text to HTML.
    fn render(&self, text: &str) -> String;
}

/// Builds engines from resolved flags.
pub trait EngineFactory: Send + Sync {
    type Engine: MarkdownEngine;

    fn create(&self, extensions: Extensions, render_flags: RenderFlags) -> Self::Engine;
}

/// Factory for [`PulldownEngine`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PulldownFactory;

impl EngineFactory for PulldownFactory {
    type Engine = PulldownEngine;

    fn create(&self, extensions: Extensions, render_flags: RenderFlags) -> PulldownEngine {
        PulldownEngine::new(extensions, render_flags)
    }
}

/// Extensions with no `pulldown-cmark` counterpart.
const UNSUPPORTED_EXTENSIONS: Extensions = Extensions::AUTOLINK
    .union(Extensions::UNDERLINE)
    .union(Extensions::HIGHLIGHT)
    .union(Extensions::QUOTE)
    .union(Extensions::SPACE_HEADERS)
    .union(Extensions::MATH_EXPLICIT)
    .union(Extensions::DISABLE_INDENTED_CODE);

/// Markdown engine backed by `pulldown-cmark`.
///
/// Parser extensions map onto [`Options`]; render flags are applied by
/// rewriting the event stream before HTML generation:
///
/// - `HARD_WRAP`: soft line breaks become `<br />`
/// - `SKIP_HTML`: raw HTML is dropped
/// - `ESCAPE`: raw HTML is escaped as text (`SKIP_HTML` takes precedence)
/// - `TOC`: headings without an explicit id get `toc_N` anchors
///
/// Fenced code blocks and XHTML-style void tags are always on.
#[derive(Debug, Clone)]
pub struct PulldownEngine {
    options: Options,
    render_flags: RenderFlags,
}

impl PulldownEngine {
    /// Create an engine for the given flags.
    #[must_use]
    pub fn new(extensions: Extensions, render_flags: RenderFlags) -> Self {
        let mut options = Options::empty();
        for (ext, option) in [
            (Extensions::TABLES, Options::ENABLE_TABLES),
            (Extensions::FOOTNOTES, Options::ENABLE_FOOTNOTES),
            (Extensions::STRIKETHROUGH, Options::ENABLE_STRIKETHROUGH),
            (Extensions::SUPERSCRIPT, Options::ENABLE_SUPERSCRIPT),
            (Extensions::MATH, Options::ENABLE_MATH),
        ] {
            options.set(option, extensions.contains(ext));
        }
        if render_flags.contains(RenderFlags::SMARTYPANTS) {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }

        let unsupported = extensions & UNSUPPORTED_EXTENSIONS;
        if !unsupported.is_empty() {
            tracing::debug!(
                extensions = ?unsupported,
                "Extensions not supported by pulldown-cmark engine"
            );
        }

        Self {
            options,
            render_flags,
        }
    }

    /// Parser options derived from the extension flags.
    #[must_use]
    pub fn options(&self) -> Options {
        self.options
    }
}

impl MarkdownEngine for PulldownEngine {
    fn render(&self, text: &str) -> String {
        let hard_wrap = self.render_flags.contains(RenderFlags::HARD_WRAP);
        let skip_html = self.render_flags.contains(RenderFlags::SKIP_HTML);
        let escape = self.render_flags.contains(RenderFlags::ESCAPE);
        let toc = self.render_flags.contains(RenderFlags::TOC);
        let mut heading_index = 0usize;

        let events = Parser::new_ext(text, self.options).filter_map(|event| match event {
            Event::SoftBreak if hard_wrap => Some(Event::HardBreak),
            Event::Html(_) | Event::InlineHtml(_) if skip_html => None,
            Event::Html(raw) | Event::InlineHtml(raw) if escape => Some(Event::Text(raw)),
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) if toc => {
                let anchor = format!("toc_{heading_index}");
                heading_index += 1;
                Some(Event::Start(Tag::Heading {
                    level,
                    id: Some(CowStr::from(anchor)),
                    classes,
                    attrs,
                }))
            }
            other => Some(other),
        });

        let mut output = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut output, events);
        output
    }
}
