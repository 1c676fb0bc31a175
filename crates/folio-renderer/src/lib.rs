//! Markdown rendering for Folio blog posts.
//!
//! This crate turns a markdown post into HTML in three stages:
//!
//! 1. **Preprocessing** ([`PreprocessorPipeline`]): line-oriented rewrites run in
//!    priority order before parsing. The standard pipeline maps dash-only lines
//!    to weighted horizontal rules and pairs fenced code blocks with a trailing
//!    `!!! <kind> inline` note.
//! 2. **Rendering** ([`MarkdownRenderer`]): pulldown-cmark events are written
//!    out as HTML. Code blocks are offered to registered
//!    [`CodeBlockProcessor`]s first, which is how [`AsaHighlighter`] plugs in.
//! 3. **Extraction** ([`DescriptionExtractor`]): a pass over the rendered page
//!    that pulls direct-child paragraph text out of the post container.
//!
//! # Example
//!
//! ```
//! use folio_renderer::{MarkdownRenderer, PreprocessorPipeline};
//!
//! let markdown = "# Title\n\n-----\n\nBody text.";
//! let processed = PreprocessorPipeline::standard().process(markdown);
//! let result = MarkdownRenderer::new()
//!     .with_title_extraction()
//!     .render_markdown(&processed);
//!
//! assert_eq!(result.title.as_deref(), Some("Title"));
//! assert!(result.html.contains(r#"<hr class="hr-light">"#));
//! ```

mod code_block;
mod description;
mod fence;
mod highlight;
mod html;
pub mod preprocess;
mod renderer;
mod state;
mod util;

pub use code_block::{CodeBlockProcessor, ProcessResult};
pub use description::{DEFAULT_CONTAINER_CLOSE, DEFAULT_CONTAINER_OPEN, DescriptionExtractor};
pub use highlight::{AsaHighlighter, AsaLexer, TokenKind};
pub use preprocess::{
    HorizontalRulePreprocessor, InlineNotePreprocessor, Preprocessor, PreprocessorPipeline,
    RuleWeight,
};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html};
