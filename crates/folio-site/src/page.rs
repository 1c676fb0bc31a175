//! Markdown post rendering.

use folio_renderer::{AsaHighlighter, MarkdownRenderer, PreprocessorPipeline, TocEntry};

/// A post rendered to an HTML fragment.
#[derive(Clone, Debug)]
pub struct RenderedPost {
    /// Text of the first H1, if any.
    pub title: Option<String>,
    /// Rendered body.
    pub html: String,
    /// Headings below the title.
    pub toc: Vec<TocEntry>,
}

/// Renders post markdown: preprocessing, then markdown with Asa highlighting.
///
/// Holds only the preprocessor pipeline; a fresh [`MarkdownRenderer`] is
/// built per post so rendering can run on any thread.
///
/// # Example
///
/// ```
/// use folio_site::PageRenderer;
///
/// let post = PageRenderer::new().render("# Hello\n\n----\n\nWorld.");
/// assert_eq!(post.title.as_deref(), Some("Hello"));
/// assert!(post.html.contains(r#"<hr class="hr-medium">"#));
/// ```
pub struct PageRenderer {
    pipeline: PreprocessorPipeline,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer {
    /// Create a renderer using the standard preprocessors.
    #[must_use]
    pub fn new() -> Self {
        Self::with_pipeline(PreprocessorPipeline::standard())
    }

    /// Create a renderer with a custom preprocessor pipeline.
    #[must_use]
    pub fn with_pipeline(pipeline: PreprocessorPipeline) -> Self {
        Self { pipeline }
    }

    /// Render one post.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderedPost {
        let processed = self.pipeline.process(markdown);
        let result = MarkdownRenderer::new()
            .with_title_extraction()
            .with_processor(AsaHighlighter::new())
            .render_markdown(&processed);

        RenderedPost {
            title: result.title,
            html: result.html,
            toc: result.toc,
        }
    }
}
