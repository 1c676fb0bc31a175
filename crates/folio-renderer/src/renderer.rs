//! Markdown to HTML rendering over pulldown-cmark events.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::code_block::{CodeBlockProcessor, ProcessResult, parse_fence_language};
use crate::html;
use crate::state::{
    CodeBlockState, HeadingState, ImageState, TableState, TocEntry, escape_html, escape_text,
};
use crate::util::heading_level_to_num;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title taken from the first H1 (only with title extraction).
    pub title: Option<String>,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer producing the HTML body of a post.
///
/// Tables, strikethrough and task lists are enabled. Fenced code blocks are
/// offered to the registered [`CodeBlockProcessor`]s in order; the first one
/// returning [`ProcessResult::Inline`] replaces the block.
pub struct MarkdownRenderer {
    out: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    pending_image: Option<(String, String)>,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::new(false),
            pending_image: None,
            processors: Vec::new(),
        }
    }

    /// Report the first H1 as the title.
    ///
    /// The heading is still rendered but left out of the table of contents.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.heading = HeadingState::new(true);
        self
    }

    /// Register a code block processor.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_renderer::{AsaHighlighter, MarkdownRenderer};
    ///
    /// let result = MarkdownRenderer::new()
    ///     .with_processor(AsaHighlighter::new())
    ///     .render_markdown("```asa\nlet x = 1;\n```");
    ///
    /// assert!(result.html.contains(r#"<span class="kt">let</span>"#));
    /// ```
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Render a markdown document.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(tag) => self.start_tag(tag),
                Event::End(tag) => self.end_tag(tag),
                Event::Text(text) => self.text(&text),
                Event::Code(code) => self.inline_code(&code),
                Event::Html(raw) | Event::InlineHtml(raw) => self.push_inline(&raw),
                Event::SoftBreak => self.soft_break(),
                Event::HardBreak => self.push_inline("<br>"),
                Event::Rule => self.out.push_str("<hr>"),
                Event::TaskListMarker(checked) => self.out.push_str(html::checkbox(checked)),
                Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
            }
        }

        RenderResult {
            html: std::mem::take(&mut self.out),
            title: self.heading.take_title(),
            toc: self.heading.take_toc(),
        }
    }

    /// Write to the open heading if there is one, else to the output.
    ///
    /// Markup inside image alt text is dropped.
    fn push_inline(&mut self, content: &str) {
        if self.image.is_active() {
            return;
        }
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.out.push_str(content);
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        if let Some(markup) = open_markup(&tag) {
            self.push_inline(markup);
            return;
        }
        match tag {
            // The opening tag is written once the ID is known.
            Tag::Heading { level, .. } => self.heading.start_heading(heading_level_to_num(level)),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => parse_fence_language(&info),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(Some(1)) => self.out.push_str("<ol>"),
            Tag::List(Some(start)) => {
                let _ = write!(self.out, r#"<ol start="{start}">"#);
            }
            Tag::List(None) => self.out.push_str("<ul>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.out.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.out.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.out.push_str("<tr>");
            }
            Tag::TableCell => {
                let _ = write!(
                    self.out,
                    "<{}{}>",
                    self.table.cell_tag(),
                    self.table.current_alignment_style()
                );
            }
            Tag::Link { dest_url, .. } => {
                let href = html::rewrite_post_link(&dest_url);
                let open = format!(r#"<a href="{}">"#, escape_html(&href));
                self.push_inline(&open);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as text events before the end tag.
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        if let Some(markup) = close_markup(&tag) {
            self.push_inline(markup);
            return;
        }
        match tag {
            TagEnd::Heading(_) => {
                if let Some((level, id, inner)) = self.heading.complete_heading() {
                    let _ = write!(
                        self.out,
                        r#"<h{level} id="{id}">{}</h{level}>"#,
                        inner.trim()
                    );
                }
            }
            TagEnd::CodeBlock => self.finish_code_block(),
            TagEnd::List(ordered) => self.out.push_str(if ordered { "</ol>" } else { "</ul>" }),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    let img = html::image(&src, &alt, &title);
                    self.push_inline(&img);
                }
            }
            TagEnd::Table => self.out.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.table.end_head();
                self.out.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableCell => {
                let _ = write!(self.out, "</{}>", self.table.cell_tag());
                self.table.next_cell();
            }
            _ => {}
        }
    }

    fn finish_code_block(&mut self) {
        let (lang, source) = self.code.end();

        if let Some(lang) = lang.as_deref() {
            for processor in &mut self.processors {
                if let ProcessResult::Inline(highlighted) = processor.process(lang, &source) {
                    self.out.push_str(&highlighted);
                    return;
                }
            }
        }
        html::code_block(lang.as_deref(), &source, &mut self.out);
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_text(text));
        } else {
            self.out.push_str(&escape_text(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        let html = format!("<code>{}</code>", escape_text(code));
        self.push_inline(&html);
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
        } else if self.heading.is_active() {
            self.heading.push_text(" ");
            self.heading.push_html("\n");
        } else {
            self.out.push('\n');
        }
    }
}

/// Opening markup for tags that carry no state.
fn open_markup(tag: &Tag<'_>) -> Option<&'static str> {
    let markup = match tag {
        Tag::Paragraph => "<p>",
        Tag::BlockQuote(_) => "<blockquote>",
        Tag::Item => "<li>",
        Tag::Emphasis => "<em>",
        Tag::Strong => "<strong>",
        Tag::Strikethrough => "<s>",
        _ => return None,
    };
    Some(markup)
}

/// Closing markup for tags that carry no state.
fn close_markup(tag: &TagEnd) -> Option<&'static str> {
    let markup = match tag {
        TagEnd::Paragraph => "</p>",
        TagEnd::BlockQuote(_) => "</blockquote>",
        TagEnd::Item => "</li>",
        TagEnd::TableRow => "</tr>",
        TagEnd::Emphasis => "</em>",
        TagEnd::Strong => "</strong>",
        TagEnd::Strikethrough => "</s>",
        TagEnd::Link => "</a>",
        _ => return None,
    };
    Some(markup)
}
