//! Renderer state tracking for code blocks, tables, images and headings.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (2-6; the title H1 is never listed).
    pub level: u8,
    /// Plain heading text.
    pub title: String,
    /// Anchor ID used in the rendered heading.
    pub id: String,
}

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text nodes. Quotes are left as-is outside attributes.
pub(crate) fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Code block collection state.
#[derive(Debug, Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    lang: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, lang: Option<String>) {
        self.active = true;
        self.lang = lang;
        self.buffer.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn push_newline(&mut self) {
        self.buffer.push('\n');
    }

    /// Finish the block and return its language and collected source.
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.lang.take(), std::mem::take(&mut self.buffer))
    }
}

/// Table rendering state.
#[derive(Debug, Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    /// Cell element for the current table section.
    pub(crate) fn cell_tag(&self) -> &'static str {
        if self.in_head { "th" } else { "td" }
    }

    /// Inline style attribute for the current cell alignment.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Image alt text collection state.
#[derive(Debug, Default)]
pub(crate) struct ImageState {
    depth: usize,
    alt: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        if self.depth == 0 {
            self.alt.clear();
        }
        self.depth += 1;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.depth > 0
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }

    pub(crate) fn end(&mut self) -> String {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            std::mem::take(&mut self.alt)
        } else {
            self.alt.clone()
        }
    }
}

/// Heading collection, ID generation and title extraction.
#[derive(Debug)]
pub(crate) struct HeadingState {
    extract_title: bool,
    title: Option<String>,
    current: Option<(u8, String, String)>,
    toc: Vec<TocEntry>,
    used_ids: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn new(extract_title: bool) -> Self {
        Self {
            extract_title,
            title: None,
            current: None,
            toc: Vec::new(),
            used_ids: HashMap::new(),
        }
    }

    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current = Some((level, String::new(), String::new()));
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        if let Some((_, plain, _)) = &mut self.current {
            plain.push_str(text);
        }
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        if let Some((_, _, buffer)) = &mut self.current {
            buffer.push_str(html);
        }
    }

    /// Finish the current heading.
    ///
    /// Returns `(level, id, inner html)`. The first H1 becomes the title when
    /// extraction is enabled and is left out of the table of contents.
    pub(crate) fn complete_heading(&mut self) -> Option<(u8, String, String)> {
        let (level, plain, html) = self.current.take()?;
        let plain = plain.trim().to_owned();
        let id = self.unique_id(&slugify(&plain));

        if level == 1 && self.extract_title && self.title.is_none() {
            self.title = Some(plain);
        } else {
            self.toc.push(TocEntry {
                level,
                title: plain,
                id: id.clone(),
            });
        }

        Some((level, id, html))
    }

    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }

    fn unique_id(&mut self, base: &str) -> String {
        let base = if base.is_empty() { "section" } else { base };
        let count = self.used_ids.entry(base.to_owned()).or_insert(0);
        let id = if *count == 0 {
            base.to_owned()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}

/// Build an anchor slug: lowercase alphanumerics, runs of anything else become `-`.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; 'Jerry'&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_text_keeps_quotes() {
        assert_eq!(escape_text(r#"say "hi" & <go>"#), r#"say "hi" &amp; &lt;go&gt;"#);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Section Title"), "section-title");
        assert_eq!(slugify("  What's new?  "), "what-s-new");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
    }

    #[test]
    fn test_unique_ids() {
        let mut state = HeadingState::new(false);
        assert_eq!(state.unique_id("faq"), "faq");
        assert_eq!(state.unique_id("faq"), "faq-1");
        assert_eq!(state.unique_id(""), "section");
    }

    #[test]
    fn test_first_h1_becomes_title() {
        let mut state = HeadingState::new(true);
        state.start_heading(1);
        state.push_text("Hello");
        state.complete_heading();
        state.start_heading(1);
        state.push_text("Second");
        state.complete_heading();

        assert_eq!(state.take_title(), Some("Hello".to_owned()));
        let toc = state.take_toc();
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].title, "Second");
    }

    #[test]
    fn test_table_alignment() {
        let mut table = TableState::default();
        table.start(vec![Alignment::None, Alignment::Right]);
        table.start_row();
        assert_eq!(table.cell_tag(), "td");
        assert_eq!(table.current_alignment_style(), "");
        table.next_cell();
        assert_eq!(
            table.current_alignment_style(),
            r#" style="text-align: right""#
        );
    }
}
