//! Description extraction from rendered pages.
//!
//! Pulls the text of paragraphs that are direct children of the post container
//! out of generated HTML, for index cards and `<meta name="description">`.
//! This is not an HTML parser: it only tracks how deeply it is nested inside
//! elements that are not on the transparent allow-list.

/// Default marker opening the post container.
pub const DEFAULT_CONTAINER_OPEN: &str = r#"<div class="post-content">"#;

/// Default marker ending the post container.
pub const DEFAULT_CONTAINER_CLOSE: &str = "<!-- /post-content -->";

/// Tags that never change nesting depth.
const DEFAULT_TRANSPARENT: [&str; 4] = ["p", "br", "img", "hr"];

/// Elements that never take a closing tag.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Extracts direct-child paragraph text from a container.
///
/// # Example
///
/// ```
/// use folio_renderer::DescriptionExtractor;
///
/// let html = r#"<div class="post-content"><h1>Title</h1><p>First &amp; best.</p>
/// <blockquote><p>Quoted.</p></blockquote><p>Second.</p></div><!-- /post-content -->"#;
///
/// let text = DescriptionExtractor::new().extract(html);
/// assert_eq!(text, "First & best.\nSecond.");
/// ```
#[derive(Clone, Debug)]
pub struct DescriptionExtractor {
    container_open: String,
    container_close: String,
    transparent: Vec<String>,
    captured: String,
    max_chars: usize,
}

impl Default for DescriptionExtractor {
    fn default() -> Self {
        Self {
            container_open: DEFAULT_CONTAINER_OPEN.to_owned(),
            container_close: DEFAULT_CONTAINER_CLOSE.to_owned(),
            transparent: DEFAULT_TRANSPARENT.iter().map(|&t| t.to_owned()).collect(),
            captured: "p".to_owned(),
            max_chars: 256,
        }
    }
}

impl DescriptionExtractor {
    /// Create an extractor with the default container markers and a 256 character budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the markers delimiting the container.
    #[must_use]
    pub fn with_container(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.container_open = open.into();
        self.container_close = close.into();
        self
    }

    /// Set the maximum number of characters returned.
    #[must_use]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Replace the transparent tag allow-list.
    #[must_use]
    pub fn with_transparent_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transparent = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Extract the description from rendered markup.
    ///
    /// Returns an empty string when the container is missing. Malformed markup
    /// never fails; at worst fewer paragraphs are found.
    #[must_use]
    pub fn extract(&self, html: &str) -> String {
        let Some(open_pos) = html.find(&self.container_open) else {
            return String::new();
        };
        let start = open_pos + self.container_open.len();
        let region = match html[start..].find(&self.container_close) {
            Some(len) => &html[start..start + len],
            None => &html[start..],
        };

        let mut output = String::new();
        let mut output_chars = 0;
        let mut depth: usize = 0;
        let mut pos = 0;

        while pos < region.len() && output_chars < self.max_chars {
            let rest = &region[pos..];

            if rest.starts_with("<!--") {
                pos += rest.find("-->").map_or(rest.len(), |end| end + 3);
                continue;
            }

            let Some(tag) = parse_tag(rest) else {
                // Plain character (or a stray `<`): step over it.
                pos += rest.chars().next().map_or(1, char::len_utf8);
                continue;
            };

            if tag.closing {
                if !self.is_transparent(tag.name) {
                    depth = depth.saturating_sub(1);
                }
                pos += tag.len;
            } else if tag.self_closing {
                pos += tag.len;
            } else if depth == 0 && tag.name.eq_ignore_ascii_case(&self.captured) {
                let content_start = pos + tag.len;
                let Some((content_len, close_len)) =
                    find_closing_tag(&region[content_start..], &self.captured)
                else {
                    pos += 1;
                    continue;
                };
                let content = &region[content_start..content_start + content_len];
                pos = content_start + content_len + close_len;

                if let Some(text) = paragraph_text(content) {
                    output_chars += text.chars().count() + 1;
                    output.push_str(&text);
                    output.push('\n');
                }
            } else {
                if !self.is_transparent(tag.name) {
                    depth += 1;
                }
                pos += tag.len;
            }
        }

        let truncated: String = output.chars().take(self.max_chars).collect();
        truncated.trim_end().to_owned()
    }

    fn is_transparent(&self, name: &str) -> bool {
        self.transparent
            .iter()
            .any(|t| t.eq_ignore_ascii_case(name))
    }
}

/// A tag found at the start of the scan position.
struct TagToken<'a> {
    name: &'a str,
    closing: bool,
    self_closing: bool,
    /// Byte length of the whole tag including `<` and `>`.
    len: usize,
}

/// Parse an element tag at the start of `s`.
///
/// Returns `None` unless `s` starts with `<name` or `</name` followed by a
/// terminating `>`. Quoted attribute values may contain `>`.
fn parse_tag(s: &str) -> Option<TagToken<'_>> {
    let after_lt = s.strip_prefix('<')?;
    let (closing, name_start) = match after_lt.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, after_lt),
    };

    if !name_start.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let name_len = name_start
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(name_start.len());
    let name = &name_start[..name_len];

    let after_name = &name_start[name_len..];
    if !after_name.starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/') {
        return None;
    }

    let mut quote: Option<char> = None;
    for (i, c) in after_name.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => {
                let before = after_name[..i].trim_end();
                let len = s.len() - after_name.len() + i + 1;
                return Some(TagToken {
                    name,
                    closing,
                    self_closing: !closing && before.ends_with('/'),
                    len,
                });
            }
            (None, _) => {}
        }
    }
    None
}

/// Find the first `</name>` in `s`.
///
/// Returns the byte offset where it starts and its length.
fn find_closing_tag(s: &str, name: &str) -> Option<(usize, usize)> {
    let mut search_from = 0;
    while let Some(found) = s[search_from..].find("</") {
        let offset = search_from + found;
        if let Some(tag) = parse_tag(&s[offset..])
            && tag.closing
            && tag.name.eq_ignore_ascii_case(name)
        {
            return Some((offset, tag.len));
        }
        search_from = offset + 2;
    }
    None
}

/// Text of a captured paragraph, or `None` when it holds only markup.
///
/// A paragraph made entirely of nested elements, such as a lone link or a
/// fully emphasised line, counts as markup.
fn paragraph_text(content: &str) -> Option<String> {
    let content = content.trim();
    if !has_bare_text(content) {
        return None;
    }
    let stripped = strip_tags(content);
    let text = decode_entities(&stripped);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

/// Whether `content` has non-whitespace text outside every nested element.
///
/// Balanced elements are skipped whole; void, self-closing and unmatched tags
/// are skipped on their own.
fn has_bare_text(content: &str) -> bool {
    let mut rest = content;
    while let Some(c) = rest.chars().next() {
        if rest.starts_with("<!--") {
            rest = rest.find("-->").map_or("", |end| &rest[end + 3..]);
            continue;
        }
        if let Some(tag) = parse_tag(rest) {
            let mut skip = tag.len;
            if !tag.closing
                && !tag.self_closing
                && !is_void(tag.name)
                && let Some((inner, close)) = find_closing_tag(&rest[tag.len..], tag.name)
            {
                skip += inner + close;
            }
            rest = &rest[skip..];
            continue;
        }
        if !c.is_whitespace() {
            return true;
        }
        rest = &rest[c.len_utf8()..];
    }
    false
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Remove every `<...>` sequence.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        match rest[lt..].find('>') {
            Some(gt) => rest = &rest[lt + gt + 1..],
            None => {
                rest = &rest[lt..];
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode `&lt;`, `&gt;` and `&amp;`.
///
/// `&amp;` is decoded last so `&amp;lt;` yields the literal text `&lt;`.
fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn wrap(inner: &str) -> String {
        format!("{DEFAULT_CONTAINER_OPEN}{inner}</div>{DEFAULT_CONTAINER_CLOSE}")
    }

    #[test]
    fn test_missing_container_is_empty() {
        let html = "<html><body><p>No container here.</p></body></html>";
        assert_eq!(DescriptionExtractor::new().extract(html), "");
    }

    #[test]
    fn test_single_paragraph() {
        let html = wrap("<p>Hello world.</p>");
        assert_eq!(DescriptionExtractor::new().extract(&html), "Hello world.");
    }

    #[test]
    fn test_multiple_paragraphs_joined_by_newline() {
        let html = wrap("<p>One.</p>\n<p>Two.</p>");
        assert_eq!(DescriptionExtractor::new().extract(&html), "One.\nTwo.");
    }

    #[test]
    fn test_truncates_to_budget() {
        let long = "a".repeat(300);
        let html = wrap(&format!("<p>{long}</p>"));
        let text = DescriptionExtractor::new().with_max_chars(256).extract(&html);
        assert_eq!(text, "a".repeat(256));
    }

    #[test]
    fn test_truncation_trims_trailing_whitespace() {
        let html = wrap("<p>abcd efgh</p>");
        let text = DescriptionExtractor::new().with_max_chars(5).extract(&html);
        assert_eq!(text, "abcd");
    }

    #[test]
    fn test_truncation_counts_characters() {
        let html = wrap("<p>éééééé</p>");
        let text = DescriptionExtractor::new().with_max_chars(3).extract(&html);
        assert_eq!(text, "ééé");
    }

    #[test]
    fn test_stops_after_budget_reached() {
        let html = wrap("<p>12345</p><p>later</p>");
        let text = DescriptionExtractor::new().with_max_chars(6).extract(&html);
        assert_eq!(text, "12345");
    }

    #[test]
    fn test_image_only_paragraph_skipped() {
        let html = wrap(r#"<p><img src="cover.png" alt="Cover"></p>"#);
        assert_eq!(DescriptionExtractor::new().extract(&html), "");
    }

    #[test]
    fn test_markup_only_paragraph_skipped_then_next_used() {
        let html = wrap(r#"<p> <a href="x"><img src="a.png"></a> </p><p>Real text.</p>"#);
        assert_eq!(DescriptionExtractor::new().extract(&html), "Real text.");
    }

    #[test]
    fn test_paragraph_of_nested_elements_skipped() {
        let html = wrap(r#"<p><em>All emphasis.</em></p><p><a href="x">Read more</a></p>"#);
        assert_eq!(DescriptionExtractor::new().extract(&html), "");
    }

    #[test]
    fn test_link_only_paragraph_skipped_then_next_used() {
        let html = wrap(r#"<p> <a href="x">Read more</a> </p><p>Real text.</p>"#);
        assert_eq!(DescriptionExtractor::new().extract(&html), "Real text.");
    }

    #[test]
    fn test_text_beside_nested_element_kept() {
        let html = wrap("<p>See <a>this</a></p>");
        assert_eq!(DescriptionExtractor::new().extract(&html), "See this");
    }

    #[test]
    fn test_has_bare_text() {
        assert!(!has_bare_text("<strong>Bold</strong> <br> <em>it</em>"));
        assert!(!has_bare_text(r#"<img src="a.png" /><!-- note -->"#));
        assert!(has_bare_text("<em>Lead</em>, then text"));
        assert!(has_bare_text("&amp;"));
    }

    #[test]
    fn test_nested_markup_stripped() {
        let html = wrap(r#"<p>Use <code>cargo</code> and <a href="x">read <em>docs</em></a>.</p>"#);
        assert_eq!(
            DescriptionExtractor::new().extract(&html),
            "Use cargo and read docs."
        );
    }

    #[test]
    fn test_entities_decoded() {
        let html = wrap("<p>a &lt; b &amp;&amp; c &gt; d, &amp;lt;</p>");
        assert_eq!(
            DescriptionExtractor::new().extract(&html),
            "a < b && c > d, &lt;"
        );
    }

    #[test]
    fn test_nested_paragraphs_ignored() {
        let html = wrap(
            "<blockquote><p>Quoted.</p></blockquote><ul><li><p>Item.</p></li></ul><p>Direct.</p>",
        );
        assert_eq!(DescriptionExtractor::new().extract(&html), "Direct.");
    }

    #[test]
    fn test_transparent_tags_keep_depth() {
        let html = wrap(r#"<hr class="hr-heavy"><br><img src="x.png"><p>Visible.</p>"#);
        assert_eq!(DescriptionExtractor::new().extract(&html), "Visible.");
    }

    #[test]
    fn test_unbalanced_close_clamps_depth() {
        let html = wrap("</section></div></span><p>Still found.</p>");
        assert_eq!(DescriptionExtractor::new().extract(&html), "Still found.");
    }

    #[test]
    fn test_unclosed_element_hides_rest() {
        let html = wrap("<section><p>Inside.</p><p>Also inside.</p>");
        assert_eq!(DescriptionExtractor::new().extract(&html), "");
    }

    #[test]
    fn test_missing_closing_paragraph() {
        let html = wrap("<p>Never closed");
        assert_eq!(DescriptionExtractor::new().extract(&html), "");
    }

    #[test]
    fn test_scan_bounded_by_close_marker() {
        let html = format!(
            "{DEFAULT_CONTAINER_OPEN}<p>Inside.</p>{DEFAULT_CONTAINER_CLOSE}<p>Footer.</p>"
        );
        assert_eq!(DescriptionExtractor::new().extract(&html), "Inside.");
    }

    #[test]
    fn test_missing_close_marker_scans_to_end() {
        let html = format!("{DEFAULT_CONTAINER_OPEN}<p>One.</p><p>Two.</p>");
        assert_eq!(DescriptionExtractor::new().extract(&html), "One.\nTwo.");
    }

    #[test]
    fn test_self_closing_tags_keep_depth() {
        let html = wrap(r#"<source src="a.ogg" /><p>After.</p>"#);
        assert_eq!(DescriptionExtractor::new().extract(&html), "After.");
    }

    #[test]
    fn test_comments_skipped() {
        let html = wrap("<!-- <div> --><p>After comment.</p>");
        assert_eq!(DescriptionExtractor::new().extract(&html), "After comment.");
    }

    #[test]
    fn test_quoted_gt_in_attribute() {
        let html = wrap(r#"<p title="a > b">Text.</p>"#);
        assert_eq!(DescriptionExtractor::new().extract(&html), "Text.");
    }

    #[test]
    fn test_inline_note_wrappers_are_not_direct_children() {
        let html = wrap(concat!(
            r#"<div class="code-with-inline-note"><div class="inline-note inline-note-tip">"#,
            "<p>Note text.</p></div></div><p>Body.</p>",
        ));
        assert_eq!(DescriptionExtractor::new().extract(&html), "Body.");
    }

    #[test]
    fn test_custom_container() {
        let html = "<main><p>Custom.</p></main>";
        let text = DescriptionExtractor::new()
            .with_container("<main>", "</main>")
            .extract(html);
        assert_eq!(text, "Custom.");
    }

    #[test]
    fn test_custom_transparent_tags() {
        let html = wrap("<span><p>Wrapped.</p></span>");
        assert_eq!(DescriptionExtractor::new().extract(&html), "");
        let text = DescriptionExtractor::new()
            .with_transparent_tags(["p", "span"])
            .extract(&html);
        assert_eq!(text, "Wrapped.");
    }

    #[test]
    fn test_parse_tag() {
        let tag = parse_tag(r#"<img src="a.png" />rest"#).unwrap();
        assert_eq!(tag.name, "img");
        assert!(tag.self_closing);
        assert_eq!(tag.len, r#"<img src="a.png" />"#.len());

        let tag = parse_tag("</DIV >").unwrap();
        assert!(tag.closing);
        assert_eq!(tag.name, "DIV");

        assert!(parse_tag("< p>").is_none());
        assert!(parse_tag("<!DOCTYPE html>").is_none());
        assert!(parse_tag("<p unterminated").is_none());
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("a <b>bold</b> c"), "a bold c");
        assert_eq!(strip_tags("dangling <tag"), "dangling <tag");
    }
}
