//! HTML fragments the renderer writes for code blocks, images and links.

use std::borrow::Cow;
use std::fmt::Write;

use crate::state::escape_html;

/// Write a code block no processor claimed.
pub(crate) fn code_block(lang: Option<&str>, source: &str, out: &mut String) {
    match lang {
        Some(lang) => {
            let _ = write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(source)
            );
        }
        None => {
            let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(source));
        }
    }
}

/// Build an `<img>` tag; `title` is omitted when empty.
pub(crate) fn image(src: &str, alt: &str, title: &str) -> String {
    let mut tag = format!(r#"<img src="{}""#, escape_html(src));
    if !title.is_empty() {
        let _ = write!(tag, r#" title="{}""#, escape_html(title));
    }
    let _ = write!(tag, r#" alt="{}">"#, escape_html(alt));
    tag
}

/// Disabled checkbox for a task list item.
pub(crate) fn checkbox(checked: bool) -> &'static str {
    if checked {
        r#"<input type="checkbox" disabled checked> "#
    } else {
        r#"<input type="checkbox" disabled> "#
    }
}

/// Point relative links at sibling posts to their generated pages.
///
/// `other.md#part` becomes `other.html#part`. Absolute, protocol-relative,
/// `mailto:` and fragment-only links are left alone.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
pub(crate) fn rewrite_post_link(url: &str) -> Cow<'_, str> {
    let external = ["http://", "https://", "//", "mailto:", "#"]
        .iter()
        .any(|prefix| url.starts_with(prefix));
    if external {
        return Cow::Borrowed(url);
    }

    let (path, fragment) = url.split_at(url.find('#').unwrap_or(url.len()));
    match path.strip_suffix(".md") {
        Some(stem) => Cow::Owned(format!("{stem}.html{fragment}")),
        None => Cow::Borrowed(url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        code_block(Some("rust"), "fn main() {}", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-rust">fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_escapes_source() {
        let mut out = String::new();
        code_block(None, "a < b", &mut out);
        assert_eq!(out, "<pre><code>a &lt; b</code></pre>");
    }

    #[test]
    fn test_image_title_is_optional() {
        assert_eq!(
            image("shot.png", "Screenshot", "Build output"),
            r#"<img src="shot.png" title="Build output" alt="Screenshot">"#
        );
        assert_eq!(
            image("shot.png", "Screenshot", ""),
            r#"<img src="shot.png" alt="Screenshot">"#
        );
    }

    #[test]
    fn test_rewrite_sibling_post() {
        assert_eq!(rewrite_post_link("lexer.md"), "lexer.html");
        assert_eq!(rewrite_post_link("./lexer.md"), "./lexer.html");
        assert_eq!(rewrite_post_link("lexer.md#tokens"), "lexer.html#tokens");
    }

    #[test]
    fn test_rewrite_leaves_other_links() {
        for url in [
            "https://example.com/readme.md",
            "//cdn.example.com/notes.md",
            "#section",
            "image.png",
            "mailto:me@example.com",
        ] {
            assert_eq!(rewrite_post_link(url), url);
        }
    }
}
