//! Code block processor trait.

/// Outcome of offering a code block to a [`CodeBlockProcessor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// The processor does not handle this block; try the next one.
    PassThrough,
    /// Replace the block with this HTML.
    Inline(String),
}

/// Custom handling for fenced code blocks.
///
/// Processors registered with
/// [`MarkdownRenderer::with_processor`](crate::MarkdownRenderer::with_processor)
/// are consulted in order. The first one returning something other than
/// [`ProcessResult::PassThrough`] wins; otherwise the block is
/// written as a plain `<pre><code>`.
pub trait CodeBlockProcessor {
    /// Process a code block with the given language tag and source text.
    fn process(&mut self, language: &str, source: &str) -> ProcessResult;
}

/// Split a fence info string into the language tag.
///
/// Only the first whitespace-separated word is used; attributes such as
/// `python title="x"` are ignored.
pub(crate) fn parse_fence_language(info: &str) -> Option<String> {
    info.split_whitespace()
        .next()
        .map(|lang| lang.trim_start_matches('{').trim_end_matches('}'))
        .filter(|lang| !lang.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fence_language() {
        assert_eq!(parse_fence_language("rust"), Some("rust".to_owned()));
        assert_eq!(
            parse_fence_language("python title=\"x.py\""),
            Some("python".to_owned())
        );
        assert_eq!(parse_fence_language("{asa}"), Some("asa".to_owned()));
    }

    #[test]
    fn test_parse_fence_language_empty() {
        assert_eq!(parse_fence_language(""), None);
        assert_eq!(parse_fence_language("   "), None);
    }
}
