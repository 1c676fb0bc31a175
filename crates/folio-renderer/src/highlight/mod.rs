//! Syntax highlighting for Asa code blocks.
//!
//! [`AsaLexer`] splits source into `(TokenKind, &str)` pairs and
//! [`AsaHighlighter`] turns them into `<span>`s with short CSS classes, so
//! existing Pygments-style stylesheets apply unchanged.

mod asa;

use std::fmt::Write;

pub use asa::AsaLexer;

use crate::code_block::{CodeBlockProcessor, ProcessResult};
use crate::state::escape_text;

/// Token classification produced by [`AsaLexer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Whitespace and other unstyled text.
    Text,
    /// A character no rule matched.
    Error,
    CommentSingle,
    CommentMultiline,
    /// `#import` and other compiler directives.
    KeywordNamespace,
    /// Control flow keywords.
    Keyword,
    /// Declaration keywords and built-in types.
    KeywordType,
    /// Storage modifiers (`const`, `ref`, ...).
    KeywordDeclaration,
    KeywordConstant,
    /// `this`, `void`, `super`.
    NameBuiltinPseudo,
    NameFunction,
    NameVariable,
    NameNamespace,
    Name,
    Operator,
    Punctuation,
    NumberHex,
    NumberOct,
    NumberBin,
    NumberFloat,
    NumberInteger,
    String,
    StringChar,
}

impl TokenKind {
    /// CSS class for the token, `None` for plain text.
    #[must_use]
    pub fn css_class(self) -> Option<&'static str> {
        let class = match self {
            Self::Text => return None,
            Self::Error => "err",
            Self::CommentSingle => "c1",
            Self::CommentMultiline => "cm",
            Self::KeywordNamespace => "kn",
            Self::Keyword => "k",
            Self::KeywordType => "kt",
            Self::KeywordDeclaration => "kd",
            Self::KeywordConstant => "kc",
            Self::NameBuiltinPseudo => "bp",
            Self::NameFunction => "nf",
            Self::NameVariable => "nv",
            Self::NameNamespace => "nn",
            Self::Name => "n",
            Self::Operator => "o",
            Self::Punctuation => "p",
            Self::NumberHex => "mh",
            Self::NumberOct => "mo",
            Self::NumberBin => "mb",
            Self::NumberFloat => "mf",
            Self::NumberInteger => "mi",
            Self::String => "s",
            Self::StringChar => "sc",
        };
        Some(class)
    }
}

/// Code block processor highlighting `asa` fences.
///
/// Blocks tagged `asa`, or with a `*.asa` file name as their tag, are
/// replaced by highlighted HTML. Everything else passes through.
///
/// ```
/// use folio_renderer::{AsaHighlighter, CodeBlockProcessor, ProcessResult};
///
/// let mut highlighter = AsaHighlighter::new();
/// assert_eq!(
///     highlighter.process("asa", "x"),
///     ProcessResult::Inline(
///         r#"<pre><code class="language-asa"><span class="n">x</span></code></pre>"#.to_owned()
///     )
/// );
/// assert_eq!(highlighter.process("rust", "x"), ProcessResult::PassThrough);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AsaHighlighter {
    lexer: AsaLexer,
}

impl AsaHighlighter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight source into a `<pre><code>` block.
    #[must_use]
    pub fn highlight(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len() * 2);
        out.push_str(r#"<pre><code class="language-asa">"#);

        // Adjacent tokens of the same kind share a span.
        let mut pending: Option<(TokenKind, String)> = None;
        for (kind, text) in self.lexer.tokenize(source) {
            match &mut pending {
                Some((current, buffer)) if *current == kind => buffer.push_str(text),
                _ => {
                    if let Some((current, buffer)) = pending.take() {
                        write_token(&mut out, current, &buffer);
                    }
                    pending = Some((kind, text.to_owned()));
                }
            }
        }
        if let Some((kind, buffer)) = pending {
            write_token(&mut out, kind, &buffer);
        }

        out.push_str("</code></pre>");
        out
    }
}

impl CodeBlockProcessor for AsaHighlighter {
    fn process(&mut self, language: &str, source: &str) -> ProcessResult {
        if is_asa(language) {
            ProcessResult::Inline(self.highlight(source))
        } else {
            ProcessResult::PassThrough
        }
    }
}

fn is_asa(language: &str) -> bool {
    language.eq_ignore_ascii_case("asa")
        || language
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("asa"))
}

fn write_token(out: &mut String, kind: TokenKind, text: &str) {
    match kind.css_class() {
        Some(class) => write!(out, r#"<span class="{class}">{}</span>"#, escape_text(text)).unwrap(),
        None => out.push_str(&escape_text(text)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn highlight(source: &str) -> String {
        AsaHighlighter::new().highlight(source)
    }

    #[test]
    fn test_language_matching() {
        assert!(is_asa("asa"));
        assert!(is_asa("ASA"));
        assert!(is_asa("main.asa"));
        assert!(!is_asa(".asa"));
        assert!(!is_asa("rust"));
        assert!(!is_asa("asap"));
    }

    #[test]
    fn test_plain_text_is_not_wrapped() {
        assert_eq!(
            highlight("a b"),
            r#"<pre><code class="language-asa"><span class="n">a</span> <span class="n">b</span></code></pre>"#
        );
    }

    #[test]
    fn test_adjacent_tokens_merge() {
        let html = highlight("/* one\ntwo */");
        assert_eq!(html.matches("<span").count(), 1);
        assert!(html.contains("<span class=\"cm\">/* one\ntwo */</span>"));
    }

    #[test]
    fn test_escapes_token_text() {
        let html = highlight("a < b && c");
        assert!(html.contains(r#"<span class="o">&lt;</span>"#));
        assert!(html.contains(r#"<span class="o">&amp;&amp;</span>"#));
    }

    #[test]
    fn test_string_quotes_kept() {
        let html = highlight(r#"s := "hi";"#);
        assert!(html.contains(r#"<span class="s">"hi"</span>"#));
    }

    #[test]
    fn test_function_definition() {
        let html = highlight("main :: int() {\n    return 0;\n}\n");
        assert!(html.contains(r#"<span class="nf">main</span>"#));
        assert!(html.contains(r#"<span class="o">::</span>"#));
        assert!(html.contains(r#"<span class="kt">int</span>"#));
        assert!(html.contains(r#"<span class="k">return</span>"#));
        assert!(html.contains(r#"<span class="mi">0</span>"#));
    }

    #[test]
    fn test_processor_passes_other_languages() {
        let mut highlighter = AsaHighlighter::new();
        assert_eq!(highlighter.process("python", "x"), ProcessResult::PassThrough);
        assert!(matches!(
            highlighter.process("lib.asa", "x"),
            ProcessResult::Inline(_)
        ));
    }

    #[test]
    fn test_every_kind_but_text_has_a_class() {
        assert_eq!(TokenKind::Text.css_class(), None);
        assert_eq!(TokenKind::Error.css_class(), Some("err"));
        assert_eq!(TokenKind::NumberFloat.css_class(), Some("mf"));
    }
}
