//! Inline notes attached to code blocks.
//!
//! A fenced code block followed (blank lines allowed) by an `inline` admonition
//! is wrapped so the note renders beside the code:
//!
//! ````markdown
//! ```asa
//! let x = 1;
//! ```
//! !!! warning inline
//!     Shadowing is not allowed here.
//! ````
//!
//! becomes
//!
//! ````markdown
//! <div class="code-with-inline-note">
//! <div class="inline-code-block">
//!
//! ```asa
//! let x = 1;
//! ```
//! </div>
//! <div class="inline-note inline-note-warning">
//! <div class="inline-note-title">Warning</div>
//!
//! Shadowing is not allowed here.
//!
//! </div>
//! </div>
//! ````
//!
//! The blank line after the code wrapper ends the HTML block so the fence is
//! parsed as markdown. Everything else passes through unchanged.

use std::sync::LazyLock;

use regex::Regex;

use super::Preprocessor;
use crate::fence::{is_fence_close, is_fence_open};
use crate::util::title_case;

/// `!!! <kind> inline`, with the kind captured.
static INLINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!!!\s+(\w+)\s+inline\s*$").unwrap());

/// Indentation marking an annotation body line.
const BODY_INDENT: &str = "    ";

/// Preprocessor pairing fenced code blocks with a trailing inline note.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineNotePreprocessor;

impl Preprocessor for InlineNotePreprocessor {
    fn name(&self) -> &'static str {
        "inline_note"
    }

    fn priority(&self) -> i32 {
        27
    }

    fn run(&self, lines: Vec<String>) -> Vec<String> {
        let mut output = Vec::with_capacity(lines.len() + 8);
        let mut i = 0;

        while i < lines.len() {
            if !is_fence_open(&lines[i]) {
                output.push(lines[i].clone());
                i += 1;
                continue;
            }

            let fence = collect_fence(&lines, i);
            i = fence.end;

            let next = skip_blank(&lines, i);
            let Some(kind) = lines.get(next).and_then(|line| inline_note_kind(line)) else {
                // No pairing: emit the span and the skipped blank lines, and let
                // the main loop look at the next non-blank line itself.
                output.extend_from_slice(&lines[fence.start..next]);
                i = next;
                continue;
            };

            let (body, body_end) = collect_body(&lines, next + 1);
            tracing::trace!(kind, body_lines = body.len(), "Paired inline note");
            emit_pair(&mut output, &lines[fence.start..fence.end], kind, &body);
            i = body_end;
        }

        output
    }
}

/// Half-open line range of a fence span.
struct FenceSpan {
    start: usize,
    end: usize,
}

/// Collect the fence opened at `start` through its closing line, or to the end
/// of input when it is never closed.
fn collect_fence(lines: &[String], start: usize) -> FenceSpan {
    let mut end = start + 1;
    while end < lines.len() && !is_fence_close(&lines[end]) {
        end += 1;
    }
    if end < lines.len() {
        // Include the closing fence
        end += 1;
    }
    FenceSpan { start, end }
}

/// Index of the first non-blank line at or after `from`.
fn skip_blank(lines: &[String], from: usize) -> usize {
    let mut i = from;
    while i < lines.len() && lines[i].trim().is_empty() {
        i += 1;
    }
    i
}

/// The note kind if `line` is an `!!! <kind> inline` marker.
fn inline_note_kind(line: &str) -> Option<&str> {
    INLINE_MARKER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Collect the indented note body starting at `from`.
///
/// Blank lines are consumed but dropped. Indented lines lose exactly their
/// first four characters. Returns the body and the index of the first line
/// after it.
fn collect_body(lines: &[String], from: usize) -> (Vec<String>, usize) {
    let mut body = Vec::new();
    let mut i = from;
    while i < lines.len() {
        let line = &lines[i];
        if line.trim().is_empty() {
            i += 1;
        } else if line.starts_with(BODY_INDENT) {
            body.push(line[BODY_INDENT.len()..].to_owned());
            i += 1;
        } else {
            break;
        }
    }
    (body, i)
}

/// Write the wrapped code block and note.
fn emit_pair(output: &mut Vec<String>, fence: &[String], kind: &str, body: &[String]) {
    output.push(r#"<div class="code-with-inline-note">"#.to_owned());
    output.push(r#"<div class="inline-code-block">"#.to_owned());
    output.push(String::new());
    output.extend_from_slice(fence);
    output.push("</div>".to_owned());
    output.push(format!(r#"<div class="inline-note inline-note-{kind}">"#));
    output.push(format!(
        r#"<div class="inline-note-title">{}</div>"#,
        title_case(kind)
    ));
    output.push(String::new());
    output.extend_from_slice(body);
    output.push(String::new());
    output.push("</div>".to_owned());
    output.push("</div>".to_owned());
}
