//! Backtick fence recognition for the line preprocessors.
//!
//! Unlike a full `CommonMark` fence tracker, the preprocessors only recognise
//! backtick fences starting in the first column: an opening fence is three or
//! more backticks at line start (an info string may follow), a closing fence is
//! three or more backticks alone on the line.

/// Minimum number of backticks forming a fence.
const FENCE_LEN: usize = 3;

/// Count the run of backticks at the start of `line`.
fn backtick_run(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b'`').count()
}

/// Check whether `line` opens a fenced code block.
pub(crate) fn is_fence_open(line: &str) -> bool {
    backtick_run(line) >= FENCE_LEN
}

/// Check whether `line` closes a fenced code block.
///
/// Only whitespace may follow the backticks.
pub(crate) fn is_fence_close(line: &str) -> bool {
    let count = backtick_run(line);
    count >= FENCE_LEN && line[count..].chars().all(char::is_whitespace)
}
