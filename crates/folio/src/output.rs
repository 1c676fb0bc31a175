//! Colored terminal output on stderr.

use std::fmt::Display;

use console::{Style, Term};

pub(crate) struct Output {
    term: Term,
    label: Style,
    ok: Style,
    failure: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().cyan().bold(),
            ok: Style::new().green(),
            failure: Style::new().red(),
        }
    }

    /// Print `name: value` with a highlighted name.
    pub(crate) fn field(&self, name: &str, value: impl Display) {
        let _ = self
            .term
            .write_line(&format!("{} {value}", self.label.apply_to(format!("{name}:"))));
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.ok.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.failure.apply_to(msg).to_string());
    }
}
