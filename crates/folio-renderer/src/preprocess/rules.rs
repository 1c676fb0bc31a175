//! Weighted horizontal rules.
//!
//! A line made only of dashes becomes an `<hr>` whose class is chosen by the
//! number of dashes:
//!
//! | Dashes | Output |
//! |--------|--------|
//! | 3 | `<hr class="hr-heavy">` |
//! | 4 | `<hr class="hr-medium">` |
//! | 5 | `<hr class="hr-light">` |
//! | 6+ | `<hr class="hr-mini">` |
//!
//! One and two dashes, and every other line, are left alone.

use super::Preprocessor;

/// Visual weight of a reclassified rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleWeight {
    Heavy,
    Medium,
    Light,
    Mini,
}

impl RuleWeight {
    /// Map a dash run length to a weight.
    #[must_use]
    pub fn from_run_length(len: usize) -> Option<Self> {
        match len {
            3 => Some(Self::Heavy),
            4 => Some(Self::Medium),
            5 => Some(Self::Light),
            n if n >= 6 => Some(Self::Mini),
            _ => None,
        }
    }

    /// CSS class carried by the generated rule.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Heavy => "hr-heavy",
            Self::Medium => "hr-medium",
            Self::Light => "hr-light",
            Self::Mini => "hr-mini",
        }
    }

    /// The replacement line.
    #[must_use]
    pub fn to_html(self) -> String {
        format!(r#"<hr class="{}">"#, self.class_name())
    }
}

/// Classify a single line.
///
/// Returns `None` unless the trimmed line is a non-empty run of `-` with a
/// length that maps to a [`RuleWeight`].
#[must_use]
pub fn classify(line: &str) -> Option<RuleWeight> {
    let trimmed = line.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b == b'-') {
        return None;
    }
    RuleWeight::from_run_length(trimmed.len())
}

/// Preprocessor replacing dash-only lines with weighted rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct HorizontalRulePreprocessor;

impl Preprocessor for HorizontalRulePreprocessor {
    fn name(&self) -> &'static str {
        "hr_weights"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn run(&self, lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|line| match classify(&line) {
                Some(weight) => weight.to_html(),
                None => line,
            })
            .collect()
    }
}
