//! Line preprocessors run before markdown parsing.
//!
//! Each [`Preprocessor`] consumes a line sequence and produces a new one.
//! Stages are registered on a [`PreprocessorPipeline`] with a priority and run
//! highest priority first, so the standard pipeline applies:
//!
//! | Stage | Priority |
//! |-------|----------|
//! | [`HorizontalRulePreprocessor`] (`hr_weights`) | 100 |
//! | [`InlineNotePreprocessor`] (`inline_note`) | 27 |
//!
//! Every stage is a pure function of its input lines; no state is kept between
//! runs.

mod inline_note;
mod rules;

pub use inline_note::InlineNotePreprocessor;
pub use rules::{HorizontalRulePreprocessor, RuleWeight, classify};

/// A line-oriented markdown rewrite.
pub trait Preprocessor: Send + Sync {
    /// Registration name, used in logs.
    fn name(&self) -> &'static str;

    /// Ordering key; higher runs first.
    fn priority(&self) -> i32;

    /// Transform a line sequence.
    fn run(&self, lines: Vec<String>) -> Vec<String>;
}

/// Ordered collection of preprocessors.
///
/// # Example
///
/// ```
/// use folio_renderer::PreprocessorPipeline;
///
/// let output = PreprocessorPipeline::standard().process("intro\n---\n");
/// assert_eq!(output, "intro\n<hr class=\"hr-heavy\">\n");
/// ```
#[derive(Default)]
pub struct PreprocessorPipeline {
    stages: Vec<Box<dyn Preprocessor>>,
}

impl PreprocessorPipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the pipeline used for blog posts.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_stage(HorizontalRulePreprocessor)
            .with_stage(InlineNotePreprocessor)
    }

    /// Register a stage.
    ///
    /// Stages are kept sorted by descending priority; equal priorities keep
    /// registration order.
    #[must_use]
    pub fn with_stage<P: Preprocessor + 'static>(mut self, stage: P) -> Self {
        self.stages.push(Box::new(stage));
        self.stages.sort_by_key(|s| std::cmp::Reverse(s.priority()));
        self
    }

    /// Names of registered stages in execution order.
    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }

    /// Run all stages over a line sequence.
    #[must_use]
    pub fn run(&self, lines: Vec<String>) -> Vec<String> {
        self.stages.iter().fold(lines, |lines, stage| {
            tracing::trace!(stage = stage.name(), lines = lines.len(), "Running preprocessor");
            stage.run(lines)
        })
    }

    /// Run all stages over markdown text.
    ///
    /// The text is split into lines and joined back with `\n`; a trailing
    /// newline on the input is kept.
    #[must_use]
    pub fn process(&self, input: &str) -> String {
        let lines = input.lines().map(str::to_owned).collect();
        let mut output = self.run(lines).join("\n");
        if input.ends_with('\n') {
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Tag(&'static str, i32);

    impl Preprocessor for Tag {
        fn name(&self) -> &'static str {
            self.0
        }

        fn priority(&self) -> i32 {
            self.1
        }

        fn run(&self, mut lines: Vec<String>) -> Vec<String> {
            lines.push(self.0.to_owned());
            lines
        }
    }

    #[test]
    fn test_stages_run_by_descending_priority() {
        let pipeline = PreprocessorPipeline::new()
            .with_stage(Tag("low", 1))
            .with_stage(Tag("high", 50))
            .with_stage(Tag("mid", 10));

        assert_eq!(pipeline.run(Vec::new()), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_equal_priority_keeps_registration_order() {
        let pipeline = PreprocessorPipeline::new()
            .with_stage(Tag("first", 5))
            .with_stage(Tag("second", 5));

        assert_eq!(
            pipeline.stage_names().collect::<Vec<_>>(),
            vec!["first", "second"]
        );
    }

    #[test]
    fn test_standard_order() {
        let pipeline = PreprocessorPipeline::standard();
        assert_eq!(
            pipeline.stage_names().collect::<Vec<_>>(),
            vec!["hr_weights", "inline_note"]
        );
    }

    #[test]
    fn test_process_preserves_trailing_newline() {
        let pipeline = PreprocessorPipeline::standard();
        assert_eq!(pipeline.process("a\nb\n"), "a\nb\n");
        assert_eq!(pipeline.process("a\nb"), "a\nb");
        assert_eq!(pipeline.process(""), "");
    }

    #[test]
    fn test_rules_inside_paired_note_body() {
        let input = "```\ncode\n```\n!!! tip inline\n    ----\n";
        let output = PreprocessorPipeline::standard().process(input);
        // The rule line is reclassified first, so its body line is no longer
        // indented and ends the note.
        assert!(output.contains(r#"<hr class="hr-medium">"#));
        assert!(output.contains(r#"<div class="inline-note inline-note-tip">"#));
    }
}
