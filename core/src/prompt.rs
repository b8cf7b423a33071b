//! Interactive input provider seam.
//!
//! The dispatch engine consumes interactive input through the
//! [`InputProvider`] trait so terminal concerns stay outside the
//! engine. A terminal implementation lives in the binary crate;
//! [`ScriptedInput`] answers from a fixed queue for tests.

use std::collections::VecDeque;

use thiserror::Error;

/// Failures surfaced by an input provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// The user cancelled the prompt. Dispatch treats this as a clean
    /// exit (status 0), never as an error.
    #[error("cancelled")]
    Cancelled,
    /// The prompt failed for a reason other than cancellation (status 1).
    #[error("prompt failed: {0}")]
    Failed(String),
}

/// One entry in a selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value returned when this entry is chosen.
    pub value: String,
    /// Display label; falls back to `value` when `None`.
    pub label: Option<String>,
    /// Secondary text shown next to the label.
    pub hint: Option<String>,
}

impl SelectOption {
    /// Creates an option whose label is its value.
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: None,
            hint: None,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Sets the hint text.
    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    /// The text a menu should display for this option.
    pub fn display(&self) -> String {
        let label = self.label.as_deref().unwrap_or(&self.value);
        match &self.hint {
            Some(hint) => format!("{label} ({hint})"),
            None => label.to_string(),
        }
    }
}

/// Source of interactive input for the dispatch engine.
///
/// Every operation may suspend the flow waiting on the user.
/// Cancellation is reported as [`PromptError::Cancelled`]; the engine
/// converts it into a zero exit status without cleanup of its own.
pub trait InputProvider {
    /// Single choice among the given options; returns the chosen value.
    fn select(&mut self, title: &str, options: &[SelectOption]) -> Result<String, PromptError>;

    /// Free-form non-empty text.
    fn text(&mut self, title: &str, initial: Option<&str>) -> Result<String, PromptError>;

    /// Numeric input. `Ok(None)` signals a non-cancellation input
    /// failure (the field is skipped, not an error here).
    fn number(&mut self, title: &str, initial: Option<f64>) -> Result<Option<f64>, PromptError>;
}

/// A scripted answer for [`ScriptedInput`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedAnswer {
    /// Value returned from the next `select` call.
    Select(String),
    /// Value returned from the next `text` call.
    Text(String),
    /// Value returned from the next `number` call (`None` = input
    /// failure, field skipped).
    Number(Option<f64>),
    /// The next call of any kind reports cancellation.
    Cancel,
}

/// Queue-backed provider for driving interactive flows in tests.
///
/// Answers are consumed in order; a call with an empty or mismatched
/// queue panics, which keeps scripted tests honest about the prompt
/// sequence they expect.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::prompt::{InputProvider, ScriptedAnswer, ScriptedInput, SelectOption};
///
/// let mut input = ScriptedInput::new(vec![
///     ScriptedAnswer::Select("create".into()),
///     ScriptedAnswer::Text("my-app".into()),
/// ]);
/// let options = [SelectOption::new("create")];
/// assert_eq!(input.select("Choose", &options).unwrap(), "create");
/// assert_eq!(input.text("name", None).unwrap(), "my-app");
/// ```
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<ScriptedAnswer>,
}

impl ScriptedInput {
    /// Creates a provider that will answer from `answers` in order.
    pub fn new(answers: Vec<ScriptedAnswer>) -> Self {
        Self {
            answers: answers.into(),
        }
    }

    /// Whether every scripted answer was consumed.
    pub fn exhausted(&self) -> bool {
        self.answers.is_empty()
    }

    fn next(&mut self, call: &str) -> ScriptedAnswer {
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("scripted input exhausted at {call} call"))
    }
}

impl InputProvider for ScriptedInput {
    fn select(&mut self, title: &str, options: &[SelectOption]) -> Result<String, PromptError> {
        match self.next("select") {
            ScriptedAnswer::Select(value) => {
                assert!(
                    options.iter().any(|o| o.value == value),
                    "scripted select answer {value:?} not among options for {title:?}"
                );
                Ok(value)
            }
            ScriptedAnswer::Cancel => Err(PromptError::Cancelled),
            other => panic!("expected Select answer for {title:?}, got {other:?}"),
        }
    }

    fn text(&mut self, title: &str, _initial: Option<&str>) -> Result<String, PromptError> {
        match self.next("text") {
            ScriptedAnswer::Text(value) => Ok(value),
            ScriptedAnswer::Cancel => Err(PromptError::Cancelled),
            other => panic!("expected Text answer for {title:?}, got {other:?}"),
        }
    }

    fn number(&mut self, title: &str, _initial: Option<f64>) -> Result<Option<f64>, PromptError> {
        match self.next("number") {
            ScriptedAnswer::Number(value) => Ok(value),
            ScriptedAnswer::Cancel => Err(PromptError::Cancelled),
            other => panic!("expected Number answer for {title:?}, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_option_display() {
        assert_eq!(SelectOption::new("hello").display(), "hello");
        assert_eq!(
            SelectOption::new("hello").with_label("Say hello").display(),
            "Say hello"
        );
        assert_eq!(
            SelectOption::new("hello")
                .with_label("hello")
                .with_hint("Say hello")
                .display(),
            "hello (Say hello)"
        );
    }

    #[test]
    fn test_scripted_cancel_maps_to_cancelled() {
        let mut input = ScriptedInput::new(vec![ScriptedAnswer::Cancel]);
        let err = input.text("name", None).unwrap_err();
        assert_eq!(err, PromptError::Cancelled);
        assert!(input.exhausted());
    }

    #[test]
    fn test_scripted_number_failure_is_none() {
        let mut input = ScriptedInput::new(vec![ScriptedAnswer::Number(None)]);
        assert_eq!(input.number("port", None).unwrap(), None);
    }
}
