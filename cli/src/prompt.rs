//! Terminal-backed input provider built on `dialoguer`.

use std::io::ErrorKind;

use command_dispatch_core::prompt::{InputProvider, PromptError, SelectOption};
use dialoguer::{Input, Select};

/// Interactive prompts on the controlling terminal.
///
/// Cancellation (Esc on a menu, Ctrl-C on any prompt) maps to
/// [`PromptError::Cancelled`], which the engine turns into a clean
/// exit. Any other terminal failure maps to [`PromptError::Failed`].
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn map_dialoguer_error(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(io) if io.kind() == ErrorKind::Interrupted => PromptError::Cancelled,
        other => PromptError::Failed(other.to_string()),
    }
}

impl InputProvider for TerminalPrompter {
    fn select(&mut self, title: &str, options: &[SelectOption]) -> Result<String, PromptError> {
        let labels: Vec<String> = options.iter().map(|o| o.display()).collect();
        let chosen = Select::new()
            .with_prompt(title)
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(map_dialoguer_error)?;
        match chosen {
            Some(index) => Ok(options[index].value.clone()),
            None => Err(PromptError::Cancelled),
        }
    }

    fn text(&mut self, title: &str, initial: Option<&str>) -> Result<String, PromptError> {
        let mut prompt = Input::<String>::new()
            .with_prompt(title)
            .validate_with(|value: &String| {
                if value.trim().is_empty() {
                    Err("a value is required")
                } else {
                    Ok(())
                }
            });
        if let Some(initial) = initial {
            prompt = prompt.with_initial_text(initial);
        }
        prompt.interact_text().map_err(map_dialoguer_error)
    }

    fn number(&mut self, title: &str, initial: Option<f64>) -> Result<Option<f64>, PromptError> {
        let mut prompt = Input::<String>::new().with_prompt(title);
        if let Some(initial) = initial {
            prompt = prompt.with_initial_text(initial.to_string());
        }
        let raw = prompt.interact_text().map_err(map_dialoguer_error)?;
        // A non-numeric entry is an input failure, not a cancellation:
        // the caller skips the field and lets the parser report it.
        Ok(raw.trim().parse::<f64>().ok())
    }
}
