//! Interactive fallback mode.
//!
//! When invoked with `i` (or chosen from the no-input prompt), the
//! engine offers a menu of directly runnable commands and a guided
//! per-field prompt sequence for commands that require arguments. The
//! collected values become a synthetic argv handed to normal dispatch.

use tracing::debug;

use crate::dispatch::{Outcome, run_named};
use crate::prompt::{InputProvider, PromptError, SelectOption};
use crate::registry::{CommandRegistry, HandlerError};
use crate::types::{ArgSpec, CommandSchema};

/// Menu value for the "needs arguments" sentinel entry.
const NEEDS_ARGS_CHOICE: &str = "__needs_args__";

/// Splits commands into directly runnable names and names that require
/// arguments, both in display order.
///
/// A command is directly runnable when its schema has no positional
/// argument without a default (commands without a schema qualify).
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{partition_commands, Argument, Command, CommandRegistry, CommandSchema};
///
/// let mut registry = CommandRegistry::new();
/// registry.register("hello", Command::new("Say hello", |_| Ok(())));
/// registry.register(
///     "create",
///     Command::new("Create a project", |_| Ok(())).with_schema(
///         CommandSchema::new().with("name", Argument::positional_string("name", "Name", None)),
///     ),
/// );
///
/// let (runnable, needs_args) = partition_commands(&registry);
/// assert_eq!(runnable, vec!["hello"]);
/// assert_eq!(needs_args, vec!["create"]);
/// ```
pub fn partition_commands(registry: &CommandRegistry) -> (Vec<&str>, Vec<&str>) {
    let mut runnable = Vec::new();
    let mut needs_args = Vec::new();
    for (name, command) in registry.ordered() {
        if command.runnable_without_args() {
            runnable.push(name);
        } else {
            needs_args.push(name);
        }
    }
    (runnable, needs_args)
}

/// Prompts for every required positional field in declaration order
/// and returns the synthetic argv (values only, no flags).
///
/// A numeric prompt answering `None` (input failure, not cancellation)
/// simply omits that token; the missing value then surfaces as a
/// regular parse error during dispatch rather than succeeding
/// silently.
pub fn collect_required_argv(
    schema: &CommandSchema,
    input: &mut dyn InputProvider,
) -> Result<Vec<String>, PromptError> {
    let mut argv = Vec::new();
    for entry in schema.positionals().filter(|e| e.arg.spec.is_required()) {
        let title = if entry.arg.description.is_empty() {
            entry.arg.name.clone()
        } else {
            format!("{} ({})", entry.arg.name, entry.arg.description)
        };
        match &entry.arg.spec {
            ArgSpec::PositionalString { .. } => argv.push(input.text(&title, None)?),
            ArgSpec::PositionalNumber { .. } => match input.number(&title, None)? {
                Some(value) => argv.push(number_token(value)),
                None => debug!(field = %entry.arg.name, "numeric input failed, skipping field"),
            },
            // required implies positional
            ArgSpec::Flag | ArgSpec::StringFlag { .. } | ArgSpec::NumberFlag { .. } => {}
        }
    }
    Ok(argv)
}

/// Renders a number the way it would appear on a command line:
/// integral values without a trailing `.0`.
fn number_token(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// The interactive menu flow.
pub(crate) fn run_interactive<P: InputProvider>(
    registry: &CommandRegistry,
    input: &mut P,
) -> Result<Outcome, HandlerError> {
    let (runnable, needs_args) = partition_commands(registry);
    debug!(
        runnable = runnable.len(),
        needs_args = needs_args.len(),
        "entering interactive mode"
    );

    let mut options: Vec<SelectOption> = runnable
        .iter()
        .map(|name| menu_option(registry, name))
        .collect();
    if !needs_args.is_empty() {
        options.push(
            SelectOption::new(NEEDS_ARGS_CHOICE).with_label("A command that needs arguments"),
        );
    }

    let choice = match input.select("Choose a command", &options) {
        Ok(choice) => choice,
        Err(PromptError::Cancelled) => return Ok(Outcome::success()),
        Err(PromptError::Failed(reason)) => return Ok(Outcome::failure(reason)),
    };

    if choice != NEEDS_ARGS_CHOICE {
        return run_named(registry, &choice, &[]);
    }

    let options: Vec<SelectOption> = needs_args
        .iter()
        .map(|name| menu_option(registry, name))
        .collect();
    let name = match input.select("Which command?", &options) {
        Ok(name) => name,
        Err(PromptError::Cancelled) => return Ok(Outcome::success()),
        Err(PromptError::Failed(reason)) => return Ok(Outcome::failure(reason)),
    };

    let Some(schema) = registry.get(&name).and_then(|c| c.schema()) else {
        // needs_args membership guarantees a schema
        return run_named(registry, &name, &[]);
    };
    match collect_required_argv(schema, input) {
        Ok(argv) => run_named(registry, &name, &argv),
        Err(PromptError::Cancelled) => Ok(Outcome::success()),
        Err(PromptError::Failed(reason)) => Ok(Outcome::failure(reason)),
    }
}

fn menu_option(registry: &CommandRegistry, name: &str) -> SelectOption {
    let option = SelectOption::new(name);
    match registry.get(name) {
        Some(command) if !command.description().is_empty() => {
            option.with_hint(command.description())
        }
        _ => option,
    }
}
