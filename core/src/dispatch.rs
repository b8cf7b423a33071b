//! Invocation resolution and dispatch.
//!
//! [`resolve`] classifies the first argv token into one of five
//! states; [`Dispatcher::dispatch`] executes the matched branch and
//! returns a typed [`Outcome`] instead of exiting the process. The
//! thin binary entry point owns the actual `std::process::exit`.

use tracing::debug;

use crate::help::{render_command, render_overview};
use crate::interactive::run_interactive;
use crate::parse::parse;
use crate::prompt::{InputProvider, PromptError, SelectOption};
use crate::registry::{CommandRegistry, HandlerError, RegistryError};

/// Help-requesting builtin tokens.
const HELP_TOKENS: [&str; 4] = ["h", "-h", "--help", "help"];
/// Interactive-mode builtin token.
const INTERACTIVE_TOKEN: &str = "i";

/// Terminal result of a dispatch: process exit code plus an optional
/// message for the user. Code 0 messages belong on stdout, non-zero on
/// stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Process exit code.
    pub code: i32,
    /// Text to print before exiting, if any.
    pub message: Option<String>,
}

impl Outcome {
    /// Successful completion with nothing to print.
    pub fn success() -> Self {
        Self {
            code: 0,
            message: None,
        }
    }

    /// Successful completion with output (help text, etc.).
    pub fn report(message: String) -> Self {
        Self {
            code: 0,
            message: Some(message),
        }
    }

    /// Failure with a user-visible message, exit code 1.
    pub fn failure(message: String) -> Self {
        Self {
            code: 1,
            message: Some(message),
        }
    }

    /// Whether the exit code is zero.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// The five resolution states of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation<'a> {
    /// Argv carries no command token.
    NoInput,
    /// First token is `h`, `-h`, `--help`, or `help`.
    HelpRequested,
    /// First token is `i`.
    InteractiveRequested,
    /// First token resolved to a registered command.
    NamedCommand {
        /// Canonical registry name (alias already resolved).
        name: &'a str,
        /// Remaining argv after the command token.
        rest: &'a [String],
    },
    /// First token matched nothing.
    UnknownCommand(&'a str),
}

/// Classifies argv (post-binary tokens) against the registry.
///
/// Builtins are checked before registry lookup, so a registered name
/// can never shadow `h` or `i`.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{resolve, Command, CommandRegistry, Invocation};
///
/// let mut registry = CommandRegistry::new();
/// registry.register("hello", Command::new("Say hello", |_| Ok(())).with_short("hi"));
///
/// let argv = vec!["hi".to_string(), "crew".to_string()];
/// match resolve(&registry, &argv) {
///     Invocation::NamedCommand { name, rest } => {
///         assert_eq!(name, "hello");
///         assert_eq!(rest, ["crew".to_string()]);
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
///
/// assert_eq!(resolve(&registry, &[]), Invocation::NoInput);
/// ```
pub fn resolve<'a>(registry: &'a CommandRegistry, argv: &'a [String]) -> Invocation<'a> {
    let Some(token) = argv.first() else {
        return Invocation::NoInput;
    };
    if HELP_TOKENS.contains(&token.as_str()) {
        return Invocation::HelpRequested;
    }
    if token == INTERACTIVE_TOKEN {
        return Invocation::InteractiveRequested;
    }
    match registry.find(token) {
        Some((name, _)) => Invocation::NamedCommand {
            name,
            rest: &argv[1..],
        },
        None => Invocation::UnknownCommand(token),
    }
}

/// Executes invocations against a validated registry.
#[derive(Debug)]
pub struct Dispatcher<'r, P: InputProvider> {
    registry: &'r CommandRegistry,
    input: P,
}

impl<'r, P: InputProvider> Dispatcher<'r, P> {
    /// Builds a dispatcher, validating the registry first so schema
    /// violations are reported before any input is read.
    pub fn new(registry: &'r CommandRegistry, input: P) -> Result<Self, RegistryError> {
        registry.validate()?;
        Ok(Self { registry, input })
    }

    /// Runs one invocation to its terminal state.
    ///
    /// Every engine-level condition (help, parse failure, unknown
    /// command, cancellation) is an `Ok(Outcome)`; only a handler
    /// failure propagates as `Err`, to terminate through the caller's
    /// own failure path.
    pub fn dispatch(&mut self, argv: &[String]) -> Result<Outcome, HandlerError> {
        match resolve(self.registry, argv) {
            Invocation::NoInput => self.choose_entry(),
            Invocation::HelpRequested => Ok(Outcome::report(render_overview(self.registry))),
            Invocation::InteractiveRequested => {
                run_interactive(self.registry, &mut self.input)
            }
            Invocation::NamedCommand { name, rest } => run_named(self.registry, name, rest),
            Invocation::UnknownCommand(token) => {
                debug!(token = %token, "unknown command");
                Ok(Outcome::failure(format!(
                    "Unknown command: {token}\n\n{}",
                    render_overview(self.registry)
                )))
            }
        }
    }

    /// No command on the command line: ask whether to print help or
    /// enter interactive mode.
    fn choose_entry(&mut self) -> Result<Outcome, HandlerError> {
        let options = [
            SelectOption::new("help").with_label("Show help"),
            SelectOption::new("interactive").with_label("Enter interactive mode"),
        ];
        match self.input.select("No command given. What now?", &options) {
            Ok(choice) if choice == "help" => {
                Ok(Outcome::report(render_overview(self.registry)))
            }
            Ok(_) => run_interactive(self.registry, &mut self.input),
            Err(PromptError::Cancelled) => Ok(Outcome::success()),
            Err(PromptError::Failed(reason)) => Ok(Outcome::failure(reason)),
        }
    }
}

/// Runs an already-resolved command against its remaining argv.
///
/// Shared by the `NamedCommand` branch and by interactive mode, whose
/// synthetic argv bypasses re-resolution.
pub(crate) fn run_named(
    registry: &CommandRegistry,
    name: &str,
    rest: &[String],
) -> Result<Outcome, HandlerError> {
    let Some(command) = registry.get(name) else {
        // resolve and interactive mode only hand over registered names
        return Ok(Outcome::failure(format!("Unknown command: {name}")));
    };
    if rest.iter().any(|t| t == "-h" || t == "--help") {
        return Ok(Outcome::report(render_command(name, command)));
    }
    let record = match parse(rest, command.schema()) {
        Ok(record) => record,
        Err(err) => {
            debug!(command = name, error = %err, "argument parse failed");
            return Ok(Outcome::failure(err.to_string()));
        }
    };
    debug!(command = name, "invoking handler");
    command.run(record)?;
    Ok(Outcome::success())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::prompt::{ScriptedAnswer, ScriptedInput};
    use crate::registry::Command;
    use crate::types::{Argument, CommandSchema};

    fn registry_with_hello() -> (CommandRegistry, Rc<Cell<bool>>) {
        let ran = Rc::new(Cell::new(false));
        let ran_flag = Rc::clone(&ran);
        let mut registry = CommandRegistry::new();
        registry.register(
            "hello",
            Command::new("Say hello", move |args| {
                assert!(args.is_empty());
                ran_flag.set(true);
                Ok(())
            })
            .with_short("hi"),
        );
        (registry, ran)
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_resolve_states() {
        let (registry, _) = registry_with_hello();
        assert_eq!(resolve(&registry, &[]), Invocation::NoInput);
        for token in ["h", "-h", "--help", "help"] {
            assert_eq!(
                resolve(&registry, &argv(&[token])),
                Invocation::HelpRequested
            );
        }
        assert_eq!(
            resolve(&registry, &argv(&["i"])),
            Invocation::InteractiveRequested
        );
        assert!(matches!(
            resolve(&registry, &argv(&["nope"])),
            Invocation::UnknownCommand("nope")
        ));
    }

    #[test]
    fn test_dispatch_runs_named_command() {
        let (registry, ran) = registry_with_hello();
        let mut dispatcher = Dispatcher::new(&registry, ScriptedInput::default()).unwrap();
        let outcome = dispatcher.dispatch(&argv(&["hello"])).unwrap();
        assert_eq!(outcome, Outcome::success());
        assert!(ran.get());
    }

    #[test]
    fn test_dispatch_resolves_short_alias() {
        let (registry, ran) = registry_with_hello();
        let mut dispatcher = Dispatcher::new(&registry, ScriptedInput::default()).unwrap();
        let outcome = dispatcher.dispatch(&argv(&["hi"])).unwrap();
        assert_eq!(outcome, Outcome::success());
        assert!(ran.get());
    }

    #[test]
    fn test_dispatch_rejects_invalid_registry() {
        let mut registry = CommandRegistry::new();
        registry.register("x", Command::new("", |_| Ok(())).with_short("i"));
        let err = Dispatcher::new(&registry, ScriptedInput::default()).unwrap_err();
        assert_eq!(err, RegistryError::ReservedShort("i".into()));
    }

    #[test]
    fn test_dispatch_unknown_command_fails_with_help_dump() {
        let (registry, _) = registry_with_hello();
        let mut dispatcher = Dispatcher::new(&registry, ScriptedInput::default()).unwrap();
        let outcome = dispatcher.dispatch(&argv(&["bogus"])).unwrap();
        assert_eq!(outcome.code, 1);
        let message = outcome.message.unwrap();
        assert!(message.starts_with("Unknown command: bogus"));
        assert!(message.contains("Commands:"));
    }

    #[test]
    fn test_dispatch_parse_error_is_failure_outcome() {
        let mut registry = CommandRegistry::new();
        registry.register(
            "server",
            Command::new("Run the server", |_| panic!("handler must not run"))
                .with_schema(CommandSchema::new().with(
                    "port",
                    Argument::positional_number("port", "Port", None),
                )),
        );
        let mut dispatcher = Dispatcher::new(&registry, ScriptedInput::default()).unwrap();
        let outcome = dispatcher.dispatch(&argv(&["server", "abc"])).unwrap();
        assert_eq!(outcome.code, 1);
        assert_eq!(
            outcome.message.as_deref(),
            Some("Invalid number \"abc\" for port")
        );
    }

    #[test]
    fn test_dispatch_command_help_flag_renders_command_help() {
        let (registry, ran) = registry_with_hello();
        let mut dispatcher = Dispatcher::new(&registry, ScriptedInput::default()).unwrap();
        for flag in ["-h", "--help"] {
            let outcome = dispatcher.dispatch(&argv(&["hello", flag])).unwrap();
            assert_eq!(outcome.code, 0);
            assert!(outcome.message.unwrap().contains("hello (hi)"));
        }
        assert!(!ran.get());
    }

    #[test]
    fn test_dispatch_handler_error_propagates() {
        let mut registry = CommandRegistry::new();
        registry.register(
            "fail",
            Command::new("Always fails", |_| Err("boom".into())),
        );
        let mut dispatcher = Dispatcher::new(&registry, ScriptedInput::default()).unwrap();
        let err = dispatcher.dispatch(&argv(&["fail"])).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_no_input_help_choice_prints_overview() {
        let (registry, _) = registry_with_hello();
        let input = ScriptedInput::new(vec![ScriptedAnswer::Select("help".into())]);
        let mut dispatcher = Dispatcher::new(&registry, input).unwrap();
        let outcome = dispatcher.dispatch(&[]).unwrap();
        assert_eq!(outcome.code, 0);
        assert!(outcome.message.unwrap().contains("Commands:"));
    }

    #[test]
    fn test_no_input_cancellation_exits_cleanly() {
        let (registry, _) = registry_with_hello();
        let input = ScriptedInput::new(vec![ScriptedAnswer::Cancel]);
        let mut dispatcher = Dispatcher::new(&registry, input).unwrap();
        let outcome = dispatcher.dispatch(&[]).unwrap();
        assert_eq!(outcome, Outcome::success());
    }

    #[test]
    fn test_no_input_interactive_choice_enters_menu() {
        let (registry, ran) = registry_with_hello();
        let input = ScriptedInput::new(vec![
            ScriptedAnswer::Select("interactive".into()),
            ScriptedAnswer::Select("hello".into()),
        ]);
        let mut dispatcher = Dispatcher::new(&registry, input).unwrap();
        let outcome = dispatcher.dispatch(&[]).unwrap();
        assert_eq!(outcome, Outcome::success());
        assert!(ran.get());
    }
}
