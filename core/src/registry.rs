//! Command registry: the immutable mapping from command names to
//! descriptions, aliases, schemas, and handlers.
//!
//! The registry is built once at startup and validated before any
//! input is read. Insertion order is preserved and drives the default
//! help/interactive ordering; an explicit display order may override
//! it.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CommandSchema, ParsedArgs};

/// Tokens a short alias may never use (`i` enters interactive mode,
/// `h` prints help).
pub const RESERVED_TOKENS: [&str; 2] = ["i", "h"];

/// Error type handlers may fail with.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of a handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

type Handler = Box<dyn Fn(ParsedArgs) -> HandlerResult>;

/// A recorded usage example for help text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Example argv, rendered joined by spaces.
    pub argv: Vec<String>,
    /// Caption shown under the argv line.
    pub caption: String,
}

/// One registered command.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{Argument, Command, CommandSchema};
///
/// let command = Command::new("Say hello", |_args| Ok(()))
///     .with_short("hi")
///     .with_schema(
///         CommandSchema::new()
///             .with("name", Argument::positional_string("name", "Who to greet", Some("world"))),
///     )
///     .with_example(&["hello", "crew"], "Greet the crew");
///
/// assert_eq!(command.short(), Some("hi"));
/// assert!(command.schema().is_some());
/// ```
pub struct Command {
    description: String,
    short: Option<String>,
    schema: Option<CommandSchema>,
    examples: Vec<Example>,
    handler: Handler,
}

impl Command {
    /// Creates a command from its description and handler.
    pub fn new(
        description: &str,
        handler: impl Fn(ParsedArgs) -> HandlerResult + 'static,
    ) -> Self {
        Self {
            description: description.to_string(),
            short: None,
            schema: None,
            examples: Vec::new(),
            handler: Box::new(handler),
        }
    }

    /// Sets the single-token short alias.
    pub fn with_short(mut self, short: &str) -> Self {
        self.short = Some(short.to_string());
        self
    }

    /// Sets the argument schema.
    pub fn with_schema(mut self, schema: CommandSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Appends a usage example.
    pub fn with_example(mut self, argv: &[&str], caption: &str) -> Self {
        self.examples.push(Example {
            argv: argv.iter().map(|t| t.to_string()).collect(),
            caption: caption.to_string(),
        });
        self
    }

    /// Help description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Short alias, if declared.
    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// Argument schema, if declared.
    pub fn schema(&self) -> Option<&CommandSchema> {
        self.schema.as_ref()
    }

    /// Recorded usage examples.
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Invokes the handler with a parsed record.
    pub fn run(&self, args: ParsedArgs) -> HandlerResult {
        (self.handler)(args)
    }

    /// Whether the command can run from an empty argv.
    pub fn runnable_without_args(&self) -> bool {
        match &self.schema {
            Some(schema) => !schema.has_required_positional(),
            None => true,
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("description", &self.description)
            .field("short", &self.short)
            .field("schema", &self.schema)
            .field("examples", &self.examples)
            .finish_non_exhaustive()
    }
}

/// Registry construction violations.
///
/// All are fatal: they are reported before any input is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two commands registered under the same name.
    #[error("duplicate command name: {0}")]
    DuplicateCommand(String),
    /// Two commands share a short alias.
    #[error("duplicate short alias: {0}")]
    DuplicateShort(String),
    /// A short alias collides with a reserved token (`i` or `h`).
    #[error("reserved short alias: {0}")]
    ReservedShort(String),
}

/// Insertion-ordered collection of named commands.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{Command, CommandRegistry};
///
/// let mut registry = CommandRegistry::new();
/// registry.register("hello", Command::new("Say hello", |_| Ok(())).with_short("hi"));
/// registry.register("version", Command::new("Print the version", |_| Ok(())));
/// registry.validate().unwrap();
///
/// assert_eq!(registry.find("hi").unwrap().0, "hello");
/// assert_eq!(registry.find("version").unwrap().0, "version");
/// assert!(registry.find("nope").is_none());
/// ```
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<(String, Command)>,
    display_order: Option<Vec<String>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command under `name`.
    pub fn register(&mut self, name: &str, command: Command) {
        self.commands.push((name.to_string(), command));
    }

    /// Overrides help/interactive display order. Names absent from the
    /// list keep their insertion order after the listed ones.
    pub fn set_display_order(&mut self, order: Vec<String>) {
        self.display_order = Some(order);
    }

    /// Checks key uniqueness, alias uniqueness, and reserved aliases.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut names: HashSet<&str> = HashSet::new();
        let mut shorts: HashSet<&str> = HashSet::new();
        for (name, command) in &self.commands {
            if !names.insert(name) {
                return Err(RegistryError::DuplicateCommand(name.clone()));
            }
            if let Some(short) = command.short() {
                if RESERVED_TOKENS.contains(&short) {
                    return Err(RegistryError::ReservedShort(short.to_string()));
                }
                if !shorts.insert(short) {
                    return Err(RegistryError::DuplicateShort(short.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Resolves a token against names and short aliases, in insertion
    /// order, name before alias. Returns the canonical name.
    pub fn find(&self, token: &str) -> Option<(&str, &Command)> {
        self.commands
            .iter()
            .find(|(name, command)| name == token || command.short() == Some(token))
            .map(|(name, command)| (name.as_str(), command))
    }

    /// Looks up a command by its exact registered name.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Commands in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Command)> {
        self.commands.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Commands in display order: the explicit sort list first (names
    /// it mentions, in list order), then the rest in insertion order.
    pub fn ordered(&self) -> Vec<(&str, &Command)> {
        match &self.display_order {
            None => self.iter().collect(),
            Some(order) => {
                let mut out: Vec<(&str, &Command)> = Vec::with_capacity(self.commands.len());
                for wanted in order {
                    if let Some(found) = self.iter().find(|(name, _)| name == wanted) {
                        out.push(found);
                    }
                }
                for (name, command) in self.iter() {
                    if !order.iter().any(|o| o == name) {
                        out.push((name, command));
                    }
                }
                out
            }
        }
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Argument;

    fn noop(description: &str) -> Command {
        Command::new(description, |_| Ok(()))
    }

    #[test]
    fn test_validate_accepts_distinct_names_and_shorts() {
        let mut registry = CommandRegistry::new();
        registry.register("hello", noop("Say hello").with_short("hi"));
        registry.register("server", noop("Run the server").with_short("s"));
        assert_eq!(registry.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_duplicate_name() {
        let mut registry = CommandRegistry::new();
        registry.register("hello", noop("one"));
        registry.register("hello", noop("two"));
        assert_eq!(
            registry.validate(),
            Err(RegistryError::DuplicateCommand("hello".into()))
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_short() {
        let mut registry = CommandRegistry::new();
        registry.register("hello", noop("one").with_short("x"));
        registry.register("help-me", noop("two").with_short("x"));
        assert_eq!(
            registry.validate(),
            Err(RegistryError::DuplicateShort("x".into()))
        );
    }

    #[test]
    fn test_validate_rejects_reserved_shorts() {
        for reserved in RESERVED_TOKENS {
            let mut registry = CommandRegistry::new();
            registry.register("hello", noop("one").with_short(reserved));
            assert_eq!(
                registry.validate(),
                Err(RegistryError::ReservedShort(reserved.into()))
            );
        }
    }

    #[test]
    fn test_find_resolves_alias_to_canonical_name() {
        let mut registry = CommandRegistry::new();
        registry.register("hello", noop("Say hello").with_short("hi"));
        let (name, command) = registry.find("hi").unwrap();
        assert_eq!(name, "hello");
        assert_eq!(command.description(), "Say hello");
    }

    #[test]
    fn test_ordered_defaults_to_insertion_order() {
        let mut registry = CommandRegistry::new();
        registry.register("b", noop(""));
        registry.register("a", noop(""));
        let names: Vec<&str> = registry.ordered().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_ordered_applies_sort_list_then_appends_rest() {
        let mut registry = CommandRegistry::new();
        registry.register("b", noop(""));
        registry.register("a", noop(""));
        registry.register("c", noop(""));
        registry.set_display_order(vec!["c".into(), "missing".into(), "a".into()]);
        let names: Vec<&str> = registry.ordered().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_runnable_without_args() {
        assert!(noop("").runnable_without_args());

        let optional = noop("").with_schema(
            CommandSchema::new()
                .with("name", Argument::positional_string("name", "", Some("world"))),
        );
        assert!(optional.runnable_without_args());

        let required = noop("").with_schema(
            CommandSchema::new().with("name", Argument::positional_string("name", "", None)),
        );
        assert!(!required.runnable_without_args());
    }
}
