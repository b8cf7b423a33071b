//! Argument schema definitions for command dispatch.
//!
//! This module defines the core data model for a command's argument
//! surface: the five argument kinds, the schema that orders them, and
//! the typed value record produced by parsing. Schema types serialize
//! with [`serde`] so definitions can be exported to external tooling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The value kind an argument resolves to after parsing.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{ArgSpec, ValueKind};
///
/// assert_eq!(ArgSpec::Flag.value_kind(), ValueKind::Bool);
/// assert_eq!(
///     ArgSpec::PositionalNumber { default: None }.value_kind(),
///     ValueKind::Number,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Resolves to a string.
    String,
    /// Resolves to a number.
    Number,
    /// Resolves to a boolean.
    Bool,
}

/// A parsed argument value.
///
/// Absence of a key in [`ParsedArgs`] plays the role of "no value";
/// there is no explicit null variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    /// String value.
    Str(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
}

/// The closed set of argument kinds.
///
/// Each variant embeds its own typed default, so an ill-typed default
/// (say, a string default on a numeric positional) cannot be
/// constructed. A positional without a default is required; every
/// other configuration is optional or always populated.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::ArgSpec;
///
/// let port = ArgSpec::PositionalNumber { default: None };
/// assert!(port.is_positional());
/// assert!(port.is_required());
///
/// let template = ArgSpec::StringFlag { default: Some("basic".into()) };
/// assert!(template.is_flag_like());
/// assert!(!template.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgSpec {
    /// Positional string value; required when `default` is `None`.
    PositionalString {
        /// Value used when the token is absent.
        default: Option<String>,
    },
    /// Positional numeric value; required when `default` is `None`.
    PositionalNumber {
        /// Value used when the token is absent.
        default: Option<f64>,
    },
    /// Boolean flag, implicitly defaulted to `false`, never required.
    Flag,
    /// `--name <value>` flag carrying a string.
    StringFlag {
        /// Value used when the flag is absent.
        default: Option<String>,
    },
    /// `--name <number>` flag carrying a number.
    NumberFlag {
        /// Value used when the flag is absent.
        default: Option<f64>,
    },
}

impl ArgSpec {
    /// Maps the argument kind to the value kind it resolves to.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            ArgSpec::PositionalString { .. } | ArgSpec::StringFlag { .. } => ValueKind::String,
            ArgSpec::PositionalNumber { .. } | ArgSpec::NumberFlag { .. } => ValueKind::Number,
            ArgSpec::Flag => ValueKind::Bool,
        }
    }

    /// Whether this argument consumes a positional slot.
    pub fn is_positional(&self) -> bool {
        match self {
            ArgSpec::PositionalString { .. } | ArgSpec::PositionalNumber { .. } => true,
            ArgSpec::Flag | ArgSpec::StringFlag { .. } | ArgSpec::NumberFlag { .. } => false,
        }
    }

    /// Whether this argument is addressed as `--name` on the command line.
    pub fn is_flag_like(&self) -> bool {
        !self.is_positional()
    }

    /// Whether parsing must fail when no token supplies this argument.
    ///
    /// Only a positional without a default is required; flags default to
    /// `false` and value flags are optional.
    pub fn is_required(&self) -> bool {
        match self {
            ArgSpec::PositionalString { default } => default.is_none(),
            ArgSpec::PositionalNumber { default } => default.is_none(),
            ArgSpec::Flag | ArgSpec::StringFlag { .. } | ArgSpec::NumberFlag { .. } => false,
        }
    }

    /// The default value this argument is seeded with, if any.
    ///
    /// `Flag` always yields `Bool(false)`.
    pub fn default_value(&self) -> Option<ArgValue> {
        match self {
            ArgSpec::PositionalString { default } | ArgSpec::StringFlag { default } => {
                default.clone().map(ArgValue::Str)
            }
            ArgSpec::PositionalNumber { default } | ArgSpec::NumberFlag { default } => {
                default.map(ArgValue::Number)
            }
            ArgSpec::Flag => Some(ArgValue::Bool(false)),
        }
    }
}

/// A single declared argument: identifier, help text, and kind.
///
/// Use the constructor methods to build arguments; defaults are passed
/// where the kind supports them.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::Argument;
///
/// let port = Argument::positional_number("port", "Port to listen on", None);
/// assert!(port.spec.is_required());
///
/// let template = Argument::string_flag("template", "Template to use", Some("basic"));
/// assert!(!template.spec.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Flag or positional identifier (no `--` prefix).
    pub name: String,
    /// Description shown in help text.
    pub description: String,
    /// Kind and default of this argument.
    pub spec: ArgSpec,
}

impl Argument {
    /// Creates a positional string argument; required when `default` is `None`.
    pub fn positional_string(name: &str, description: &str, default: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            spec: ArgSpec::PositionalString {
                default: default.map(String::from),
            },
        }
    }

    /// Creates a positional numeric argument; required when `default` is `None`.
    pub fn positional_number(name: &str, description: &str, default: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            spec: ArgSpec::PositionalNumber { default },
        }
    }

    /// Creates a boolean flag (defaults to `false`).
    ///
    /// # Examples
    ///
    /// ```
    /// use command_dispatch_core::{Argument, ValueKind};
    ///
    /// let verbose = Argument::flag("verbose", "Enable verbose output");
    /// assert_eq!(verbose.spec.value_kind(), ValueKind::Bool);
    /// ```
    pub fn flag(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            spec: ArgSpec::Flag,
        }
    }

    /// Creates a `--name <value>` flag carrying a string.
    pub fn string_flag(name: &str, description: &str, default: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            spec: ArgSpec::StringFlag {
                default: default.map(String::from),
            },
        }
    }

    /// Creates a `--name <number>` flag carrying a number.
    pub fn number_flag(name: &str, description: &str, default: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            spec: ArgSpec::NumberFlag { default },
        }
    }
}

/// One schema entry: the record key plus the declared argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    /// Field key in the parsed record.
    pub key: String,
    /// The declared argument.
    pub arg: Argument,
}

/// An ordered argument schema for one command.
///
/// Declaration order is authoritative: it defines positional slot
/// assignment during parsing regardless of how flags interleave on the
/// command line, and it drives help rendering.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{Argument, CommandSchema};
///
/// let schema = CommandSchema::new()
///     .with("name", Argument::positional_string("name", "Project name", None))
///     .with("template", Argument::string_flag("template", "Template to use", Some("basic")));
///
/// assert_eq!(schema.entries().len(), 2);
/// assert_eq!(schema.positionals().count(), 1);
/// assert!(schema.has_required_positional());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSchema {
    entries: Vec<SchemaEntry>,
}

impl CommandSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument under the given record key.
    pub fn with(mut self, key: &str, arg: Argument) -> Self {
        self.entries.push(SchemaEntry {
            key: key.to_string(),
            arg,
        });
        self
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// Positional entries in declaration order.
    pub fn positionals(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter().filter(|e| e.arg.spec.is_positional())
    }

    /// Flag-like entries in declaration order.
    pub fn flags(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter().filter(|e| e.arg.spec.is_flag_like())
    }

    /// Finds a flag-like entry by its `--name` identifier.
    pub fn find_flag(&self, name: &str) -> Option<&SchemaEntry> {
        self.flags().find(|e| e.arg.name == name)
    }

    /// Whether the schema is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any positional argument lacks a default.
    ///
    /// Commands for which this holds cannot run from an empty argv.
    pub fn has_required_positional(&self) -> bool {
        self.positionals().any(|e| e.arg.spec.is_required())
    }
}

/// The typed record produced by one parse, consumed by one handler.
///
/// Keys are the schema's record keys. A missing key means the argument
/// was optional and absent.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{ArgValue, ParsedArgs};
///
/// let mut args = ParsedArgs::default();
/// args.set("name", ArgValue::Str("my-app".into()));
/// args.set("port", ArgValue::Number(3000.0));
/// args.set("verbose", ArgValue::Bool(true));
///
/// assert_eq!(args.get_str("name"), Some("my-app"));
/// assert_eq!(args.get_number("port"), Some(3000.0));
/// assert!(args.get_bool("verbose"));
/// assert!(args.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    values: HashMap<String, ArgValue>,
}

impl ParsedArgs {
    /// Raw value lookup.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.values.get(key)
    }

    /// String value lookup; `None` if absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ArgValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Numeric value lookup; `None` if absent or not a number.
    pub fn get_number(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(ArgValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Boolean value lookup; absent keys read as `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(ArgValue::Bool(true)))
    }

    /// Sets or replaces a value.
    pub fn set(&mut self, key: &str, value: ArgValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Number of populated fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field is populated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
