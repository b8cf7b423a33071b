//! Argument parsing against a declared schema.
//!
//! [`parse`] turns a raw token vector into a [`ParsedArgs`] record. The
//! scan walks tokens left to right with a single cursor while a
//! separate slot index assigns positional values in schema declaration
//! order, so flags may appear anywhere without disturbing positional
//! assignment.

use thiserror::Error;
use tracing::debug;

use crate::types::{ArgSpec, ArgValue, CommandSchema, ParsedArgs, SchemaEntry};

/// Argument parse failures.
///
/// The `Display` strings are the exact messages reported to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A `--name` token matched no flag-like schema entry.
    #[error("Unknown flag --{0}")]
    UnknownFlag(String),
    /// A value-carrying flag was the last token or was followed by
    /// another `--` token.
    #[error("Missing value for --{0}")]
    MissingValue(String),
    /// A numeric flag received a token that does not parse as a number.
    #[error("Invalid number \"{value}\" for --{flag}")]
    InvalidFlagNumber {
        /// Flag identifier (no `--` prefix).
        flag: String,
        /// The offending token.
        value: String,
    },
    /// A numeric positional received a token that does not parse as a
    /// number.
    #[error("Invalid number \"{value}\" for {name}")]
    InvalidPositionalNumber {
        /// Positional identifier.
        name: String,
        /// The offending token.
        value: String,
    },
    /// A positional without a default received no token.
    #[error("Missing required argument {0}")]
    MissingRequired(String),
}

/// Parses raw tokens against an optional schema.
///
/// Without a schema the result is an empty record. With a schema the
/// record is seeded with defaults (`false` for flags), then populated
/// from the tokens; any malformed input yields a [`ParseError`] and the
/// record is discarded, so a handler never sees a partially valid
/// parse. Positional tokens beyond the declared slots are ignored.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{Argument, CommandSchema, parse};
///
/// let schema = CommandSchema::new()
///     .with("name", Argument::positional_string("name", "Project name", None))
///     .with("force", Argument::flag("force", "Overwrite existing files"))
///     .with("template", Argument::string_flag("template", "Template", Some("basic")));
///
/// let argv: Vec<String> = ["--force", "my-app"].iter().map(|s| s.to_string()).collect();
/// let args = parse(&argv, Some(&schema)).unwrap();
/// assert_eq!(args.get_str("name"), Some("my-app"));
/// assert!(args.get_bool("force"));
/// assert_eq!(args.get_str("template"), Some("basic"));
/// ```
pub fn parse(raw: &[String], schema: Option<&CommandSchema>) -> Result<ParsedArgs, ParseError> {
    let mut record = ParsedArgs::default();
    let Some(schema) = schema else {
        return Ok(record);
    };

    for entry in schema.entries() {
        if let Some(default) = entry.arg.spec.default_value() {
            record.set(&entry.key, default);
        }
    }

    let positionals: Vec<&SchemaEntry> = schema.positionals().collect();
    let mut slot = 0;
    let mut cursor = 0;

    while cursor < raw.len() {
        let token = &raw[cursor];
        if let Some(flag_name) = token.strip_prefix("--") {
            let entry = schema
                .find_flag(flag_name)
                .ok_or_else(|| ParseError::UnknownFlag(flag_name.to_string()))?;
            match &entry.arg.spec {
                ArgSpec::Flag => {
                    record.set(&entry.key, ArgValue::Bool(true));
                    cursor += 1;
                }
                ArgSpec::StringFlag { .. } | ArgSpec::NumberFlag { .. } => {
                    let value = raw
                        .get(cursor + 1)
                        .filter(|v| !v.starts_with("--"))
                        .ok_or_else(|| ParseError::MissingValue(flag_name.to_string()))?;
                    let parsed = match &entry.arg.spec {
                        ArgSpec::NumberFlag { .. } => ArgValue::Number(
                            value
                                .parse::<f64>()
                                .map_err(|_| ParseError::InvalidFlagNumber {
                                    flag: flag_name.to_string(),
                                    value: value.clone(),
                                })?,
                        ),
                        _ => ArgValue::Str(value.clone()),
                    };
                    record.set(&entry.key, parsed);
                    cursor += 2;
                }
                // find_flag only yields flag-like entries
                ArgSpec::PositionalString { .. } | ArgSpec::PositionalNumber { .. } => {
                    unreachable!("positional entry returned from flag lookup")
                }
            }
        } else {
            if let Some(entry) = positionals.get(slot) {
                let parsed = match &entry.arg.spec {
                    ArgSpec::PositionalNumber { .. } => ArgValue::Number(
                        token
                            .parse::<f64>()
                            .map_err(|_| ParseError::InvalidPositionalNumber {
                                name: entry.arg.name.clone(),
                                value: token.clone(),
                            })?,
                    ),
                    _ => ArgValue::Str(token.clone()),
                };
                record.set(&entry.key, parsed);
                slot += 1;
            } else {
                debug!(token = %token, "ignoring extra positional token");
            }
            cursor += 1;
        }
    }

    for entry in &positionals {
        if entry.arg.spec.is_required() && record.get(&entry.key).is_none() {
            return Err(ParseError::MissingRequired(entry.arg.name.clone()));
        }
    }

    Ok(record)
}
