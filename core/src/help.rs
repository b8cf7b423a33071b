//! Help text rendering.
//!
//! Both views are pure functions of the registry (or one command):
//! [`render_overview`] lists every command in display order with a
//! bracketed argument summary, and [`render_command`] renders one
//! command's usage, argument table, and examples.

use crate::registry::{Command, CommandRegistry};
use crate::types::{ArgSpec, CommandSchema, SchemaEntry};

fn label(name: &str, command: &Command) -> String {
    match command.short() {
        Some(short) => format!("{name} or {short}"),
        None => name.to_string(),
    }
}

/// Bracketed one-line summary: positionals in declaration order, then
/// every flag-like argument, regardless of original interleaving.
fn schema_summary(schema: &CommandSchema) -> String {
    let mut parts: Vec<String> = schema
        .positionals()
        .map(|e| format!("[{}]", e.arg.name))
        .collect();
    parts.extend(schema.flags().map(|e| format!("[--{}]", e.arg.name)));
    parts.join(" ")
}

/// Usage-line form of one entry, value flags carrying a placeholder.
fn usage_token(entry: &SchemaEntry) -> String {
    match &entry.arg.spec {
        ArgSpec::PositionalString { .. } | ArgSpec::PositionalNumber { .. } => {
            format!("[{}]", entry.arg.name)
        }
        ArgSpec::Flag => format!("[--{}]", entry.arg.name),
        ArgSpec::StringFlag { .. } => format!("[--{} <value>]", entry.arg.name),
        ArgSpec::NumberFlag { .. } => format!("[--{} <number>]", entry.arg.name),
    }
}

/// Display name in the `Arguments:` block: `--name` for every flag
/// kind, bare `name` for positionals.
fn argument_display(entry: &SchemaEntry) -> String {
    if entry.arg.spec.is_flag_like() {
        format!("--{}", entry.arg.name)
    } else {
        entry.arg.name.clone()
    }
}

/// Renders the top-level command listing.
///
/// Commands appear in display order, each padded to the longest label,
/// with a second line summarizing a non-empty schema. Footer lines
/// document the `i` and `h` builtins.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{render_overview, Command, CommandRegistry};
///
/// let mut registry = CommandRegistry::new();
/// registry.register("hello", Command::new("Say hello", |_| Ok(())).with_short("hi"));
///
/// let help = render_overview(&registry);
/// assert!(help.contains("hello or hi"));
/// assert!(help.contains("Say hello"));
/// assert!(help.contains("i "));
/// ```
pub fn render_overview(registry: &CommandRegistry) -> String {
    let entries = registry.ordered();
    let width = entries
        .iter()
        .map(|(name, command)| label(name, command).len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Commands:\n");
    for (name, command) in &entries {
        let line_label = label(name, command);
        out.push_str(&format!(
            "  {line_label:<width$}  {}\n",
            command.description()
        ));
        if let Some(schema) = command.schema() {
            if !schema.is_empty() {
                out.push_str(&format!("  {:<width$}  {}\n", "", schema_summary(schema)));
            }
        }
    }
    out.push('\n');
    out.push_str(&format!("  {:<width$}  Enter interactive mode\n", "i"));
    out.push_str(&format!("  {:<width$}  Show this help\n", "h"));
    out
}

/// Renders help for a single command.
///
/// The `Usage:` line re-orders schema entries positionals-first (each
/// group in declaration order); the `Arguments:` block keeps the
/// original declaration order.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{render_command, Argument, Command, CommandSchema};
///
/// let command = Command::new("Run the server", |_| Ok(()))
///     .with_short("s")
///     .with_schema(
///         CommandSchema::new()
///             .with("port", Argument::positional_number("port", "Port to listen on", None))
///             .with("timeout", Argument::number_flag("timeout", "Timeout in seconds", None)),
///     )
///     .with_example(&["server", "3000"], "Listen on port 3000");
///
/// let help = render_command("server", &command);
/// assert!(help.contains("server (s)"));
/// assert!(help.contains("Usage: server [port] [--timeout <number>]"));
/// assert!(help.contains("Examples:"));
/// ```
pub fn render_command(name: &str, command: &Command) -> String {
    let mut out = match command.short() {
        Some(short) => format!("{name} ({short})\n"),
        None => format!("{name}\n"),
    };
    out.push_str(command.description());
    out.push('\n');

    let mut usage = format!("\nUsage: {name}");
    if let Some(schema) = command.schema() {
        for entry in schema.positionals() {
            usage.push(' ');
            usage.push_str(&usage_token(entry));
        }
        for entry in schema.flags() {
            usage.push(' ');
            usage.push_str(&usage_token(entry));
        }
    }
    out.push_str(&usage);
    out.push('\n');

    if let Some(schema) = command.schema() {
        if !schema.is_empty() {
            let width = schema
                .entries()
                .iter()
                .map(|e| argument_display(e).len())
                .max()
                .unwrap_or(0);
            out.push_str("\nArguments:\n");
            for entry in schema.entries() {
                out.push_str(&format!(
                    "  {:<width$}  {}\n",
                    argument_display(entry),
                    entry.arg.description
                ));
            }
        }
    }

    if !command.examples().is_empty() {
        out.push_str("\nExamples:\n");
        for example in command.examples() {
            out.push_str(&format!("  {}\n", example.argv.join(" ")));
            out.push_str(&format!("    {}\n", example.caption));
        }
    }

    out
}
