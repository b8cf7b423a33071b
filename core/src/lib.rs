//! Command dispatch engine: typed argument schemas, parsing, help
//! rendering, and invocation dispatch for sub-command CLIs.
//!
//! The crate covers the whole path from raw argv to a running handler:
//!
//! - [`Argument`] / [`ArgSpec`] / [`CommandSchema`] — the five-kind
//!   argument model with typed defaults and declaration-order
//!   positional slots.
//! - [`parse`] — raw tokens to a typed [`ParsedArgs`] record, with
//!   single-line [`ParseError`] messages.
//! - [`CommandRegistry`] / [`Command`] — named commands with short
//!   aliases, validated before any input is read.
//! - [`render_overview`] / [`render_command`] — pure help rendering.
//! - [`Dispatcher`] — resolves one invocation (named command, builtin
//!   `h`/`i`, or no input) and returns a typed [`Outcome`] instead of
//!   exiting the process; the thin binary entry point prints and exits.
//! - [`prompt::InputProvider`] — the seam for interactive prompts, with
//!   a scripted implementation for tests and a terminal one supplied by
//!   the binary crate.
//!
//! # Example
//!
//! ```
//! use command_dispatch_core::*;
//!
//! let mut registry = CommandRegistry::new();
//! registry.register(
//!     "create",
//!     Command::new("Create a new project", |args| {
//!         println!("creating {}", args.get_str("name").unwrap_or_default());
//!         Ok(())
//!     })
//!     .with_short("c")
//!     .with_schema(
//!         CommandSchema::new()
//!             .with("name", Argument::positional_string("name", "Project name", None))
//!             .with("template", Argument::string_flag("template", "Template", Some("basic"))),
//!     ),
//! );
//! registry.validate().unwrap();
//!
//! let argv: Vec<String> = ["my-app"].iter().map(|s| s.to_string()).collect();
//! let schema = registry.get("create").unwrap().schema();
//! let args = parse(&argv, schema).unwrap();
//! assert_eq!(args.get_str("name"), Some("my-app"));
//! assert_eq!(args.get_str("template"), Some("basic"));
//! ```

mod dispatch;
mod help;
mod interactive;
mod parse;
pub mod prompt;
mod registry;
mod types;

pub use dispatch::{Dispatcher, Invocation, Outcome, resolve};
pub use help::{render_command, render_overview};
pub use interactive::{collect_required_argv, partition_commands};
pub use parse::{ParseError, parse};
pub use registry::{
    Command, CommandRegistry, Example, HandlerError, HandlerResult, RegistryError, RESERVED_TOKENS,
};
pub use types::{ArgSpec, ArgValue, Argument, CommandSchema, ParsedArgs, SchemaEntry, ValueKind};
