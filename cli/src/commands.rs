//! Demo command set exercising every argument kind and both builtins.

use command_dispatch_core::{Argument, Command, CommandRegistry, CommandSchema};
use tracing::info;

/// Builds the demo registry: `hello`/`hi`, `server`/`s`, `create`/`c`.
pub fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register(
        "hello",
        Command::new("Say hello", |args| {
            let name = args.get_str("name").unwrap_or("world");
            if args.get_bool("loud") {
                println!("HELLO, {}!", name.to_uppercase());
            } else {
                println!("Hello, {name}!");
            }
            Ok(())
        })
        .with_short("hi")
        .with_schema(
            CommandSchema::new()
                .with(
                    "name",
                    Argument::positional_string("name", "Who to greet", Some("world")),
                )
                .with("loud", Argument::flag("loud", "Shout the greeting")),
        )
        .with_example(&["hello", "crew"], "Greet the crew")
        .with_example(&["hello", "--loud"], "Shout at the world"),
    );

    registry.register(
        "server",
        Command::new("Start a demo server", |args| {
            let port = args.get_number("port").unwrap_or_default();
            let timeout = args.get_number("timeout");
            info!(port, ?timeout, "starting server");
            println!("server listening on port {port}");
            if let Some(timeout) = timeout {
                println!("request timeout: {timeout}s");
            }
            Ok(())
        })
        .with_short("s")
        .with_schema(
            CommandSchema::new()
                .with(
                    "port",
                    Argument::positional_number("port", "Port to listen on", None),
                )
                .with(
                    "timeout",
                    Argument::number_flag("timeout", "Request timeout in seconds", None),
                )
                .with("verbose", Argument::flag("verbose", "Log every request")),
        )
        .with_example(&["server", "3000"], "Listen on port 3000")
        .with_example(&["server", "3000", "--timeout", "30"], "With a 30s timeout"),
    );

    registry.register(
        "create",
        Command::new("Create a new project", |args| {
            let name = args.get_str("name").unwrap_or_default();
            let template = args.get_str("template").unwrap_or_default();
            println!("creating {name} from template {template}");
            Ok(())
        })
        .with_short("c")
        .with_schema(
            CommandSchema::new()
                .with(
                    "name",
                    Argument::positional_string("name", "Project name", None),
                )
                .with(
                    "template",
                    Argument::string_flag("template", "Template to scaffold from", Some("basic")),
                ),
        )
        .with_example(&["create", "my-app"], "Scaffold with the basic template"),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use command_dispatch_core::partition_commands;

    #[test]
    fn test_demo_registry_validates() {
        assert_eq!(build_registry().validate(), Ok(()));
    }

    #[test]
    fn test_demo_registry_partition() {
        let registry = build_registry();
        let (runnable, needs_args) = partition_commands(&registry);
        assert_eq!(runnable, vec!["hello"]);
        assert_eq!(needs_args, vec!["server", "create"]);
    }
}
