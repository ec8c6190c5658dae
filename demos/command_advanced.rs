//! Subcommands, hooks, groups and relations.
//!
//! `deploy` shows grouped options, a validator, a conflict, a dependency and
//! before/after hooks. `create` shows a positional argument with choices and
//! an array option. `d` and `c` are subcommand aliases.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p command-tree-demos --example command_advanced -- --help
//! cargo run -p command-tree-demos --example command_advanced -- d --env prod --token abcdefghij
//! cargo run -p command-tree-demos --example command_advanced -- deploy --env dev --force --dry-run
//! cargo run -p command-tree-demos --example command_advanced -- c user -n Alice --tags a,b
//! ```

use anyhow::Context;
use command_tree::Command;
use command_tree_core::{ArgumentSpec, OptionSpec, ValidationError, ValueKind};

fn deploy() -> Command {
    Command::new("deploy")
        .description("Deploy the application")
        .option(
            OptionSpec::value("env", "Target environment")
                .choices(["dev", "staging", "prod"])
                .required()
                .group("Deployment"),
        )
        .option(
            OptionSpec::value("token", "Authentication token")
                .validator(|value| {
                    if value.len() < 10 {
                        Err("token must be at least 10 characters".to_string())
                    } else {
                        Ok(())
                    }
                })
                .group("Deployment"),
        )
        .option(
            OptionSpec::flag("force", "Force the deployment")
                .conflicts_with("dry-run")
                .group("Deployment"),
        )
        .option(OptionSpec::flag("dry-run", "Show what would happen").group("Deployment"))
        .option(
            OptionSpec::flag("notify", "Send a notification")
                .depends_on("env")
                .group("Notifications"),
        )
        .before(|_args, _options| {
            println!("preparing deployment...");
            Ok(())
        })
        .action(|_args, options, _cmd| {
            let env = options.get_str("env").context("--env is declared required")?;
            if options.get_bool("dry-run").unwrap_or(false) {
                println!("dry run: nothing will be deployed");
            }
            println!("environment: {env}");
            if let Some(token) = options.get_str("token") {
                let shown: String = token.chars().take(4).collect();
                println!("token: {shown}...");
            }
            if options.get_bool("force").unwrap_or(false) {
                println!("forcing deployment");
            }
            if options.get_bool("notify").unwrap_or(false) {
                println!("a notification will be sent");
            }
            println!("deployment complete");
            Ok(())
        })
        .after(|_args, _options| {
            println!("cleaning up temporary files...");
            Ok(())
        })
}

fn create() -> Command {
    Command::new("create")
        .description("Create a resource")
        .argument(
            ArgumentSpec::required("type", "Resource type").choices(["user", "project", "task"]),
        )
        .option(OptionSpec::value("name", "Resource name").alias("n").required())
        .option(OptionSpec::value("tags", "Comma-separated tags").kind(ValueKind::Array))
        .action(|args, options, _cmd| {
            let kind = args.first().map(String::as_str).unwrap_or_default();
            let name = options.get_str("name").unwrap_or_default();
            println!("created {kind}: {name}");
            if let Some(tags) = options.get_array("tags").filter(|t| !t.is_empty()) {
                println!("tags: {}", tags.join(", "));
            }
            Ok(())
        })
}

fn build() -> Result<Command, ValidationError> {
    Command::new("app")
        .description("Advanced CLI example")
        .version("1.0.0")
        .example("app deploy --env prod --token xxxxxxxxxx", Some("Deploy to production"))
        .example("app deploy --env dev", Some("Deploy to development"))
        .example("app create user --name Alice", Some("Create a user"))
        .subcommand(deploy())
        .subcommand(create())
        .subcommand_alias("d", "deploy")?
        .subcommand_alias("c", "create")
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match build() {
        Ok(app) => app.run(),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
