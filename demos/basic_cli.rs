//! Single-command CLI example.
//!
//! Declares a required `--name` option and a `--loud` flag, then runs
//! against the process arguments.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p command-tree-demos --example basic_cli -- --name Alice
//! cargo run -p command-tree-demos --example basic_cli -- -n Alice --loud
//! cargo run -p command-tree-demos --example basic_cli -- --help
//! ```

use command_tree::Command;
use command_tree_core::OptionSpec;

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let app = Command::new("myapp")
        .description("A simple CLI application")
        .version("1.0.0")
        .option(OptionSpec::value("name", "Your name").alias("n").required())
        .option(OptionSpec::flag("loud", "Print details").alias("l"))
        .action(|args, options, _cmd| {
            let name = options.get_str("name").unwrap_or_default();
            println!("Hello, {name}!");

            if options.get_bool("loud").unwrap_or(false) {
                println!("argument count: {}", args.len());
                for (key, value) in options.iter() {
                    println!("  {key} = {value}");
                }
            }
            Ok(())
        });

    app.run();
}
