use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use command_tree::Command as CommandTree;
use command_tree_core::ParsedResult;
use command_tree_help::{FixedInvocation, PlainStyle};
use command_tree_parser::ArgvParser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "CMDTREE_LOG";

/// Serialization format for `parse` output.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum CliOutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "cmdtree")]
#[command(about = "Parse argv, render help and validate declarative command trees")]
#[command(version)]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Log at debug level regardless of CMDTREE_LOG.
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Route and parse an argv list against a declaration file.
    Parse(ParseArgs),
    /// Print help for a node of a declaration file.
    Help(HelpArgs),
    /// Check one or more declaration files for problems.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Declaration file (.yaml/.yml or .json).
    #[arg(long)]
    schema: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = CliOutputFormat::Json)]
    format: CliOutputFormat,
    /// Tokens to parse, given after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Declaration file (.yaml/.yml or .json).
    #[arg(long)]
    schema: PathBuf,
    /// Subcommand names or aliases leading to the node.
    path: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Declaration files to check.
    #[arg(long = "schema", required = true, num_args = 1..)]
    schemas: Vec<PathBuf>,
}

/// Route plus parse result, as printed by `parse`.
#[derive(Debug, Serialize)]
struct ParseReport<'a> {
    route: Vec<&'a str>,
    #[serde(flatten)]
    result: ParsedResult,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Help(args) => run_help(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_tree(path: &Path) -> Result<CommandTree, String> {
    CommandTree::from_file(path).map_err(|err| format!("failed to load '{}': {err}", path.display()))
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let tree = load_tree(&args.schema)?;
    let resolved = tree.resolve(&args.args);
    let rest = &args.args[resolved.consumed()..];
    debug!(route = ?resolved.route(), tokens = rest.len(), "parsing routed tokens");

    let command = resolved.command();
    let result = ArgvParser::new(command.options(), command.arguments())
        .parse(rest)
        .map_err(|err| err.to_string())?;

    let report = ParseReport {
        route: resolved.route(),
        result,
    };
    let raw = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&report)
            .map_err(|err| format!("failed to serialize parse result: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&report)
            .map_err(|err| format!("failed to serialize parse result: {err}"))?,
    };
    println!("{}", raw.trim_end());
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let tree = load_tree(&args.schema)?;
    let resolved = tree.resolve(&args.path);
    if resolved.consumed() < args.path.len() {
        return Err(format!(
            "no subcommand '{}' under '{}'",
            args.path[resolved.consumed()],
            resolved.path().join(" ")
        ));
    }

    let invocation = FixedInvocation::new(tree.name());
    print!("{}", resolved.render_help(&invocation, &PlainStyle));
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut problems = 0usize;
    for path in &args.schemas {
        let tree = load_tree(path)?;
        for problem in tree.validate() {
            eprintln!("{}: {problem}", path.display());
            problems += 1;
        }
    }

    if problems > 0 {
        return Err(format!("{problems} problem(s) found"));
    }
    println!("Validated {} declaration file(s).", args.schemas.len());
    Ok(())
}
