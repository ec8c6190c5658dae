//! Declarative command trees.
//!
//! A [`Command`] owns a name, option and argument declarations, optional
//! before/action/after handlers and nested subcommands. [`Command::execute`]
//! routes argv down the tree (subcommand names and aliases first), then
//! handles `--help`/`-h` and `--version`/`-v`, then parses the remaining
//! tokens and runs the handlers in sequence.
//!
//! Execution never exits the process. [`Command::run_with`] turns an
//! [`Outcome`] or [`CommandError`] into a [`Termination`] according to a
//! [`RunPolicy`], and [`Command::run`] applies it to the real process.
//!
//! # Example
//!
//! ```
//! use command_tree::{BufferConsole, Command, ExecContext, RunPolicy, Termination};
//! use command_tree_core::OptionSpec;
//!
//! let app = Command::new("greet")
//!     .option(OptionSpec::value("name", "Who to greet").alias("n").required())
//!     .action(|_args, options, _cmd| {
//!         let name = options.get_str("name").unwrap_or("world");
//!         anyhow::ensure!(name != "nobody", "refusing to greet {name}");
//!         Ok(())
//!     });
//!
//! let mut console = BufferConsole::default();
//! let mut ctx = ExecContext::new(&mut console);
//!
//! let ok = app.run_with(&["-n", "Alice"], &mut ctx, RunPolicy::default());
//! assert_eq!(ok, Termination::Exit(0));
//!
//! let failed = app.run_with(&["-n", "nobody"], &mut ctx, RunPolicy::default());
//! assert_eq!(failed, Termination::Exit(1));
//!
//! assert_eq!(
//!     console.stderr(),
//!     "error: error executing command: refusing to greet nobody\n"
//! );
//! ```

mod command;
mod config;
mod console;
mod context;
mod error;

pub use command::{
    ActionFn, Command, HookFn, NO_HANDLER_MESSAGE, NO_VERSION_MESSAGE, Outcome, Resolved,
};
pub use config::{CommandConfig, SubcommandAliasConfig};
pub use console::{BufferConsole, Console, StdConsole};
pub use context::{ExecContext, ProgramName, RunPolicy, Termination};
pub use error::{CommandError, ConfigError, Stage};
