//! Execution context and run policy.

use std::path::Path;

use command_tree_help::{HelpStyle, InvocationName, PlainStyle};

use crate::Console;

/// Invocation derived from the program path (`argv[0]`).
///
/// Only the file name is kept, so `/usr/local/bin/app` becomes `app`.
///
/// # Examples
///
/// ```
/// use command_tree::ProgramName;
/// use command_tree_help::InvocationName;
///
/// assert_eq!(ProgramName::new("/usr/local/bin/app").invocation(), "app");
/// assert_eq!(ProgramName::new("app").invocation(), "app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramName(String);

impl ProgramName {
    pub fn new(argv0: &str) -> Self {
        let name = Path::new(argv0)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| argv0.to_string());
        Self(name)
    }

    /// Reads `argv[0]` of the running process, falling back to `fallback`.
    pub fn from_env(fallback: &str) -> Self {
        match std::env::args_os().next() {
            Some(argv0) => Self::new(&argv0.to_string_lossy()),
            None => Self(fallback.to_string()),
        }
    }
}

impl InvocationName for ProgramName {
    fn invocation(&self) -> String {
        self.0.clone()
    }
}

/// Everything [`Command::execute`](crate::Command::execute) needs from its
/// host: a console, how the program was invoked and how help is decorated.
///
/// Without an explicit invocation, hints use the root command's name.
pub struct ExecContext<'a> {
    console: &'a mut dyn Console,
    invocation: Option<&'a dyn InvocationName>,
    style: &'a dyn HelpStyle,
}

impl<'a> ExecContext<'a> {
    pub fn new(console: &'a mut dyn Console) -> Self {
        Self {
            console,
            invocation: None,
            style: &PlainStyle,
        }
    }

    pub fn with_invocation(mut self, invocation: &'a dyn InvocationName) -> Self {
        self.invocation = Some(invocation);
        self
    }

    pub fn with_style(mut self, style: &'a dyn HelpStyle) -> Self {
        self.style = style;
        self
    }

    pub fn console(&mut self) -> &mut dyn Console {
        &mut *self.console
    }

    pub(crate) fn invocation(&self) -> Option<&'a dyn InvocationName> {
        self.invocation
    }

    pub(crate) fn style(&self) -> &'a dyn HelpStyle {
        self.style
    }
}

/// What the runner does once a command finishes without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPolicy {
    /// Exit with status 0 after help, version and non-keep-alive runs.
    pub terminate_on_success: bool,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            terminate_on_success: true,
        }
    }
}

/// The runner's decision after one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Exit the process with this status.
    Exit(i32),
    /// Keep the process running.
    Continue,
}
