//! Output sinks for help, version text and diagnostics.

use std::io::Write;

/// Where a command tree writes the text it produces itself.
///
/// Action output is the action's business; the tree only writes help,
/// version text and one-line diagnostics through this trait.
pub trait Console {
    /// Writes text to standard output verbatim.
    fn out(&mut self, text: &str);

    /// Reports a fatal diagnostic.
    fn error(&mut self, message: &str);

    /// Reports a non-fatal diagnostic.
    fn warning(&mut self, message: &str);
}

/// Console backed by the process's stdout and stderr.
///
/// Diagnostics are printed to stderr as `error: …` and `warning: …`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn out(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn warning(&mut self, message: &str) {
        eprintln!("warning: {message}");
    }
}

/// Console that records everything in memory.
///
/// # Examples
///
/// ```
/// use command_tree::{BufferConsole, Console};
///
/// let mut console = BufferConsole::default();
/// console.out("1.0.0\n");
/// console.warning("command has no handler");
///
/// assert_eq!(console.stdout(), "1.0.0\n");
/// assert_eq!(console.stderr(), "warning: command has no handler\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferConsole {
    stdout: String,
    stderr: String,
}

impl BufferConsole {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

impl Console for BufferConsole {
    fn out(&mut self, text: &str) {
        self.stdout.push_str(text);
    }

    fn error(&mut self, message: &str) {
        self.stderr.push_str(&format!("error: {message}\n"));
    }

    fn warning(&mut self, message: &str) {
        self.stderr.push_str(&format!("warning: {message}\n"));
    }
}
