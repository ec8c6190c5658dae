//! Decoration hooks for help output.

/// Decorates fragments of help output, e.g. with terminal colors.
///
/// Implementations must not change the visible text: the renderer measures
/// widths on the undecorated fragment and pads after decoration.
///
/// # Examples
///
/// ```
/// use command_tree_help::HelpStyle;
///
/// struct Cyan;
///
/// impl HelpStyle for Cyan {
///     fn flag(&self, text: &str) -> String {
///         format!("\x1b[36m{text}\x1b[0m")
///     }
/// }
///
/// assert_eq!(Cyan.heading("Usage:"), "Usage:");
/// assert_eq!(Cyan.flag("--help"), "\x1b[36m--help\x1b[0m");
/// ```
pub trait HelpStyle {
    /// Section labels and the command name.
    fn heading(&self, text: &str) -> String {
        text.to_string()
    }

    /// Option flags, argument names, subcommand names and example commands.
    fn flag(&self, text: &str) -> String {
        text.to_string()
    }

    /// Secondary text: choices, defaults, aliases and hints.
    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    /// The `*` marking required options and arguments.
    fn required_marker(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Undecorated output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl HelpStyle for PlainStyle {}
