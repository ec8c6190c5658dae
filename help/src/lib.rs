//! Help text rendering for command trees.
//!
//! The renderer is a pure function from a [`HelpDoc`] (one command's declared
//! name, aliases, usage, arguments, options, examples and subcommands) to a
//! string. The only real logic is column alignment: every column is computed
//! from [`display_width`], which counts CJK ideographs, CJK punctuation and
//! fullwidth forms as two terminal columns.
//!
//! Decoration (colors, bold) is applied through a [`HelpStyle`]; widths are
//! always measured on the undecorated text. The program invocation shown in
//! the subcommand hint comes from an [`InvocationName`] provider so the
//! renderer never inspects the hosting process.
//!
//! # Example
//!
//! ```
//! use command_tree_core::OptionSpec;
//! use command_tree_help::{FixedInvocation, HelpDoc, SubcommandSummary, render_help};
//!
//! let deploy_options = vec![OptionSpec::value("env", "Target environment").alias("e")];
//! let doc = HelpDoc {
//!     subcommands: vec![SubcommandSummary {
//!         name: "deploy",
//!         description: Some("Deploy the app"),
//!         options: &deploy_options,
//!     }],
//!     ..HelpDoc::new("app")
//! };
//!
//! let text = render_help(&doc, &FixedInvocation::new("app"));
//! assert!(text.contains("  deploy.   Deploy the app\n"));
//! assert!(text.contains("    -e.       Target environment\n"));
//! assert!(text.contains("Hint: view subcommand help, e.g.: app deploy --help\n"));
//! ```

mod invocation;
mod layout;
mod render;
mod style;
mod width;

pub use invocation::{FixedInvocation, InvocationName};
pub use layout::{
    ARGUMENT_COLUMN, MIN_EXAMPLE_COLUMN, MIN_OPTION_COLUMN, MIN_PREVIEW_COLUMN, OPTION_GUTTER,
    PREVIEW_LIMIT, VALUE_PLACEHOLDER, argument_display_len, choices_label, example_column,
    option_column, option_display_len, preview_column, preview_len, subcommand_align_width,
};
pub use render::{
    HelpDoc, SubcommandSummary, hint_command, render_help, render_help_styled, synthesize_usage,
};
pub use style::{HelpStyle, PlainStyle};
pub use width::display_width;
