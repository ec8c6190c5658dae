//! Column arithmetic for help output.
//!
//! Every width here is measured on undecorated text with
//! [`display_width`], so styling never shifts a column.

use command_tree_core::{ArgumentSpec, Example, OptionSpec};

use crate::display_width;

/// Placeholder printed after value-bearing options.
pub const VALUE_PLACEHOLDER: &str = " <value>";

/// Smallest option column width.
pub const MIN_OPTION_COLUMN: usize = 20;

/// Smallest example column width.
pub const MIN_EXAMPLE_COLUMN: usize = 20;

/// Smallest option preview column in the subcommand listing.
pub const MIN_PREVIEW_COLUMN: usize = 8;

/// Options previewed per subcommand before collapsing.
pub const PREVIEW_LIMIT: usize = 5;

/// Column where argument descriptions start.
pub const ARGUMENT_COLUMN: usize = 30;

/// Spaces between the option column and option descriptions.
pub const OPTION_GUTTER: usize = 2;

/// Choices rendered as `(a|b|c)`.
pub fn choices_label(choices: &[String]) -> String {
    format!("({})", choices.join("|"))
}

/// Display length of an option row up to (not including) its description.
///
/// # Examples
///
/// ```
/// use command_tree_core::OptionSpec;
/// use command_tree_help::option_display_len;
///
/// // "  --verbose"
/// assert_eq!(option_display_len(&OptionSpec::flag("verbose", "")), 11);
///
/// // "  * -e, --env <value> (dev|prod)"
/// let env = OptionSpec::value("env", "")
///     .alias("e")
///     .required()
///     .choices(["dev", "prod"]);
/// assert_eq!(option_display_len(&env), 32);
/// ```
pub fn option_display_len(option: &OptionSpec) -> usize {
    let mut len = 2;
    if option.required {
        len += 2;
    }
    if let Some(alias) = &option.alias {
        len += 1 + display_width(alias) + 2;
    }
    len += display_width(&option.name) + 2;
    if option.requires_value {
        len += display_width(VALUE_PLACEHOLDER);
    }
    if !option.choices.is_empty() {
        len += display_width(&choices_label(&option.choices)) + 1;
    }
    len
}

/// Width of the shared option column: the widest option across grouped and
/// ungrouped sections, floored at [`MIN_OPTION_COLUMN`].
pub fn option_column(options: &[OptionSpec]) -> usize {
    options
        .iter()
        .map(option_display_len)
        .fold(MIN_OPTION_COLUMN, usize::max)
}

/// Width of the example command column, floored at [`MIN_EXAMPLE_COLUMN`].
pub fn example_column(examples: &[Example]) -> usize {
    examples
        .iter()
        .map(|e| display_width(&e.command))
        .fold(MIN_EXAMPLE_COLUMN, usize::max)
}

/// Display length of an argument row up to its description.
pub fn argument_display_len(argument: &ArgumentSpec) -> usize {
    let mut len = 4 + display_width(&argument.name);
    if !argument.choices.is_empty() {
        len += 1 + display_width(&choices_label(&argument.choices));
    }
    len
}

/// Length of a preview label: `-a.` for aliased options, `--name.`
/// otherwise.
pub fn preview_len(option: &OptionSpec) -> usize {
    match &option.alias {
        Some(alias) => display_width(alias) + 2,
        None => display_width(&option.name) + 3,
    }
}

/// Widest preview label among the first [`PREVIEW_LIMIT`] options.
fn preview_max(options: &[OptionSpec]) -> usize {
    options
        .iter()
        .take(PREVIEW_LIMIT)
        .map(preview_len)
        .max()
        .unwrap_or(0)
}

/// Preview column shared by every sibling subcommand.
///
/// `local` is the subcommand being printed; `siblings` contains the option
/// lists of every subcommand in the listing (including `local`).
pub fn preview_column<'a, I>(local: &[OptionSpec], siblings: I) -> usize
where
    I: IntoIterator<Item = &'a [OptionSpec]>,
{
    let global = siblings.into_iter().map(preview_max).max().unwrap_or(0);
    preview_max(local).max(global).max(MIN_PREVIEW_COLUMN)
}

/// Column where subcommand descriptions start: the widest name plus four.
pub fn subcommand_align_width<'a, I>(names: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(display_width).max().unwrap_or(0) + 4
}
