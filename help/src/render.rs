//! Help text rendering.

use command_tree_core::{ArgumentSpec, Example, OptionSpec};
use tracing::debug;

use crate::layout::{
    ARGUMENT_COLUMN, OPTION_GUTTER, PREVIEW_LIMIT, VALUE_PLACEHOLDER, argument_display_len,
    choices_label, example_column, option_column, option_display_len, preview_column,
    preview_len, subcommand_align_width,
};
use crate::width::spaces;
use crate::{HelpStyle, InvocationName, PlainStyle, display_width};

/// What a subcommand contributes to its parent's help.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubcommandSummary<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub options: &'a [OptionSpec],
}

/// Everything the renderer needs to describe one command.
///
/// `path` is the chain of command names from the root to this command and
/// is used for the synthesized usage line. `route` is the tokens a user
/// types after the program invocation to reach this command (empty at the
/// root) and is used for the subcommand hint.
#[derive(Debug, Clone, Default)]
pub struct HelpDoc<'a> {
    pub name: &'a str,
    pub path: Vec<&'a str>,
    pub route: Vec<&'a str>,
    pub aliases: &'a [String],
    pub description: Option<&'a str>,
    pub version: Option<&'a str>,
    pub usage: Option<&'a str>,
    pub examples: &'a [Example],
    pub options: &'a [OptionSpec],
    pub arguments: &'a [ArgumentSpec],
    pub subcommands: Vec<SubcommandSummary<'a>>,
}

impl<'a> HelpDoc<'a> {
    /// A document for a root command with nothing declared yet.
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            path: vec![name],
            ..Self::default()
        }
    }
}

/// Renders help without decoration.
///
/// # Examples
///
/// ```
/// use command_tree_core::OptionSpec;
/// use command_tree_help::{FixedInvocation, HelpDoc, render_help};
///
/// let options = vec![OptionSpec::value("name", "Your name").alias("n")];
/// let doc = HelpDoc {
///     description: Some("Greets people"),
///     options: &options,
///     ..HelpDoc::new("greet")
/// };
///
/// let text = render_help(&doc, &FixedInvocation::new("greet"));
/// assert_eq!(
///     text,
///     "greet\n  Greets people\n\nUsage:\n  greet [options]\n\n\
///      Options:\n  -n, --name <value>  Your name\n"
/// );
/// ```
pub fn render_help(doc: &HelpDoc<'_>, invocation: &dyn InvocationName) -> String {
    render_help_styled(doc, invocation, &PlainStyle)
}

/// Renders help, decorating fragments with `style`.
pub fn render_help_styled(
    doc: &HelpDoc<'_>,
    invocation: &dyn InvocationName,
    style: &dyn HelpStyle,
) -> String {
    debug!(command = doc.name, path = ?doc.path, "rendering help");

    let mut renderer = Renderer {
        doc,
        style,
        lines: Vec::new(),
    };
    renderer.header();
    renderer.usage();
    renderer.arguments();
    renderer.options();
    renderer.examples();
    renderer.subcommands(invocation);
    renderer.version();

    let mut text = renderer
        .lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Synthesized usage line: path, `<command>` when there are subcommands,
/// `[options]` when there are options, then `<required>`/`[optional]`
/// arguments.
pub fn synthesize_usage(doc: &HelpDoc<'_>) -> String {
    let mut usage = doc.path.join(" ");
    if !doc.subcommands.is_empty() {
        usage.push_str(" <command>");
    }
    if !doc.options.is_empty() {
        usage.push_str(" [options]");
    }
    for argument in doc.arguments {
        if argument.required {
            usage.push_str(&format!(" <{}>", argument.name));
        } else {
            usage.push_str(&format!(" [{}]", argument.name));
        }
    }
    usage
}

/// The command suggested by the subcommand hint line.
///
/// Returns `None` when there are no subcommands.
pub fn hint_command(doc: &HelpDoc<'_>, invocation: &str) -> Option<String> {
    let first = doc.subcommands.first()?.name;

    let custom = doc
        .usage
        .and_then(|usage| usage.lines().next())
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let command = match custom {
        Some(line) => {
            let line = line.replace("<command>", first).replace("[options]", "--help");
            if line.starts_with(invocation) {
                line
            } else {
                format!("{invocation} {line}")
            }
        }
        None => {
            let mut parts = vec![invocation];
            parts.extend(doc.route.iter().copied());
            parts.push(first);
            parts.push("--help");
            parts.retain(|p| !p.is_empty());
            parts.join(" ")
        }
    };
    Some(command)
}

struct Renderer<'d, 'a> {
    doc: &'d HelpDoc<'a>,
    style: &'d dyn HelpStyle,
    lines: Vec<String>,
}

impl Renderer<'_, '_> {
    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn heading(&self, text: &str) -> String {
        self.style.heading(text)
    }

    fn header(&mut self) {
        let mut line = self.heading(self.doc.name);
        if !self.doc.aliases.is_empty() {
            line.push(' ');
            line.push_str(&self.style.dim(&format!("({})", self.doc.aliases.join(", "))));
        }
        self.lines.push(line);

        if let Some(description) = self.doc.description.filter(|d| !d.is_empty()) {
            self.lines.push(format!("  {description}"));
        }
        self.blank();
    }

    fn usage(&mut self) {
        self.lines.push(self.heading("Usage:"));
        match self.doc.usage.filter(|u| !u.trim().is_empty()) {
            Some(usage) => {
                for line in usage.lines() {
                    self.lines.push(format!("  {line}"));
                }
            }
            None => self.lines.push(format!("  {}", synthesize_usage(self.doc))),
        }
        self.blank();
    }

    fn arguments(&mut self) {
        if self.doc.arguments.is_empty() {
            return;
        }

        self.lines.push(self.heading("Arguments:"));
        for argument in self.doc.arguments {
            let mut line = String::from("  ");
            if argument.required {
                line.push_str(&self.style.required_marker("*"));
                line.push(' ');
            } else {
                line.push_str("  ");
            }
            line.push_str(&self.style.flag(&argument.name));
            if !argument.choices.is_empty() {
                line.push(' ');
                line.push_str(&self.style.dim(&choices_label(&argument.choices)));
            }

            let pad = ARGUMENT_COLUMN
                .saturating_sub(argument_display_len(argument))
                .max(OPTION_GUTTER);
            line.push_str(&spaces(pad));
            line.push_str(&argument.description);
            self.lines.push(line);
        }
        self.blank();
    }

    fn options(&mut self) {
        let options = self.doc.options;
        if options.is_empty() {
            return;
        }

        let column = option_column(options);

        let mut groups: Vec<(&str, Vec<&OptionSpec>)> = Vec::new();
        let mut ungrouped = Vec::new();
        for option in options {
            match option.group.as_deref() {
                Some(group) => match groups.iter_mut().find(|(name, _)| *name == group) {
                    Some((_, members)) => members.push(option),
                    None => groups.push((group, vec![option])),
                },
                None => ungrouped.push(option),
            }
        }

        for (group, members) in &groups {
            self.lines.push(self.heading(&format!("{group}:")));
            for option in members {
                let line = self.option_line(option, column);
                self.lines.push(line);
            }
            self.blank();
        }

        if !ungrouped.is_empty() {
            self.lines.push(self.heading("Options:"));
            for option in ungrouped {
                let line = self.option_line(option, column);
                self.lines.push(line);
            }
            self.blank();
        }
    }

    fn option_line(&self, option: &OptionSpec, column: usize) -> String {
        let mut line = String::from("  ");
        if option.required {
            line.push_str(&self.style.required_marker("*"));
            line.push(' ');
        }
        if let Some(alias) = &option.alias {
            line.push_str(&self.style.flag(&format!("-{alias}")));
            line.push_str(", ");
        }
        line.push_str(&self.style.flag(&option.long_flag()));
        if option.requires_value {
            line.push_str(VALUE_PLACEHOLDER);
        }
        if !option.choices.is_empty() {
            line.push(' ');
            line.push_str(&self.style.dim(&choices_label(&option.choices)));
        }

        line.push_str(&spaces(column - option_display_len(option) + OPTION_GUTTER));
        line.push_str(&option.description);

        if let Some(default) = &option.default_value {
            line.push(' ');
            line.push_str(&self.style.dim(&format!("(default: {default})")));
        }
        line
    }

    fn examples(&mut self) {
        let examples = self.doc.examples;
        if examples.is_empty() {
            return;
        }

        let column = example_column(examples);
        self.lines.push(self.heading("Examples:"));
        for example in examples {
            let mut line = format!("  {}", self.style.flag(&example.command));
            if let Some(description) = &example.description {
                line.push_str(&spaces(column - display_width(&example.command)));
                line.push(' ');
                line.push_str(&self.style.dim(description));
            }
            self.lines.push(line);
        }
        self.blank();
    }

    fn subcommands(&mut self, invocation: &dyn InvocationName) {
        let subcommands = &self.doc.subcommands;
        if subcommands.is_empty() {
            return;
        }

        self.lines.push(self.heading("Subcommands:"));
        let align = subcommand_align_width(subcommands.iter().map(|s| s.name));

        for sub in subcommands {
            let pad = (align - display_width(sub.name)).saturating_sub(1);
            self.lines.push(format!(
                "  {}.{}{}",
                self.style.flag(sub.name),
                spaces(pad),
                sub.description.unwrap_or_default()
            ));

            if sub.options.is_empty() {
                continue;
            }

            let column = preview_column(sub.options, subcommands.iter().map(|s| s.options));
            for option in sub.options.iter().take(PREVIEW_LIMIT) {
                let label = match &option.alias {
                    Some(alias) => format!("-{alias}"),
                    None => option.long_flag(),
                };
                self.lines.push(format!(
                    "    {}.{}{}",
                    self.style.flag(&label),
                    spaces(column - preview_len(option) + 2),
                    option.description
                ));
            }
            if sub.options.len() > PREVIEW_LIMIT {
                let more = sub.options.len() - PREVIEW_LIMIT;
                self.lines.push(format!(
                    "    {}",
                    self.style.dim(&format!("... +{more} more options"))
                ));
            }
        }
        self.blank();

        if let Some(command) = hint_command(self.doc, &invocation.invocation()) {
            self.lines.push(format!(
                "{}{}",
                self.style.dim("Hint: view subcommand help, e.g.: "),
                self.style.flag(&command)
            ));
            self.blank();
        }
    }

    fn version(&mut self) {
        if let Some(version) = self.doc.version {
            self.lines.push(format!("{} {version}", self.heading("Version:")));
            self.blank();
        }
    }
}
