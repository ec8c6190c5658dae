//! The command tree: declaration, routing and execution.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fmt;

use command_tree_core::{
    ArgumentSpec, Example, OptionSpec, ParsedOptions, ValidationError, validate_arguments,
    validate_options,
};
use command_tree_help::{
    FixedInvocation, HelpDoc, HelpStyle, InvocationName, SubcommandSummary, render_help_styled,
};
use command_tree_parser::ArgvParser;
use tracing::{debug, warn};

use crate::{CommandError, ExecContext, ProgramName, RunPolicy, Stage, StdConsole, Termination};

/// Action closure: positional arguments, parsed options and the command
/// that matched.
pub type ActionFn = Box<dyn Fn(&[String], &ParsedOptions, &Command) -> anyhow::Result<()>>;

/// Hook closure run before or after the action.
pub type HookFn = Box<dyn Fn(&[String], &ParsedOptions) -> anyhow::Result<()>>;

/// Diagnostic printed when `--version` is requested but none is declared.
pub const NO_VERSION_MESSAGE: &str = "no version set";

/// Diagnostic printed when a command without an action is run.
pub const NO_HANDLER_MESSAGE: &str = "command has no handler";

/// What [`Command::execute`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `--help`/`-h` was present and help was printed.
    HelpShown,
    /// `--version`/`-v` was present and the version (or a diagnostic) was
    /// printed.
    VersionShown,
    /// The command has no action; a warning and help were printed.
    NoHandler,
    /// Hooks and action ran to completion.
    Completed { keep_alive: bool },
}

/// A node in a command tree.
///
/// Built with consuming builder methods and then executed by reference.
/// Subcommands are owned by their parent; a subcommand alias is only a
/// string key pointing at a child's name.
///
/// # Examples
///
/// ```
/// use command_tree::{BufferConsole, Command, ExecContext, Outcome};
/// use command_tree_core::OptionSpec;
///
/// let app = Command::new("app")
///     .version("1.0.0")
///     .subcommand(
///         Command::new("deploy")
///             .description("Deploy the application")
///             .option(OptionSpec::value("env", "Target environment").required())
///             .action(|_args, options, _cmd| {
///                 assert_eq!(options.get_str("env"), Some("prod"));
///                 Ok(())
///             }),
///     )
///     .subcommand_alias("d", "deploy")
///     .unwrap();
///
/// let mut console = BufferConsole::default();
/// let mut ctx = ExecContext::new(&mut console);
/// let outcome = app.execute(&["d", "--env", "prod"], &mut ctx).unwrap();
/// assert_eq!(outcome, Outcome::Completed { keep_alive: false });
/// ```
pub struct Command {
    name: String,
    aliases: Vec<String>,
    description: Option<String>,
    version: Option<String>,
    usage: Option<String>,
    keep_alive: bool,
    examples: Vec<Example>,
    options: Vec<OptionSpec>,
    arguments: Vec<ArgumentSpec>,
    action: Option<ActionFn>,
    before: Option<HookFn>,
    after: Option<HookFn>,
    subcommands: Vec<Command>,
    subcommand_aliases: Vec<(String, String)>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("version", &self.version)
            .field("usage", &self.usage)
            .field("keep_alive", &self.keep_alive)
            .field("examples", &self.examples)
            .field("options", &self.options)
            .field("arguments", &self.arguments)
            .field("has_action", &self.action.is_some())
            .field("has_before", &self.before.is_some())
            .field("has_after", &self.after.is_some())
            .field("subcommands", &self.subcommands)
            .field("subcommand_aliases", &self.subcommand_aliases)
            .finish()
    }
}

impl Command {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            description: None,
            version: None,
            usage: None,
            keep_alive: false,
            examples: Vec::new(),
            options: Vec::new(),
            arguments: Vec::new(),
            action: None,
            before: None,
            after: None,
            subcommands: Vec::new(),
            subcommand_aliases: Vec::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Adds a display alias shown next to the name in help.
    ///
    /// Routing by alias is declared on the parent with
    /// [`subcommand_alias`](Command::subcommand_alias).
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Replaces the synthesized usage line in help.
    pub fn usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_string());
        self
    }

    /// Keeps the process alive after a successful run.
    pub fn keep_alive(mut self) -> Self {
        self.keep_alive = true;
        self
    }

    pub fn example(mut self, command: &str, description: Option<&str>) -> Self {
        self.examples.push(Example::new(command, description));
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Sets the action run after a successful parse.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&[String], &ParsedOptions, &Command) -> anyhow::Result<()> + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Sets the hook run before the action.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&[String], &ParsedOptions) -> anyhow::Result<()> + 'static,
    {
        self.before = Some(Box::new(hook));
        self
    }

    /// Sets the hook run after the action succeeds.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&[String], &ParsedOptions) -> anyhow::Result<()> + 'static,
    {
        self.after = Some(Box::new(hook));
        self
    }

    /// Adds a subcommand. A subcommand with the same name is replaced in
    /// place, keeping its position in help.
    pub fn subcommand(mut self, subcommand: Command) -> Self {
        match self
            .subcommands
            .iter_mut()
            .find(|existing| existing.name == subcommand.name)
        {
            Some(existing) => *existing = subcommand,
            None => self.subcommands.push(subcommand),
        }
        self
    }

    /// Routes `alias` to the subcommand named `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownAliasTarget`] when no subcommand
    /// named `target` has been added yet.
    pub fn subcommand_alias(mut self, alias: &str, target: &str) -> Result<Self, ValidationError> {
        if !self.subcommands.iter().any(|s| s.name == target) {
            return Err(ValidationError::UnknownAliasTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            });
        }
        match self.subcommand_aliases.iter_mut().find(|(a, _)| a == alias) {
            Some(entry) => entry.1 = target.to_string(),
            None => self
                .subcommand_aliases
                .push((alias.to_string(), target.to_string())),
        }
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn get_version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn get_usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    pub fn is_keep_alive(&self) -> bool {
        self.keep_alive
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    pub fn subcommands(&self) -> &[Command] {
        &self.subcommands
    }

    /// `(alias, target)` pairs in registration order.
    pub fn subcommand_aliases(&self) -> &[(String, String)] {
        &self.subcommand_aliases
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Finds the child a token routes to: registered aliases first, then
    /// names.
    pub fn find_subcommand(&self, token: &str) -> Option<&Command> {
        let target = self
            .subcommand_aliases
            .iter()
            .find(|(alias, _)| alias == token)
            .map(|(_, target)| target.as_str())
            .unwrap_or(token);
        self.subcommands.iter().find(|s| s.name == target)
    }

    /// Walks argv down the tree without running anything.
    ///
    /// Each leading token that names (or aliases) a child of the current
    /// node is consumed; resolution stops at the first token that does not.
    pub fn resolve<S: AsRef<str>>(&self, argv: &[S]) -> Resolved<'_> {
        let mut lineage = vec![self];
        let mut consumed = 0;

        for token in argv {
            let token: &str = token.as_ref();
            let current = lineage[lineage.len() - 1];
            match current.find_subcommand(token) {
                Some(child) => {
                    debug!(token, command = %child.name, "routed to subcommand");
                    lineage.push(child);
                    consumed += 1;
                }
                None => break,
            }
        }

        Resolved { lineage, consumed }
    }

    /// Checks this command and every descendant for declaration problems,
    /// collecting all of them, parents before children.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_tree::Command;
    /// use command_tree_core::{OptionSpec, ValidationError};
    ///
    /// let app = Command::new("app").subcommand(
    ///     Command::new("run").option(OptionSpec::flag("verbose", "Verbose").alias("v")),
    /// );
    /// assert_eq!(
    ///     app.validate(),
    ///     vec![ValidationError::ShadowedFlag("-v".to_string())]
    /// );
    /// ```
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ValidationError::EmptyCommandName);
        }
        errors.extend(validate_options(&self.options));
        errors.extend(validate_arguments(&self.arguments));

        let mut names = HashSet::new();
        for sub in &self.subcommands {
            if !names.insert(sub.name.as_str()) {
                errors.push(ValidationError::DuplicateSubcommand(sub.name.clone()));
            }
        }
        for (alias, target) in &self.subcommand_aliases {
            if !names.contains(target.as_str()) {
                errors.push(ValidationError::UnknownAliasTarget {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        for sub in &self.subcommands {
            errors.extend(sub.validate());
        }
        errors
    }

    /// Help text for this command treated as the root.
    pub fn render_help(&self, invocation: &dyn InvocationName, style: &dyn HelpStyle) -> String {
        self.resolve::<&str>(&[]).render_help(invocation, style)
    }

    /// Resolves argv against the tree and runs the matched command.
    ///
    /// Routing happens before anything else, so `app deploy --help` shows
    /// help for `deploy`. At the matched command, `--help`/`-h` anywhere in
    /// the remaining tokens wins over `--version`/`-v`, which wins over
    /// parsing. Hooks and the action run strictly in sequence; the after
    /// hook never runs when an earlier stage fails.
    ///
    /// Never exits the process; see [`run_with`](Command::run_with).
    pub fn execute<S: AsRef<str>>(
        &self,
        argv: &[S],
        ctx: &mut ExecContext<'_>,
    ) -> Result<Outcome, CommandError> {
        let resolved = self.resolve(argv);
        let command = resolved.command();
        let rest = &argv[resolved.consumed..];

        if contains_flag(rest, "--help", "-h") {
            debug!(command = %command.name, "help requested");
            let text = resolved.help_for(ctx);
            ctx.console().out(&text);
            return Ok(Outcome::HelpShown);
        }

        if contains_flag(rest, "--version", "-v") {
            debug!(command = %command.name, "version requested");
            match &command.version {
                Some(version) => ctx.console().out(&format!("{version}\n")),
                None => ctx.console().error(NO_VERSION_MESSAGE),
            }
            return Ok(Outcome::VersionShown);
        }

        let parsed = ArgvParser::new(&command.options, &command.arguments).parse(rest)?;

        let Some(action) = &command.action else {
            warn!(command = %command.name, "command has no handler");
            ctx.console().warning(NO_HANDLER_MESSAGE);
            let text = resolved.help_for(ctx);
            ctx.console().out(&text);
            return Ok(Outcome::NoHandler);
        };

        let args = parsed.arguments.as_slice();
        let options = &parsed.options;

        if let Some(before) = &command.before {
            before(args, options).map_err(|error| handler_error(Stage::Before, error))?;
        }
        action(args, options, command).map_err(|error| handler_error(Stage::Action, error))?;
        if let Some(after) = &command.after {
            after(args, options).map_err(|error| handler_error(Stage::After, error))?;
        }

        debug!(command = %command.name, keep_alive = command.keep_alive, "command completed");
        Ok(Outcome::Completed {
            keep_alive: command.keep_alive,
        })
    }

    /// Executes and turns the outcome into an exit decision.
    ///
    /// Errors are reported once through the console and always yield
    /// `Exit(1)`. Successful outcomes yield `Exit(0)` when the policy
    /// terminates on success, except for keep-alive commands, which
    /// always continue.
    pub fn run_with<S: AsRef<str>>(
        &self,
        argv: &[S],
        ctx: &mut ExecContext<'_>,
        policy: RunPolicy,
    ) -> Termination {
        match self.execute(argv, ctx) {
            Ok(Outcome::Completed { keep_alive: true }) => Termination::Continue,
            Ok(_) if policy.terminate_on_success => Termination::Exit(0),
            Ok(_) => Termination::Continue,
            Err(err) => {
                if let CommandError::Handler { stage, .. } = &err {
                    debug!(%stage, "handler failed");
                }
                ctx.console().error(&err.to_string());
                Termination::Exit(err.exit_code())
            }
        }
    }

    /// Runs against the process arguments and exits when the outcome says
    /// so.
    ///
    /// Declaration problems found by [`validate`](Command::validate) are
    /// logged as warnings; they do not stop the run.
    pub fn run(&self) {
        for problem in self.validate() {
            warn!(%problem, "command declaration problem");
        }

        let invocation = ProgramName::from_env(&self.name);
        let mut console = StdConsole;
        let mut ctx = ExecContext::new(&mut console).with_invocation(&invocation);

        let argv = std::env::args_os().skip(1);
        if let Termination::Exit(code) = self.run_os_with(argv, &mut ctx, RunPolicy::default()) {
            std::process::exit(code);
        }
    }

    /// Like [`run_with`](Command::run_with) for raw OS arguments. Tokens
    /// that are not valid UTF-8 are converted lossily, so invalid bytes
    /// become `U+FFFD` instead of aborting the run.
    pub fn run_os_with<I, T>(
        &self,
        argv: I,
        ctx: &mut ExecContext<'_>,
        policy: RunPolicy,
    ) -> Termination
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv: Vec<String> = argv
            .into_iter()
            .map(|token| {
                let token: OsString = token.into();
                match token.into_string() {
                    Ok(token) => token,
                    Err(raw) => {
                        let lossy = raw.to_string_lossy().into_owned();
                        debug!(token = %lossy, "argument is not valid UTF-8");
                        lossy
                    }
                }
            })
            .collect();
        self.run_with(&argv, ctx, policy)
    }
}

/// `true` if either spelling appears anywhere in `tokens`.
fn contains_flag<S: AsRef<str>>(tokens: &[S], long: &str, short: &str) -> bool {
    tokens.iter().any(|token| {
        let token: &str = token.as_ref();
        token == long || token == short
    })
}

fn handler_error(stage: Stage, error: anyhow::Error) -> CommandError {
    CommandError::Handler { stage, error }
}

/// Result of [`Command::resolve`]: the matched command, the commands
/// leading to it and how many argv tokens routing consumed.
#[derive(Debug, Clone)]
pub struct Resolved<'c> {
    lineage: Vec<&'c Command>,
    consumed: usize,
}

impl<'c> Resolved<'c> {
    /// The command argv routed to.
    pub fn command(&self) -> &'c Command {
        self.lineage[self.lineage.len() - 1]
    }

    /// Number of leading argv tokens consumed by routing.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Command names from the root to the matched command.
    pub fn path(&self) -> Vec<&'c str> {
        self.lineage.iter().map(|c| c.name.as_str()).collect()
    }

    /// Canonical subcommand names below the root.
    pub fn route(&self) -> Vec<&'c str> {
        self.lineage[1..].iter().map(|c| c.name.as_str()).collect()
    }

    /// Help document for the matched command.
    pub fn help_doc(&self) -> HelpDoc<'c> {
        let command = self.command();
        HelpDoc {
            name: &command.name,
            path: self.path(),
            route: self.route(),
            aliases: &command.aliases,
            description: command.description.as_deref(),
            version: command.version.as_deref(),
            usage: command.usage.as_deref(),
            examples: &command.examples,
            options: &command.options,
            arguments: &command.arguments,
            subcommands: command
                .subcommands
                .iter()
                .map(|sub| SubcommandSummary {
                    name: &sub.name,
                    description: sub.description.as_deref(),
                    options: &sub.options,
                })
                .collect(),
        }
    }

    pub fn render_help(&self, invocation: &dyn InvocationName, style: &dyn HelpStyle) -> String {
        render_help_styled(&self.help_doc(), invocation, style)
    }

    fn help_for(&self, ctx: &ExecContext<'_>) -> String {
        match ctx.invocation() {
            Some(invocation) => self.render_help(invocation, ctx.style()),
            None => {
                let root = FixedInvocation::new(self.lineage[0].name.as_str());
                self.render_help(&root, ctx.style())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Command {
        Command::new("app")
            .subcommand(Command::new("deploy").subcommand(Command::new("rollback")))
            .subcommand(Command::new("status"))
            .subcommand_alias("d", "deploy")
            .unwrap()
    }

    #[test]
    fn test_resolve_by_name_and_alias() {
        let app = tree();

        let by_name = app.resolve(&["deploy", "rollback", "--force"]);
        let by_alias = app.resolve(&["d", "rollback", "--force"]);

        assert_eq!(by_name.path(), vec!["app", "deploy", "rollback"]);
        assert_eq!(by_alias.path(), by_name.path());
        assert_eq!(by_alias.route(), vec!["deploy", "rollback"]);
        assert_eq!(by_alias.consumed(), 2);
    }

    #[test]
    fn test_resolve_stops_at_first_non_subcommand() {
        let app = tree();

        let resolved = app.resolve(&["status", "deploy"]);
        assert_eq!(resolved.command().name(), "status");
        assert_eq!(resolved.consumed(), 1);

        let resolved = app.resolve(&["--verbose", "deploy"]);
        assert_eq!(resolved.command().name(), "app");
        assert_eq!(resolved.consumed(), 0);
    }

    #[test]
    fn test_alias_is_consulted_before_names() {
        let app = Command::new("app")
            .subcommand(Command::new("list"))
            .subcommand(Command::new("ls"))
            .subcommand_alias("ls", "list")
            .unwrap();

        assert_eq!(app.find_subcommand("ls").map(Command::name), Some("list"));
    }

    #[test]
    fn test_subcommand_alias_requires_existing_target() {
        let err = Command::new("app").subcommand_alias("d", "deploy").unwrap_err();

        assert_eq!(
            err,
            ValidationError::UnknownAliasTarget {
                alias: "d".to_string(),
                target: "deploy".to_string(),
            }
        );
    }

    #[test]
    fn test_same_name_subcommand_replaces_in_place() {
        let app = Command::new("app")
            .subcommand(Command::new("a").description("old"))
            .subcommand(Command::new("b"))
            .subcommand(Command::new("a").description("new"));

        let names: Vec<&str> = app.subcommands().iter().map(Command::name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(app.subcommands()[0].get_description(), Some("new"));
    }

    #[test]
    fn test_realiasing_replaces_target() {
        let app = Command::new("app")
            .subcommand(Command::new("deploy"))
            .subcommand(Command::new("destroy"))
            .subcommand_alias("d", "deploy")
            .unwrap()
            .subcommand_alias("d", "destroy")
            .unwrap();

        assert_eq!(app.subcommand_aliases().len(), 1);
        assert_eq!(app.find_subcommand("d").map(Command::name), Some("destroy"));
    }

    #[test]
    fn test_validate_recurses_into_subcommands() {
        let app = Command::new("app").subcommand(
            Command::new("copy")
                .argument(ArgumentSpec::optional("source", "Source"))
                .argument(ArgumentSpec::required("dest", "Destination")),
        );

        assert!(matches!(
            app.validate().as_slice(),
            [ValidationError::RequiredAfterOptional { .. }]
        ));
        assert!(tree().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_problems_across_the_tree() {
        let app = Command::new("app")
            .option(OptionSpec::flag("version", "Shadowed"))
            .subcommand(Command::new("run").option(OptionSpec::flag("quiet", "Quiet").alias("h")))
            .subcommand(Command::new(""));

        assert_eq!(
            app.validate(),
            vec![
                ValidationError::ShadowedFlag("--version".to_string()),
                ValidationError::ShadowedFlag("-h".to_string()),
                ValidationError::EmptyCommandName,
            ]
        );
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let app = Command::new("app").subcommand(Command::new(" "));

        assert_eq!(app.validate(), vec![ValidationError::EmptyCommandName]);
    }

    #[test]
    fn test_help_doc_reflects_lineage() {
        let app = tree();
        let resolved = app.resolve(&["d"]);
        let doc = resolved.help_doc();

        assert_eq!(doc.name, "deploy");
        assert_eq!(doc.path, vec!["app", "deploy"]);
        assert_eq!(doc.route, vec!["deploy"]);
        assert_eq!(doc.subcommands.len(), 1);
        assert_eq!(doc.subcommands[0].name, "rollback");
    }

    #[test]
    fn test_run_os_with_accepts_plain_os_strings() {
        let app = Command::new("app")
            .option(OptionSpec::value("name", "Name").required())
            .action(|_args, _options, _cmd| Ok(()));
        let mut console = crate::BufferConsole::default();
        let mut ctx = ExecContext::new(&mut console);

        let argv = [OsString::from("--name"), OsString::from("Alice")];
        let termination = app.run_os_with(argv, &mut ctx, RunPolicy::default());

        assert_eq!(termination, Termination::Exit(0));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_os_with_converts_invalid_utf8_lossily() {
        use std::cell::RefCell;
        use std::os::unix::ffi::OsStringExt;
        use std::rc::Rc;

        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let record = Rc::clone(&seen);
        let app = Command::new("app").action(move |args, _options, _cmd| {
            record.borrow_mut().extend(args.iter().cloned());
            Ok(())
        });
        let mut console = crate::BufferConsole::default();
        let mut ctx = ExecContext::new(&mut console);

        let argv = vec![OsString::from_vec(vec![0x66, 0xff, 0x6f])];
        let termination = app.run_os_with(argv, &mut ctx, RunPolicy::default());

        assert_eq!(termination, Termination::Exit(0));
        assert_eq!(*seen.borrow(), vec!["f\u{fffd}o".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_utf8_option_value_fails_with_diagnostic() {
        use std::os::unix::ffi::OsStringExt;

        let app = Command::new("app")
            .option(OptionSpec::value("env", "Environment").choices(["dev", "prod"]))
            .action(|_args, _options, _cmd| Ok(()));
        let mut console = crate::BufferConsole::default();
        let mut ctx = ExecContext::new(&mut console);

        let argv = vec![OsString::from("--env"), OsString::from_vec(vec![0xff])];
        let termination = app.run_os_with(argv, &mut ctx, RunPolicy::default());

        assert_eq!(termination, Termination::Exit(1));
        assert_eq!(
            console.stderr(),
            "error: option --env must be one of: dev, prod\n"
        );
    }
}
