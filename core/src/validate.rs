//! Declaration validation.
//!
//! Checks structural invariants of option and argument lists before they
//! are used for parsing: duplicate names and aliases, malformed names,
//! relations that point at undeclared options, and argument ordering.
//! The parser itself does not depend on these checks; they catch mistakes
//! in a command's declaration rather than in the user's input.
//!
//! # Examples
//!
//! ```
//! use command_tree_core::*;
//!
//! let options = vec![
//!     OptionSpec::value("name", "Your name").alias("n"),
//!     OptionSpec::flag("loud", "Shout"),
//! ];
//! assert!(validate_options(&options).is_empty());
//!
//! // Invalid: two options share an alias
//! let options = vec![
//!     OptionSpec::value("name", "Your name").alias("n"),
//!     OptionSpec::value("number", "A number").alias("n"),
//! ];
//! assert_eq!(
//!     validate_options(&options),
//!     vec![ValidationError::DuplicateAlias("n".to_string())]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ArgumentSpec, OptionSpec};

/// Long names intercepted before parsing.
pub const RESERVED_NAMES: [&str; 2] = ["help", "version"];

/// Aliases intercepted before parsing.
pub const RESERVED_ALIASES: [&str; 2] = ["h", "v"];

/// Declaration validation errors.
///
/// Each variant describes one structural problem. The `Display` impl
/// provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Option name is empty.
    #[error("option name cannot be empty")]
    EmptyOptionName,
    /// Option name starts with `-` or contains `=` or whitespace.
    #[error("invalid option name: {0}")]
    InvalidOptionName(String),
    /// Alias is not a single character other than `-` or `=`.
    #[error("invalid alias for option --{option}: {alias}")]
    InvalidAlias { option: String, alias: String },
    /// Two options share the same name.
    #[error("duplicate option: --{0}")]
    DuplicateOption(String),
    /// Two options share the same alias.
    #[error("duplicate alias: -{0}")]
    DuplicateAlias(String),
    /// A conflict or dependency names an undeclared option.
    #[error("option --{option} references undeclared option --{reference}")]
    UnknownOptionReference { option: String, reference: String },
    /// The flag can never be parsed because help/version handling claims it.
    #[error("flag {0} is shadowed by built-in help/version handling")]
    ShadowedFlag(String),
    /// Argument name is empty.
    #[error("argument name cannot be empty")]
    EmptyArgumentName,
    /// Two arguments share the same name.
    #[error("duplicate argument: {0}")]
    DuplicateArgument(String),
    /// A required argument follows an optional one.
    #[error("required argument {required} declared after optional argument {optional}")]
    RequiredAfterOptional { required: String, optional: String },
    /// Two subcommands in the same scope share the same name.
    #[error("duplicate subcommand in scope: {0}")]
    DuplicateSubcommand(String),
    /// A subcommand alias points at a subcommand that does not exist.
    #[error("subcommand alias {alias} targets unknown subcommand {target}")]
    UnknownAliasTarget { alias: String, target: String },
}

/// Validates an option list.
///
/// Checks names, aliases, duplicates, reserved flags and relation targets,
/// collecting every problem in declaration order.
pub fn validate_options(options: &[OptionSpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();
    let mut aliases = HashSet::new();

    for option in options {
        let name = option.name.as_str();
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyOptionName);
        } else if name.starts_with('-') || name.contains('=') || name.contains(char::is_whitespace)
        {
            errors.push(ValidationError::InvalidOptionName(name.to_string()));
        } else if !names.insert(name) {
            errors.push(ValidationError::DuplicateOption(name.to_string()));
        } else if RESERVED_NAMES.contains(&name) {
            errors.push(ValidationError::ShadowedFlag(format!("--{name}")));
        }

        if let Some(alias) = option.alias.as_deref() {
            let mut chars = alias.chars();
            let single = matches!((chars.next(), chars.next()), (Some(c), None) if c != '-' && c != '=');
            if !single {
                errors.push(ValidationError::InvalidAlias {
                    option: name.to_string(),
                    alias: alias.to_string(),
                });
            } else if !aliases.insert(alias) {
                errors.push(ValidationError::DuplicateAlias(alias.to_string()));
            } else if RESERVED_ALIASES.contains(&alias) {
                errors.push(ValidationError::ShadowedFlag(format!("-{alias}")));
            }
        }
    }

    for option in options {
        let references = option.conflicts.iter().chain(option.depends_on.iter());
        for reference in references {
            if !names.contains(reference.as_str()) {
                errors.push(ValidationError::UnknownOptionReference {
                    option: option.name.clone(),
                    reference: reference.clone(),
                });
            }
        }
    }

    errors
}

/// Validates a positional argument list, collecting every problem.
///
/// # Examples
///
/// ```
/// use command_tree_core::*;
///
/// let args = vec![
///     ArgumentSpec::optional("path", "Directory"),
///     ArgumentSpec::required("name", "Project name"),
/// ];
/// assert!(matches!(
///     validate_arguments(&args).as_slice(),
///     [ValidationError::RequiredAfterOptional { .. }]
/// ));
/// ```
pub fn validate_arguments(arguments: &[ArgumentSpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let mut first_optional: Option<&str> = None;

    for argument in arguments {
        let name = argument.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyArgumentName);
        } else if !seen.insert(name) {
            errors.push(ValidationError::DuplicateArgument(name.to_string()));
        }

        match (argument.required, first_optional) {
            (true, Some(optional)) => {
                errors.push(ValidationError::RequiredAfterOptional {
                    required: name.to_string(),
                    optional: optional.to_string(),
                });
            }
            (false, None) => first_optional = Some(name),
            _ => {}
        }
    }

    errors
}
