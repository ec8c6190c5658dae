//! Parse failures.
//!
//! Every variant is fatal for the invocation that produced it. The
//! `Display` text is the single diagnostic line shown to the user.

use thiserror::Error;

/// Exit status used for every parse failure.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// The first rule violation found while parsing an argv list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An option-shaped token matches no declared name or alias.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// A value-bearing option has no usable value after it.
    #[error("option {0} requires a value")]
    MissingValue(String),

    /// A number option's value is not numeric.
    #[error("cannot convert \"{0}\" to number")]
    InvalidNumber(String),

    /// An option value is outside its declared choices.
    #[error("option --{option} must be one of: {}", .choices.join(", "))]
    OptionChoice {
        option: String,
        value: String,
        choices: Vec<String>,
    },

    /// A positional value is outside its declared choices.
    #[error("argument {argument} must be one of: {}", .choices.join(", "))]
    ArgumentChoice {
        argument: String,
        value: String,
        choices: Vec<String>,
    },

    /// An option validator rejected the value.
    #[error("{message}")]
    InvalidOptionValue { option: String, message: String },

    /// An argument validator rejected the value.
    #[error("{message}")]
    InvalidArgumentValue { argument: String, message: String },

    /// Two mutually exclusive options are both present.
    #[error("conflicting options: --{option} cannot be used with --{conflict}")]
    Conflict { option: String, conflict: String },

    /// An option is present without an option it depends on.
    #[error("missing dependency: --{option} requires --{dependency}")]
    MissingDependency { option: String, dependency: String },

    /// A required option is absent after parsing.
    #[error("required option missing: --{0}")]
    MissingRequiredOption(String),

    /// A required positional argument is absent.
    #[error("missing required argument: {0}")]
    MissingArgument(String),
}

impl ParseError {
    /// Exit status the process should terminate with.
    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ParseError::UnknownOption("--nope".into()).to_string(),
            "unknown option: --nope"
        );
        assert_eq!(
            ParseError::OptionChoice {
                option: "env".into(),
                value: "qa".into(),
                choices: vec!["dev".into(), "prod".into()],
            }
            .to_string(),
            "option --env must be one of: dev, prod"
        );
        assert_eq!(
            ParseError::MissingRequiredOption("token".into()).to_string(),
            "required option missing: --token"
        );
        assert_eq!(
            ParseError::InvalidOptionValue {
                option: "token".into(),
                message: "token too short".into(),
            }
            .to_string(),
            "token too short"
        );
    }

    #[test]
    fn test_exit_code_is_one() {
        assert_eq!(ParseError::MissingArgument("file".into()).exit_code(), 1);
    }
}
