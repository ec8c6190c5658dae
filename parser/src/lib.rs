//! Argv parsing against declared options and positional arguments.
//!
//! The parser makes a single left-to-right pass over the tokens:
//!
//! - `--name` / `--name=value` tokens are matched by exact option name;
//! - `-x` tokens are matched by exact alias (no short-flag clustering, no
//!   `=` syntax);
//! - every other token, including a lone `-`, is positional.
//!
//! A value-bearing option takes its value from the `=` suffix, or else from
//! the next token as long as that token does not start with `-`. Boolean
//! switches record `true` and ignore any `=` suffix.
//!
//! After the pass, required positional arguments are checked by index,
//! supplied positionals run their choices/validator, and finally
//! conflicts, dependencies and required options are checked over the
//! complete option map in declaration order. The first violation wins.
//!
//! # Example
//!
//! ```
//! use command_tree_core::{OptionSpec, OptionValue};
//! use command_tree_parser::parse;
//!
//! let options = vec![
//!     OptionSpec::value("name", "Your name").alias("n").required(),
//!     OptionSpec::flag("verbose", "Verbose output"),
//! ];
//!
//! let result = parse(&["-n", "Alice", "--verbose"], &options, &[]).unwrap();
//! assert!(result.arguments.is_empty());
//! assert_eq!(result.options.get_str("name"), Some("Alice"));
//! assert_eq!(result.options.get("verbose"), Some(&OptionValue::Boolean(true)));
//! ```

mod check;
mod coerce;

use command_tree_core::{
    ArgumentSpec, OptionSpec, OptionValue, ParseError, ParsedOptions, ParsedResult,
};
use tracing::debug;

pub use check::{check_argument_value, check_option_value, check_relations};
pub use coerce::{coerce, js_number};

/// Parser bound to one command's option and argument declarations.
#[derive(Debug, Clone, Copy)]
pub struct ArgvParser<'a> {
    options: &'a [OptionSpec],
    arguments: &'a [ArgumentSpec],
}

impl<'a> ArgvParser<'a> {
    pub fn new(options: &'a [OptionSpec], arguments: &'a [ArgumentSpec]) -> Self {
        Self { options, arguments }
    }

    /// Parses `tokens` (program name excluded), stopping at the first error.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParsedResult, ParseError> {
        let mut result = ParsedResult {
            arguments: Vec::new(),
            options: self.defaults(),
        };

        let mut cursor = 0;
        while cursor < tokens.len() {
            let token = tokens[cursor].as_ref();

            if let Some(body) = token.strip_prefix("--") {
                let (name, inline) = match body.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (body, None),
                };
                let option = self
                    .find_by_name(name)
                    .ok_or_else(|| ParseError::UnknownOption(token.to_string()))?;

                if option.requires_value {
                    let value = match inline {
                        Some(value) => value,
                        None => {
                            let value = next_value(tokens, cursor)
                                .ok_or_else(|| ParseError::MissingValue(format!("--{name}")))?;
                            cursor += 1;
                            value
                        }
                    };
                    accept_value(option, value, &mut result.options)?;
                } else {
                    accept_switch(option, &mut result.options);
                }
            } else if token.len() > 1 && token.starts_with('-') {
                let alias = &token[1..];
                let option = self
                    .find_by_alias(alias)
                    .ok_or_else(|| ParseError::UnknownOption(token.to_string()))?;

                if option.requires_value {
                    let value = next_value(tokens, cursor)
                        .ok_or_else(|| ParseError::MissingValue(token.to_string()))?;
                    cursor += 1;
                    accept_value(option, value, &mut result.options)?;
                } else {
                    accept_switch(option, &mut result.options);
                }
            } else {
                debug!(token, "positional argument");
                result.arguments.push(token.to_string());
            }

            cursor += 1;
        }

        self.check_arguments(&result.arguments)?;
        check_relations(self.options, &result.options)?;

        Ok(result)
    }

    fn defaults(&self) -> ParsedOptions {
        let mut options = ParsedOptions::new();
        for option in self.options {
            if let Some(default) = &option.default_value {
                options.insert(&option.name, default.clone());
            }
        }
        options
    }

    fn find_by_name(&self, name: &str) -> Option<&'a OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    fn find_by_alias(&self, alias: &str) -> Option<&'a OptionSpec> {
        self.options.iter().find(|o| o.matches_alias(alias))
    }

    fn check_arguments(&self, supplied: &[String]) -> Result<(), ParseError> {
        for (index, argument) in self.arguments.iter().enumerate() {
            match supplied.get(index) {
                Some(value) => check_argument_value(argument, value)?,
                None if argument.required => {
                    return Err(ParseError::MissingArgument(argument.name.clone()));
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// Parses `tokens` against `options` and `arguments`.
///
/// Shorthand for [`ArgvParser::new`] followed by [`ArgvParser::parse`].
///
/// # Examples
///
/// ```
/// use command_tree_core::{OptionSpec, ParseError};
/// use command_tree_parser::parse;
///
/// let options = vec![OptionSpec::value("token", "API token").required()];
///
/// let err = parse::<&str>(&[], &options, &[]).unwrap_err();
/// assert_eq!(err, ParseError::MissingRequiredOption("token".to_string()));
/// assert_eq!(err.exit_code(), 1);
/// ```
pub fn parse<S: AsRef<str>>(
    tokens: &[S],
    options: &[OptionSpec],
    arguments: &[ArgumentSpec],
) -> Result<ParsedResult, ParseError> {
    ArgvParser::new(options, arguments).parse(tokens)
}

/// The token after `cursor`, if it can serve as a value.
fn next_value<S: AsRef<str>>(tokens: &[S], cursor: usize) -> Option<&str> {
    tokens
        .get(cursor + 1)
        .map(AsRef::as_ref)
        .filter(|t| !t.starts_with('-'))
}

fn accept_value(
    option: &OptionSpec,
    value: &str,
    parsed: &mut ParsedOptions,
) -> Result<(), ParseError> {
    check_option_value(option, value)?;
    let coerced = coerce(value, option.kind)?;
    debug!(option = %option.name, value, "matched value option");
    parsed.insert(&option.name, coerced);
    Ok(())
}

fn accept_switch(option: &OptionSpec, parsed: &mut ParsedOptions) {
    debug!(option = %option.name, "matched switch");
    parsed.insert(&option.name, OptionValue::Boolean(true));
}

#[cfg(test)]
mod tests {
    use command_tree_core::ValueKind;

    use super::*;

    fn schema() -> Vec<OptionSpec> {
        vec![
            OptionSpec::value("name", "Name").alias("n"),
            OptionSpec::flag("verbose", "Verbose"),
            OptionSpec::value("count", "Count").kind(ValueKind::Number),
        ]
    }

    #[test]
    fn test_equals_syntax_splits_on_first_equals() {
        let result = parse(&["--name=a=b"], &schema(), &[]).unwrap();

        assert_eq!(result.options.get_str("name"), Some("a=b"));
    }

    #[test]
    fn test_equals_with_empty_value() {
        let result = parse(&["--name="], &schema(), &[]).unwrap();

        assert_eq!(result.options.get_str("name"), Some(""));
    }

    #[test]
    fn test_switch_ignores_equals_suffix() {
        let result = parse(&["--verbose=anything"], &schema(), &[]).unwrap();

        assert_eq!(result.options.get_bool("verbose"), Some(true));
    }

    #[test]
    fn test_value_must_not_look_like_option() {
        let err = parse(&["--count", "-42"], &schema(), &[]).unwrap_err();
        assert_eq!(err, ParseError::MissingValue("--count".to_string()));

        let err = parse(&["-n", "--verbose"], &schema(), &[]).unwrap_err();
        assert_eq!(err, ParseError::MissingValue("-n".to_string()));
    }

    #[test]
    fn test_negative_number_through_equals() {
        let result = parse(&["--count=-42"], &schema(), &[]).unwrap();

        assert_eq!(result.options.get_number("count"), Some(-42.0));
    }

    #[test]
    fn test_alias_does_not_support_equals() {
        let err = parse(&["-n=Alice"], &schema(), &[]).unwrap_err();

        assert_eq!(err, ParseError::UnknownOption("-n=Alice".to_string()));
    }

    #[test]
    fn test_no_short_flag_clustering() {
        let options = vec![
            OptionSpec::flag("all", "All").alias("a"),
            OptionSpec::flag("brief", "Brief").alias("b"),
        ];

        let err = parse(&["-ab"], &options, &[]).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption("-ab".to_string()));
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let result = parse(&["-", "file.txt"], &schema(), &[]).unwrap();

        assert_eq!(result.arguments, vec!["-", "file.txt"]);
    }

    #[test]
    fn test_double_dash_is_unknown_option() {
        let err = parse(&["--"], &schema(), &[]).unwrap_err();

        assert_eq!(err, ParseError::UnknownOption("--".to_string()));
    }

    #[test]
    fn test_positionals_keep_appearance_order() {
        let result = parse(&["b", "--verbose", "a", "-n", "x", "c"], &schema(), &[]).unwrap();

        assert_eq!(result.arguments, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_later_occurrence_overwrites_value() {
        let result = parse(&["-n", "first", "--name", "second"], &schema(), &[]).unwrap();

        assert_eq!(result.options.get_str("name"), Some("second"));
    }

    #[test]
    fn test_supplied_value_replaces_default() {
        let options = vec![OptionSpec::value("port", "Port")
            .kind(ValueKind::Number)
            .default_value(8080)];

        let result = parse(&["--port", "9000"], &options, &[]).unwrap();
        assert_eq!(result.options.get_number("port"), Some(9000.0));
    }

    #[test]
    fn test_missing_required_argument_by_index() {
        let arguments = vec![
            ArgumentSpec::required("source", "Source"),
            ArgumentSpec::required("dest", "Destination"),
        ];

        let err = parse(&["only-one"], &[], &arguments).unwrap_err();
        assert_eq!(err, ParseError::MissingArgument("dest".to_string()));
    }

    #[test]
    fn test_token_errors_precede_argument_errors() {
        let arguments = vec![ArgumentSpec::required("file", "File")];

        let err = parse(&["--bogus"], &schema(), &arguments).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption("--bogus".to_string()));
    }

    #[test]
    fn test_argument_errors_precede_relation_errors() {
        let options = vec![OptionSpec::value("token", "Token").required()];
        let arguments = vec![ArgumentSpec::required("file", "File")];

        let err = parse::<&str>(&[], &options, &arguments).unwrap_err();
        assert_eq!(err, ParseError::MissingArgument("file".to_string()));
    }

    #[test]
    fn test_extra_positionals_are_kept() {
        let arguments = vec![ArgumentSpec::optional("file", "File")];

        let result = parse(&["a", "b"], &[], &arguments).unwrap();
        assert_eq!(result.arguments, vec!["a", "b"]);
    }
}
