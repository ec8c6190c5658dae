//! Value checks (choices and validators) and relational checks
//! (conflicts, dependencies, required options).

use command_tree_core::{ArgumentSpec, OptionSpec, ParseError, ParsedOptions, Validator};

/// Checks a raw option value against its choices, then its validator.
pub fn check_option_value(option: &OptionSpec, value: &str) -> Result<(), ParseError> {
    if !option.choices.is_empty() && !option.choices.iter().any(|c| c == value) {
        return Err(ParseError::OptionChoice {
            option: option.name.clone(),
            value: value.to_string(),
            choices: option.choices.clone(),
        });
    }

    run_validator(option.validator.as_ref(), value).map_err(|message| {
        ParseError::InvalidOptionValue {
            option: option.name.clone(),
            message: message
                .unwrap_or_else(|| format!("option --{} value is invalid", option.name)),
        }
    })
}

/// Checks a positional value against its choices, then its validator.
pub fn check_argument_value(argument: &ArgumentSpec, value: &str) -> Result<(), ParseError> {
    if !argument.choices.is_empty() && !argument.choices.iter().any(|c| c == value) {
        return Err(ParseError::ArgumentChoice {
            argument: argument.name.clone(),
            value: value.to_string(),
            choices: argument.choices.clone(),
        });
    }

    run_validator(argument.validator.as_ref(), value).map_err(|message| {
        ParseError::InvalidArgumentValue {
            argument: argument.name.clone(),
            message: message
                .unwrap_or_else(|| format!("argument {} value is invalid", argument.name)),
        }
    })
}

/// `Err(None)` is a rejection without a usable message.
fn run_validator(validator: Option<&Validator>, value: &str) -> Result<(), Option<String>> {
    match validator.map(|v| v.check(value)) {
        None | Some(Ok(())) => Ok(()),
        Some(Err(message)) if message.is_empty() => Err(None),
        Some(Err(message)) => Err(Some(message)),
    }
}

/// Runs conflict, dependency and required checks over a fully built option
/// map.
///
/// Options are visited in declaration order and, for each option, conflicts
/// are checked before dependencies before required-ness, so the first error
/// depends only on the declaration, never on argv order. Defaulted options
/// count as present.
///
/// # Examples
///
/// ```
/// use command_tree_core::{OptionSpec, OptionValue, ParseError, ParsedOptions};
/// use command_tree_parser::check_relations;
///
/// let options = vec![
///     OptionSpec::flag("force", "Force").conflicts_with("dry-run"),
///     OptionSpec::flag("dry-run", "Dry run"),
/// ];
/// let mut parsed = ParsedOptions::new();
/// parsed.insert("dry-run", OptionValue::Boolean(true));
/// parsed.insert("force", OptionValue::Boolean(true));
///
/// assert!(matches!(
///     check_relations(&options, &parsed),
///     Err(ParseError::Conflict { .. })
/// ));
/// ```
pub fn check_relations(options: &[OptionSpec], parsed: &ParsedOptions) -> Result<(), ParseError> {
    for option in options {
        let present = parsed.contains(&option.name);

        if present {
            if let Some(conflict) = option.conflicts.iter().find(|c| parsed.contains(c)) {
                return Err(ParseError::Conflict {
                    option: option.name.clone(),
                    conflict: conflict.clone(),
                });
            }
            if let Some(dependency) = option.depends_on.iter().find(|d| !parsed.contains(d)) {
                return Err(ParseError::MissingDependency {
                    option: option.name.clone(),
                    dependency: dependency.clone(),
                });
            }
        }

        if option.required && !present {
            return Err(ParseError::MissingRequiredOption(option.name.clone()));
        }
    }

    Ok(())
}
