//! Schema type definitions for options, positional arguments and examples.
//!
//! These types describe what a command accepts. They carry no parsing
//! behavior of their own; the parser crate consumes them. All of them
//! serialize with [`serde`] so a command tree can be declared in a YAML or
//! JSON file, with the exception of [`Validator`] closures which only exist
//! in code.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::OptionValue;

/// Value kind used to coerce an option's raw text.
///
/// # Examples
///
/// ```
/// use command_tree_core::ValueKind;
///
/// assert_eq!(ValueKind::default(), ValueKind::String);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Raw text, unchanged (the default).
    #[default]
    String,
    /// Numeric value with JavaScript `Number()` parsing rules.
    Number,
    /// `"true"`, `"1"` and `"yes"` are true; anything else is false.
    Boolean,
    /// Comma-separated list, each element trimmed.
    Array,
}

/// Custom value check attached to an option or argument.
///
/// The closure returns `Ok(())` to accept a value or `Err(message)` to reject
/// it. A non-empty message is shown to the user verbatim; an empty message
/// falls back to a generic "value is invalid" message naming the option or
/// argument.
///
/// # Examples
///
/// ```
/// use command_tree_core::Validator;
///
/// let min_len = Validator::new(|value| {
///     if value.len() < 3 {
///         return Err("must be at least 3 characters".to_string());
///     }
///     Ok(())
/// });
/// assert!(min_len.check("abcd").is_ok());
/// assert_eq!(min_len.check("ab").unwrap_err(), "must be at least 3 characters");
/// ```
#[derive(Clone)]
pub struct Validator(Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>);

impl Validator {
    /// Wraps a closure as a validator.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    /// Runs the check against a raw value.
    pub fn check(&self, value: &str) -> Result<(), String> {
        (self.0)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Schema for a named option.
///
/// An option is addressed on the command line by its long form (`--name`)
/// or, when declared, by a single-character alias (`-n`). Use
/// [`flag`](OptionSpec::flag) for boolean switches and
/// [`value`](OptionSpec::value) for options followed by a value, then chain
/// the builder methods.
///
/// # Examples
///
/// ```
/// use command_tree_core::{OptionSpec, ValueKind};
///
/// let verbose = OptionSpec::flag("verbose", "Enable verbose output").alias("V");
/// assert!(!verbose.requires_value);
/// assert!(verbose.matches_alias("V"));
///
/// let port = OptionSpec::value("port", "Port to listen on")
///     .alias("p")
///     .kind(ValueKind::Number)
///     .default_value(8080);
/// assert!(port.requires_value);
/// assert_eq!(port.kind, ValueKind::Number);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Long name without the leading `--`
    pub name: String,
    /// Single-character short form without the leading `-`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Description shown in help
    #[serde(default)]
    pub description: String,
    /// Whether a value must follow the option
    #[serde(default)]
    pub requires_value: bool,
    /// Value injected before parsing when the option is not supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<OptionValue>,
    /// Coercion applied to supplied values
    #[serde(default, rename = "type")]
    pub kind: ValueKind,
    /// Custom check run after the choice check
    #[serde(skip)]
    pub validator: Option<Validator>,
    /// Help section this option is listed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Must be present once parsing finishes
    #[serde(default)]
    pub required: bool,
    /// Options that may not be present together with this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<String>,
    /// Options that must be present whenever this one is
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Closed set of accepted raw values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl OptionSpec {
    /// Creates a boolean switch that takes no value.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_tree_core::{OptionSpec, ValueKind};
    ///
    /// let force = OptionSpec::flag("force", "Overwrite existing files");
    /// assert!(!force.requires_value);
    /// assert_eq!(force.kind, ValueKind::Boolean);
    /// ```
    pub fn flag(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
            description: description.to_string(),
            requires_value: false,
            default_value: None,
            kind: ValueKind::Boolean,
            validator: None,
            group: None,
            required: false,
            conflicts: Vec::new(),
            depends_on: Vec::new(),
            choices: Vec::new(),
        }
    }

    /// Creates an option that must be followed by a string value.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_tree_core::{OptionSpec, ValueKind};
    ///
    /// let name = OptionSpec::value("name", "Resource name");
    /// assert!(name.requires_value);
    /// assert_eq!(name.kind, ValueKind::String);
    /// ```
    pub fn value(name: &str, description: &str) -> Self {
        Self {
            requires_value: true,
            kind: ValueKind::String,
            ..Self::flag(name, description)
        }
    }

    /// Sets the single-character alias.
    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Sets the coercion kind.
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Overrides whether a value must follow the option.
    pub fn requires_value(mut self, requires_value: bool) -> Self {
        self.requires_value = requires_value;
        self
    }

    /// Sets the value injected when the option is not supplied.
    pub fn default_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Marks the option as mandatory.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Lists the option under a named help section.
    pub fn group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    /// Restricts accepted raw values.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an option name that may not be combined with this one.
    pub fn conflicts_with(mut self, name: &str) -> Self {
        self.conflicts.push(name.to_string());
        self
    }

    /// Adds an option name that must accompany this one.
    pub fn depends_on(mut self, name: &str) -> Self {
        self.depends_on.push(name.to_string());
        self
    }

    /// Attaches a custom value check.
    pub fn validator<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Validator::new(check));
        self
    }

    /// Returns `true` if `alias` is this option's short form.
    pub fn matches_alias(&self, alias: &str) -> bool {
        self.alias.as_deref() == Some(alias)
    }

    /// Returns the long form as typed on the command line (`--name`).
    pub fn long_flag(&self) -> String {
        format!("--{}", self.name)
    }
}

/// Schema for a positional argument.
///
/// Arguments are matched to positional tokens by declaration order: the
/// first declared argument describes the first positional token, and so on.
///
/// # Examples
///
/// ```
/// use command_tree_core::ArgumentSpec;
///
/// let kind = ArgumentSpec::required("type", "Resource type")
///     .choices(["user", "project", "task"]);
/// assert!(kind.required);
/// assert_eq!(kind.choices.len(), 3);
///
/// let path = ArgumentSpec::optional("path", "Working directory");
/// assert!(!path.required);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Name shown in usage and help
    pub name: String,
    /// Description shown in help
    #[serde(default)]
    pub description: String,
    /// Must be supplied
    #[serde(default)]
    pub required: bool,
    /// Custom check run after the choice check
    #[serde(skip)]
    pub validator: Option<Validator>,
    /// Closed set of accepted values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl ArgumentSpec {
    /// Creates a required positional argument.
    pub fn required(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            validator: None,
            choices: Vec::new(),
        }
    }

    /// Creates an optional positional argument.
    pub fn optional(name: &str, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, description)
        }
    }

    /// Restricts accepted values.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches a custom value check.
    pub fn validator<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Validator::new(check));
        self
    }
}

/// Usage example listed in help output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Full command line of the example
    pub command: String,
    /// What the example does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Example {
    /// Creates an example with an optional description.
    pub fn new(command: &str, description: Option<&str>) -> Self {
        Self {
            command: command.to_string(),
            description: description.map(String::from),
        }
    }
}
