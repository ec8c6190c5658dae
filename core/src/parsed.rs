//! Values produced by parsing: coerced option values, the option map and the
//! combined parse result.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A coerced option value.
///
/// Serializes untagged, so a parsed option map renders as plain JSON:
/// `{"port": 8080, "tags": ["a", "b"], "verbose": true}`.
///
/// # Examples
///
/// ```
/// use command_tree_core::OptionValue;
///
/// assert_eq!(OptionValue::from(3).to_string(), "3");
/// assert_eq!(OptionValue::from(2.5).to_string(), "2.5");
/// assert_eq!(OptionValue::from(vec!["a", "b"]).to_string(), "a,b");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<String>),
}

impl OptionValue {
    /// Returns the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric payload, if this is a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the list payload, if this is an array value.
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Formats a number the way JavaScript prints it: integral values carry no
/// fractional part, infinities are spelled out and magnitudes outside
/// `[1e-6, 1e21)` use exponent notation with an explicit sign (`1e-7`,
/// `1e+21`).
fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) && !n.is_nan() {
        let exponential = format!("{n:e}");
        return match exponential.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
            _ => f.write_str(&exponential),
        };
    }
    if n.fract() == 0.0 {
        return write!(f, "{n:.0}");
    }
    write!(f, "{n}")
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => format_number(*n, f),
            Self::String(s) => f.write_str(s),
            Self::Array(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::Array(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        Self::Array(value.into_iter().map(String::from).collect())
    }
}

/// Parsed options keyed by option name.
///
/// Options that were neither supplied nor defaulted are absent rather than
/// present-as-empty.
///
/// # Examples
///
/// ```
/// use command_tree_core::{OptionValue, ParsedOptions};
///
/// let mut options = ParsedOptions::new();
/// options.insert("name", OptionValue::from("Alice"));
/// options.insert("verbose", OptionValue::from(true));
///
/// assert_eq!(options.get_str("name"), Some("Alice"));
/// assert_eq!(options.get_bool("verbose"), Some(true));
/// assert!(!options.contains("port"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedOptions(BTreeMap<String, OptionValue>);

impl ParsedOptions {
    /// Creates an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(&mut self, name: &str, value: OptionValue) -> Option<OptionValue> {
        self.0.insert(name.to_string(), value)
    }

    /// Returns the value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    /// Returns `true` if `name` is present (supplied or defaulted).
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the string value for `name`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    /// Returns the numeric value for `name`.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(OptionValue::as_number)
    }

    /// Returns the boolean value for `name`.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_bool)
    }

    /// Returns the list value for `name`.
    pub fn get_array(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(OptionValue::as_array)
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of parsing one argv list against a command's schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResult {
    /// Positional tokens in the order they appeared
    pub arguments: Vec<String>,
    /// Coerced option values
    pub options: ParsedOptions,
}
