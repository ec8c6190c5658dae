//! Core schema types for declarative command trees.
//!
//! This crate defines the data a program declares about its command line
//! and the data parsing produces:
//!
//! - [`OptionSpec`] — a named option with alias, value kind, default,
//!   choices, validator, group and relations to other options.
//! - [`ArgumentSpec`] — a positional argument with choices and validator.
//! - [`Example`] — a usage example listed in help output.
//! - [`ParsedResult`] / [`ParsedOptions`] / [`OptionValue`] — the typed
//!   outcome of parsing an argv list.
//! - [`ParseError`] — the first rule violation found while parsing.
//!
//! Declaration validation ([`validate_options`], [`validate_arguments`])
//! catches structural mistakes such as duplicate names or aliases and
//! relations pointing at undeclared options.
//!
//! # Example
//!
//! ```
//! use command_tree_core::*;
//!
//! let options = vec![
//!     OptionSpec::value("name", "Your name").alias("n").required(),
//!     OptionSpec::flag("verbose", "Verbose output"),
//!     OptionSpec::value("retries", "Retry count")
//!         .kind(ValueKind::Number)
//!         .default_value(3),
//! ];
//! let arguments = vec![ArgumentSpec::optional("path", "Working directory")];
//!
//! assert!(validate_options(&options).is_empty());
//! assert!(validate_arguments(&arguments).is_empty());
//! ```

mod error;
mod parsed;
mod types;
mod validate;

pub use error::{FAILURE_EXIT_CODE, ParseError};
pub use parsed::{OptionValue, ParsedOptions, ParsedResult};
pub use types::*;
pub use validate::{
    RESERVED_ALIASES, RESERVED_NAMES, ValidationError, validate_arguments, validate_options,
};
