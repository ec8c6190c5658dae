//! Error types for command execution and configuration loading.

use std::fmt;

use command_tree_core::{FAILURE_EXIT_CODE, ParseError, ValidationError};
use thiserror::Error;

/// Handler stage that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Before,
    Action,
    After,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Before => "before",
            Self::Action => "action",
            Self::After => "after",
        })
    }
}

/// Errors returned by [`Command::execute`](crate::Command::execute).
#[derive(Debug, Error)]
pub enum CommandError {
    /// argv did not satisfy the resolved command's declaration.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A before hook, action or after hook returned an error.
    #[error("error executing command: {error}")]
    Handler { stage: Stage, error: anyhow::Error },
}

impl CommandError {
    /// Exit status the process should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(err) => err.exit_code(),
            Self::Handler { .. } => FAILURE_EXIT_CODE,
        }
    }
}

/// Errors that can occur while loading a declarative command file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file parsed but describes an invalid command tree.
    #[error("invalid command declaration: {0}")]
    Invalid(#[from] ValidationError),
}

impl ConfigError {
    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }
}
