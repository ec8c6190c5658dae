//! Declarative command files.
//!
//! A [`CommandConfig`] mirrors the builder surface of [`Command`] so a whole
//! tree can be declared in YAML or JSON. Handlers are code and cannot be
//! declared; a loaded tree runs without actions until they are attached in
//! code, which makes it suitable for help output and parse checks.
//!
//! # Example YAML
//!
//! ```yaml
//! name: app
//! version: "1.0.0"
//! description: Demo application
//! subcommands:
//!   - name: deploy
//!     description: Deploy the application
//!     options:
//!       - name: env
//!         alias: e
//!         description: Target environment
//!         requires_value: true
//!         required: true
//!         choices: [dev, prod]
//!     arguments:
//!       - name: target
//!         required: true
//! subcommand_aliases:
//!   - alias: d
//!     target: deploy
//! ```

use std::io::BufReader;
use std::path::Path;

use command_tree_core::{ArgumentSpec, Example, OptionSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Command, ConfigError};

/// One `alias → target` routing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcommandAliasConfig {
    pub alias: String,
    pub target: String,
}

/// Serializable declaration of a command and its subcommands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default)]
    pub keep_alive: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommand_aliases: Vec<SubcommandAliasConfig>,
}

impl CommandConfig {
    /// Loads a declaration file; `.yml`/`.yaml` files are read as YAML,
    /// everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// or [`JsonError`](ConfigError::JsonError) /
    /// [`YamlError`](ConfigError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);

        let yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yml" | "yaml")
        );
        debug!(path = %path.display(), yaml, "loading command declaration");

        let config = if yaml {
            serde_yaml::from_reader(reader)?
        } else {
            serde_json::from_reader(reader)?
        };
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds a handler-less [`Command`] tree.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid`](ConfigError::Invalid) when a subcommand alias
    /// targets a subcommand that is not declared.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_tree::CommandConfig;
    ///
    /// let config = CommandConfig::from_json_str(
    ///     r#"{
    ///         "name": "app",
    ///         "subcommands": [{"name": "deploy"}],
    ///         "subcommand_aliases": [{"alias": "d", "target": "deploy"}]
    ///     }"#,
    /// )
    /// .unwrap();
    ///
    /// let app = config.into_command().unwrap();
    /// assert_eq!(app.find_subcommand("d").map(|c| c.name()), Some("deploy"));
    /// ```
    pub fn into_command(self) -> Result<Command, ConfigError> {
        let mut command = Command::new(&self.name);
        for alias in &self.aliases {
            command = command.alias(alias);
        }
        if let Some(description) = &self.description {
            command = command.description(description);
        }
        if let Some(version) = &self.version {
            command = command.version(version);
        }
        if let Some(usage) = &self.usage {
            command = command.usage(usage);
        }
        if self.keep_alive {
            command = command.keep_alive();
        }
        for example in self.examples {
            command = command.example(&example.command, example.description.as_deref());
        }
        for option in self.options {
            command = command.option(option);
        }
        for argument in self.arguments {
            command = command.argument(argument);
        }
        for sub in self.subcommands {
            command = command.subcommand(sub.into_command()?);
        }
        for entry in &self.subcommand_aliases {
            command = command.subcommand_alias(&entry.alias, &entry.target)?;
        }
        Ok(command)
    }
}

impl Command {
    /// Reads a declaration file and builds the tree it describes.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        CommandConfig::load(path)?.into_command()
    }
}

#[cfg(test)]
mod tests {
    use command_tree_core::{ValidationError, ValueKind};

    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
name: app
version: "2.0.0"
keep_alive: true
examples:
  - command: app deploy web --env prod
    description: Deploy web to production
options:
  - name: verbose
    description: Verbose output
subcommands:
  - name: deploy
    description: Deploy the application
    options:
      - name: env
        alias: e
        description: Target environment
        requires_value: true
        required: true
        choices: [dev, prod]
      - name: replicas
        type: number
        requires_value: true
        default_value: 2
    arguments:
      - name: target
        required: true
subcommand_aliases:
  - alias: d
    target: deploy
"#
    }

    #[test]
    fn test_yaml_round_trip_into_command() {
        let config = CommandConfig::from_yaml_str(sample_yaml()).unwrap();
        let app = config.into_command().unwrap();

        assert_eq!(app.get_version(), Some("2.0.0"));
        assert!(app.is_keep_alive());
        assert_eq!(app.examples().len(), 1);

        let deploy = app.find_subcommand("d").unwrap();
        assert_eq!(deploy.name(), "deploy");
        assert_eq!(deploy.options()[0].choices, vec!["dev", "prod"]);
        assert_eq!(deploy.options()[1].kind, ValueKind::Number);
        assert!(deploy.arguments()[0].required);
        assert!(!deploy.has_action());
    }

    #[test]
    fn test_unknown_alias_target_is_invalid() {
        let config = CommandConfig::from_json_str(
            r#"{"name": "app", "subcommand_aliases": [{"alias": "d", "target": "deploy"}]}"#,
        )
        .unwrap();

        match config.into_command() {
            Err(ConfigError::Invalid(ValidationError::UnknownAliasTarget { alias, target })) => {
                assert_eq!(alias, "d");
                assert_eq!(target, "deploy");
            }
            other => panic!("expected invalid alias target, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_name_is_a_parse_error() {
        let err = CommandConfig::from_json_str(r#"{"description": "nameless"}"#).unwrap_err();

        assert!(matches!(err, ConfigError::JsonError(_)));
    }
}
