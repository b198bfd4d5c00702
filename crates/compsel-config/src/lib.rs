//! Configuration system for component selection rules.
//!
//! Load rule sets from TOML or YAML files to reject candidates without
//! writing rule code.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use compsel_config::SelectionRulesConfig;
//!
//! let config = SelectionRulesConfig::from_toml_str(r#"
//!     [[rules]]
//!     type = "reject_versions"
//!     module = "org.example:lib"
//!     versions = ["2.0.0"]
//!     reason = "2.0.0 breaks the public API"
//!
//!     [[rules]]
//!     type = "require_status"
//!     statuses = ["release"]
//! "#).unwrap();
//!
//! assert_eq!(config.rules.len(), 2);
//! let rules = config.build().unwrap();
//! assert_eq!(rules.len(), 2);
//! ```
//!
//! Use an empty rule set when the file is missing:
//!
//! ```
//! use compsel_config::SelectionRulesConfig;
//!
//! let config = SelectionRulesConfig::load("selection-rules.toml").unwrap_or_default();
//! // Every candidate is accepted if the file doesn't exist
//! ```

mod rule;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use compsel_core::ModuleIdentifier;
use compsel_engine::ComponentSelectionRules;

pub use rule::ConfiguredRule;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Declarative rule set, evaluated in file order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SelectionRulesConfig {
    /// Rule entries.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl SelectionRulesConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Adds a rule entry.
    pub fn with_rule(mut self, rule: RuleConfig) -> Self {
        self.rules.push(rule);
        self
    }

    /// Registers every entry on `rules`, in file order.
    ///
    /// Entries are all validated before any is registered, so an invalid
    /// file leaves `rules` untouched. Refusals from `rules` itself are
    /// reported as [`ConfigError::Invalid`].
    pub fn register(&self, rules: &mut ComponentSelectionRules) -> Result<(), ConfigError> {
        let configured = self
            .rules
            .iter()
            .map(ConfiguredRule::from_config)
            .collect::<Result<Vec<_>, _>>()?;

        for (entry, rule) in self.rules.iter().zip(configured) {
            let registered = match entry.module() {
                Some(notation) => rules.with_module(notation, rule),
                None => rules.all(rule),
            };
            if let Err(err) = registered {
                return Err(ConfigError::Invalid(err.to_string()));
            }
        }
        Ok(())
    }

    /// Builds a fresh rule collection from this configuration.
    pub fn build(&self) -> Result<ComponentSelectionRules, ConfigError> {
        let mut rules = ComponentSelectionRules::new();
        self.register(&mut rules)?;
        Ok(rules)
    }
}

/// One rule entry, tagged by `type`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Rejects listed versions. Needs no metadata.
    RejectVersions(RejectVersionsConfig),
    /// Rejects candidates whose status is not listed.
    RequireStatus(RequireStatusConfig),
    /// Rejects changing modules.
    RejectChanging(RejectChangingConfig),
    /// Rejects Ivy modules published from another branch.
    RequireBranch(RequireBranchConfig),
}

impl RuleConfig {
    /// Module notation (`group:name`) the rule is restricted to, if any.
    pub fn module(&self) -> Option<&str> {
        match self {
            Self::RejectVersions(c) => c.module.as_deref(),
            Self::RequireStatus(c) => c.module.as_deref(),
            Self::RejectChanging(c) => c.module.as_deref(),
            Self::RequireBranch(c) => c.module.as_deref(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(notation) = self.module() {
            notation
                .parse::<ModuleIdentifier>()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        let problem = match self {
            Self::RejectVersions(c) if c.versions.is_empty() => {
                "reject_versions requires at least one version"
            }
            Self::RequireStatus(c) if c.statuses.is_empty() => {
                "require_status requires at least one status"
            }
            Self::RequireBranch(c) if c.branch.trim().is_empty() => {
                "require_branch requires a branch"
            }
            _ => return Ok(()),
        };
        Err(ConfigError::Invalid(problem.to_string()))
    }
}

/// Reject-versions rule configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RejectVersionsConfig {
    /// Restricts the rule to one module.
    #[serde(default)]
    pub module: Option<String>,

    /// Versions to reject.
    pub versions: Vec<String>,

    /// Rejection reason; a generated one is used if absent.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Require-status rule configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RequireStatusConfig {
    #[serde(default)]
    pub module: Option<String>,

    /// Accepted statuses, e.g. `release`.
    pub statuses: Vec<String>,
}

/// Reject-changing rule configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RejectChangingConfig {
    #[serde(default)]
    pub module: Option<String>,
}

/// Require-branch rule configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RequireBranchConfig {
    #[serde(default)]
    pub module: Option<String>,

    /// Required Ivy branch.
    pub branch: String,
}
