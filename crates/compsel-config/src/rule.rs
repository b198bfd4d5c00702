//! Rules built from configuration entries.

use compsel_core::{
    ComponentSelection, InputType, InputTypes, RuleFailure, RuleInput, SelectionRule,
};

use crate::{ConfigError, RuleConfig};

/// A selection rule described by a [`RuleConfig`] entry.
///
/// Module targeting is not part of the rule itself; it is applied when the
/// entry is registered.
#[derive(Debug, Clone)]
pub struct ConfiguredRule {
    kind: RuleKind,
    input_types: InputTypes,
}

#[derive(Debug, Clone)]
enum RuleKind {
    RejectVersions {
        versions: Vec<String>,
        reason: Option<String>,
    },
    RequireStatus {
        statuses: Vec<String>,
    },
    RejectChanging,
    RequireBranch {
        branch: String,
    },
}

impl ConfiguredRule {
    /// Validates `config` and builds the rule it describes.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (kind, input_type) = match config {
            RuleConfig::RejectVersions(c) => (
                RuleKind::RejectVersions {
                    versions: c.versions.clone(),
                    reason: c.reason.clone(),
                },
                None,
            ),
            RuleConfig::RequireStatus(c) => (
                RuleKind::RequireStatus {
                    statuses: c.statuses.clone(),
                },
                Some(InputType::ComponentMetadataView),
            ),
            RuleConfig::RejectChanging(_) => {
                (RuleKind::RejectChanging, Some(InputType::FullMetadata))
            }
            RuleConfig::RequireBranch(c) => (
                RuleKind::RequireBranch {
                    branch: c.branch.clone(),
                },
                Some(InputType::IvyDescriptor),
            ),
        };
        Ok(Self {
            kind,
            input_types: input_type.into_iter().collect(),
        })
    }
}

impl SelectionRule for ConfiguredRule {
    fn input_types(&self) -> &[InputType] {
        &self.input_types
    }

    fn execute(
        &self,
        selection: &mut ComponentSelection,
        inputs: &[RuleInput<'_>],
    ) -> Result<(), RuleFailure> {
        match &self.kind {
            RuleKind::RejectVersions { versions, reason } => {
                let version = selection.candidate().version();
                if versions.iter().any(|v| v == version) {
                    let reason = reason
                        .clone()
                        .unwrap_or_else(|| format!("version {} is rejected", version));
                    selection.reject(reason);
                }
            }
            RuleKind::RequireStatus { statuses } => {
                let metadata = inputs
                    .first()
                    .and_then(RuleInput::as_component_metadata)
                    .ok_or("require_status rule received no component metadata")?;
                if !statuses.iter().any(|s| s == metadata.status()) {
                    selection.reject(format!(
                        "status '{}' is not one of [{}]",
                        metadata.status(),
                        statuses.join(", ")
                    ));
                }
            }
            RuleKind::RejectChanging => {
                let metadata = inputs
                    .first()
                    .and_then(RuleInput::as_metadata)
                    .ok_or("reject_changing rule received no module metadata")?;
                if metadata.is_changing() {
                    selection.reject("changing modules are rejected");
                }
            }
            RuleKind::RequireBranch { branch } => {
                let descriptor = inputs
                    .first()
                    .and_then(RuleInput::as_ivy_descriptor)
                    .ok_or("require_branch rule received no Ivy descriptor")?;
                if descriptor.branch() != Some(branch.as_str()) {
                    selection.reject(format!(
                        "branch '{}' is not '{}'",
                        descriptor.branch().unwrap_or("<none>"),
                        branch
                    ));
                }
            }
        }
        Ok(())
    }
}
