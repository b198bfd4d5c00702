//! Compsel Core - Core types and traits for component selection rules
//!
//! This crate provides the fundamental abstractions shared by the engine:
//! - Identifier types for modules and candidate versions
//! - `ComponentSelection`, the per-candidate rejection state
//! - Metadata model with its read-only views
//! - Input kinds and the rule traits user logic implements
//! - Error types for rule registration, evaluation and metadata retrieval

pub mod error;
pub mod identifier;
pub mod input;
pub mod metadata;
pub mod rule;
pub mod selection;

pub use error::{MetadataFetchError, NotationError, RuleFailure, SelectionError, USER_CODE_ERROR};
pub use identifier::{ModuleComponentIdentifier, ModuleIdentifier};
pub use input::{InputType, InputTypes, RuleInput};
pub use metadata::{
    ComponentMetadataView, IvyExtraInfo, IvyModuleDescriptor, MetadataFormat, ModuleMetadata,
    NamespaceId,
};
pub use rule::{SelectionRule, TargetedRule};
pub use selection::ComponentSelection;
