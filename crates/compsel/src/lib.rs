//! Compsel - Component selection rules for dependency resolution
//!
//! Decide, for each candidate module version, whether the resolution
//! machinery may select it.
//!
//! # Example
//!
//! ```rust
//! use compsel::prelude::*;
//!
//! let mut rules = ComponentSelectionRules::new();
//! rules
//!     .all_fn([InputType::ComponentMetadataView], |selection, inputs| {
//!         if let Some(metadata) = inputs[0].as_component_metadata() {
//!             if metadata.is_changing() {
//!                 selection.reject("changing modules are not reproducible");
//!             }
//!         }
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let id = ModuleComponentIdentifier::new("org.example", "lib", "1.0-SNAPSHOT");
//! let mut selection = ComponentSelection::new(id.clone());
//! rules
//!     .apply(&mut selection, || Ok(ModuleMetadata::maven(id).with_changing(true)))
//!     .unwrap();
//! assert!(selection.is_rejected());
//! ```

// Core types
pub use compsel_core::{
    ComponentMetadataView, ComponentSelection, InputType, IvyExtraInfo, IvyModuleDescriptor,
    MetadataFormat, ModuleComponentIdentifier, ModuleIdentifier, ModuleMetadata, NamespaceId,
    RuleInput, SelectionRule, TargetedRule,
};

// Errors
pub use compsel_core::{
    MetadataFetchError, NotationError, RuleFailure, SelectionError, USER_CODE_ERROR,
};

// Engine
pub use compsel_engine::{
    ClosureRule, ComponentSelectionRules, ComponentSelectionRulesProcessor, MetadataProvider,
    ModuleTargetedRule,
};

// Declarative configuration
pub use compsel_config::{ConfigError, RuleConfig, SelectionRulesConfig};

/// Installs the console logging layer. Only the first call has effect.
#[cfg(feature = "console")]
pub use compsel_console::init as init_console;

pub mod prelude {
    pub use super::{
        ComponentSelection, ComponentSelectionRules, InputType, ModuleComponentIdentifier,
        ModuleMetadata, RuleInput, SelectionError, SelectionRule, SelectionRulesConfig,
    };
}
