//! Compsel Engine - Evaluates component selection rules against candidates
//!
//! For each candidate version found during dependency resolution, the engine
//! runs the registered rules and records the outcome on the
//! [`ComponentSelection`](compsel_core::ComponentSelection):
//!
//! - Rules declaring no inputs run first and never trigger a metadata fetch
//! - Rules declaring inputs run next, sharing one lazily fetched metadata value
//! - Evaluation stops at the first rejection
//! - Failures raised by rule bodies surface as user-code errors
//!
//! # Example
//!
//! ```
//! use compsel_core::{ComponentSelection, ModuleComponentIdentifier, ModuleMetadata};
//! use compsel_engine::ComponentSelectionRules;
//!
//! let mut rules = ComponentSelectionRules::new();
//! rules
//!     .all_fn([], |selection: &mut ComponentSelection, _| {
//!         if selection.candidate().version().starts_with("0.") {
//!             selection.reject("pre-1.0 releases are not allowed");
//!         }
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let id = ModuleComponentIdentifier::new("org.example", "lib", "0.9");
//! let mut selection = ComponentSelection::new(id.clone());
//! rules
//!     .apply(&mut selection, || Ok(ModuleMetadata::maven(id)))
//!     .unwrap();
//!
//! assert_eq!(selection.rejection_reason(), Some("pre-1.0 releases are not allowed"));
//! ```

pub mod closure;
pub mod processor;
pub mod provider;
pub mod resolver;
pub mod rules;
pub mod targeted;

pub use closure::ClosureRule;
pub use processor::ComponentSelectionRulesProcessor;
pub use provider::MetadataProvider;
pub use rules::ComponentSelectionRules;
pub use targeted::ModuleTargetedRule;
