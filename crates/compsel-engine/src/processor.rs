//! Two-phase evaluation of selection rules against one candidate.

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, info, trace};

use compsel_core::{
    ComponentSelection, MetadataFetchError, ModuleMetadata, SelectionError, SelectionRule,
};

use crate::provider::MetadataProvider;
use crate::resolver::resolve_inputs;

type RuleRefs<'a> = SmallVec<[&'a Arc<dyn SelectionRule>; 8]>;

/// Applies an ordered rule collection to a candidate.
///
/// Rules without declared inputs run first, in registration order, so they
/// can reject a candidate before any metadata is fetched. Rules with inputs
/// run afterwards, in registration order, sharing a single
/// [`MetadataProvider`]. The first rejection stops evaluation: no later rule
/// of either group runs.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use compsel_core::{
///     ComponentSelection, InputType, ModuleComponentIdentifier, ModuleMetadata, SelectionRule,
/// };
/// use compsel_engine::{ClosureRule, ComponentSelectionRulesProcessor};
///
/// let rules: Vec<Arc<dyn SelectionRule>> = vec![
///     Arc::new(ClosureRule::new([], |selection: &mut ComponentSelection, _| {
///         selection.reject("too old");
///         Ok(())
///     })),
///     Arc::new(ClosureRule::new([InputType::FullMetadata], |_: &mut ComponentSelection, _| {
///         unreachable!("metadata rules do not run after a rejection")
///     })),
/// ];
///
/// let id = ModuleComponentIdentifier::new("org", "lib", "1.0");
/// let mut selection = ComponentSelection::new(id.clone());
/// ComponentSelectionRulesProcessor::new()
///     .apply(&mut selection, &rules, || Ok(ModuleMetadata::maven(id)))
///     .unwrap();
///
/// assert_eq!(selection.rejection_reason(), Some("too old"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentSelectionRulesProcessor;

impl ComponentSelectionRulesProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates `rules` against `selection`.
    ///
    /// The outcome is recorded on `selection`. `metadata_factory` is invoked
    /// at most once, and only if an applicable rule declares inputs.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::UserCode`] if a rule body fails. Rejection state
    ///   set by the failing rule is kept.
    /// - [`SelectionError::MetadataFetch`] if the factory fails.
    pub fn apply<F>(
        &self,
        selection: &mut ComponentSelection,
        rules: &[Arc<dyn SelectionRule>],
        metadata_factory: F,
    ) -> Result<(), SelectionError>
    where
        F: FnOnce() -> Result<ModuleMetadata, MetadataFetchError>,
    {
        let mut provider = MetadataProvider::new(metadata_factory);

        let (input_free_rules, input_rules): (RuleRefs<'_>, RuleRefs<'_>) =
            rules.iter().partition(|rule| rule.is_input_free());

        if self.process_rules(&input_free_rules, selection, &mut provider)? {
            self.process_rules(&input_rules, selection, &mut provider)?;
        }
        Ok(())
    }

    // Returns false as soon as a rule rejects the candidate.
    fn process_rules<F>(
        &self,
        rules: &[&Arc<dyn SelectionRule>],
        selection: &mut ComponentSelection,
        provider: &mut MetadataProvider<F>,
    ) -> Result<bool, SelectionError>
    where
        F: FnOnce() -> Result<ModuleMetadata, MetadataFetchError>,
    {
        for &rule in rules {
            self.process_rule(rule.as_ref(), selection, provider)?;

            if let Some(reason) = selection.rejection_reason() {
                info!(
                    event = "candidate_rejected",
                    candidate = %selection.candidate(),
                    reason,
                    "Selection of '{}' rejected by component selection rule: {}",
                    selection.candidate(),
                    reason
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn process_rule<F>(
        &self,
        rule: &dyn SelectionRule,
        selection: &mut ComponentSelection,
        provider: &mut MetadataProvider<F>,
    ) -> Result<(), SelectionError>
    where
        F: FnOnce() -> Result<ModuleMetadata, MetadataFetchError>,
    {
        if let Some(targeted) = rule.as_targeted() {
            if !targeted.is_satisfied_by(selection) {
                trace!(
                    event = "rule_skipped",
                    candidate = %selection.candidate(),
                    cause = "not_applicable"
                );
                return Ok(());
            }
        }

        let Some(inputs) = resolve_inputs(rule.input_types(), provider)? else {
            // Rules asking for an Ivy descriptor do not fire for other formats
            trace!(
                event = "rule_skipped",
                candidate = %selection.candidate(),
                cause = "no_ivy_descriptor"
            );
            return Ok(());
        };

        rule.execute(selection, &inputs).map_err(|source| {
            debug!(
                event = "rule_failed",
                candidate = %selection.candidate(),
                error = %source
            );
            SelectionError::UserCode { source }
        })
    }
}

#[cfg(test)]
mod tests;
