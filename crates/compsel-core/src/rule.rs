//! Traits implemented by component selection rules.

use std::fmt::Debug;

use crate::error::RuleFailure;
use crate::input::{InputType, RuleInput};
use crate::selection::ComponentSelection;

/// A unit of user logic deciding whether a candidate is acceptable.
///
/// Rules are shared read-only across every candidate they are evaluated
/// against, so they carry no per-candidate state.
///
/// `execute` receives one [`RuleInput`] per entry of
/// [`input_types`](Self::input_types), in the same order. Rules accept a
/// candidate by doing nothing and reject it through
/// [`ComponentSelection::reject`].
///
/// # Example
///
/// ```
/// use compsel_core::{ComponentSelection, InputType, RuleFailure, RuleInput, SelectionRule};
///
/// #[derive(Debug)]
/// struct RejectSnapshots;
///
/// impl SelectionRule for RejectSnapshots {
///     fn input_types(&self) -> &[InputType] {
///         &[]
///     }
///
///     fn execute(
///         &self,
///         selection: &mut ComponentSelection,
///         _inputs: &[RuleInput<'_>],
///     ) -> Result<(), RuleFailure> {
///         if selection.candidate().version().ends_with("-SNAPSHOT") {
///             selection.reject("snapshots are not allowed");
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait SelectionRule: Send + Sync + Debug {
    /// Inputs this rule needs; empty for rules that only look at the candidate.
    fn input_types(&self) -> &[InputType];

    /// Runs the rule against a candidate.
    fn execute(
        &self,
        selection: &mut ComponentSelection,
        inputs: &[RuleInput<'_>],
    ) -> Result<(), RuleFailure>;

    /// Returns the applicability predicate, for rules that have one.
    fn as_targeted(&self) -> Option<&dyn TargetedRule> {
        None
    }

    /// Returns true if this rule needs no metadata.
    fn is_input_free(&self) -> bool {
        self.input_types().is_empty()
    }
}

/// Applicability capability of rules that only fire for some candidates.
pub trait TargetedRule {
    /// Returns true if the rule should run for this candidate.
    fn is_satisfied_by(&self, selection: &ComponentSelection) -> bool;
}
