//! Rules built from closures.

use std::fmt::{self, Debug};

use compsel_core::{
    ComponentSelection, InputType, InputTypes, RuleFailure, RuleInput, SelectionRule,
};

type RuleAction =
    dyn Fn(&mut ComponentSelection, &[RuleInput<'_>]) -> Result<(), RuleFailure> + Send + Sync;

/// A selection rule whose body is a closure.
///
/// # Example
///
/// ```
/// use compsel_core::{ComponentSelection, InputType, SelectionRule};
/// use compsel_engine::ClosureRule;
///
/// let rule = ClosureRule::new(
///     [InputType::ComponentMetadataView],
///     |selection: &mut ComponentSelection, inputs| {
///         let metadata = inputs[0].as_component_metadata().unwrap();
///         if metadata.status() != "release" {
///             selection.reject(format!("status '{}' is not a release", metadata.status()));
///         }
///         Ok(())
///     },
/// );
///
/// assert_eq!(rule.input_types(), &[InputType::ComponentMetadataView]);
/// ```
pub struct ClosureRule {
    input_types: InputTypes,
    action: Box<RuleAction>,
}

impl ClosureRule {
    /// Creates a rule declaring `input_types` and running `action`.
    pub fn new<I, F>(input_types: I, action: F) -> Self
    where
        I: IntoIterator<Item = InputType>,
        F: Fn(&mut ComponentSelection, &[RuleInput<'_>]) -> Result<(), RuleFailure>
            + Send
            + Sync
            + 'static,
    {
        Self {
            input_types: input_types.into_iter().collect(),
            action: Box::new(action),
        }
    }
}

impl SelectionRule for ClosureRule {
    fn input_types(&self) -> &[InputType] {
        &self.input_types
    }

    fn execute(
        &self,
        selection: &mut ComponentSelection,
        inputs: &[RuleInput<'_>],
    ) -> Result<(), RuleFailure> {
        (self.action)(selection, inputs)
    }
}

impl Debug for ClosureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureRule")
            .field("input_types", &self.input_types)
            .finish()
    }
}
