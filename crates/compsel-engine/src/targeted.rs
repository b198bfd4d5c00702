//! Rules restricted to a single module.

use compsel_core::{
    ComponentSelection, InputType, ModuleIdentifier, RuleFailure, RuleInput, SelectionRule,
    TargetedRule,
};

/// Wraps a rule so it only fires for candidates of one module.
///
/// If the wrapped rule has its own applicability predicate, both must hold.
#[derive(Debug)]
pub struct ModuleTargetedRule<R> {
    module: ModuleIdentifier,
    inner: R,
}

impl<R: SelectionRule> ModuleTargetedRule<R> {
    pub fn new(module: ModuleIdentifier, inner: R) -> Self {
        Self { module, inner }
    }

    pub fn module(&self) -> &ModuleIdentifier {
        &self.module
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: SelectionRule> SelectionRule for ModuleTargetedRule<R> {
    fn input_types(&self) -> &[InputType] {
        self.inner.input_types()
    }

    fn execute(
        &self,
        selection: &mut ComponentSelection,
        inputs: &[RuleInput<'_>],
    ) -> Result<(), RuleFailure> {
        self.inner.execute(selection, inputs)
    }

    fn as_targeted(&self) -> Option<&dyn TargetedRule> {
        Some(self)
    }
}

impl<R: SelectionRule> TargetedRule for ModuleTargetedRule<R> {
    fn is_satisfied_by(&self, selection: &ComponentSelection) -> bool {
        selection.candidate().matches(&self.module)
            && self
                .inner
                .as_targeted()
                .map_or(true, |inner| inner.is_satisfied_by(selection))
    }
}
