//! Registration container for selection rules.

use std::collections::HashSet;
use std::sync::Arc;

use compsel_core::{
    ComponentSelection, InputType, MetadataFetchError, ModuleIdentifier, ModuleMetadata,
    NotationError, RuleFailure, RuleInput, SelectionError, SelectionRule,
};

use crate::closure::ClosureRule;
use crate::processor::ComponentSelectionRulesProcessor;
use crate::targeted::ModuleTargetedRule;

/// Ordered, validated collection of selection rules.
///
/// Rules are validated when registered, so the engine only ever sees
/// well-formed declarations. Registration order is preserved and is the
/// order rules run in within their group.
///
/// # Example
///
/// ```
/// use compsel_core::{ComponentSelection, InputType, ModuleComponentIdentifier, ModuleMetadata};
/// use compsel_engine::ComponentSelectionRules;
///
/// let mut rules = ComponentSelectionRules::new();
/// rules
///     .with_module_fn("org.example:lib", [InputType::ComponentMetadataView], |selection, inputs| {
///         let status = inputs[0].as_component_metadata().map(|m| m.status());
///         if status != Some("release") {
///             selection.reject("only releases of lib are allowed");
///         }
///         Ok(())
///     })
///     .unwrap();
///
/// let id = ModuleComponentIdentifier::new("org.example", "lib", "2.0-rc1");
/// let mut selection = ComponentSelection::new(id.clone());
/// rules
///     .apply(&mut selection, || Ok(ModuleMetadata::maven(id).with_status("milestone")))
///     .unwrap();
/// assert!(selection.is_rejected());
///
/// assert!(rules.with_module_fn("org.example", [], |_, _| Ok(())).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComponentSelectionRules {
    rules: Vec<Arc<dyn SelectionRule>>,
    processor: ComponentSelectionRulesProcessor,
}

impl ComponentSelectionRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule applying to every candidate.
    pub fn all<R>(&mut self, rule: R) -> Result<&mut Self, SelectionError>
    where
        R: SelectionRule + 'static,
    {
        self.add(Arc::new(rule))
    }

    /// Registers a closure rule applying to every candidate.
    pub fn all_fn<I, F>(&mut self, input_types: I, action: F) -> Result<&mut Self, SelectionError>
    where
        I: IntoIterator<Item = InputType>,
        F: Fn(&mut ComponentSelection, &[RuleInput<'_>]) -> Result<(), RuleFailure>
            + Send
            + Sync
            + 'static,
    {
        self.all(ClosureRule::new(input_types, action))
    }

    /// Registers a rule that only fires for candidates of `notation`
    /// (`group:name`).
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidRule`] if the notation cannot be
    /// parsed or the rule's declaration is invalid; nothing is registered.
    pub fn with_module<R>(&mut self, notation: &str, rule: R) -> Result<&mut Self, SelectionError>
    where
        R: SelectionRule + 'static,
    {
        let module = notation
            .parse::<ModuleIdentifier>()
            .map_err(|source| invalid_module(notation, source))?;
        self.add(Arc::new(ModuleTargetedRule::new(module, rule)))
    }

    /// Registers a closure rule that only fires for candidates of `notation`.
    pub fn with_module_fn<I, F>(
        &mut self,
        notation: &str,
        input_types: I,
        action: F,
    ) -> Result<&mut Self, SelectionError>
    where
        I: IntoIterator<Item = InputType>,
        F: Fn(&mut ComponentSelection, &[RuleInput<'_>]) -> Result<(), RuleFailure>
            + Send
            + Sync
            + 'static,
    {
        self.with_module(notation, ClosureRule::new(input_types, action))
    }

    /// Registers an already shared rule after validating its declaration.
    pub fn add(&mut self, rule: Arc<dyn SelectionRule>) -> Result<&mut Self, SelectionError> {
        validate(rule.as_ref())?;
        self.rules.push(rule);
        Ok(self)
    }

    pub fn rules(&self) -> &[Arc<dyn SelectionRule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates the registered rules against `selection`.
    ///
    /// See [`ComponentSelectionRulesProcessor::apply`].
    pub fn apply<F>(
        &self,
        selection: &mut ComponentSelection,
        metadata_factory: F,
    ) -> Result<(), SelectionError>
    where
        F: FnOnce() -> Result<ModuleMetadata, MetadataFetchError>,
    {
        self.processor
            .apply(selection, &self.rules, metadata_factory)
    }
}

fn invalid_module(notation: &str, source: NotationError) -> SelectionError {
    SelectionError::InvalidRule {
        message: format!(
            "Could not add a component selection rule for module '{}'.",
            notation
        ),
        source: Some(source),
    }
}

fn validate(rule: &dyn SelectionRule) -> Result<(), SelectionError> {
    let mut seen = HashSet::new();
    for input_type in rule.input_types() {
        if !seen.insert(*input_type) {
            return Err(SelectionError::invalid_rule(format!(
                "Rule may not declare input type '{}' more than once.",
                input_type
            )));
        }
    }
    Ok(())
}
