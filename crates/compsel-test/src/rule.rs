//! Instrumented rule stubs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use compsel_core::{
    ComponentSelection, InputType, InputTypes, RuleFailure, RuleInput, SelectionRule, TargetedRule,
};
use thiserror::Error;

/// Error returned by failing stubs, so tests can downcast the cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stub rule failed: {message}")]
pub struct StubFailure {
    message: String,
}

impl StubFailure {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// What a stub does when executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubOutcome {
    Accept,
    Reject(String),
    Fail(String),
    /// Rejects the candidate, then fails.
    RejectThenFail { reason: String, message: String },
}

/// Records the names of executed rules across several stubs.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.entries.lock().unwrap().push(name.to_string());
    }

    /// Names of executed rules, in execution order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

/// A rule with a scripted outcome that counts its invocations.
///
/// # Example
///
/// ```
/// use compsel_core::{InputType, SelectionRule};
/// use compsel_test::StubRule;
///
/// let rule = StubRule::rejecting("r1", "too old").with_inputs([InputType::FullMetadata]);
/// assert_eq!(rule.input_types(), &[InputType::FullMetadata]);
/// assert_eq!(rule.calls(), 0);
/// ```
#[derive(Debug)]
pub struct StubRule {
    name: String,
    input_types: InputTypes,
    outcome: StubOutcome,
    applicable: Option<bool>,
    log: Option<ExecutionLog>,
    calls: AtomicUsize,
    last_inputs: Mutex<Option<Vec<InputType>>>,
}

impl StubRule {
    pub fn new(name: impl Into<String>, outcome: StubOutcome) -> Self {
        Self {
            name: name.into(),
            input_types: InputTypes::new(),
            outcome,
            applicable: None,
            log: None,
            calls: AtomicUsize::new(0),
            last_inputs: Mutex::new(None),
        }
    }

    pub fn accepting(name: impl Into<String>) -> Self {
        Self::new(name, StubOutcome::Accept)
    }

    pub fn rejecting(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(name, StubOutcome::Reject(reason.into()))
    }

    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, StubOutcome::Fail(message.into()))
    }

    pub fn rejecting_then_failing(
        name: impl Into<String>,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            StubOutcome::RejectThenFail {
                reason: reason.into(),
                message: message.into(),
            },
        )
    }

    /// Declares the inputs the stub asks for.
    pub fn with_inputs(mut self, input_types: impl IntoIterator<Item = InputType>) -> Self {
        self.input_types = input_types.into_iter().collect();
        self
    }

    /// Gives the stub an applicability predicate with a fixed answer.
    pub fn applicable(mut self, applicable: bool) -> Self {
        self.applicable = Some(applicable);
        self
    }

    /// Records executions of this stub in `log`.
    pub fn recording(mut self, log: &ExecutionLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of times the stub was executed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Kinds of the inputs received by the latest execution.
    pub fn last_inputs(&self) -> Option<Vec<InputType>> {
        self.last_inputs.lock().unwrap().clone()
    }
}

impl SelectionRule for StubRule {
    fn input_types(&self) -> &[InputType] {
        &self.input_types
    }

    fn execute(
        &self,
        selection: &mut ComponentSelection,
        inputs: &[RuleInput<'_>],
    ) -> Result<(), RuleFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let kinds = inputs.iter().map(RuleInput::input_type).collect();
        *self.last_inputs.lock().unwrap() = Some(kinds);
        if let Some(log) = &self.log {
            log.record(&self.name);
        }

        match &self.outcome {
            StubOutcome::Accept => Ok(()),
            StubOutcome::Reject(reason) => {
                selection.reject(reason.clone());
                Ok(())
            }
            StubOutcome::Fail(message) => Err(Box::new(StubFailure {
                message: message.clone(),
            })),
            StubOutcome::RejectThenFail { reason, message } => {
                selection.reject(reason.clone());
                Err(Box::new(StubFailure {
                    message: message.clone(),
                }))
            }
        }
    }

    fn as_targeted(&self) -> Option<&dyn TargetedRule> {
        self.applicable.map(|_| self as &dyn TargetedRule)
    }
}

impl TargetedRule for StubRule {
    fn is_satisfied_by(&self, _selection: &ComponentSelection) -> bool {
        self.applicable.unwrap_or(true)
    }
}
