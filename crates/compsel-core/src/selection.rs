//! Per-candidate selection state.

use std::fmt;

use crate::identifier::ModuleComponentIdentifier;

/// Reason recorded when a rule rejects without giving one.
const DEFAULT_REJECTION_REASON: &str = "rejected by component selection rule";

/// One candidate module version under evaluation.
///
/// Rules reject a candidate by calling [`reject`](Self::reject); doing
/// nothing accepts it. The rejection is sticky: once set it is never
/// cleared, and the first reason recorded is the one that is kept.
///
/// # Example
///
/// ```
/// use compsel_core::{ComponentSelection, ModuleComponentIdentifier};
///
/// let mut selection =
///     ComponentSelection::new(ModuleComponentIdentifier::new("org", "lib", "1.0"));
/// assert!(!selection.is_rejected());
///
/// selection.reject("too old");
/// assert!(selection.is_rejected());
/// assert_eq!(selection.rejection_reason(), Some("too old"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSelection {
    candidate: ModuleComponentIdentifier,
    rejection: Option<String>,
}

impl ComponentSelection {
    pub fn new(candidate: ModuleComponentIdentifier) -> Self {
        Self {
            candidate,
            rejection: None,
        }
    }

    /// Returns the candidate being evaluated.
    pub fn candidate(&self) -> &ModuleComponentIdentifier {
        &self.candidate
    }

    /// Rejects the candidate.
    ///
    /// A blank reason is replaced by a default one. Calls after the first
    /// rejection leave the recorded reason untouched.
    pub fn reject(&mut self, reason: impl Into<String>) {
        if self.rejection.is_some() {
            return;
        }
        let reason = reason.into();
        self.rejection = Some(if reason.trim().is_empty() {
            DEFAULT_REJECTION_REASON.to_string()
        } else {
            reason
        });
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// Returns the rejection reason, present iff the candidate is rejected.
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection.as_deref()
    }
}

impl fmt::Display for ComponentSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rejection {
            Some(reason) => write!(f, "{} (rejected: {})", self.candidate, reason),
            None => write!(f, "{}", self.candidate),
        }
    }
}
