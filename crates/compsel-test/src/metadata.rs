//! Candidate and metadata fixtures.
//!
//! All fixtures describe versions of `org.example:lib`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use compsel_core::{
    ComponentSelection, MetadataFetchError, ModuleComponentIdentifier, ModuleMetadata,
};

pub const GROUP: &str = "org.example";
pub const MODULE: &str = "lib";

/// Returns the identifier of `org.example:lib:<version>`.
pub fn candidate(version: &str) -> ModuleComponentIdentifier {
    ModuleComponentIdentifier::new(GROUP, MODULE, version)
}

/// Returns a pending selection for `org.example:lib:<version>`.
pub fn selection(version: &str) -> ComponentSelection {
    ComponentSelection::new(candidate(version))
}

/// Maven metadata with default status.
pub fn maven_metadata(version: &str) -> ModuleMetadata {
    ModuleMetadata::maven(candidate(version))
}

/// Ivy metadata with default status and an optional branch.
pub fn ivy_metadata(version: &str, branch: Option<&str>) -> ModuleMetadata {
    let metadata = ModuleMetadata::ivy(candidate(version));
    match branch {
        Some(branch) => metadata.with_branch(branch),
        None => metadata,
    }
}

/// Produces metadata factories and counts how often they are invoked.
///
/// Every factory handed out shares the same counter, so a test can check
/// how many fetches an `apply` call triggered.
#[derive(Debug, Clone)]
pub struct MetadataSource {
    result: Result<ModuleMetadata, String>,
    calls: Arc<AtomicUsize>,
}

impl MetadataSource {
    /// A source whose factories return `metadata`.
    pub fn new(metadata: ModuleMetadata) -> Self {
        Self {
            result: Ok(metadata),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose factories fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns a factory suitable for `apply`.
    pub fn factory(
        &self,
    ) -> impl FnOnce() -> Result<ModuleMetadata, MetadataFetchError> + Send + 'static {
        let calls = Arc::clone(&self.calls);
        let result = self.result.clone();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            result.map_err(MetadataFetchError::new)
        }
    }

    /// Number of factory invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
