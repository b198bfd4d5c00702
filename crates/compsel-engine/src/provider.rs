//! Lazy, memoized access to a candidate's metadata.

use tracing::debug;

use compsel_core::{ComponentMetadataView, IvyModuleDescriptor, MetadataFetchError, ModuleMetadata};

const FAILED_FETCH: &str = "Metadata is unavailable after a failed fetch";

/// Per-candidate metadata cache.
///
/// Wraps the zero-argument factory supplied by the resolution machinery and
/// invokes it at most once. Nothing is fetched until a rule asks for
/// metadata, so candidates rejected by input-free rules never pay for it.
///
/// Once the factory has failed it is gone; later requests fail without
/// retrying the fetch.
///
/// # Example
///
/// ```
/// use compsel_core::{ModuleComponentIdentifier, ModuleMetadata};
/// use compsel_engine::MetadataProvider;
///
/// let id = ModuleComponentIdentifier::new("org", "lib", "1.0");
/// let mut provider = MetadataProvider::new(|| Ok(ModuleMetadata::maven(id)));
/// assert!(!provider.is_fetched());
///
/// assert_eq!(provider.component_metadata().unwrap().status(), "integration");
/// assert!(provider.ivy_descriptor().unwrap().is_none());
/// assert!(provider.is_fetched());
/// ```
pub struct MetadataProvider<F> {
    factory: Option<F>,
    cached: Option<ModuleMetadata>,
}

impl<F> MetadataProvider<F>
where
    F: FnOnce() -> Result<ModuleMetadata, MetadataFetchError>,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory: Some(factory),
            cached: None,
        }
    }

    /// Returns true once the factory has produced the metadata.
    pub fn is_fetched(&self) -> bool {
        self.cached.is_some()
    }

    /// Returns the full metadata, invoking the factory on first use.
    ///
    /// # Errors
    ///
    /// Returns the factory's error unchanged, or an error if an earlier
    /// fetch already failed.
    pub fn full_metadata(&mut self) -> Result<&ModuleMetadata, MetadataFetchError> {
        let metadata = match self.cached.take() {
            Some(metadata) => metadata,
            None => {
                let factory = self
                    .factory
                    .take()
                    .ok_or_else(|| MetadataFetchError::new(FAILED_FETCH))?;
                let metadata = factory()?;
                debug!(event = "metadata_fetched", candidate = %metadata.id());
                metadata
            }
        };
        Ok(&*self.cached.insert(metadata))
    }

    /// Returns the format-independent view over the full metadata.
    pub fn component_metadata(&mut self) -> Result<ComponentMetadataView<'_>, MetadataFetchError> {
        Ok(self.full_metadata()?.component_metadata())
    }

    /// Returns the Ivy view, or `None` for metadata of another format.
    pub fn ivy_descriptor(
        &mut self,
    ) -> Result<Option<IvyModuleDescriptor<'_>>, MetadataFetchError> {
        Ok(self.full_metadata()?.ivy_descriptor())
    }
}

impl<F> std::fmt::Debug for MetadataProvider<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataProvider")
            .field("cached", &self.cached)
            .field("factory_consumed", &self.factory.is_none())
            .finish()
    }
}
