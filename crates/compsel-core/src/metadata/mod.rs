//! Resolved module metadata and the read-only views rules consume.
//!
//! - [`ModuleMetadata`]: the full resolved metadata of a candidate
//! - [`ComponentMetadataView`]: format-independent read view
//! - [`IvyModuleDescriptor`]: Ivy-specific view, only for Ivy metadata

mod view;

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::identifier::ModuleComponentIdentifier;

pub use view::{ComponentMetadataView, IvyModuleDescriptor};

/// Status assigned to metadata that does not declare one.
pub const DEFAULT_STATUS: &str = "integration";

/// Status scheme used when metadata does not declare one, least mature first.
pub const DEFAULT_STATUS_SCHEME: [&str; 3] = ["integration", "milestone", "release"];

/// Full resolved metadata of one candidate module version.
///
/// Produced by the metadata factory the resolution machinery hands to the
/// engine. Setters let the factory adjust it before handing it over;
/// rules only ever see it through shared references.
///
/// # Example
///
/// ```
/// use compsel_core::{ModuleComponentIdentifier, ModuleMetadata};
///
/// let metadata = ModuleMetadata::ivy(ModuleComponentIdentifier::new("org", "lib", "1.0"))
///     .with_status("release")
///     .with_branch("main");
///
/// assert_eq!(metadata.status(), "release");
/// assert!(metadata.is_ivy());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleMetadata {
    id: ModuleComponentIdentifier,
    status: String,
    status_scheme: Vec<String>,
    changing: bool,
    format: MetadataFormat,
}

/// Format-specific part of the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum MetadataFormat {
    /// Metadata read from a Maven POM.
    Maven { packaging: String },
    /// Metadata read from an Ivy descriptor.
    Ivy {
        extra_info: IvyExtraInfo,
        branch: Option<String>,
    },
}

impl ModuleMetadata {
    /// Creates metadata for a module with the given format and default status.
    pub fn new(id: ModuleComponentIdentifier, format: MetadataFormat) -> Self {
        Self {
            id,
            status: DEFAULT_STATUS.to_string(),
            status_scheme: DEFAULT_STATUS_SCHEME.map(String::from).into(),
            changing: false,
            format,
        }
    }

    /// Creates Maven metadata with `jar` packaging.
    pub fn maven(id: ModuleComponentIdentifier) -> Self {
        Self::new(
            id,
            MetadataFormat::Maven {
                packaging: "jar".to_string(),
            },
        )
    }

    /// Creates Ivy metadata with no extra info and no branch.
    pub fn ivy(id: ModuleComponentIdentifier) -> Self {
        Self::new(
            id,
            MetadataFormat::Ivy {
                extra_info: IvyExtraInfo::default(),
                branch: None,
            },
        )
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.set_status(status);
        self
    }

    pub fn with_status_scheme<I, T>(mut self, scheme: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.set_status_scheme(scheme);
        self
    }

    pub fn with_changing(mut self, changing: bool) -> Self {
        self.changing = changing;
        self
    }

    /// Sets the Ivy branch. Has no effect on non-Ivy metadata.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        if let MetadataFormat::Ivy { branch: slot, .. } = &mut self.format {
            *slot = Some(branch.into());
        }
        self
    }

    /// Adds an Ivy extra-info entry. Has no effect on non-Ivy metadata.
    pub fn with_extra_info(mut self, key: NamespaceId, value: impl Into<String>) -> Self {
        if let MetadataFormat::Ivy { extra_info, .. } = &mut self.format {
            extra_info.insert(key, value);
        }
        self
    }

    pub fn id(&self) -> &ModuleComponentIdentifier {
        &self.id
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn status_scheme(&self) -> &[String] {
        &self.status_scheme
    }

    pub fn set_status_scheme<I, T>(&mut self, scheme: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.status_scheme = scheme.into_iter().map(Into::into).collect();
    }

    pub fn is_changing(&self) -> bool {
        self.changing
    }

    pub fn set_changing(&mut self, changing: bool) {
        self.changing = changing;
    }

    pub fn format(&self) -> &MetadataFormat {
        &self.format
    }

    pub fn is_ivy(&self) -> bool {
        matches!(self.format, MetadataFormat::Ivy { .. })
    }

    /// Returns the format-independent read view.
    pub fn component_metadata(&self) -> ComponentMetadataView<'_> {
        ComponentMetadataView::new(self)
    }

    /// Returns the Ivy view, or `None` if this is not Ivy metadata.
    pub fn ivy_descriptor(&self) -> Option<IvyModuleDescriptor<'_>> {
        match &self.format {
            MetadataFormat::Ivy { extra_info, branch } => {
                let branch = branch.as_deref();
                Some(IvyModuleDescriptor::new(extra_info, branch, &self.status))
            }
            MetadataFormat::Maven { .. } => None,
        }
    }
}

/// A namespaced element name from an Ivy descriptor's `<info>` block.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamespaceId {
    namespace: String,
    name: String,
}

impl NamespaceId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// Extra `<info>` elements declared in an Ivy descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IvyExtraInfo {
    entries: BTreeMap<NamespaceId, String>,
}

impl IvyExtraInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: NamespaceId, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<&str> {
        self.entries
            .get(&NamespaceId::new(namespace, name))
            .map(String::as_str)
    }

    /// Looks an entry up by element name alone.
    ///
    /// Returns `None` when no entry or more than one entry has this name.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        let mut matches = self.entries.iter().filter(|(k, _)| k.name == name);
        match (matches.next(), matches.next()) {
            (Some((_, value)), None) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NamespaceId, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests;
