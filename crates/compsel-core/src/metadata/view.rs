//! Read-only views over [`ModuleMetadata`].

use super::{IvyExtraInfo, ModuleMetadata};
use crate::identifier::ModuleComponentIdentifier;

/// Format-independent read view of a candidate's metadata.
///
/// Borrowing adapter; creating one costs nothing beyond the metadata
/// it wraps.
#[derive(Debug, Clone, Copy)]
pub struct ComponentMetadataView<'a> {
    metadata: &'a ModuleMetadata,
}

impl<'a> ComponentMetadataView<'a> {
    pub fn new(metadata: &'a ModuleMetadata) -> Self {
        Self { metadata }
    }

    pub fn id(&self) -> &'a ModuleComponentIdentifier {
        self.metadata.id()
    }

    pub fn status(&self) -> &'a str {
        self.metadata.status()
    }

    pub fn status_scheme(&self) -> &'a [String] {
        self.metadata.status_scheme()
    }

    pub fn is_changing(&self) -> bool {
        self.metadata.is_changing()
    }
}

/// Ivy-specific view: extra info, branch and Ivy status.
#[derive(Debug, Clone, Copy)]
pub struct IvyModuleDescriptor<'a> {
    extra_info: &'a IvyExtraInfo,
    branch: Option<&'a str>,
    status: &'a str,
}

impl<'a> IvyModuleDescriptor<'a> {
    pub(crate) fn new(
        extra_info: &'a IvyExtraInfo,
        branch: Option<&'a str>,
        status: &'a str,
    ) -> Self {
        Self {
            extra_info,
            branch,
            status,
        }
    }

    pub fn extra_info(&self) -> &'a IvyExtraInfo {
        self.extra_info
    }

    pub fn branch(&self) -> Option<&'a str> {
        self.branch
    }

    pub fn ivy_status(&self) -> &'a str {
        self.status
    }
}
