//! Input kinds a rule may declare, and the values resolved for them.

use std::fmt;

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::metadata::{ComponentMetadataView, IvyModuleDescriptor, ModuleMetadata};

/// The closed set of inputs a rule can ask the engine for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InputType {
    /// The full resolved [`ModuleMetadata`].
    FullMetadata,
    /// A [`ComponentMetadataView`] over the full metadata.
    ComponentMetadataView,
    /// An [`IvyModuleDescriptor`]; rules declaring it only fire for Ivy modules.
    IvyDescriptor,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FullMetadata => "ModuleMetadata",
            Self::ComponentMetadataView => "ComponentMetadata",
            Self::IvyDescriptor => "IvyModuleDescriptor",
        };
        f.write_str(name)
    }
}

/// Declared input sequence of a rule. Rules rarely declare more than three.
pub type InputTypes = SmallVec<[InputType; 3]>;

/// A resolved input value handed to a rule, in declaration order.
#[derive(Debug, Clone, Copy)]
pub enum RuleInput<'a> {
    Metadata(&'a ModuleMetadata),
    ComponentMetadata(ComponentMetadataView<'a>),
    IvyDescriptor(IvyModuleDescriptor<'a>),
}

impl<'a> RuleInput<'a> {
    /// Returns the kind this value was resolved for.
    pub fn input_type(&self) -> InputType {
        match self {
            Self::Metadata(_) => InputType::FullMetadata,
            Self::ComponentMetadata(_) => InputType::ComponentMetadataView,
            Self::IvyDescriptor(_) => InputType::IvyDescriptor,
        }
    }

    pub fn as_metadata(&self) -> Option<&'a ModuleMetadata> {
        match self {
            Self::Metadata(metadata) => Some(*metadata),
            _ => None,
        }
    }

    pub fn as_component_metadata(&self) -> Option<ComponentMetadataView<'a>> {
        match self {
            Self::ComponentMetadata(view) => Some(*view),
            _ => None,
        }
    }

    pub fn as_ivy_descriptor(&self) -> Option<IvyModuleDescriptor<'a>> {
        match self {
            Self::IvyDescriptor(descriptor) => Some(*descriptor),
            _ => None,
        }
    }
}
