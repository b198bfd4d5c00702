//! Module and candidate identifiers.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::NotationError;

/// The `group:name` coordinates of a module, independent of version.
///
/// # Example
///
/// ```
/// use compsel_core::ModuleIdentifier;
///
/// let id: ModuleIdentifier = "org.example:lib".parse().unwrap();
/// assert_eq!(id.group(), "org.example");
/// assert_eq!(id.name(), "lib");
/// assert!("org.example".parse::<ModuleIdentifier>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleIdentifier {
    group: String,
    name: String,
}

impl ModuleIdentifier {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for ModuleIdentifier {
    type Err = NotationError;

    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        let mut parts = notation.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(name), None) => {
                let (group, name) = (group.trim(), name.trim());
                if group.is_empty() || name.is_empty() {
                    return Err(NotationError::new(notation));
                }
                Ok(Self::new(group, name))
            }
            _ => Err(NotationError::new(notation)),
        }
    }
}

impl fmt::Display for ModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

/// Identity of one candidate module version.
///
/// Ordering and hashing follow `(group, module, version)` so identifiers
/// can key maps in the resolution machinery. The engine itself only uses
/// the identifier for matching targeted rules and for logging.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleComponentIdentifier {
    group: String,
    module: String,
    version: String,
}

impl ModuleComponentIdentifier {
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version: version.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the version-less module coordinates.
    pub fn module_identifier(&self) -> ModuleIdentifier {
        ModuleIdentifier::new(self.group.clone(), self.module.clone())
    }

    /// Returns true if this candidate belongs to `module`.
    pub fn matches(&self, module: &ModuleIdentifier) -> bool {
        self.group == module.group && self.module == module.name
    }
}

impl fmt::Display for ModuleComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.module, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_module_notation() {
        let id: ModuleIdentifier = "org.example:lib".parse().unwrap();
        assert_eq!(id, ModuleIdentifier::new("org.example", "lib"));
        assert_eq!(id.to_string(), "org.example:lib");
    }

    #[test]
    fn test_parse_rejects_malformed_notation() {
        for notation in ["", "lib", ":lib", "org:", "org:lib:1.0", "  : "] {
            let err = notation.parse::<ModuleIdentifier>().unwrap_err();
            assert_eq!(err.notation(), notation);
        }
    }

    #[test]
    fn test_candidate_display_and_match() {
        let candidate = ModuleComponentIdentifier::new("org.example", "lib", "1.2.0");
        assert_eq!(candidate.to_string(), "org.example:lib:1.2.0");
        let lib = ModuleIdentifier::new("org.example", "lib");
        let other = ModuleIdentifier::new("org.example", "other");
        assert!(candidate.matches(&lib));
        assert!(!candidate.matches(&other));
        assert_eq!(candidate.module_identifier(), lib);
    }

    #[test]
    fn test_candidates_order_by_coordinates() {
        let a = ModuleComponentIdentifier::new("org", "lib", "1.0");
        let b = ModuleComponentIdentifier::new("org", "lib", "1.1");
        assert!(a < b);
    }
}
