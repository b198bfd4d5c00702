//! Tests for the metadata model.

use super::*;

fn id() -> ModuleComponentIdentifier {
    ModuleComponentIdentifier::new("org.example", "lib", "2.0")
}

#[test]
fn test_defaults() {
    let metadata = ModuleMetadata::maven(id());
    assert_eq!(metadata.status(), DEFAULT_STATUS);
    assert_eq!(metadata.status_scheme(), DEFAULT_STATUS_SCHEME);
    assert!(!metadata.is_changing());
    assert!(!metadata.is_ivy());
}

#[test]
fn test_component_view_reflects_metadata() {
    let mut metadata = ModuleMetadata::maven(id()).with_changing(true);
    metadata.set_status("milestone");

    let view = metadata.component_metadata();
    assert_eq!(view.id(), &id());
    assert_eq!(view.status(), "milestone");
    assert!(view.is_changing());
}

#[test]
fn test_maven_metadata_has_no_ivy_descriptor() {
    let metadata = ModuleMetadata::maven(id()).with_branch("main");
    assert!(metadata.ivy_descriptor().is_none());
}

#[test]
fn test_ivy_descriptor_fields() {
    let metadata = ModuleMetadata::ivy(id())
        .with_status("release")
        .with_branch("main")
        .with_extra_info(NamespaceId::new("urn:acme", "owner"), "build-team");

    let descriptor = metadata.ivy_descriptor().unwrap();
    assert_eq!(descriptor.branch(), Some("main"));
    assert_eq!(descriptor.ivy_status(), "release");
    assert_eq!(
        descriptor.extra_info().get("urn:acme", "owner"),
        Some("build-team")
    );
    assert_eq!(
        descriptor.extra_info().get_by_name("owner"),
        Some("build-team")
    );
}

#[test]
fn test_extra_info_ambiguous_name() {
    let mut info = IvyExtraInfo::new();
    info.insert(NamespaceId::new("urn:a", "owner"), "a");
    info.insert(NamespaceId::new("urn:b", "owner"), "b");

    assert_eq!(info.len(), 2);
    assert_eq!(info.get_by_name("owner"), None);
    assert_eq!(info.get("urn:b", "owner"), Some("b"));
}

#[test]
fn test_extra_info_lookup_needs_exact_key() {
    let mut info = IvyExtraInfo::new();
    info.insert(NamespaceId::new("urn:acme", "owner"), "build-team");
    info.insert(NamespaceId::new("urn:acme", "owner"), "release-team");

    assert_eq!(info.len(), 1);
    assert_eq!(info.get("urn:acme", "owner"), Some("release-team"));
    assert_eq!(info.get("urn:other", "owner"), None);
    assert_eq!(info.get("urn:acme", "team"), None);
}
