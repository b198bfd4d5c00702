//! Shared test fixtures for compsel crates.
//!
//! This crate provides instrumented rules and metadata sources for testing.
//! It depends only on `compsel-core` so the engine can use it as a
//! dev-dependency.
//!
//! - [`rule`] - `StubRule`, an instrumented rule counting its invocations
//! - [`metadata`] - candidates, metadata fixtures and a counting metadata factory
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! compsel-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use compsel_test::{maven_metadata, selection, MetadataSource, StubRule};
//! ```

pub mod metadata;
pub mod rule;

pub use metadata::{candidate, ivy_metadata, maven_metadata, selection, MetadataSource};
pub use rule::{ExecutionLog, StubFailure, StubOutcome, StubRule};
