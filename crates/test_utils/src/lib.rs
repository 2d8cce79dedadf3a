//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! OCPD rating test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built needs-analysis profiles and clause selections
//! - `builders`: Builder patterns for calculation inputs and quote requests
//! - `assertions`: Custom assertion helpers for rating results
//! - `generators`: Property-based test data generators

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
