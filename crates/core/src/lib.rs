//! sigcompat-core
//!
//! Core library for classifying function-signature changes between two
//! versions of an API.
//!
//! This crate defines the declaration model, the tuple comparator and
//! signature classifier, canonical rendering, snapshot loading, and the
//! audit pipeline that turns two snapshots into a report.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends.

pub mod audit;
pub mod classify;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod render;
pub mod snapshot;
pub mod tuple;

pub use classify::{classify, ChangeKind, Classifier};
pub use model::{FuncChange, FunctionDecl, Param, Signature, TypeDescriptor};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
