//! Foundation types shared across the embedded GraphQL template engine.
//!
//! This crate deliberately has no third-party dependencies.

mod diagnostics;
mod position;

pub use diagnostics::{DiagnosticCode, DiagnosticKind, Severity, SourceDiagnostic};
pub use position::{OffsetRange, Position, Range};
