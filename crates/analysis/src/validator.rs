//! The validator seam.
//!
//! Validation itself is an external collaborator consumed as a black box:
//! given document text, a schema, and extra fragment definitions it returns
//! a list of range-tagged messages. The engine never interprets the schema
//! beyond presence and revision.

use std::sync::Arc;
use template_resolve::FragmentSource;
use template_types::{Range, Severity};

/// A validator-produced message, in combined-text coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDiagnostic {
    /// Half-open line/column range in the combined text.
    pub range: Range,
    /// Severity as reported by the validator.
    pub severity: Severity,
    /// Optional machine code.
    pub code: Option<u32>,
    /// Message text; may span multiple lines.
    pub message: String,
}

/// External document validator.
pub trait DocumentValidator {
    /// Validate `text` against `schema` with extra external `fragments`.
    ///
    /// A validator that cannot produce diagnostics for unrelated reasons
    /// returns an empty list, never an error.
    fn validate(
        &self,
        text: &str,
        schema: &str,
        fragments: &[FragmentSource],
    ) -> Vec<RawDiagnostic>;
}

/// The current schema, carried as opaque SDL text plus a monotonically
/// increasing revision counter. Any revision change invalidates the
/// diagnostics cache.
#[derive(Debug, Clone, Default)]
pub struct SchemaSnapshot {
    /// The schema, absent while loading or on load failure.
    pub current: Option<Arc<str>>,
    /// Revision counter, bumped by the schema collaborator on reload.
    pub version: u64,
}

impl SchemaSnapshot {
    /// Create a snapshot holding a schema.
    #[must_use]
    pub fn new(schema: impl Into<Arc<str>>, version: u64) -> Self {
        Self {
            current: Some(schema.into()),
            version,
        }
    }

    /// A snapshot with no schema loaded.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            current: None,
            version: 0,
        }
    }
}
