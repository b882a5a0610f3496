//! Diagnostic types published to the host editor.

use crate::OffsetRange;
use std::sync::Arc;

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Information,
}

/// Numeric diagnostic codes published to the host.
///
/// These form a fixed, small enumeration; the values are stable and part
/// of the external contract (editors match on them for code fixes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DiagnosticCode {
    /// Generic validation error reported by the document validator.
    Validation = 52001,
    /// An operation definition has no name.
    MissingOperationName = 52002,
    /// An imported module exports fragments the file does not import.
    MissingFragmentImport = 52003,
    /// A selected field is marked deprecated in the schema.
    DeprecatedField = 52004,
}

impl DiagnosticCode {
    /// The numeric value published to the host.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// What kind of diagnostic this is, carrying only the fields that kind
/// needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A message produced by the external document validator.
    Validation {
        /// Severity as reported by the validator.
        severity: Severity,
    },
    /// An operation definition without a name.
    MissingOperationName,
    /// Fragments exported by an imported module but not imported by name.
    MissingFragmentImport {
        /// Names of the exports that were not imported.
        missing: Vec<Arc<str>>,
        /// The module specifier of the import statement.
        module: Arc<str>,
    },
    /// Usage of a field the schema marks as deprecated.
    DeprecatedField,
}

impl DiagnosticKind {
    /// The numeric code for this kind.
    #[must_use]
    pub const fn code(&self) -> DiagnosticCode {
        match self {
            Self::Validation { .. } => DiagnosticCode::Validation,
            Self::MissingOperationName => DiagnosticCode::MissingOperationName,
            Self::MissingFragmentImport { .. } => DiagnosticCode::MissingFragmentImport,
            Self::DeprecatedField => DiagnosticCode::DeprecatedField,
        }
    }

    /// The severity this kind is published with.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Validation { severity } => *severity,
            Self::MissingOperationName | Self::DeprecatedField => Severity::Warning,
            Self::MissingFragmentImport { .. } => Severity::Information,
        }
    }
}

/// A diagnostic whose range has been mapped into absolute offsets in the
/// original source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDiagnostic {
    /// What kind of diagnostic this is.
    pub kind: DiagnosticKind,
    /// Absolute byte range in the original source file.
    pub range: OffsetRange,
    /// Single-line, human-readable message.
    pub message: Arc<str>,
}

impl SourceDiagnostic {
    /// Create a diagnostic, truncating the message to its first line.
    #[must_use]
    pub fn new(kind: DiagnosticKind, range: OffsetRange, message: impl AsRef<str>) -> Self {
        let message = message.as_ref().lines().next().unwrap_or_default();
        Self {
            kind,
            range,
            message: Arc::from(message),
        }
    }

    /// The numeric code published to the host.
    #[must_use]
    pub const fn code(&self) -> DiagnosticCode {
        self.kind.code()
    }

    /// The severity published to the host.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }
}
