//! Diagnostic engine for embedded GraphQL documents.
//!
//! Drives the external document validator over resolved templates, remaps
//! every diagnostic range back into the original source file through the
//! span map, synthesizes structural diagnostics, memoizes per content
//! fingerprint, and answers hover queries.

mod cache;
mod engine;
mod hover;
mod imports;
mod validator;

pub use cache::{Clock, FingerprintCache, SystemClock, DEFAULT_CAPACITY, DEFAULT_TTL};
pub use engine::DiagnosticEngine;
pub use hover::{quick_info, HoverLookup, QuickInfo};
pub use imports::{check_imports, ExportedDeclaration, ImportStatement, SymbolGraph};
pub use validator::{DocumentValidator, RawDiagnostic, SchemaSnapshot};
