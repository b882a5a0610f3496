//! Import completeness checking for colocated fragments.
//!
//! A file-scoped static check, independent of the span machinery: for each
//! imported module, every export that is itself a fragment-only document
//! and is not among the imported names gets reported, so colocated
//! fragments are not silently left behind.

use std::sync::Arc;
use template_config::PluginConfig;
use template_resolve::{is_fragment_only_document, SpeculativeParse};
use template_types::{DiagnosticKind, OffsetRange, SourceDiagnostic};

/// One import statement of the source file, as located by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// The module specifier, e.g. `./fragments`.
    pub module: Arc<str>,
    /// Names the statement actually imports.
    pub imported_names: Vec<Arc<str>>,
    /// Absolute range of the statement in the source file.
    pub location: OffsetRange,
}

/// An exported declaration of some module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDeclaration {
    /// Export name.
    pub name: Arc<str>,
    /// Combined text of the embedded document the declaration holds, if
    /// it holds one.
    pub document_text: Option<Arc<str>>,
}

/// Program symbol information, supplied by an external collaborator.
pub trait SymbolGraph {
    /// The full set of exported declarations of `module`, or `None` when
    /// the module cannot be resolved.
    fn module_exports(&self, module: &str) -> Option<Vec<ExportedDeclaration>>;
}

/// Check every import statement for missing colocated-fragment imports.
///
/// Returns nothing unless enabled in configuration.
#[must_use]
pub fn check_imports(
    imports: &[ImportStatement],
    symbols: &dyn SymbolGraph,
    config: &PluginConfig,
) -> Vec<SourceDiagnostic> {
    if !config.should_check_for_colocated_fragments {
        return Vec::new();
    }

    let mut diagnostics = Vec::new();
    for import in imports {
        let Some(exports) = symbols.module_exports(&import.module) else {
            continue;
        };

        let mut missing: Vec<Arc<str>> = Vec::new();
        for export in exports {
            if import
                .imported_names
                .iter()
                .any(|name| name.as_ref() == export.name.as_ref())
            {
                continue;
            }
            let Some(text) = &export.document_text else {
                continue;
            };
            match is_fragment_only_document(text) {
                SpeculativeParse::Parsed(true) => missing.push(Arc::clone(&export.name)),
                // Operations and unparsable documents are not fragments
                // someone forgot to import.
                SpeculativeParse::Parsed(false) | SpeculativeParse::Failed => {}
            }
        }

        if !missing.is_empty() {
            let quoted: Vec<String> = missing.iter().map(|name| format!("'{name}'")).collect();
            let message = format!(
                "Missing Fragment import(s) {} from '{}'.",
                quoted.join(", "),
                import.module
            );
            tracing::debug!(module = %import.module, missing = missing.len(), "missing fragment imports");
            diagnostics.push(SourceDiagnostic::new(
                DiagnosticKind::MissingFragmentImport {
                    missing,
                    module: Arc::clone(&import.module),
                },
                import.location,
                message,
            ));
        }
    }

    diagnostics
}
