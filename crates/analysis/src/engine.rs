//! The per-site diagnostic pipeline.

use crate::cache::fingerprint;
use crate::{
    check_imports, hover, DocumentValidator, FingerprintCache, HoverLookup, ImportStatement,
    QuickInfo, SchemaSnapshot, SymbolGraph,
};
use std::collections::HashSet;
use std::sync::Arc;
use template_config::PluginConfig;
use template_resolve::{
    declared_fragment_names, has_unnamed_operation, offset_at, resolve_template, DiscoverySite,
    FragmentSource, ResolvedTemplate, SpeculativeParse, TemplateKind,
};
use template_types::{DiagnosticKind, OffsetRange, Severity, SourceDiagnostic};

/// Directive names the validator does not recognize but which are valid
/// client-side annotations by convention; complaints about them are
/// filtered out.
const CLIENT_DIRECTIVES: &[&str] = &[
    "populate",
    "client",
    "_optional",
    "_required",
    "arguments",
    "argumentDefinitions",
    "connection",
    "refetchable",
    "relay",
    "required",
    "inline",
];

/// Drives the external validator over resolved templates and maps every
/// resulting range back into the original source file.
///
/// One engine is created at plugin start and serves requests one at a
/// time; the fingerprint cache it owns is the only state carried between
/// requests.
pub struct DiagnosticEngine {
    validator: Arc<dyn DocumentValidator>,
    cache: FingerprintCache,
    config: PluginConfig,
}

impl DiagnosticEngine {
    /// Create an engine around an external validator and an owned cache.
    #[must_use]
    pub fn new(
        validator: Arc<dyn DocumentValidator>,
        cache: FingerprintCache,
        config: PluginConfig,
    ) -> Self {
        Self {
            validator,
            cache,
            config,
        }
    }

    /// Compute diagnostics for every discovery site of a file, memoized by
    /// content fingerprint.
    pub fn file_diagnostics(
        &mut self,
        sites: &[DiscoverySite],
        imports: &[ImportStatement],
        symbols: Option<&dyn SymbolGraph>,
        schema: &SchemaSnapshot,
    ) -> Arc<Vec<SourceDiagnostic>> {
        let tag_len = self.config.tag_len();
        let resolved: Vec<ResolvedTemplate> = sites
            .iter()
            .map(|site| resolve_template(site, tag_len))
            .collect();

        let key = self.request_fingerprint(sites, &resolved, schema);
        if let Some(hit) = self.cache.get(key) {
            tracing::debug!(key, "diagnostics cache hit");
            return hit;
        }
        tracing::debug!(key, site_count = sites.len(), "diagnostics cache miss");

        let mut diagnostics = Vec::new();
        for (site, template) in sites.iter().zip(&resolved) {
            diagnostics.extend(self.site_diagnostics(site, template, schema));
        }
        if let Some(symbols) = symbols {
            diagnostics.extend(check_imports(imports, symbols, &self.config));
        }

        let diagnostics = Arc::new(diagnostics);
        self.cache.put(key, Arc::clone(&diagnostics));
        diagnostics
    }

    /// Answer a hover query at an absolute source offset.
    #[must_use]
    pub fn quick_info(
        &self,
        sites: &[DiscoverySite],
        schema: &SchemaSnapshot,
        lookup: &dyn HoverLookup,
        offset: usize,
    ) -> Option<QuickInfo> {
        let tag_len = self.config.tag_len();
        let site = sites.iter().find(|site| {
            offset >= site.body_start(tag_len) && offset < site.end_offset(tag_len)
        })?;
        hover::quick_info(site, &self.config, schema, lookup, offset)
    }

    fn request_fingerprint(
        &self,
        sites: &[DiscoverySite],
        resolved: &[ResolvedTemplate],
        schema: &SchemaSnapshot,
    ) -> u64 {
        let fragment_texts: Vec<&str> = if self.config.template_is_call_expression {
            sites
                .iter()
                .flat_map(|site| site.fragments.iter())
                .map(|fragment| fragment.text.as_ref())
                .collect()
        } else {
            Vec::new()
        };
        fingerprint(
            resolved.iter().map(|template| template.combined_text.as_str()),
            fragment_texts.into_iter(),
            schema.version,
        )
    }

    /// External fragments to hand the validator for one site, excluding
    /// any whose name the call-site literal declares itself.
    fn external_fragments(site: &DiscoverySite) -> Vec<FragmentSource> {
        match site.kind {
            TemplateKind::CallExpression => {
                let own_names = declared_fragment_names(&site.text).unwrap_or(HashSet::new());
                site.fragments
                    .iter()
                    .filter(|fragment| !own_names.contains(fragment.name.as_ref()))
                    .cloned()
                    .collect()
            }
            // Tag-style fragments are substituted inline during resolution.
            TemplateKind::TaggedTemplate => Vec::new(),
        }
    }

    fn site_diagnostics(
        &self,
        site: &DiscoverySite,
        template: &ResolvedTemplate,
        schema: &SchemaSnapshot,
    ) -> Vec<SourceDiagnostic> {
        let _span = tracing::debug_span!("site_diagnostics", start = site.start).entered();

        let tag_len = self.config.tag_len();
        let body_start = site.body_start(tag_len);
        let site_end = site.end_offset(tag_len);
        let mut out = Vec::new();

        if let Some(schema_text) = schema.current.as_deref() {
            let fragments = Self::external_fragments(site);
            let raw = self
                .validator
                .validate(&template.combined_text, schema_text, &fragments);

            for diagnostic in raw {
                if is_client_directive_complaint(&diagnostic.message) {
                    continue;
                }

                let generated_start = offset_at(
                    &template.combined_text,
                    diagnostic.range.start.line,
                    diagnostic.range.start.character,
                );
                let generated_end = offset_at(
                    &template.combined_text,
                    diagnostic.range.end.line,
                    diagnostic.range.end.character,
                );

                let kind = if diagnostic.severity == Severity::Warning {
                    DiagnosticKind::DeprecatedField
                } else {
                    DiagnosticKind::Validation {
                        severity: diagnostic.severity,
                    }
                };

                if let Some(entry) = template
                    .spans
                    .entry_containing(generated_start, generated_end)
                {
                    // An inlined fragment routes the error to its true
                    // source location; identity regions keep the exact
                    // position within the literal.
                    let range = if entry.generated.len() == entry.original.len() {
                        let start =
                            entry.original.start + (generated_start - entry.generated.start);
                        OffsetRange::new(start, start + (generated_end - generated_start))
                    } else {
                        entry.original
                    };
                    out.push(SourceDiagnostic::new(kind, range, &diagnostic.message));
                    continue;
                }

                let mut start = body_start + generated_start;
                let mut end = body_start + generated_end;
                if start > site_end {
                    // Inlined text shifted the tail of the document; undo
                    // the net length delta of everything before it.
                    let delta = template.spans.length_delta_before(generated_start);
                    start = start.saturating_add_signed(-delta);
                    end = end.saturating_add_signed(-delta);
                }
                if end > site_end {
                    tracing::debug!(start, end, site_end, "dropping diagnostic past the site end");
                    continue;
                }
                out.push(SourceDiagnostic::new(
                    kind,
                    OffsetRange::new(start, end),
                    &diagnostic.message,
                ));
            }
        } else {
            tracing::debug!("no schema loaded; skipping validation");
        }

        // Structural check, independent of validator output and cheap
        // enough to recompute every pass.
        match has_unnamed_operation(&template.combined_text) {
            SpeculativeParse::Parsed(true) => out.push(SourceDiagnostic::new(
                DiagnosticKind::MissingOperationName,
                OffsetRange::new(site.start, site.start + site.text.len()),
                "Operation needs a name for types to be generated.",
            )),
            SpeculativeParse::Parsed(false) | SpeculativeParse::Failed => {}
        }

        out
    }
}

/// Whether a validator message is an unknown-directive complaint about one
/// of the client-only directives.
fn is_client_directive_complaint(message: &str) -> bool {
    let head = message.split('(').next().unwrap_or(message);
    let Some(rest) = head.split("Unknown directive \"@").nth(1) else {
        return false;
    };
    let Some(name) = rest.split('"').next() else {
        return false;
    };
    CLIENT_DIRECTIVES.contains(&name)
}
