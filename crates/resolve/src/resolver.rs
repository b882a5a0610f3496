//! Building combined, validatable text for one discovery site.

use crate::{
    declared_fragment_names, DiscoverySite, SpanEntry, SpanMap, TemplateKind,
};
use std::collections::HashSet;
use template_types::OffsetRange;

/// The output of template resolution: combined text plus its span map.
///
/// Owned exclusively by the resolution call that produced it; templates
/// are rebuilt per request and never shared across sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    /// The single validatable document text.
    pub combined_text: String,
    /// Correspondences between combined text and original source.
    pub spans: SpanMap,
}

/// Resolve one discovery site into a validatable document.
///
/// Resolution never fails: a literal that does not parse is passed through
/// unchanged so the validator can surface its syntax errors, degrading to
/// "no fragments merged".
#[must_use]
pub fn resolve_template(site: &DiscoverySite, tag_len: usize) -> ResolvedTemplate {
    match site.kind {
        TemplateKind::TaggedTemplate => resolve_tagged(site, tag_len),
        TemplateKind::CallExpression => resolve_call(site),
    }
}

/// Tag-style resolution: close to identity. Interpolated `${Name}`
/// sub-expressions are substituted with the named fragment's text; when
/// nothing is substituted a single span entry covers the whole body.
fn resolve_tagged(site: &DiscoverySite, tag_len: usize) -> ResolvedTemplate {
    let body_start = site.body_start(tag_len);
    let mut combined = String::with_capacity(site.text.len());
    let mut spans = SpanMap::new();

    let mut interpolations: Vec<_> = site.interpolations.iter().collect();
    interpolations.sort_by_key(|interpolation| interpolation.range.start);

    let mut cursor = 0;
    for interpolation in interpolations {
        let range = interpolation.range;
        if range.start < cursor || range.end > site.text.len() || range.start > range.end {
            tracing::debug!(%range, "skipping out-of-bounds interpolation");
            continue;
        }
        combined.push_str(&site.text[cursor..range.start]);

        let fragment = site
            .fragments
            .iter()
            .find(|fragment| fragment.name == interpolation.fragment_name);
        match fragment {
            Some(fragment) => {
                let generated_start = combined.len();
                combined.push_str(&fragment.text);
                spans.push(SpanEntry::new(
                    OffsetRange::new(generated_start, combined.len()),
                    OffsetRange::new(body_start + range.start, body_start + range.end),
                    fragment.lines(),
                ));
            }
            None => {
                // Unresolvable interpolation passes through untouched; the
                // validator will complain about the unknown spread.
                tracing::debug!(
                    fragment = %interpolation.fragment_name,
                    "no fragment source for interpolation"
                );
                combined.push_str(&site.text[range.start..range.end]);
            }
        }
        cursor = range.end;
    }
    combined.push_str(&site.text[cursor..]);

    if spans.is_empty() {
        // Pure identity: one entry covering the whole literal body.
        spans.push(SpanEntry::new(
            OffsetRange::new(0, combined.len()),
            OffsetRange::new(body_start, body_start + site.text.len()),
            combined.split('\n').count(),
        ));
    }

    ResolvedTemplate {
        combined_text: combined,
        spans,
    }
}

/// Call-style resolution: the literal references fragments by spread that
/// are supplied as side-channel definitions. Each external fragment not
/// shadowed by a call-site declaration is concatenated after the call's
/// own text, with a span entry pointing at its original declaration site.
fn resolve_call(site: &DiscoverySite) -> ResolvedTemplate {
    let own_names = declared_fragment_names(&site.text).unwrap_or(HashSet::new());

    let mut combined = site.text.to_string();
    let mut spans = SpanMap::new();

    for fragment in &site.fragments {
        if own_names.contains(fragment.name.as_ref()) {
            // Call-site definitions win; never validate the same name twice.
            tracing::debug!(fragment = %fragment.name, "call-site declaration shadows external fragment");
            continue;
        }
        combined.push('\n');
        let generated_start = combined.len();
        combined.push_str(&fragment.text);
        spans.push(SpanEntry::new(
            OffsetRange::new(generated_start, combined.len()),
            fragment.location,
            fragment.lines(),
        ));
    }

    ResolvedTemplate {
        combined_text: combined,
        spans,
    }
}
