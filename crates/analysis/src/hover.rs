//! Hover information over embedded documents.

use crate::SchemaSnapshot;
use std::sync::Arc;
use template_config::PluginConfig;
use template_resolve::{map_cursor, resolve_template, Cursor, DiscoverySite};

/// External hover collaborator: token documentation lookup over a
/// document text and a schema.
pub trait HoverLookup {
    /// Documentation blocks for the token under `cursor`, or `None` when
    /// there is nothing to show.
    fn hover(&self, text: &str, schema: &str, cursor: Cursor) -> Option<Vec<Arc<str>>>;
}

/// The hover payload returned to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickInfo {
    /// Absolute offset the query was made at.
    pub offset: usize,
    /// Length of the highlighted span at the query offset.
    pub length: usize,
    /// One or more documentation text blocks.
    pub documentation: Vec<Arc<str>>,
}

/// Answer a hover query against one discovery site.
///
/// Resolves the site, maps the offset through the span map into a
/// combined-text cursor, and consults the external lookup. Returns `None`
/// without a schema, outside the literal, or when the lookup has nothing.
#[must_use]
pub fn quick_info(
    site: &DiscoverySite,
    config: &PluginConfig,
    schema: &SchemaSnapshot,
    lookup: &dyn HoverLookup,
    offset: usize,
) -> Option<QuickInfo> {
    let schema_text = schema.current.as_deref()?;
    let tag_len = config.tag_len();

    let template = resolve_template(site, tag_len);
    let cursor = map_cursor(site, &template, tag_len, offset)?;

    let documentation = lookup.hover(&template.combined_text, schema_text, cursor)?;
    if documentation.is_empty() {
        return None;
    }

    Some(QuickInfo {
        offset,
        length: 1,
        documentation,
    })
}
