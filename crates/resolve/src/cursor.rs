//! Mapping absolute source offsets into combined-text cursors.

use crate::{offset_to_line_col, DiscoverySite, ResolvedTemplate};

/// A (line, column) cursor, 0-indexed, valid in combined text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Line number (0-indexed)
    pub line: u32,
    /// Character offset within the line (0-indexed)
    pub character: u32,
}

impl Cursor {
    /// Create a new cursor.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Convert an absolute offset in the original source into a cursor inside
/// the combined text of `template`.
///
/// Inlined fragments shift line numbers: every span entry whose original
/// region lies entirely before the offset contributes `lines - 1` extra
/// lines. Columns are unaffected, substitution being line-oriented.
///
/// Returns `None` when the offset falls outside the site's literal body.
#[must_use]
pub fn map_cursor(
    site: &DiscoverySite,
    template: &ResolvedTemplate,
    tag_len: usize,
    offset: usize,
) -> Option<Cursor> {
    let body_start = site.body_start(tag_len);
    if offset < body_start || offset >= site.end_offset(tag_len) {
        return None;
    }

    let (line, character) = offset_to_line_col(&site.text, offset - body_start);
    let shift = template.spans.line_shift_before(offset) as u32;

    Some(Cursor::new(line + shift, character))
}
