//! The span map: correspondences between combined text and original source.

use template_types::OffsetRange;

/// One correspondence between a contiguous region of combined text and a
/// contiguous region of the original source file.
///
/// `lines` is the number of text lines the substituted content occupies,
/// used to correct cursor line numbers after substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanEntry {
    /// Region in the combined text (offsets relative to its start).
    pub generated: OffsetRange,
    /// Absolute region in the original source file.
    pub original: OffsetRange,
    /// Line count of the substituted content.
    pub lines: usize,
}

impl SpanEntry {
    /// Create a new span entry.
    #[must_use]
    pub const fn new(generated: OffsetRange, original: OffsetRange, lines: usize) -> Self {
        Self {
            generated,
            original,
            lines,
        }
    }

    /// Signed length difference introduced by this substitution.
    #[must_use]
    pub const fn length_delta(&self) -> isize {
        self.generated.len() as isize - self.original.len() as isize
    }
}

/// Ordered list of [`SpanEntry`], ascending by generated start offset.
///
/// Regions are pairwise disjoint. Offsets outside every entry map
/// identity-wise, modulo the constant site-start shift.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanMap {
    entries: Vec<SpanEntry>,
}

impl SpanMap {
    /// Create an empty span map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry. Entries must be pushed in ascending generated order
    /// and must not overlap the previous entry.
    pub fn push(&mut self, entry: SpanEntry) {
        debug_assert!(
            self.entries
                .last()
                .is_none_or(|last| last.generated.end <= entry.generated.start),
            "span entries must be ordered and disjoint"
        );
        self.entries.push(entry);
    }

    /// All entries, in generated order.
    #[must_use]
    pub fn entries(&self) -> &[SpanEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry whose generated region fully contains `[start, end)`,
    /// if any.
    #[must_use]
    pub fn entry_containing(&self, start: usize, end: usize) -> Option<&SpanEntry> {
        self.entries
            .iter()
            .find(|entry| entry.generated.contains_range(OffsetRange::new(start, end)))
    }

    /// Net length delta contributed by every entry whose generated region
    /// lies strictly before `generated_offset`.
    #[must_use]
    pub fn length_delta_before(&self, generated_offset: usize) -> isize {
        self.entries
            .iter()
            .filter(|entry| entry.generated.end < generated_offset)
            .map(SpanEntry::length_delta)
            .sum()
    }

    /// Line shift accumulated by every entry whose original region lies
    /// strictly before `original_offset`: each entry of `n` lines replaces
    /// one line of source, shifting later lines down by `n - 1`.
    #[must_use]
    pub fn line_shift_before(&self, original_offset: usize) -> usize {
        self.entries
            .iter()
            .filter(|entry| {
                entry.original.start < original_offset && entry.original.end < original_offset
            })
            .map(|entry| entry.lines.saturating_sub(1))
            .sum()
    }
}
