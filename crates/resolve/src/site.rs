//! The discovery-site model.
//!
//! Discovery itself is an external collaborator: it walks the host source
//! file and hands the engine one [`DiscoverySite`] per embedded document,
//! created fresh per request and never persisted.

use std::sync::Arc;
use template_types::OffsetRange;

/// How an embedded document occurs in the host source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// A tagged template literal: ``gql`query { ... }` ``.
    TaggedTemplate,
    /// A call expression taking the document as its argument: `gql('...')`.
    CallExpression,
}

/// A named fragment declared elsewhere in the program, supplied by the
/// discovery collaborator as a side channel for call-style sites.
///
/// `text` is the serialized form of the fragment's *parsed* declaration,
/// not the raw source it was written as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSource {
    /// Fragment name.
    pub name: Arc<str>,
    /// Serialized text of the parsed fragment declaration.
    pub text: Arc<str>,
    /// Absolute range of the declaration in the original source file.
    pub location: OffsetRange,
}

impl FragmentSource {
    /// Create a new fragment source.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, text: impl Into<Arc<str>>, location: OffsetRange) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            location,
        }
    }

    /// Number of text lines the serialized fragment occupies.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.text.split('\n').count()
    }
}

/// An interpolated sub-expression (`${Name}`) inside a tagged template
/// literal, referencing a fragment by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolation {
    /// Range of the `${...}` expression, relative to the literal body.
    pub range: OffsetRange,
    /// Name of the referenced fragment.
    pub fragment_name: Arc<str>,
}

impl Interpolation {
    /// Create a new interpolation.
    #[must_use]
    pub fn new(range: OffsetRange, fragment_name: impl Into<Arc<str>>) -> Self {
        Self {
            range,
            fragment_name: fragment_name.into(),
        }
    }
}

/// An embedded-document occurrence located in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySite {
    /// The raw literal body, without the surrounding delimiters.
    pub text: Arc<str>,
    /// Absolute offset of the occurrence: the tag identifier for tag-style
    /// sites, the literal body itself for call-style sites.
    pub start: usize,
    /// Tag-style or call-style.
    pub kind: TemplateKind,
    /// Externally-resolved fragment definitions belonging to this site.
    pub fragments: Vec<FragmentSource>,
    /// Interpolated sub-expressions inside the literal (tag-style only).
    pub interpolations: Vec<Interpolation>,
}

impl DiscoverySite {
    /// Create a tag-style site.
    #[must_use]
    pub fn tagged(text: impl Into<Arc<str>>, start: usize) -> Self {
        Self {
            text: text.into(),
            start,
            kind: TemplateKind::TaggedTemplate,
            fragments: Vec::new(),
            interpolations: Vec::new(),
        }
    }

    /// Create a call-style site with its side-channel fragments.
    #[must_use]
    pub fn call(text: impl Into<Arc<str>>, start: usize, fragments: Vec<FragmentSource>) -> Self {
        Self {
            text: text.into(),
            start,
            kind: TemplateKind::CallExpression,
            fragments,
            interpolations: Vec::new(),
        }
    }

    /// Attach externally-resolved fragments.
    #[must_use]
    pub fn with_fragments(mut self, fragments: Vec<FragmentSource>) -> Self {
        self.fragments = fragments;
        self
    }

    /// Attach interpolations.
    #[must_use]
    pub fn with_interpolations(mut self, interpolations: Vec<Interpolation>) -> Self {
        self.interpolations = interpolations;
        self
    }

    /// Absolute offset of the literal body in the original file.
    ///
    /// Tag-style bodies start after the tag identifier and the opening
    /// delimiter; call-style sites locate the body directly.
    #[must_use]
    pub const fn body_start(&self, tag_len: usize) -> usize {
        match self.kind {
            TemplateKind::TaggedTemplate => self.start + tag_len + 1,
            TemplateKind::CallExpression => self.start,
        }
    }

    /// Absolute offset one past the end of the literal body.
    #[must_use]
    pub fn end_offset(&self, tag_len: usize) -> usize {
        self.body_start(tag_len) + self.text.len()
    }
}
