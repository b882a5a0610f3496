//! Template resolution and position mapping for embedded GraphQL documents.
//!
//! A source file contains embedded GraphQL inside string literals. Before a
//! document can be validated it has to be *resolved*: the literal's own text
//! is combined with the text of fragments referenced from elsewhere, and a
//! span map records how regions of the combined text correspond to regions
//! of the original file. The span map is what lets diagnostics and hover
//! lookups stay exact to the character even though validation runs against
//! text that never appears verbatim in the file.

mod cursor;
mod position;
mod resolver;
mod site;
mod span;
mod speculative;

pub use cursor::{map_cursor, Cursor};
pub use position::{offset_at, offset_to_line_col};
pub use resolver::{resolve_template, ResolvedTemplate};
pub use site::{DiscoverySite, FragmentSource, Interpolation, TemplateKind};
pub use span::{SpanEntry, SpanMap};
pub use speculative::{
    declared_fragment_names, has_unnamed_operation, is_fragment_only_document, SpeculativeParse,
};
