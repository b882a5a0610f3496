//! Speculative parses over embedded-document text.
//!
//! These parses exist only to answer structural questions (which fragments
//! does this literal declare? is its single operation unnamed?). A text
//! that fails to parse is not an error at this layer: the failure branch
//! is explicit so callers treat it as "condition not met" and leave syntax
//! reporting to the validator.

use apollo_parser::{cst, Parser};
use std::collections::HashSet;

/// Outcome of a speculative parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeculativeParse<T> {
    /// The text parsed without syntax errors.
    Parsed(T),
    /// The text has syntax errors; the question is unanswerable.
    Failed,
}

impl<T> SpeculativeParse<T> {
    /// The parsed value, or `fallback` on failure.
    #[must_use]
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Parsed(value) => value,
            Self::Failed => fallback,
        }
    }
}

fn parse_clean(text: &str) -> SpeculativeParse<cst::Document> {
    let tree = Parser::new(text).parse();
    if tree.errors().next().is_some() {
        return SpeculativeParse::Failed;
    }
    SpeculativeParse::Parsed(tree.document())
}

/// Names of fragments the text itself declares.
#[must_use]
pub fn declared_fragment_names(text: &str) -> SpeculativeParse<HashSet<String>> {
    let document = match parse_clean(text) {
        SpeculativeParse::Parsed(document) => document,
        SpeculativeParse::Failed => return SpeculativeParse::Failed,
    };

    let mut names = HashSet::new();
    for definition in document.definitions() {
        if let cst::Definition::FragmentDefinition(fragment) = definition {
            if let Some(name) = fragment
                .fragment_name()
                .and_then(|fragment_name| fragment_name.name())
            {
                names.insert(name.text().to_string());
            }
        }
    }
    SpeculativeParse::Parsed(names)
}

/// Whether the text contains an operation definition and the first one
/// lacks a name.
#[must_use]
pub fn has_unnamed_operation(text: &str) -> SpeculativeParse<bool> {
    let document = match parse_clean(text) {
        SpeculativeParse::Parsed(document) => document,
        SpeculativeParse::Failed => return SpeculativeParse::Failed,
    };

    let first_operation = document.definitions().find_map(|definition| {
        if let cst::Definition::OperationDefinition(operation) = definition {
            Some(operation)
        } else {
            None
        }
    });

    SpeculativeParse::Parsed(first_operation.is_some_and(|operation| operation.name().is_none()))
}

/// Whether the text parses to a non-empty document made up solely of
/// fragment definitions.
#[must_use]
pub fn is_fragment_only_document(text: &str) -> SpeculativeParse<bool> {
    let document = match parse_clean(text) {
        SpeculativeParse::Parsed(document) => document,
        SpeculativeParse::Failed => return SpeculativeParse::Failed,
    };

    let mut definitions = document.definitions().peekable();
    if definitions.peek().is_none() {
        return SpeculativeParse::Parsed(false);
    }
    SpeculativeParse::Parsed(
        definitions.all(|definition| matches!(definition, cst::Definition::FragmentDefinition(_))),
    )
}
