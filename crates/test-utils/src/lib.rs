//! Shared test helpers.
//!
//! The engine's cache behavior is observable only indirectly, so tests
//! need a validator that counts its own executions (cold request runs it,
//! warm request must not) and a clock that only advances when told to.

mod clock;
mod tracking;

pub use clock::ManualClock;
pub use tracking::TrackingValidator;

use template_resolve::FragmentSource;
use template_types::{OffsetRange, Position, Range, Severity};

/// Initialize test logging from `RUST_LOG`. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a fragment source whose location is derived from its text length.
#[must_use]
pub fn fragment_source(name: &str, text: &str, declared_at: usize) -> FragmentSource {
    FragmentSource::new(
        name,
        text,
        OffsetRange::new(declared_at, declared_at + text.len()),
    )
}

/// Build a raw validator diagnostic range from line/column pairs.
#[must_use]
pub const fn raw_range(
    start_line: u32,
    start_character: u32,
    end_line: u32,
    end_character: u32,
) -> Range {
    Range::new(
        Position::new(start_line, start_character),
        Position::new(end_line, end_character),
    )
}

/// Build an error-severity raw diagnostic.
#[must_use]
pub fn raw_error(range: Range, message: &str) -> template_analysis::RawDiagnostic {
    template_analysis::RawDiagnostic {
        range,
        severity: Severity::Error,
        code: None,
        message: message.to_string(),
    }
}
