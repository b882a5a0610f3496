//! End-to-end tests of the diagnostic pipeline against a tracking stub
//! validator.

use std::sync::Arc;
use std::time::Duration;
use template_analysis::{
    DiagnosticEngine, DocumentValidator, FingerprintCache, HoverLookup, SchemaSnapshot,
};
use template_config::PluginConfig;
use template_resolve::{Cursor, DiscoverySite, Interpolation};
use template_test_utils::{fragment_source, raw_error, raw_range, ManualClock, TrackingValidator};
use template_types::{DiagnosticCode, OffsetRange, Severity};

const SCHEMA: &str = "type Query { me: User }\ntype User { id: ID, name: String }";

fn engine_with(validator: &Arc<TrackingValidator>, config: PluginConfig) -> DiagnosticEngine {
    DiagnosticEngine::new(
        Arc::clone(validator) as Arc<dyn DocumentValidator>,
        FingerprintCache::default(),
        config,
    )
}

#[test]
fn scenario_a_tagged_literal_diagnostic_lands_after_tag_and_delimiter() {
    // A two-line tagged literal preceded by 100 characters of unrelated
    // source; a diagnostic at the very start of the document must land at
    // 100 + (tag length + 1).
    let validator = Arc::new(TrackingValidator::with_diagnostics(vec![raw_error(
        raw_range(0, 0, 0, 5),
        "Cannot query field \"field\" on type \"Query\".",
    )]));
    let mut engine = engine_with(&validator, PluginConfig::default());

    let site = DiscoverySite::tagged("query Q {\n  field\n}", 100);
    let diagnostics =
        engine.file_diagnostics(&[site], &[], None, &SchemaSnapshot::new(SCHEMA, 1));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].range.start, 100 + "gql".len() + 1);
    assert_eq!(diagnostics[0].range.len(), 5);
    assert_eq!(diagnostics[0].code(), DiagnosticCode::Validation);
    assert_eq!(diagnostics[0].severity(), Severity::Error);
}

#[test]
fn scenario_b_call_style_diagnostic_lands_in_fragment_declaration() {
    // The call's own text is just a spread; the referenced three-line
    // fragment is declared 50 characters earlier in the file. A
    // diagnostic inside the inlined fragment body must land inside
    // [50, 50 + fragment length), not inside the call site.
    let fragment_text = "fragment Fields on User {\n  id\n}";
    let fragment = fragment_source("Fields", fragment_text, 50);

    // Combined text puts the fragment on lines 1..=3; report on line 2.
    let validator = Arc::new(TrackingValidator::with_diagnostics(vec![raw_error(
        raw_range(2, 2, 2, 4),
        "Cannot query field \"id\" on type \"User\".",
    )]));
    let mut engine = engine_with(
        &validator,
        PluginConfig {
            template_is_call_expression: true,
            ..PluginConfig::default()
        },
    );

    let site = DiscoverySite::call("query Q { me { ...Fields } }", 200, vec![fragment]);
    let diagnostics =
        engine.file_diagnostics(&[site], &[], None, &SchemaSnapshot::new(SCHEMA, 1));

    assert_eq!(diagnostics.len(), 1);
    let range = diagnostics[0].range;
    assert!(range.start >= 50, "start {range} not in fragment");
    assert!(range.end <= 50 + fragment_text.len(), "end {range} not in fragment");
}

#[test]
fn scenario_c_unnamed_operation_yields_exactly_one_structural_diagnostic() {
    let validator = Arc::new(TrackingValidator::with_diagnostics(vec![raw_error(
        raw_range(0, 8, 0, 10),
        "Cannot query field \"me\" on type \"Query\".",
    )]));
    let mut engine = engine_with(&validator, PluginConfig::default());

    let site = DiscoverySite::tagged("query { me }", 30);
    let diagnostics =
        engine.file_diagnostics(&[site], &[], None, &SchemaSnapshot::new(SCHEMA, 1));

    let structural: Vec<_> = diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.code() == DiagnosticCode::MissingOperationName)
        .collect();
    assert_eq!(structural.len(), 1);
    // Anchored at the literal's very start, regardless of validator output.
    assert_eq!(structural[0].range.start, 30);
    assert_eq!(structural[0].range.len(), "query { me }".len());
    assert_eq!(
        structural[0].message.as_ref(),
        "Operation needs a name for types to be generated."
    );
}

#[test]
fn scenario_d_schema_revision_bump_invalidates_cache() {
    let validator = Arc::new(TrackingValidator::new());
    let mut engine = engine_with(&validator, PluginConfig::default());
    let site = DiscoverySite::tagged("query Q { me { id } }", 0);

    engine.file_diagnostics(&[site.clone()], &[], None, &SchemaSnapshot::new(SCHEMA, 1));
    assert_eq!(validator.call_count(), 1);

    engine.file_diagnostics(&[site], &[], None, &SchemaSnapshot::new(SCHEMA, 2));
    assert_eq!(validator.call_count(), 2);
}

#[test]
fn cache_determinism_second_identical_request_skips_validator() {
    let validator = Arc::new(TrackingValidator::with_diagnostics(vec![raw_error(
        raw_range(0, 0, 0, 5),
        "some validation error",
    )]));
    let mut engine = engine_with(&validator, PluginConfig::default());
    let site = DiscoverySite::tagged("query Q { me { id } }", 10);
    let schema = SchemaSnapshot::new(SCHEMA, 7);

    let first = engine.file_diagnostics(&[site.clone()], &[], None, &schema);
    let second = engine.file_diagnostics(&[site], &[], None, &schema);

    assert_eq!(validator.call_count(), 1);
    assert_eq!(first, second);
}

#[test]
fn cache_ttl_expiry_forces_recomputation() {
    let clock = ManualClock::new();
    let validator = Arc::new(TrackingValidator::new());
    let mut engine = DiagnosticEngine::new(
        Arc::clone(&validator) as Arc<dyn DocumentValidator>,
        FingerprintCache::with_clock(100, Duration::from_secs(60), Box::new(clock.clone())),
        PluginConfig::default(),
    );
    let site = DiscoverySite::tagged("query Q { me { id } }", 0);
    let schema = SchemaSnapshot::new(SCHEMA, 1);

    engine.file_diagnostics(&[site.clone()], &[], None, &schema);
    engine.file_diagnostics(&[site.clone()], &[], None, &schema);
    assert_eq!(validator.call_count(), 1);

    clock.advance(Duration::from_secs(61));
    engine.file_diagnostics(&[site], &[], None, &schema);
    assert_eq!(validator.call_count(), 2);
}

#[test]
fn duplicate_fragment_is_not_passed_to_validator() {
    let validator = Arc::new(TrackingValidator::new());
    let mut engine = engine_with(
        &validator,
        PluginConfig {
            template_is_call_expression: true,
            ..PluginConfig::default()
        },
    );

    let external = fragment_source("F", "fragment F on User { name }", 400);
    let kept = fragment_source("G", "fragment G on User { id }", 500);
    let site = DiscoverySite::call(
        "query Q { me { ...F ...G } }\nfragment F on User { id }",
        0,
        vec![external, kept],
    );

    engine.file_diagnostics(&[site], &[], None, &SchemaSnapshot::new(SCHEMA, 1));

    let calls = validator.calls();
    assert_eq!(calls.len(), 1);
    // The call-site declaration of F wins; only G reaches the validator.
    assert_eq!(calls[0].fragment_names, vec!["G".to_string()]);
    assert!(!calls[0].text.contains("fragment F on User { name }"));
    assert!(calls[0].text.contains("fragment G on User { id }"));
}

#[test]
fn diagnostic_straddling_site_and_fragment_boundary_is_dropped() {
    // A range that starts inside the call text but ends inside a merged
    // fragment belongs to neither region and cannot be attributed.
    let fragment = fragment_source("Fields", "fragment Fields on User { id }", 600);
    let validator = Arc::new(TrackingValidator::with_diagnostics(vec![raw_error(
        raw_range(0, 14, 1, 2),
        "straddles the boundary between call text and merged fragment",
    )]));
    let mut engine = engine_with(
        &validator,
        PluginConfig {
            template_is_call_expression: true,
            ..PluginConfig::default()
        },
    );

    let site = DiscoverySite::call("query Q { me }", 200, vec![fragment]);
    let diagnostics =
        engine.file_diagnostics(&[site], &[], None, &SchemaSnapshot::new(SCHEMA, 1));

    assert!(diagnostics.is_empty());
}

#[test]
fn inlined_fragment_length_delta_is_corrected_for_trailing_diagnostics() {
    // `${F}` (4 characters) expands to a 27-character fragment, pushing
    // the rest of the document past the site's nominal end. A diagnostic
    // on the trailing `me` must be pulled back inside the literal.
    let body = "${F}\nquery Q { me }";
    let fragment_text = "fragment F on User {\n  id\n}";
    let site = DiscoverySite::tagged(body, 0)
        .with_fragments(vec![fragment_source("F", fragment_text, 300)])
        .with_interpolations(vec![Interpolation::new(OffsetRange::new(0, 4), "F")]);

    // In combined text the query sits on line 3 after the fragment.
    let validator = Arc::new(TrackingValidator::with_diagnostics(vec![raw_error(
        raw_range(3, 10, 3, 12),
        "Cannot query field \"me\" on type \"Query\".",
    )]));
    let mut engine = engine_with(&validator, PluginConfig::default());

    let diagnostics =
        engine.file_diagnostics(&[site], &[], None, &SchemaSnapshot::new(SCHEMA, 1));

    assert_eq!(diagnostics.len(), 1);
    let body_start = "gql".len() + 1;
    let expected_start = body_start + body.find("me").expect("me present");
    assert_eq!(diagnostics[0].range, OffsetRange::new(expected_start, expected_start + 2));
}

#[test]
fn client_only_directive_complaints_are_filtered() {
    let validator = Arc::new(TrackingValidator::with_diagnostics(vec![
        raw_error(raw_range(0, 0, 0, 7), "Unknown directive \"@client\"."),
        raw_error(raw_range(0, 0, 0, 7), "Unknown directive \"@unheard\"."),
    ]));
    let mut engine = engine_with(&validator, PluginConfig::default());

    let site = DiscoverySite::tagged("query Q { me @client }", 0);
    let diagnostics =
        engine.file_diagnostics(&[site], &[], None, &SchemaSnapshot::new(SCHEMA, 1));

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("@unheard"));
}

#[test]
fn missing_schema_skips_validation_but_keeps_structural_checks() {
    let validator = Arc::new(TrackingValidator::with_diagnostics(vec![raw_error(
        raw_range(0, 0, 0, 1),
        "never returned",
    )]));
    let mut engine = engine_with(&validator, PluginConfig::default());

    let site = DiscoverySite::tagged("query { me }", 0);
    let diagnostics = engine.file_diagnostics(&[site], &[], None, &SchemaSnapshot::absent());

    assert_eq!(validator.call_count(), 0);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), DiagnosticCode::MissingOperationName);
}

#[test]
fn warning_severity_maps_to_deprecated_field_code() {
    let validator = Arc::new(TrackingValidator::with_diagnostics(vec![
        template_analysis::RawDiagnostic {
            range: raw_range(0, 15, 0, 19),
            severity: Severity::Warning,
            code: None,
            message: "The field User.name is deprecated.".to_string(),
        },
    ]));
    let mut engine = engine_with(&validator, PluginConfig::default());

    let site = DiscoverySite::tagged("query Q { me { name } }", 0);
    let diagnostics =
        engine.file_diagnostics(&[site], &[], None, &SchemaSnapshot::new(SCHEMA, 1));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), DiagnosticCode::DeprecatedField);
    assert_eq!(diagnostics[0].severity(), Severity::Warning);
}

#[test]
fn quick_info_finds_owning_site() {
    struct FixedLookup;
    impl HoverLookup for FixedLookup {
        fn hover(&self, _text: &str, _schema: &str, cursor: Cursor) -> Option<Vec<Arc<str>>> {
            Some(vec![Arc::from(format!(
                "token at {}:{}",
                cursor.line, cursor.character
            ))])
        }
    }

    let validator = Arc::new(TrackingValidator::new());
    let engine = engine_with(&validator, PluginConfig::default());
    let schema = SchemaSnapshot::new(SCHEMA, 1);

    let first = DiscoverySite::tagged("query A { me }", 0);
    let second = DiscoverySite::tagged("query B {\n  me\n}", 100);
    let sites = [first, second];

    let tag_len = PluginConfig::default().tag_len();
    let offset = sites[1].body_start(tag_len) + 12;
    let info = engine
        .quick_info(&sites, &schema, &FixedLookup, offset)
        .expect("hover info");
    assert_eq!(info.offset, offset);
    assert_eq!(info.documentation[0].as_ref(), "token at 1:2");

    // Between the two sites there is nothing to hover.
    assert!(engine.quick_info(&sites, &schema, &FixedLookup, 50).is_none());
}
