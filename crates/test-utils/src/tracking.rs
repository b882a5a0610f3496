//! Execution tracking for the validator seam.

use std::sync::Mutex;
use template_analysis::{DocumentValidator, RawDiagnostic};
use template_resolve::FragmentSource;

/// Record of one validator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorCall {
    /// The combined text the validator was asked to validate.
    pub text: String,
    /// Names of the external fragments it received.
    pub fragment_names: Vec<String>,
}

/// A stub [`DocumentValidator`] that returns canned diagnostics and
/// records every invocation, so tests can assert that the cache actually
/// short-circuits recomputation.
#[derive(Debug, Default)]
pub struct TrackingValidator {
    responses: Vec<RawDiagnostic>,
    calls: Mutex<Vec<ValidatorCall>>,
}

impl TrackingValidator {
    /// A validator that always reports nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator that reports `responses` on every invocation.
    #[must_use]
    pub fn with_diagnostics(responses: Vec<RawDiagnostic>) -> Self {
        Self {
            responses,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of times `validate` has run.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log mutex poisoned").len()
    }

    /// Every recorded invocation, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ValidatorCall> {
        self.calls.lock().expect("call log mutex poisoned").clone()
    }
}

impl DocumentValidator for TrackingValidator {
    fn validate(
        &self,
        text: &str,
        _schema: &str,
        fragments: &[FragmentSource],
    ) -> Vec<RawDiagnostic> {
        self.calls
            .lock()
            .expect("call log mutex poisoned")
            .push(ValidatorCall {
                text: text.to_string(),
                fragment_names: fragments
                    .iter()
                    .map(|fragment| fragment.name.to_string())
                    .collect(),
            });
        self.responses.clone()
    }
}
