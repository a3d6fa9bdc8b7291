/*
 * PARC State Engine.
 *
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Validation of externally supplied vectors.
//!
//! [`validate`] reports; it never corrects. Every applicable check runs and
//! every failure is recorded, in a fixed order:
//!
//! 1. presence of `c`, `m`, `f`, `k` (a missing field is skipped afterwards);
//! 2. each present field in [0, 1];
//! 3. `c + m ≤ 1`, exactly (no tolerance);
//! 4. `f = 1 − max(c, m)` within [`FOG_TOLERANCE`].
//!
//! The report stores structured [`ValidationIssue`]s in a fixed-capacity
//! buffer: at most one issue per field plus the two cross-field checks, so
//! validation itself never allocates.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::record::VectorRecord;
use crate::vector::{fog_of, FOG_TOLERANCE};

/// Capacity of the issue buffer: one per field, plus budget and fog checks.
pub const MAX_ISSUES: usize = 6;

/// A single validation failure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValidationIssue {
    /// A required field is absent.
    MissingField(&'static str),
    /// A field lies outside [0, 1] (NaN included).
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// The supplied value.
        value: f64,
    },
    /// `c + m` exceeds 1.
    BudgetExceeded {
        /// The supplied `c + m`.
        sum: f64,
    },
    /// `f` does not equal `1 − max(c, m)`.
    FogRule {
        /// The supplied fog.
        supplied: f64,
        /// The fog implied by `c` and `m`.
        expected: f64,
    },
}

impl core::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ValidationIssue::MissingField(name) => write!(f, "missing field: {}", name),
            ValidationIssue::OutOfRange { field, value } => {
                write!(f, "{} out of range [0, 1]: {}", field, value)
            }
            ValidationIssue::BudgetExceeded { .. } => f.write_str("c + m must not exceed 1"),
            ValidationIssue::FogRule { .. } => f.write_str("fog must equal 1 - max(c,m)"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationIssue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of [`validate`]: `valid` is true iff `errors` is empty.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationReport {
    /// Whether the candidate satisfies every check.
    pub valid: bool,
    /// Failures in check order.
    pub errors: heapless::Vec<ValidationIssue, MAX_ISSUES>,
}

impl ValidationReport {
    /// Diagnostic strings in check order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Whether any recorded issue matches `pred`.
    pub fn has(&self, pred: impl Fn(&ValidationIssue) -> bool) -> bool {
        self.errors.iter().any(pred)
    }

    fn record(&mut self, issue: ValidationIssue) {
        if let Err(dropped) = self.errors.push(issue) {
            tracing::error!(capacity = MAX_ISSUES, issue = %dropped, "dropped validation issue");
            #[cfg(debug_assertions)]
            panic!("validation issue buffer full, dropped {}", dropped);
        }
    }
}

/// Check a caller-supplied record against the PARC invariants.
pub fn validate(candidate: &VectorRecord) -> ValidationReport {
    let mut report = ValidationReport::default();

    let fields = candidate.fields();
    for (name, value) in fields {
        if value.is_none() {
            report.record(ValidationIssue::MissingField(name));
        }
    }

    for (name, value) in fields {
        if let Some(value) = value {
            if !(0.0..=1.0).contains(&value) {
                report.record(ValidationIssue::OutOfRange { field: name, value });
            }
        }
    }

    if let (Some(c), Some(m)) = (candidate.c, candidate.m) {
        let sum = c + m;
        if !(sum <= 1.0) {
            report.record(ValidationIssue::BudgetExceeded { sum });
        }

        if let Some(f) = candidate.f {
            let expected = fog_of(c, m);
            let diff = f - expected;
            if !(-FOG_TOLERANCE..=FOG_TOLERANCE).contains(&diff) {
                report.record(ValidationIssue::FogRule {
                    supplied: f,
                    expected,
                });
            }
        }
    }

    report.valid = report.errors.is_empty();
    if !report.valid {
        tracing::debug!(issues = report.errors.len(), "vector failed validation");
    }
    report
}

// ─── Tests ──────────────────────────────────────────────────────────────────
