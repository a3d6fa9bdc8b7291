//! Interpretation of a PARC state.
//!
//! - [`DiagnosisThresholds`]: configurable cut-offs for each reading.
//! - [`Diagnosis`]: the four readings of a vector, checked in priority order.
//!
//! ```text
//! priority │ diagnosis          │ condition (defaults)
//! ─────────┼────────────────────┼──────────────────────────
//!    1     │ ConfidentlyWrong   │ m > 0.3  and  k > 0.6
//!    2     │ Foggy              │ f > 0.4
//!    3     │ Understood         │ c > 0.7  and  m < 0.2
//!    4     │ Mixed              │ otherwise
//! ```
//!
//! Confidently-wrong is checked first: a learner who is sure of a
//! misconception is the highest-risk state regardless of fog.

use crate::error::{ParcError, Result};
use crate::vector::ParcVector;

/// Cut-offs used by [`Diagnosis::classify`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiagnosisThresholds {
    /// Misconception above which a confident learner is flagged. Default 0.3.
    pub risk_misconception: f64,
    /// Confidence above which a misconceived learner is flagged. Default 0.6.
    pub risk_confidence: f64,
    /// Fog above which the state reads as uncertain. Default 0.4.
    pub fog_high: f64,
    /// Correctness above which understanding is strong. Default 0.7.
    pub understood_correctness: f64,
    /// Misconception below which understanding is strong. Default 0.2.
    pub understood_misconception: f64,
}

impl DiagnosisThresholds {
    /// Construct the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every threshold is finite and in [0.0, 1.0].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("risk_misconception", self.risk_misconception),
            ("risk_confidence", self.risk_confidence),
            ("fog_high", self.fog_high),
            ("understood_correctness", self.understood_correctness),
            ("understood_misconception", self.understood_misconception),
        ] {
            if !(0.0..=1.0).contains(&value) {
                tracing::warn!(name, value, "rejected diagnosis threshold");
                return Err(ParcError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

impl Default for DiagnosisThresholds {
    fn default() -> Self {
        Self {
            risk_misconception: 0.3,
            risk_confidence: 0.6,
            fog_high: 0.4,
            understood_correctness: 0.7,
            understood_misconception: 0.2,
        }
    }
}

/// Reading of a PARC state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnosis {
    /// High misconception held with high confidence.
    ConfidentlyWrong,
    /// Mostly fog: uncertain or incomplete reasoning.
    Foggy,
    /// High correctness, low misconception.
    Understood,
    /// Partial understanding with some noise.
    Mixed,
}

impl Diagnosis {
    /// Classify `v` against `t`.
    pub fn classify(v: &ParcVector, t: &DiagnosisThresholds) -> Diagnosis {
        if v.m() > t.risk_misconception && v.k() > t.risk_confidence {
            Diagnosis::ConfidentlyWrong
        } else if v.f() > t.fog_high {
            Diagnosis::Foggy
        } else if v.c() > t.understood_correctness && v.m() < t.understood_misconception {
            Diagnosis::Understood
        } else {
            Diagnosis::Mixed
        }
    }

    /// One-line description of the reading.
    pub fn summary(&self) -> &'static str {
        match self {
            Diagnosis::ConfidentlyWrong => "High-risk: confidently wrong (high m, high k).",
            Diagnosis::Foggy => "High fog: learner is uncertain / incomplete.",
            Diagnosis::Understood => "Strong understanding with low misconception.",
            Diagnosis::Mixed => "Mixed state: partial understanding with some noise.",
        }
    }

    /// Whether the reading calls for intervention.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Diagnosis::ConfidentlyWrong | Diagnosis::Foggy)
    }
}

impl core::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.summary())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::normalize;

    fn classify(c: f64, m: f64, k: f64) -> Diagnosis {
        Diagnosis::classify(&normalize(c, m, 0.0, k), &DiagnosisThresholds::default())
    }

    #[test]
    fn test_default_thresholds() {
        let t = DiagnosisThresholds::default();
        assert_eq!(t.risk_misconception, 0.3);
        assert_eq!(t.risk_confidence, 0.6);
        assert_eq!(t.fog_high, 0.4);
        assert_eq!(t.understood_correctness, 0.7);
        assert_eq!(t.understood_misconception, 0.2);
    }

    #[test]
    fn test_validate_thresholds() {
        assert!(DiagnosisThresholds::default().validate().is_ok());
        let t = DiagnosisThresholds { fog_high: 1.5, ..DiagnosisThresholds::default() };
        assert_eq!(
            t.validate(),
            Err(ParcError::InvalidParameter { name: "fog_high", value: 1.5 })
        );
        let t = DiagnosisThresholds {
            risk_confidence: f64::NAN,
            ..DiagnosisThresholds::default()
        };
        assert!(matches!(
            t.validate(),
            Err(ParcError::InvalidParameter { name: "risk_confidence", .. })
        ));
    }

    #[test]
    fn test_full_sweep_with_default_thresholds() {
        let cases: &[(f64, f64, f64, Diagnosis)] = &[
            // m 0.7 with k 0.9: confidently wrong even though fog is low
            (0.1, 0.7, 0.9, Diagnosis::ConfidentlyWrong),
            // same m with low confidence: fog 0.3, c low -> mixed
            (0.1, 0.7, 0.2, Diagnosis::Mixed),
            // nothing known
            (0.0, 0.0, 0.5, Diagnosis::Foggy),
            (0.9, 0.05, 0.8, Diagnosis::Understood),
            // c high but m too high for "understood"
            (0.75, 0.25, 0.1, Diagnosis::Mixed),
            // c exactly at threshold is not strictly above
            (0.7, 0.0, 0.5, Diagnosis::Mixed),
        ];
        for &(c, m, k, expected) in cases {
            assert_eq!(
                classify(c, m, k),
                expected,
                "c={} m={} k={}",
                c,
                m,
                k
            );
        }
    }

    #[test]
    fn test_risk_takes_priority_over_fog() {
        // m 0.35 -> fog 0.65, but confidence is high
        assert_eq!(classify(0.0, 0.35, 0.95), Diagnosis::ConfidentlyWrong);
        assert_eq!(classify(0.0, 0.35, 0.5), Diagnosis::Foggy);
    }

    #[test]
    fn test_custom_thresholds_stricter() {
        let strict = DiagnosisThresholds {
            understood_correctness: 0.95,
            ..DiagnosisThresholds::default()
        };
        let v = normalize(0.9, 0.05, 0.0, 0.8);
        assert_eq!(Diagnosis::classify(&v, &strict), Diagnosis::Mixed);
        assert_eq!(
            Diagnosis::classify(&v, &DiagnosisThresholds::default()),
            Diagnosis::Understood
        );
    }

    #[test]
    fn test_needs_attention() {
        assert!(Diagnosis::ConfidentlyWrong.needs_attention());
        assert!(Diagnosis::Foggy.needs_attention());
        assert!(!Diagnosis::Understood.needs_attention());
        assert!(!Diagnosis::Mixed.needs_attention());
    }

    #[test]
    fn test_summaries_distinct() {
        let all = [
            Diagnosis::ConfidentlyWrong,
            Diagnosis::Foggy,
            Diagnosis::Understood,
            Diagnosis::Mixed,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.summary(), b.summary());
            }
        }
    }
}
