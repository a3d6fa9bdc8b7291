//! Fixed-shape boundary records.
//!
//! Callers (an HTTP layer, a CLI, the Python bindings) hand the engine
//! field-keyed data. These records give that data a fixed shape with named
//! numeric fields, and the conversions here are the single place where it is
//! checked before entering the core.
//!
//! - [`VectorRecord`]: a vector whose fields may be missing; the validator's input.
//! - [`ParamsRecord`]: update parameters whose fields fall back to defaults.
//! - [`steps_from_signed`] and [`confidence_hint`]: scalar checks.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::dynamics::UpdateParams;
use crate::error::{ParcError, Result};
use crate::validate::validate;
use crate::vector::{normalize, ParcVector};

/// A possibly incomplete PARC vector as supplied by a caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorRecord {
    /// Correctness.
    #[cfg_attr(feature = "serde", serde(default))]
    pub c: Option<f64>,
    /// Misconception.
    #[cfg_attr(feature = "serde", serde(default))]
    pub m: Option<f64>,
    /// Fog.
    #[cfg_attr(feature = "serde", serde(default))]
    pub f: Option<f64>,
    /// Confidence.
    #[cfg_attr(feature = "serde", serde(default))]
    pub k: Option<f64>,
}

impl VectorRecord {
    /// A record with all four fields present.
    pub fn new(c: f64, m: f64, f: f64, k: f64) -> Self {
        Self {
            c: Some(c),
            m: Some(m),
            f: Some(f),
            k: Some(k),
        }
    }

    /// Fields in canonical order, paired with their names.
    pub fn fields(&self) -> [(&'static str, Option<f64>); 4] {
        [("c", self.c), ("m", self.m), ("f", self.f), ("k", self.k)]
    }

    /// Lenient conversion: missing fields become 0.0 and the result is
    /// normalized rather than validated.
    ///
    /// Rejects non-finite values, which normalization cannot repair.
    pub fn normalized(&self) -> Result<ParcVector> {
        for (field, value) in self.fields() {
            if let Some(value) = value {
                if !value.is_finite() {
                    tracing::warn!(field, value, "rejected non-finite vector field");
                    return Err(ParcError::NonFinite { field, value });
                }
            }
        }
        Ok(normalize(
            self.c.unwrap_or(0.0),
            self.m.unwrap_or(0.0),
            self.f.unwrap_or(0.0),
            self.k.unwrap_or(0.0),
        ))
    }
}

impl From<ParcVector> for VectorRecord {
    fn from(v: ParcVector) -> Self {
        Self::new(v.c(), v.m(), v.f(), v.k())
    }
}

impl TryFrom<VectorRecord> for ParcVector {
    type Error = ParcError;

    /// Strict conversion: the record must pass [`validate`] unchanged.
    fn try_from(record: VectorRecord) -> Result<Self> {
        let report = validate(&record);
        if !report.valid {
            let messages: Vec<_> = report.errors.iter().map(|e| e.to_string()).collect();
            tracing::warn!(errors = messages.len(), "rejected invalid vector record");
            return Err(ParcError::InvalidVector(messages));
        }
        // Valid records are already normalized; pass the supplied f through
        // normalize so fog is recomputed exactly rather than within tolerance.
        Ok(normalize(
            record.c.unwrap_or_default(),
            record.m.unwrap_or_default(),
            record.f.unwrap_or_default(),
            record.k.unwrap_or_default(),
        ))
    }
}

/// Update parameters as supplied by a caller. Missing fields take the
/// defaults of [`UpdateParams`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamsRecord {
    /// Learning rate for correctness.
    #[cfg_attr(feature = "serde", serde(default))]
    pub gamma: Option<f64>,
    /// Base decay rate for misconception.
    #[cfg_attr(feature = "serde", serde(default))]
    pub delta: Option<f64>,
    /// Extra misconception decay per unit of correctness.
    #[cfg_attr(feature = "serde", serde(default))]
    pub beta: Option<f64>,
    /// Confidence tracking rate.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rho: Option<f64>,
}

impl ParamsRecord {
    /// Fill in defaults and check the resulting parameters.
    pub fn into_params(self) -> Result<UpdateParams> {
        let d = UpdateParams::default();
        let params = UpdateParams {
            gamma: self.gamma.unwrap_or(d.gamma),
            delta: self.delta.unwrap_or(d.delta),
            beta: self.beta.unwrap_or(d.beta),
            rho: self.rho.unwrap_or(d.rho),
        };
        params.validate()?;
        Ok(params)
    }
}

impl From<UpdateParams> for ParamsRecord {
    fn from(p: UpdateParams) -> Self {
        Self {
            gamma: Some(p.gamma),
            delta: Some(p.delta),
            beta: Some(p.beta),
            rho: Some(p.rho),
        }
    }
}

/// Convert a signed step count from the caller into the engine's unsigned count.
///
/// Negative counts are rejected, never reinterpreted.
pub fn steps_from_signed(steps: i64) -> Result<u32> {
    if steps < 0 {
        tracing::warn!(steps, "rejected negative step count");
        return Err(ParcError::NegativeSteps(steps));
    }
    u32::try_from(steps).map_err(|_| ParcError::StepsOverflow(steps))
}

/// Check an optional confidence hint. Out-of-range hints are allowed (they
/// are clamped by normalization); non-finite hints are rejected.
pub fn confidence_hint(hint: Option<f64>) -> Result<Option<f64>> {
    match hint {
        Some(value) if !value.is_finite() => {
            tracing::warn!(value, "rejected non-finite confidence hint");
            Err(ParcError::NonFinite {
                field: "confidence_hint",
                value,
            })
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_conversion_accepts_valid_record() {
        let v = ParcVector::try_from(VectorRecord::new(0.5, 0.3, 0.5, 0.5)).unwrap();
        assert_eq!(v.as_tuple(), (0.5, 0.3, 0.5, 0.5));
    }

    #[test]
    fn test_strict_conversion_rejects_fog_violation() {
        let err = ParcVector::try_from(VectorRecord::new(0.5, 0.3, 0.2, 0.5)).unwrap_err();
        match err {
            ParcError::InvalidVector(messages) => {
                assert_eq!(messages, ["fog must equal 1 - max(c,m)"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_strict_conversion_rejects_missing_fields() {
        let record = VectorRecord {
            c: Some(0.2),
            ..VectorRecord::default()
        };
        assert!(matches!(
            ParcVector::try_from(record),
            Err(ParcError::InvalidVector(ref m)) if m.len() == 3
        ));
    }

    #[test]
    fn test_lenient_conversion_normalizes() {
        let record = VectorRecord {
            c: Some(0.9),
            m: Some(0.9),
            f: None,
            k: Some(1.4),
        };
        let v = record.normalized().unwrap();
        assert!((v.c() - 0.5).abs() < 1e-12);
        assert!((v.m() - 0.5).abs() < 1e-12);
        assert_eq!(v.k(), 1.0);
    }

    #[test]
    fn test_lenient_conversion_rejects_nan() {
        let record = VectorRecord::new(f64::NAN, 0.0, 1.0, 0.0);
        assert!(matches!(
            record.normalized(),
            Err(ParcError::NonFinite { field: "c", .. })
        ));
    }

    #[test]
    fn test_vector_to_record_round_trip() {
        let v = normalize(0.2, 0.1, 0.0, 0.6);
        let back = ParcVector::try_from(VectorRecord::from(v)).unwrap();
        assert_eq!(v, back);
    }

    #[test]
    fn test_params_record_defaults_and_overrides() {
        let p = ParamsRecord::default().into_params().unwrap();
        assert_eq!(p, UpdateParams::default());

        let p = ParamsRecord {
            gamma: Some(0.9),
            ..ParamsRecord::default()
        }
        .into_params()
        .unwrap();
        assert_eq!(p.gamma, 0.9);
        assert_eq!(p.rho, 0.5);
    }

    #[test]
    fn test_params_record_rejects_out_of_range() {
        let err = ParamsRecord {
            beta: Some(-0.1),
            ..ParamsRecord::default()
        }
        .into_params()
        .unwrap_err();
        assert_eq!(err, ParcError::InvalidParameter { name: "beta", value: -0.1 });
    }

    #[test]
    fn test_steps_from_signed() {
        assert_eq!(steps_from_signed(0), Ok(0));
        assert_eq!(steps_from_signed(3), Ok(3));
        assert_eq!(steps_from_signed(-1), Err(ParcError::NegativeSteps(-1)));
        assert_eq!(
            steps_from_signed(i64::MAX),
            Err(ParcError::StepsOverflow(i64::MAX))
        );
    }

    #[test]
    fn test_confidence_hint_checks() {
        assert_eq!(confidence_hint(None), Ok(None));
        assert_eq!(confidence_hint(Some(1.7)), Ok(Some(1.7)));
        assert!(confidence_hint(Some(f64::INFINITY)).is_err());
    }
}
