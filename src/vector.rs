/*
 * PARC State Engine.
 *
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! The PARC vector and the normalization that enforces its invariants.
//!
//! - [`ParcVector`]: correctness, misconception, fog, confidence, all bounded.
//! - [`normalize`]: clamp + proportional rescale + fog rule, total over finite reals.
//! - [`clamp`]: the unit-interval clamp used everywhere in the engine.
//!
//! # Invariants
//!
//! Every [`ParcVector`] the engine hands out satisfies:
//!
//! - all four components lie in [0.0, 1.0];
//! - `c + m ≤ 1` (a shared certainty budget);
//! - `f = 1 − max(c, m)` (the fog rule).
//!
//! The fields are private: the only way to obtain a vector is through
//! [`normalize`] (directly, via the encoder, or via the updater) or through a
//! checked boundary conversion, so the invariants cannot be bypassed.

/// Tolerance used when comparing a supplied fog value against the fog rule.
///
/// The `c + m ≤ 1` budget has no tolerance: [`normalize`] keeps it exactly.
pub const FOG_TOLERANCE: f64 = 1e-6;

/// Clamp a value into [0.0, 1.0].
#[inline]
pub fn clamp(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Fog implied by a (correctness, misconception) pair: `1 − max(c, m)`.
#[inline]
pub fn fog_of(c: f64, m: f64) -> f64 {
    1.0 - c.max(m)
}

/// Bounded four-dimensional cognitive state.
///
/// | Field | Meaning | Range |
/// |-------|---------|-------|
/// | `c` | correctness | [0, 1] |
/// | `m` | misconception | [0, 1], with `c + m ≤ 1` |
/// | `f` | fog, always `1 − max(c, m)` | [0, 1] |
/// | `k` | confidence | [0, 1] |
///
/// `ParcVector` is a small `Copy` value. Every transformation produces a new
/// vector; nothing is mutated in place.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::record::VectorRecord")
)]
pub struct ParcVector {
    c: f64,
    m: f64,
    f: f64,
    k: f64,
}

impl ParcVector {
    /// The fully foggy state: no correctness, no misconception, fog 1.0,
    /// confidence `k` (clamped).
    pub fn foggy(k: f64) -> Self {
        normalize(0.0, 0.0, 1.0, k)
    }

    /// Correctness in [0.0, 1.0].
    #[inline]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Misconception in [0.0, 1.0].
    #[inline]
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Fog in [0.0, 1.0]; always `1 − max(c, m)`.
    #[inline]
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Confidence in [0.0, 1.0].
    #[inline]
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Components as a `(c, m, f, k)` tuple.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.c, self.m, self.f, self.k)
    }

    /// Components as a `[c, m, f, k]` array.
    pub fn to_array(&self) -> [f64; 4] {
        [self.c, self.m, self.f, self.k]
    }

    /// Gap between correctness and misconception, in [-1.0, 1.0].
    ///
    /// This is the target the confidence component is pulled toward by the
    /// temporal update.
    pub fn understanding_gap(&self) -> f64 {
        self.c - self.m
    }

    /// Round every component to `digits` decimal places for presentation.
    ///
    /// The result is a [`VectorRecord`](crate::record::VectorRecord), not a
    /// `ParcVector`: rounding can push `c + m` a hair past 1.0, so rounded
    /// values are for display and wire output only.
    #[cfg(feature = "std")]
    pub fn rounded(&self, digits: u32) -> crate::record::VectorRecord {
        let scale = 10f64.powi(digits as i32);
        let r = |x: f64| (x * scale).round() / scale;
        crate::record::VectorRecord {
            c: Some(r(self.c)),
            m: Some(r(self.m)),
            f: Some(r(self.f)),
            k: Some(r(self.k)),
        }
    }
}

impl Default for ParcVector {
    /// Fully foggy with zero confidence.
    fn default() -> Self {
        Self::foggy(0.0)
    }
}

impl core::fmt::Display for ParcVector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "(c={:.4}, m={:.4}, f={:.4}, k={:.4})",
            self.c, self.m, self.f, self.k
        )
    }
}

/// Enforce the PARC invariants on a raw `(c0, m0, f0, k0)` tuple.
///
/// ```text
/// c, m, k  ← clamp to [0, 1]
/// if c + m > 1:  c, m ← c / (c + m), m / (c + m)     (ratio preserved)
/// f        ← 1 − max(c, m)                          (f0 is ignored)
/// ```
///
/// Total over finite inputs and pure. Non-finite inputs are rejected at the
/// boundary (see [`crate::record`]) before they reach the engine.
pub fn normalize(c0: f64, m0: f64, _f0: f64, k0: f64) -> ParcVector {
    let mut c = clamp(c0);
    let mut m = clamp(m0);
    let k = clamp(k0);

    let total = c + m;
    if total > 1.0 {
        c /= total;
        m /= total;
        // Division can leave the sum one ulp above 1. Re-derive the smaller
        // share from the larger (>= 0.5, so 1 - larger is exact).
        if c + m > 1.0 {
            if c >= m {
                m = 1.0 - c;
            } else {
                c = 1.0 - m;
            }
        }
        tracing::debug!(total, c, m, "rescaled certainty budget");
    }

    ParcVector {
        c,
        m,
        f: fog_of(c, m),
        k,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(v: &ParcVector) {
        for x in v.to_array() {
            assert!((0.0..=1.0).contains(&x), "component out of range: {}", v);
        }
        assert!(v.c() + v.m() <= 1.0, "budget exceeded: {}", v);
        assert!(
            (v.f() - (1.0 - v.c().max(v.m()))).abs() <= FOG_TOLERANCE,
            "fog rule broken: {}",
            v
        );
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(-3.0), 0.0);
        assert_eq!(clamp(0.25), 0.25);
        assert_eq!(clamp(7.5), 1.0);
    }

    #[test]
    fn test_normalize_in_range_passthrough() {
        let v = normalize(0.4, 0.2, 0.99, 0.7);
        assert!((v.c() - 0.4).abs() < 1e-12);
        assert!((v.m() - 0.2).abs() < 1e-12);
        assert!((v.k() - 0.7).abs() < 1e-12);
        // f0 is ignored, fog recomputed from c and m
        assert!((v.f() - 0.6).abs() < 1e-12, "f={}", v.f());
    }

    #[test]
    fn test_normalize_clamps_each_component() {
        let v = normalize(-0.5, 2.0, -9.0, 3.0);
        assert_eq!(v.c(), 0.0);
        assert_eq!(v.m(), 1.0);
        assert_eq!(v.f(), 0.0);
        assert_eq!(v.k(), 1.0);
        assert_invariants(&v);
    }

    #[test]
    fn test_normalize_rescales_preserving_ratio() {
        let v = normalize(0.9, 0.6, 0.0, 0.5);
        assert!((v.c() + v.m() - 1.0).abs() < 1e-12, "sum={}", v.c() + v.m());
        assert!((v.c() / v.m() - 0.9 / 0.6).abs() < 1e-9, "ratio changed: {}", v);
        assert!((v.f() - (1.0 - v.c())).abs() < 1e-12);
        assert_invariants(&v);
    }

    #[test]
    fn test_normalize_rescale_after_clamp() {
        // Clamped to (1.0, 1.0) first, then split evenly.
        let v = normalize(4.0, 1.5, 0.0, 0.0);
        assert!((v.c() - 0.5).abs() < 1e-12);
        assert!((v.m() - 0.5).abs() < 1e-12);
        assert!((v.f() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_budget_exactly_one_untouched() {
        let v = normalize(0.75, 0.25, 0.0, 0.1);
        assert_eq!(v.c(), 0.75);
        assert_eq!(v.m(), 0.25);
        assert_eq!(v.f(), 0.25);
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs: &[(f64, f64, f64, f64)] = &[
            (0.0, 0.0, 0.0, 0.0),
            (0.3, 0.3, 0.4, 0.9),
            (1.4, 0.9, 0.0, -0.2),
            (0.6, 0.7, 0.5, 0.5),
            (-1.0, -1.0, 2.0, 2.0),
        ];
        for &(c, m, f, k) in inputs {
            let once = normalize(c, m, f, k);
            let (c1, m1, f1, k1) = once.as_tuple();
            let twice = normalize(c1, m1, f1, k1);
            assert_eq!(once, twice, "not idempotent for {:?}", (c, m, f, k));
        }
    }

    #[test]
    fn test_foggy_and_default() {
        let v = ParcVector::foggy(0.4);
        assert_eq!(v.as_tuple(), (0.0, 0.0, 1.0, 0.4));
        assert_eq!(ParcVector::default().as_tuple(), (0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_understanding_gap() {
        let v = normalize(0.6, 0.1, 0.0, 0.0);
        assert!((v.understanding_gap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_display_four_decimals() {
        let v = normalize(0.5, 0.25, 0.0, 1.0);
        assert_eq!(
            std::format!("{}", v),
            "(c=0.5000, m=0.2500, f=0.5000, k=1.0000)"
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_rounded_four_places() {
        let v = normalize(1.0 / 3.0, 0.1, 0.0, 2.0 / 3.0);
        let r = v.rounded(4);
        assert_eq!(r.c, Some(0.3333));
        assert_eq!(r.m, Some(0.1));
        assert_eq!(r.f, Some(0.6667));
        assert_eq!(r.k, Some(0.6667));
    }
}
