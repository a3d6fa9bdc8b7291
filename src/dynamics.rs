/*
 * PARC State Engine.
 *
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Temporal update: discrete learning dynamics over a [`ParcVector`].
//!
//! Each step applies the effective-rate rule:
//!
//! ```text
//! gamma_eff = gamma · (1 − m)             learning is dampened by misconception
//! delta_eff = delta + beta · c            correctness accelerates unlearning
//!
//! c' = c + gamma_eff · (1 − c − m)        correctness saturates into remaining room
//! m' = m · (1 − delta_eff)                misconception decays
//! k' = k + rho · ((c' − m') − k)          confidence tracks the understanding gap
//!
//! (c', m', f', k') = normalize(c', m', ·, k')
//! ```
//!
//! Normalization runs after *every* step, so the vector invariants hold for
//! each intermediate state, not only the final one. Zero steps is a no-op.
//!
//! The step count is unsigned: negative counts are rejected at the boundary
//! (see [`crate::record::steps_from_signed`]) and never reach this module.

use crate::error::{ParcError, Result};
use crate::vector::{normalize, ParcVector};

/// Default learning rate for correctness.
pub const DEFAULT_GAMMA: f64 = 0.3;
/// Default base decay rate for misconception.
pub const DEFAULT_DELTA: f64 = 0.1;
/// Default extra misconception decay per unit of correctness.
pub const DEFAULT_BETA: f64 = 0.5;
/// Default confidence tracking rate.
pub const DEFAULT_RHO: f64 = 0.5;

/// Parameters of the temporal update.
///
/// All four are rates in [0.0, 1.0]. They shape how fast the state moves,
/// never the invariants it lands in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UpdateParams {
    /// Learning rate for correctness. Default 0.3.
    pub gamma: f64,
    /// Base decay rate for misconception. Default 0.1.
    pub delta: f64,
    /// Interaction term: how strongly correctness suppresses misconception.
    /// Default 0.5.
    pub beta: f64,
    /// Rate at which confidence moves toward `c − m`. Default 0.5.
    pub rho: f64,
}

impl UpdateParams {
    /// Construct the default parameters (0.3 / 0.1 / 0.5 / 0.5).
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every parameter is finite and in [0.0, 1.0].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("gamma", self.gamma),
            ("delta", self.delta),
            ("beta", self.beta),
            ("rho", self.rho),
        ] {
            if !(0.0..=1.0).contains(&value) {
                tracing::warn!(name, value, "rejected update parameter");
                return Err(ParcError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Learning rate after misconception dampening: `gamma · (1 − m)`.
    #[inline]
    pub fn effective_gamma(&self, m: f64) -> f64 {
        self.gamma * (1.0 - m)
    }

    /// Misconception decay after correctness reinforcement: `delta + beta · c`.
    #[inline]
    pub fn effective_delta(&self, c: f64) -> f64 {
        self.delta + self.beta * c
    }
}

impl Default for UpdateParams {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            delta: DEFAULT_DELTA,
            beta: DEFAULT_BETA,
            rho: DEFAULT_RHO,
        }
    }
}

/// Apply one update step.
pub fn step(v: ParcVector, params: &UpdateParams) -> ParcVector {
    let (c, m, _, k) = v.as_tuple();

    let c_next = c + params.effective_gamma(m) * (1.0 - c - m);
    let m_next = m * (1.0 - params.effective_delta(c));
    let k_next = k + params.rho * ((c_next - m_next) - k);

    normalize(c_next, m_next, 0.0, k_next)
}

/// Apply [`step`] `steps` times in sequence. `steps == 0` returns `v` unchanged.
pub fn update(v: ParcVector, steps: u32, params: &UpdateParams) -> ParcVector {
    let out = trajectory(v, params)
        .take(steps as usize)
        .last()
        .unwrap_or(v);
    tracing::debug!(steps, from = %v, to = %out, "temporal update complete");
    out
}

/// Lazily yield the state after each update step, starting with step 1.
///
/// The iterator is unbounded; combine it with [`Iterator::take`].
pub fn trajectory(v: ParcVector, params: &UpdateParams) -> Trajectory {
    Trajectory {
        current: v,
        params: *params,
        step: 0,
    }
}

/// Iterator returned by [`trajectory`].
#[derive(Clone, Debug)]
pub struct Trajectory {
    current: ParcVector,
    params: UpdateParams,
    step: u64,
}

impl Trajectory {
    /// Number of steps taken so far.
    pub fn steps_taken(&self) -> u64 {
        self.step
    }
}

impl Iterator for Trajectory {
    type Item = ParcVector;

    fn next(&mut self) -> Option<ParcVector> {
        self.current = step(self.current, &self.params);
        self.step += 1;
        tracing::trace!(step = self.step, state = %self.current, "update step");
        Some(self.current)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::FOG_TOLERANCE;

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
    fn test_default_params() {
        let p = UpdateParams::default();
        assert_eq!((p.gamma, p.delta, p.beta, p.rho), (0.3, 0.1, 0.5, 0.5));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_and_nan() {
        let p = UpdateParams { gamma: 1.5, ..UpdateParams::default() };
        assert_eq!(
            p.validate(),
            Err(ParcError::InvalidParameter { name: "gamma", value: 1.5 })
        );
        let p = UpdateParams { rho: f64::NAN, ..UpdateParams::default() };
        assert!(matches!(
            p.validate(),
            Err(ParcError::InvalidParameter { name: "rho", .. })
        ));
    }

    #[test]
    fn test_zero_steps_is_identity() {
        let v = normalize(0.31, 0.12, 0.0, 0.77);
        assert_eq!(update(v, 0, &UpdateParams::default()), v);
    }

    #[test]
    fn test_single_step_matches_rule() {
        let v = normalize(0.4, 0.2, 0.0, 0.5);
        let p = UpdateParams::default();
        let next = step(v, &p);

        // gamma_eff = 0.3 * 0.8 = 0.24 ; c' = 0.4 + 0.24 * 0.4 = 0.496
        // delta_eff = 0.1 + 0.5 * 0.4 = 0.3 ; m' = 0.2 * 0.7 = 0.14
        // k' = 0.5 + 0.5 * (0.356 - 0.5) = 0.428
        assert!((next.c() - 0.496).abs() < 1e-12, "c={}", next.c());
        assert!((next.m() - 0.14).abs() < 1e-12, "m={}", next.m());
        assert!((next.k() - 0.428).abs() < 1e-12, "k={}", next.k());
        assert!((next.f() - 0.504).abs() < 1e-12, "f={}", next.f());
    }

    #[test]
    fn test_update_equals_repeated_step() {
        let p = UpdateParams::default();
        let v = normalize(0.1, 0.3, 0.0, 0.9);
        let mut manual = v;
        for _ in 0..5 {
            manual = step(manual, &p);
        }
        assert_eq!(update(v, 5, &p), manual);
    }

    #[test]
    fn test_correctness_grows_misconception_decays() {
        let p = UpdateParams::default();
        let v = normalize(0.2, 0.3, 0.0, 0.5);
        let after = update(v, 10, &p);
        assert!(after.c() > v.c(), "c should grow: {} -> {}", v, after);
        assert!(after.m() < v.m(), "m should decay: {} -> {}", v, after);
        assert!(after.f() < v.f(), "fog should clear: {} -> {}", v, after);
    }

    #[test]
    fn test_long_run_saturates() {
        let after = update(normalize(0.1, 0.1, 0.0, 0.0), 500, &UpdateParams::default());
        assert!(after.c() > 0.99, "c={}", after.c());
        assert!(after.m() < 1e-6, "m={}", after.m());
        assert!(after.k() > 0.95, "k={}", after.k());
        assert_invariants(&after);
    }

    #[test]
    fn test_confidence_falls_when_misconception_dominates() {
        // With no learning, k is pulled toward c - m < 0 and clamps at 0.
        let p = UpdateParams { gamma: 0.0, delta: 0.0, beta: 0.0, rho: 1.0 };
        let after = update(normalize(0.0, 0.8, 0.0, 0.9), 1, &p);
        assert_eq!(after.k(), 0.0);
        assert!((after.m() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_aggressive_decay_is_clamped() {
        // delta_eff = 1.0 + 1.0 * c > 1 would drive m negative; normalize clamps.
        let p = UpdateParams { gamma: 1.0, delta: 1.0, beta: 1.0, rho: 1.0 };
        let mut traj = trajectory(normalize(0.5, 0.5, 0.0, 0.5), &p);
        for _ in 0..20 {
            let v = traj.next().unwrap();
            assert_invariants(&v);
        }
        assert_eq!(traj.steps_taken(), 20);
    }

    #[test]
    fn test_every_intermediate_state_is_normalized() {
        let grid = [0.0, 0.25, 0.5, 0.75, 1.0];
        let p = UpdateParams::default();
        for &c in &grid {
            for &m in &grid {
                for &k in &grid {
                    let v = normalize(c, m, 0.0, k);
                    for s in trajectory(v, &p).take(25) {
                        assert_invariants(&s);
                    }
                }
            }
        }
    }

    #[test]
    fn test_effective_rates() {
        let p = UpdateParams::default();
        assert!((p.effective_gamma(0.5) - 0.15).abs() < 1e-12);
        assert!((p.effective_delta(0.4) - 0.3).abs() < 1e-12);
    }
}
