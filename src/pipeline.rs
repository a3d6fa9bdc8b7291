//! The text → vector pipeline.
//!
//! ```text
//! text ──► KeywordEncoder ──► normalize ──► (update × steps) ──► ParcVector
//!              ↑                                 ↑
//!        EncoderConfig                      UpdateParams
//! ```
//!
//! [`ParcEngine`] bundles a validated [`ParcConfig`] so callers configure once
//! and then make stateless calls. The engine holds configuration only, never
//! a vector; every call is independent.

use alloc::vec::Vec;

use crate::diagnosis::{Diagnosis, DiagnosisThresholds};
use crate::dynamics::{update, UpdateParams};
use crate::encoder::{EncoderConfig, KeywordEncoder};
use crate::error::Result;
use crate::record::VectorRecord;
use crate::validate::{validate, ValidationReport};
use crate::vector::ParcVector;

/// Update steps applied by the pipeline when none are configured.
pub const DEFAULT_PIPELINE_STEPS: u32 = 3;

/// Whole-pipeline configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParcConfig {
    /// Marker sets and confidence seeding.
    pub encoder: EncoderConfig,
    /// Temporal update parameters.
    pub dynamics: UpdateParams,
    /// Update steps applied after encoding. Default 3.
    pub steps: u32,
    /// Whether [`ParcEngine::vector`] applies the update at all. Default true.
    pub apply_updates: bool,
    /// Thresholds for [`ParcEngine::diagnose`].
    pub diagnosis: DiagnosisThresholds,
}

impl ParcConfig {
    /// Check every nested configuration.
    pub fn validate(&self) -> Result<()> {
        self.encoder.validate()?;
        self.dynamics.validate()?;
        self.diagnosis.validate()?;
        Ok(())
    }
}

impl Default for ParcConfig {
    fn default() -> Self {
        Self {
            encoder: EncoderConfig::default(),
            dynamics: UpdateParams::default(),
            steps: DEFAULT_PIPELINE_STEPS,
            apply_updates: true,
            diagnosis: DiagnosisThresholds::default(),
        }
    }
}

/// Stateless PARC engine over a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct ParcEngine {
    encoder: KeywordEncoder,
    config: ParcConfig,
}

impl ParcEngine {
    /// Build an engine, rejecting an invalid configuration.
    pub fn new(config: ParcConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            encoder: KeywordEncoder::new(config.encoder.clone()),
            config,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &ParcConfig {
        &self.config
    }

    /// Encode and normalize `text` without applying updates.
    pub fn encode(&self, text: &str, confidence_hint: Option<f64>) -> ParcVector {
        self.encoder.encode_text(text, confidence_hint)
    }

    /// Full pipeline: encode, normalize, then apply the configured update
    /// steps when `apply_updates` is set.
    #[tracing::instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub fn vector(&self, text: &str, confidence_hint: Option<f64>) -> ParcVector {
        let seeded = self.encode(text, confidence_hint);
        if self.config.apply_updates {
            self.evolve(seeded, self.config.steps)
        } else {
            seeded
        }
    }

    /// Run [`ParcEngine::vector`] over many texts, in order, without hints.
    pub fn batch<I, S>(&self, texts: I) -> Vec<ParcVector>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .map(|t| self.vector(t.as_ref(), None))
            .collect()
    }

    /// Advance `v` by `steps` using the configured dynamics.
    pub fn evolve(&self, v: ParcVector, steps: u32) -> ParcVector {
        update(v, steps, &self.config.dynamics)
    }

    /// Validate a caller-supplied record.
    pub fn validate(&self, candidate: &VectorRecord) -> ValidationReport {
        validate(candidate)
    }

    /// Interpret `v` with the configured thresholds.
    pub fn diagnose(&self, v: &ParcVector) -> Diagnosis {
        Diagnosis::classify(v, &self.config.diagnosis)
    }
}
