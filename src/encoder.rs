/*
 * PARC State Engine.
 *
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Text → PARC vector encoding.
//!
//! The encoder is a deliberately simple lexical heuristic: correctness rises
//! with definitional markers ("is", "means", "because"), misconception with
//! negation markers ("not", "never", "wrong"). It makes no claim of semantic
//! accuracy. What callers may rely on is that the result satisfies the vector
//! invariants and that `c` and `m` rise monotonically with marker density.
//!
//! # Replacing the heuristic
//!
//! Anything that can turn text into a raw `(c0, m0)` pair can stand in for the
//! keyword scorer by implementing [`SeedEncoder`]:
//!
//! ```rust,ignore
//! use parc_core::encoder::{RawSeed, SeedEncoder};
//!
//! struct MyClassifier;
//!
//! impl SeedEncoder for MyClassifier {
//!     fn raw_seed(&self, text: &str) -> RawSeed {
//!         let (c0, m0) = run_model(text);
//!         RawSeed { c0, m0 }
//!     }
//! }
//! // MyClassifier.encode(text, hint, 0.5) now feeds the normal pipeline.
//! ```
//!
//! # Confidence seeding
//!
//! [`encode`] is deterministic: `k0` is the caller's hint, or
//! [`EncoderConfig::default_confidence`] when no hint is given. The anchored
//! random seed `0.3 + 0.7 · U[0, 1)` is only available through
//! [`encode_with_rng`], which takes the random source explicitly.

use alloc::string::String;
use alloc::vec::Vec;

use rand::Rng;

use crate::error::{ParcError, Result};
use crate::vector::{fog_of, normalize, ParcVector};

/// Default correctness markers.
pub const CORRECTNESS_MARKERS: [&str; 4] = ["is", "are", "means", "because"];

/// Default misconception markers.
pub const MISCONCEPTION_MARKERS: [&str; 4] = ["not", "never", "wrong", "unless"];

/// Confidence used when the caller supplies no hint.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Lower bound of the randomized confidence seed.
pub const RANDOM_CONFIDENCE_FLOOR: f64 = 0.3;

/// Width of the randomized confidence seed interval.
pub const RANDOM_CONFIDENCE_SPAN: f64 = 0.7;

// ─── Marker sets ────────────────────────────────────────────────────────────

/// A fixed set of lower-case tokens counted by the keyword encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<String>", into = "Vec<String>"))]
pub struct MarkerSet {
    words: Vec<String>,
}

impl MarkerSet {
    /// Build a marker set. Words are lower-cased so matching is case-insensitive.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// Whether `token` (already lower-cased) is a marker.
    pub fn contains(&self, token: &str) -> bool {
        self.words.iter().any(|w| w == token)
    }

    /// Number of markers in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the markers.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_str())
    }
}

// ─── Config ─────────────────────────────────────────────────────────────────

/// Configuration for the keyword encoder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncoderConfig {
    /// Tokens that signal definitional, correct reasoning.
    pub correctness_markers: MarkerSet,
    /// Tokens that signal negation or contradiction.
    pub misconception_markers: MarkerSet,
    /// Confidence seed when no hint is supplied. Range [0.0, 1.0]. Default 0.5.
    pub default_confidence: f64,
}

impl EncoderConfig {
    /// Construct the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `default_confidence` is finite and in [0.0, 1.0].
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.default_confidence) {
            tracing::warn!(
                value = self.default_confidence,
                "rejected encoder default confidence"
            );
            return Err(ParcError::InvalidParameter {
                name: "default_confidence",
                value: self.default_confidence,
            });
        }
        Ok(())
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            correctness_markers: MarkerSet::new(CORRECTNESS_MARKERS),
            misconception_markers: MarkerSet::new(MISCONCEPTION_MARKERS),
            default_confidence: DEFAULT_CONFIDENCE,
        }
    }
}

// ─── Seeds ──────────────────────────────────────────────────────────────────

/// Raw correctness / misconception signal before normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawSeed {
    /// Raw correctness signal.
    pub c0: f64,
    /// Raw misconception signal.
    pub m0: f64,
}

impl RawSeed {
    /// Provisional fog `1 − max(c0, m0)`; superseded by normalization.
    pub fn provisional_fog(&self) -> f64 {
        fog_of(self.c0, self.m0)
    }

    /// Complete the seed with confidence `k0` and normalize.
    pub fn into_vector(self, k0: f64) -> ParcVector {
        normalize(self.c0, self.m0, self.provisional_fog(), k0)
    }
}

/// Marker counts for one piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkerCounts {
    /// Number of whitespace-separated tokens.
    pub tokens: usize,
    /// Tokens found in the correctness set.
    pub correctness: usize,
    /// Tokens found in the misconception set.
    pub misconception: usize,
}

impl MarkerCounts {
    /// Convert counts to densities, dividing by `max(1, tokens)`.
    pub fn seed(&self) -> RawSeed {
        let len = self.tokens.max(1) as f64;
        RawSeed {
            c0: self.correctness as f64 / len,
            m0: self.misconception as f64 / len,
        }
    }
}

/// Anything that turns text into a raw `(c0, m0)` seed.
pub trait SeedEncoder {
    /// Produce the raw seed for `text`.
    fn raw_seed(&self, text: &str) -> RawSeed;

    /// Encode `text` with a deterministic confidence seed: the hint when
    /// supplied, otherwise `default_confidence`.
    fn encode(&self, text: &str, confidence_hint: Option<f64>, default_confidence: f64) -> ParcVector {
        self.raw_seed(text)
            .into_vector(confidence_hint.unwrap_or(default_confidence))
    }
}

// ─── Keyword encoder ────────────────────────────────────────────────────────

/// The lexical keyword-density encoder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeywordEncoder {
    config: EncoderConfig,
}

impl KeywordEncoder {
    /// Build an encoder from a configuration.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Lower-case, whitespace-tokenize and count markers.
    pub fn count_markers(&self, text: &str) -> MarkerCounts {
        let lowered = text.to_lowercase();
        let mut counts = MarkerCounts::default();
        for token in lowered.split_whitespace() {
            counts.tokens += 1;
            if self.config.correctness_markers.contains(token) {
                counts.correctness += 1;
            }
            if self.config.misconception_markers.contains(token) {
                counts.misconception += 1;
            }
        }
        tracing::debug!(
            tokens = counts.tokens,
            correctness = counts.correctness,
            misconception = counts.misconception,
            "counted markers"
        );
        counts
    }

    /// Encode with the deterministic confidence rule.
    pub fn encode_text(&self, text: &str, confidence_hint: Option<f64>) -> ParcVector {
        self.encode(text, confidence_hint, self.config.default_confidence)
    }

    /// Encode with the anchored random confidence seed drawn from `rng`,
    /// unless a hint is supplied.
    pub fn encode_text_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        confidence_hint: Option<f64>,
        rng: &mut R,
    ) -> ParcVector {
        let k0 = confidence_hint.unwrap_or_else(|| random_confidence(rng));
        self.raw_seed(text).into_vector(k0)
    }
}

impl SeedEncoder for KeywordEncoder {
    fn raw_seed(&self, text: &str) -> RawSeed {
        self.count_markers(text).seed()
    }
}

/// Draw `0.3 + 0.7 · U[0, 1)` from `rng`.
pub fn random_confidence<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    RANDOM_CONFIDENCE_FLOOR + RANDOM_CONFIDENCE_SPAN * rng.gen::<f64>()
}

// ─── Free functions ─────────────────────────────────────────────────────────

/// Encode `text` with the default marker sets and deterministic confidence.
pub fn encode(text: &str, confidence_hint: Option<f64>) -> ParcVector {
    KeywordEncoder::default().encode_text(text, confidence_hint)
}

/// Encode `text` with the given configuration and a random confidence seed
/// drawn from the caller's generator when no hint is supplied.
pub fn encode_with_rng<R: Rng + ?Sized>(
    text: &str,
    confidence_hint: Option<f64>,
    config: &EncoderConfig,
    rng: &mut R,
) -> ParcVector {
    KeywordEncoder::new(config.clone()).encode_text_with_rng(text, confidence_hint, rng)
}

/// Encode many texts with the default configuration and no hints.
pub fn encode_batch<I, S>(texts: I) -> Vec<ParcVector>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let encoder = KeywordEncoder::default();
    texts
        .into_iter()
        .map(|t| encoder.encode_text(t.as_ref(), None))
        .collect()
}

impl core::fmt::Display for MarkerSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.words.join(", "))
    }
}

impl From<Vec<String>> for MarkerSet {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

impl From<MarkerSet> for Vec<String> {
    fn from(set: MarkerSet) -> Self {
        set.words
    }
}

impl<S: AsRef<str>> FromIterator<S> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
