//! # parc-core
//!
//! PARC state engine: a bounded cognitive-state vector derived from text and
//! evolved over discrete time steps.
//!
//! ---
//!
//! ## The vector
//!
//! Four numbers describe where a learner stands on an idea:
//!
//! | Symbol | Name | Meaning |
//! |--------|------|---------|
//! | `c` | correctness | how much of the idea is held correctly |
//! | `m` | misconception | how much is held *incorrectly* |
//! | `f` | fog | what is not held at all: `1 − max(c, m)` |
//! | `k` | confidence | how sure the learner is |
//!
//! Correctness and misconception share one certainty budget (`c + m ≤ 1`), and
//! fog is never free: it is always derived from the other two. Every vector
//! this crate hands out satisfies those rules, because the only way to build
//! one is through [`normalize`].
//!
//! ## The pipeline
//!
//! ```text
//! text → encode → normalize → update × N → ParcVector
//!          ↑                      ↑
//!    EncoderConfig           UpdateParams
//!
//! caller record → validate → ValidationReport
//! ```
//!
//! The engine is stateless. Every operation is a pure function over value
//! types, safe to call from any number of threads without coordination.
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`vector`] | [`ParcVector`] | The vector, clamp, normalization, fog rule |
//! | [`encoder`] | [`KeywordEncoder`], [`SeedEncoder`] | Text → raw seed → vector |
//! | [`dynamics`] | [`UpdateParams`], [`Trajectory`] | Discrete learning dynamics |
//! | [`validate`] | [`ValidationReport`], [`ValidationIssue`] | Report-only invariant checks |
//! | [`record`] | [`VectorRecord`], [`ParamsRecord`] | Fixed-shape caller input |
//! | [`pipeline`] | [`ParcEngine`], [`ParcConfig`] | Configured text → vector in one call |
//! | [`diagnosis`] | [`Diagnosis`] | Human-readable reading of a state |
//! | [`meta`] | [`AnnotatedVector`] | Caller metadata carried beside a vector |
//! | [`error`] | [`ParcError`] | Boundary and configuration errors |
//!
//! ## `no_std`
//!
//! The crate is `#![no_std]` + `alloc` by default. Enable `std` for
//! [`ParcVector::rounded`]. Enable `serde` for (de)serialization of vectors,
//! records, reports and configuration; deserializing a [`ParcVector`] runs the
//! validator. Enable `python-ffi` for PyO3 bindings.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for rescales, encoder
//! statistics and completed updates, `trace` per update step, `warn` for
//! rejected input) and never installs a subscriber.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod diagnosis;
pub mod dynamics;
pub mod encoder;
pub mod error;
pub mod meta;
pub mod pipeline;
pub mod record;
pub mod validate;
pub mod vector;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use diagnosis::{Diagnosis, DiagnosisThresholds};
pub use dynamics::{step, trajectory, update, Trajectory, UpdateParams};
pub use encoder::{
    encode, encode_batch, encode_with_rng, EncoderConfig, KeywordEncoder, MarkerSet, RawSeed,
    SeedEncoder,
};
pub use error::ParcError;
pub use meta::AnnotatedVector;
pub use pipeline::{ParcConfig, ParcEngine};
pub use record::{ParamsRecord, VectorRecord};
pub use validate::{validate, ValidationIssue, ValidationReport};
pub use vector::{clamp, normalize, ParcVector, FOG_TOLERANCE};
