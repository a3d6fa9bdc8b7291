//! Error type for the fallible edges of the engine.
//!
//! The engine core (normalize, encode, update, validate) never fails. Errors
//! only arise when caller-supplied data is converted into engine types, or
//! when a configuration is checked.

use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

/// Errors raised at the boundary between caller input and the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParcError {
    /// A dynamics or encoder parameter lies outside its documented range.
    #[error("parameter `{name}` must be a finite value in [0, 1], got {value}")]
    InvalidParameter {
        /// Parameter name, e.g. `gamma`.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A step count below zero was supplied.
    #[error("step count must be >= 0, got {0}")]
    NegativeSteps(i64),

    /// A step count too large for the engine's counter.
    #[error("step count {0} exceeds the supported maximum")]
    StepsOverflow(i64),

    /// A numeric input was NaN or infinite.
    #[error("`{field}` must be finite, got {value}")]
    NonFinite {
        /// Field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A supplied vector failed validation. Carries the validator's messages.
    #[error("invalid PARC vector: {}", .0.join("; "))]
    InvalidVector(Vec<String>),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ParcError>;
