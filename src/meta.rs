//! Metadata annotation for PARC vectors.
//!
//! Callers often need to carry provenance (learner id, item id, model name)
//! alongside a vector without the engine interpreting it. [`AnnotatedVector`]
//! pairs a vector with a string-keyed map. With the `serde` feature it
//! serializes as the flat vector fields plus a `_parc_meta` object:
//!
//! ```text
//! { "c": 0.25, "m": 0.0, "f": 0.75, "k": 0.5, "_parc_meta": { "learner": "a17" } }
//! ```

use alloc::string::String;

use hashbrown::HashMap;

use crate::vector::ParcVector;

/// Wire name of the metadata object.
pub const META_KEY: &str = "_parc_meta";

/// A vector with opaque caller metadata attached.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnotatedVector {
    /// The annotated state.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub vector: ParcVector,
    /// Caller metadata. Never read by the engine.
    #[cfg_attr(feature = "serde", serde(rename = "_parc_meta", default))]
    pub meta: HashMap<String, String>,
}

impl AnnotatedVector {
    /// Attach `meta` to `vector`.
    pub fn attach(vector: ParcVector, meta: HashMap<String, String>) -> Self {
        Self { vector, meta }
    }

    /// A vector with an empty metadata map.
    pub fn bare(vector: ParcVector) -> Self {
        Self::attach(vector, HashMap::new())
    }

    /// Add or replace one metadata entry, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Look up a metadata value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// Drop the metadata and return the bare vector.
    pub fn into_vector(self) -> ParcVector {
        self.vector
    }
}

impl From<ParcVector> for AnnotatedVector {
    fn from(vector: ParcVector) -> Self {
        Self::bare(vector)
    }
}
