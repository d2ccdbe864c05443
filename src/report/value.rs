//! The runtime value model for "actual" values.
//!
//! Validation errors carry the value the validator actually found at a
//! path. This module defines [`Value`] to represent such values with the
//! same categories the source runtime distinguishes (null, boolean,
//! number, string, array, object), preserving map insertion order via
//! `IndexMap`. An *absent* value (a required property that was never
//! supplied) is not a [`Value`]; it is modelled as `Option::None` on
//! [`ContextEntry`](super::ContextEntry).

use indexmap::IndexMap;
use serde::Serialize;

/// A runtime value found by the validator at some path.
///
/// `Null` is a supplied value and is distinct from an absent one; the
/// two render differently ("null expected, but …" versus "… is
/// mandatory").
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// An explicit null.
    Null,
    /// A boolean scalar (`true` / `false`).
    Bool(bool),
    /// A signed 64-bit integer scalar.
    Integer(i64),
    /// A floating-point scalar.
    Float(f64),
    /// A string scalar.
    String(String),
    /// An ordered sequence of values.
    Sequence(Vec<Self>),
    /// An ordered mapping of string keys to values.
    Mapping(IndexMap<String, Self>),
}

impl Value {
    /// Renders the value in its JSON form, as used for literal display
    /// names and mismatch messages.
    ///
    /// Serialization of this type cannot fail; the impossible error
    /// collapses to an empty string rather than propagating.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Renders the value without string quoting: string payloads are
    /// returned verbatim, every other scalar falls back to its JSON
    /// form.
    ///
    /// Used by the literal mismatch message, which wraps both sides in
    /// single quotes itself.
    #[must_use]
    pub(crate) fn unquoted(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => other.to_json(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}
