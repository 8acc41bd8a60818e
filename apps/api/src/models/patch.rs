//! Three-state PATCH fields.
//!
//! Update bodies must keep "key missing" distinguishable from "key present
//! with null": a missing key leaves the stored column untouched, an explicit
//! null clears it (only legal on nullable columns). A plain `Option<T>`
//! collapses the two, so patch payloads use [`Patch<T>`] instead.

use serde::{Deserialize, Deserializer};

use crate::errors::FieldError;

/// One field of a partial-update body.
///
/// `#[serde(default)]` on the field keeps a missing key at `Absent`; a
/// present key deserializes through `Option<T>`, turning JSON null into
/// `Null` and anything else into `Value`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    /// Whether the column should be written at all.
    pub fn write(&self) -> bool {
        !matches!(self, Patch::Absent)
    }

    /// The value to write when `write()` is true. `None` writes SQL NULL;
    /// callers reject that for non-nullable columns via [`deny_null`] before
    /// any statement runs.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

/// Records a field error when a non-nullable field is explicitly cleared.
/// `name` is the wire-format key, so error details match the request body.
pub fn deny_null<T>(field: &Patch<T>, name: &str, errors: &mut Vec<FieldError>) {
    if matches!(field, Patch::Null) {
        errors.push(FieldError {
            field: name.to_string(),
            message: "must not be null".to_string(),
        });
    }
}
