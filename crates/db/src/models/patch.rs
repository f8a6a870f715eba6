//! Three-state field for update DTOs on nullable columns.

use serde::{Deserialize, Deserializer};

/// An update-payload field that distinguishes an omitted key from an
/// explicit JSON `null`.
///
/// An omitted field keeps the stored value, `null` clears the column, and a
/// value replaces it. A plain `Option` cannot express the first two cases
/// separately, so nullable columns use this instead.
///
/// Fields of this type need `#[serde(default)]` so a missing key becomes
/// [`Patch::Missing`] instead of a deserialization error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key absent from the payload; leave the column untouched.
    #[default]
    Missing,
    /// Key submitted as `null`; set the column to NULL.
    Null,
    /// Key submitted with a value.
    Value(T),
}

impl<T> Patch<T> {
    /// Whether the key was present in the payload (value or null).
    pub fn is_set(&self) -> bool {
        !matches!(self, Patch::Missing)
    }

    /// The submitted value. `Missing` and `Null` are both `None`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
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
