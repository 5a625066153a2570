use serde::{Deserialize, Deserializer};

/// A single field of a merge-patch body.
///
/// A key missing from the JSON object is `Absent`, an explicit `null` is
/// `Clear`. Fields using this type must be marked `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
  #[default]
  Absent,
  Clear,
  Set(T),
}

impl<T> Patch<T> {
  /// Resolves the patch against the currently stored value.
  pub fn merge(self, current: Option<T>) -> Option<T> {
    match self {
      Self::Absent => current,
      Self::Clear => None,
      Self::Set(value) => Some(value),
    }
  }
}

impl<T> From<Option<T>> for Patch<T> {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(value) => Self::Set(value),
      None => Self::Clear,
    }
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
  fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
    Option::<T>::deserialize(de).map(Self::from)
  }
}
