//! Partition keys for grouped aggregations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::KeyLevel;

/// The ordered tuple of discrete levels identifying one partition of a
/// record set.
///
/// Two records belong to the same partition iff every level of their keys is
/// equal, [`KeyLevel::Missing`] included. A single value type covers both
/// one-dimensional and multi-dimensional groupings, so there is no nested
/// map-of-maps structure with ambiguous missing-key semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct GroupKey(Vec<KeyLevel>);

impl GroupKey {
    #[must_use]
    pub fn new(levels: Vec<KeyLevel>) -> Self {
        Self(levels)
    }

    /// The key's levels, in key-attribute order.
    #[must_use]
    pub fn levels(&self) -> &[KeyLevel] {
        &self.0
    }

    /// Number of dimensions in the key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<KeyLevel> for GroupKey {
    fn from(level: KeyLevel) -> Self {
        Self(vec![level])
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " / ")?;
            }
            write!(f, "{level}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_includes_missing_levels() {
        let a = GroupKey::new(vec![
            KeyLevel::Text("Sales".to_string()),
            KeyLevel::Missing,
        ]);
        let b = GroupKey::new(vec![
            KeyLevel::Text("Sales".to_string()),
            KeyLevel::Missing,
        ]);
        let c = GroupKey::new(vec![
            KeyLevel::Text("Sales".to_string()),
            KeyLevel::Text("Other".to_string()),
        ]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_joins_levels() {
        let key = GroupKey::new(vec![
            KeyLevel::Text("Travel_Rarely".to_string()),
            KeyLevel::Ordinal(3),
            KeyLevel::Missing,
        ]);
        assert_eq!(key.to_string(), "Travel_Rarely / 3 / (missing)");
    }

    #[test]
    fn test_serializes_as_level_array() {
        let key = GroupKey::new(vec![
            KeyLevel::Text("Sales".to_string()),
            KeyLevel::Ordinal(2),
        ]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"["Sales",2]"#);
    }
}
