//! Typed attribute values and the discrete levels they group under.

use serde::{Deserialize, Serialize};

/// One typed attribute value carried by a [`Record`](crate::Record).
///
/// Values are immutable once ingested. The serde representation is untagged,
/// so a flat JSON object maps directly onto attribute values: strings become
/// categories, numbers become numeric measures, booleans become flags, and
/// `null` becomes [`AttributeValue::Missing`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A binary flag, such as the pre-encoded outcome attribute.
    Flag(bool),
    /// A numeric measure (monthly income, distance from home, ...).
    Number(f64),
    /// A categorical label (job role, travel frequency, ...).
    Category(String),
    /// No value was recorded for this attribute.
    Missing,
}

impl AttributeValue {
    /// The kind of value held, or `None` for [`AttributeValue::Missing`].
    #[must_use]
    pub fn kind(&self) -> Option<AttributeKind> {
        match self {
            Self::Category(_) => Some(AttributeKind::Category),
            Self::Number(_) => Some(AttributeKind::Number),
            Self::Flag(_) => Some(AttributeKind::Flag),
            Self::Missing => None,
        }
    }

    /// Human-readable kind label, used in schema error messages.
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Category(_) => "category",
            Self::Number(_) => "number",
            Self::Flag(_) => "flag",
            Self::Missing => "missing",
        }
    }
}

/// The kind of value an attribute holds across a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Deserialize, Serialize)]
pub enum AttributeKind {
    /// Categorical labels.
    #[display("category")]
    Category,
    /// Continuous or discrete numeric measures.
    #[display("number")]
    Number,
    /// Binary flags.
    #[display("flag")]
    Flag,
}

/// One cell of a [`GroupKey`](crate::GroupKey): the discrete level an
/// attribute value groups under.
///
/// Categorical values group by their label and integral numeric values by
/// their integer level (satisfaction scores, distances). A missing value
/// groups as its own [`KeyLevel::Missing`] level rather than being dropped,
/// so partitions never silently lose records.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Display,
    Deserialize,
    Serialize,
)]
#[serde(untagged)]
pub enum KeyLevel {
    /// An integral numeric level.
    #[display("{_0}")]
    Ordinal(i64),
    /// A categorical label.
    #[display("{_0}")]
    Text(String),
    /// The value was absent.
    #[display("(missing)")]
    Missing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_value_round_trip() {
        let values: Vec<AttributeValue> =
            serde_json::from_str(r#"["Sales", 4200.5, true, null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                AttributeValue::Category("Sales".to_string()),
                AttributeValue::Number(4200.5),
                AttributeValue::Flag(true),
                AttributeValue::Missing,
            ]
        );

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"["Sales",4200.5,true,null]"#);
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(
            AttributeValue::Category("Sales".to_string()).kind(),
            Some(AttributeKind::Category)
        );
        assert_eq!(
            AttributeValue::Number(1.0).kind(),
            Some(AttributeKind::Number)
        );
        assert_eq!(AttributeValue::Flag(false).kind(), Some(AttributeKind::Flag));
        assert_eq!(AttributeValue::Missing.kind(), None);
    }

    #[test]
    fn test_key_level_display() {
        assert_eq!(KeyLevel::Text("Sales".to_string()).to_string(), "Sales");
        assert_eq!(KeyLevel::Ordinal(3).to_string(), "3");
        assert_eq!(KeyLevel::Missing.to_string(), "(missing)");
    }

    #[test]
    fn test_key_level_untagged_serde() {
        let levels: Vec<KeyLevel> = serde_json::from_str(r#"[3, "Sales", null]"#).unwrap();
        assert_eq!(
            levels,
            vec![
                KeyLevel::Ordinal(3),
                KeyLevel::Text("Sales".to_string()),
                KeyLevel::Missing,
            ]
        );
    }
}
