//! Records, record sets, and the schema contract between them and the
//! aggregations.
//!
//! A [`RecordSet`] is the cleaned population handed over by ingestion:
//! constant-valued and identifier attributes are already removed and the
//! outcome attribute is already encoded as a flag. Aggregations never touch
//! raw values directly; they go through the typed accessors
//! ([`RecordSet::key_level`], [`RecordSet::measure`], [`RecordSet::outcome`]),
//! which turn any mismatch between the request and the schema into a
//! [`SchemaError`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeKind, AttributeValue, KeyLevel};

/// Contract violation between an aggregation request and the record schema.
///
/// Schema errors are fatal for the aggregation that raised them: no partial
/// table is produced. They do not invalidate tables computed independently
/// over the same record set.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    /// A referenced attribute does not exist in the schema.
    #[display("attribute '{attribute}' is not part of the record schema")]
    MissingAttribute { attribute: String },
    /// A grouping request named no key attributes at all.
    #[display("at least one key attribute is required")]
    NoKeyAttributes,
    /// An attribute holds a different kind of value than the operation needs.
    #[display("attribute '{attribute}' holds {found} values, expected {expected}")]
    KindMismatch {
        attribute: String,
        expected: AttributeKind,
        found: String,
    },
    /// A numeric attribute with fractional values cannot form discrete levels.
    #[display("attribute '{attribute}' holds non-integral values and cannot form grouping levels")]
    NotDiscrete { attribute: String },
}

/// Ordered attribute schema shared by every record in a set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Schema {
    attributes: Vec<(String, AttributeKind)>,
}

impl Schema {
    #[must_use]
    pub fn new(attributes: Vec<(String, AttributeKind)>) -> Self {
        Self { attributes }
    }

    /// The declared kind of `attribute`, or `None` if it is not part of the
    /// schema.
    #[must_use]
    pub fn kind_of(&self, attribute: &str) -> Option<AttributeKind> {
        self.attributes
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, kind)| *kind)
    }

    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.kind_of(attribute).is_some()
    }

    /// Attribute names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// One entity (e.g. one employee) with named attribute values.
///
/// An attribute the record holds no entry for reads as
/// [`AttributeValue::Missing`]; missing values are first-class and group as
/// their own level rather than being dropped.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<String, AttributeValue>,
}

impl Record {
    #[must_use]
    pub fn new(values: BTreeMap<String, AttributeValue>) -> Self {
        Self { values }
    }

    /// Build a record from `(attribute, value)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, AttributeValue)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /// The value stored for `attribute`, or [`AttributeValue::Missing`] if
    /// the record holds none.
    #[must_use]
    pub fn get(&self, attribute: &str) -> &AttributeValue {
        static MISSING: AttributeValue = AttributeValue::Missing;
        self.values.get(attribute).unwrap_or(&MISSING)
    }
}

/// The full, cleaned collection of records under analysis.
///
/// Immutable once constructed; every aggregation is a pure pass over it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordSet {
    schema: Schema,
    outcome_attribute: String,
    records: Vec<Record>,
}

impl RecordSet {
    /// Build a record set over `schema` with `outcome_attribute` as the
    /// binary outcome.
    ///
    /// # Errors
    ///
    /// Fails if the outcome attribute is not part of the schema or is not
    /// declared as a flag.
    pub fn new(
        schema: Schema,
        outcome_attribute: String,
        records: Vec<Record>,
    ) -> Result<Self, SchemaError> {
        match schema.kind_of(&outcome_attribute) {
            None => {
                return Err(SchemaError::MissingAttribute {
                    attribute: outcome_attribute,
                });
            }
            Some(AttributeKind::Flag) => {}
            Some(kind) => {
                return Err(SchemaError::KindMismatch {
                    attribute: outcome_attribute,
                    expected: AttributeKind::Flag,
                    found: kind.to_string(),
                });
            }
        }
        Ok(Self {
            schema,
            outcome_attribute,
            records,
        })
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Name of the binary outcome attribute.
    #[must_use]
    pub fn outcome_attribute(&self) -> &str {
        &self.outcome_attribute
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The discrete level `record` groups under for `attribute`.
    ///
    /// Categories group by label, integral numbers by their integer value,
    /// flags as ordinal 0/1, and missing values as [`KeyLevel::Missing`].
    ///
    /// # Errors
    ///
    /// Fails if the attribute is not part of the schema or holds
    /// non-integral numeric values.
    #[expect(clippy::cast_possible_truncation)]
    pub fn key_level(&self, record: &Record, attribute: &str) -> Result<KeyLevel, SchemaError> {
        if !self.schema.contains(attribute) {
            return Err(SchemaError::MissingAttribute {
                attribute: attribute.to_string(),
            });
        }
        match record.get(attribute) {
            AttributeValue::Category(label) => Ok(KeyLevel::Text(label.clone())),
            AttributeValue::Number(value) => {
                if value.is_finite() && value.fract() == 0.0 {
                    Ok(KeyLevel::Ordinal(*value as i64))
                } else {
                    Err(SchemaError::NotDiscrete {
                        attribute: attribute.to_string(),
                    })
                }
            }
            AttributeValue::Flag(flag) => Ok(KeyLevel::Ordinal(i64::from(*flag))),
            AttributeValue::Missing => Ok(KeyLevel::Missing),
        }
    }

    /// The numeric measure `record` holds for `attribute`, or `None` when the
    /// value is missing.
    ///
    /// # Errors
    ///
    /// Fails if the attribute is not part of the schema or is not declared as
    /// a number.
    pub fn measure(&self, record: &Record, attribute: &str) -> Result<Option<f64>, SchemaError> {
        match self.schema.kind_of(attribute) {
            None => {
                return Err(SchemaError::MissingAttribute {
                    attribute: attribute.to_string(),
                });
            }
            Some(AttributeKind::Number) => {}
            Some(kind) => {
                return Err(SchemaError::KindMismatch {
                    attribute: attribute.to_string(),
                    expected: AttributeKind::Number,
                    found: kind.to_string(),
                });
            }
        }
        match record.get(attribute) {
            AttributeValue::Number(value) => Ok(Some(*value)),
            AttributeValue::Missing => Ok(None),
            other => Err(SchemaError::KindMismatch {
                attribute: attribute.to_string(),
                expected: AttributeKind::Number,
                found: other.kind_label().to_string(),
            }),
        }
    }

    /// The binary outcome of `record`.
    ///
    /// # Errors
    ///
    /// Fails if the record's outcome value is not an encoded flag; ingestion
    /// guarantees the encoding, so this only trips on malformed input.
    pub fn outcome(&self, record: &Record) -> Result<bool, SchemaError> {
        match record.get(&self.outcome_attribute) {
            AttributeValue::Flag(flag) => Ok(*flag),
            other => Err(SchemaError::KindMismatch {
                attribute: self.outcome_attribute.clone(),
                expected: AttributeKind::Flag,
                found: other.kind_label().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::new(vec![
            ("Role".to_string(), AttributeKind::Category),
            ("Satisfaction".to_string(), AttributeKind::Number),
            ("Income".to_string(), AttributeKind::Number),
            ("Left".to_string(), AttributeKind::Flag),
        ])
    }

    fn record() -> Record {
        Record::from_pairs([
            ("Role", AttributeValue::Category("Sales".to_string())),
            ("Satisfaction", AttributeValue::Number(3.0)),
            ("Income", AttributeValue::Number(5200.5)),
            ("Left", AttributeValue::Flag(true)),
        ])
    }

    fn record_set(records: Vec<Record>) -> RecordSet {
        RecordSet::new(schema(), "Left".to_string(), records).unwrap()
    }

    #[test]
    fn test_outcome_attribute_must_be_flag() {
        let err = RecordSet::new(schema(), "Role".to_string(), vec![]).unwrap_err();
        assert!(matches!(err, SchemaError::KindMismatch { .. }));

        let err = RecordSet::new(schema(), "Unknown".to_string(), vec![]).unwrap_err();
        assert!(matches!(err, SchemaError::MissingAttribute { .. }));
    }

    #[test]
    fn test_key_level_by_kind() {
        let records = record_set(vec![record()]);
        let record = &records.records()[0];

        assert_eq!(
            records.key_level(record, "Role").unwrap(),
            KeyLevel::Text("Sales".to_string())
        );
        assert_eq!(
            records.key_level(record, "Satisfaction").unwrap(),
            KeyLevel::Ordinal(3)
        );
        assert_eq!(
            records.key_level(record, "Left").unwrap(),
            KeyLevel::Ordinal(1)
        );
    }

    #[test]
    fn test_fractional_measure_is_not_groupable() {
        let records = record_set(vec![record()]);
        let record = &records.records()[0];
        let err = records.key_level(record, "Income").unwrap_err();
        assert!(matches!(err, SchemaError::NotDiscrete { .. }));
    }

    #[test]
    fn test_unknown_attribute_is_schema_error() {
        let records = record_set(vec![record()]);
        let record = &records.records()[0];
        let err = records.key_level(record, "Unknown").unwrap_err();
        assert!(matches!(err, SchemaError::MissingAttribute { .. }));
    }

    #[test]
    fn test_absent_value_reads_as_missing() {
        let records = record_set(vec![Record::from_pairs([
            ("Left", AttributeValue::Flag(false)),
        ])]);
        let record = &records.records()[0];

        assert_eq!(
            records.key_level(record, "Role").unwrap(),
            KeyLevel::Missing
        );
        assert_eq!(records.measure(record, "Income").unwrap(), None);
    }

    #[test]
    fn test_measure_and_outcome() {
        let records = record_set(vec![record()]);
        let record = &records.records()[0];

        assert_eq!(records.measure(record, "Income").unwrap(), Some(5200.5));
        assert!(records.outcome(record).unwrap());

        let err = records.measure(record, "Role").unwrap_err();
        assert!(matches!(err, SchemaError::KindMismatch { .. }));
    }
}
