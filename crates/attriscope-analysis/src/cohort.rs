//! Cohort comparison of a measure between outcome groups.
//!
//! Partitions a record set by a key attribute, splits each partition into
//! its outcome cohorts (stayed / left), and compares the arithmetic mean of
//! a continuous measure between the two, including the percent differential
//! of the left cohort against the stayed cohort.
//!
//! A key whose data contains only one outcome yields a partial row: the
//! missing cohort's mean is undefined, not zero, and so is the differential.
//! The same holds when the stayed cohort's mean is exactly zero, where the
//! differential has no finite value. Undefined statistics are carried as
//! `None` per affected key; every other key's row remains fully usable.

use std::collections::HashMap;

use attriscope_model::{GroupKey, RecordSet, SchemaError};
use attriscope_stats::mean::{MeanAccumulator, percent_difference};
use serde::Serialize;

use crate::align::{AlignmentError, GroupKeyed, align_rows};

/// Mean measure per outcome cohort within one key partition.
#[derive(Debug, Clone, Serialize)]
pub struct CohortComparisonRow {
    /// The partition key.
    pub key: GroupKey,
    /// Mean measure over records that stayed (outcome `false`); `None` when
    /// that cohort is empty or holds no observed measure values.
    pub mean_stayed: Option<f64>,
    /// Mean measure over records that left (outcome `true`); `None` when
    /// that cohort is empty or holds no observed measure values.
    pub mean_left: Option<f64>,
    /// `(mean_left - mean_stayed) / mean_stayed * 100`; `None` whenever
    /// either mean is undefined or the stayed mean is zero.
    pub percent_difference: Option<f64>,
}

impl GroupKeyed for CohortComparisonRow {
    fn group_key(&self) -> &GroupKey {
        &self.key
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Cohorts {
    stayed: MeanAccumulator,
    left: MeanAccumulator,
}

/// Per-key cohort means of one measure, in first-observed key order.
#[derive(Debug, Clone, Serialize)]
pub struct CohortComparisonTable {
    /// The attribute the records were partitioned by.
    pub key_attribute: String,
    /// The measure whose cohort means are compared.
    pub measure_attribute: String,
    /// One row per observed partition.
    pub rows: Vec<CohortComparisonRow>,
}

impl CohortComparisonTable {
    /// Partition `records` by `key_attribute`, split each partition by
    /// outcome, and compare the mean of `measure_attribute` between the
    /// cohorts.
    ///
    /// Records whose measure value is missing still establish their
    /// partition but contribute nothing to the cohort mean; the mean is
    /// over observed values only.
    ///
    /// # Errors
    ///
    /// Fails with [`SchemaError`] if either attribute is outside the record
    /// schema or the measure attribute is not numeric.
    pub fn compute(
        records: &RecordSet,
        key_attribute: &str,
        measure_attribute: &str,
    ) -> Result<Self, SchemaError> {
        for attribute in [key_attribute, measure_attribute] {
            if !records.schema().contains(attribute) {
                return Err(SchemaError::MissingAttribute {
                    attribute: attribute.to_string(),
                });
            }
        }

        let mut partitions: Vec<(GroupKey, Cohorts)> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        for record in records.records() {
            let key = GroupKey::from(records.key_level(record, key_attribute)?);
            let outcome = records.outcome(record)?;
            let measure = records.measure(record, measure_attribute)?;

            let slot = match index.get(&key) {
                Some(&slot) => slot,
                None => {
                    let slot = partitions.len();
                    index.insert(key.clone(), slot);
                    partitions.push((key, Cohorts::default()));
                    slot
                }
            };
            if let Some(value) = measure {
                let cohorts = &mut partitions[slot].1;
                if outcome {
                    cohorts.left.push(value);
                } else {
                    cohorts.stayed.push(value);
                }
            }
        }

        let rows = partitions
            .into_iter()
            .map(|(key, cohorts)| {
                let mean_stayed = cohorts.stayed.mean();
                let mean_left = cohorts.left.mean();
                let diff = match (mean_stayed, mean_left) {
                    (Some(stayed), Some(left)) => percent_difference(stayed, left),
                    _ => None,
                };
                CohortComparisonRow {
                    key,
                    mean_stayed,
                    mean_left,
                    percent_difference: diff,
                }
            })
            .collect();

        Ok(Self {
            key_attribute: key_attribute.to_string(),
            measure_attribute: measure_attribute.to_string(),
            rows,
        })
    }

    /// The table's key order, usable as an alignment reference.
    #[must_use]
    pub fn key_order(&self) -> Vec<GroupKey> {
        self.rows.iter().map(|row| row.key.clone()).collect()
    }

    /// A copy of this table with rows reordered to `reference`.
    ///
    /// # Errors
    ///
    /// Fails with [`AlignmentError`] if a reference key has no row here.
    pub fn align_to(&self, reference: &[GroupKey]) -> Result<Self, AlignmentError> {
        Ok(Self {
            key_attribute: self.key_attribute.clone(),
            measure_attribute: self.measure_attribute.clone(),
            rows: align_rows(&self.rows, reference)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use attriscope_model::{AttributeKind, AttributeValue, KeyLevel, Record, Schema};

    use super::*;

    fn record_set(rows: Vec<(&str, Option<f64>, bool)>) -> RecordSet {
        let schema = Schema::new(vec![
            ("Role".to_string(), AttributeKind::Category),
            ("Income".to_string(), AttributeKind::Number),
            ("Left".to_string(), AttributeKind::Flag),
        ]);
        let records = rows
            .into_iter()
            .map(|(role, income, left)| {
                let mut pairs = vec![
                    ("Role", AttributeValue::Category(role.to_string())),
                    ("Left", AttributeValue::Flag(left)),
                ];
                if let Some(income) = income {
                    pairs.push(("Income", AttributeValue::Number(income)));
                }
                Record::from_pairs(pairs)
            })
            .collect();
        RecordSet::new(schema, "Left".to_string(), records).unwrap()
    }

    fn text_key(label: &str) -> GroupKey {
        GroupKey::from(KeyLevel::Text(label.to_string()))
    }

    #[test]
    fn test_percent_difference_between_cohorts() {
        let records = record_set(vec![
            ("Sales", Some(900.0), false),
            ("Sales", Some(1100.0), false),
            ("Sales", Some(1150.0), true),
            ("Sales", Some(1250.0), true),
        ]);
        let table = CohortComparisonTable::compute(&records, "Role", "Income").unwrap();

        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.mean_stayed, Some(1000.0));
        assert_eq!(row.mean_left, Some(1200.0));
        assert_eq!(row.percent_difference, Some(20.0));
    }

    #[test]
    fn test_single_outcome_key_is_partial() {
        let records = record_set(vec![
            ("Sales", Some(1000.0), false),
            ("Lab", Some(2000.0), true),
        ]);
        let table = CohortComparisonTable::compute(&records, "Role", "Income").unwrap();

        let sales = &table.rows[0];
        assert_eq!(sales.key, text_key("Sales"));
        assert_eq!(sales.mean_stayed, Some(1000.0));
        assert_eq!(sales.mean_left, None);
        assert_eq!(sales.percent_difference, None);

        let lab = &table.rows[1];
        assert_eq!(lab.mean_stayed, None);
        assert_eq!(lab.mean_left, Some(2000.0));
        assert_eq!(lab.percent_difference, None);
    }

    #[test]
    fn test_zero_baseline_mean_is_undefined() {
        let records = record_set(vec![
            ("Sales", Some(0.0), false),
            ("Sales", Some(500.0), true),
        ]);
        let table = CohortComparisonTable::compute(&records, "Role", "Income").unwrap();

        let row = &table.rows[0];
        assert_eq!(row.mean_stayed, Some(0.0));
        assert_eq!(row.mean_left, Some(500.0));
        assert_eq!(row.percent_difference, None);
    }

    #[test]
    fn test_missing_measures_establish_partition_without_contributing() {
        let records = record_set(vec![
            ("Sales", None, false),
            ("Sales", None, true),
        ]);
        let table = CohortComparisonTable::compute(&records, "Role", "Income").unwrap();

        let row = &table.rows[0];
        assert_eq!(row.key, text_key("Sales"));
        assert_eq!(row.mean_stayed, None);
        assert_eq!(row.mean_left, None);
        assert_eq!(row.percent_difference, None);
    }

    #[test]
    fn test_rows_follow_first_observed_order() {
        let records = record_set(vec![
            ("B", Some(1.0), false),
            ("A", Some(1.0), false),
            ("B", Some(2.0), true),
        ]);
        let table = CohortComparisonTable::compute(&records, "Role", "Income").unwrap();
        assert_eq!(table.key_order(), vec![text_key("B"), text_key("A")]);
    }

    #[test]
    fn test_unknown_measure_attribute_fails() {
        let records = record_set(vec![("Sales", Some(1.0), false)]);
        let err = CohortComparisonTable::compute(&records, "Role", "Bonus").unwrap_err();
        assert!(matches!(err, SchemaError::MissingAttribute { .. }));
    }

    #[test]
    fn test_align_to_rate_ordering() {
        let records = record_set(vec![
            ("A", Some(10.0), false),
            ("B", Some(20.0), true),
        ]);
        let table = CohortComparisonTable::compute(&records, "Role", "Income").unwrap();
        let reference = vec![text_key("B"), text_key("A")];
        let aligned = table.align_to(&reference).unwrap();
        assert_eq!(aligned.key_order(), reference);

        let err = table.align_to(&[text_key("C")]).unwrap_err();
        assert!(matches!(err, AlignmentError::MissingReferenceKey { .. }));
    }
}
