//! Outcome rates grouped by categorical keys.
//!
//! Partitions a record set by one or more key attributes and computes the
//! outcome rate of every partition actually observed in the data. The result
//! is ordered by descending rate so the most affected groups lead; equal
//! rates keep their first-observed order.
//!
//! Partitions are formed over the distinct key combinations present in the
//! records, not over the cross-product of each attribute's domain, so an
//! empty partition cannot appear and no rate is ever computed over zero
//! observations.

use std::collections::HashMap;

use attriscope_model::{GroupKey, RecordSet, SchemaError};
use attriscope_stats::rate::RateAccumulator;
use serde::Serialize;

use crate::align::{AlignmentError, GroupKeyed, align_rows};

/// One partition's outcome rate.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedRateRow {
    /// The partition key, one level per key attribute.
    pub key: GroupKey,
    /// Number of records observed in the partition.
    pub observed: usize,
    /// Number of records with a positive outcome.
    pub positives: usize,
    /// Exact `positives / observed`, in `[0, 1]`.
    pub rate: f64,
}

impl GroupKeyed for GroupedRateRow {
    fn group_key(&self) -> &GroupKey {
        &self.key
    }
}

/// Outcome rates per observed key combination, sorted by descending rate.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedRateTable {
    /// The key attributes the records were partitioned by, in request order.
    pub key_attributes: Vec<String>,
    /// One row per observed partition.
    pub rows: Vec<GroupedRateRow>,
}

impl GroupedRateTable {
    /// Partition `records` by `key_attributes` and compute the outcome rate
    /// per partition.
    ///
    /// Rates are accumulated as integer counts and divided once per
    /// partition, so each rate is the exact rational `positives / observed`.
    /// The sort over rates is stable: two partitions with the same rate stay
    /// in the order their first records appeared in the input.
    ///
    /// # Errors
    ///
    /// Fails with [`SchemaError`] if `key_attributes` is empty or names an
    /// attribute outside the record schema.
    pub fn compute(records: &RecordSet, key_attributes: &[&str]) -> Result<Self, SchemaError> {
        if key_attributes.is_empty() {
            return Err(SchemaError::NoKeyAttributes);
        }
        for attribute in key_attributes {
            if !records.schema().contains(attribute) {
                return Err(SchemaError::MissingAttribute {
                    attribute: (*attribute).to_string(),
                });
            }
        }

        // Partitions are kept in first-observed order; the index map only
        // locates the accumulator for keys seen before.
        let mut partitions: Vec<(GroupKey, RateAccumulator)> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        for record in records.records() {
            let levels = key_attributes
                .iter()
                .map(|attribute| records.key_level(record, attribute))
                .collect::<Result<Vec<_>, _>>()?;
            let key = GroupKey::new(levels);
            let outcome = records.outcome(record)?;

            let slot = match index.get(&key) {
                Some(&slot) => slot,
                None => {
                    let slot = partitions.len();
                    index.insert(key.clone(), slot);
                    partitions.push((key, RateAccumulator::new()));
                    slot
                }
            };
            partitions[slot].1.record(outcome);
        }

        let mut rows: Vec<GroupedRateRow> = partitions
            .into_iter()
            .map(|(key, acc)| {
                // a partition exists only once a record was observed in it
                let rate = acc.rate().unwrap();
                GroupedRateRow {
                    key,
                    observed: acc.observed(),
                    positives: acc.positives(),
                    rate,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.rate.total_cmp(&a.rate));

        Ok(Self {
            key_attributes: key_attributes
                .iter()
                .map(|attribute| (*attribute).to_string())
                .collect(),
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
            key_attributes: self.key_attributes.clone(),
            rows: align_rows(&self.rows, reference)?,
        })
    }
}
