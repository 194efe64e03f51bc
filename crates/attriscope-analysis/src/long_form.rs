//! Wide-to-long reshaping of multi-key rate tables.
//!
//! A rate table grouped over several key attributes is "wide": one row per
//! key combination, the combination spread across the key's dimensions.
//! Multi-metric comparisons want the same data "long": one row per
//! `(key, metric name, metric level, rate)`, so every dimension becomes a
//! plottable series of its own.
//!
//! [`melt`] is that reshape and nothing more. No aggregation happens here;
//! rates are copied verbatim from the source rows.

use std::iter;

use attriscope_model::{GroupKey, KeyLevel, SchemaError};
use serde::Serialize;

use crate::grouped_rates::GroupedRateTable;

/// One `(key, metric, level, rate)` observation of a melted wide table.
#[derive(Debug, Clone, Serialize)]
pub struct LongFormRow {
    /// The full partition key of the wide row this was fanned out from.
    pub key: GroupKey,
    /// Name of the key dimension this row describes.
    pub metric_name: String,
    /// The level the partition holds for that dimension.
    pub metric_level: KeyLevel,
    /// The wide row's rate, unchanged.
    pub rate: f64,
}

/// Melt a wide multi-key rate table into long-form rows.
///
/// Each wide row fans out into one long row per entry of `dimension_names`,
/// all sharing the wide row's rate, so the output holds exactly
/// `table.rows.len() * dimension_names.len()` rows. Order is stable: wide
/// rows keep the table's order and dimensions keep the caller's order
/// within each wide row.
///
/// # Errors
///
/// Fails with [`SchemaError::MissingAttribute`] if a dimension name is not
/// one of the table's key attributes.
pub fn melt(
    table: &GroupedRateTable,
    dimension_names: &[&str],
) -> Result<Vec<LongFormRow>, SchemaError> {
    let positions = dimension_names
        .iter()
        .map(|name| {
            table
                .key_attributes
                .iter()
                .position(|attribute| attribute.as_str() == *name)
                .ok_or_else(|| SchemaError::MissingAttribute {
                    attribute: (*name).to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(table.rows.len() * dimension_names.len());
    for wide in &table.rows {
        for (&position, name) in iter::zip(&positions, dimension_names) {
            rows.push(LongFormRow {
                key: wide.key.clone(),
                metric_name: (*name).to_string(),
                metric_level: wide.key.levels()[position].clone(),
                rate: wide.rate,
            });
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use attriscope_model::{AttributeKind, AttributeValue, Record, RecordSet, Schema};

    use super::*;

    fn rate_table() -> GroupedRateTable {
        let schema = Schema::new(vec![
            ("JobSatisfaction".to_string(), AttributeKind::Number),
            ("WorkLifeBalance".to_string(), AttributeKind::Number),
            ("Left".to_string(), AttributeKind::Flag),
        ]);
        let rows = [
            (1.0, 1.0, true),
            (1.0, 1.0, true),
            (3.0, 2.0, false),
            (3.0, 2.0, true),
            (4.0, 4.0, false),
        ];
        let records = rows
            .iter()
            .map(|(satisfaction, balance, left)| {
                Record::from_pairs([
                    ("JobSatisfaction", AttributeValue::Number(*satisfaction)),
                    ("WorkLifeBalance", AttributeValue::Number(*balance)),
                    ("Left", AttributeValue::Flag(*left)),
                ])
            })
            .collect();
        let records = RecordSet::new(schema, "Left".to_string(), records).unwrap();
        GroupedRateTable::compute(&records, &["JobSatisfaction", "WorkLifeBalance"]).unwrap()
    }

    #[test]
    fn test_fan_out_size() {
        let table = rate_table();
        let dims = ["JobSatisfaction", "WorkLifeBalance"];
        let long = melt(&table, &dims).unwrap();
        assert_eq!(long.len(), table.rows.len() * dims.len());
    }

    #[test]
    fn test_rates_copied_verbatim() {
        let table = rate_table();
        let long = melt(&table, &["JobSatisfaction", "WorkLifeBalance"]).unwrap();
        for (i, row) in long.iter().enumerate() {
            let wide = &table.rows[i / 2];
            assert_eq!(row.rate, wide.rate);
            assert_eq!(row.key, wide.key);
        }
    }

    #[test]
    fn test_order_follows_table_then_dimensions() {
        let table = rate_table();
        let long = melt(&table, &["WorkLifeBalance", "JobSatisfaction"]).unwrap();

        // Dimensions alternate in caller order within each wide row.
        for pair in long.chunks(2) {
            assert_eq!(pair[0].metric_name, "WorkLifeBalance");
            assert_eq!(pair[1].metric_name, "JobSatisfaction");
            assert_eq!(pair[0].metric_level, pair[0].key.levels()[1]);
            assert_eq!(pair[1].metric_level, pair[1].key.levels()[0]);
        }
    }

    #[test]
    fn test_dimension_subset_is_allowed() {
        let table = rate_table();
        let long = melt(&table, &["WorkLifeBalance"]).unwrap();
        assert_eq!(long.len(), table.rows.len());
        assert!(long.iter().all(|row| row.metric_name == "WorkLifeBalance"));
    }

    #[test]
    fn test_unknown_dimension_fails() {
        let table = rate_table();
        let err = melt(&table, &["JobSatisfaction", "Unknown"]).unwrap_err();
        assert!(matches!(err, SchemaError::MissingAttribute { .. }));
    }

    #[test]
    fn test_empty_table_melts_to_nothing() {
        let mut table = rate_table();
        table.rows.clear();
        let long = melt(&table, &["JobSatisfaction"]).unwrap();
        assert!(long.is_empty());
    }
}
