//! Record ingestion and schema cleanup.
//!
//! Loads a JSON array of flat objects into a [`RecordSet`], performing the
//! cleanup the aggregation engine assumes has already happened: identifier
//! attributes are dropped, constant-valued attributes are dropped, and the
//! outcome attribute is encoded as a binary flag.

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::{Context as _, bail};
use attriscope_model::{AttributeKind, AttributeValue, Record, RecordSet, Schema};

/// Options controlling schema cleanup during ingestion.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Attribute to encode as the binary outcome.
    pub outcome_attribute: String,
    /// Category level of the outcome attribute that counts as positive.
    pub positive_level: String,
    /// Identifier attributes to drop outright.
    pub drop: Vec<String>,
}

/// Raw dataset row as found on disk: attribute name to JSON-typed value.
type RawRow = BTreeMap<String, AttributeValue>;

/// Load a record file and clean it up into a [`RecordSet`].
pub fn load_records<P>(path: P, options: &IngestOptions) -> anyhow::Result<RecordSet>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let rows: Vec<RawRow> = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse records from {}", path.display()))?;
    build_record_set(rows, options)
}

/// Clean raw rows up and assemble the record set.
pub fn build_record_set(
    mut rows: Vec<RawRow>,
    options: &IngestOptions,
) -> anyhow::Result<RecordSet> {
    if rows.is_empty() {
        bail!("record file holds no records");
    }
    for row in &mut rows {
        for attribute in &options.drop {
            row.remove(attribute);
        }
        encode_outcome(row, options)?;
    }
    let schema = infer_schema(&rows, &options.outcome_attribute)?;
    let records = rows.into_iter().map(Record::new).collect();
    RecordSet::new(schema, options.outcome_attribute.clone(), records)
        .context("ingested records do not satisfy the schema contract")
}

/// Rewrite a row's outcome value to a flag.
fn encode_outcome(row: &mut RawRow, options: &IngestOptions) -> anyhow::Result<()> {
    let Some(value) = row.get_mut(&options.outcome_attribute) else {
        bail!(
            "record is missing outcome attribute '{}'",
            options.outcome_attribute
        );
    };
    let flag = match value {
        AttributeValue::Flag(flag) => *flag,
        AttributeValue::Category(level) => *level == options.positive_level,
        AttributeValue::Number(n) if *n == 0.0 || *n == 1.0 => *n == 1.0,
        other => bail!(
            "outcome attribute '{}' holds {} values and cannot be encoded as a flag",
            options.outcome_attribute,
            other.kind_label()
        ),
    };
    *value = AttributeValue::Flag(flag);
    Ok(())
}

/// Infer attribute kinds from observed values and drop non-informative
/// attributes.
fn infer_schema(rows: &[RawRow], outcome_attribute: &str) -> anyhow::Result<Schema> {
    let mut kinds: BTreeMap<String, AttributeKind> = BTreeMap::new();
    for row in rows {
        for (attribute, value) in row {
            let Some(kind) = value.kind() else {
                continue;
            };
            match kinds.get(attribute) {
                None => {
                    kinds.insert(attribute.clone(), kind);
                }
                Some(existing) if *existing == kind => {}
                Some(existing) => {
                    bail!("attribute '{attribute}' mixes {existing} and {kind} values");
                }
            }
        }
    }

    // Constant-valued attributes carry no information for grouping or
    // comparison; they are removed like the single-valued columns of the
    // source dataset. The outcome attribute always stays.
    let attributes = kinds
        .into_iter()
        .filter(|(attribute, _)| {
            attribute.as_str() == outcome_attribute || !is_constant(rows, attribute)
        })
        .collect();
    Ok(Schema::new(attributes))
}

fn is_constant(rows: &[RawRow], attribute: &str) -> bool {
    static MISSING: AttributeValue = AttributeValue::Missing;
    let mut first: Option<&AttributeValue> = None;
    for row in rows {
        let value = row.get(attribute).unwrap_or(&MISSING);
        match first {
            None => first = Some(value),
            Some(seen) if seen == value => {}
            Some(_) => return false,
        }
    }
    true
}
