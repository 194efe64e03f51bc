//! Data model for attrition analytics.
//!
//! This crate defines the immutable record model that every aggregation in
//! the workspace operates on:
//!
//! - [`AttributeValue`]: one typed value (category, number, flag, or missing)
//! - [`Schema`]: the ordered attribute names and kinds shared by a record set
//! - [`Record`] / [`RecordSet`]: the cleaned population under analysis
//! - [`GroupKey`] / [`KeyLevel`]: the tuple of discrete levels identifying a
//!   partition of the record set
//!
//! A [`RecordSet`] is produced once by the ingestion step and never mutated;
//! aggregations read it through typed accessors that fail with
//! [`SchemaError`] when a request does not match the schema.
//!
//! # Examples
//!
//! ```
//! use attriscope_model::{
//!     AttributeKind, AttributeValue, Record, RecordSet, Schema,
//! };
//!
//! let schema = Schema::new(vec![
//!     ("Role".to_string(), AttributeKind::Category),
//!     ("Left".to_string(), AttributeKind::Flag),
//! ]);
//! let records = vec![
//!     Record::from_pairs([
//!         ("Role", AttributeValue::Category("Sales".to_string())),
//!         ("Left", AttributeValue::Flag(true)),
//!     ]),
//!     Record::from_pairs([
//!         ("Role", AttributeValue::Category("Lab".to_string())),
//!         ("Left", AttributeValue::Flag(false)),
//!     ]),
//! ];
//! let records = RecordSet::new(schema, "Left".to_string(), records).unwrap();
//! assert_eq!(records.len(), 2);
//! ```

pub mod attribute;
pub mod group_key;
pub mod record;

pub use self::{
    attribute::{AttributeKind, AttributeValue, KeyLevel},
    group_key::GroupKey,
    record::{Record, RecordSet, Schema, SchemaError},
};
