//! Grouped aggregation and reshaping engine for attrition analytics.
//!
//! This crate turns an immutable [`RecordSet`](attriscope_model::RecordSet)
//! into a small number of derived, read-only tables. Every computation is a
//! pure, single-threaded pass over the records; nothing here performs I/O or
//! mutates shared state.
//!
//! # Overview
//!
//! The engine supports two workflows:
//!
//! ## Rate & Comparison Workflow
//!
//! 1. **Group outcome rates** ([`grouped_rates::GroupedRateTable`]): partition
//!    the records by one or more key attributes and compute the outcome rate
//!    per observed partition, sorted by descending rate
//! 2. **Compare cohorts** ([`cohort::CohortComparisonTable`]): split each key
//!    partition by outcome and compare a measure's means, including the
//!    percent differential between cohorts
//! 3. **Align orderings** ([`align::align_rows`]): reorder one table to a
//!    reference key order so related tables read side by side
//!
//! ## Reshaping Workflow
//!
//! 1. **Group over several keys** ([`grouped_rates::GroupedRateTable`])
//! 2. **Melt to long form** ([`long_form::melt`]): fan each wide row out into
//!    one `(key, metric, level, rate)` row per key dimension
//!
//! # Errors
//!
//! Requests that do not match the record schema fail fast with
//! [`SchemaError`](attriscope_model::SchemaError); alignment against a
//! reference key the table does not contain fails with
//! [`align::AlignmentError`]. Statistics that are undefined for a particular
//! key (an empty cohort, a zero baseline mean) are carried as `None` for that
//! key and never invalidate the rest of the table.
//!
//! # Examples
//!
//! ```
//! use attriscope_analysis::grouped_rates::GroupedRateTable;
//! use attriscope_model::{AttributeKind, AttributeValue, Record, RecordSet, Schema};
//!
//! let schema = Schema::new(vec![
//!     ("Role".to_string(), AttributeKind::Category),
//!     ("Left".to_string(), AttributeKind::Flag),
//! ]);
//! let records = ["Sales", "Sales", "Lab", "Lab"]
//!     .iter()
//!     .zip([true, false, false, false])
//!     .map(|(role, left)| {
//!         Record::from_pairs([
//!             ("Role", AttributeValue::Category((*role).to_string())),
//!             ("Left", AttributeValue::Flag(left)),
//!         ])
//!     })
//!     .collect();
//! let records = RecordSet::new(schema, "Left".to_string(), records).unwrap();
//!
//! let rates = GroupedRateTable::compute(&records, &["Role"]).unwrap();
//! assert_eq!(rates.rows.len(), 2);
//! assert_eq!(rates.rows[0].rate, 0.5); // Sales first: highest rate
//! ```

pub mod align;
pub mod cohort;
pub mod grouped_rates;
pub mod long_form;
