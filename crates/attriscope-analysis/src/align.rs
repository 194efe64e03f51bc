//! Reordering one table's rows to match another table's key order.
//!
//! Two tables computed over the same record set share a key set but not an
//! ordering: outcome rates are sorted by rate, cohort comparisons by
//! first observation. Reports that place such tables side by side need them
//! in one order, and that reordering is an explicit, named operation here
//! rather than a side effect of some generic reshape.

use std::collections::HashMap;

use attriscope_model::GroupKey;

/// Rows addressable by the partition key they describe.
pub trait GroupKeyed {
    fn group_key(&self) -> &GroupKey;
}

/// Failure to align a table against a reference key order.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AlignmentError {
    /// The reference names a key the table has no row for. Both sides must
    /// be computed over the same record set so their key sets coincide.
    #[display("reference key '{key}' has no row in the table being aligned")]
    MissingReferenceKey { key: GroupKey },
}

/// Reorder `rows` so their keys appear exactly in `reference` order.
///
/// Rows whose key does not appear in the reference are dropped from the
/// output. That drop is deliberate: the caller is cutting a table down to a
/// reference view, and rows outside the reference have no slot to land in.
/// Callers that must not lose rows should compare key sets before aligning.
///
/// # Errors
///
/// Fails with [`AlignmentError::MissingReferenceKey`] if any reference key
/// has no matching row.
pub fn align_rows<R>(rows: &[R], reference: &[GroupKey]) -> Result<Vec<R>, AlignmentError>
where
    R: GroupKeyed + Clone,
{
    let by_key: HashMap<&GroupKey, &R> = rows.iter().map(|row| (row.group_key(), row)).collect();
    reference
        .iter()
        .map(|key| {
            by_key
                .get(key)
                .map(|row| (*row).clone())
                .ok_or_else(|| AlignmentError::MissingReferenceKey { key: key.clone() })
        })
        .collect()
}
