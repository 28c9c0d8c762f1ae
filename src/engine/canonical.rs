//! Column-order-insensitive row canonicalization and the quick-reject filter

use std::collections::HashSet;

use super::value::{ResultSet, Row};

/// Sort the values of a row by their `(rendering, type tag)` key.
///
/// Two rows that are column permutations of each other canonicalize to the same row.
pub fn canonicalize(row: &Row) -> Row {
    let mut values = row.values().to_vec();
    values.sort_by_cached_key(|value| value.sort_key());
    Row::new(values)
}

/// Cheap necessary condition for equivalence.
///
/// Returns `false` when the two result sets are definitely not equivalent and `true` when
/// equivalence cannot be ruled out. When order does not matter canonical rows are compared as
/// sets, so duplicate counts are ignored here and left to the multiset check.
pub fn quick_reject(reference: &ResultSet, candidate: &ResultSet, order_matters: bool) -> bool {
    let reference_rows = reference.rows().iter().map(canonicalize);
    let candidate_rows = candidate.rows().iter().map(canonicalize);

    if order_matters {
        reference_rows.eq(candidate_rows)
    } else {
        reference_rows.collect::<HashSet<_>>() == candidate_rows.collect::<HashSet<_>>()
    }
}
