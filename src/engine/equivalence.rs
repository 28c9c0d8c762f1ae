//! Decide whether two result sets denote the same answer

use rand::Rng;
use std::borrow::Cow;
use std::collections::HashSet;

use super::canonical::quick_reject;
use super::multiset::multiset_equal;
use super::permutation::candidate_permutations;
use super::value::{ResultSet, Row};

/// Whether `candidate` is equivalent to `reference`, up to column order and, unless
/// `order_matters`, row order.
pub fn results_equivalent(reference: &ResultSet, candidate: &ResultSet, order_matters: bool) -> bool {
    results_equivalent_with_rng(reference, candidate, order_matters, &mut rand::thread_rng())
}

/// Same as [`results_equivalent`] with an explicit source of randomness for permutation pruning
pub fn results_equivalent_with_rng<R: Rng + ?Sized>(
    reference: &ResultSet,
    candidate: &ResultSet,
    order_matters: bool,
    rng: &mut R,
) -> bool {
    if reference.is_empty() && candidate.is_empty() {
        return true;
    }
    if reference.len() != candidate.len() {
        tracing::debug!(
            reference = reference.len(),
            candidate = candidate.len(),
            "row counts differ"
        );
        return false;
    }

    let num_cols = reference.arity();
    if candidate.arity() != num_cols {
        tracing::debug!(
            reference = num_cols,
            candidate = candidate.arity(),
            "column counts differ"
        );
        return false;
    }

    if !quick_reject(reference, candidate, order_matters) {
        tracing::debug!("rejected by canonical row comparison");
        return false;
    }

    let reference_sets = reference.column_value_sets();
    let reference_rows: HashSet<&Row> = reference.rows().iter().collect();

    for permutation in candidate_permutations(&reference_sets, candidate, rng) {
        if !permutation.is_bijective() {
            continue;
        }

        let permuted: Cow<'_, [Row]> = if num_cols == 1 {
            Cow::Borrowed(candidate.rows())
        } else {
            Cow::Owned(candidate.rows().iter().map(|row| permutation.apply(row)).collect())
        };

        let accepted = if order_matters {
            reference.rows() == permuted.as_ref()
        } else {
            // The set comparison is implied by the multiset one but much cheaper to fail
            permuted.iter().collect::<HashSet<_>>() == reference_rows
                && multiset_equal(reference.rows(), permuted.as_ref())
        };

        if accepted {
            tracing::debug!(permutation = ?permutation.columns(), "found matching column permutation");
            return true;
        }
    }

    false
}
