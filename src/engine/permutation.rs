//! Column permutations and the constrained search over them
//!
//! A candidate result set may project the reference columns in a different order. The search
//! keeps, for every reference column, the set of candidate columns that could still supply it,
//! and enumerates the Cartesian product of those sets lazily.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::value::{ColumnValueSet, ResultSet, Row};

/// Up to this many columns the search is exhaustive
pub const EXHAUSTIVE_MAX_COLUMNS: usize = 3;

/// Number of candidate rows sampled (with replacement) to prune wider searches
pub const PRUNING_SAMPLES: usize = 20;

/// Column assignment: position `i` holds the candidate column that supplies reference column `i`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnPermutation(Vec<usize>);

impl ColumnPermutation {
    pub fn new(columns: Vec<usize>) -> Self {
        Self(columns)
    }

    pub fn identity(arity: usize) -> Self {
        Self((0..arity).collect())
    }

    pub fn columns(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when no candidate column is used twice
    pub fn is_bijective(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0.iter().all(|column| *column < self.0.len() && seen.insert(*column))
    }

    /// Reorder the columns of `row`.
    ///
    /// # Panics
    ///
    /// Panics when the permutation length differs from the row arity. That is a caller bug.
    pub fn apply(&self, row: &Row) -> Row {
        assert_eq!(
            self.0.len(),
            row.arity(),
            "column permutation length must equal row arity"
        );
        self.0.iter().map(|&column| row.values()[column].clone()).collect()
    }
}

/// Lazy, finite Cartesian product over per-column candidate sets.
///
/// Cloning yields an independent iterator positioned at the same point; [`restart`] rewinds.
///
/// [`restart`]: CandidatePermutations::restart
#[derive(Debug, Clone)]
pub struct CandidatePermutations {
    constraints: Vec<Vec<usize>>,
    cursor: Option<Vec<usize>>,
}

impl CandidatePermutations {
    pub fn new(constraints: Vec<Vec<usize>>) -> Self {
        let cursor = Self::start(&constraints);
        Self {
            constraints,
            cursor,
        }
    }

    fn start(constraints: &[Vec<usize>]) -> Option<Vec<usize>> {
        if constraints.iter().any(Vec::is_empty) {
            None
        } else {
            Some(vec![0; constraints.len()])
        }
    }

    /// Candidate columns still allowed for each reference column
    pub fn constraints(&self) -> &[Vec<usize>] {
        &self.constraints
    }

    /// Upper bound on the number of tuples, bijective or not
    pub fn space_size(&self) -> usize {
        self.constraints
            .iter()
            .fold(1usize, |acc, c| acc.saturating_mul(c.len()))
    }

    pub fn restart(&mut self) {
        self.cursor = Self::start(&self.constraints);
    }
}

impl Iterator for CandidatePermutations {
    type Item = ColumnPermutation;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;
        let item = cursor
            .iter()
            .zip(&self.constraints)
            .map(|(&k, allowed)| allowed[k])
            .collect();

        // Odometer step, rightmost position fastest
        let mut exhausted = true;
        for pos in (0..cursor.len()).rev() {
            cursor[pos] += 1;
            if cursor[pos] < self.constraints[pos].len() {
                exhausted = false;
                break;
            }
            cursor[pos] = 0;
        }
        if exhausted {
            self.cursor = None;
        }

        Some(ColumnPermutation(item))
    }
}

/// Enumerate column assignments that could reconcile `candidate` with the reference.
///
/// `reference_sets[i]` holds the distinct values of reference column `i`. Narrow results are
/// searched exhaustively. Wider ones are pruned by sampling candidate rows: the mapping
/// "candidate column `j` supplies reference column `i`" is dropped as soon as a sampled row
/// holds a value in column `j` that never occurs in reference column `i`. Such a mapping can
/// never be part of a valid witness, so pruning never removes a correct assignment.
///
/// The returned tuples may repeat columns; callers skip those that are not bijective.
pub fn candidate_permutations<R: Rng + ?Sized>(
    reference_sets: &[ColumnValueSet<'_>],
    candidate: &ResultSet,
    rng: &mut R,
) -> CandidatePermutations {
    let num_cols = if candidate.is_empty() {
        reference_sets.len()
    } else {
        candidate.arity()
    };
    let mut constraints: Vec<Vec<usize>> = (0..num_cols).map(|_| (0..num_cols).collect()).collect();

    if num_cols <= EXHAUSTIVE_MAX_COLUMNS {
        return CandidatePermutations::new(constraints);
    }

    for _ in 0..PRUNING_SAMPLES {
        let Some(sample) = candidate.rows().choose(rng) else {
            break;
        };

        for (reference_col, allowed) in constraints.iter_mut().enumerate() {
            let Some(seen) = reference_sets.get(reference_col) else {
                allowed.clear();
                continue;
            };
            allowed.retain(|&candidate_col| seen.contains(&sample.values()[candidate_col]));
        }
    }

    tracing::trace!(
        columns = num_cols,
        remaining = ?constraints.iter().map(Vec::len).collect::<Vec<_>>(),
        "pruned column permutation space"
    );

    CandidatePermutations::new(constraints)
}
