//! Result-set equivalence engine

pub mod canonical;
pub mod equivalence;
pub mod multiset;
pub mod normalize;
pub mod permutation;
pub mod value;

pub use canonical::{canonicalize, quick_reject};
pub use equivalence::{results_equivalent, results_equivalent_with_rng};
pub use multiset::multiset_equal;
pub use normalize::{normalize, normalize_with_dialect, order_matters};
pub use permutation::{candidate_permutations, CandidatePermutations, ColumnPermutation};
pub use value::{ResultSet, Row, Value};

#[cfg(test)]
mod tests;
