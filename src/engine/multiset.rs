//! Bag equality with exact multiplicities

use std::collections::HashMap;
use std::hash::Hash;

/// Whether `left` and `right` hold the same elements with the same counts.
///
/// Elements are compared exactly; no canonicalization is applied.
pub fn multiset_equal<T: Eq + Hash>(left: &[T], right: &[T]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    let mut counts: HashMap<&T, usize> = HashMap::with_capacity(left.len());
    for element in left {
        *counts.entry(element).or_insert(0) += 1;
    }

    for element in right {
        match counts.get_mut(element) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }

    true
}
