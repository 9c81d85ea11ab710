//! Column statistics shared by the reports.
//!
//! Ties are always broken by first occurrence so results are reproducible
//! for a given input order.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;

/// Count occurrences of each distinct value.
///
/// Sorted by descending count; equal counts keep first-occurrence order.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    // value → (count, index of first occurrence)
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (index, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, index)).0 += 1;
    }

    let mut ranked: Vec<(T, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    ranked.sort_by_key(|(_, count, first)| (Reverse(*count), *first));

    ranked
        .into_iter()
        .map(|(value, count, _)| (value, count))
        .collect()
}

/// Most frequent value, or `None` for empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next().map(|(value, _)| value)
}
