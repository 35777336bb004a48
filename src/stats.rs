//! The little arithmetic the reports need over lists of scores and counts.

use std::{collections::HashMap, hash::Hash};

/// The arithmetic mean, or `None` for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// The median, averaging the two middle values for an even count.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[middle - 1] + sorted[middle]) / 2.0)
    } else {
        Some(sorted[middle])
    }
}

/// Share of players ranked at or below `rank` (1-based), as a percentage.
///
/// The first of ten players is at the 100th percentile, the last at the 10th.
#[allow(clippy::cast_precision_loss)]
pub fn percentile(rank: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    (total + 1).saturating_sub(rank) as f64 / total as f64 * 100.0
}

/// Counts every item, returning `(item, count)` pairs with the most common
/// first. Ties keep the order in which the items were first seen.
pub fn most_common<T, I>(items: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut positions: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for item in items {
        if let Some(&position) = positions.get(&item) {
            counts[position].1 += 1;
        } else {
            positions.insert(item.clone(), counts.len());
            counts.push((item, 1));
        }
    }

    // `sort_by` is stable, which keeps first-seen order between equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
