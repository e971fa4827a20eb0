//! Frequency statistics over text box coordinates.
//!
//! Layout inference works on modes rather than means: converted pages carry
//! lots of short noise boxes (page numbers, labels inside figures) that would
//! skew any average.

use indexmap::IndexMap;

/// A value and how often it was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueCount {
    /// The observed value
    pub value: i32,
    /// Number of occurrences
    pub count: usize,
}

/// Tie-break used when two values are equally frequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Prefer the larger value
    Larger,
    /// Prefer the smaller value
    Smaller,
}

fn count_values(values: impl IntoIterator<Item = i32>) -> IndexMap<i32, usize> {
    let mut counts = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

fn sort_counts(counts: &mut [ValueCount], tie: TieBreak) {
    counts.sort_by(|a, b| {
        b.count.cmp(&a.count).then_with(|| match tie {
            TieBreak::Larger => b.value.cmp(&a.value),
            TieBreak::Smaller => a.value.cmp(&b.value),
        })
    });
}

/// Distinct values sorted by descending frequency.
///
/// # Examples
///
/// ```
/// use pdfigcap::layout::stats::{sorted_counts, TieBreak};
///
/// let counts = sorted_counts([5, 7, 7, 5, 9], TieBreak::Smaller);
/// assert_eq!(counts[0].value, 5);
/// assert_eq!(counts[1].value, 7);
/// assert_eq!(counts[2].count, 1);
/// ```
pub fn sorted_counts(values: impl IntoIterator<Item = i32>, tie: TieBreak) -> Vec<ValueCount> {
    let mut counts: Vec<ValueCount> = count_values(values)
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    sort_counts(&mut counts, tie);
    counts
}

/// Most frequent value, or `None` for an empty input.
///
/// # Examples
///
/// ```
/// use pdfigcap::layout::stats::{mode, TieBreak};
///
/// assert_eq!(mode([12, 12, 14, 14, 3], TieBreak::Larger), Some(14));
/// assert_eq!(mode([12, 12, 14, 14, 3], TieBreak::Smaller), Some(12));
/// assert_eq!(mode(Vec::new(), TieBreak::Larger), None);
/// ```
pub fn mode(values: impl IntoIterator<Item = i32>, tie: TieBreak) -> Option<i32> {
    sorted_counts(values, tie).first().map(|c| c.value)
}

/// Fold values lying within `tolerance` of a more frequent value into it.
///
/// The input must already be sorted by descending frequency. Each surviving
/// entry absorbs the counts of every later entry within the tolerance, and the
/// result is re-sorted by frequency.
///
/// # Examples
///
/// ```
/// use pdfigcap::layout::stats::{merge_within, sorted_counts, TieBreak};
///
/// let counts = sorted_counts([50, 50, 50, 56, 56, 56, 56, 300], TieBreak::Smaller);
/// let merged = merge_within(counts, 10, TieBreak::Smaller);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].value, 56);
/// assert_eq!(merged[0].count, 7);
/// ```
pub fn merge_within(mut counts: Vec<ValueCount>, tolerance: i32, tie: TieBreak) -> Vec<ValueCount> {
    let mut i = 0;
    while i < counts.len() {
        let mut j = i + 1;
        while j < counts.len() {
            if (counts[i].value - counts[j].value).abs() <= tolerance {
                counts[i].count += counts[j].count;
                counts.remove(j);
            } else {
                j += 1;
            }
        }
        i += 1;
    }
    sort_counts(&mut counts, tie);
    counts
}
