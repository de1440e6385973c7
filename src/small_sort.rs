//! Insertion sort used below the radix thresholds, where histogram setup
//! costs more than it saves.

use std::cmp::Ordering;

/// Stable in-place insertion sort driven by a strict `less` predicate.
pub fn insertion_sort_by<T, F>(values: &mut [T], mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in 1..values.len() {
        let mut j = i;
        // Shift only while strictly smaller, so equal keys keep their order
        while j > 0 && less(&values[j], &values[j - 1]) {
            values.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Insertion sort in natural order
pub fn insertion_sort<T: Ord>(values: &mut [T]) {
    insertion_sort_by(values, |a, b| a < b);
}

/// Compare two byte strings as if the shorter one were right-padded with `pad`
/// up to the length of the longer.
pub fn padded_cmp(a: &[u8], b: &[u8], pad: u8) -> Ordering {
    let width = a.len().max(b.len());
    for i in 0..width {
        let x = a.get(i).copied().unwrap_or(pad);
        let y = b.get(i).copied().unwrap_or(pad);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}
