//! Fixed-width LSD radix sort for strings.
//!
//! Every string is treated as padded to the longest length, then ordered by a
//! stable counting sort per byte position from the last position to the
//! first. Strings are compared as UTF-8 bytes, which matches code point order.
//! All passes run on the calling thread.

use crate::config::{EngineConfig, StringPadding};
use crate::counting::accumulate;
use crate::small_sort::{insertion_sort_by, padded_cmp};
use log::{debug, trace};
use std::cmp::Ordering;

/// Buckets for space padding: one per byte value
const BYTE_BUCKETS: usize = 256;
/// Buckets for sentinel padding: past-the-end plus one per byte value
const SENTINEL_BUCKETS: usize = 257;

const SPACE: u8 = b' ';

/// Strict "less than" matching the order the radix passes produce for `padding`
pub fn string_less(padding: StringPadding, a: &[u8], b: &[u8]) -> bool {
    match padding {
        StringPadding::EndSentinel => a < b,
        StringPadding::Space => padded_cmp(a, b, SPACE) == Ordering::Less,
    }
}

/// Sort strings according to `config`; see [`StringPadding`] for how strings
/// of unequal length compare.
pub fn sort_strings<S: AsRef<str>>(mut values: Vec<S>, config: &EngineConfig) -> Vec<S> {
    let padding = config.string_padding;

    if values.len() < config.string_threshold {
        insertion_sort_by(&mut values, |a, b| {
            string_less(padding, a.as_ref().as_bytes(), b.as_ref().as_bytes())
        });
        return values;
    }

    let width = values.iter().map(|s| s.as_ref().len()).max().unwrap_or(0);
    debug!(
        "string radix sort: len={} width={} padding={}",
        values.len(),
        width,
        padding
    );

    let order = match padding {
        StringPadding::EndSentinel => sentinel_order(&values, width),
        StringPadding::Space => space_padded_order(&values, width),
    };

    permute(values, &order)
}

/// Final positions when past-the-end ranks below every byte
fn sentinel_order<S: AsRef<str>>(values: &[S], width: usize) -> Vec<usize> {
    let bytes: Vec<&[u8]> = values.iter().map(|s| s.as_ref().as_bytes()).collect();

    radix_order(values.len(), width, SENTINEL_BUCKETS, |index, position| {
        bytes[index]
            .get(position)
            .map_or(0, |&byte| byte as usize + 1)
    })
}

/// Final positions over copies right-padded with spaces to `width`
fn space_padded_order<S: AsRef<str>>(values: &[S], width: usize) -> Vec<usize> {
    let padded: Vec<Vec<u8>> = values
        .iter()
        .map(|s| {
            let mut copy = s.as_ref().as_bytes().to_vec();
            copy.resize(width, SPACE);
            copy
        })
        .collect();

    radix_order(values.len(), width, BYTE_BUCKETS, |index, position| {
        padded[index][position] as usize
    })
}

/// LSD passes over an index permutation, rightmost position first
fn radix_order<K>(len: usize, width: usize, buckets: usize, key: K) -> Vec<usize>
where
    K: Fn(usize, usize) -> usize,
{
    let mut order: Vec<usize> = (0..len).collect();
    let mut scratch = vec![0usize; len];
    let mut counts = vec![0usize; buckets];

    for position in (0..width).rev() {
        trace!("string position pass {position}");
        counts.fill(0);
        position_pass(&mut order, &mut scratch, &mut counts, |index| key(index, position));
    }

    order
}

/// Stable counting sort of `order` by one character position
fn position_pass<K>(order: &mut [usize], scratch: &mut [usize], counts: &mut [usize], key: K)
where
    K: Fn(usize) -> usize,
{
    for &index in order.iter() {
        counts[key(index)] += 1;
    }

    accumulate(counts);

    for &index in order.iter().rev() {
        let bucket = key(index);
        counts[bucket] -= 1;
        scratch[counts[bucket]] = index;
    }

    order.copy_from_slice(scratch);
}

/// Move the originals into the computed order
fn permute<S>(values: Vec<S>, order: &[usize]) -> Vec<S> {
    let mut slots: Vec<Option<S>> = values.into_iter().map(Some).collect();
    order.iter().filter_map(|&index| slots[index].take()).collect()
}
