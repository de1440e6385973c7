//! Numeric base selection for integer radix sort

/// Base returned when every value is zero
pub const DEGENERATE_BASE: u64 = 10;

const MIN_BASE_BITS: u32 = 4;
const MAX_BASE_BITS: u32 = 8;

/// Pick the radix for every digit pass of one sort from the largest
/// magnitude present.
///
/// The exponent is `floor(log2(max) / 2)` clamped to `[4, 8]`, so the base is
/// a power of two between 16 and 256. Larger magnitudes get fewer, wider
/// passes while the histogram stays at most 256 counters. An all-zero or
/// empty input yields [`DEGENERATE_BASE`].
pub fn select_base<I>(magnitudes: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let max_magnitude = magnitudes.into_iter().max().unwrap_or(0);
    base_for_magnitude(max_magnitude)
}

/// Base for a known maximum absolute value
pub fn base_for_magnitude(max_magnitude: u64) -> u64 {
    if max_magnitude == 0 {
        return DEGENERATE_BASE;
    }

    // floor(log2(m) / 2) == floor(ilog2(m) / 2) for integer m
    let bits = (max_magnitude.ilog2() / 2).clamp(MIN_BASE_BITS, MAX_BASE_BITS);
    (1u64 << bits).min(256)
}
