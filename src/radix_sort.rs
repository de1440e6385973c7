use crate::base::select_base;
use crate::config::EngineConfig;
use crate::counting::{digit_pass, Dispatcher};
use crate::small_sort::insertion_sort;
use crate::string_radix;
use log::debug;
// LSD radix sort for signed integers with an adaptively chosen base.
// Digit passes run through the parallel counting pass.

/// Fixed-width signed integer that the numeric engine can sort.
///
/// Values are carried through the digit passes as unsigned distances from an
/// origin. The subtraction wraps in the type's own width and is reinterpreted
/// as unsigned, which is exact for any two values of the type, so shifting by
/// a negative minimum never overflows, even at `MIN` and `MAX`.
pub trait RadixKey: Copy + Ord + Send + Sync {
    const ZERO: Self;

    /// Unsigned distance from `origin` (`self >= origin`)
    fn offset_from(self, origin: Self) -> u64;

    /// Inverse of [`RadixKey::offset_from`]
    fn from_offset(offset: u64, origin: Self) -> Self;

    /// Absolute value without overflow at `MIN`
    fn magnitude(self) -> u64;
}

macro_rules! impl_radix_key {
    ($($signed:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl RadixKey for $signed {
                const ZERO: Self = 0;

                #[inline(always)]
                fn offset_from(self, origin: Self) -> u64 {
                    self.wrapping_sub(origin) as $unsigned as u64
                }

                #[inline(always)]
                fn from_offset(offset: u64, origin: Self) -> Self {
                    origin.wrapping_add(offset as $unsigned as $signed)
                }

                #[inline(always)]
                fn magnitude(self) -> u64 {
                    self.unsigned_abs() as u64
                }
            }
        )*
    };
}

impl_radix_key!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, isize => usize);

/// Radix sort engine for numeric and string data
#[derive(Debug, Clone, Default)]
pub struct RadixSort {
    config: EngineConfig,
}

impl RadixSort {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sort signed integers in ascending order
    pub fn sort_numeric<T: RadixKey>(&self, mut values: Vec<T>) -> Vec<T> {
        if values.is_empty() {
            return values;
        }

        if values.len() < self.config.numeric_threshold {
            insertion_sort(&mut values);
            return values;
        }

        let base = select_base(values.iter().map(|value| value.magnitude()));

        // Only a negative minimum shifts the data
        let min = values.iter().copied().min().unwrap_or(T::ZERO);
        let origin = if min < T::ZERO { min } else { T::ZERO };

        let mut work: Vec<u64> = values.iter().map(|value| value.offset_from(origin)).collect();
        let max = work.iter().copied().max().unwrap_or(0);
        let mut scratch = vec![0u64; work.len()];

        let dispatcher = self.dispatcher(work.len());

        let mut exp: u64 = 1;
        let mut passes = 0usize;
        while max / exp > 0 {
            digit_pass(dispatcher.as_ref(), &mut work, &mut scratch, exp, base);
            passes += 1;
            // An overflowing divisor exceeds every value: all digits are consumed
            match exp.checked_mul(base) {
                Some(next) => exp = next,
                None => break,
            }
        }

        debug!(
            "numeric radix sort: len={} base={} passes={} shifted={} workers={}",
            work.len(),
            base,
            passes,
            min < T::ZERO,
            dispatcher.as_ref().map_or(1, Dispatcher::workers),
        );

        for (slot, offset) in values.iter_mut().zip(work) {
            *slot = T::from_offset(offset, origin);
        }
        values
    }

    /// Sort strings in ascending byte order, shorter strings first on a common prefix
    pub fn sort_strings<S: AsRef<str>>(&self, values: Vec<S>) -> Vec<S> {
        string_radix::sort_strings(values, &self.config)
    }

    /// Worker pool for one numeric sort, or `None` to stay on this thread
    fn dispatcher(&self, len: usize) -> Option<Dispatcher> {
        if !self.config.parallel {
            return None;
        }

        let workers = self.config.effective_thread_count().min(len);
        match Dispatcher::new(workers) {
            Ok(dispatcher) => Some(dispatcher),
            Err(err) => {
                debug!("{err}, using sequential passes");
                None
            }
        }
    }
}
