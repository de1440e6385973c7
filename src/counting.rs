//! Counting sort digit passes over the biased `u64` working buffer.
//!
//! A pass reorders the buffer stably by `(value / exp) % base`. Counting can
//! be fanned out to a worker pool; the merge and the scatter always run on the
//! calling thread. Any failure to fan out is answered with the sequential pass
//! before the buffer is touched, so both paths leave identical bytes behind.

use crate::error::DispatchError;
use crossbeam_channel::unbounded;
use log::{debug, trace};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::panic::{self, AssertUnwindSafe};

/// Per-bucket occurrence counts for one digit position
pub type Histogram = Vec<usize>;

#[inline(always)]
fn digit(value: u64, exp: u64, base: u64) -> usize {
    ((value / exp) % base) as usize
}

/// Count digit buckets over one chunk
pub fn local_histogram(chunk: &[u64], exp: u64, base: u64) -> Histogram {
    let mut counts = vec![0usize; base as usize];
    for &value in chunk {
        counts[digit(value, exp, base)] += 1;
    }
    counts
}

/// Element-wise sum of a partial histogram into the global one
pub fn merge_into(global: &mut [usize], partial: &[usize]) {
    for (total, count) in global.iter_mut().zip(partial) {
        *total += count;
    }
}

/// Turn bucket counts into inclusive running totals
pub(crate) fn accumulate(counts: &mut [usize]) {
    for i in 1..counts.len() {
        counts[i] += counts[i - 1];
    }
}

/// Stable placement of `values` into `scratch` from global counts, then copy back.
///
/// Walking from the last element and decrementing before placing keeps equal
/// digits in their incoming order, which is what carries earlier passes through.
fn scatter(values: &mut [u64], scratch: &mut [u64], mut counts: Histogram, exp: u64, base: u64) {
    accumulate(&mut counts);

    for &value in values.iter().rev() {
        let bucket = digit(value, exp, base);
        counts[bucket] -= 1;
        scratch[counts[bucket]] = value;
    }

    values.copy_from_slice(&scratch[..values.len()]);
}

/// Anything that can produce the global histogram of a digit pass off-thread
pub trait FanOut {
    fn count(&self, values: &[u64], exp: u64, base: u64) -> Result<Histogram, DispatchError>;
}

/// Worker pool owned by a single sort invocation
pub struct Dispatcher {
    pool: ThreadPool,
    workers: usize,
}

impl Dispatcher {
    /// Build a pool of `workers` threads (at least one)
    pub fn new(workers: usize) -> Result<Self, DispatchError> {
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("radix-count-{i}"))
            .build()?;
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl FanOut for Dispatcher {
    fn count(&self, values: &[u64], exp: u64, base: u64) -> Result<Histogram, DispatchError> {
        let mut global = vec![0usize; base as usize];
        if values.is_empty() {
            return Ok(global);
        }

        let workers = self.workers.min(values.len());
        let chunk_size = (values.len() + workers - 1) / workers;
        let expected = (values.len() + chunk_size - 1) / chunk_size;

        let (tx, rx) = unbounded::<Histogram>();

        // The scope returns only after every spawned task has finished
        let fan_out = panic::catch_unwind(AssertUnwindSafe(|| {
            self.pool.scope(|scope| {
                for chunk in values.chunks(chunk_size) {
                    let tx = tx.clone();
                    scope.spawn(move |_| {
                        // The receiver outlives the scope
                        let _ = tx.send(local_histogram(chunk, exp, base));
                    });
                }
            });
        }));
        drop(tx);

        if fan_out.is_err() {
            return Err(DispatchError::WorkerPanicked);
        }

        let mut received = 0;
        while received < expected {
            match rx.recv() {
                Ok(partial) => {
                    merge_into(&mut global, &partial);
                    received += 1;
                }
                Err(_) => return Err(DispatchError::IncompleteFanIn { expected, received }),
            }
        }

        Ok(global)
    }
}

/// Single-histogram counting pass on the calling thread
pub fn run_sequential_pass(values: &mut [u64], scratch: &mut [u64], exp: u64, base: u64) {
    let counts = local_histogram(values, exp, base);
    scatter(values, scratch, counts, exp, base);
}

/// Fan-out counting, then merge and scatter.
///
/// On error the buffer has not been modified.
pub fn run_parallel_pass<D: FanOut + ?Sized>(
    fan_out: &D,
    values: &mut [u64],
    scratch: &mut [u64],
    exp: u64,
    base: u64,
) -> Result<(), DispatchError> {
    let counts = fan_out.count(values, exp, base)?;
    scatter(values, scratch, counts, exp, base);
    Ok(())
}

/// One digit pass: parallel when a fan-out is available, sequential otherwise
/// or when the fan-out fails.
pub fn digit_pass<D: FanOut + ?Sized>(
    fan_out: Option<&D>,
    values: &mut [u64],
    scratch: &mut [u64],
    exp: u64,
    base: u64,
) {
    trace!("digit pass exp={exp} base={base} len={}", values.len());

    let Some(fan_out) = fan_out else {
        run_sequential_pass(values, scratch, exp, base);
        return;
    };

    if let Err(err) = run_parallel_pass(fan_out, values, scratch, exp, base) {
        debug!("parallel counting failed ({err}), using sequential pass");
        run_sequential_pass(values, scratch, exp, base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fan-out that never manages to dispatch
    struct Refusing;

    impl FanOut for Refusing {
        fn count(&self, values: &[u64], _exp: u64, _base: u64) -> Result<Histogram, DispatchError> {
            Err(DispatchError::IncompleteFanIn {
                expected: values.len(),
                received: 0,
            })
        }
    }

    fn sample() -> Vec<u64> {
        (0..5000u64).map(|i| (i * 7919 + 13) % 1009).collect()
    }

    #[test]
    fn test_local_histogram() {
        let counts = local_histogram(&[0, 1, 17, 16, 33], 1, 16);
        assert_eq!(counts.len(), 16);
        assert_eq!(counts[0], 2);
        assert_eq!(counts[1], 3);
        assert_eq!(counts.iter().sum::<usize>(), 5);
    }

    #[test]
    fn test_merge_is_elementwise() {
        let mut global = vec![1, 2, 3];
        merge_into(&mut global, &[4, 0, 1]);
        assert_eq!(global, vec![5, 2, 4]);
    }

    #[test]
    fn test_accumulate_is_inclusive() {
        let mut counts = vec![2, 0, 3, 1];
        accumulate(&mut counts);
        assert_eq!(counts, vec![2, 2, 5, 6]);
    }

    #[test]
    fn test_sequential_pass_orders_by_digit_stably() {
        // Low digit in base 16: 0x21 -> 1, 0x11 -> 1, 0x02 -> 2, 0x10 -> 0
        let mut values = vec![0x21, 0x11, 0x02, 0x10];
        let mut scratch = vec![0; values.len()];
        run_sequential_pass(&mut values, &mut scratch, 1, 16);
        assert_eq!(values, vec![0x10, 0x21, 0x11, 0x02]);
    }

    #[test]
    fn test_parallel_histogram_matches_sequential() {
        let values = sample();
        let dispatcher = Dispatcher::new(4).expect("Failed to build test pool");
        let parallel = dispatcher.count(&values, 16, 256).expect("fan-out failed");
        assert_eq!(parallel, local_histogram(&values, 16, 256));
    }

    #[test]
    fn test_more_workers_than_values() {
        let values = vec![3u64, 1, 2];
        let dispatcher = Dispatcher::new(16).expect("Failed to build test pool");
        let counts = dispatcher.count(&values, 1, 16).expect("fan-out failed");
        assert_eq!(counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn test_parallel_and_sequential_passes_identical() {
        let dispatcher = Dispatcher::new(3).expect("Failed to build test pool");
        let mut parallel = sample();
        let mut sequential = sample();
        let mut scratch = vec![0; parallel.len()];

        let mut exp = 1;
        while 1009 / exp > 0 {
            run_parallel_pass(&dispatcher, &mut parallel, &mut scratch, exp, 16)
                .expect("fan-out failed");
            run_sequential_pass(&mut sequential, &mut scratch, exp, 16);
            exp *= 16;
        }

        assert_eq!(parallel, sequential);
        assert!(parallel.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_failed_fan_out_leaves_buffer_untouched() {
        let mut values = sample();
        let original = values.clone();
        let mut scratch = vec![0; values.len()];
        let result = run_parallel_pass(&Refusing, &mut values, &mut scratch, 1, 16);
        assert!(result.is_err());
        assert_eq!(values, original);
    }

    #[test]
    fn test_digit_pass_falls_back() {
        let mut fallback = sample();
        let mut reference = sample();
        let mut scratch = vec![0; fallback.len()];

        digit_pass(Some(&Refusing), &mut fallback, &mut scratch, 1, 32);
        run_sequential_pass(&mut reference, &mut scratch, 1, 32);

        assert_eq!(fallback, reference);
    }
}
