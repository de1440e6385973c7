//! Dual-mode radix sort engine
//!
//! Sorts fixed-width signed integers with an LSD radix sort whose base adapts
//! to the data's magnitude, fanning each digit's counting phase out to a
//! worker pool, and sorts strings with a fixed-width LSD radix sort over byte
//! positions. Small inputs go to an insertion sort.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

// Engine components
pub mod small_sort;
pub mod base;
pub mod counting;
pub mod radix_sort;
pub mod string_radix;

// Command line support
pub mod args;
pub mod input;

// Re-export commonly used types
pub use args::SortArgs;
pub use config::{EngineConfig, EngineConfigBuilder, StringPadding};
pub use error::{DispatchError, SortError, SortResult};
pub use radix_sort::{RadixKey, RadixSort};

/// Exit codes matching GNU sort
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;

/// Sort signed integers ascending with the default configuration
pub fn sort_numeric<T: RadixKey>(values: Vec<T>) -> Vec<T> {
    RadixSort::default().sort_numeric(values)
}

/// Sort strings ascending with the default configuration
pub fn sort_strings<S: AsRef<str>>(values: Vec<S>) -> Vec<S> {
    RadixSort::default().sort_strings(values)
}

/// Read, sort (or check) and write lines according to `args`
pub fn sort(args: &SortArgs, config: &EngineConfig) -> SortResult<i32> {
    config.validate()?;

    let delimiter = args.delimiter();
    let inputs = input::InputSet::open(&args.files)?;
    let lines = inputs.lines(delimiter)?;
    let sorter = RadixSort::new(config.clone());

    if args.numeric_sort {
        let values = input::parse_integers(&lines)?;
        if args.check {
            return check(input::first_disorder(&values, |a, b| a < b));
        }
        let sorted = sorter.sort_numeric(values);
        input::write_output(&sorted, args.output.as_deref(), delimiter)?;
    } else {
        if args.check {
            let padding = config.string_padding;
            return check(input::first_disorder(&lines, |a, b| {
                string_radix::string_less(padding, a.as_bytes(), b.as_bytes())
            }));
        }
        let sorted = sorter.sort_strings(lines);
        input::write_output(&sorted, args.output.as_deref(), delimiter)?;
    }

    Ok(EXIT_SUCCESS)
}

fn check(disorder: Option<usize>) -> SortResult<i32> {
    match disorder {
        Some(line) => Err(SortError::not_sorted(line)),
        None => Ok(EXIT_SUCCESS),
    }
}
