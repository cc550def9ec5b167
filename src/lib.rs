//! Parallel LSD radix sort for `u32` keys.
//!
//! Four 8-bit digit passes, least significant byte first, each a stable
//! counting sort from one buffer into the other. Two parallel engines:
//!
//! - [`Engine::Recursive`] counts all four digit histograms once, up front,
//!   by splitting the input in half on the rayon pool until pieces fall under
//!   the histogram threshold, then deals each pass sequentially.
//! - [`Engine::Partitioned`] cuts the input into fixed-size work partitions,
//!   counts one histogram per partition each pass, derives per-partition
//!   write offsets, and deals every partition as its own rayon task. Each task
//!   owns disjoint windows of the destination, so no locks or atomics.
//!
//! [`Engine::Sequential`] is the single-threaded baseline.
//!
//! The sorted result always ends up in the caller's buffer; the auxiliary
//! buffer never escapes.

mod config;
pub mod digit;
mod engine;
pub mod histogram;
pub mod partition;
pub mod scatter;
mod sorter;

pub use config::{ConfigError, SortConfig};
pub use engine::{Buffer, Engine, reconcile, run_passes};
pub use sorter::RadixSorter;

/// Sort with the recursive-counting engine and default tuning.
pub fn sort_radix_parallel_recursive(mut keys: Vec<u32>) -> Vec<u32> {
    RadixSorter::default().sort_recursive(&mut keys);
    keys
}

/// Sort with the partitioned-task engine and default tuning.
pub fn sort_radix_parallel_partitioned(mut keys: Vec<u32>) -> Vec<u32> {
    RadixSorter::default().sort_partitioned(&mut keys);
    keys
}

/// Sort on the calling thread with one counting scan per pass. Baseline for
/// the parallel engines.
pub fn sort_radix_sequential(mut keys: Vec<u32>) -> Vec<u32> {
    RadixSorter::default().sort_sequential(&mut keys);
    keys
}
