use std::time::Instant;

use log::{debug, trace};

use crate::config::SortConfig;
use crate::digit::DigitPass;
use crate::histogram::{Histogram, bin_starts, count_pass, count_recursive};
use crate::partition::{OffsetTable, PartitionLayout, partition_histograms};
use crate::scatter::{scatter_partitioned, scatter_sequential};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Engine {
    /// Histograms for every pass up front by recursive halving; sequential scatter.
    Recursive,
    /// Per-partition histograms each pass; one scatter task per partition.
    Partitioned,
    /// Single-threaded baseline.
    Sequential,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::Recursive, Engine::Partitioned, Engine::Sequential];

    pub fn name(self) -> &'static str {
        match self {
            Engine::Recursive => "radix (recursive counts)",
            Engine::Partitioned => "radix (partitioned)",
            Engine::Sequential => "radix (sequential)",
        }
    }
}

/// Which buffer holds the output of the most recent pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Buffer {
    Input,
    Aux,
}

impl Buffer {
    fn flip(self) -> Self {
        match self {
            Buffer::Input => Buffer::Aux,
            Buffer::Aux => Buffer::Input,
        }
    }
}

/// Run `passes` digit passes, dealing from one buffer into the other and
/// swapping roles after each. Returns where the last pass wrote.
pub fn run_passes(
    keys: &mut [u32],
    aux: &mut [u32],
    passes: usize,
    mut deal: impl FnMut(DigitPass, &[u32], &mut [u32]),
) -> Buffer {
    debug_assert_eq!(keys.len(), aux.len());
    let mut current = Buffer::Input;
    for pass in DigitPass::first(passes) {
        let start = Instant::now();
        match current {
            Buffer::Input => deal(pass, keys, aux),
            Buffer::Aux => deal(pass, aux, keys),
        }
        current = current.flip();
        trace!("pass {} time: {:?}", pass.index, start.elapsed());
    }
    current
}

/// Leave the result in `keys` no matter where the pass loop finished.
pub fn reconcile(keys: &mut [u32], aux: &[u32], current: Buffer) {
    if current == Buffer::Aux {
        let start = Instant::now();
        keys.copy_from_slice(aux);
        debug!("final copy time: {:?}", start.elapsed());
    }
}

pub fn sort_recursive(keys: &mut [u32], config: &SortConfig) {
    if keys.len() < 2 {
        return;
    }
    let counts_start = Instant::now();
    let histograms = count_recursive(keys, config.histogram_threshold());
    debug_assert_eq!(histograms.total(), keys.len());
    let starts: Vec<Histogram> = histograms.counts.iter().map(bin_starts).collect();
    debug!("counts time: {:?}", counts_start.elapsed());

    let mut aux = vec![0u32; keys.len()];
    let passes_start = Instant::now();
    let current = run_passes(keys, &mut aux, config.digit_passes(), |pass, src, dst| {
        scatter_sequential(src, dst, &starts[pass.index], pass)
    });
    debug!("passes time: {:?}", passes_start.elapsed());
    reconcile(keys, &aux, current);
}

pub fn sort_partitioned(keys: &mut [u32], config: &SortConfig) {
    if keys.len() < 2 {
        return;
    }
    let layout = PartitionLayout::new(keys.len(), config.work_quantum());
    trace!("{} partitions of {} keys", layout.count(), layout.quantum());

    let mut aux = vec![0u32; keys.len()];
    let passes_start = Instant::now();
    let current = run_passes(keys, &mut aux, config.digit_passes(), |pass, src, dst| {
        let counts = partition_histograms(src, &layout, pass);
        let offsets = OffsetTable::from_histograms(&counts);
        scatter_partitioned(src, dst, &layout, &counts, &offsets, pass);
    });
    debug!("passes time: {:?}", passes_start.elapsed());
    reconcile(keys, &aux, current);
}

pub fn sort_sequential(keys: &mut [u32], config: &SortConfig) {
    if keys.len() < 2 {
        return;
    }
    let mut aux = vec![0u32; keys.len()];
    let passes_start = Instant::now();
    let current = run_passes(keys, &mut aux, config.digit_passes(), |pass, src, dst| {
        scatter_sequential(src, dst, &bin_starts(&count_pass(src, pass)), pass)
    });
    debug!("passes time: {:?}", passes_start.elapsed());
    reconcile(keys, &aux, current);
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGINES: [fn(&mut [u32], &SortConfig); 3] = [sort_recursive, sort_partitioned, sort_sequential];

    #[test]
    fn buffer_roles_follow_pass_parity() {
        for (passes, expected) in [(1, Buffer::Aux), (2, Buffer::Input), (3, Buffer::Aux), (4, Buffer::Input)] {
            let mut keys = vec![3u32, 1, 2];
            let mut aux = vec![0u32; 3];
            let mut seen = Vec::new();
            let current = run_passes(&mut keys, &mut aux, passes, |pass, src, dst| {
                seen.push(pass.index);
                dst.copy_from_slice(src);
            });
            assert_eq!(current, expected, "{passes} passes");
            assert_eq!(seen, (0..passes).collect::<Vec<_>>());
        }
    }

    #[test]
    fn reconcile_copies_only_from_aux() {
        let mut keys = vec![9u32, 9];
        reconcile(&mut keys, &[1, 2], Buffer::Input);
        assert_eq!(keys, vec![9, 9]);
        reconcile(&mut keys, &[1, 2], Buffer::Aux);
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn odd_pass_count_lands_in_caller_buffer() {
        let original: Vec<u32> = vec![0x0003_0201, 0x0001_0203, 0x0002_0000, 0x0000_00FF, 0x0001_0000];
        let mut expected = original.clone();
        expected.sort_unstable();
        for engine_sort in ENGINES {
            let mut keys = original.clone();
            let config = SortConfig::default().with_digit_passes(3).with_work_quantum(2);
            engine_sort(&mut keys, &config);
            assert_eq!(keys, expected);
        }
    }

    #[test]
    fn tiny_inputs_are_untouched() {
        let config = SortConfig::default();
        for engine_sort in ENGINES {
            let mut empty: Vec<u32> = vec![];
            engine_sort(&mut empty, &config);
            assert!(empty.is_empty());
            let mut one = vec![42u32];
            engine_sort(&mut one, &config);
            assert_eq!(one, vec![42]);
        }
    }
}
