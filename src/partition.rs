use std::ops::Range;

use crate::digit::{BINS, DigitPass};
use crate::histogram::{Histogram, count_pass};

/// Contiguous work partitions of `quantum` keys; only the last may be shorter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionLayout {
    len: usize,
    quantum: usize,
}

impl PartitionLayout {
    pub fn new(len: usize, quantum: usize) -> Self {
        assert!(quantum > 0, "work quantum must be non-zero");
        Self { len, quantum }
    }

    pub fn quantum(&self) -> usize {
        self.quantum
    }

    pub fn count(&self) -> usize {
        self.len.div_ceil(self.quantum)
    }

    pub fn range(&self, partition: usize) -> Range<usize> {
        let start = (partition * self.quantum).min(self.len);
        start..(start + self.quantum).min(self.len)
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count()).map(|p| self.range(p).len())
    }

    /// True when the final partition holds fewer than `quantum` keys.
    pub fn has_short_tail(&self) -> bool {
        self.len % self.quantum != 0
    }
}

/// One histogram per partition for the given pass, in partition order.
pub fn partition_histograms(keys: &[u32], layout: &PartitionLayout, pass: DigitPass) -> Vec<Histogram> {
    debug_assert_eq!(keys.len(), layout.len);
    keys.chunks(layout.quantum)
        .map(|chunk| count_pass(chunk, pass))
        .collect()
}

/// Per-partition write cursors into the destination buffer.
///
/// Row `p`, bin `b` is where partition `p` writes its first key with digit
/// `b`. Within a bin, partitions follow each other in order; bins follow each
/// other in digit order. Every `(p, b)` window is therefore disjoint from all
/// others and the windows tile the destination exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffsetTable {
    rows: Vec<Histogram>,
}

impl OffsetTable {
    pub fn from_histograms(counts: &[Histogram]) -> Self {
        let partitions = counts.len();
        let mut rows = vec![[0usize; BINS]; partitions];
        let Some(last) = partitions.checked_sub(1) else {
            return Self { rows };
        };

        // Start of each partition's run inside its bin, ignoring the other bins.
        for p in 1..partitions {
            for bin in 0..BINS {
                rows[p][bin] = rows[p - 1][bin] + counts[p - 1][bin];
            }
        }

        // Shift bin `b` past the end of bin `b - 1`. The last row of the
        // previous bin is already global by the time it is read.
        for bin in 1..BINS {
            let carry = rows[last][bin - 1] + counts[last][bin - 1];
            for row in rows.iter_mut() {
                row[bin] += carry;
            }
        }

        Self { rows }
    }

    pub fn partitions(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, partition: usize) -> &Histogram {
        &self.rows[partition]
    }
}
