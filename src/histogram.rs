use crate::digit::{BINS, DigitPass, PASSES};

pub type Histogram = [usize; BINS];

/// Bin counts for every digit pass, gathered in a single scan.
///
/// Kept on the heap: the recursive builder hands these up through every
/// level of `rayon::join`, and each frame should only carry a pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigitHistograms {
    pub counts: Vec<Histogram>,
}

impl Default for DigitHistograms {
    fn default() -> Self {
        Self {
            counts: vec![[0; BINS]; PASSES],
        }
    }
}

impl DigitHistograms {
    pub fn pass(&self, pass: DigitPass) -> &Histogram {
        &self.counts[pass.index]
    }

    /// Element-wise sum. Order of merging never changes the result.
    pub fn merge(&mut self, other: &DigitHistograms) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            for (a, b) in mine.iter_mut().zip(theirs.iter()) {
                *a += *b;
            }
        }
    }

    /// Total number of keys counted, taken from the first pass.
    pub fn total(&self) -> usize {
        self.counts[0].iter().sum()
    }
}

/// One read per key, four digit extractions.
pub fn count_sequential(keys: &[u32]) -> DigitHistograms {
    let mut histograms = DigitHistograms::default();
    for &key in keys {
        for pass in DigitPass::all() {
            histograms.counts[pass.index][pass.digit(key)] += 1;
        }
    }
    histograms
}

/// Bin counts for a single pass.
pub fn count_pass(keys: &[u32], pass: DigitPass) -> Histogram {
    let mut counts = [0usize; BINS];
    for &key in keys {
        counts[pass.digit(key)] += 1;
    }
    counts
}

/// Split in half until a piece is at most `threshold` keys, count the halves
/// on the rayon pool, and add the results on the way back up.
pub fn count_recursive(keys: &[u32], threshold: usize) -> DigitHistograms {
    debug_assert!(threshold > 0);
    if keys.len() <= threshold {
        return count_sequential(keys);
    }
    let (left, right) = keys.split_at(keys.len() / 2);
    let (mut left, right) = rayon::join(
        || count_recursive(left, threshold),
        || count_recursive(right, threshold),
    );
    left.merge(&right);
    left
}

/// Exclusive prefix sum: where the first key of each bin goes.
pub fn bin_starts(counts: &Histogram) -> Histogram {
    let mut starts = [0usize; BINS];
    let mut pos = 0;
    for (start, &count) in starts.iter_mut().zip(counts.iter()) {
        *start = pos;
        pos += count;
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_keys(len: usize, seed: u64) -> Vec<u32> {
        let mut rng = fastrand::Rng::with_seed(seed);
        (0..len).map(|_| rng.u32(..)).collect()
    }

    #[test]
    fn empty_range_is_all_zero() {
        assert_eq!(count_recursive(&[], 4), DigitHistograms::default());
        assert_eq!(count_sequential(&[]).total(), 0);
    }

    #[test]
    fn every_pass_sums_to_len() {
        let keys = random_keys(10_007, 1);
        let histograms = count_recursive(&keys, 100);
        for pass in DigitPass::all() {
            assert_eq!(histograms.pass(pass).iter().sum::<usize>(), keys.len());
        }
    }

    #[test]
    fn recursion_shape_does_not_matter() {
        let keys = random_keys(5_000, 2);
        let reference = count_sequential(&keys);
        for threshold in [1, 3, 64, 4_999, 5_000, 1 << 20] {
            assert_eq!(count_recursive(&keys, threshold), reference, "threshold {threshold}");
        }
    }

    #[test]
    fn deep_recursion_stays_within_worker_stacks() {
        let keys = random_keys(100_000, 4);
        let histograms = count_recursive(&keys, 4);
        assert_eq!(histograms, count_sequential(&keys));
        assert_eq!(histograms.total(), keys.len());
    }

    #[test]
    fn merge_adds_in_place() {
        let mut left = count_sequential(&[1, 2, 3]);
        left.merge(&count_sequential(&[3, 0x0100]));
        assert_eq!(left, count_sequential(&[1, 2, 3, 3, 0x0100]));
    }

    #[test]
    fn counts_each_byte() {
        let histograms = count_sequential(&[0x0403_0201, 0x0403_0201, 0xFF00_0000]);
        assert_eq!(histograms.counts[0][1], 2);
        assert_eq!(histograms.counts[0][0], 1);
        assert_eq!(histograms.counts[1][2], 2);
        assert_eq!(histograms.counts[2][3], 2);
        assert_eq!(histograms.counts[3][4], 2);
        assert_eq!(histograms.counts[3][0xFF], 1);
    }

    #[test]
    fn single_pass_matches_all_pass_scan() {
        let keys = random_keys(777, 3);
        let histograms = count_sequential(&keys);
        for pass in DigitPass::all() {
            assert_eq!(&count_pass(&keys, pass), histograms.pass(pass));
        }
    }

    #[test]
    fn bin_starts_are_exclusive_prefix_sums() {
        let mut counts = [0usize; BINS];
        counts[0] = 3;
        counts[2] = 1;
        counts[255] = 4;
        let starts = bin_starts(&counts);
        assert_eq!(starts[0], 0);
        assert_eq!(starts[1], 3);
        assert_eq!(starts[2], 3);
        assert_eq!(starts[3], 4);
        assert_eq!(starts[255], 4);
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }
}
