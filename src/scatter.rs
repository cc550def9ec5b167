use rayon::prelude::*;

use crate::digit::{BINS, DigitPass};
use crate::histogram::Histogram;
use crate::partition::{OffsetTable, PartitionLayout};

/// Deal `src` into `dst` using one table of bin starts.
pub fn scatter_sequential(src: &[u32], dst: &mut [u32], starts: &Histogram, pass: DigitPass) {
    debug_assert_eq!(src.len(), dst.len());
    let mut heads = *starts;
    for &key in src {
        let head = &mut heads[pass.digit(key)];
        dst[*head] = key;
        *head += 1;
    }
}

/// Everything one partition needs to deal its keys: its own source slice and
/// the destination windows it alone may write, one per bin.
pub struct ScatterTask<'a> {
    pub partition: usize,
    pub pass: DigitPass,
    src: &'a [u32],
    windows: Vec<&'a mut [u32]>,
}

impl ScatterTask<'_> {
    pub fn run(mut self) {
        let mut cursors = [0usize; BINS];
        for &key in self.src {
            let bin = self.pass.digit(key);
            self.windows[bin][cursors[bin]] = key;
            cursors[bin] += 1;
        }
        debug_assert!(
            self.windows
                .iter()
                .zip(cursors.iter())
                .all(|(window, &cursor)| window.len() == cursor),
            "partition {} did not fill its windows",
            self.partition
        );
    }
}

/// Cut `dst` into the `(partition, bin)` windows described by `offsets`.
///
/// Window `(p, b)` is `offsets.row(p)[b]..offsets.row(p)[b] + counts[p][b]`.
/// Windows are taken in bin-major, partition-minor order and each must start
/// where the previous one ended, so every split is a plain `split_at_mut`
/// and no two windows can overlap.
fn carve<'a>(dst: &'a mut [u32], counts: &[Histogram], offsets: &OffsetTable) -> Vec<Vec<&'a mut [u32]>> {
    let partitions = counts.len();
    assert_eq!(offsets.partitions(), partitions);
    let mut windows: Vec<Vec<&mut [u32]>> = (0..partitions).map(|_| Vec::with_capacity(BINS)).collect();
    let mut rest = dst;
    let mut pos = 0;
    for bin in 0..BINS {
        for p in 0..partitions {
            let start = offsets.row(p)[bin];
            assert_eq!(start, pos, "offset table is not contiguous at bin {bin}, partition {p}");
            let end = start + counts[p][bin];
            let (window, tail) = std::mem::take(&mut rest).split_at_mut(end - start);
            windows[p].push(window);
            rest = tail;
            pos = end;
        }
    }
    assert!(rest.is_empty(), "offset table covers {pos} of {} slots", pos + rest.len());
    windows
}

pub fn scatter_tasks<'a>(
    src: &'a [u32],
    dst: &'a mut [u32],
    layout: &PartitionLayout,
    counts: &[Histogram],
    offsets: &OffsetTable,
    pass: DigitPass,
) -> Vec<ScatterTask<'a>> {
    debug_assert_eq!(src.len(), dst.len());
    src.chunks(layout.quantum())
        .zip(carve(dst, counts, offsets))
        .enumerate()
        .map(|(partition, (src, windows))| ScatterTask {
            partition,
            pass,
            src,
            windows,
        })
        .collect()
}

/// One rayon task per full partition; a short final partition is dealt on
/// the calling thread once the others have finished.
pub fn scatter_partitioned(
    src: &[u32],
    dst: &mut [u32],
    layout: &PartitionLayout,
    counts: &[Histogram],
    offsets: &OffsetTable,
    pass: DigitPass,
) {
    let mut tasks = scatter_tasks(src, dst, layout, counts, offsets, pass);
    let tail = if layout.has_short_tail() { tasks.pop() } else { None };
    tasks.into_par_iter().for_each(ScatterTask::run);
    if let Some(task) = tail {
        task.run();
    }
}
