use parallel_radix_sort::{Engine, RadixSorter};
use rayon::prelude::*;
use std::time::{Duration, Instant};
use voracious_radix_sort::RadixSort;

fn benchmark(name: &str, repeats: usize, data: &[u32], expected: &[u32], mut f: impl FnMut(&mut Vec<u32>)) {
    // Warmup, and check the output once.
    let mut out = data.to_vec();
    f(&mut out);
    assert!(out == expected, "{name} produced unsorted output");
    let mut total = Duration::ZERO;
    for _ in 0..repeats {
        let mut v = data.to_vec();
        let start = Instant::now();
        f(&mut v);
        total += start.elapsed();
    }
    println!("  {}: {}", name, human_time(repeats, total));
}

/// Mean time per run, scaled to the largest unit that keeps it above 1.
fn human_time(repeats: usize, total: Duration) -> String {
    let mut per_run = total.as_nanos() as f64 / repeats.max(1) as f64;
    for unit in ["ns", "us", "ms"] {
        if per_run < 1000.0 {
            return format!("{per_run:.1}{unit}");
        }
        per_run /= 1000.0;
    }
    format!("{per_run:.1}s")
}

/// Input sizes here are powers of two from 4KiB up, so KiB and MiB suffice.
fn human_size(bytes: usize) -> String {
    if bytes < 1 << 20 {
        format!("{}KiB", bytes >> 10)
    } else {
        format!("{}MiB", bytes >> 20)
    }
}

fn main() {
    let mut rng = fastrand::Rng::with_seed(0);
    let sorter = RadixSorter::default();
    let threads = rayon::current_num_threads();
    for lg_size in [10, 15, 20, 25] {
        let data: Vec<u32> = (0..1usize << lg_size).map(|_| rng.u32(..)).collect();
        let mut expected = data.clone();
        expected.sort_unstable();
        let repeats = 1usize << 27usize.saturating_sub(lg_size).min(10);
        println!(
            "size: {}",
            human_size(std::mem::size_of::<u32>() * data.len())
        );

        benchmark("sort_unstable", repeats, &data, &expected, |v| v.sort_unstable());
        benchmark("par_sort_unstable", repeats, &data, &expected, |v| v.par_sort_unstable());
        benchmark("voracious_mt_sort", repeats, &data, &expected, |v| {
            v.voracious_mt_sort(threads)
        });
        for engine in Engine::ALL {
            benchmark(engine.name(), repeats, &data, &expected, |v| sorter.sort(engine, v));
        }
    }
}
