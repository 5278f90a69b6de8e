//! Wall-clock timing harness over the public buffer API.
//!
//! Each operation is timed call by call on a buffer pre-filled with random
//! 16-bit samples. For statistically careful numbers use the criterion
//! benches in the library crate; this is the quick interactive version.

use std::hint::black_box;
use std::time::Instant;

use anyhow::Result;
use circq_buffer::{OverflowPolicy, RingBuffer, RingConfig};
use rand::Rng;
use serde::Serialize;
use tracing::info;

/// Timing summary for one operation, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchResult {
    pub name: String,
    pub iterations: usize,
    pub total: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub stddev: f64,
}

impl BenchResult {
    fn from_times(name: &str, times: &[f64]) -> Self {
        let iterations = times.len();
        let total: f64 = times.iter().sum();
        let avg = if iterations > 0 {
            total / iterations as f64
        } else {
            0.0
        };
        let min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max = times.iter().copied().fold(0.0, f64::max);
        // sample standard deviation
        let stddev = if iterations > 1 {
            let sum_sq: f64 = times.iter().map(|t| (t - avg).powi(2)).sum();
            (sum_sq / (iterations - 1) as f64).sqrt()
        } else {
            0.0
        };
        BenchResult {
            name: name.to_string(),
            iterations,
            total,
            avg,
            min: if min.is_finite() { min } else { 0.0 },
            max,
            stddev,
        }
    }
}

/// Times `f` once per iteration.
fn measure<F: FnMut()>(name: &str, iterations: usize, mut f: F) -> BenchResult {
    measure_batched(name, iterations, || (), |()| f())
}

/// Times `f` once per iteration on a fresh input from `setup`. Only `f` is
/// timed.
fn measure_batched<I, S, F>(name: &str, iterations: usize, mut setup: S, mut f: F) -> BenchResult
where
    S: FnMut() -> I,
    F: FnMut(I),
{
    let mut times = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let input = setup();
        let start = Instant::now();
        f(input);
        times.push(start.elapsed().as_secs_f64());
    }
    let result = BenchResult::from_times(name, &times);
    info!(op = name, avg_ns = (result.avg * 1e9) as u64, "bench done");
    result
}

fn random_samples(n: usize) -> Vec<i16> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(i16::MIN..=i16::MAX)).collect()
}

/// Runs the per-operation benchmarks. `resize` is only timed under
/// [`OverflowPolicy::Grow`].
pub fn run(capacity: usize, iterations: usize, policy: OverflowPolicy) -> Result<Vec<BenchResult>> {
    let config = RingConfig::new(capacity).policy(policy);
    let data = random_samples(capacity);
    let buf = RingBuffer::with_items(config, &data)?;
    let mut rng = rand::thread_rng();
    let mut results = Vec::new();

    // The buffer is non-strict, so none of the timed calls can fail.
    results.push(measure("enqueue", iterations, || {
        black_box(buf.enqueue(rng.gen_range(i16::MIN..=i16::MAX)).ok());
    }));

    results.push(measure("dequeue", iterations, || {
        black_box(buf.dequeue().ok());
        black_box(buf.enqueue(rng.gen_range(i16::MIN..=i16::MAX)).ok());
    }));

    results.push(measure("peek", iterations, || {
        black_box(buf.peek().ok());
    }));

    let batch = random_samples(capacity);
    results.push(measure("bulk_enqueue", iterations, || {
        black_box(buf.bulk_enqueue(&batch).ok());
    }));

    results.push(measure("bulk_dequeue", iterations, || {
        black_box(buf.bulk_dequeue(capacity));
        black_box(buf.bulk_enqueue(&batch).ok());
    }));

    if policy == OverflowPolicy::Grow {
        // Each call doubles the capacity, so every iteration starts from a
        // freshly filled buffer.
        results.push(measure_batched(
            "resize",
            iterations,
            || RingBuffer::with_items(config, &data),
            |fresh| {
                if let Ok(fresh) = fresh {
                    black_box(fresh.resize(None).ok());
                }
            },
        ));
    }

    results.push(measure("build_buffer", iterations, || {
        black_box(RingBuffer::with_items(config, &data).ok());
    }));

    Ok(results)
}

/// Formats results as a fixed-width table with times in microseconds.
pub fn format_table(results: &[BenchResult]) -> String {
    let mut out = format!(
        "{:<14} {:>10} {:>12} {:>10} {:>10} {:>10} {:>10}\n",
        "op", "iters", "total(ms)", "avg(us)", "min(us)", "max(us)", "std(us)"
    );
    for r in results {
        out.push_str(&format!(
            "{:<14} {:>10} {:>12.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}\n",
            r.name,
            r.iterations,
            r.total * 1e3,
            r.avg * 1e6,
            r.min * 1e6,
            r.max * 1e6,
            r.stddev * 1e6
        ));
    }
    out
}
