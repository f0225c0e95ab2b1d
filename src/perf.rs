//! Performance driver - times bulk roster operations across input sizes.
//!
//! For each size the driver:
//! 1. Adds every generated student (timed as one batch)
//! 2. Searches random ids
//! 3. Updates a random student's "Math" grade
//! 4. Traverses the whole roster once
//! 5. Deletes a random sample of distinct ids
//!
//! Per-call latencies of the sampled operations also feed an HDR histogram
//! so tail latencies can be reported alongside averages.

use std::io::Write;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use hdrhistogram::Histogram;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::command::AddStudent;
use crate::error::PerfError;
use crate::roster::Roster;
use crate::workload::generate_students;

/// Input sizes the driver runs by default
pub const DEFAULT_SIZES: [usize; 5] = [100, 500, 1000, 5000, 10000];

/// Sampled searches/updates/deletes per size by default
pub const DEFAULT_SAMPLES: usize = 100;

/// Highest latency the histograms track (60 s)
const MAX_TRACKED_NS: u64 = 60_000_000_000;

/// Driver settings.
#[derive(Clone, Debug)]
pub struct PerfConfig {
    /// Roster sizes to test
    pub sizes: Vec<usize>,
    /// Seed for data generation and sampling
    pub seed: u64,
    /// Sampled operations per size for search/update/delete
    pub samples: usize,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            seed: 0x5EED,
            samples: DEFAULT_SAMPLES,
        }
    }
}

/// One row of results, one per input size.
#[derive(Clone, Debug, Serialize)]
pub struct PerfResult {
    #[serde(rename = "Input Size")]
    pub input_size: usize,
    #[serde(rename = "Add Time (s)")]
    pub add_time_s: f64,
    #[serde(rename = "Avg Search Time (s)")]
    pub avg_search_time_s: f64,
    #[serde(rename = "Avg Update Time (s)")]
    pub avg_update_time_s: f64,
    #[serde(rename = "Traversal Time (s)")]
    pub traversal_time_s: f64,
    #[serde(rename = "Avg Delete Time (s)")]
    pub avg_delete_time_s: f64,
    #[serde(rename = "P99 Search (ns)")]
    pub p99_search_ns: u64,
    #[serde(rename = "P99 Delete (ns)")]
    pub p99_delete_ns: u64,
    #[serde(rename = "Memory Usage (items)")]
    pub memory_usage_items: usize,
    #[serde(rename = "Memory Footprint (bytes)")]
    pub memory_footprint_bytes: usize,
    #[serde(rename = "Run At")]
    pub run_at: DateTime<Utc>,
}

/// Per-call timing accumulator.
struct Timings {
    total: Duration,
    calls: u32,
    histogram: Histogram<u64>,
}

impl Timings {
    fn new() -> Result<Self, PerfError> {
        Ok(Self {
            total: Duration::ZERO,
            calls: 0,
            histogram: Histogram::new_with_bounds(1, MAX_TRACKED_NS, 3)?,
        })
    }

    #[inline]
    fn record(&mut self, elapsed: Duration) {
        self.total += elapsed;
        self.calls += 1;
        self.histogram.saturating_record(elapsed.as_nanos() as u64);
    }

    fn average_secs(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.total.as_secs_f64() / self.calls as f64
        }
    }

    fn p99_ns(&self) -> u64 {
        self.histogram.value_at_quantile(0.99)
    }
}

/// Pin the current thread to the last available CPU core.
///
/// The last core is typically isolated from OS interrupts. Returns false if
/// the platform refused.
pub fn pin_to_core() -> bool {
    core_affinity::get_core_ids()
        .and_then(|core_ids| core_ids.last().copied())
        .map_or(false, core_affinity::set_for_current)
}

/// Run the driver for every configured size.
pub fn run_performance_test(config: &PerfConfig) -> Result<Vec<PerfResult>, PerfError> {
    if config.sizes.is_empty() {
        return Err(PerfError::Config("no input sizes given".to_string()));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    config
        .sizes
        .iter()
        .map(|&size| run_size(&mut rng, size, config.samples))
        .collect()
}

/// Time every operation for a single roster size.
pub fn run_size(rng: &mut ChaCha8Rng, size: usize, samples: usize) -> Result<PerfResult, PerfError> {
    let mut roster: Roster<u64> = Roster::new();
    let test_data = generate_students(rng, size);
    let ids: Vec<u64> = test_data.iter().map(|s| s.id).collect();

    // Test 1: Adding students
    let add_time = time_adds(&mut roster, test_data)?;

    // Test 2: Searching
    let mut search = Timings::new()?;
    if !ids.is_empty() {
        for _ in 0..samples {
            let id = ids[rng.gen_range(0..ids.len())];
            let start = Instant::now();
            std::hint::black_box(roster.search(&id));
            search.record(start.elapsed());
        }
    }

    // Test 3: Updating grades
    let mut update = Timings::new()?;
    if !ids.is_empty() {
        for _ in 0..samples {
            let id = ids[rng.gen_range(0..ids.len())];
            let grade = rng.gen_range(60u32..=100);
            let start = Instant::now();
            let _ = std::hint::black_box(roster.update_grade(&id, "Math", grade));
            update.record(start.elapsed());
        }
    }

    // Test 4: Traversal
    let start = Instant::now();
    std::hint::black_box(roster.get_all());
    let traversal_time = start.elapsed();

    let memory_usage_items = roster.len();
    let memory_footprint_bytes = roster.memory_footprint();

    // Test 5: Deletion of distinct ids
    let mut delete = Timings::new()?;
    let delete_ids: Vec<u64> = ids
        .choose_multiple(rng, samples.min(ids.len()))
        .copied()
        .collect();
    for id in delete_ids {
        let start = Instant::now();
        let _ = std::hint::black_box(roster.delete(&id));
        delete.record(start.elapsed());
    }

    Ok(PerfResult {
        input_size: size,
        add_time_s: add_time.as_secs_f64(),
        avg_search_time_s: search.average_secs(),
        avg_update_time_s: update.average_secs(),
        traversal_time_s: traversal_time.as_secs_f64(),
        avg_delete_time_s: delete.average_secs(),
        p99_search_ns: search.p99_ns(),
        p99_delete_ns: delete.p99_ns(),
        memory_usage_items,
        memory_footprint_bytes,
        run_at: Utc::now(),
    })
}

/// Add every student as one timed batch.
///
/// A rejected add means the workload is broken, so the batch time would not
/// measure what it claims; that fails the run after the clock stops.
pub fn time_adds(
    roster: &mut Roster<u64>,
    students: Vec<AddStudent<u64>>,
) -> Result<Duration, PerfError> {
    let mut rejected = Vec::new();

    let start = Instant::now();
    for student in students {
        if let Err(err) = roster.add(student.id, student.name, Some(student.grades)) {
            rejected.push(err);
        }
    }
    let elapsed = start.elapsed();

    match rejected.first() {
        None => Ok(elapsed),
        Some(first) => Err(PerfError::Workload(format!(
            "{} of the generated adds were rejected, first: {}",
            rejected.len(),
            first
        ))),
    }
}

/// Write results as CSV with a header row.
pub fn write_csv<W: Write>(results: &[PerfResult], writer: W) -> Result<(), PerfError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for result in results {
        wtr.serialize(result)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render results as a fixed-width text table.
pub fn format_table(results: &[PerfResult]) -> String {
    let mut out = String::new();
    out.push_str("\nPerformance Test Results:\n");
    out.push_str(&"-".repeat(100));
    out.push('\n');
    out.push_str(&format!(
        "{:>10} | {:>12} | {:>14} | {:>14} | {:>12} | {:>14} | {:>10}\n",
        "Size", "Add (s)", "Search (s)", "Update (s)", "Traverse (s)", "Delete (s)", "Items"
    ));
    out.push_str(&"-".repeat(100));
    out.push('\n');
    for r in results {
        out.push_str(&format!(
            "{:>10} | {:>12.6} | {:>14.9} | {:>14.9} | {:>12.6} | {:>14.9} | {:>10}\n",
            r.input_size,
            r.add_time_s,
            r.avg_search_time_s,
            r.avg_update_time_s,
            r.traversal_time_s,
            r.avg_delete_time_s,
            r.memory_usage_items
        ));
    }
    out
}
