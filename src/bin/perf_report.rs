use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use flash_roster::perf::{self, PerfConfig, DEFAULT_SAMPLES};

/// Time roster operations across input sizes and export the results.
#[derive(Parser, Debug)]
#[command(name = "perf-report", version, about)]
struct Args {
    /// Roster sizes to test
    #[arg(long, value_delimiter = ',', default_values_t = perf::DEFAULT_SIZES)]
    sizes: Vec<usize>,

    /// Seed for data generation and sampling
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// Sampled searches, updates and deletes per size
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// CSV output path
    #[arg(long, default_value = "performance_results.csv")]
    output: PathBuf,

    /// Pin the driver thread to the last CPU core
    #[arg(long)]
    pin: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.pin {
        let pinned = perf::pin_to_core();
        println!("Pinned to core: {}", pinned);
    }

    let config = PerfConfig {
        sizes: args.sizes,
        seed: args.seed,
        samples: args.samples,
    };

    println!("Starting performance tests (seed {:#x})...", config.seed);
    for size in &config.sizes {
        println!("Running tests with {} students...", size);
    }

    let results = perf::run_performance_test(&config)?;

    print!("{}", perf::format_table(&results));

    println!("\n=== Tail Latency (ns) ===");
    for r in &results {
        println!(
            "Size {:>6}: search P99 {:>8} ns, delete P99 {:>8} ns, footprint {:>10} bytes",
            r.input_size, r.p99_search_ns, r.p99_delete_ns, r.memory_footprint_bytes
        );
    }

    perf::write_csv(&results, File::create(&args.output)?)?;
    println!("\nResults saved to {}", args.output.display());

    Ok(())
}
