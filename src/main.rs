//! Bounded Cache - benchmark and walkthrough runner
//!
//! Replays the reference access pattern on a small cache, then times both
//! caches at growing sizes and prints the report as JSON on stdout.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bounded_cache::{bench, Config};

/// Main entry point for the bounded cache benchmark.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Run the walkthrough on a cache of the configured capacity
/// 4. Time the configured policy at every benchmark size
/// 5. Print the report to stdout
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bounded_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting bounded cache benchmark");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: policy={}, capacity={}, sizes={:?}, reads={}",
        config.policy, config.capacity, config.bench_sizes, config.bench_reads
    );

    let walkthrough = bench::walkthrough(config.policy, config.capacity);
    info!(
        "Walkthrough finished: survivors={:?}, evicted={:?}, hit_rate={:.2}",
        walkthrough.survivors,
        walkthrough.evicted,
        walkthrough.stats.hit_rate()
    );

    let report = bench::run(&config);
    for sample in &report.samples {
        info!(
            "size={:>6}: put {:.1}ns, get {:.1}ns, evicting put {:.1}ns",
            sample.size, sample.put_ns, sample.get_ns, sample.evict_ns
        );
    }
    info!(
        "Variance ratios (close to 1.0 means constant time): put={:.2}, get={:.2}, evict={:.2}",
        report.variance.put, report.variance.get, report.variance.evict
    );

    let output = serde_json::json!({
        "walkthrough": walkthrough,
        "benchmark": report,
    });
    let json = serde_json::to_string_pretty(&output).context("failed to serialize report")?;
    println!("{}", json);

    info!("Benchmark complete");
    Ok(())
}
