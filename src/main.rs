//! listscope: Listing Export Analysis CLI
//!
//! Loads a listing export, cleans and derives typed fields, and prints
//! summary statistics, a correlation matrix and pairwise views.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing::info;
use tracing_subscriber::EnvFilter;

use listscope::cli::Cli;
use listscope::pipeline::{
    check_columns, correlation_matrix, dataset_stats, get_column_names, load_listings, normalize,
    select_columns, synthesize, to_raw_listings,
};
use listscope::report::{describe, display_correlation, display_pair_views};
use listscope::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
};

/// Initialize the tracing subscriber. Diagnostics go to stderr so the
/// report on stdout stays clean.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = cli
        .pipeline_config()
        .context("Failed to build pipeline configuration")?;

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, &config);

    // Step 1: Load
    print_step_header(1, "Load Export");
    let step_start = Instant::now();
    let header = get_column_names(&cli.input)
        .with_context(|| format!("Failed to read header of {}", cli.input.display()))?;
    check_columns(&header).context("Export does not match the expected schema")?;
    let spinner = create_spinner("Reading listings...");
    let df = load_listings(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;
    finish_with_success(&spinner, "Export loaded");

    let (rows, cols, memory_mb) = dataset_stats(&df);
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    print_step_time(step_start.elapsed());

    // Step 2: Select
    print_step_header(2, "Select Columns");
    let step_start = Instant::now();
    let projected = select_columns(&df).context("Export does not match the expected schema")?;
    let raws = to_raw_listings(&projected)?;
    drop(df);
    print_success(&format!("Selected {} columns", projected.width()));
    print_step_time(step_start.elapsed());

    // Step 3: Normalize
    print_step_header(3, "Normalize Fields");
    let step_start = Instant::now();
    let spinner = create_spinner("Parsing dates, rates, prices and bathrooms...");
    let normalized = normalize(&raws, &config);
    if normalized.failures.total() == 0 {
        finish_with_success(&spinner, "All present values parsed");
    } else {
        finish_with_warning(&spinner, "Some values could not be parsed and were set to null");
        for (column, count) in normalized.failures.iter() {
            print_count("unparsed value(s)", count, Some(&format!("in {}", column)));
        }
    }
    info!(listings = normalized.listings.len(), "normalized");
    print_step_time(step_start.elapsed());

    // Step 4: Derive
    print_step_header(4, "Derive Fields");
    let step_start = Instant::now();
    let failures = normalized.failures;
    let synthesized = synthesize(normalized.listings, &config);
    match synthesized.review_cutoff {
        Some(cutoff) => print_info(&format!(
            "Bad-review cutoff (median rating): {:.3}",
            cutoff
        )),
        None => print_info("No ratings present; no listing is classified as bad"),
    }
    print_success("Derived amenities count, central-district flag and review category");
    print_step_time(step_start.elapsed());

    // Step 5: Report
    print_step_header(5, "Report");
    let listings = &synthesized.listings;
    let summary = describe(listings, &failures, synthesized.review_cutoff);
    summary.display();

    let matrix = correlation_matrix(listings, &config.correlation_columns);
    display_correlation(&matrix);

    if !cli.no_plots {
        display_pair_views(listings, &config.pair_columns, config.histogram_bins);
    }

    print_completion();

    Ok(())
}
