//! hotelprep: Booking Cancellation Data Preparation CLI
//!
//! Cleans, label-encodes, skew-corrects and SMOTE-balances the train and
//! test splits of a hotel booking dataset.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use hotelprep::cli::Cli;
use hotelprep::pipeline::DataProcessor;
use hotelprep::utils::{
    create_spinner, finish_with_error, finish_with_success, init_logging, print_banner,
    print_completion, print_config, print_info, print_step_header, print_step_time,
    print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    print_banner(env!("CARGO_PKG_VERSION"));

    // Step 1: Configuration and output directory
    print_step_header(1, "Load Configuration");
    let step_start = Instant::now();
    let processor = DataProcessor::new(&cli.train, &cli.test, &cli.output_dir, &cli.config)?;
    let threshold = processor.config().data_processing().skewness_threshold;
    print_success("Configuration loaded");
    print_step_time(step_start.elapsed());

    print_config(&cli.train, &cli.test, &cli.output_dir, &cli.config, threshold);

    // Step 2: Process and balance both splits
    print_step_header(2, "Process & Balance");
    let step_start = Instant::now();
    let spinner = create_spinner("Cleaning, encoding, correcting skew and balancing...");
    let summary = match processor.process(cli.format, cli.infer_schema_length) {
        Ok(summary) => {
            finish_with_success(&spinner, "Train and test splits processed");
            summary
        }
        Err(err) => {
            finish_with_error(&spinner, "Processing failed");
            return Err(err);
        }
    };
    print_step_time(step_start.elapsed());

    let (train_out, test_out) = cli.output_paths();
    print_info(&format!("Wrote {} and {}", train_out.display(), test_out.display()));

    summary.display();
    print_completion();

    Ok(())
}
