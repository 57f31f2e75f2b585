//! wordfreq CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use wordfreq::cli::args::*;
use wordfreq::cli::commands::*;

fn main() {
    // Parse command line arguments using clap
    let args = WordFreqArgs::parse();

    let mut log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };
    // Stage previews are logged at info.
    if args.preview_requested() {
        log_level = log_level.max(LevelFilter::Info);
    }

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
