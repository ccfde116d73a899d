/*!
 * Command-line interface for RepoDump
 */

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use log::{error, info};

use repodump::config::{Args, Config};
use repodump::report::{ReportFormat, Reporter};
use repodump::{open_index, run};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "repodump", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    if let Err(e) = repodump::logging::setup_logger(args.verbose, args.quiet) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let report_format = if args.quiet {
        ReportFormat::None
    } else {
        args.report
    };

    // Create and validate configuration
    let config = Config::from_args(args);
    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    info!(
        "Snapshotting {} into {}",
        config.target_dir.display(),
        config.output_file.display()
    );

    let index = open_index(&config);
    let result = run(&config, index.as_ref());

    match result {
        Ok(report) => {
            if let Err(e) = Reporter::new(report_format).print_report(&report) {
                error!("Failed to print report: {}", e);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
