//! Confmend - startup configuration maintenance.
//!
//! Runs before the application proper: converts legacy configuration, seeds
//! packaged defaults, and reconciles the user's config.yaml with the current
//! schema. Reports go to stdout; logs go to stderr.

use clap::{Args, Parser, Subcommand, ValueEnum};
use cm_core::logging::init_logging;
use cm_core::{run, ExitCode, RunOptions, RunReport};
use std::path::PathBuf;
use tracing::error;

/// Confmend - migrate, default-fill, and audit application configuration
#[derive(Parser)]
#[command(name = "confmend")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Application data root containing config.yaml
    #[arg(long, global = true, env = "CONFMEND_DATA_ROOT", default_value = ".")]
    data_root: PathBuf,

    /// Directory of packaged defaults (default: <data-root>/default)
    #[arg(long, global = true, env = "CONFMEND_DEFAULTS_DIR")]
    defaults: Option<PathBuf>,

    /// Report format on stdout
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply legacy conversion, asset sync, migrations, and defaults
    Run,
    /// Report pending changes without writing anything
    Check,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    /// One line per change, human-readable
    Text,
    /// The full run report as JSON
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose, cli.global.quiet);

    let check_only = matches!(cli.command, Some(Commands::Check));
    let mut opts = RunOptions::new(cli.global.data_root.clone(), cli.global.defaults.clone());
    if check_only {
        opts = opts.dry_run();
    }

    match run(&opts) {
        Ok(report) => {
            print_report(&report, cli.global.format);
            if check_only && !report.is_clean() {
                ExitCode::Changed.exit();
            }
            ExitCode::Clean.exit();
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::from(&err).exit();
        }
    }
}

fn print_report(report: &RunReport, format: ReportFormat) {
    match format {
        ReportFormat::Json => match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{}", json),
            Err(err) => error!("cannot render report: {}", err),
        },
        ReportFormat::Text => {
            for change in &report.changes {
                println!("{}", change);
            }
            println!(
                "{} change(s), {} asset action(s){}",
                report.changes.len(),
                report.synced.len(),
                if report.wrote_config {
                    ", configuration written"
                } else {
                    ""
                }
            );
        }
    }
}
