use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use voyage_ledger::config::RunConfig;
use voyage_ledger::session::run_files;

/// Run a file of voyage ticketing commands and write the transcript.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Command file, one tab-separated command per line
    input: PathBuf,

    /// Where to write the transcript
    output: PathBuf,

    /// JSON file with run options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not append a Z report when the input does not end with one
    #[arg(long)]
    no_closing_report: bool,

    /// Print nothing in place of voyages in an empty Z report
    #[arg(long)]
    silent_empty_report: bool,

    /// Keep the final newline of the transcript
    #[arg(long)]
    keep_trailing_newline: bool,
}

impl Args {
    /// File settings, overridden by any flags given.
    fn run_config(&self) -> Result<RunConfig, voyage_ledger::config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        if self.no_closing_report {
            config = config.with_closing_report(false);
        }
        if self.silent_empty_report {
            config = config.with_empty_report_notice(false);
        }
        if self.keep_trailing_newline {
            config = config.with_trim_trailing_newline(false);
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; the transcript is the only output file
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = args.run_config()?;
    info!(input = %args.input.display(), output = %args.output.display(), "starting run");

    let summary = run_files(&args.input, &args.output, config)?;
    info!(
        commands = summary.commands,
        rejected = summary.rejected,
        closing_report = summary.closing_report,
        "run complete"
    );
    Ok(())
}
