//! Batch driver: runs an input file of commands against a ledger.
//!
//! Every processed line is echoed, executed and answered in the transcript.
//! Command failures are written to the transcript and processing continues;
//! only I/O and template failures stop a run.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::command::{Command, parse_line};
use crate::config::RunConfig;
use crate::domain::{DomainError, VoyageSnapshot};
use crate::ledger::{Ledger, Receipt, VoyageSummary};
use crate::render::{TextRenderer, error_message, parse_error_message};

/// Errors that abort a batch run.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template error: {0}")]
    Render(#[from] askama::Error),
}

/// Counts from a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines processed, not counting blank lines.
    pub commands: usize,
    /// Lines that produced an error message.
    pub rejected: usize,
    /// Whether a closing Z report was appended.
    pub closing_report: bool,
}

/// A successful command's result, before rendering.
#[derive(Debug)]
enum Outcome {
    Initialized(VoyageSummary),
    Sold(Receipt),
    Refunded(Receipt),
    Cancelled(VoyageSnapshot),
    Printed(VoyageSnapshot),
    Report(Vec<VoyageSnapshot>),
}

/// One batch run in progress.
#[derive(Debug)]
pub struct Session {
    ledger: Ledger,
    renderer: TextRenderer,
    config: RunConfig,
    transcript: String,
    last_line: Option<String>,
    summary: RunSummary,
}

impl Session {
    /// Start a run with an empty ledger.
    pub fn new(config: RunConfig) -> Self {
        Self {
            ledger: Ledger::new(),
            renderer: TextRenderer::new(&config),
            config,
            transcript: String::new(),
            last_line: None,
            summary: RunSummary::default(),
        }
    }

    /// The ledger as the commands so far have left it.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Process one raw input line. Blank lines are ignored.
    pub fn process_line(&mut self, raw: &str) -> Result<(), SessionError> {
        let line = raw.trim();
        if line.is_empty() {
            return Ok(());
        }
        self.summary.commands += 1;
        let echo = self.renderer.command_echo(line);
        self.push(&echo);

        let text = match parse_line(line) {
            Ok(command) => match self.apply(command) {
                Ok(outcome) => self.render(&outcome)?,
                Err(e) => {
                    warn!(line, error = %e, "command rejected");
                    self.summary.rejected += 1;
                    error_message(&e)
                }
            },
            Err(e) => {
                warn!(line, error = %e, "unparseable line");
                self.summary.rejected += 1;
                parse_error_message(&e)
            }
        };
        self.push(&text);
        self.last_line = Some(line.to_string());
        Ok(())
    }

    /// Finish the run and return the transcript.
    ///
    /// Appends a closing Z report unless the last line already was one.
    pub fn finish(mut self) -> Result<(String, RunSummary), SessionError> {
        if self.config.closing_report && self.last_line.as_deref() != Some("Z_REPORT") {
            debug!("appending closing report");
            let report = self.renderer.z_report(&self.ledger.z_report())?;
            self.push(&report);
            self.summary.closing_report = true;
        }
        if self.config.trim_trailing_newline && self.transcript.ends_with('\n') {
            self.transcript.pop();
        }
        Ok((self.transcript, self.summary))
    }

    fn apply(&mut self, command: Command) -> Result<Outcome, DomainError> {
        debug!(command = command.name(), "executing");
        let outcome = match command {
            Command::InitVoyage(request) => Outcome::Initialized(self.ledger.init_voyage(request)?),
            Command::CancelVoyage { id } => Outcome::Cancelled(self.ledger.cancel_voyage(id)?),
            Command::SellTicket { id, seats } => {
                Outcome::Sold(self.ledger.sell_tickets(id, &seats)?)
            }
            Command::RefundTicket { id, seats } => {
                Outcome::Refunded(self.ledger.refund_tickets(id, &seats)?)
            }
            Command::PrintVoyage { id } => Outcome::Printed(self.ledger.print_voyage(id)?),
            Command::ZReport => Outcome::Report(self.ledger.z_report()),
        };
        Ok(outcome)
    }

    fn render(&self, outcome: &Outcome) -> Result<String, askama::Error> {
        match outcome {
            Outcome::Initialized(summary) => self.renderer.voyage_initialized(summary),
            Outcome::Sold(receipt) => self.renderer.tickets_sold(receipt),
            Outcome::Refunded(receipt) => self.renderer.tickets_refunded(receipt),
            Outcome::Cancelled(snapshot) => self.renderer.voyage_cancelled(snapshot),
            Outcome::Printed(snapshot) => self.renderer.voyage_details(snapshot),
            Outcome::Report(snapshots) => self.renderer.z_report(snapshots),
        }
    }

    fn push(&mut self, text: &str) {
        self.transcript.push_str(text);
        self.transcript.push('\n');
    }
}

/// Run every line of `input` and write the transcript to `output`.
pub fn run(
    input: impl BufRead,
    mut output: impl Write,
    config: RunConfig,
) -> Result<RunSummary, SessionError> {
    let mut session = Session::new(config);
    for line in input.lines() {
        session.process_line(&line?)?;
    }
    let (transcript, summary) = session.finish()?;
    output.write_all(transcript.as_bytes())?;
    output.flush()?;
    Ok(summary)
}

/// Run the command file at `input`, writing the transcript to `output`.
///
/// The output file is created only after the whole input has been read.
pub fn run_files(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: RunConfig,
) -> Result<RunSummary, SessionError> {
    let reader = BufReader::new(File::open(input)?);
    let mut transcript = Vec::new();
    let summary = run(reader, &mut transcript, config)?;
    fs::write(output, transcript)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn transcript(input: &str, config: RunConfig) -> (String, RunSummary) {
        let mut out = Vec::new();
        let summary = run(input.as_bytes(), &mut out, config).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn standard_sale_and_refund() {
        let input = "INIT_VOYAGE\tStandard\t1\tAnkara\tIzmir\t2\t100\t20\n\
                     SELL_TICKET\t1\t1_2\n\
                     REFUND_TICKET\t1\t1\n\
                     Z_REPORT\n";
        let (text, summary) = transcript(input, RunConfig::default());

        assert_eq!(
            text,
            "COMMAND: INIT_VOYAGE\tStandard\t1\tAnkara\tIzmir\t2\t100\t20\n\
             Voyage 1 was initialized as a standard (2+2) voyage from Ankara to Izmir with 100.00 TL priced 8 regular seats. Note that refunds will be 20% less than the paid amount.\n\
             COMMAND: SELL_TICKET\t1\t1_2\n\
             Seat 1-2 of the Voyage 1 from Ankara to Izmir was successfully sold for 200.00 TL.\n\
             COMMAND: REFUND_TICKET\t1\t1\n\
             Seat 1 of the Voyage 1 from Ankara to Izmir was successfully refunded for 80.00 TL.\n\
             COMMAND: Z_REPORT\n\
             Z Report:\n\
             ----------------\n\
             Voyage 1\n\
             Ankara-Izmir\n\
             * X | * *\n\
             * * | * *\n\
             Revenue: 120.00\n\
             ----------------"
        );
        assert_eq!(
            summary,
            RunSummary {
                commands: 4,
                rejected: 0,
                closing_report: false,
            }
        );
    }

    #[test]
    fn minibus_refund_rejected() {
        let input = "INIT_VOYAGE\tMinibus\t4\tA\tB\t1\t10\n\
                     SELL_TICKET\t4\t1\n\
                     REFUND_TICKET\t4\t1\n";
        let (text, summary) = transcript(input, RunConfig::default());

        assert_eq!(
            text,
            "COMMAND: INIT_VOYAGE\tMinibus\t4\tA\tB\t1\t10\n\
             Voyage 4 was initialized as a minibus (2) voyage from A to B with 10.00 TL priced 2 regular seats. Note that minibus tickets are not refundable.\n\
             COMMAND: SELL_TICKET\t4\t1\n\
             Seat 1 of the Voyage 4 from A to B was successfully sold for 10.00 TL.\n\
             COMMAND: REFUND_TICKET\t4\t1\n\
             ERROR: Minibus tickets are not refundable!\n\
             Z Report:\n\
             ----------------\n\
             Voyage 4\n\
             A-B\n\
             X *\n\
             Revenue: 10.00\n\
             ----------------"
        );
        assert_eq!(summary.rejected, 1);
        assert!(summary.closing_report);
    }

    #[test]
    fn premium_cancel_and_empty_report() {
        let input = "INIT_VOYAGE\tPremium\t2\tX\tY\t1\t100\t10\t50\n\
                     SELL_TICKET\t2\t1_2\n\
                     CANCEL_VOYAGE\t2\n\
                     PRINT_VOYAGE\t2\n";
        let (text, _) = transcript(input, RunConfig::default());

        assert_eq!(
            text,
            "COMMAND: INIT_VOYAGE\tPremium\t2\tX\tY\t1\t100\t10\t50\n\
             Voyage 2 was initialized as a premium (1+2) voyage from X to Y with 100.00 TL priced 2 regular seats and 150.00 TL priced 1 premium seats. Note that refunds will be 10% less than the paid amount.\n\
             COMMAND: SELL_TICKET\t2\t1_2\n\
             Seat 1-2 of the Voyage 2 from X to Y was successfully sold for 250.00 TL.\n\
             COMMAND: CANCEL_VOYAGE\t2\n\
             Voyage 2 was successfully cancelled!\n\
             Voyage details can be found below:\n\
             Voyage 2\n\
             X-Y\n\
             X | X *\n\
             Revenue: 0.00\n\
             COMMAND: PRINT_VOYAGE\t2\n\
             ERROR: There is no voyage with ID of 2!\n\
             Z Report:\n\
             ----------------\n\
             No Voyages Available!\n\
             ----------------"
        );
    }

    #[test]
    fn blank_lines_skipped_and_lines_trimmed() {
        let input = "\n   \n  Z_REPORT  \n\n";
        let (text, summary) = transcript(input, RunConfig::default());

        assert_eq!(
            text,
            "COMMAND: Z_REPORT\nZ Report:\n----------------\nNo Voyages Available!\n----------------"
        );
        assert_eq!(summary.commands, 1);
        assert!(!summary.closing_report);
    }

    #[test]
    fn parse_errors_are_reported() {
        let input = "HELLO\nSELL_TICKET\t1\n";
        let config = RunConfig::default().with_closing_report(false);
        let (text, summary) = transcript(input, config);

        assert_eq!(
            text,
            "COMMAND: HELLO\n\
             ERROR: There is no command namely HELLO!\n\
             COMMAND: SELL_TICKET\t1\n\
             ERROR: Erroneous usage of \"SELL_TICKET\" command!"
        );
        assert_eq!(summary.rejected, 2);
    }

    #[test]
    fn failed_batch_changes_nothing() {
        let input = "INIT_VOYAGE\tStandard\t1\tA\tB\t1\t10\t0\n\
                     SELL_TICKET\t1\t1_9\n\
                     PRINT_VOYAGE\t1\n";
        let config = RunConfig::default().with_closing_report(false);
        let (text, _) = transcript(input, config);

        assert!(text.contains("ERROR: There is no such a seat!\n"));
        assert!(text.ends_with("Voyage 1\nA-B\n* * | * *\nRevenue: 0.00"));
    }

    #[test]
    fn huge_prices_are_accepted() {
        let input = "INIT_VOYAGE\tStandard\t1\tA\tB\t1\t1e27\t10\n\
                     SELL_TICKET\t1\t1\n\
                     REFUND_TICKET\t1\t1\n\
                     INIT_VOYAGE\tPremium\t2\tA\tB\t1\t100000000000000000000\t10\t2000000000\n";
        let config = RunConfig::default().with_closing_report(false);
        let (text, summary) = transcript(input, config);

        assert_eq!(summary.rejected, 0);
        assert!(text.contains(
            "Seat 1 of the Voyage 1 from A to B was successfully refunded for 900000000000000000000000000.00 TL.\n"
        ));
        assert!(text.ends_with(
            "with 100000000000000000000.00 TL priced 2 regular seats and 2000000100000000000000000000.00 TL priced 1 premium seats. Note that refunds will be 10% less than the paid amount."
        ));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let input = "INIT_VOYAGE\tMinibus\t1\tA\tB\t2\t5e28\n\
                     SELL_TICKET\t1\t1_2\n\
                     PRINT_VOYAGE\t1\n\
                     INIT_VOYAGE\tPremium\t2\tA\tB\t1\t1e28\t10\t2000\n\
                     INIT_VOYAGE\tMinibus\t3\tA\tB\t2147483647\t10\n";
        let config = RunConfig::default().with_closing_report(false);
        let (text, summary) = transcript(input, config);

        assert_eq!(summary.rejected, 3);
        assert!(text.contains(
            "COMMAND: SELL_TICKET\t1\t1_2\n\
             ERROR: Revenue of the voyage 1 would exceed the representable range!\n\
             COMMAND: PRINT_VOYAGE\t1\n\
             Voyage 1\n\
             A-B\n\
             * *\n\
             * *\n\
             Revenue: 0.00\n"
        ));
        assert!(text.contains(
            "ERROR: Prices derived from 10000000000000000000000000000.00 TL are too large to be represented!\n"
        ));
        assert!(text.ends_with("ERROR: 2147483647 seat rows are more than a voyage can hold!"));
    }

    #[test]
    fn repeated_seat_in_batch_is_rejected() {
        let input = "INIT_VOYAGE\tStandard\t1\tA\tB\t1\t10\t0\n\
                     SELL_TICKET\t1\t1_1\n\
                     PRINT_VOYAGE\t1\n";
        let config = RunConfig::default().with_closing_report(false);
        let (text, summary) = transcript(input, config);

        assert_eq!(summary.rejected, 1);
        assert!(text.contains("ERROR: One or more seats are already sold!\n"));
        assert!(text.ends_with("Voyage 1\nA-B\n* * | * *\nRevenue: 0.00"));
    }

    #[test]
    fn empty_input_still_reports() {
        let (text, summary) = transcript("", RunConfig::default());
        assert_eq!(
            text,
            "Z Report:\n----------------\nNo Voyages Available!\n----------------"
        );
        assert_eq!(summary.commands, 0);
    }

    #[test]
    fn trailing_newline_can_be_kept() {
        let config = RunConfig::default()
            .with_trim_trailing_newline(false)
            .with_empty_report_notice(false);
        let (text, _) = transcript("Z_REPORT\n", config);
        assert_eq!(text, "COMMAND: Z_REPORT\nZ Report:\n----------------\n");
    }

    #[test]
    fn session_exposes_ledger() {
        let mut session = Session::new(RunConfig::default());
        session
            .process_line("INIT_VOYAGE\tMinibus\t9\tA\tB\t1\t10")
            .unwrap();
        assert_eq!(session.ledger().len(), 1);
    }

    #[test]
    fn run_files_round_trip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("output.txt");
        fs::write(&input, "INIT_VOYAGE\tMinibus\t1\tA\tB\t1\t5.5\nPRINT_VOYAGE\t1\n").unwrap();

        let summary = run_files(&input, &output, RunConfig::default()).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("COMMAND: INIT_VOYAGE"));
        assert!(text.contains("Voyage 1\nA-B\n* *\nRevenue: 0.00\nZ Report:"));
        assert!(!text.ends_with('\n'));
        assert_eq!(summary.commands, 2);
        assert!(summary.closing_report);
    }

    #[test]
    fn run_files_missing_input() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.txt");

        let result = run_files(dir.path().join("absent.txt"), &output, RunConfig::default());

        assert!(matches!(result, Err(SessionError::Io(_))));
        assert!(!output.exists());
    }
}
