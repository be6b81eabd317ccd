//! Batch commands and their text syntax.
//!
//! Each input line holds one command: a command name followed by
//! tab-separated arguments. Parsing checks only the shape of a line (token
//! counts and number syntax); every semantic check belongs to the ledger.

mod parse;

use crate::domain::SeatIndex;
use crate::ledger::InitVoyage;

pub use parse::parse_line;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    InitVoyage(InitVoyage),
    CancelVoyage { id: i32 },
    SellTicket { id: i32, seats: Vec<SeatIndex> },
    RefundTicket { id: i32, seats: Vec<SeatIndex> },
    PrintVoyage { id: i32 },
    ZReport,
}

impl Command {
    /// The command name as written in input files.
    pub fn name(&self) -> &'static str {
        match self {
            Command::InitVoyage(_) => "INIT_VOYAGE",
            Command::CancelVoyage { .. } => "CANCEL_VOYAGE",
            Command::SellTicket { .. } => "SELL_TICKET",
            Command::RefundTicket { .. } => "REFUND_TICKET",
            Command::PrintVoyage { .. } => "PRINT_VOYAGE",
            Command::ZReport => "Z_REPORT",
        }
    }
}

/// A line that could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// First token is not a known command name
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Known command with the wrong number or shape of arguments
    #[error("erroneous usage of {0}")]
    ErroneousUsage(String),
}
