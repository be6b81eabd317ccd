//! Text rendering of ledger results and failures.
//!
//! Successful results go through the askama templates in [`templates`];
//! failures are single fixed-format lines built by [`error_message`] and
//! [`parse_error_message`].

pub mod templates;

use askama::Template;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::command::ParseError;
use crate::config::RunConfig;
use crate::domain::{DomainError, FareRules, Fares, Route, SeatGrid, VoyageSnapshot, format_money};
use crate::ledger::{Receipt, VoyageSummary};
use templates::{
    CancelTemplate, MinibusInitTemplate, PremiumInitTemplate, StandardInitTemplate,
    TicketsTemplate, VoyageDetailsTemplate, ZReportTemplate,
};

/// Separator printed after each voyage in a Z report.
pub const REPORT_RULE: &str = "----------------";

/// Notice printed in place of voyages when a Z report is empty.
pub const EMPTY_REPORT_NOTICE: &str = "No Voyages Available!";

/// Renders results as transcript text.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    empty_report_notice: bool,
}

impl TextRenderer {
    /// Create a renderer using the rendering options of `config`.
    pub fn new(config: &RunConfig) -> Self {
        Self {
            empty_report_notice: config.empty_report_notice,
        }
    }

    /// Echo line for an input command.
    pub fn command_echo(&self, line: &str) -> String {
        format!("COMMAND: {line}")
    }

    /// Confirmation for a newly created voyage.
    pub fn voyage_initialized(&self, summary: &VoyageSummary) -> Result<String, askama::Error> {
        let id = summary.id.to_string();
        let Route { departure, arrival } = summary.route.clone();
        let price = format_money(summary.fares.seat_price());
        let rows = summary.rows;

        match &summary.fares {
            Fares::Minibus(_) => MinibusInitTemplate {
                id,
                departure,
                arrival,
                price,
                regular_seats: rows * 2,
            }
            .render(),
            Fares::Standard(fares) => StandardInitTemplate {
                id,
                departure,
                arrival,
                price,
                regular_seats: rows * 4,
                refund_cut: fares.refund_cut().percent(),
            }
            .render(),
            Fares::Premium(fares) => PremiumInitTemplate {
                id,
                departure,
                arrival,
                price,
                regular_seats: rows * 2,
                premium_price: format_money(fares.premium_price()),
                premium_seats: rows,
                refund_cut: fares.refund_cut().percent(),
            }
            .render(),
        }
    }

    /// Result of a sale batch.
    pub fn tickets_sold(&self, receipt: &Receipt) -> Result<String, askama::Error> {
        tickets(receipt, "sold")
    }

    /// Result of a refund batch.
    pub fn tickets_refunded(&self, receipt: &Receipt) -> Result<String, askama::Error> {
        tickets(receipt, "refunded")
    }

    /// Header, seat rows and revenue of one voyage.
    pub fn voyage_details(&self, snapshot: &VoyageSnapshot) -> Result<String, askama::Error> {
        VoyageDetailsTemplate {
            id: snapshot.id.to_string(),
            departure: snapshot.route.departure.clone(),
            arrival: snapshot.route.arrival.clone(),
            rows: seat_rows(&snapshot.grid, snapshot.kind.aisle_after()),
            revenue: format_money(snapshot.revenue),
        }
        .render()
    }

    /// Cancellation notice with the voyage's final details.
    pub fn voyage_cancelled(&self, snapshot: &VoyageSnapshot) -> Result<String, askama::Error> {
        CancelTemplate {
            id: snapshot.id.to_string(),
            details: self.voyage_details(snapshot)?,
        }
        .render()
    }

    /// Details of every voyage in `snapshots`, in the order given.
    pub fn z_report(&self, snapshots: &[VoyageSnapshot]) -> Result<String, askama::Error> {
        let voyages = snapshots
            .iter()
            .map(|snapshot| self.voyage_details(snapshot))
            .collect::<Result<Vec<_>, _>>()?;
        let empty_notice =
            (voyages.is_empty() && self.empty_report_notice).then_some(EMPTY_REPORT_NOTICE);

        ZReportTemplate {
            rule: REPORT_RULE,
            voyages,
            empty_notice,
        }
        .render()
    }
}

fn tickets(receipt: &Receipt, action: &'static str) -> Result<String, askama::Error> {
    let seats = receipt
        .seats
        .iter()
        .map(|seat| seat.seat_number().to_string())
        .collect::<Vec<_>>()
        .join("-");

    TicketsTemplate {
        seats,
        id: receipt.voyage.to_string(),
        departure: receipt.route.departure.clone(),
        arrival: receipt.route.arrival.clone(),
        action,
        amount: format_money(receipt.amount),
    }
    .render()
}

/// Render each row of `grid` as `X` (sold) and `*` (empty) cells.
///
/// An aisle marker ` |` follows the column given by `aisle_after`.
pub fn seat_rows(grid: &SeatGrid, aisle_after: Option<usize>) -> Vec<String> {
    grid.row_slices()
        .map(|row| {
            let mut line = String::with_capacity(row.len() * 3);
            for (column, &occupied) in row.iter().enumerate() {
                if column > 0 {
                    line.push(' ');
                }
                line.push(if occupied { 'X' } else { '*' });
                if aisle_after == Some(column) {
                    line.push_str(" |");
                }
            }
            line
        })
        .collect()
}

/// The integer part of a price, as a 32-bit integer would hold it.
fn whole_part(price: Decimal) -> i32 {
    price.trunc().to_i32().unwrap_or(if price.is_sign_negative() {
        i32::MIN
    } else {
        i32::MAX
    })
}

/// Transcript line for a failed ledger operation.
pub fn error_message(error: &DomainError) -> String {
    match error {
        DomainError::InvalidId(id) => format!(
            "ERROR: {id} is not a positive integer, ID of a voyage must be a positive integer!"
        ),
        DomainError::DuplicateId(id) => {
            format!("ERROR: There is already a voyage with ID of {id}!")
        }
        DomainError::NoSuchVoyage(id) => format!("ERROR: There is no voyage with ID of {id}!"),
        DomainError::InvalidRowCount(rows) => format!(
            "ERROR: {rows} is not a positive integer, number of seat rows of a voyage must be a positive integer!"
        ),
        DomainError::InvalidPrice(price) => format!(
            "ERROR: {} is not a positive number, price must be a positive number!",
            whole_part(*price)
        ),
        DomainError::InvalidRefundCut(cut) => format!(
            "ERROR: {cut} is not an integer that is in range of [0, 100], refund cut must be an integer that is in range of [0, 100]!"
        ),
        DomainError::InvalidPremiumFee(fee) => format!(
            "ERROR: {fee} is not a non-negative integer, premium fee must be a non-negative integer!"
        ),
        DomainError::NonPositiveSeat(seat) => format!(
            "ERROR: {} is not a positive integer, seat number must be a positive integer!",
            seat.seat_number()
        ),
        DomainError::InvalidSeat(_) => "ERROR: There is no such a seat!".to_string(),
        DomainError::SeatAlreadySold(_) => "ERROR: One or more seats are already sold!".to_string(),
        DomainError::SeatAlreadyEmpty(_) => {
            "ERROR: One or more seats are already empty!".to_string()
        }
        DomainError::MinibusNotRefundable(_) => {
            "ERROR: Minibus tickets are not refundable!".to_string()
        }
        DomainError::TooManyRows(rows) => {
            format!("ERROR: {rows} seat rows are more than a voyage can hold!")
        }
        DomainError::PriceTooLarge(price) => format!(
            "ERROR: Prices derived from {} TL are too large to be represented!",
            format_money(*price)
        ),
        DomainError::RevenueOverflow(id) => {
            format!("ERROR: Revenue of the voyage {id} would exceed the representable range!")
        }
    }
}

/// Transcript line for a line that could not be parsed.
pub fn parse_error_message(error: &ParseError) -> String {
    match error {
        ParseError::UnknownCommand(token) => format!("ERROR: There is no command namely {token}!"),
        ParseError::ErroneousUsage(name) => {
            format!("ERROR: Erroneous usage of \"{name}\" command!")
        }
    }
}
