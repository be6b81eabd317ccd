//! Line parser for batch commands.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use super::{Command, ParseError};
use crate::domain::{Route, SeatIndex, VoyageKind};
use crate::ledger::{InitVoyage, Tariff};

/// Split on `separator`, dropping trailing empty pieces.
///
/// Interior empty pieces are kept, so `"A\t\tB"` has three tokens.
fn split_trimmed(s: &str, separator: char) -> Vec<&str> {
    let mut pieces: Vec<&str> = s.split(separator).collect();
    while pieces.last().is_some_and(|piece| piece.is_empty()) {
        pieces.pop();
    }
    pieces
}

/// Parse one trimmed, non-empty input line.
///
/// # Examples
///
/// ```
/// use voyage_ledger::command::{Command, parse_line};
///
/// let command = parse_line("PRINT_VOYAGE\t7").unwrap();
/// assert_eq!(command, Command::PrintVoyage { id: 7 });
/// ```
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let tokens = split_trimmed(line, '\t');
    let Some(&name) = tokens.first() else {
        return Err(ParseError::UnknownCommand(String::new()));
    };
    let usage = || ParseError::ErroneousUsage(name.to_string());

    let command = match name {
        "INIT_VOYAGE" => Command::InitVoyage(parse_init(&tokens).ok_or_else(usage)?),
        "CANCEL_VOYAGE" => Command::CancelVoyage {
            id: single_id(&tokens).ok_or_else(usage)?,
        },
        "PRINT_VOYAGE" => Command::PrintVoyage {
            id: single_id(&tokens).ok_or_else(usage)?,
        },
        "SELL_TICKET" => {
            let (id, seats) = id_and_seats(&tokens).ok_or_else(usage)?;
            Command::SellTicket { id, seats }
        }
        "REFUND_TICKET" => {
            let (id, seats) = id_and_seats(&tokens).ok_or_else(usage)?;
            Command::RefundTicket { id, seats }
        }
        "Z_REPORT" if tokens.len() == 1 => Command::ZReport,
        "Z_REPORT" => return Err(usage()),
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    trace!(command = command.name(), "parsed line");
    Ok(command)
}

/// `INIT_VOYAGE <kind> <id> <from> <to> <rows> <price> [<cut> [<fee>]]`
fn parse_init(tokens: &[&str]) -> Option<InitVoyage> {
    let kind = VoyageKind::from_str(tokens.get(1)?).ok()?;
    let expected = match kind {
        VoyageKind::Minibus => 7,
        VoyageKind::Standard => 8,
        VoyageKind::Premium => 9,
    };
    if tokens.len() != expected {
        return None;
    }

    let id = parse_int(tokens[2])?;
    let route = Route::new(tokens[3], tokens[4]);
    let rows = parse_int(tokens[5])?;
    let seat_price = parse_price(tokens[6])?;
    let tariff = match kind {
        VoyageKind::Minibus => Tariff::Minibus,
        VoyageKind::Standard => Tariff::Standard {
            refund_cut: parse_int(tokens[7])?,
        },
        VoyageKind::Premium => Tariff::Premium {
            refund_cut: parse_int(tokens[7])?,
            premium_fee: parse_int(tokens[8])?,
        },
    };

    Some(InitVoyage {
        id,
        route,
        rows,
        seat_price,
        tariff,
    })
}

fn single_id(tokens: &[&str]) -> Option<i32> {
    match tokens {
        [_, id] => parse_int(id),
        _ => None,
    }
}

fn id_and_seats(tokens: &[&str]) -> Option<(i32, Vec<SeatIndex>)> {
    let [_, id, seats] = tokens else {
        return None;
    };
    Some((parse_int(id)?, parse_seats(seats)?))
}

/// Seat numbers joined by `_`, converted to 0-based indices.
fn parse_seats(s: &str) -> Option<Vec<SeatIndex>> {
    let pieces = split_trimmed(s, '_');
    if pieces.is_empty() {
        return None;
    }
    pieces
        .into_iter()
        .map(|piece| parse_int(piece).map(SeatIndex::from_seat_number))
        .collect()
}

fn parse_int(s: &str) -> Option<i32> {
    s.parse().ok()
}

fn parse_price(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
