//! Inputs and results of ledger operations.

use rust_decimal::Decimal;

use crate::domain::{Fares, Route, SeatIndex, VoyageId, VoyageKind};

/// Variant-specific pricing parameters of a new voyage, as supplied.
///
/// Percentages are raw here; the ledger validates them after the ID checks
/// so that errors are reported in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tariff {
    Minibus,
    Standard { refund_cut: i32 },
    Premium { refund_cut: i32, premium_fee: i32 },
}

impl Tariff {
    /// The variant this tariff creates.
    pub fn kind(&self) -> VoyageKind {
        match self {
            Tariff::Minibus => VoyageKind::Minibus,
            Tariff::Standard { .. } => VoyageKind::Standard,
            Tariff::Premium { .. } => VoyageKind::Premium,
        }
    }
}

/// A request to create a voyage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitVoyage {
    pub id: i32,
    pub route: Route,
    pub rows: i32,
    pub seat_price: Decimal,
    pub tariff: Tariff,
}

/// A newly created voyage's identity and derived pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoyageSummary {
    pub id: VoyageId,
    pub route: Route,
    pub rows: usize,
    pub fares: Fares,
}

/// The outcome of a sale or refund batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub voyage: VoyageId,
    pub route: Route,
    /// Seats in the order they were requested.
    pub seats: Vec<SeatIndex>,
    /// Total charged (sale) or returned (refund).
    pub amount: Decimal,
}
