//! Domain types for the voyage ledger.
//!
//! This module contains the entity model: validated identifiers, seat grids,
//! per-variant fare rules and the voyage itself. Types enforce their
//! invariants at construction time, so the ledger can trust any value it
//! receives from here.

mod error;
mod fares;
mod id;
mod money;
mod seat_grid;
mod voyage;

pub use error::DomainError;
pub use fares::{
    FareRules, Fares, MinibusFares, PremiumFares, PremiumFee, RefundCut, StandardFares,
    UnknownVoyageKind, VoyageKind,
};
pub use id::{SeatIndex, VoyageId};
pub use money::{apply_percent, checked_sum, format_money, round2};
pub use seat_grid::{MAX_SEATS, SeatGrid, SeatPosition};
pub use voyage::{Route, Voyage, VoyageSnapshot};
