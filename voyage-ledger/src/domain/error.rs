//! Domain error types.
//!
//! Every ledger operation either succeeds or fails with exactly one of
//! these. None of them are fatal: the caller reports the failure and moves
//! on to the next command.

use rust_decimal::Decimal;

use super::{SeatIndex, VoyageId};

/// Validation failures raised by voyages and the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Voyage ID is zero or negative
    #[error("voyage ID must be a positive integer, got {0}")]
    InvalidId(i32),

    /// A live voyage already has this ID
    #[error("voyage {0} already exists")]
    DuplicateId(VoyageId),

    /// No live voyage has this ID
    #[error("no voyage with ID {0}")]
    NoSuchVoyage(VoyageId),

    /// Row count is zero or negative
    #[error("row count must be a positive integer, got {0}")]
    InvalidRowCount(i32),

    /// Row count would give a voyage more seats than it may hold
    #[error("{0} rows exceed the seat limit of a voyage")]
    TooManyRows(i32),

    /// Seat price is zero or negative
    #[error("seat price must be positive, got {0}")]
    InvalidPrice(Decimal),

    /// A price derived from the seat price does not fit in a decimal
    #[error("prices derived from seat price {0} are out of range")]
    PriceTooLarge(Decimal),

    /// Refund cut outside [0, 100]
    #[error("refund cut must be in [0, 100], got {0}")]
    InvalidRefundCut(i32),

    /// Premium fee is negative
    #[error("premium fee must be non-negative, got {0}")]
    InvalidPremiumFee(i32),

    /// Requested seat number is zero or negative
    #[error("seat number must be a positive integer, got {0}")]
    NonPositiveSeat(SeatIndex),

    /// Requested seat lies outside the voyage's grid
    #[error("no such seat: {0}")]
    InvalidSeat(SeatIndex),

    /// Requested seat is already sold
    #[error("seat {0} is already sold")]
    SeatAlreadySold(SeatIndex),

    /// Requested seat is already empty
    #[error("seat {0} is already empty")]
    SeatAlreadyEmpty(SeatIndex),

    /// Refund attempted on a minibus voyage
    #[error("voyage {0} is a minibus; minibus tickets are not refundable")]
    MinibusNotRefundable(VoyageId),

    /// The voyage's revenue would leave the decimal range
    #[error("revenue of voyage {0} would overflow")]
    RevenueOverflow(VoyageId),
}
