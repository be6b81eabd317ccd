//! A single voyage: route, seat grid, fares and revenue.

use rust_decimal::Decimal;
use tracing::trace;

use super::fares::{FareRules, Fares, VoyageKind};
use super::money::checked_sum;
use super::seat_grid::{SeatGrid, SeatPosition};
use super::{DomainError, SeatIndex, VoyageId};

/// Departure and arrival names of a voyage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub departure: String,
    pub arrival: String,
}

impl Route {
    pub fn new(departure: impl Into<String>, arrival: impl Into<String>) -> Self {
        Self {
            departure: departure.into(),
            arrival: arrival.into(),
        }
    }
}

/// A scheduled voyage with its own seats and revenue.
///
/// Revenue is the running total of every amount charged minus every amount
/// refunded or reversed, rounded to two decimals after each change.
///
/// `sell` and `refund` assume the caller has already checked the seat with
/// [`Voyage::locate`] and [`Voyage::is_occupied`]; the ledger does this for a
/// whole batch before mutating anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voyage {
    id: VoyageId,
    route: Route,
    grid: SeatGrid,
    fares: Fares,
    revenue: Decimal,
}

impl Voyage {
    /// Create a voyage with an empty grid sized for its variant.
    pub fn new(id: VoyageId, route: Route, rows: usize, fares: Fares) -> Self {
        let columns = fares.kind().columns();
        Self {
            id,
            route,
            grid: SeatGrid::new(rows, columns),
            fares,
            revenue: Decimal::ZERO,
        }
    }

    /// The voyage's ID.
    pub fn id(&self) -> VoyageId {
        self.id
    }

    /// Where the voyage departs from and arrives at.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Which variant the voyage is.
    pub fn kind(&self) -> VoyageKind {
        self.fares.kind()
    }

    /// The voyage's pricing, including derived prices.
    pub fn fares(&self) -> &Fares {
        &self.fares
    }

    /// Current seat occupancy.
    pub fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    /// Running revenue, always at two decimal places.
    pub fn revenue(&self) -> Decimal {
        self.revenue
    }

    /// Resolve a requested seat against this voyage's grid.
    pub fn locate(&self, seat: SeatIndex) -> Result<SeatPosition, DomainError> {
        if seat.get() < 0 {
            return Err(DomainError::NonPositiveSeat(seat));
        }
        self.grid
            .locate(seat)
            .ok_or(DomainError::InvalidSeat(seat))
    }

    /// Whether a located seat is sold.
    pub fn is_occupied(&self, position: SeatPosition) -> bool {
        self.grid.is_occupied(position)
    }

    /// Sell a seat, returning the amount charged.
    ///
    /// Nothing changes if the new revenue would overflow.
    pub fn sell(&mut self, position: SeatPosition) -> Result<Decimal, DomainError> {
        let price = self.fares.sale_price(position.column);
        self.revenue = self.revenue_after(price)?;
        self.grid.toggle(position);
        trace!(voyage = %self.id, seat = position.index, %price, "seat sold");
        Ok(price)
    }

    /// Refund a seat, returning the amount given back.
    pub fn refund(&mut self, position: SeatPosition) -> Result<Decimal, DomainError> {
        let amount = self
            .fares
            .refund_amount(position.column)
            .ok_or(DomainError::MinibusNotRefundable(self.id))?;
        self.revenue = self.revenue_after(-amount)?;
        self.grid.toggle(position);
        trace!(voyage = %self.id, seat = position.index, %amount, "seat refunded");
        Ok(amount)
    }

    /// Reverse the voyage's sales and empty every seat.
    ///
    /// The returned snapshot shows the seats as they were before the
    /// voyage was cleared, with the revenue left after the reversal. If the
    /// reversal would overflow, the voyage is left untouched.
    pub fn cancel(&mut self) -> Result<VoyageSnapshot, DomainError> {
        let mut revenue = self.revenue;
        for (pos, sold) in self.grid.seats() {
            let charge = self.fares.cancellation_charge(pos.column, sold);
            revenue = checked_sum(revenue, -charge).ok_or(DomainError::RevenueOverflow(self.id))?;
        }
        self.revenue = revenue;
        let snapshot = self.snapshot();
        self.grid.clear();
        Ok(snapshot)
    }

    /// Capture the current layout and revenue.
    pub fn snapshot(&self) -> VoyageSnapshot {
        VoyageSnapshot {
            id: self.id,
            route: self.route.clone(),
            kind: self.kind(),
            grid: self.grid.clone(),
            revenue: self.revenue,
        }
    }

    fn revenue_after(&self, delta: Decimal) -> Result<Decimal, DomainError> {
        checked_sum(self.revenue, delta).ok_or(DomainError::RevenueOverflow(self.id))
    }
}

/// A voyage's layout and revenue at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoyageSnapshot {
    pub id: VoyageId,
    pub route: Route,
    pub kind: VoyageKind,
    pub grid: SeatGrid,
    pub revenue: Decimal,
}
