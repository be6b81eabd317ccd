//! The voyage ledger.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use tracing::debug;

use super::request::{InitVoyage, Receipt, Tariff, VoyageSummary};
use crate::domain::{
    DomainError, Fares, MAX_SEATS, MinibusFares, PremiumFares, PremiumFee, RefundCut, SeatIndex,
    SeatPosition, StandardFares, Voyage, VoyageId, VoyageSnapshot,
};

/// Which way a batch moves seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Movement {
    Sell,
    Refund,
}

/// Owns every live voyage, keyed and ordered by ID.
///
/// Each operation validates fully before it mutates anything, so a failed
/// operation leaves the ledger exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    voyages: BTreeMap<VoyageId, Voyage>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live voyages.
    pub fn len(&self) -> usize {
        self.voyages.len()
    }

    /// Returns true if there are no live voyages.
    pub fn is_empty(&self) -> bool {
        self.voyages.is_empty()
    }

    /// Look up a live voyage.
    pub fn get(&self, id: VoyageId) -> Option<&Voyage> {
        self.voyages.get(&id)
    }

    /// IDs of live voyages in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = VoyageId> + '_ {
        self.voyages.keys().copied()
    }

    /// Create a voyage.
    ///
    /// Checks run in a fixed order and the first failure is returned: ID
    /// positive, ID unused, rows positive, seat count within
    /// [`MAX_SEATS`], price positive, the variant's percentages, then
    /// whether the derived prices fit in a decimal.
    pub fn init_voyage(&mut self, request: InitVoyage) -> Result<VoyageSummary, DomainError> {
        let id = VoyageId::new(request.id)?;
        if self.voyages.contains_key(&id) {
            return Err(DomainError::DuplicateId(id));
        }
        let rows = usize::try_from(request.rows)
            .ok()
            .filter(|rows| *rows > 0)
            .ok_or(DomainError::InvalidRowCount(request.rows))?;
        let seats = rows
            .checked_mul(request.tariff.kind().columns())
            .filter(|seats| *seats <= MAX_SEATS);
        if seats.is_none() {
            return Err(DomainError::TooManyRows(request.rows));
        }
        if request.seat_price <= Decimal::ZERO {
            return Err(DomainError::InvalidPrice(request.seat_price));
        }

        let price = request.seat_price;
        let fares = match request.tariff {
            Tariff::Minibus => Fares::Minibus(MinibusFares::new(price)),
            Tariff::Standard { refund_cut } => {
                Fares::Standard(StandardFares::new(price, RefundCut::new(refund_cut)?)?)
            }
            Tariff::Premium {
                refund_cut,
                premium_fee,
            } => {
                let refund_cut = RefundCut::new(refund_cut)?;
                let premium_fee = PremiumFee::new(premium_fee)?;
                Fares::Premium(PremiumFares::new(price, refund_cut, premium_fee)?)
            }
        };

        let voyage = Voyage::new(id, request.route, rows, fares);
        debug!(voyage = %id, kind = %voyage.kind(), rows, "voyage initialised");
        let summary = VoyageSummary {
            id,
            route: voyage.route().clone(),
            rows,
            fares: voyage.fares().clone(),
        };
        self.voyages.insert(id, voyage);
        Ok(summary)
    }

    /// Sell every requested seat, or none of them.
    ///
    /// Seats are checked in the order given; the first seat that does not
    /// exist or is already sold fails the whole batch. The sales are applied
    /// to a copy of the voyage, so a revenue overflow part way through also
    /// leaves it unchanged.
    pub fn sell_tickets(&mut self, id: i32, seats: &[SeatIndex]) -> Result<Receipt, DomainError> {
        let voyage = self.voyage_mut(id)?;
        let positions = check_batch(voyage, seats, Movement::Sell)?;

        let mut staged = voyage.clone();
        for position in positions {
            staged.sell(position)?;
        }
        let amount = revenue_change(voyage, &staged)?;
        *voyage = staged;
        debug!(voyage = %voyage.id(), seats = seats.len(), %amount, "tickets sold");

        Ok(Receipt {
            voyage: voyage.id(),
            route: voyage.route().clone(),
            seats: seats.to_vec(),
            amount,
        })
    }

    /// Refund every requested seat, or none of them.
    ///
    /// Minibus voyages are rejected before any seat is looked at.
    pub fn refund_tickets(
        &mut self,
        id: i32,
        seats: &[SeatIndex],
    ) -> Result<Receipt, DomainError> {
        let voyage = self.voyage_mut(id)?;
        if !voyage.fares().is_refundable() {
            return Err(DomainError::MinibusNotRefundable(voyage.id()));
        }
        let positions = check_batch(voyage, seats, Movement::Refund)?;

        let mut staged = voyage.clone();
        for position in positions {
            staged.refund(position)?;
        }
        let amount = revenue_change(&staged, voyage)?;
        *voyage = staged;
        debug!(voyage = %voyage.id(), seats = seats.len(), %amount, "tickets refunded");

        Ok(Receipt {
            voyage: voyage.id(),
            route: voyage.route().clone(),
            seats: seats.to_vec(),
            amount,
        })
    }

    /// Cancel a voyage and remove it from the ledger.
    ///
    /// The snapshot shows the seats as they were sold, with the revenue left
    /// after the cancellation has been accounted for. A voyage whose
    /// reversal would overflow stays live and unchanged.
    pub fn cancel_voyage(&mut self, id: i32) -> Result<VoyageSnapshot, DomainError> {
        let voyage = self.voyage_mut(id)?;
        let id = voyage.id();
        let snapshot = voyage.cancel()?;
        self.voyages.remove(&id);
        debug!(voyage = %id, revenue = %snapshot.revenue, "voyage cancelled");
        Ok(snapshot)
    }

    /// Current layout and revenue of one voyage.
    pub fn print_voyage(&self, id: i32) -> Result<VoyageSnapshot, DomainError> {
        let id = self.live_id(id)?;
        self.voyages
            .get(&id)
            .map(Voyage::snapshot)
            .ok_or(DomainError::NoSuchVoyage(id))
    }

    /// Every live voyage's layout and revenue, in ascending ID order.
    pub fn z_report(&self) -> Vec<VoyageSnapshot> {
        self.voyages.values().map(Voyage::snapshot).collect()
    }

    fn live_id(&self, raw: i32) -> Result<VoyageId, DomainError> {
        let id = VoyageId::new(raw)?;
        if !self.voyages.contains_key(&id) {
            return Err(DomainError::NoSuchVoyage(id));
        }
        Ok(id)
    }

    fn voyage_mut(&mut self, raw: i32) -> Result<&mut Voyage, DomainError> {
        let id = VoyageId::new(raw)?;
        self.voyages
            .get_mut(&id)
            .ok_or(DomainError::NoSuchVoyage(id))
    }
}

/// Revenue of `after` minus revenue of `before`.
fn revenue_change(before: &Voyage, after: &Voyage) -> Result<Decimal, DomainError> {
    after
        .revenue()
        .checked_sub(before.revenue())
        .ok_or(DomainError::RevenueOverflow(after.id()))
}

/// Resolve every seat of a batch against the voyage without mutating it.
///
/// A seat named twice in one batch conflicts with itself: the second
/// mention sees the state the first one would leave behind.
fn check_batch(
    voyage: &Voyage,
    seats: &[SeatIndex],
    movement: Movement,
) -> Result<Vec<SeatPosition>, DomainError> {
    let mut pending = HashSet::new();
    let mut positions = Vec::with_capacity(seats.len());

    for &seat in seats {
        let position = voyage.locate(seat)?;
        let occupied = voyage.is_occupied(position) != pending.contains(&position.index);
        match movement {
            Movement::Sell if occupied => return Err(DomainError::SeatAlreadySold(seat)),
            Movement::Refund if !occupied => return Err(DomainError::SeatAlreadyEmpty(seat)),
            _ => {}
        }
        pending.insert(position.index);
        positions.push(position);
    }

    Ok(positions)
}
