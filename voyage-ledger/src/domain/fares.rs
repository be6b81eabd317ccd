//! Seat layouts and pricing rules for each voyage variant.
//!
//! The three variants share the seat-grid mechanics in [`super::Voyage`] and
//! differ only in what is described here: how many seats a row has, where
//! the aisle is drawn, what a seat costs, what a refund returns, and what
//! cancellation takes back out of revenue.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::DomainError;
use super::money::apply_percent;

/// Error returned when parsing an unknown voyage type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown voyage type: {0}")]
pub struct UnknownVoyageKind(String);

/// The closed set of voyage variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoyageKind {
    /// Two seats per row, no refunds.
    Minibus,
    /// 2+2 layout with refundable seats.
    Standard,
    /// 1+2 layout; the single seat of each row is a premium seat.
    Premium,
}

impl VoyageKind {
    /// Seats per row for this variant.
    pub fn columns(&self) -> usize {
        match self {
            VoyageKind::Minibus => 2,
            VoyageKind::Standard => 4,
            VoyageKind::Premium => 3,
        }
    }

    /// Column after which the aisle separator is drawn, if any.
    pub fn aisle_after(&self) -> Option<usize> {
        match self {
            VoyageKind::Minibus => None,
            VoyageKind::Standard => Some(1),
            VoyageKind::Premium => Some(0),
        }
    }

    /// The name used in commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoyageKind::Minibus => "Minibus",
            VoyageKind::Standard => "Standard",
            VoyageKind::Premium => "Premium",
        }
    }
}

impl FromStr for VoyageKind {
    type Err = UnknownVoyageKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Minibus" => Ok(VoyageKind::Minibus),
            "Standard" => Ok(VoyageKind::Standard),
            "Premium" => Ok(VoyageKind::Premium),
            other => Err(UnknownVoyageKind(other.to_string())),
        }
    }
}

impl fmt::Display for VoyageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage of the paid amount withheld on refund, in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundCut(u8);

impl RefundCut {
    /// Validate a raw refund cut.
    pub fn new(percent: i32) -> Result<Self, DomainError> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(RefundCut)
            .ok_or(DomainError::InvalidRefundCut(percent))
    }

    /// Returns the percentage.
    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Share of the paid amount that is returned, as a percentage.
    fn retained(&self) -> i64 {
        100 - i64::from(self.0)
    }
}

/// Surcharge on premium seats, as a non-negative percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiumFee(u32);

impl PremiumFee {
    /// Validate a raw premium fee.
    pub fn new(percent: i32) -> Result<Self, DomainError> {
        u32::try_from(percent)
            .map(PremiumFee)
            .map_err(|_| DomainError::InvalidPremiumFee(percent))
    }

    /// Returns the percentage.
    pub fn percent(&self) -> u32 {
        self.0
    }
}

/// `percent` of `amount`, failing with the seat price it was derived from.
fn derive(seat_price: Decimal, amount: Decimal, percent: i64) -> Result<Decimal, DomainError> {
    apply_percent(amount, percent).ok_or(DomainError::PriceTooLarge(seat_price))
}

/// Pricing capabilities shared by every voyage variant.
///
/// Amounts are per seat. Which seat is meant is given by its column, since
/// that is the only thing any variant's pricing depends on.
pub trait FareRules {
    /// The variant these rules belong to.
    fn kind(&self) -> VoyageKind;

    /// Base price of a regular seat.
    fn seat_price(&self) -> Decimal;

    /// Amount charged when the seat in `column` is sold.
    fn sale_price(&self, column: usize) -> Decimal;

    /// Amount returned when the seat in `column` is refunded, or `None` if
    /// the variant does not accept refunds.
    fn refund_amount(&self, column: usize) -> Option<Decimal>;

    /// Amount removed from revenue for the seat in `column` when the
    /// voyage is cancelled.
    fn cancellation_charge(&self, column: usize, occupied: bool) -> Decimal;
}

/// Minibus pricing: a single seat price and no refunds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinibusFares {
    seat_price: Decimal,
}

impl MinibusFares {
    pub fn new(seat_price: Decimal) -> Self {
        Self { seat_price }
    }
}

impl FareRules for MinibusFares {
    fn kind(&self) -> VoyageKind {
        VoyageKind::Minibus
    }

    fn seat_price(&self) -> Decimal {
        self.seat_price
    }

    fn sale_price(&self, _column: usize) -> Decimal {
        self.seat_price
    }

    fn refund_amount(&self, _column: usize) -> Option<Decimal> {
        None
    }

    // Every seat slot is charged back, sold or not.
    fn cancellation_charge(&self, _column: usize, _occupied: bool) -> Decimal {
        self.seat_price
    }
}

/// Standard pricing: one seat price, refunds less the refund cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardFares {
    seat_price: Decimal,
    refund_cut: RefundCut,
    refund_amount: Decimal,
}

impl StandardFares {
    /// Derive the refund amount once from the seat price and refund cut.
    pub fn new(seat_price: Decimal, refund_cut: RefundCut) -> Result<Self, DomainError> {
        Ok(Self {
            seat_price,
            refund_cut,
            refund_amount: derive(seat_price, seat_price, refund_cut.retained())?,
        })
    }

    pub fn refund_cut(&self) -> RefundCut {
        self.refund_cut
    }
}

impl FareRules for StandardFares {
    fn kind(&self) -> VoyageKind {
        VoyageKind::Standard
    }

    fn seat_price(&self) -> Decimal {
        self.seat_price
    }

    fn sale_price(&self, _column: usize) -> Decimal {
        self.seat_price
    }

    fn refund_amount(&self, _column: usize) -> Option<Decimal> {
        Some(self.refund_amount)
    }

    fn cancellation_charge(&self, _column: usize, occupied: bool) -> Decimal {
        if occupied {
            self.seat_price
        } else {
            Decimal::ZERO
        }
    }
}

/// Premium pricing: column 0 of every row is a premium seat sold at a
/// surcharge and refunded from the surcharged price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumFares {
    seat_price: Decimal,
    refund_cut: RefundCut,
    premium_fee: PremiumFee,
    premium_price: Decimal,
    refund_amount: Decimal,
    premium_refund_amount: Decimal,
}

impl PremiumFares {
    /// Derive the premium price and both refund amounts once.
    ///
    /// The premium refund is taken from the already-rounded premium price.
    pub fn new(
        seat_price: Decimal,
        refund_cut: RefundCut,
        premium_fee: PremiumFee,
    ) -> Result<Self, DomainError> {
        let premium_price =
            derive(seat_price, seat_price, 100 + i64::from(premium_fee.percent()))?;
        Ok(Self {
            seat_price,
            refund_cut,
            premium_fee,
            premium_price,
            refund_amount: derive(seat_price, seat_price, refund_cut.retained())?,
            premium_refund_amount: derive(seat_price, premium_price, refund_cut.retained())?,
        })
    }

    pub fn refund_cut(&self) -> RefundCut {
        self.refund_cut
    }

    pub fn premium_fee(&self) -> PremiumFee {
        self.premium_fee
    }

    pub fn premium_price(&self) -> Decimal {
        self.premium_price
    }

    pub fn premium_refund_amount(&self) -> Decimal {
        self.premium_refund_amount
    }

    /// Whether a seat in `column` is a premium seat.
    pub fn is_premium(column: usize) -> bool {
        column == 0
    }
}

impl FareRules for PremiumFares {
    fn kind(&self) -> VoyageKind {
        VoyageKind::Premium
    }

    fn seat_price(&self) -> Decimal {
        self.seat_price
    }

    fn sale_price(&self, column: usize) -> Decimal {
        if Self::is_premium(column) {
            self.premium_price
        } else {
            self.seat_price
        }
    }

    fn refund_amount(&self, column: usize) -> Option<Decimal> {
        if Self::is_premium(column) {
            Some(self.premium_refund_amount)
        } else {
            Some(self.refund_amount)
        }
    }

    fn cancellation_charge(&self, column: usize, occupied: bool) -> Decimal {
        if occupied {
            self.sale_price(column)
        } else {
            Decimal::ZERO
        }
    }
}

/// The fares of one voyage, tagged by variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fares {
    Minibus(MinibusFares),
    Standard(StandardFares),
    Premium(PremiumFares),
}

impl Fares {
    fn rules(&self) -> &dyn FareRules {
        match self {
            Fares::Minibus(f) => f,
            Fares::Standard(f) => f,
            Fares::Premium(f) => f,
        }
    }

    /// Refund cut, for the refundable variants.
    pub fn refund_cut(&self) -> Option<RefundCut> {
        match self {
            Fares::Minibus(_) => None,
            Fares::Standard(f) => Some(f.refund_cut()),
            Fares::Premium(f) => Some(f.refund_cut()),
        }
    }

    /// Premium seat price, for premium voyages.
    pub fn premium_price(&self) -> Option<Decimal> {
        match self {
            Fares::Premium(f) => Some(f.premium_price()),
            _ => None,
        }
    }

    /// Whether any seat of this voyage can be refunded.
    pub fn is_refundable(&self) -> bool {
        !matches!(self, Fares::Minibus(_))
    }
}

impl FareRules for Fares {
    fn kind(&self) -> VoyageKind {
        self.rules().kind()
    }

    fn seat_price(&self) -> Decimal {
        self.rules().seat_price()
    }

    fn sale_price(&self, column: usize) -> Decimal {
        self.rules().sale_price(column)
    }

    fn refund_amount(&self, column: usize) -> Option<Decimal> {
        self.rules().refund_amount(column)
    }

    fn cancellation_charge(&self, column: usize, occupied: bool) -> Decimal {
        self.rules().cancellation_charge(column, occupied)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::round2;
    use proptest::prelude::*;

    /// Prices between 0.01 and 10000.00.
    fn price() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        /// A refund never returns more than was paid
        #[test]
        fn refund_never_exceeds_price(p in price(), c in 0i32..=100) {
            let fares = StandardFares::new(p, RefundCut::new(c).unwrap()).unwrap();
            prop_assert!(fares.refund_amount(0).unwrap() <= p);
            prop_assert!(fares.refund_amount(0).unwrap() >= Decimal::ZERO);
        }

        /// A zero refund cut refunds the full price
        #[test]
        fn zero_cut_refunds_in_full(p in price(), f in 0i32..=300) {
            let fares = PremiumFares::new(p, RefundCut::new(0).unwrap(), PremiumFee::new(f).unwrap()).unwrap();
            prop_assert_eq!(fares.refund_amount(1), Some(p));
            prop_assert_eq!(fares.refund_amount(0), Some(fares.premium_price()));
        }

        /// The premium seat never costs less than a regular one
        #[test]
        fn premium_price_at_least_seat_price(p in price(), f in 0i32..=300) {
            let fares = PremiumFares::new(p, RefundCut::new(10).unwrap(), PremiumFee::new(f).unwrap()).unwrap();
            prop_assert!(fares.premium_price() >= p);
        }

        /// Derived amounts are already at two decimal places
        #[test]
        fn derived_amounts_are_rounded(p in price(), c in 0i32..=100, f in 0i32..=300) {
            let fares = PremiumFares::new(p, RefundCut::new(c).unwrap(), PremiumFee::new(f).unwrap()).unwrap();
            prop_assert_eq!(round2(fares.premium_price()), fares.premium_price());
            prop_assert_eq!(round2(fares.premium_refund_amount()), fares.premium_refund_amount());
        }
    }
}
