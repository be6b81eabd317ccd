//! Voyage and seat identifiers.

use std::fmt;

use super::DomainError;

/// A validated voyage identifier.
///
/// Voyage IDs are strictly positive. Any `VoyageId` value is valid by
/// construction, so the ledger can key its map on it directly.
///
/// # Examples
///
/// ```
/// use voyage_ledger::domain::VoyageId;
///
/// let id = VoyageId::new(7).unwrap();
/// assert_eq!(id.get(), 7);
///
/// // Zero and negative IDs are rejected
/// assert!(VoyageId::new(0).is_err());
/// assert!(VoyageId::new(-3).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VoyageId(i32);

impl VoyageId {
    /// Validate a raw voyage ID.
    pub fn new(raw: i32) -> Result<Self, DomainError> {
        if raw <= 0 {
            return Err(DomainError::InvalidId(raw));
        }
        Ok(VoyageId(raw))
    }

    /// Returns the numeric ID.
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Debug for VoyageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoyageId({})", self.0)
    }
}

impl fmt::Display for VoyageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A requested seat, as a zero-based linear index into a voyage's grid.
///
/// Seat numbers on the wire are 1-based; [`SeatIndex::from_seat_number`]
/// performs the conversion. The index is not range-checked here: whether it
/// names a real seat depends on the voyage it is applied to, and negative
/// indices must survive long enough to be reported.
///
/// ```
/// use voyage_ledger::domain::SeatIndex;
///
/// let seat = SeatIndex::from_seat_number(1);
/// assert_eq!(seat.get(), 0);
/// assert_eq!(seat.seat_number(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatIndex(i64);

impl SeatIndex {
    /// Create a seat index from a zero-based linear position.
    pub fn new(index: i64) -> Self {
        SeatIndex(index)
    }

    /// Create a seat index from a 1-based seat number.
    pub fn from_seat_number(number: i32) -> Self {
        SeatIndex(i64::from(number) - 1)
    }

    /// Returns the zero-based index.
    pub fn get(&self) -> i64 {
        self.0
    }

    /// Returns the 1-based seat number.
    pub fn seat_number(&self) -> i64 {
        self.0 + 1
    }
}

impl fmt::Display for SeatIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.seat_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_ids_accepted() {
        assert_eq!(VoyageId::new(1).unwrap().get(), 1);
        assert_eq!(VoyageId::new(i32::MAX).unwrap().get(), i32::MAX);
    }

    #[test]
    fn non_positive_ids_rejected() {
        assert!(matches!(VoyageId::new(0), Err(DomainError::InvalidId(0))));
        assert!(matches!(
            VoyageId::new(-12),
            Err(DomainError::InvalidId(-12))
        ));
    }

    #[test]
    fn ids_order_numerically() {
        let mut ids = vec![
            VoyageId::new(10).unwrap(),
            VoyageId::new(2).unwrap(),
            VoyageId::new(7).unwrap(),
        ];
        ids.sort();
        let raw: Vec<i32> = ids.iter().map(VoyageId::get).collect();
        assert_eq!(raw, vec![2, 7, 10]);
    }

    #[test]
    fn voyage_id_display_and_debug() {
        let id = VoyageId::new(42).unwrap();
        assert_eq!(format!("{}", id), "42");
        assert_eq!(format!("{:?}", id), "VoyageId(42)");
    }

    #[test]
    fn seat_number_conversion() {
        assert_eq!(SeatIndex::from_seat_number(1).get(), 0);
        assert_eq!(SeatIndex::from_seat_number(12).get(), 11);
        assert_eq!(SeatIndex::from_seat_number(0).get(), -1);
        assert_eq!(SeatIndex::new(4).seat_number(), 5);
    }

    #[test]
    fn seat_number_conversion_does_not_overflow() {
        let seat = SeatIndex::from_seat_number(i32::MIN);
        assert_eq!(seat.get(), i64::from(i32::MIN) - 1);
        assert_eq!(seat.seat_number(), i64::from(i32::MIN));
    }

    #[test]
    fn seat_display_is_one_based() {
        assert_eq!(SeatIndex::new(0).to_string(), "1");
        assert_eq!(SeatIndex::new(-1).to_string(), "0");
    }
}
