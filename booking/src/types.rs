//! Domain types for the seat booking core.
//!
//! Value objects and entities shared across the crate: identifiers, money,
//! show/theatre metadata, and the immutable [`Booking`] record.

use crate::error::BookingError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShowId(Uuid);

impl ShowId {
    /// Creates a new random `ShowId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `ShowId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a `ShowId` from its canonical string form.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        Uuid::parse_str(input).ok().map(Self)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ShowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a theatre.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TheatreId(Uuid);

impl TheatreId {
    /// Creates a new random `TheatreId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TheatreId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TheatreId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TheatreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a committed booking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Creates a new random `BookingId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `BookingId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the user a booking belongs to.
///
/// Opaque to this core (the account collaborator owns its meaning); only
/// non-emptiness is enforced here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a `UserId`, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] if the identifier is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, BookingError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(BookingError::Validation {
                reason: "user id must not be empty".to_string(),
            });
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An integer-identified unit of capacity within a show's seat range.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SeatNumber(u32);

impl SeatNumber {
    /// Creates a new `SeatNumber`.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the seat number value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SeatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money and Tax Value Objects
// ============================================================================

/// Money in the smallest currency unit to avoid floating-point errors.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Money(u64);

impl Money {
    /// Creates a `Money` value from minor currency units.
    #[must_use]
    pub const fn from_minor(units: u64) -> Self {
        Self(units)
    }

    /// Returns the amount in minor currency units.
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts with overflow checking.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Multiplies money by a quantity with overflow checking.
    #[must_use]
    pub const fn checked_mul(self, quantity: u64) -> Option<Self> {
        match self.0.checked_mul(quantity) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tax percentage applied to a booking subtotal. Non-negative by construction.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TaxPercent(u16);

impl TaxPercent {
    /// Creates a new `TaxPercent`.
    #[must_use]
    pub const fn new(percent: u16) -> Self {
        Self(percent)
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for TaxPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// ============================================================================
// Domain Entities
// ============================================================================

/// A scheduled screening with fixed capacity and unit price.
///
/// Immutable after creation: capacity and price do not change once the show
/// exists in this scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Unique show identifier
    pub id: ShowId,
    /// Theatre hosting the show
    pub theatre_id: TheatreId,
    /// Ordered showtime label (e.g., "2026-09-01 18:30")
    pub showtime: String,
    /// Total seat count; valid seats are `[0, total_seats)`
    pub total_seats: u32,
    /// Price per seat
    pub unit_price: Money,
}

impl Show {
    /// Creates a new `Show`.
    #[must_use]
    pub const fn new(
        id: ShowId,
        theatre_id: TheatreId,
        showtime: String,
        total_seats: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            id,
            theatre_id,
            showtime,
            total_seats,
            unit_price,
        }
    }
}

/// A theatre and the tax percentage it applies to bookings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theatre {
    /// Unique theatre identifier
    pub id: TheatreId,
    /// Tax percentage applied to booking subtotals
    pub tax_percent: TaxPercent,
}

impl Theatre {
    /// Creates a new `Theatre`.
    #[must_use]
    pub const fn new(id: TheatreId, tax_percent: TaxPercent) -> Self {
        Self { id, tax_percent }
    }
}

/// Computed pricing for a booking. Always satisfies `total == subtotal + tax`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Unit price multiplied by seat count
    pub subtotal: Money,
    /// Tax amount, rounded half-up to the minor currency unit
    pub tax: Money,
    /// `subtotal + tax`
    pub total: Money,
}

/// Everything a [`Booking`] carries except the identifier and timestamp,
/// which the ledger assigns at append time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    /// Show the seats belong to
    pub show_id: ShowId,
    /// User the booking is for
    pub user_id: UserId,
    /// Booked seats, sorted ascending, non-empty
    pub seats: Vec<SeatNumber>,
    /// Computed pricing
    pub price: PriceBreakdown,
}

/// An immutable record of a successful seat reservation with computed pricing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking identifier, assigned by the ledger
    pub id: BookingId,
    /// Show the seats belong to
    pub show_id: ShowId,
    /// User the booking is for
    pub user_id: UserId,
    /// Booked seats, sorted ascending, non-empty
    pub seats: Vec<SeatNumber>,
    /// Computed pricing
    pub price: PriceBreakdown,
    /// When the booking was committed, assigned by the ledger
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Materializes a draft into a committed record.
    #[must_use]
    pub fn from_draft(draft: BookingDraft, id: BookingId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            show_id: draft.show_id,
            user_id: draft.user_id,
            seats: draft.seats,
            price: draft.price,
            created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn money_checked_arithmetic() {
        let price = Money::from_minor(200);
        assert_eq!(price.checked_mul(3), Some(Money::from_minor(600)));
        assert_eq!(
            Money::from_minor(600).checked_add(Money::from_minor(60)),
            Some(Money::from_minor(660))
        );
        assert_eq!(Money::from_minor(u64::MAX).checked_mul(2), None);
        assert!(Money::from_minor(0).is_zero());
    }

    #[test]
    fn user_id_rejects_empty_input() {
        assert!(UserId::new("alice@example.com").is_ok());
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn show_id_round_trips_through_display() {
        let id = ShowId::new();
        assert_eq!(ShowId::parse(&id.to_string()), Some(id));
        assert_eq!(ShowId::parse("not-a-uuid"), None);
    }
}
