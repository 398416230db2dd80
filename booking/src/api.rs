//! Wire-facing request and response types.
//!
//! The routing layer owns transport and status-code mapping; this module
//! owns the schema. Incoming requests are decoded structurally and converted
//! into validated [`BookingCommand`]s, replacing any ad hoc string scraping
//! at the edge.

use crate::coordinator::{BookingCommand, SeatAvailability};
use crate::error::BookingError;
use crate::types::{Booking, SeatNumber, ShowId, UserId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// A booking request as received from the routing layer.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Show identifier, canonical UUID form
    pub show_id: String,
    /// User identifier, non-empty
    pub user_id: String,
    /// Requested seat numbers
    pub seats: Vec<u32>,
}

impl BookingRequest {
    /// Parses and validates the request into a coordinator command.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] for a malformed show identifier
    /// or an empty user identifier. Seat-list validation (empty, duplicates,
    /// range) stays with the coordinator.
    pub fn into_command(self) -> Result<BookingCommand, BookingError> {
        let show_id = ShowId::parse(&self.show_id).ok_or_else(|| BookingError::Validation {
            reason: format!("malformed show id: {}", self.show_id),
        })?;
        let user_id = UserId::new(self.user_id)?;
        let seats = self.seats.into_iter().map(SeatNumber::new).collect();

        Ok(BookingCommand {
            show_id,
            user_id,
            seats,
        })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Pricing and seats of a committed booking, as returned to the caller.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingSummary {
    /// Booked seat numbers, ascending
    pub seats: Vec<u32>,
    /// Subtotal in minor currency units
    pub subtotal: u64,
    /// Tax in minor currency units
    pub tax: u64,
    /// Total in minor currency units
    pub total: u64,
}

/// Success response for a booking request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingResponse {
    /// Always `true`; failures use [`ErrorResponse`]
    pub success: bool,
    /// The committed booking
    pub booking: BookingSummary,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            success: true,
            booking: BookingSummary {
                seats: booking.seats.iter().map(|seat| seat.value()).collect(),
                subtotal: booking.price.subtotal.minor(),
                tax: booking.price.tax.minor(),
                total: booking.price.total.minor(),
            },
        }
    }
}

/// Failure response carrying the error kind and a human-readable message.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Stable error kind (`validation`, `not_found`, `conflict`, `internal`)
    pub error: String,
    /// Human-readable description
    pub message: String,
}

impl From<&BookingError> for ErrorResponse {
    fn from(error: &BookingError) -> Self {
        Self {
            success: false,
            error: error.kind().as_str().to_string(),
            message: error.to_string(),
        }
    }
}

/// Response for the read-only seat-availability query.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatAvailabilityResponse {
    /// The queried show
    pub show_id: String,
    /// Show capacity
    pub total_seats: u32,
    /// Price per seat in minor currency units
    pub price: u64,
    /// Tax percentage a booking would carry
    pub tax: u16,
    /// Seats already booked, ascending
    pub booked_seats: Vec<u32>,
}

impl From<&SeatAvailability> for SeatAvailabilityResponse {
    fn from(availability: &SeatAvailability) -> Self {
        Self {
            show_id: availability.show_id.to_string(),
            total_seats: availability.total_seats,
            price: availability.unit_price.minor(),
            tax: availability.tax_percent.value(),
            booked_seats: availability
                .booked_seats
                .iter()
                .map(|seat| seat.value())
                .collect(),
        }
    }
}
