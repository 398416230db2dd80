//! Error taxonomy for the booking core.
//!
//! Every failure surfaces as an explicit [`BookingError`] carrying structured
//! context (e.g., the first conflicting seat). The routing layer maps
//! [`ErrorKind`] onto its own status codes; this core does not own that
//! mapping.

use crate::types::{SeatNumber, ShowId};
use thiserror::Error;

/// Errors returned by booking operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Malformed or missing request fields; never mutates state.
    #[error("invalid request: {reason}")]
    Validation {
        /// What the caller got wrong
        reason: String,
    },

    /// A requested seat lies outside the show's valid range; rejected before
    /// any lock is taken.
    #[error("seat {seat} is out of range for a show with {total_seats} seats")]
    SeatOutOfRange {
        /// The offending seat number
        seat: SeatNumber,
        /// The show's capacity; valid seats are `[0, total_seats)`
        total_seats: u32,
    },

    /// The show identifier did not resolve; no mutation performed.
    #[error("show {0} not found")]
    ShowNotFound(ShowId),

    /// A requested seat was already booked at check or commit time. The
    /// entire request is rejected; no partial assignment happens.
    #[error("seat {seat} is already booked")]
    SeatConflict {
        /// The first conflicting seat
        seat: SeatNumber,
    },

    /// Catalog or ledger failure unrelated to caller input.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// The coarse error category, for callers that map errors onto a wire
    /// protocol.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::SeatOutOfRange { .. } => ErrorKind::Validation,
            Self::ShowNotFound(_) => ErrorKind::NotFound,
            Self::SeatConflict { .. } => ErrorKind::Conflict,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Coarse error categories, one per caller-visible failure mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-recoverable input problem
    Validation,
    /// Unknown show identifier
    NotFound,
    /// Requested seats already booked
    Conflict,
    /// Failure unrelated to caller input
    Internal,
}

impl ErrorKind {
    /// Stable string form used in error responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cover_the_taxonomy() {
        let conflict = BookingError::SeatConflict {
            seat: SeatNumber::new(5),
        };
        assert_eq!(conflict.kind(), ErrorKind::Conflict);
        assert_eq!(conflict.to_string(), "seat 5 is already booked");

        let range = BookingError::SeatOutOfRange {
            seat: SeatNumber::new(75),
            total_seats: 50,
        };
        assert_eq!(range.kind(), ErrorKind::Validation);

        assert_eq!(
            BookingError::ShowNotFound(ShowId::new()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            BookingError::Internal("ledger down".to_string()).kind().as_str(),
            "internal"
        );
    }
}
