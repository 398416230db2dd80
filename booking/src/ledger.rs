//! Append-only booking ledger.
//!
//! Committed bookings are never overwritten or deleted. The trait is the
//! durability seam: the in-memory implementation here serves the demo and
//! tests, and a database-backed implementation plugs in behind the same
//! trait in a production deployment. The coordinator calls `append` while
//! holding the show's critical section, so a successful return means the
//! record is visible to subsequent reads before the booking call returns.

use crate::types::{Booking, BookingDraft, BookingId, UserId};
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failure to persist or read the booking history.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ledger unavailable: {0}")]
pub struct LedgerError(pub String);

/// Durable, append-only store of committed booking records.
#[async_trait]
pub trait BookingLedger: Send + Sync {
    /// Appends a booking, assigning its identifier and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the record could not be made durable; the
    /// coordinator then rolls the seat map back so the pair stays consistent.
    async fn append(&self, draft: BookingDraft) -> Result<Booking, LedgerError>;

    /// All bookings for a user. Order is unspecified by contract;
    /// implementations may sort for display.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the history cannot be read.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Booking>, LedgerError>;

    /// The full booking history, oldest first. Feeds seat-map rehydration at
    /// startup and the unfiltered history view.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the history cannot be read.
    async fn list_all(&self) -> Result<Vec<Booking>, LedgerError>;
}

/// In-memory [`BookingLedger`].
#[derive(Debug, Default)]
pub struct InMemoryBookingLedger {
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryBookingLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingLedger for InMemoryBookingLedger {
    async fn append(&self, draft: BookingDraft) -> Result<Booking, LedgerError> {
        let booking = Booking::from_draft(draft, BookingId::new(), Utc::now());
        self.bookings.write().await.push(booking.clone());
        Ok(booking)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Booking>, LedgerError> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .read()
            .await
            .iter()
            .filter(|booking| booking.user_id == *user_id)
            .cloned()
            .collect();
        // Newest first for display. Presentation choice, not a contract.
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, LedgerError> {
        Ok(self.bookings.read().await.clone())
    }
}
