//! Configuration for the booking core.
//!
//! Loaded from environment variables with sensible defaults.

use crate::types::TaxPercent;
use std::env;

/// Tax percentage applied when a show's theatre is missing from the catalog.
pub const DEFAULT_TAX_PERCENT: TaxPercent = TaxPercent::new(10);

/// Booking core configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingConfig {
    /// Fallback tax percentage for shows whose theatre does not resolve.
    /// The fallback is logged whenever it is used.
    pub default_tax_percent: TaxPercent,
    /// Optional cap on seats per booking request (`None` = unlimited).
    pub max_seats_per_request: Option<u32>,
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// - `BOOKING_DEFAULT_TAX_PERCENT` (default: 10)
    /// - `BOOKING_MAX_SEATS_PER_REQUEST` (default: unlimited)
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            default_tax_percent: env::var("BOOKING_DEFAULT_TAX_PERCENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map_or(DEFAULT_TAX_PERCENT, TaxPercent::new),
            max_seats_per_request: env::var("BOOKING_MAX_SEATS_PER_REQUEST")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_tax_percent: DEFAULT_TAX_PERCENT,
            max_seats_per_request: None,
        }
    }
}
