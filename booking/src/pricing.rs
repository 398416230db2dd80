//! Pure pricing computation.
//!
//! `subtotal = unit_price * seat_count`, `tax = subtotal * tax_percent / 100`
//! rounded **half-up** to the minor currency unit, `total = subtotal + tax`.
//! The rounding rule is fixed: totals must be reproducible across processes
//! and restarts. All arithmetic is checked integer math on minor units.

use crate::types::{Money, PriceBreakdown, TaxPercent};
use thiserror::Error;

/// Failure modes of the pricing computation.
///
/// There are no side effects; these are the only ways a quote can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A quote for zero seats is meaningless.
    #[error("seat count must be greater than zero")]
    ZeroSeatCount,

    /// The subtotal or total exceeded the representable range.
    #[error("price computation overflowed")]
    Overflow,
}

/// Computes the price breakdown for `seat_count` seats.
///
/// # Errors
///
/// Returns [`PricingError::ZeroSeatCount`] for an empty quote and
/// [`PricingError::Overflow`] if any intermediate product exceeds `u64`.
pub fn quote(
    unit_price: Money,
    seat_count: u32,
    tax_percent: TaxPercent,
) -> Result<PriceBreakdown, PricingError> {
    if seat_count == 0 {
        return Err(PricingError::ZeroSeatCount);
    }

    let subtotal = unit_price
        .checked_mul(u64::from(seat_count))
        .ok_or(PricingError::Overflow)?;

    // Half-up rounding in integer arithmetic: (n * percent + 50) / 100.
    let tax_minor = subtotal
        .minor()
        .checked_mul(u64::from(tax_percent.value()))
        .and_then(|product| product.checked_add(50))
        .ok_or(PricingError::Overflow)?
        / 100;
    let tax = Money::from_minor(tax_minor);

    let total = subtotal.checked_add(tax).ok_or(PricingError::Overflow)?;

    Ok(PriceBreakdown {
        subtotal,
        tax,
        total,
    })
}
