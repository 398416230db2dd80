//! Per-show record of booked seats.
//!
//! A [`SeatMap`] is owned exclusively by the coordinator for one show and is
//! only ever touched inside that show's critical section. Externally the
//! booked set only grows; [`SeatMap::rollback`] exists solely to compensate a
//! failed ledger append before the critical section is released.

use crate::error::BookingError;
use crate::types::SeatNumber;
use std::collections::BTreeSet;

/// The authoritative booked/free state for one show's seats.
#[derive(Clone, Debug)]
pub struct SeatMap {
    total_seats: u32,
    booked: BTreeSet<SeatNumber>,
}

impl SeatMap {
    /// Creates an empty seat map for a show with `total_seats` capacity.
    #[must_use]
    pub const fn new(total_seats: u32) -> Self {
        Self {
            total_seats,
            booked: BTreeSet::new(),
        }
    }

    /// The show's capacity; valid seats are `[0, total_seats)`.
    #[must_use]
    pub const fn total_seats(&self) -> u32 {
        self.total_seats
    }

    /// Checks that every requested seat lies inside the valid range.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::SeatOutOfRange`] naming the first seat outside
    /// `[0, total_seats)`.
    pub fn validate_range(&self, seats: &[SeatNumber]) -> Result<(), BookingError> {
        match seats.iter().find(|seat| seat.value() >= self.total_seats) {
            Some(seat) => Err(BookingError::SeatOutOfRange {
                seat: *seat,
                total_seats: self.total_seats,
            }),
            None => Ok(()),
        }
    }

    /// Returns the first requested seat that is already booked, if any.
    #[must_use]
    pub fn first_conflict(&self, seats: &[SeatNumber]) -> Option<SeatNumber> {
        seats.iter().find(|seat| self.booked.contains(seat)).copied()
    }

    /// True iff none of `seats` are already booked.
    ///
    /// Only meaningful when evaluated inside the same critical section as the
    /// subsequent [`SeatMap::commit`]; there must be no check-then-act gap.
    #[must_use]
    pub fn seats_available(&self, seats: &[SeatNumber]) -> bool {
        self.first_conflict(seats).is_none()
    }

    /// Adds `seats` to the booked set.
    ///
    /// The caller holds the show's critical section and has already verified
    /// availability within it; the conflict re-check here is defensive, since
    /// two committers must never interleave on one show.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::SeatConflict`] if any seat became booked since
    /// the availability check. Nothing is mutated in that case.
    pub fn commit(&mut self, seats: &[SeatNumber]) -> Result<(), BookingError> {
        if let Some(seat) = self.first_conflict(seats) {
            return Err(BookingError::SeatConflict { seat });
        }
        self.booked.extend(seats.iter().copied());
        Ok(())
    }

    /// Removes seats committed moments ago by a booking whose ledger append
    /// failed. Must only be called inside the same critical section as the
    /// commit it compensates.
    pub fn rollback(&mut self, seats: &[SeatNumber]) {
        for seat in seats {
            self.booked.remove(seat);
        }
    }

    /// All booked seats, ascending.
    #[must_use]
    pub fn booked_seats(&self) -> Vec<SeatNumber> {
        self.booked.iter().copied().collect()
    }

    /// Number of booked seats.
    #[must_use]
    pub fn booked_count(&self) -> usize {
        self.booked.len()
    }
}
