//! Booking coordinator.
//!
//! Orchestrates validation, the atomic seat-conflict check, pricing, and the
//! paired seat-map/ledger commit. This is the only component with
//! concurrency-sensitive logic: one mutex per show guards the whole
//! check-availability-then-commit region, so bookings for different shows
//! proceed fully in parallel while at most one task at a time commits seats
//! for a given show. The per-show mutex is the seam a distributed lock would
//! later replace without changing this contract.

use crate::catalog::{ShowCatalog, TheatreCatalog};
use crate::config::BookingConfig;
use crate::error::BookingError;
use crate::ledger::BookingLedger;
use crate::pricing;
use crate::seat_map::SeatMap;
use crate::types::{
    Booking, BookingDraft, Money, SeatNumber, Show, ShowId, TaxPercent, UserId,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// A validated booking request, ready for the coordinator.
#[derive(Clone, Debug)]
pub struct BookingCommand {
    /// Show to book seats for
    pub show_id: ShowId,
    /// User the booking is for
    pub user_id: UserId,
    /// Requested seat numbers; must be non-empty and free of duplicates
    pub seats: Vec<SeatNumber>,
}

/// Read-model answer for the seat-availability query: catalog metadata
/// combined with the current booked set. Produced without mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatAvailability {
    /// The queried show
    pub show_id: ShowId,
    /// Show capacity
    pub total_seats: u32,
    /// Price per seat
    pub unit_price: Money,
    /// Tax percentage the booking would carry
    pub tax_percent: TaxPercent,
    /// Seats already booked, ascending
    pub booked_seats: Vec<SeatNumber>,
}

/// Orchestrates atomic, conflict-free seat commitment.
///
/// Constructed once per process and shared by reference with request
/// handlers; all mutable state lives inside this instance, never in ambient
/// globals.
pub struct BookingCoordinator {
    shows: Arc<dyn ShowCatalog>,
    theatres: Arc<dyn TheatreCatalog>,
    ledger: Arc<dyn BookingLedger>,
    seat_maps: RwLock<HashMap<ShowId, Arc<Mutex<SeatMap>>>>,
    config: BookingConfig,
}

impl BookingCoordinator {
    /// Creates a coordinator over the given collaborators.
    #[must_use]
    pub fn new(
        shows: Arc<dyn ShowCatalog>,
        theatres: Arc<dyn TheatreCatalog>,
        ledger: Arc<dyn BookingLedger>,
        config: BookingConfig,
    ) -> Self {
        Self {
            shows,
            theatres,
            ledger,
            seat_maps: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Books seats for a show, atomically.
    ///
    /// Exactly one seat-map mutation and one ledger append happen per
    /// successful call; failures mutate nothing. If any requested seat is
    /// unavailable the whole request is rejected with a conflict naming the
    /// first such seat.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Validation`] for empty or duplicate seat lists.
    /// - [`BookingError::SeatOutOfRange`] for seats outside the show's range,
    ///   rejected before the show lock is taken.
    /// - [`BookingError::ShowNotFound`] for an unknown show.
    /// - [`BookingError::SeatConflict`] when a seat is already booked.
    /// - [`BookingError::Internal`] for catalog or ledger failures; the seat
    ///   map is rolled back if the ledger append fails after commit.
    pub async fn book_seats(&self, cmd: BookingCommand) -> Result<Booking, BookingError> {
        let seats = self.validated_seats(&cmd.seats)?;
        let seat_count = u32::try_from(seats.len()).map_err(|_| BookingError::Validation {
            reason: "seat list is too large".to_string(),
        })?;

        let show = self.resolve_show(&cmd.show_id).await?;

        // Range errors are caller mistakes; reject them before taking the
        // show lock so malformed requests never contend with real bookings.
        if let Some(seat) = seats.iter().find(|s| s.value() >= show.total_seats) {
            return Err(BookingError::SeatOutOfRange {
                seat: *seat,
                total_seats: show.total_seats,
            });
        }

        let tax_percent = self.resolve_tax(&show).await?;
        let price = pricing::quote(show.unit_price, seat_count, tax_percent)
            .map_err(|e| BookingError::Internal(e.to_string()))?;

        let seat_map = self.seat_map_for(&show).await;
        let mut map = seat_map.lock().await;

        // Critical section: availability check and the paired commit happen
        // under the same lock, with no gap. It runs to completion before the
        // lock is released.
        map.validate_range(&seats)?;
        if let Some(seat) = map.first_conflict(&seats) {
            tracing::warn!(
                show_id = %cmd.show_id,
                user_id = %cmd.user_id,
                %seat,
                "booking rejected: seat already booked"
            );
            return Err(BookingError::SeatConflict { seat });
        }
        map.commit(&seats)?;

        let draft = BookingDraft {
            show_id: cmd.show_id,
            user_id: cmd.user_id.clone(),
            seats: seats.clone(),
            price,
        };
        match self.ledger.append(draft).await {
            Ok(booking) => {
                tracing::info!(
                    booking_id = %booking.id,
                    show_id = %booking.show_id,
                    user_id = %booking.user_id,
                    seats = ?booking.seats,
                    total = %booking.price.total,
                    "booking committed"
                );
                Ok(booking)
            }
            Err(e) => {
                // The ledger write failed after the seat map was updated;
                // undo the seat commit before releasing the lock so the two
                // stores never disagree.
                map.rollback(&seats);
                tracing::error!(
                    show_id = %cmd.show_id,
                    user_id = %cmd.user_id,
                    error = %e,
                    "ledger append failed, seat map rolled back"
                );
                Err(BookingError::Internal(e.to_string()))
            }
        }
    }

    /// Answers the read-only seat-availability query for a show.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::ShowNotFound`] for an unknown show and
    /// [`BookingError::Internal`] for catalog failures.
    pub async fn seat_availability(
        &self,
        show_id: &ShowId,
    ) -> Result<SeatAvailability, BookingError> {
        let show = self.resolve_show(show_id).await?;
        let tax_percent = self.resolve_tax(&show).await?;

        let booked_seats = match self.seat_maps.read().await.get(show_id) {
            Some(seat_map) => seat_map.lock().await.booked_seats(),
            None => Vec::new(),
        };

        Ok(SeatAvailability {
            show_id: *show_id,
            total_seats: show.total_seats,
            unit_price: show.unit_price,
            tax_percent,
            booked_seats,
        })
    }

    /// Replays the ledger into the seat maps, e.g. at startup over a durable
    /// ledger implementation. Returns the number of bookings restored.
    ///
    /// Entries whose show no longer resolves, or whose seats collide with
    /// already-restored state, are logged and skipped; history itself is
    /// never rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Internal`] if the ledger cannot be read.
    pub async fn restore_from_ledger(&self) -> Result<usize, BookingError> {
        let bookings = self
            .ledger
            .list_all()
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?;

        let mut restored = 0;
        for booking in bookings {
            let show = match self.shows.get_show(&booking.show_id).await {
                Ok(Some(show)) => show,
                Ok(None) => {
                    tracing::warn!(
                        booking_id = %booking.id,
                        show_id = %booking.show_id,
                        "skipping ledger entry for unknown show"
                    );
                    continue;
                }
                Err(e) => return Err(BookingError::Internal(e.to_string())),
            };

            let seat_map = self.seat_map_for(&show).await;
            let mut map = seat_map.lock().await;
            if let Err(e) = map.commit(&booking.seats) {
                tracing::warn!(
                    booking_id = %booking.id,
                    error = %e,
                    "skipping ledger entry that collides with restored state"
                );
                continue;
            }
            restored += 1;
        }

        tracing::info!(restored, "seat maps rehydrated from ledger");
        Ok(restored)
    }

    /// Rejects empty and duplicate seat lists, applies the configured cap,
    /// and returns the seats sorted ascending.
    fn validated_seats(&self, seats: &[SeatNumber]) -> Result<Vec<SeatNumber>, BookingError> {
        if seats.is_empty() {
            return Err(BookingError::Validation {
                reason: "seat list must not be empty".to_string(),
            });
        }

        if let Some(cap) = self.config.max_seats_per_request {
            if seats.len() > cap as usize {
                return Err(BookingError::Validation {
                    reason: format!("cannot book more than {cap} seats per request"),
                });
            }
        }

        let mut seen = BTreeSet::new();
        for seat in seats {
            if !seen.insert(*seat) {
                return Err(BookingError::Validation {
                    reason: format!("duplicate seat {seat} in request"),
                });
            }
        }

        Ok(seen.into_iter().collect())
    }

    async fn resolve_show(&self, show_id: &ShowId) -> Result<Show, BookingError> {
        self.shows
            .get_show(show_id)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?
            .ok_or(BookingError::ShowNotFound(*show_id))
    }

    /// Resolves the theatre's tax percentage, falling back to the configured
    /// default when the theatre is missing from the catalog. The fallback is
    /// documented degraded behavior and is logged; transport failures are
    /// internal errors, not defaulted.
    async fn resolve_tax(&self, show: &Show) -> Result<TaxPercent, BookingError> {
        match self.theatres.get_theatre(&show.theatre_id).await {
            Ok(Some(theatre)) => Ok(theatre.tax_percent),
            Ok(None) => {
                tracing::warn!(
                    show_id = %show.id,
                    theatre_id = %show.theatre_id,
                    fallback = %self.config.default_tax_percent,
                    "theatre not in catalog, using default tax percent"
                );
                Ok(self.config.default_tax_percent)
            }
            Err(e) => Err(BookingError::Internal(e.to_string())),
        }
    }

    /// Returns the show's seat map, creating it on first touch. The map is
    /// keyed by show and sized from immutable show metadata.
    async fn seat_map_for(&self, show: &Show) -> Arc<Mutex<SeatMap>> {
        if let Some(seat_map) = self.seat_maps.read().await.get(&show.id) {
            return Arc::clone(seat_map);
        }

        let mut maps = self.seat_maps.write().await;
        // Re-check under the write lock: another task may have created it.
        Arc::clone(
            maps.entry(show.id)
                .or_insert_with(|| Arc::new(Mutex::new(SeatMap::new(show.total_seats)))),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryShowCatalog, InMemoryTheatreCatalog};
    use crate::error::ErrorKind;
    use crate::ledger::{InMemoryBookingLedger, LedgerError};
    use crate::types::{Theatre, TheatreId};
    use async_trait::async_trait;

    struct Fixture {
        coordinator: BookingCoordinator,
        ledger: Arc<InMemoryBookingLedger>,
        show_id: ShowId,
    }

    /// A 50-seat show priced 200 in a theatre taxing 10%.
    async fn fixture() -> Fixture {
        fixture_with_ledger(Arc::new(InMemoryBookingLedger::new())).await
    }

    async fn fixture_with_ledger(ledger: Arc<InMemoryBookingLedger>) -> Fixture {
        let shows = Arc::new(InMemoryShowCatalog::new());
        let theatres = Arc::new(InMemoryTheatreCatalog::new());

        let theatre = Theatre::new(TheatreId::new(), TaxPercent::new(10));
        theatres.insert(theatre).await;

        let show = Show::new(
            ShowId::new(),
            theatre.id,
            "2026-09-01 18:30".to_string(),
            50,
            Money::from_minor(200),
        );
        let show_id = show.id;
        shows.insert(show).await;

        let coordinator = BookingCoordinator::new(
            shows,
            theatres,
            Arc::clone(&ledger) as Arc<dyn BookingLedger>,
            BookingConfig::default(),
        );

        Fixture {
            coordinator,
            ledger,
            show_id,
        }
    }

    fn command(show_id: ShowId, user: &str, seats: &[u32]) -> BookingCommand {
        BookingCommand {
            show_id,
            user_id: UserId::new(user).unwrap(),
            seats: seats.iter().copied().map(SeatNumber::new).collect(),
        }
    }

    #[tokio::test]
    async fn books_seats_and_prices_them() {
        let fx = fixture().await;

        let booking = fx
            .coordinator
            .book_seats(command(fx.show_id, "alice", &[1, 2, 3]))
            .await
            .unwrap();

        assert_eq!(booking.price.subtotal, Money::from_minor(600));
        assert_eq!(booking.price.tax, Money::from_minor(60));
        assert_eq!(booking.price.total, Money::from_minor(660));
        assert_eq!(
            booking.seats,
            vec![SeatNumber::new(1), SeatNumber::new(2), SeatNumber::new(3)]
        );

        // Exactly one ledger append per successful call.
        assert_eq!(fx.ledger.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_seat_is_validation_with_no_mutation() {
        let fx = fixture().await;

        let err = fx
            .coordinator
            .book_seats(command(fx.show_id, "alice", &[75]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert!(fx.ledger.list_all().await.unwrap().is_empty());
        let availability = fx.coordinator.seat_availability(&fx.show_id).await.unwrap();
        assert!(availability.booked_seats.is_empty());
    }

    #[tokio::test]
    async fn unknown_show_is_not_found_with_no_mutation() {
        let fx = fixture().await;

        let err = fx
            .coordinator
            .book_seats(command(ShowId::new(), "alice", &[1]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(fx.ledger.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_and_duplicate_seat_lists_are_rejected() {
        let fx = fixture().await;

        let err = fx
            .coordinator
            .book_seats(command(fx.show_id, "alice", &[]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = fx
            .coordinator
            .book_seats(command(fx.show_id, "alice", &[3, 4, 3]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert!(fx.ledger.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn booked_seat_is_rejected_on_every_retry() {
        let fx = fixture().await;

        fx.coordinator
            .book_seats(command(fx.show_id, "alice", &[5]))
            .await
            .unwrap();

        for _ in 0..3 {
            let err = fx
                .coordinator
                .book_seats(command(fx.show_id, "bob", &[4, 5, 6]))
                .await
                .unwrap_err();
            assert_eq!(
                err,
                BookingError::SeatConflict {
                    seat: SeatNumber::new(5)
                }
            );
        }

        // All-or-nothing: the conflicting request booked nothing.
        let availability = fx.coordinator.seat_availability(&fx.show_id).await.unwrap();
        assert_eq!(availability.booked_seats, vec![SeatNumber::new(5)]);
        assert_eq!(fx.ledger.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_theatre_falls_back_to_default_tax() {
        let shows = Arc::new(InMemoryShowCatalog::new());
        let theatres = Arc::new(InMemoryTheatreCatalog::new());
        let ledger = Arc::new(InMemoryBookingLedger::new());

        // Show points at a theatre the catalog does not know.
        let show = Show::new(
            ShowId::new(),
            TheatreId::new(),
            "2026-09-01 21:00".to_string(),
            50,
            Money::from_minor(200),
        );
        let show_id = show.id;
        shows.insert(show).await;

        let coordinator = BookingCoordinator::new(
            shows,
            theatres,
            ledger,
            BookingConfig::default(),
        );

        let booking = coordinator
            .book_seats(command(show_id, "alice", &[0]))
            .await
            .unwrap();
        // Default tax percent is 10.
        assert_eq!(booking.price.tax, Money::from_minor(20));
    }

    #[tokio::test]
    async fn seat_cap_from_config_is_enforced() {
        let shows = Arc::new(InMemoryShowCatalog::new());
        let theatres = Arc::new(InMemoryTheatreCatalog::new());
        let theatre = Theatre::new(TheatreId::new(), TaxPercent::new(10));
        theatres.insert(theatre).await;
        let show = Show::new(
            ShowId::new(),
            theatre.id,
            "2026-09-02 18:30".to_string(),
            50,
            Money::from_minor(200),
        );
        let show_id = show.id;
        shows.insert(show).await;

        let coordinator = BookingCoordinator::new(
            shows,
            theatres,
            Arc::new(InMemoryBookingLedger::new()),
            BookingConfig {
                max_seats_per_request: Some(2),
                ..BookingConfig::default()
            },
        );

        let err = coordinator
            .book_seats(command(show_id, "alice", &[1, 2, 3]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn availability_combines_catalog_and_seat_map() {
        let fx = fixture().await;

        fx.coordinator
            .book_seats(command(fx.show_id, "alice", &[2, 7]))
            .await
            .unwrap();

        let availability = fx.coordinator.seat_availability(&fx.show_id).await.unwrap();
        assert_eq!(availability.total_seats, 50);
        assert_eq!(availability.unit_price, Money::from_minor(200));
        assert_eq!(availability.tax_percent, TaxPercent::new(10));
        assert_eq!(
            availability.booked_seats,
            vec![SeatNumber::new(2), SeatNumber::new(7)]
        );
    }

    /// Ledger that accepts reads but fails every append.
    struct FailingLedger;

    #[async_trait]
    impl BookingLedger for FailingLedger {
        async fn append(&self, _draft: BookingDraft) -> Result<Booking, LedgerError> {
            Err(LedgerError("disk full".to_string()))
        }

        async fn list_by_user(&self, _user_id: &UserId) -> Result<Vec<Booking>, LedgerError> {
            Ok(Vec::new())
        }

        async fn list_all(&self) -> Result<Vec<Booking>, LedgerError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn failed_ledger_append_rolls_the_seat_map_back() {
        let shows = Arc::new(InMemoryShowCatalog::new());
        let theatres = Arc::new(InMemoryTheatreCatalog::new());
        let theatre = Theatre::new(TheatreId::new(), TaxPercent::new(10));
        theatres.insert(theatre).await;
        let show = Show::new(
            ShowId::new(),
            theatre.id,
            "2026-09-03 18:30".to_string(),
            50,
            Money::from_minor(200),
        );
        let show_id = show.id;
        shows.insert(show).await;

        let coordinator = BookingCoordinator::new(
            shows,
            theatres,
            Arc::new(FailingLedger),
            BookingConfig::default(),
        );

        let err = coordinator
            .book_seats(command(show_id, "alice", &[5]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);

        // The seat commit was compensated: seat 5 is still free.
        let availability = coordinator.seat_availability(&show_id).await.unwrap();
        assert!(availability.booked_seats.is_empty());
    }

    #[tokio::test]
    async fn restore_from_ledger_rebuilds_the_seat_maps() {
        let shows = Arc::new(InMemoryShowCatalog::new());
        let theatres = Arc::new(InMemoryTheatreCatalog::new());
        let ledger = Arc::new(InMemoryBookingLedger::new());

        let theatre = Theatre::new(TheatreId::new(), TaxPercent::new(10));
        theatres.insert(theatre).await;
        let show = Show::new(
            ShowId::new(),
            theatre.id,
            "2026-09-04 18:30".to_string(),
            50,
            Money::from_minor(200),
        );
        let show_id = show.id;
        shows.insert(show).await;

        let first = BookingCoordinator::new(
            Arc::clone(&shows) as Arc<dyn ShowCatalog>,
            Arc::clone(&theatres) as Arc<dyn TheatreCatalog>,
            Arc::clone(&ledger) as Arc<dyn BookingLedger>,
            BookingConfig::default(),
        );
        first
            .book_seats(command(show_id, "alice", &[1, 2]))
            .await
            .unwrap();

        // A fresh coordinator over the same catalogs and ledger models a
        // process restart with a durable ledger behind the trait.
        let restarted = BookingCoordinator::new(
            shows,
            theatres,
            Arc::clone(&ledger) as Arc<dyn BookingLedger>,
            BookingConfig::default(),
        );
        assert_eq!(restarted.restore_from_ledger().await.unwrap(), 1);

        let availability = restarted.seat_availability(&show_id).await.unwrap();
        assert_eq!(
            availability.booked_seats,
            vec![SeatNumber::new(1), SeatNumber::new(2)]
        );
        let err = restarted
            .book_seats(command(show_id, "bob", &[2]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            BookingError::SeatConflict {
                seat: SeatNumber::new(2)
            }
        );
    }
}
