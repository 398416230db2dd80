//! Seat inventory and booking transaction core.
//!
//! Reserves seats for scheduled shows and records the resulting transaction.
//! The guarantee at the center of the crate: no two concurrent requests can
//! claim the same seat for the same show. Each show has one critical section
//! covering the availability check and the paired seat-map/ledger commit;
//! shows never contend with each other.
//!
//! Account management, catalog CRUD, HTTP routing, and storage transport are
//! external collaborators, reached through the [`catalog`] and [`ledger`]
//! seams and the [`api`] request/response schema.
//!
//! # Example
//!
//! ```
//! use boxoffice_booking::catalog::{InMemoryShowCatalog, InMemoryTheatreCatalog};
//! use boxoffice_booking::config::BookingConfig;
//! use boxoffice_booking::coordinator::{BookingCommand, BookingCoordinator};
//! use boxoffice_booking::ledger::InMemoryBookingLedger;
//! use boxoffice_booking::types::{Money, SeatNumber, Show, ShowId, TaxPercent, Theatre, TheatreId, UserId};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let shows = Arc::new(InMemoryShowCatalog::new());
//! let theatres = Arc::new(InMemoryTheatreCatalog::new());
//!
//! let theatre = Theatre::new(TheatreId::new(), TaxPercent::new(10));
//! theatres.insert(theatre).await;
//! let show = Show::new(ShowId::new(), theatre.id, "18:30".into(), 50, Money::from_minor(200));
//! let show_id = show.id;
//! shows.insert(show).await;
//!
//! let coordinator = BookingCoordinator::new(
//!     shows,
//!     theatres,
//!     Arc::new(InMemoryBookingLedger::new()),
//!     BookingConfig::default(),
//! );
//!
//! let booking = coordinator
//!     .book_seats(BookingCommand {
//!         show_id,
//!         user_id: UserId::new("alice@example.com")?,
//!         seats: vec![SeatNumber::new(1), SeatNumber::new(2), SeatNumber::new(3)],
//!     })
//!     .await?;
//! assert_eq!(booking.price.total, Money::from_minor(660));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod ledger;
pub mod pricing;
pub mod seat_map;
pub mod types;

pub use config::BookingConfig;
pub use coordinator::{BookingCommand, BookingCoordinator, SeatAvailability};
pub use error::{BookingError, ErrorKind};
