//! Booking core demo.
//!
//! Seeds an in-memory catalog with one theatre and one show, then walks
//! through the booking flow: a successful booking, a seat conflict, the
//! availability query, and the per-user ledger view.
//!
//! ```bash
//! cargo run --bin demo
//! ```

use boxoffice_booking::api::{BookingResponse, ErrorResponse, SeatAvailabilityResponse};
use boxoffice_booking::catalog::{InMemoryShowCatalog, InMemoryTheatreCatalog};
use boxoffice_booking::config::BookingConfig;
use boxoffice_booking::coordinator::{BookingCommand, BookingCoordinator};
use boxoffice_booking::ledger::{BookingLedger, InMemoryBookingLedger};
use boxoffice_booking::types::{
    Money, SeatNumber, Show, ShowId, TaxPercent, Theatre, TheatreId, UserId,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,boxoffice_booking=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n============================================");
    println!("  Boxoffice Booking Core - Demo");
    println!("============================================\n");

    let config = BookingConfig::from_env();

    // Seed the catalogs: one theatre taxing 10%, one 50-seat show at 200.
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

    let ledger = Arc::new(InMemoryBookingLedger::new());
    let coordinator = BookingCoordinator::new(
        shows,
        theatres,
        Arc::clone(&ledger) as Arc<dyn BookingLedger>,
        config,
    );

    // 1. Alice books three seats.
    println!("1. Alice books seats 1, 2, 3");
    let alice = UserId::new("alice@example.com")?;
    let booking = coordinator
        .book_seats(BookingCommand {
            show_id,
            user_id: alice.clone(),
            seats: vec![SeatNumber::new(1), SeatNumber::new(2), SeatNumber::new(3)],
        })
        .await?;
    println!(
        "   committed: {}",
        serde_json::to_string(&BookingResponse::from(&booking))?
    );

    // 2. Bob tries to take seat 2 as part of a larger request.
    println!("\n2. Bob requests seats 2, 4 (seat 2 is taken)");
    let bob = UserId::new("bob@example.com")?;
    match coordinator
        .book_seats(BookingCommand {
            show_id,
            user_id: bob.clone(),
            seats: vec![SeatNumber::new(2), SeatNumber::new(4)],
        })
        .await
    {
        Ok(_) => println!("   unexpected success"),
        Err(error) => println!(
            "   rejected: {}",
            serde_json::to_string(&ErrorResponse::from(&error))?
        ),
    }

    // 3. Bob books free seats instead.
    println!("\n3. Bob books seats 4, 5");
    coordinator
        .book_seats(BookingCommand {
            show_id,
            user_id: bob,
            seats: vec![SeatNumber::new(4), SeatNumber::new(5)],
        })
        .await?;

    // 4. Seat availability for the show.
    let availability = coordinator.seat_availability(&show_id).await?;
    println!(
        "\n4. Availability: {}",
        serde_json::to_string(&SeatAvailabilityResponse::from(&availability))?
    );

    // 5. Alice's booking history.
    let history = ledger.list_by_user(&alice).await?;
    println!("\n5. Alice has {} booking(s):", history.len());
    for entry in history {
        println!(
            "   {} seats {:?} total {} at {}",
            entry.id,
            entry.seats.iter().map(SeatNumber::value).collect::<Vec<_>>(),
            entry.price.total,
            entry.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    println!("\nDone.");
    Ok(())
}
