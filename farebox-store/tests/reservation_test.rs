//! Reservation properties exercised against a real PostgreSQL instance.
//!
//! Run with a disposable database:
//!   DATABASE_URL=postgres://... cargo test -p farebox-store -- --ignored

use farebox_core::{BookingMode, BookingRequest, CreateItemRequest, InventoryItem, ItemKind};
use farebox_store::reservation::{self, ReservationError};
use farebox_store::{bookings, items};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

fn customer() -> BookingRequest {
    BookingRequest {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        quantity: None,
        selected_seats: None,
    }
}

async fn create(pool: &PgPool, kind: ItemKind, capacity: i32) -> InventoryItem {
    let request = CreateItemRequest {
        name: format!("test item {}", uuid::Uuid::new_v4()),
        description: None,
        location: None,
        starts_at: None,
        kind,
        capacity,
    };
    items::create_item(pool, &request).await.expect("create item")
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn concurrent_requests_cannot_oversell() {
    let pool = test_pool().await;
    let item = create(&pool, ItemKind::Ticketed, 2).await;

    let req = customer();
    let mode = BookingMode::Tickets(2);
    let (a, b) = tokio::join!(
        reservation::reserve(&pool, item.id, &req, &mode),
        reservation::reserve(&pool, item.id, &req, &mode),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one of two racing requests may win");

    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(
        loser,
        Err(ReservationError::InsufficientCapacity { .. })
    ));

    let item = items::get_item(&pool, item.id).await.unwrap().unwrap();
    assert_eq!(item.remaining, 0);

    let committed: i32 = bookings::list_for_item(&pool, item.id)
        .await
        .unwrap()
        .iter()
        .map(|b| b.quantity)
        .sum();
    assert_eq!(committed, 2);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn a_seat_is_never_claimed_twice() {
    let pool = test_pool().await;
    let item = create(&pool, ItemKind::Seated, 10).await;

    let req = customer();
    let mode = BookingMode::Seats(vec![3]);
    let (a, b) = tokio::join!(
        reservation::reserve(&pool, item.id, &req, &mode),
        reservation::reserve(&pool, item.id, &req, &mode),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(
        loser,
        Err(ReservationError::SeatAlreadyBooked { seat: 3, .. })
    ));

    let available = items::list_available_seats(&pool, item.id).await.unwrap();
    assert!(available.iter().all(|s| s.seat_number != 3));
    assert_eq!(available.len(), 9);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn multi_seat_booking_is_all_or_nothing() {
    let pool = test_pool().await;
    let item = create(&pool, ItemKind::Seated, 10).await;
    let req = customer();

    reservation::reserve(&pool, item.id, &req, &BookingMode::Seats(vec![6]))
        .await
        .expect("seat 6 books cleanly");

    let result =
        reservation::reserve(&pool, item.id, &req, &BookingMode::Seats(vec![5, 6, 7])).await;
    assert!(matches!(
        result,
        Err(ReservationError::SeatAlreadyBooked { seat: 6, .. })
    ));

    // Seats 5 and 7 were not claimed and no booking rows were created
    let available: Vec<i32> = items::list_available_seats(&pool, item.id)
        .await
        .unwrap()
        .iter()
        .map(|s| s.seat_number)
        .collect();
    assert!(available.contains(&5));
    assert!(available.contains(&7));

    let committed = bookings::list_for_item(&pool, item.id).await.unwrap();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].seat_number, Some(6));

    let item = items::get_item(&pool, item.id).await.unwrap().unwrap();
    assert_eq!(item.remaining, 9);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn remaining_tracks_committed_quantities_exactly() {
    let pool = test_pool().await;
    let item = create(&pool, ItemKind::Seated, 20).await;
    let req = customer();

    reservation::reserve(&pool, item.id, &req, &BookingMode::Seats(vec![1, 2, 3]))
        .await
        .unwrap();
    reservation::reserve(&pool, item.id, &req, &BookingMode::Seats(vec![10]))
        .await
        .unwrap();

    let refreshed = items::get_item(&pool, item.id).await.unwrap().unwrap();
    let committed: i32 = bookings::list_for_item(&pool, item.id)
        .await
        .unwrap()
        .iter()
        .map(|b| b.quantity)
        .sum();
    assert_eq!(refreshed.remaining, refreshed.total_capacity - committed);

    let available = items::list_available_seats(&pool, item.id).await.unwrap();
    assert_eq!(available.len() as i32, refreshed.remaining);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn mode_mismatch_is_rejected_without_side_effects() {
    let pool = test_pool().await;
    let item = create(&pool, ItemKind::Ticketed, 5).await;
    let req = customer();

    let result =
        reservation::reserve(&pool, item.id, &req, &BookingMode::Seats(vec![1])).await;
    assert!(matches!(result, Err(ReservationError::QuantityRequired)));

    let refreshed = items::get_item(&pool, item.id).await.unwrap().unwrap();
    assert_eq!(refreshed.remaining, 5);
}
