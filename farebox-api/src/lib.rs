use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod error;
pub mod items;
pub mod notifier;
pub mod state;
pub mod summary;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // Any-origin CORS for the booking frontend; preflights short-circuit here
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/api/items", get(items::list_items).post(items::create_item))
        .route("/api/items/{id}", get(items::get_item))
        .route("/api/items/{id}/seats", get(items::list_seats))
        .route(
            "/api/items/{id}/seats/available",
            get(items::list_available_seats),
        )
        .route("/api/items/{id}/bookings", get(bookings::list_item_bookings))
        .route("/api/items/{id}/book", post(bookings::book_item))
        .route("/api/bookings", get(bookings::list_all_bookings))
        .route("/api/summary", get(summary::dashboard_summary))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
