//! REST API over a live parking lot.
//!
//! Endpoints:
//! - `GET /availability`: every level with per-spot status
//! - `GET /occupancy`: occupied and total spots per vehicle type
//! - `POST /park`: park a vehicle, returns its spot
//! - `POST /unpark`: remove a vehicle, returns the spot it left

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::lot::ParkingLot;

pub use types::{ErrorResponse, LevelView, SpotView, VehicleRequest};

/// Application state shared across all request handlers.
///
/// One mutex guards the whole lot, so park and unpark requests are
/// applied one at a time.
pub struct AppState {
    lot: Mutex<ParkingLot>,
}

impl AppState {
    /// Wraps a lot for serving.
    pub fn new(lot: ParkingLot) -> Self {
        Self {
            lot: Mutex::new(lot),
        }
    }

    /// Locks the lot. A panic in another handler does not make the lot
    /// unusable; its last consistent state is kept.
    pub fn lock(&self) -> MutexGuard<'_, ParkingLot> {
        self.lot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/availability", get(handlers::get_availability))
        .route("/occupancy", get(handlers::get_occupancy))
        .route("/park", post(handlers::park))
        .route("/unpark", post(handlers::unpark))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
