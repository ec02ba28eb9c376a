//! Request handlers for the API endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::debug;

use super::AppState;
use super::types::{ErrorResponse, LevelView, VehicleRequest};
use crate::error::ParkError;
use crate::lot::{SpotAddress, TypeOccupancy};
use crate::vehicle::VehicleType;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Returns every level with per-spot status, in level order.
///
/// `GET /availability` → 200 + `Vec<LevelView>` JSON
pub async fn get_availability(State(state): State<Arc<AppState>>) -> Json<Vec<LevelView>> {
    let lot = state.lock();
    Json(lot.levels().iter().map(LevelView::from).collect())
}

/// Returns occupied and total spot counts per vehicle type.
///
/// `GET /occupancy` → 200 + `{ "car": { "occupied": n, "total": m }, ... }`
pub async fn get_occupancy(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<VehicleType, TypeOccupancy>> {
    Json(state.lock().occupancy())
}

/// Parks a vehicle in the first free compatible spot.
///
/// `POST /park` → 200 + `SpotAddress`
/// → 409 when no spot is free or the plate is already parked
pub async fn park(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VehicleRequest>,
) -> Result<Json<SpotAddress>, ApiError> {
    let at = state.lock().park_vehicle(&req).map_err(to_response)?;
    debug!(plate = %req.license_plate, %at, "parked via API");
    Ok(Json(at))
}

/// Removes a vehicle from the lot.
///
/// `POST /unpark` → 200 + `SpotAddress` of the freed spot
/// → 404 when the vehicle is not parked
pub async fn unpark(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VehicleRequest>,
) -> Result<Json<SpotAddress>, ApiError> {
    let at = state.lock().unpark_vehicle(&req).map_err(to_response)?;
    debug!(plate = %req.license_plate, %at, "unparked via API");
    Ok(Json(at))
}

fn to_response(err: ParkError) -> ApiError {
    let status = match err {
        ParkError::NoAvailableSpot { .. } | ParkError::AlreadyParked { .. } => StatusCode::CONFLICT,
        ParkError::NotParked { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::lot::{Level, ParkingLot, SpotLayout};

    fn make_test_state() -> Arc<AppState> {
        let mut lot = ParkingLot::new();
        lot.add_level(Level::with_layout(1, &SpotLayout::new(2, 1, 0)));
        lot.add_level(Level::with_layout(2, &SpotLayout::new(1, 0, 1)));
        Arc::new(AppState::new(lot))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn availability_lists_levels() {
        let app = router(make_test_state());
        let req = Request::builder()
            .uri("/availability")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 2);
        assert_eq!(json[0]["floor"], 1);
        assert_eq!(json[1]["spots"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn park_returns_spot_address() {
        let app = router(make_test_state());
        let resp = app
            .oneshot(post_json(
                "/park",
                r#"{"license_plate":"XYZ789","vehicle_type":"truck"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["floor"], 2);
        assert_eq!(json["spot"], 1);
    }

    #[tokio::test]
    async fn park_without_spot_is_conflict() {
        let state = make_test_state();
        let body = r#"{"license_plate":"T2","vehicle_type":"truck"}"#;
        let first = router(state.clone())
            .oneshot(post_json("/park", r#"{"license_plate":"T1","vehicle_type":"truck"}"#))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = router(state).oneshot(post_json("/park", body)).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unpark_unknown_vehicle_is_not_found() {
        let app = router(make_test_state());
        let resp = app
            .oneshot(post_json(
                "/unpark",
                r#"{"license_plate":"NOPE","vehicle_type":"car"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn park_then_unpark_updates_shared_lot() {
        let state = make_test_state();
        let car = r#"{"license_plate":"ABC123","vehicle_type":"car"}"#;

        let resp = router(state.clone())
            .oneshot(post_json("/park", car))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.lock().occupied_count(), 1);

        let resp = router(state.clone())
            .oneshot(post_json("/unpark", car))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.lock().occupied_count(), 0);
    }
}
