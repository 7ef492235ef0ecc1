//! REST API routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

use resa_core::models::{
    BookSeatsRequest, Flight, LoginRequest, LoginResponse, PaymentRequest, Reservation,
    SeatAvailability,
};

use crate::api::auth::{self, AuthUser, JwtKeys};
use crate::config::Config;
use crate::error::ApiError;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    let keys = JwtKeys::new(&config.jwt_secret);

    let public_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/flights", get(list_flights))
        .route("/seats/flight/:flight_id", get(seat_availability));

    let protected_routes = Router::new()
        .route("/reservation/book/:flight_id/:user_id", post(book_seats))
        .route("/reservation/user/:user_id", get(user_reservations))
        .route("/reservation/cancel/:reservation_id", post(cancel_reservation))
        .route("/payment/confirm", post(confirm_payment))
        .route("/payment/cancel", post(cancel_payment))
        .layer(middleware::from_fn_with_state(keys.clone(), auth::require_user));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(keys))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Extension(keys): Extension<JwtKeys>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.email.trim().is_empty() || payload.password != state.config().demo_password {
        return Err(ApiError::Unauthorized("invalid credentials".into()));
    }
    let user_id = state.user_id_for(&payload.email);
    let token = keys
        .issue(user_id)
        .map_err(|err| ApiError::Unauthorized(format!("could not issue token: {err}")))?;
    tracing::info!(user_id, "user logged in");
    Ok(Json(LoginResponse { token, user_id }))
}

async fn list_flights(State(state): State<Arc<AppState>>) -> Json<Vec<Flight>> {
    Json(state.flights())
}

async fn seat_availability(
    State(state): State<Arc<AppState>>,
    Path(flight_id): Path<u32>,
) -> Result<Json<SeatAvailability>, ApiError> {
    let availability = state.availability(flight_id)?;
    Ok(Json(availability))
}

async fn book_seats(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(auth_user)): Extension<AuthUser>,
    Path((flight_id, user_id)): Path<(u32, u32)>,
    Json(payload): Json<BookSeatsRequest>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    if auth_user != user_id {
        return Err(ApiError::Forbidden(
            "cannot book seats for another user".into(),
        ));
    }
    let reservation = state.book_seats(flight_id, user_id, &payload.seat_ids)?;
    tracing::info!(
        reservation = reservation.reservation_id,
        flight = flight_id,
        user = user_id,
        seats = ?reservation.seat_codes,
        "reservation created"
    );
    Ok((StatusCode::CREATED, Json(reservation)))
}

async fn user_reservations(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(auth_user)): Extension<AuthUser>,
    Path(user_id): Path<u32>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    if auth_user != user_id {
        return Err(ApiError::Forbidden(
            "cannot list another user's reservations".into(),
        ));
    }
    Ok(Json(state.user_reservations(user_id)))
}

async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(auth_user)): Extension<AuthUser>,
    Path(reservation_id): Path<u32>,
) -> Result<Json<Reservation>, ApiError> {
    let reservation = state.cancel_reservation(reservation_id, auth_user)?;
    tracing::info!(reservation = reservation_id, "reservation cancelled");
    Ok(Json(reservation))
}

async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(auth_user)): Extension<AuthUser>,
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<Reservation>, ApiError> {
    apply_payment(state, auth_user, payload).await
}

async fn cancel_payment(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(auth_user)): Extension<AuthUser>,
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<Reservation>, ApiError> {
    apply_payment(state, auth_user, payload).await
}

async fn apply_payment(
    state: Arc<AppState>,
    auth_user: u32,
    payload: PaymentRequest,
) -> Result<Json<Reservation>, ApiError> {
    if auth_user != payload.external_user_id {
        return Err(ApiError::Forbidden(
            "cannot settle another user's reservation".into(),
        ));
    }
    let reservation = state.apply_payment(
        payload.reservation_id,
        payload.external_user_id,
        payload.payment_status,
    )?;
    tracing::info!(
        reservation = reservation.reservation_id,
        status = %reservation.status,
        "payment applied"
    );
    Ok(Json(reservation))
}
