use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, seed, state::AppState};

fn test_config() -> Config {
    Config {
        server_port: 0,
        jwt_secret: "test-secret".to_string(),
        demo_password: "test-password".to_string(),
        hold_secs: 240,
        occupancy_rate: 0.0,
        seed: Some(1),
    }
}

fn setup_app() -> axum::Router {
    let config = test_config();
    let state = Arc::new(AppState::new(config.clone()));
    seed::seed(&state);
    api::routes(&config).with_state(state)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse json")
}

async fn login(app: &axum::Router, email: &str) -> (String, u32) {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": email, "password": "test-password" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    (
        body["token"].as_str().expect("token").to_string(),
        body["userId"].as_u64().expect("user id") as u32,
    )
}

fn authed(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token));
    match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = setup_app();
    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": "ana@example.com", "password": "wrong" }).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn flights_are_public() {
    let app = setup_app();
    let request = Request::builder()
        .uri("/flights")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let flights = body.as_array().expect("flight list");
    assert_eq!(flights.len(), 5);
    assert_eq!(flights[0]["flightNumber"], "AA1234");
    assert_eq!(flights[2]["aircraft"], "E190");
}

#[tokio::test]
async fn reservations_require_a_token() {
    let app = setup_app();
    let request = Request::builder()
        .method("POST")
        .uri("/reservation/book/3/1")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "seatIds": [1] }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn book_pay_and_release_flow() {
    let app = setup_app();
    let (token, user_id) = login(&app, "ana@example.com").await;

    // Flight 3 is the E190; rows 1-2 are first class at 700 each.
    let book = authed(
        "POST",
        &format!("/reservation/book/3/{user_id}"),
        &token,
        Some(json!({ "seatIds": [1, 2] })),
    );
    let response = app.clone().oneshot(book).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let reservation = read_json(response).await;
    assert_eq!(reservation["status"], "PENDING");
    assert_eq!(reservation["seatCodes"], json!(["1A", "1B"]));
    assert_eq!(reservation["totalPrice"], json!(1400.0));
    let reservation_id = reservation["reservationId"].as_u64().unwrap();

    // The hold shows up as reserved, not occupied.
    let availability = read_json(
        app.clone()
            .oneshot(
                Request::builder()
                    .uri("/seats/flight/3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(availability["reservedSeats"], json!([1, 2]));
    assert_eq!(availability["occupiedSeats"], json!([]));

    // Confirm payment: PENDING -> PAID, seats become occupied.
    let confirm = authed(
        "POST",
        "/payment/confirm",
        &token,
        Some(json!({
            "paymentStatus": "SUCCESS",
            "reservationId": reservation_id,
            "externalUserId": user_id
        })),
    );
    let response = app.clone().oneshot(confirm).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let paid = read_json(response).await;
    assert_eq!(paid["status"], "PAID");

    let availability = read_json(
        app.clone()
            .oneshot(
                Request::builder()
                    .uri("/seats/flight/3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(availability["occupiedSeats"], json!([1, 2]));
    assert_eq!(availability["reservedSeats"], json!([]));

    // Refund releases the seats again.
    let refund = authed(
        "POST",
        "/payment/cancel",
        &token,
        Some(json!({
            "paymentStatus": "REFUND",
            "reservationId": reservation_id,
            "externalUserId": user_id
        })),
    );
    let response = app.clone().oneshot(refund).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let refunded = read_json(response).await;
    assert_eq!(refunded["status"], "REFUNDED");

    let reservations = read_json(
        app.clone()
            .oneshot(authed(
                "GET",
                &format!("/reservation/user/{user_id}"),
                &token,
                None,
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(reservations[0]["status"], "REFUNDED");
}

#[tokio::test]
async fn double_booking_a_seat_conflicts() {
    let app = setup_app();
    let (token_a, user_a) = login(&app, "ana@example.com").await;
    let (token_b, user_b) = login(&app, "luis@example.com").await;

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            &format!("/reservation/book/3/{user_a}"),
            &token_a,
            Some(json!({ "seatIds": [12] })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            &format!("/reservation/book/3/{user_b}"),
            &token_b,
            Some(json!({ "seatIds": [12] })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("3D"));
}

#[tokio::test]
async fn invalid_seat_number_is_unprocessable() {
    let app = setup_app();
    let (token, user_id) = login(&app, "ana@example.com").await;

    // E190 capacity is 112.
    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            &format!("/reservation/book/3/{user_id}"),
            &token,
            Some(json!({ "seatIds": [113] })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn booking_for_another_user_is_forbidden() {
    let app = setup_app();
    let (token, user_id) = login(&app, "ana@example.com").await;

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            &format!("/reservation/book/3/{}", user_id + 1),
            &token,
            Some(json!({ "seatIds": [1] })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn cancelling_a_hold_frees_the_seats() {
    let app = setup_app();
    let (token, user_id) = login(&app, "ana@example.com").await;

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            &format!("/reservation/book/3/{user_id}"),
            &token,
            Some(json!({ "seatIds": [30] })),
        ))
        .await
        .unwrap();
    let reservation = read_json(response).await;
    let reservation_id = reservation["reservationId"].as_u64().unwrap();

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            &format!("/reservation/cancel/{reservation_id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cancelled = read_json(response).await;
    assert_eq!(cancelled["status"], "CANCELLED");

    let availability = read_json(
        app.clone()
            .oneshot(
                Request::builder()
                    .uri("/seats/flight/3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(availability["reservedSeats"], json!([]));
}

#[tokio::test]
async fn unknown_flight_is_not_found() {
    let app = setup_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/seats/flight/99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
