//! HTTP client for the booking server.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use resa_core::models::{
    BookSeatsRequest, Flight, LoginRequest, LoginResponse, PaymentRequest, PaymentStatus,
    Reservation, SeatAvailability,
};

use crate::error::SdkError;

/// Client for the resa booking API.
///
/// Holds the session token obtained from [`ResaClient::login`]; calls
/// that need authentication fail fast with [`SdkError::NotLoggedIn`]
/// until then.
pub struct ResaClient {
    base_url: String,
    user_id: Option<u32>,
    session_token: Option<String>,
    client: reqwest::Client,
}

impl ResaClient {
    /// Create a new client against a server base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            user_id: None,
            session_token: None,
            client: reqwest::Client::new(),
        }
    }

    /// The user id of the current session, if logged in.
    pub fn user_id(&self) -> Option<u32> {
        self.user_id
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Log in and store the session token for subsequent calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<u32, SdkError> {
        let url = format!("{}/auth/login", self.base_url);
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.client.post(&url).json(&request).send().await?;
        let login: LoginResponse = parse(response).await?;

        tracing::debug!(user_id = login.user_id, "logged in");
        self.user_id = Some(login.user_id);
        self.session_token = Some(login.token);
        Ok(login.user_id)
    }

    /// List all scheduled flights.
    pub async fn flights(&self) -> Result<Vec<Flight>, SdkError> {
        let url = format!("{}/flights", self.base_url);
        parse(self.client.get(&url).send().await?).await
    }

    /// Occupancy snapshot for a flight.
    pub async fn seat_availability(&self, flight_id: u32) -> Result<SeatAvailability, SdkError> {
        let url = format!("{}/seats/flight/{}", self.base_url, flight_id);
        parse(self.client.get(&url).send().await?).await
    }

    /// Book seats on a flight, creating a pending reservation.
    pub async fn book_seats(
        &self,
        flight_id: u32,
        seat_ids: Vec<u32>,
    ) -> Result<Reservation, SdkError> {
        let user_id = self.user_id.ok_or(SdkError::NotLoggedIn)?;
        let url = format!(
            "{}/reservation/book/{}/{}",
            self.base_url, flight_id, user_id
        );
        let builder = self.client.post(&url).json(&BookSeatsRequest { seat_ids });
        parse(self.authed(builder)?.send().await?).await
    }

    /// Reservations of the logged-in user.
    pub async fn reservations(&self) -> Result<Vec<Reservation>, SdkError> {
        let user_id = self.user_id.ok_or(SdkError::NotLoggedIn)?;
        let url = format!("{}/reservation/user/{}", self.base_url, user_id);
        parse(self.authed(self.client.get(&url))?.send().await?).await
    }

    /// Cancel a pending reservation, freeing its seats.
    pub async fn cancel_reservation(&self, reservation_id: u32) -> Result<Reservation, SdkError> {
        let url = format!("{}/reservation/cancel/{}", self.base_url, reservation_id);
        parse(self.authed(self.client.post(&url))?.send().await?).await
    }

    /// Settle a pending reservation.
    pub async fn confirm_payment(&self, reservation_id: u32) -> Result<Reservation, SdkError> {
        self.payment(reservation_id, PaymentStatus::Success, "confirm")
            .await
    }

    /// Refund a reservation.
    pub async fn cancel_payment(&self, reservation_id: u32) -> Result<Reservation, SdkError> {
        self.payment(reservation_id, PaymentStatus::Refund, "cancel")
            .await
    }

    async fn payment(
        &self,
        reservation_id: u32,
        payment_status: PaymentStatus,
        endpoint: &str,
    ) -> Result<Reservation, SdkError> {
        let user_id = self.user_id.ok_or(SdkError::NotLoggedIn)?;
        let url = format!("{}/payment/{}", self.base_url, endpoint);
        let request = PaymentRequest {
            payment_status,
            reservation_id,
            external_user_id: user_id,
        };
        parse(self.authed(self.client.post(&url))?.json(&request).send().await?).await
    }

    fn authed(&self, builder: RequestBuilder) -> Result<RequestBuilder, SdkError> {
        let token = self.session_token.as_deref().ok_or(SdkError::NotLoggedIn)?;
        Ok(builder.header("Authorization", format!("Bearer {token}")))
    }
}

/// Decode a success body, or surface the server's JSON error message.
async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, SdkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let message = error_message(status, response).await;
    Err(SdkError::Api { status, message })
}

async fn error_message(status: StatusCode, response: Response) -> String {
    match response.text().await {
        Ok(body) => serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["error"].as_str().map(str::to_string))
            .unwrap_or(body),
        Err(_) => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn authed_calls_fail_fast_without_login() {
        let client = ResaClient::new("http://localhost:3000/");
        let err = client.book_seats(1, vec![1]).await.unwrap_err();
        assert!(matches!(err, SdkError::NotLoggedIn));
        let err = client.reservations().await.unwrap_err();
        assert!(matches!(err, SdkError::NotLoggedIn));
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = ResaClient::new("http://localhost:3000//");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
