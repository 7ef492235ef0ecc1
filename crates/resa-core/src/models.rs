//! Wire models shared by the booking server, SDK and CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::AircraftType;

/// One side of a flight: airport code, city and local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub code: String,
    pub city: String,
    pub time: String,
}

/// A scheduled flight offered for booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: u32,
    pub flight_number: String,
    pub origin: Endpoint,
    pub destination: Endpoint,
    pub aircraft: AircraftType,
    pub aircraft_model: String,
    /// ISO date, e.g. "2026-01-04"
    pub date: String,
    pub duration: String,
    /// Base economy fare
    pub price: f64,
}

/// Occupancy snapshot for one flight. `occupied` seats are sold;
/// `reserved` seats are under an active hold by some user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAvailability {
    pub flight_id: u32,
    pub occupied_seats: Vec<u32>,
    pub reserved_seats: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Held, awaiting payment; expires when the hold runs out.
    Pending,
    Paid,
    Cancelled,
    Refunded,
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Paid => "PAID",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Refunded => "REFUNDED",
        };
        f.write_str(s)
    }
}

/// A user's reservation of one or more seats on a flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_id: u32,
    pub external_user_id: u32,
    pub external_flight_id: u32,
    pub seat_ids: Vec<u32>,
    /// Visual codes matching `seat_ids`, e.g. ["12A", "12B"]
    pub seat_codes: Vec<String>,
    pub status: ReservationStatus,
    pub total_price: f64,
    /// When a pending hold lapses if unpaid
    pub hold_expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether the seats of this reservation still block other buyers.
    pub fn blocks_seats(&self) -> bool {
        matches!(
            self.status,
            ReservationStatus::Pending | ReservationStatus::Paid
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSeatsRequest {
    pub seat_ids: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Success,
    Refund,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub payment_status: PaymentStatus,
    pub reservation_id: u32,
    pub external_user_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: u32,
}
