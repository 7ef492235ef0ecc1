//! In-memory state store using DashMap.

use chrono::{Duration, Utc};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};

use resa_core::models::{Flight, PaymentStatus, Reservation, ReservationStatus, SeatAvailability};
use resa_core::seatmap::{self, SeatMapError};
use resa_core::{AircraftCatalog, AircraftLayout};

use crate::config::Config;

/// Booking failures surfaced by [`AppState::book_seats`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("flight {0} does not exist")]
    UnknownFlight(u32),
    #[error("no seats requested")]
    NoSeatsRequested,
    #[error("invalid seat: {0}")]
    InvalidSeat(#[from] SeatMapError),
    #[error("seats no longer available: {codes:?}")]
    SeatsUnavailable { codes: Vec<String> },
}

/// Failures for operations on an existing reservation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReservationError {
    #[error("reservation {0} does not exist")]
    UnknownReservation(u32),
    #[error("reservation {reservation_id} belongs to another user")]
    WrongUser { reservation_id: u32 },
    #[error("reservation {reservation_id} is {status}, cannot {action}")]
    InvalidTransition {
        reservation_id: u32,
        status: ReservationStatus,
        action: &'static str,
    },
}

/// Application state - thread-safe store for flights, occupancy and
/// reservations.
pub struct AppState {
    catalog: AircraftCatalog,
    flights: DashMap<u32, Flight>,
    /// Seats sold outside the reservation flow (seeded occupancy)
    sold: DashMap<u32, HashSet<u32>>,
    reservations: DashMap<u32, Reservation>,
    /// Serializes the clash check and insert in [`Self::book_seats`].
    booking_lock: std::sync::Mutex<()>,
    users: DashMap<String, u32>,
    reservation_counter: AtomicU32,
    user_counter: AtomicU32,
    config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            catalog: AircraftCatalog::standard(),
            flights: DashMap::new(),
            sold: DashMap::new(),
            reservations: DashMap::new(),
            booking_lock: std::sync::Mutex::new(()),
            users: DashMap::new(),
            reservation_counter: AtomicU32::new(1),
            user_counter: AtomicU32::new(1),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &AircraftCatalog {
        &self.catalog
    }

    /// Load a flight and its pre-sold seats.
    pub fn insert_flight(&self, flight: Flight, sold: HashSet<u32>) {
        self.sold.insert(flight.id, sold);
        self.flights.insert(flight.id, flight);
    }

    pub fn flights(&self) -> Vec<Flight> {
        let mut flights: Vec<Flight> = self.flights.iter().map(|r| r.value().clone()).collect();
        flights.sort_by_key(|f| f.id);
        flights
    }

    pub fn flight(&self, flight_id: u32) -> Option<Flight> {
        self.flights.get(&flight_id).map(|r| r.value().clone())
    }

    fn layout_for(&self, flight: &Flight) -> &AircraftLayout {
        self.catalog.layout(flight.aircraft)
    }

    /// Stable user id per login email.
    pub fn user_id_for(&self, email: &str) -> u32 {
        *self
            .users
            .entry(email.to_ascii_lowercase())
            .or_insert_with(|| self.user_counter.fetch_add(1, Ordering::SeqCst))
    }

    /// Current occupancy snapshot for a flight: sold seats (seeded plus
    /// paid reservations) and seats under an active pending hold.
    pub fn availability(&self, flight_id: u32) -> Result<SeatAvailability, BookingError> {
        if !self.flights.contains_key(&flight_id) {
            return Err(BookingError::UnknownFlight(flight_id));
        }

        let mut occupied: HashSet<u32> = self
            .sold
            .get(&flight_id)
            .map(|s| s.value().clone())
            .unwrap_or_default();
        let mut reserved: HashSet<u32> = HashSet::new();

        for entry in self.reservations.iter() {
            let reservation = entry.value();
            if reservation.external_flight_id != flight_id {
                continue;
            }
            match reservation.status {
                ReservationStatus::Paid => occupied.extend(&reservation.seat_ids),
                ReservationStatus::Pending => reserved.extend(&reservation.seat_ids),
                _ => {}
            }
        }

        let mut occupied: Vec<u32> = occupied.into_iter().collect();
        let mut reserved: Vec<u32> = reserved.into_iter().collect();
        occupied.sort_unstable();
        reserved.sort_unstable();

        Ok(SeatAvailability {
            flight_id,
            occupied_seats: occupied,
            reserved_seats: reserved,
        })
    }

    /// Create a pending reservation holding the given seats.
    ///
    /// Every seat id is validated against the flight's layout and priced
    /// through the cabin table before any state changes.
    pub fn book_seats(
        &self,
        flight_id: u32,
        user_id: u32,
        seat_ids: &[u32],
    ) -> Result<Reservation, BookingError> {
        if seat_ids.is_empty() {
            return Err(BookingError::NoSeatsRequested);
        }
        let flight = self
            .flight(flight_id)
            .ok_or(BookingError::UnknownFlight(flight_id))?;
        let layout = self.layout_for(&flight);

        let mut seat_codes = Vec::with_capacity(seat_ids.len());
        let mut total_price = 0.0;
        for &num in seat_ids {
            let position = seatmap::linear_to_visual(num, layout)?;
            total_price += seatmap::cabin_price_for_seat(num, layout)?;
            seat_codes.push(position.code());
        }

        // The availability snapshot and the reservation insert must happen
        // under one lock, or two concurrent requests can both hold the
        // same seat.
        let _guard = self
            .booking_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let availability = self.availability(flight_id)?;
        let taken: HashSet<u32> = availability
            .occupied_seats
            .iter()
            .chain(availability.reserved_seats.iter())
            .copied()
            .collect();
        let clashed: Vec<String> = seat_ids
            .iter()
            .zip(&seat_codes)
            .filter(|(num, _)| taken.contains(num))
            .map(|(_, code)| code.clone())
            .collect();
        if !clashed.is_empty() {
            return Err(BookingError::SeatsUnavailable { codes: clashed });
        }

        let now = Utc::now();
        let reservation = Reservation {
            reservation_id: self.reservation_counter.fetch_add(1, Ordering::SeqCst),
            external_user_id: user_id,
            external_flight_id: flight_id,
            seat_ids: seat_ids.to_vec(),
            seat_codes,
            status: ReservationStatus::Pending,
            total_price,
            hold_expires_at: now + Duration::seconds(self.config.hold_secs as i64),
            created_at: now,
            updated_at: now,
        };
        self.reservations
            .insert(reservation.reservation_id, reservation.clone());
        Ok(reservation)
    }

    pub fn user_reservations(&self, user_id: u32) -> Vec<Reservation> {
        let mut reservations: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.value().external_user_id == user_id)
            .map(|r| r.value().clone())
            .collect();
        reservations.sort_by_key(|r| r.reservation_id);
        reservations
    }

    /// Cancel a reservation, freeing its seats.
    pub fn cancel_reservation(
        &self,
        reservation_id: u32,
        user_id: u32,
    ) -> Result<Reservation, ReservationError> {
        self.transition(reservation_id, user_id, "cancel", |status| match status {
            ReservationStatus::Pending => Some(ReservationStatus::Cancelled),
            _ => None,
        })
    }

    /// Apply a payment outcome: SUCCESS settles a pending hold, REFUND
    /// releases a paid (or still pending) reservation.
    pub fn apply_payment(
        &self,
        reservation_id: u32,
        user_id: u32,
        payment: PaymentStatus,
    ) -> Result<Reservation, ReservationError> {
        match payment {
            PaymentStatus::Success => {
                self.transition(reservation_id, user_id, "confirm payment", |status| {
                    match status {
                        ReservationStatus::Pending => Some(ReservationStatus::Paid),
                        _ => None,
                    }
                })
            }
            PaymentStatus::Refund => {
                self.transition(reservation_id, user_id, "refund", |status| match status {
                    ReservationStatus::Pending | ReservationStatus::Paid => {
                        Some(ReservationStatus::Refunded)
                    }
                    _ => None,
                })
            }
        }
    }

    fn transition(
        &self,
        reservation_id: u32,
        user_id: u32,
        action: &'static str,
        next: impl Fn(ReservationStatus) -> Option<ReservationStatus>,
    ) -> Result<Reservation, ReservationError> {
        let mut entry = self
            .reservations
            .get_mut(&reservation_id)
            .ok_or(ReservationError::UnknownReservation(reservation_id))?;
        let reservation = entry.value_mut();
        if reservation.external_user_id != user_id {
            return Err(ReservationError::WrongUser { reservation_id });
        }
        let Some(new_status) = next(reservation.status) else {
            return Err(ReservationError::InvalidTransition {
                reservation_id,
                status: reservation.status,
                action,
            });
        };
        reservation.status = new_status;
        reservation.updated_at = Utc::now();
        Ok(reservation.clone())
    }

    /// Expire pending holds past their deadline. Returns how many
    /// reservations were released.
    pub fn expire_holds(&self) -> usize {
        let now = Utc::now();
        let mut expired = 0;
        for mut entry in self.reservations.iter_mut() {
            let reservation = entry.value_mut();
            if reservation.status == ReservationStatus::Pending && reservation.hold_expires_at <= now
            {
                reservation.status = ReservationStatus::Cancelled;
                reservation.updated_at = now;
                expired += 1;
            }
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resa_core::models::Endpoint;
    use resa_core::AircraftType;

    fn test_config() -> Config {
        Config {
            server_port: 0,
            jwt_secret: "test".into(),
            demo_password: "demo".into(),
            hold_secs: 240,
            occupancy_rate: 0.0,
            seed: Some(1),
        }
    }

    fn test_flight(id: u32) -> Flight {
        Flight {
            id,
            flight_number: "AR9012".into(),
            origin: Endpoint {
                code: "EZE".into(),
                city: "Buenos Aires".into(),
                time: "18:45".into(),
            },
            destination: Endpoint {
                code: "IGR".into(),
                city: "Iguazú".into(),
                time: "20:30".into(),
            },
            aircraft: AircraftType::E190,
            aircraft_model: "Embraer E190".into(),
            date: "2025-11-15".into(),
            duration: "1h 45m".into(),
            price: 400.0,
        }
    }

    fn state_with_flight() -> AppState {
        let state = AppState::new(test_config());
        state.insert_flight(test_flight(1), HashSet::from([2]));
        state
    }

    #[test]
    fn booking_holds_seats_and_prices_by_cabin() {
        let state = state_with_flight();
        // Seats 1 and 3 are rows 1 (first, 700) and 1 (first, 700) on E190.
        let reservation = state.book_seats(1, 7, &[1, 3]).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.seat_codes, vec!["1A", "1C"]);
        assert_eq!(reservation.total_price, 1400.0);

        let availability = state.availability(1).unwrap();
        assert_eq!(availability.reserved_seats, vec![1, 3]);
        assert_eq!(availability.occupied_seats, vec![2]);
    }

    #[test]
    fn booking_a_sold_seat_is_rejected() {
        let state = state_with_flight();
        let err = state.book_seats(1, 7, &[2]).unwrap_err();
        assert_eq!(
            err,
            BookingError::SeatsUnavailable {
                codes: vec!["1B".into()]
            }
        );
    }

    #[test]
    fn booking_an_invalid_seat_is_rejected_up_front() {
        let state = state_with_flight();
        // E190 capacity is 112; 113 is out of range.
        let err = state.book_seats(1, 7, &[113]).unwrap_err();
        assert!(matches!(err, BookingError::InvalidSeat(_)));
        assert!(state.user_reservations(7).is_empty());
    }

    #[test]
    fn payment_settles_and_refund_releases() {
        let state = state_with_flight();
        let reservation = state.book_seats(1, 7, &[5]).unwrap();
        let id = reservation.reservation_id;

        let paid = state.apply_payment(id, 7, PaymentStatus::Success).unwrap();
        assert_eq!(paid.status, ReservationStatus::Paid);
        let availability = state.availability(1).unwrap();
        assert!(availability.occupied_seats.contains(&5));

        let refunded = state.apply_payment(id, 7, PaymentStatus::Refund).unwrap();
        assert_eq!(refunded.status, ReservationStatus::Refunded);
        let availability = state.availability(1).unwrap();
        assert!(!availability.occupied_seats.contains(&5));
        assert!(!availability.reserved_seats.contains(&5));
    }

    #[test]
    fn cancel_requires_matching_user_and_pending_status() {
        let state = state_with_flight();
        let reservation = state.book_seats(1, 7, &[9]).unwrap();
        let id = reservation.reservation_id;

        assert_eq!(
            state.cancel_reservation(id, 8).unwrap_err(),
            ReservationError::WrongUser { reservation_id: id }
        );

        let cancelled = state.cancel_reservation(id, 7).unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        assert!(matches!(
            state.cancel_reservation(id, 7).unwrap_err(),
            ReservationError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn expired_holds_are_released() {
        let mut config = test_config();
        config.hold_secs = 0;
        let state = AppState::new(config);
        state.insert_flight(test_flight(1), HashSet::new());

        state.book_seats(1, 7, &[4]).unwrap();
        assert_eq!(state.expire_holds(), 1);
        let availability = state.availability(1).unwrap();
        assert!(availability.reserved_seats.is_empty());

        let reservations = state.user_reservations(7);
        assert_eq!(reservations[0].status, ReservationStatus::Cancelled);
    }

    #[test]
    fn concurrent_bookings_never_hold_the_same_seat() {
        use std::sync::{Arc, Barrier};

        for _ in 0..200 {
            let state = Arc::new(AppState::new(test_config()));
            state.insert_flight(test_flight(1), HashSet::new());
            let barrier = Arc::new(Barrier::new(2));

            let handles: Vec<_> = (0..2u32)
                .map(|user| {
                    let state = Arc::clone(&state);
                    let barrier = Arc::clone(&barrier);
                    std::thread::spawn(move || {
                        barrier.wait();
                        state.book_seats(1, 10 + user, &[7]).is_ok()
                    })
                })
                .collect();

            let wins = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|&won| won)
                .count();
            assert_eq!(wins, 1, "exactly one booking may hold seat 7");
        }
    }

    #[test]
    fn user_ids_are_stable_per_email() {
        let state = state_with_flight();
        let id = state.user_id_for("ana@example.com");
        assert_eq!(state.user_id_for("ANA@example.com"), id);
        assert_ne!(state.user_id_for("luis@example.com"), id);
    }
}
