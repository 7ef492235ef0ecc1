//! Startup data: scheduled flights and randomized pre-sold seats.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use resa_core::models::{Endpoint, Flight};
use resa_core::AircraftType;

use crate::state::AppState;

fn endpoint(code: &str, city: &str, time: &str) -> Endpoint {
    Endpoint {
        code: code.into(),
        city: city.into(),
        time: time.into(),
    }
}

/// The scheduled flight list.
pub fn scheduled_flights() -> Vec<Flight> {
    vec![
        Flight {
            id: 1,
            flight_number: "AA1234".into(),
            origin: endpoint("EZE", "Buenos Aires", "14:30"),
            destination: endpoint("SAME", "Mendoza", "16:30"),
            aircraft: AircraftType::A330,
            aircraft_model: "Airbus A330-200".into(),
            date: "2026-01-04".into(),
            duration: "2h 00m".into(),
            price: 520.0,
        },
        Flight {
            id: 2,
            flight_number: "LA5678".into(),
            origin: endpoint("EZE", "Buenos Aires", "08:15"),
            destination: endpoint("COR", "Córdoba", "09:45"),
            aircraft: AircraftType::B737,
            aircraft_model: "Boeing 737-800".into(),
            date: "2025-12-16".into(),
            duration: "1h 30m".into(),
            price: 450.0,
        },
        Flight {
            id: 3,
            flight_number: "AR9012".into(),
            origin: endpoint("EZE", "Buenos Aires", "18:45"),
            destination: endpoint("IGR", "Iguazú", "20:30"),
            aircraft: AircraftType::E190,
            aircraft_model: "Embraer E190".into(),
            date: "2025-11-15".into(),
            duration: "1h 45m".into(),
            price: 400.0,
        },
        Flight {
            id: 4,
            flight_number: "FO3456".into(),
            origin: endpoint("EZE", "Buenos Aires", "12:00"),
            destination: endpoint("BRC", "Bariloche", "14:15"),
            aircraft: AircraftType::A330,
            aircraft_model: "Airbus A330-200".into(),
            date: "2025-11-15".into(),
            duration: "2h 15m".into(),
            price: 520.0,
        },
        Flight {
            id: 5,
            flight_number: "JA7890".into(),
            origin: endpoint("EZE", "Buenos Aires", "06:30"),
            destination: endpoint("SLA", "Salta", "08:45"),
            aircraft: AircraftType::B737,
            aircraft_model: "Boeing 737-800".into(),
            date: "2025-11-15".into(),
            duration: "2h 15m".into(),
            price: 450.0,
        },
    ]
}

/// Random set of pre-sold seat numbers for a flight.
fn random_sold_seats(rng: &mut StdRng, capacity: u32, occupancy_rate: f64) -> HashSet<u32> {
    let target = (capacity as f64 * occupancy_rate.clamp(0.0, 1.0)).floor() as usize;
    let mut sold = HashSet::with_capacity(target);
    while sold.len() < target {
        sold.insert(rng.random_range(1..=capacity));
    }
    sold
}

/// Load the flight schedule and its initial occupancy into the store.
pub fn seed(state: &AppState) {
    let config = state.config().clone();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    for flight in scheduled_flights() {
        let capacity = state.catalog().layout(flight.aircraft).capacity();
        let sold = random_sold_seats(&mut rng, capacity, config.occupancy_rate);
        tracing::debug!(
            flight = flight.id,
            aircraft = %flight.aircraft,
            sold = sold.len(),
            "seeded flight"
        );
        state.insert_flight(flight, sold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn config(rate: f64) -> Config {
        Config {
            server_port: 0,
            jwt_secret: "test".into(),
            demo_password: "demo".into(),
            hold_secs: 240,
            occupancy_rate: rate,
            seed: Some(42),
        }
    }

    #[test]
    fn seeding_loads_all_flights() {
        let state = AppState::new(config(0.3));
        seed(&state);
        assert_eq!(state.flights().len(), 5);
    }

    #[test]
    fn occupancy_matches_the_configured_rate() {
        let state = AppState::new(config(0.3));
        seed(&state);
        // E190 flight (id 3): 112 seats, 30% -> 33 pre-sold.
        let availability = state.availability(3).unwrap();
        assert_eq!(availability.occupied_seats.len(), 33);
        assert!(availability
            .occupied_seats
            .iter()
            .all(|&n| (1..=112).contains(&n)));
    }

    #[test]
    fn zero_rate_sells_nothing() {
        let state = AppState::new(config(0.0));
        seed(&state);
        let availability = state.availability(1).unwrap();
        assert!(availability.occupied_seats.is_empty());
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let a = AppState::new(config(0.3));
        let b = AppState::new(config(0.3));
        seed(&a);
        seed(&b);
        assert_eq!(
            a.availability(1).unwrap().occupied_seats,
            b.availability(1).unwrap().occupied_seats
        );
    }
}
