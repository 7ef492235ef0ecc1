pub mod catalog;
pub mod layout;
pub mod models;
pub mod pricing;
pub mod seatmap;
pub mod selection;

pub use catalog::{AircraftCatalog, AircraftType};
pub use layout::{AircraftLayout, CabinName, CabinRange, LayoutError};
pub use models::{
    BookSeatsRequest, Endpoint, Flight, LoginRequest, LoginResponse, PaymentRequest,
    PaymentStatus, Reservation, ReservationStatus, SeatAvailability,
};
pub use pricing::FareStrategy;
pub use seatmap::{
    cabin_price_for_seat, linear_to_visual, parse_seat_code, price_for_seat, row_cabin, seat_code,
    seats_per_row, visual_to_linear, SeatMapError, SeatPosition,
};
pub use selection::{OverflowPolicy, SeatSelection, ToggleOutcome};
