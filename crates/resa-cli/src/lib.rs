//! Resa CLI - terminal client for the flight reservation system.
//!
//! The `resa` binary drives the booking API through `resa-sdk`; this
//! library holds the pure pieces (seat-map rendering, seat list
//! parsing) so they stay unit-testable without a server.

pub mod render;

use resa_core::seatmap::{self, SeatMapError};
use resa_core::AircraftLayout;

/// Parse a comma-separated list of visual seat codes ("12A,12B") into
/// linear seat numbers for a layout.
pub fn parse_seat_list(codes: &str, layout: &AircraftLayout) -> Result<Vec<u32>, SeatMapError> {
    codes
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|code| {
            let (row, letter) = seatmap::parse_seat_code(code)?;
            seatmap::visual_to_linear(row, letter, layout)
        })
        .collect()
}
