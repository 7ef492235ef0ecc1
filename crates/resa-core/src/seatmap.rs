//! Seat coordinate engine.
//!
//! Bidirectional mapping between a linear seat number (1-indexed,
//! row-major, as stored and transmitted by the booking backend) and its
//! visual row/letter position, plus cabin lookup and per-seat pricing.
//! Every function here is pure; callers own all state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{AircraftLayout, CabinRange};
use crate::pricing::FareStrategy;

/// Visual position of a seat: row number plus seat letter, e.g. 12A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPosition {
    pub row: u32,
    pub letter: char,
}

impl SeatPosition {
    /// The human-facing code for this position, e.g. `"12A"`.
    pub fn code(&self) -> String {
        seat_code(self.row, self.letter)
    }
}

impl std::fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row, self.letter)
    }
}

/// Seat-math failures. All of these indicate a caller or configuration
/// bug, never a transient condition; none of them should be defaulted
/// into a sentinel value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeatMapError {
    #[error("seat letter '{letter}' is not in any block of the layout")]
    InvalidSeatLetter { letter: char },
    #[error("seat number {num} is outside the valid range 1..={max}")]
    SeatNumberOutOfRange { num: u32, max: u32 },
    #[error("no cabin range covers row {row}")]
    NoCabinForRow { row: u32 },
    #[error("row {row} is outside the valid range 1..={rows}")]
    RowOutOfRange { row: u32, rows: u32 },
    #[error("'{code}' is not a valid seat code (expected row digits then a letter, e.g. 12A)")]
    MalformedSeatCode { code: String },
}

/// Number of seats in one row: the sum of all block lengths.
///
/// Constant across rows of a layout; a blockless layout yields 0 and
/// must not be used for seat math.
pub fn seats_per_row(layout: &AircraftLayout) -> usize {
    layout.blocks.iter().map(|b| b.chars().count()).sum()
}

/// Convert a visual position to its linear seat number.
///
/// Seats are numbered 1..N row-major: all seats of row 1 in block order
/// precede all seats of row 2.
pub fn visual_to_linear(
    row: u32,
    letter: char,
    layout: &AircraftLayout,
) -> Result<u32, SeatMapError> {
    if row < 1 || row > layout.rows {
        return Err(SeatMapError::RowOutOfRange {
            row,
            rows: layout.rows,
        });
    }

    let per_row = seats_per_row(layout) as u32;
    let mut offset = 0u32;
    for block in &layout.blocks {
        for (l, block_letter) in block.chars().enumerate() {
            if block_letter == letter {
                return Ok((row - 1) * per_row + offset + l as u32 + 1);
            }
        }
        offset += block.chars().count() as u32;
    }
    Err(SeatMapError::InvalidSeatLetter { letter })
}

/// Convert a linear seat number to its visual position.
///
/// Exact inverse of [`visual_to_linear`]: the round trip holds for
/// every number in `[1, rows * seats_per_row]`.
pub fn linear_to_visual(num: u32, layout: &AircraftLayout) -> Result<SeatPosition, SeatMapError> {
    let per_row = seats_per_row(layout) as u32;
    let max = layout.rows * per_row;
    if per_row == 0 || num < 1 || num > max {
        return Err(SeatMapError::SeatNumberOutOfRange { num, max });
    }

    let row = num.div_ceil(per_row);
    let mut idx = ((num - 1) % per_row) as usize;
    for block in &layout.blocks {
        let len = block.chars().count();
        if idx < len {
            // idx indexes characters, not bytes; block letters are ASCII
            // in practice but chars() keeps this correct regardless.
            let letter = block.chars().nth(idx).ok_or(
                SeatMapError::SeatNumberOutOfRange { num, max },
            )?;
            return Ok(SeatPosition { row, letter });
        }
        idx -= len;
    }
    Err(SeatMapError::SeatNumberOutOfRange { num, max })
}

/// Find the cabin range owning a row.
///
/// Returns the first range with `from_row <= row <= to_row`. A missing
/// range means malformed configuration; the error is surfaced rather
/// than defaulting to an arbitrary cabin, which would misprice the seat.
pub fn row_cabin(row: u32, cabins: &[CabinRange]) -> Result<&CabinRange, SeatMapError> {
    cabins
        .iter()
        .find(|c| row >= c.from_row && row <= c.to_row)
        .ok_or(SeatMapError::NoCabinForRow { row })
}

/// Format a visual seat code, e.g. `seat_code(12, 'A') == "12A"`.
pub fn seat_code(row: u32, letter: char) -> String {
    format!("{row}{letter}")
}

/// Parse a visual seat code back into row and letter.
pub fn parse_seat_code(code: &str) -> Result<(u32, char), SeatMapError> {
    let malformed = || SeatMapError::MalformedSeatCode {
        code: code.to_string(),
    };

    let trimmed = code.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    let rest = &trimmed[digits.len()..];

    let row: u32 = digits.parse().map_err(|_| malformed())?;
    let mut rest_chars = rest.chars();
    let letter = rest_chars.next().ok_or_else(malformed)?;
    if rest_chars.next().is_some() || !letter.is_ascii_alphabetic() {
        return Err(malformed());
    }
    Ok((row, letter.to_ascii_uppercase()))
}

/// Price of the cabin owning a linear seat number, using the flat
/// per-cabin table.
pub fn cabin_price_for_seat(num: u32, layout: &AircraftLayout) -> Result<f64, SeatMapError> {
    price_for_seat(num, layout, &FareStrategy::FlatTable)
}

/// Price of a linear seat number under an explicit fare strategy.
pub fn price_for_seat(
    num: u32,
    layout: &AircraftLayout,
    strategy: &FareStrategy,
) -> Result<f64, SeatMapError> {
    let position = linear_to_visual(num, layout)?;
    let cabin = row_cabin(position.row, &layout.cabins)?;
    Ok(strategy.price(cabin))
}
