//! Text rendering of the seat map.
//!
//! Mirrors the visual layout of the web seat picker: block letters on
//! top, aisle gaps between blocks, row numbers on both sides, and a
//! cabin legend. Occupied seats render as `X`, held seats as `R`,
//! selected seats as `*`, free seats as their letter.

use std::collections::HashSet;

use resa_core::models::SeatAvailability;
use resa_core::seatmap::{self, SeatMapError};
use resa_core::AircraftLayout;

const ROW_NUM_WIDTH: usize = 3;
const AISLE_GAP: &str = "  ";

/// Render the full seat map for a flight.
pub fn render_seat_map(
    layout: &AircraftLayout,
    availability: &SeatAvailability,
    selected: &[u32],
) -> Result<String, SeatMapError> {
    let occupied: HashSet<u32> = availability.occupied_seats.iter().copied().collect();
    let reserved: HashSet<u32> = availability.reserved_seats.iter().copied().collect();
    let selected: HashSet<u32> = selected.iter().copied().collect();

    let mut out = String::new();
    out.push_str(&header_line(layout));
    out.push('\n');

    for row in 1..=layout.rows {
        out.push_str(&format!("{row:>ROW_NUM_WIDTH$} "));
        for (b, block) in layout.blocks.iter().enumerate() {
            for (l, letter) in block.chars().enumerate() {
                if b > 0 || l > 0 {
                    out.push(' ');
                }
                let num = seatmap::visual_to_linear(row, letter, layout)?;
                out.push(seat_mark(num, letter, &occupied, &reserved, &selected));
            }
            if layout.aisle_after_block.contains(&b) && b + 1 < layout.blocks.len() {
                out.push_str(AISLE_GAP);
            }
        }
        out.push_str(&format!(" {row:<ROW_NUM_WIDTH$}"));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&legend(layout));
    Ok(out)
}

fn header_line(layout: &AircraftLayout) -> String {
    let mut line = " ".repeat(ROW_NUM_WIDTH + 1);
    for (b, block) in layout.blocks.iter().enumerate() {
        for (l, letter) in block.chars().enumerate() {
            if b > 0 || l > 0 {
                line.push(' ');
            }
            line.push(letter);
        }
        if layout.aisle_after_block.contains(&b) && b + 1 < layout.blocks.len() {
            line.push_str(AISLE_GAP);
        }
    }
    line
}

fn seat_mark(
    num: u32,
    letter: char,
    occupied: &HashSet<u32>,
    reserved: &HashSet<u32>,
    selected: &HashSet<u32>,
) -> char {
    if occupied.contains(&num) {
        'X'
    } else if selected.contains(&num) {
        '*'
    } else if reserved.contains(&num) {
        'R'
    } else {
        letter
    }
}

fn legend(layout: &AircraftLayout) -> String {
    let mut lines: Vec<String> = layout
        .cabins
        .iter()
        .map(|c| {
            format!(
                "{:<10} rows {:>2}-{:<2}  ${}",
                c.name.to_string(),
                c.from_row,
                c.to_row,
                c.price
            )
        })
        .collect();
    lines.push("X occupied   R held   * selected".to_string());
    lines.join("\n")
}
