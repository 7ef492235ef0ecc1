//! Aircraft cabin layout model and configuration validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cabin class names, ordered front to back of the aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinName {
    First,
    Business,
    Economy,
}

impl std::fmt::Display for CabinName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CabinName::First => write!(f, "First"),
            CabinName::Business => write!(f, "Business"),
            CabinName::Economy => write!(f, "Economy"),
        }
    }
}

/// A contiguous span of rows sharing a class name and price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinRange {
    pub name: CabinName,
    pub from_row: u32,
    pub to_row: u32,
    pub price: f64,
}

/// Static per-aircraft-type configuration.
///
/// `blocks` holds runs of adjacent seat letters, e.g. `["AB", "CDE"]`;
/// `aisle_after_block` lists 0-based block indices followed by a walking
/// aisle. Aisles are presentational only and carry no numbering effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftLayout {
    pub rows: u32,
    pub blocks: Vec<String>,
    pub aisle_after_block: Vec<usize>,
    pub cabins: Vec<CabinRange>,
}

/// Configuration-data violations detected by [`AircraftLayout::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("layout has no seat blocks")]
    NoBlocks,
    #[error("block {index} is empty")]
    EmptyBlock { index: usize },
    #[error("seat letter '{letter}' appears in more than one block")]
    DuplicateLetter { letter: char },
    #[error("layout has zero rows")]
    NoRows,
    #[error("cabin '{name}' has from_row {from_row} > to_row {to_row}")]
    InvertedCabin {
        name: CabinName,
        from_row: u32,
        to_row: u32,
    },
    #[error("cabins must start at row 1, first cabin starts at {from_row}")]
    CabinGapAtStart { from_row: u32 },
    #[error("cabin '{name}' starts at row {from_row}, expected row {expected}")]
    CabinGap {
        name: CabinName,
        from_row: u32,
        expected: u32,
    },
    #[error("cabins end at row {last_row} but layout has {rows} rows")]
    CabinCoverage { last_row: u32, rows: u32 },
    #[error("aisle index {index} is out of range for {blocks} blocks")]
    AisleOutOfRange { index: usize, blocks: usize },
}

impl AircraftLayout {
    /// Check the invariants a layout must satisfy before any seat math
    /// runs against it: non-empty blocks with unique letters, and cabin
    /// ranges that are contiguous, non-overlapping and cover `[1, rows]`.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.rows == 0 {
            return Err(LayoutError::NoRows);
        }
        if self.blocks.is_empty() {
            return Err(LayoutError::NoBlocks);
        }

        let mut seen = std::collections::HashSet::new();
        for (index, block) in self.blocks.iter().enumerate() {
            if block.is_empty() {
                return Err(LayoutError::EmptyBlock { index });
            }
            for letter in block.chars() {
                if !seen.insert(letter) {
                    return Err(LayoutError::DuplicateLetter { letter });
                }
            }
        }

        for &index in &self.aisle_after_block {
            if index >= self.blocks.len() {
                return Err(LayoutError::AisleOutOfRange {
                    index,
                    blocks: self.blocks.len(),
                });
            }
        }

        let mut expected = 1u32;
        for cabin in &self.cabins {
            if cabin.from_row > cabin.to_row {
                return Err(LayoutError::InvertedCabin {
                    name: cabin.name,
                    from_row: cabin.from_row,
                    to_row: cabin.to_row,
                });
            }
            if expected == 1 && cabin.from_row != 1 {
                return Err(LayoutError::CabinGapAtStart {
                    from_row: cabin.from_row,
                });
            }
            if cabin.from_row != expected {
                return Err(LayoutError::CabinGap {
                    name: cabin.name,
                    from_row: cabin.from_row,
                    expected,
                });
            }
            expected = cabin.to_row + 1;
        }
        if expected != self.rows + 1 {
            return Err(LayoutError::CabinCoverage {
                last_row: expected.saturating_sub(1),
                rows: self.rows,
            });
        }

        Ok(())
    }

    /// Total number of seats in the aircraft.
    pub fn capacity(&self) -> u32 {
        self.rows * crate::seatmap::seats_per_row(self) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cabin_layout() -> AircraftLayout {
        AircraftLayout {
            rows: 10,
            blocks: vec!["AB".into(), "CD".into()],
            aisle_after_block: vec![0],
            cabins: vec![
                CabinRange {
                    name: CabinName::Business,
                    from_row: 1,
                    to_row: 4,
                    price: 600.0,
                },
                CabinRange {
                    name: CabinName::Economy,
                    from_row: 5,
                    to_row: 10,
                    price: 400.0,
                },
            ],
        }
    }

    #[test]
    fn valid_layout_passes() {
        assert_eq!(two_cabin_layout().validate(), Ok(()));
    }

    #[test]
    fn capacity_is_rows_times_seats_per_row() {
        assert_eq!(two_cabin_layout().capacity(), 40);
    }

    #[test]
    fn overlapping_cabins_rejected() {
        let mut layout = two_cabin_layout();
        layout.cabins[1].from_row = 4;
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::CabinGap { expected: 5, .. })
        ));
    }

    #[test]
    fn cabin_gap_rejected() {
        let mut layout = two_cabin_layout();
        layout.cabins[1].from_row = 6;
        assert!(matches!(layout.validate(), Err(LayoutError::CabinGap { .. })));
    }

    #[test]
    fn uncovered_tail_rows_rejected() {
        let mut layout = two_cabin_layout();
        layout.cabins[1].to_row = 9;
        assert_eq!(
            layout.validate(),
            Err(LayoutError::CabinCoverage {
                last_row: 9,
                rows: 10
            })
        );
    }

    #[test]
    fn duplicate_letter_across_blocks_rejected() {
        let mut layout = two_cabin_layout();
        layout.blocks = vec!["AB".into(), "BC".into()];
        assert_eq!(
            layout.validate(),
            Err(LayoutError::DuplicateLetter { letter: 'B' })
        );
    }

    #[test]
    fn aisle_index_must_reference_a_block() {
        let mut layout = two_cabin_layout();
        layout.aisle_after_block = vec![2];
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::AisleOutOfRange { index: 2, .. })
        ));
    }
}
