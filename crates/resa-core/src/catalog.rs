//! Built-in aircraft layouts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::layout::{AircraftLayout, CabinName, CabinRange, LayoutError};

/// Aircraft types the fleet operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftType {
    E190,
    B737,
    A330,
}

impl AircraftType {
    pub const ALL: [AircraftType; 3] = [AircraftType::E190, AircraftType::B737, AircraftType::A330];

    pub fn as_str(&self) -> &'static str {
        match self {
            AircraftType::E190 => "E190",
            AircraftType::B737 => "B737",
            AircraftType::A330 => "A330",
        }
    }
}

impl std::fmt::Display for AircraftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AircraftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E190" => Ok(AircraftType::E190),
            "B737" => Ok(AircraftType::B737),
            "A330" => Ok(AircraftType::A330),
            other => Err(format!("unknown aircraft type '{other}'")),
        }
    }
}

/// Immutable lookup of cabin layouts per aircraft type.
///
/// Every layout is validated on construction, so seat math downstream
/// never observes a malformed configuration.
#[derive(Debug, Clone)]
pub struct AircraftCatalog {
    layouts: HashMap<AircraftType, AircraftLayout>,
}

impl AircraftCatalog {
    /// Catalog with the fleet's standard layouts.
    pub fn standard() -> Self {
        let catalog = Self {
            layouts: HashMap::from([
                (AircraftType::E190, e190()),
                (AircraftType::B737, b737()),
                (AircraftType::A330, a330()),
            ]),
        };
        debug_assert!(catalog.validate().is_ok());
        catalog
    }

    /// Build a catalog from caller-supplied layouts, rejecting any that
    /// fail validation.
    pub fn from_layouts(
        layouts: HashMap<AircraftType, AircraftLayout>,
    ) -> Result<Self, LayoutError> {
        let catalog = Self { layouts };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), LayoutError> {
        for layout in self.layouts.values() {
            layout.validate()?;
        }
        Ok(())
    }

    pub fn layout(&self, aircraft: AircraftType) -> &AircraftLayout {
        // standard() and from_layouts() both guarantee presence for any
        // type that was inserted; the standard catalog covers ALL.
        &self.layouts[&aircraft]
    }

    pub fn get(&self, aircraft: AircraftType) -> Option<&AircraftLayout> {
        self.layouts.get(&aircraft)
    }
}

impl Default for AircraftCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn cabin(name: CabinName, from_row: u32, to_row: u32, price: f64) -> CabinRange {
    CabinRange {
        name,
        from_row,
        to_row,
        price,
    }
}

fn e190() -> AircraftLayout {
    AircraftLayout {
        rows: 28,
        blocks: vec!["AB".into(), "CD".into()],
        aisle_after_block: vec![0],
        cabins: vec![
            cabin(CabinName::First, 1, 2, 700.0),
            cabin(CabinName::Business, 3, 5, 550.0),
            cabin(CabinName::Economy, 6, 28, 400.0),
        ],
    }
}

fn b737() -> AircraftLayout {
    AircraftLayout {
        rows: 30,
        blocks: vec!["ABC".into(), "DEF".into()],
        aisle_after_block: vec![0],
        cabins: vec![
            cabin(CabinName::First, 1, 4, 750.0),
            cabin(CabinName::Business, 5, 8, 600.0),
            cabin(CabinName::Economy, 9, 30, 450.0),
        ],
    }
}

fn a330() -> AircraftLayout {
    AircraftLayout {
        rows: 36,
        blocks: vec!["AB".into(), "CDEF".into(), "GH".into()],
        aisle_after_block: vec![0, 1],
        cabins: vec![
            cabin(CabinName::First, 1, 3, 1100.0),
            cabin(CabinName::Business, 4, 12, 800.0),
            cabin(CabinName::Economy, 13, 36, 520.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seatmap::seats_per_row;

    #[test]
    fn standard_layouts_all_validate() {
        let catalog = AircraftCatalog::standard();
        for aircraft in AircraftType::ALL {
            assert_eq!(catalog.layout(aircraft).validate(), Ok(()));
        }
    }

    #[test]
    fn standard_capacities_match_fleet() {
        let catalog = AircraftCatalog::standard();
        assert_eq!(catalog.layout(AircraftType::E190).capacity(), 28 * 4);
        assert_eq!(catalog.layout(AircraftType::B737).capacity(), 30 * 6);
        assert_eq!(catalog.layout(AircraftType::A330).capacity(), 36 * 8);
    }

    #[test]
    fn a330_has_two_aisles() {
        let catalog = AircraftCatalog::standard();
        let layout = catalog.layout(AircraftType::A330);
        assert_eq!(layout.aisle_after_block, vec![0, 1]);
        assert_eq!(seats_per_row(layout), 8);
    }

    #[test]
    fn from_layouts_rejects_malformed_configuration() {
        let mut bad = e190();
        bad.cabins.remove(1);
        let result = AircraftCatalog::from_layouts(HashMap::from([(AircraftType::E190, bad)]));
        assert!(result.is_err());
    }

    #[test]
    fn aircraft_type_parses_from_wire_names() {
        assert_eq!("A330".parse::<AircraftType>(), Ok(AircraftType::A330));
        assert!("A380".parse::<AircraftType>().is_err());
    }
}
