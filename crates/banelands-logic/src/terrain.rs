//! Terrain reference data — movement class and activity modifiers per type.
//!
//! Each terrain type carries a static spec used by travel and provisioning
//! rules: how it affects movement and how well foraging and hunting go
//! there. Hex-map travel itself lives outside this crate; these tables are
//! the rules-side source of truth.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a terrain affects overland movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    Open,
    Difficult,
    Impassable,
}

/// Static spec shared by all terrain types.
#[derive(Debug, Clone, Serialize)]
pub struct TerrainSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub movement: Movement,
    /// Bonus or penalty to forage checks made here.
    pub forage_modifier: i8,
    /// Bonus or penalty to hunt checks made here.
    pub hunt_modifier: i8,
    /// Hex-map display color.
    pub color: &'static str,
}

/// The recognized terrain types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Terrain {
    OpenTerrain,
    DifficultTerrain,
    Forest,
    Hills,
    Mountains,
    Water,
    Swamp,
    Ruins,
}

impl Terrain {
    pub fn spec(&self) -> TerrainSpec {
        match self {
            Self::OpenTerrain => TerrainSpec {
                name: "Open Terrain",
                description: "Clear, easily traversable land such as grasslands or well-maintained roads",
                movement: Movement::Open,
                forage_modifier: 0,
                hunt_modifier: 0,
                color: "#90EE90",
            },
            Self::DifficultTerrain => TerrainSpec {
                name: "Difficult Terrain",
                description: "Challenging terrain that slows movement and complicates activities",
                movement: Movement::Difficult,
                forage_modifier: -1,
                hunt_modifier: -1,
                color: "#CD853F",
            },
            Self::Forest => TerrainSpec {
                name: "Forest",
                description: "Wooded areas with abundant natural resources",
                movement: Movement::Open,
                forage_modifier: 1,
                hunt_modifier: 1,
                color: "#228B22",
            },
            Self::Hills => TerrainSpec {
                name: "Hills",
                description: "Rolling hills and elevated terrain",
                movement: Movement::Open,
                forage_modifier: 0,
                hunt_modifier: 0,
                color: "#DEB887",
            },
            Self::Mountains => TerrainSpec {
                name: "Mountains",
                description: "High altitude terrain with challenging conditions",
                movement: Movement::Difficult,
                forage_modifier: -2,
                hunt_modifier: -1,
                color: "#696969",
            },
            Self::Water => TerrainSpec {
                name: "Water",
                description: "Rivers, lakes, and other water bodies requiring boats or swimming",
                movement: Movement::Impassable,
                forage_modifier: 0,
                hunt_modifier: 0,
                color: "#4682B4",
            },
            Self::Swamp => TerrainSpec {
                name: "Swampland",
                description: "Wetlands with unique challenges and opportunities",
                movement: Movement::Difficult,
                forage_modifier: 1,
                hunt_modifier: -1,
                color: "#556B2F",
            },
            Self::Ruins => TerrainSpec {
                name: "Ruins",
                description: "Ancient structures and abandoned settlements",
                movement: Movement::Difficult,
                forage_modifier: -2,
                hunt_modifier: -1,
                color: "#A0A0A0",
            },
        }
    }

    pub fn all() -> &'static [Terrain] {
        &[
            Self::OpenTerrain,
            Self::DifficultTerrain,
            Self::Forest,
            Self::Hills,
            Self::Mountains,
            Self::Water,
            Self::Swamp,
            Self::Ruins,
        ]
    }

    /// Storage id, e.g. "open-terrain".
    pub fn id(self) -> &'static str {
        match self {
            Self::OpenTerrain => "open-terrain",
            Self::DifficultTerrain => "difficult-terrain",
            Self::Forest => "forest",
            Self::Hills => "hills",
            Self::Mountains => "mountains",
            Self::Water => "water",
            Self::Swamp => "swamp",
            Self::Ruins => "ruins",
        }
    }

    /// Whether overland travel can enter this terrain at all.
    pub fn passable(self) -> bool {
        self.spec().movement != Movement::Impassable
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

/// Error for terrain ids outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTerrain(pub String);

impl fmt::Display for UnknownTerrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown terrain: {:?}", self.0)
    }
}

impl std::error::Error for UnknownTerrain {}

impl FromStr for Terrain {
    type Err = UnknownTerrain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Terrain::all()
            .iter()
            .find(|t| t.id() == s)
            .copied()
            .ok_or_else(|| UnknownTerrain(s.to_string()))
    }
}
