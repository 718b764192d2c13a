//! Consumable resource tracks and the step-die operations over them.
//!
//! Every actor carries one [`ResourceTrack`] per [`ConsumableKind`]. Using a
//! consumable rolls its current die: a result in the depletion range shrinks
//! the die one step, or exhausts the track if it was already at the bottom of
//! the ladder. Restoring steps the die back up. All operations here are pure
//! — the caller owns the collection, hands it in, and persists the result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dice::DieRank;

/// The four consumable resource kinds an actor tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumableKind {
    Food,
    Water,
    Arrows,
    Torches,
}

/// Broad grouping used by sheet layout and restock sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumableCategory {
    /// Found by foraging, hunting, or fishing.
    Sustenance,
    /// Bought or crafted.
    Equipment,
}

impl ConsumableKind {
    /// All kinds in display order.
    pub const ALL: [ConsumableKind; 4] = [
        ConsumableKind::Food,
        ConsumableKind::Water,
        ConsumableKind::Arrows,
        ConsumableKind::Torches,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ConsumableKind::Food => "Food",
            ConsumableKind::Water => "Water",
            ConsumableKind::Arrows => "Arrows",
            ConsumableKind::Torches => "Torches",
        }
    }

    /// Storage key, the shape the kind serializes as.
    pub fn notation(self) -> &'static str {
        match self {
            ConsumableKind::Food => "food",
            ConsumableKind::Water => "water",
            ConsumableKind::Arrows => "arrows",
            ConsumableKind::Torches => "torches",
        }
    }

    /// Starting die rank for a fresh actor.
    pub fn default_rank(self) -> DieRank {
        match self {
            ConsumableKind::Food => DieRank::D8,
            ConsumableKind::Water => DieRank::D8,
            ConsumableKind::Arrows => DieRank::D8,
            ConsumableKind::Torches => DieRank::D6,
        }
    }

    pub fn category(self) -> ConsumableCategory {
        match self {
            ConsumableKind::Food | ConsumableKind::Water => ConsumableCategory::Sustenance,
            ConsumableKind::Arrows | ConsumableKind::Torches => ConsumableCategory::Equipment,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ConsumableKind::Food => "Rations and preserved provisions",
            ConsumableKind::Water => "Waterskins and drinkable water",
            ConsumableKind::Arrows => "Ammunition for ranged weapons",
            ConsumableKind::Torches => "Torches and lamp oil for light",
        }
    }
}

impl fmt::Display for ConsumableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConsumableKind {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(ConsumableKind::Food),
            "water" => Ok(ConsumableKind::Water),
            "arrows" => Ok(ConsumableKind::Arrows),
            "torches" => Ok(ConsumableKind::Torches),
            other => Err(TrackError::UnknownKind(other.to_string())),
        }
    }
}

/// Current die rank plus depletion flag for one consumable kind.
///
/// Invariant: `depleted` is a terminal state. Rolling never leaves it — only
/// [`restore`] or [`set_rank`] do. While `depleted` is set the rank is
/// frozen and meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTrack {
    pub rank: DieRank,
    pub depleted: bool,
}

impl ResourceTrack {
    /// A fresh, non-depleted track at the given rank.
    pub fn new(rank: DieRank) -> Self {
        Self {
            rank,
            depleted: false,
        }
    }
}

/// One resource track per consumable kind, owned by a single actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCollection {
    pub food: ResourceTrack,
    pub water: ResourceTrack,
    pub arrows: ResourceTrack,
    pub torches: ResourceTrack,
}

impl TrackCollection {
    pub fn get(&self, kind: ConsumableKind) -> &ResourceTrack {
        match kind {
            ConsumableKind::Food => &self.food,
            ConsumableKind::Water => &self.water,
            ConsumableKind::Arrows => &self.arrows,
            ConsumableKind::Torches => &self.torches,
        }
    }

    pub fn get_mut(&mut self, kind: ConsumableKind) -> &mut ResourceTrack {
        match kind {
            ConsumableKind::Food => &mut self.food,
            ConsumableKind::Water => &mut self.water,
            ConsumableKind::Arrows => &mut self.arrows,
            ConsumableKind::Torches => &mut self.torches,
        }
    }

    /// All tracks in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ConsumableKind, &ResourceTrack)> {
        ConsumableKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}

impl Default for TrackCollection {
    /// Starting tracks for a fresh actor: food d8, water d8, arrows d8,
    /// torches d6, all available.
    fn default() -> Self {
        Self {
            food: ResourceTrack::new(ConsumableKind::Food.default_rank()),
            water: ResourceTrack::new(ConsumableKind::Water.default_rank()),
            arrows: ResourceTrack::new(ConsumableKind::Arrows.default_rank()),
            torches: ResourceTrack::new(ConsumableKind::Torches.default_rank()),
        }
    }
}

/// Tunable constants for track behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRules {
    /// A roll at or under this value depletes the resource. The default of 2
    /// gives the step-die risk curve: 2/6 on a d6 down to 2/12 on a d12.
    pub depletion_threshold: u16,
}

impl Default for TrackRules {
    fn default() -> Self {
        Self {
            depletion_threshold: 2,
        }
    }
}

/// What a single use of a consumable did, for the caller to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UseOutcome {
    pub kind: ConsumableKind,
    /// The die that was rolled (the track's rank before any step-down).
    pub die: DieRank,
    /// The face result.
    pub rolled: u16,
    /// The roll landed in the depletion range.
    pub depletion: bool,
    /// The track was at d6 and is now fully depleted.
    pub exhausted: bool,
    /// Rank after the roll, `None` once fully depleted.
    pub new_rank: Option<DieRank>,
}

/// Errors from track operations and boundary parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// Use attempted on an already-depleted track. Recoverable — the caller
    /// reports "none remaining" and moves on.
    Depleted(ConsumableKind),
    /// A rank label outside d6/d8/d10/d12 reached a parse boundary.
    UnknownRank(String),
    /// A consumable id outside the recognized four reached a parse boundary.
    UnknownKind(String),
    /// A negative unit count was passed to a restore operation.
    InvalidUnits(i64),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::Depleted(kind) => write!(f, "no {} remaining", kind.notation()),
            TrackError::UnknownRank(s) => write!(f, "unknown resource die rank: {:?}", s),
            TrackError::UnknownKind(s) => write!(f, "unknown consumable kind: {:?}", s),
            TrackError::InvalidUnits(n) => write!(f, "invalid unit count: {}", n),
        }
    }
}

impl std::error::Error for TrackError {}

/// Interpret one resource die roll against a track.
///
/// The draw itself happens upstream (whatever rolls the dice hands the face
/// result in), so this stays pure and display-free. A roll at or under the
/// depletion threshold steps the die down, or marks the track depleted if it
/// was already at d6. Any other roll leaves the track untouched.
///
/// Fails with [`TrackError::Depleted`] — and changes nothing — if the track
/// is already depleted; check [`has_resource`] first or treat the error as
/// "nothing to consume".
pub fn apply_roll(
    track: &mut ResourceTrack,
    kind: ConsumableKind,
    rolled: u16,
    rules: &TrackRules,
) -> Result<UseOutcome, TrackError> {
    if track.depleted {
        return Err(TrackError::Depleted(kind));
    }

    let die = track.rank;
    let depletion = rolled <= rules.depletion_threshold;
    let mut exhausted = false;

    if depletion {
        match die.step_down() {
            Some(smaller) => track.rank = smaller,
            None => {
                track.depleted = true;
                exhausted = true;
            }
        }
    }

    Ok(UseOutcome {
        kind,
        die,
        rolled,
        depletion,
        exhausted,
        new_rank: if track.depleted {
            None
        } else {
            Some(track.rank)
        },
    })
}

/// Restore `units` of a consumable, stepping its die up once per unit.
///
/// A depleted track first comes back at the d6 floor — even for zero units,
/// restocking un-depletes it. Each step clamps at d12 independently.
pub fn restore(track: &mut ResourceTrack, units: u32) {
    if track.depleted {
        track.rank = DieRank::D6;
        track.depleted = false;
    }
    for _ in 0..units {
        track.rank = track.rank.step_up();
    }
}

/// Directly assign a track's rank, clearing any depletion.
pub fn set_rank(track: &mut ResourceTrack, rank: DieRank) {
    track.rank = rank;
    track.depleted = false;
}

/// Whether there is anything left to consume.
pub fn has_resource(track: &ResourceTrack) -> bool {
    !track.depleted
}

/// Encumbrance from carried consumables: each non-depleted track counts 1,
/// regardless of die size.
pub fn encumbrance(tracks: &TrackCollection) -> u32 {
    tracks.iter().filter(|(_, t)| !t.depleted).count() as u32
}

/// Sheet-ready projection of one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackView {
    pub kind: ConsumableKind,
    pub name: &'static str,
    /// "D8" for a live track, "Empty" once depleted.
    pub die_label: &'static str,
    pub depleted: bool,
}

/// Display rows for all four tracks, in display order.
pub fn track_views(tracks: &TrackCollection) -> Vec<TrackView> {
    tracks
        .iter()
        .map(|(kind, track)| TrackView {
            kind,
            name: kind.name(),
            die_label: if track.depleted {
                "Empty"
            } else {
                track.rank.label()
            },
            depleted: track.depleted,
        })
        .collect()
}
