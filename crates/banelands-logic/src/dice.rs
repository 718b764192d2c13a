//! The step-die ladder — the four resource die sizes and their transitions.
//!
//! A resource die shrinks one step each time its depletion range comes up
//! and grows one step per unit restored. The ladder is closed: there is no
//! rank below [`DieRank::D6`] (stepping down from it signals exhaustion) and
//! none above [`DieRank::D12`] (stepping up clamps).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::consumables::TrackError;

/// One of the four step-die sizes, ordered smallest to largest.
///
/// Always an enumerated tag, never a raw side count — an invalid rank
/// cannot enter the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieRank {
    D6,
    D8,
    D10,
    D12,
}

impl DieRank {
    /// All ranks in ladder order, smallest first.
    pub const ALL: [DieRank; 4] = [DieRank::D6, DieRank::D8, DieRank::D10, DieRank::D12];

    /// Number of faces on the die.
    pub fn sides(self) -> u16 {
        match self {
            DieRank::D6 => 6,
            DieRank::D8 => 8,
            DieRank::D10 => 10,
            DieRank::D12 => 12,
        }
    }

    /// Display form, e.g. "D8".
    pub fn label(self) -> &'static str {
        match self {
            DieRank::D6 => "D6",
            DieRank::D8 => "D8",
            DieRank::D10 => "D10",
            DieRank::D12 => "D12",
        }
    }

    /// Storage form, e.g. "d8" — the shape tracks serialize as.
    pub fn notation(self) -> &'static str {
        match self {
            DieRank::D6 => "d6",
            DieRank::D8 => "d8",
            DieRank::D10 => "d10",
            DieRank::D12 => "d12",
        }
    }

    /// Grow one step. Clamps at [`DieRank::D12`]; never fails.
    pub fn step_up(self) -> DieRank {
        match self {
            DieRank::D6 => DieRank::D8,
            DieRank::D8 => DieRank::D10,
            DieRank::D10 => DieRank::D12,
            DieRank::D12 => DieRank::D12,
        }
    }

    /// Shrink one step. `None` from [`DieRank::D6`] — the caller marks the
    /// track fully depleted.
    pub fn step_down(self) -> Option<DieRank> {
        match self {
            DieRank::D6 => None,
            DieRank::D8 => Some(DieRank::D6),
            DieRank::D10 => Some(DieRank::D8),
            DieRank::D12 => Some(DieRank::D10),
        }
    }
}

impl fmt::Display for DieRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DieRank {
    type Err = TrackError;

    /// Accepts either storage ("d8") or display ("D8") form. Anything else,
    /// including otherwise-sensible dice like "d20", is rejected here so no
    /// downstream code has to re-validate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d6" | "D6" => Ok(DieRank::D6),
            "d8" | "D8" => Ok(DieRank::D8),
            "d10" | "D10" => Ok(DieRank::D10),
            "d12" | "D12" => Ok(DieRank::D12),
            other => Err(TrackError::UnknownRank(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_down_ladder() {
        assert_eq!(DieRank::D12.step_down(), Some(DieRank::D10));
        assert_eq!(DieRank::D10.step_down(), Some(DieRank::D8));
        assert_eq!(DieRank::D8.step_down(), Some(DieRank::D6));
        assert_eq!(DieRank::D6.step_down(), None);
    }

    #[test]
    fn step_down_exhausts_in_three() {
        // d12 visits exactly d10, d8, d6, then yields none.
        let mut rank = DieRank::D12;
        let mut visited = Vec::new();
        while let Some(next) = rank.step_down() {
            visited.push(next);
            rank = next;
        }
        assert_eq!(visited, vec![DieRank::D10, DieRank::D8, DieRank::D6]);
    }

    #[test]
    fn step_up_ladder() {
        assert_eq!(DieRank::D6.step_up(), DieRank::D8);
        assert_eq!(DieRank::D8.step_up(), DieRank::D10);
        assert_eq!(DieRank::D10.step_up(), DieRank::D12);
        assert_eq!(DieRank::D12.step_up(), DieRank::D12);
    }

    #[test]
    fn step_up_stabilizes_at_max() {
        for rank in DieRank::ALL {
            let result = rank.step_up().step_up().step_up().step_up();
            assert_eq!(result, DieRank::D12);
        }
        // At most 3 applications from the bottom.
        assert_eq!(
            DieRank::D6.step_up().step_up().step_up(),
            DieRank::D12
        );
    }

    #[test]
    fn ranks_are_ordered() {
        assert!(DieRank::D6 < DieRank::D8);
        assert!(DieRank::D8 < DieRank::D10);
        assert!(DieRank::D10 < DieRank::D12);
    }

    #[test]
    fn sides_match_rank() {
        assert_eq!(DieRank::D6.sides(), 6);
        assert_eq!(DieRank::D8.sides(), 8);
        assert_eq!(DieRank::D10.sides(), 10);
        assert_eq!(DieRank::D12.sides(), 12);
    }

    #[test]
    fn parse_accepts_both_forms() {
        assert_eq!("d8".parse::<DieRank>().unwrap(), DieRank::D8);
        assert_eq!("D10".parse::<DieRank>().unwrap(), DieRank::D10);
    }

    #[test]
    fn parse_rejects_foreign_dice() {
        for bad in ["d4", "d20", "d100", "invalid", ""] {
            assert!(matches!(
                bad.parse::<DieRank>(),
                Err(TrackError::UnknownRank(_))
            ));
        }
    }

    #[test]
    fn labels_uppercase() {
        assert_eq!(DieRank::D6.label(), "D6");
        assert_eq!(DieRank::D12.label(), "D12");
        assert_eq!(DieRank::D10.to_string(), "D10");
    }
}
