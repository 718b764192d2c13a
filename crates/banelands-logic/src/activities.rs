//! Journey activity reference data — what actors can do each quarter-day.
//!
//! Activities carry a static spec: which skill they test, what equipment
//! they need, and which other activities they can or cannot be combined
//! with inside the same quarter-day. Resolution of the activities (rolls,
//! mishaps, travel progress) lives outside this crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Skills an activity can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Survival,
    Awareness,
}

/// Equipment an activity can require. Any one listed item satisfies the
/// requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Equipment {
    RangedWeapon,
    Trap,
    FishingGear,
}

/// The four quarter-day periods a journey day divides into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarterDay {
    Morning,
    Day,
    Evening,
    Night,
}

impl QuarterDay {
    pub const ALL: [QuarterDay; 4] = [
        QuarterDay::Morning,
        QuarterDay::Day,
        QuarterDay::Evening,
        QuarterDay::Night,
    ];
}

/// Static spec shared by all activities.
#[derive(Debug, Clone, Serialize)]
pub struct ActivitySpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required_skill: Option<Skill>,
    /// Any one of these satisfies the equipment requirement.
    pub requires_equipment: &'static [Equipment],
    /// Activities this one can share a quarter-day with.
    pub combines_with: &'static [Activity],
    /// Activities this one can never share a quarter-day with.
    pub exclusive_with: &'static [Activity],
}

/// The recognized journey activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activity {
    Travel,
    Navigate,
    KeepWatch,
    Forage,
    Hunt,
    Fish,
    MakeCamp,
    Rest,
    Sleep,
    Explore,
}

impl Activity {
    pub fn spec(&self) -> ActivitySpec {
        match self {
            Self::Travel => ActivitySpec {
                name: "Travel",
                description: "Move between locations on the map",
                required_skill: Some(Skill::Survival),
                requires_equipment: &[],
                combines_with: &[Activity::KeepWatch],
                exclusive_with: &[],
            },
            Self::Navigate => ActivitySpec {
                name: "Navigate",
                description: "Lead the group and find the best path forward",
                required_skill: Some(Skill::Survival),
                requires_equipment: &[],
                combines_with: &[Activity::Travel],
                exclusive_with: &[Activity::KeepWatch],
            },
            Self::KeepWatch => ActivitySpec {
                name: "Keep Watch",
                description: "Stay alert for dangers and opportunities",
                required_skill: Some(Skill::Awareness),
                requires_equipment: &[],
                combines_with: &[Activity::Travel],
                exclusive_with: &[Activity::Navigate],
            },
            Self::Forage => ActivitySpec {
                name: "Forage",
                description: "Search for edible plants and drinkable water",
                required_skill: Some(Skill::Survival),
                requires_equipment: &[],
                combines_with: &[],
                exclusive_with: &[],
            },
            Self::Hunt => ActivitySpec {
                name: "Hunt",
                description: "Track and hunt wild animals for food",
                required_skill: Some(Skill::Survival),
                requires_equipment: &[Equipment::RangedWeapon, Equipment::Trap],
                combines_with: &[],
                exclusive_with: &[],
            },
            Self::Fish => ActivitySpec {
                name: "Fish",
                description: "Catch fish from rivers or lakes",
                required_skill: Some(Skill::Survival),
                requires_equipment: &[Equipment::FishingGear],
                combines_with: &[],
                exclusive_with: &[],
            },
            Self::MakeCamp => ActivitySpec {
                name: "Make Camp",
                description: "Set up a safe place to rest",
                required_skill: Some(Skill::Survival),
                requires_equipment: &[],
                combines_with: &[],
                exclusive_with: &[],
            },
            Self::Rest => ActivitySpec {
                name: "Rest",
                description: "Recover from fatigue and minor injuries",
                required_skill: None,
                requires_equipment: &[],
                combines_with: &[],
                exclusive_with: &[],
            },
            Self::Sleep => ActivitySpec {
                name: "Sleep",
                description: "Get the rest needed to avoid exhaustion",
                required_skill: None,
                requires_equipment: &[],
                combines_with: &[],
                exclusive_with: &[],
            },
            Self::Explore => ActivitySpec {
                name: "Explore",
                description: "Investigate points of interest in the current area",
                required_skill: Some(Skill::Awareness),
                requires_equipment: &[],
                combines_with: &[],
                exclusive_with: &[],
            },
        }
    }

    pub fn all() -> &'static [Activity] {
        &[
            Self::Travel,
            Self::Navigate,
            Self::KeepWatch,
            Self::Forage,
            Self::Hunt,
            Self::Fish,
            Self::MakeCamp,
            Self::Rest,
            Self::Sleep,
            Self::Explore,
        ]
    }

    /// Storage id, e.g. "keep-watch".
    pub fn id(self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Navigate => "navigate",
            Self::KeepWatch => "keep-watch",
            Self::Forage => "forage",
            Self::Hunt => "hunt",
            Self::Fish => "fish",
            Self::MakeCamp => "make-camp",
            Self::Rest => "rest",
            Self::Sleep => "sleep",
            Self::Explore => "explore",
        }
    }

    /// Whether this activity needs no equipment at all.
    pub fn equipment_free(self) -> bool {
        self.spec().requires_equipment.is_empty()
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

/// Error for activity ids outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActivity(pub String);

impl fmt::Display for UnknownActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown activity: {:?}", self.0)
    }
}

impl std::error::Error for UnknownActivity {}

impl FromStr for Activity {
    type Err = UnknownActivity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activity::all()
            .iter()
            .find(|a| a.id() == s)
            .copied()
            .ok_or_else(|| UnknownActivity(s.to_string()))
    }
}

/// Whether two activities may share one actor's quarter-day.
///
/// Symmetric: an exclusion on either side vetoes the pair, and a
/// combination listed by either side permits it.
pub fn can_combine(a: Activity, b: Activity) -> bool {
    if a == b {
        return false;
    }
    let (sa, sb) = (a.spec(), b.spec());
    if sa.exclusive_with.contains(&b) || sb.exclusive_with.contains(&a) {
        return false;
    }
    sa.combines_with.contains(&b) || sb.combines_with.contains(&a)
}

/// Activities selectable in a given quarter-day period. Currently every
/// activity is available around the clock.
pub fn activities_for_quarter_day(_period: QuarterDay) -> &'static [Activity] {
    Activity::all()
}
