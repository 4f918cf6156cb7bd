//! The fixed expedition plan: nine steps in strict order, each pairing a
//! story operation with a waypoint, an optional landmark, and a flag for
//! whether the result enters persisted history.

use crate::path::Waypoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A location icon revealed on the map when the hunter arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Landmark {
    Library,
    Temple,
    Chest,
    OpenedChest,
    NorthChamber,
    SouthForest,
    EastRuins,
    TreasureChest,
}

impl Landmark {
    /// Display label for the map panel.
    pub fn label(&self) -> &'static str {
        match self {
            Landmark::Library => "Library",
            Landmark::Temple => "Temple",
            Landmark::Chest => "Chest",
            Landmark::OpenedChest => "Opened Chest",
            Landmark::NorthChamber => "North Chamber",
            Landmark::SouthForest => "South Forest",
            Landmark::EastRuins => "East Ruins",
            Landmark::TreasureChest => "Treasure Chest",
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The operation a step performs against the treasure map.
///
/// Steps that consume the previous step's result do so through the
/// driver's carry value; `FindKey` names its place inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    InitialClue,
    DecodeScript,
    SearchLocation,
    SolvePuzzle,
    FindKey(&'static str),
    CombineKeys,
    OpenContainer,
}

/// One entry of the expedition plan.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub action: StepAction,
    pub waypoint: Waypoint,
    pub landmark: Option<Landmark>,
    /// Whether the step result is appended to persisted history.
    pub record: bool,
}

/// Number of steps in a full expedition.
pub const PLAN_LEN: usize = 9;

/// The fixed plan, in execution order.
pub fn expedition_plan() -> [Step; PLAN_LEN] {
    [
        Step {
            action: StepAction::InitialClue,
            waypoint: Waypoint::new(250.0, 0.0),
            landmark: Some(Landmark::Library),
            record: true,
        },
        Step {
            action: StepAction::DecodeScript,
            waypoint: Waypoint::new(100.0, 0.0),
            landmark: Some(Landmark::Temple),
            record: true,
        },
        Step {
            action: StepAction::SearchLocation,
            waypoint: Waypoint::new(600.0, 100.0),
            landmark: Some(Landmark::Chest),
            record: true,
        },
        Step {
            action: StepAction::SolvePuzzle,
            waypoint: Waypoint::new(350.0, 200.0),
            landmark: Some(Landmark::OpenedChest),
            record: true,
        },
        Step {
            action: StepAction::FindKey("north chamber"),
            waypoint: Waypoint::new(150.0, 150.0),
            landmark: Some(Landmark::NorthChamber),
            record: false,
        },
        Step {
            action: StepAction::FindKey("south forest"),
            waypoint: Waypoint::new(50.0, 150.0),
            landmark: Some(Landmark::SouthForest),
            record: false,
        },
        Step {
            action: StepAction::FindKey("east ruins"),
            waypoint: Waypoint::new(500.0, 50.0),
            landmark: Some(Landmark::EastRuins),
            record: false,
        },
        Step {
            action: StepAction::CombineKeys,
            waypoint: Waypoint::new(200.0, 150.0),
            landmark: Some(Landmark::TreasureChest),
            record: false,
        },
        Step {
            action: StepAction::OpenContainer,
            waypoint: Waypoint::new(200.0, 300.0),
            landmark: None,
            record: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_shape() {
        let plan = expedition_plan();
        assert_eq!(plan.len(), PLAN_LEN);

        // Only the last step arrives without a landmark.
        assert!(plan[..PLAN_LEN - 1].iter().all(|s| s.landmark.is_some()));
        assert!(plan[PLAN_LEN - 1].landmark.is_none());

        // Steps 1-4 and 9 record; the key hunt and combination do not.
        let recorded: Vec<bool> = plan.iter().map(|s| s.record).collect();
        assert_eq!(
            recorded,
            vec![true, true, true, true, false, false, false, false, true]
        );
    }

    #[test]
    fn test_plan_collects_exactly_three_keys() {
        let keys: Vec<&str> = expedition_plan()
            .iter()
            .filter_map(|s| match s.action {
                StepAction::FindKey(place) => Some(place),
                _ => None,
            })
            .collect();
        assert_eq!(keys, vec!["north chamber", "south forest", "east ruins"]);
    }

    #[test]
    fn test_waypoint_order() {
        let expected = [
            (250.0, 0.0),
            (100.0, 0.0),
            (600.0, 100.0),
            (350.0, 200.0),
            (150.0, 150.0),
            (50.0, 150.0),
            (500.0, 50.0),
            (200.0, 150.0),
            (200.0, 300.0),
        ];
        for (step, (x, y)) in expedition_plan().iter().zip(expected) {
            assert_eq!((step.waypoint.x, step.waypoint.y), (x, y));
        }
    }
}
