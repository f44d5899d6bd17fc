//! Teams and their mission-wide goal sets.

use crate::model::Goal;

/// One team/IFF definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub name: String,
    /// Alliance flag per team slot.
    pub allied: [bool; 10],
    /// End-of-mission lines: shown on win and on loss.
    pub end_of_mission: [String; 2],
}

impl Default for Team {
    fn default() -> Self {
        Team {
            name: String::new(),
            allied: [false; 10],
            end_of_mission: [String::new(), String::new()],
        }
    }
}

/// Per-team mission-wide goal set, structurally parallel to flight-group
/// goals: primary, prevent, secondary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlobalGoals {
    pub goals: [Goal; 3],
}
