//! The root aggregate: one decoded mission.

use crate::collection::BoundedCollection;
use crate::model::{Briefing, FlightGroup, GlobalGoals, Message, Team};
use crate::variant::Variant;

/// One mission for one format generation. Owns every entity collection;
/// cross-references between entities are weak slot indices maintained by
/// [`crate::refs`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    variant: Variant,
    /// Mission time limit in minutes; 0 = none.
    pub time_limit_min: u8,
    pub end_when_complete: bool,
    pub summary: String,
    pub debrief: String,
    pub flight_groups: BoundedCollection<FlightGroup>,
    pub messages: BoundedCollection<Message>,
    pub teams: BoundedCollection<Team>,
    pub globals: BoundedCollection<GlobalGoals>,
    pub briefings: BoundedCollection<Briefing>,
}

impl Mission {
    /// Empty mission with one default flight group and the fixed team and
    /// global-goal blocks of the format.
    pub fn new(variant: Variant) -> Self {
        let caps = variant.caps();
        let flight_groups = BoundedCollection::new(caps.flight_groups, 1);
        let mut teams: BoundedCollection<Team> = BoundedCollection::new(caps.teams, caps.teams);
        for (i, team) in teams.iter_mut().enumerate() {
            team.name = format!("Team {}", i + 1);
            if i < 10 {
                team.allied[i] = true;
            }
        }
        let globals = BoundedCollection::new(caps.global_goal_sets, caps.global_goal_sets);
        let briefings = BoundedCollection::new(caps.briefings, caps.briefings);
        Mission {
            variant,
            time_limit_min: 0,
            end_when_complete: false,
            summary: String::new(),
            debrief: String::new(),
            flight_groups,
            messages: BoundedCollection::new(caps.messages, 0),
            teams,
            globals,
            briefings,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }
}
