//! Flight groups: one squadron/unit definition.

use crate::model::{Goal, OptLoadout, Order, Trigger, TriggerCombine, Waypoint};

/// The first generation persists craft and non-craft "space objects" in two
/// separate on-disk arrays; the model unifies them into one ordered collection
/// tagged by kind, and that codec re-splits on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitTag {
    #[default]
    Craft,
    SpaceObject,
}

/// One flight group. `number_of_craft` and `waves` are one-based here; the
/// disk stores value minus one (the off-by-one correction is part of the codec
/// contract, not the model).
#[derive(Debug, Clone, PartialEq)]
pub struct FlightGroup {
    pub name: String,
    pub cargo: String,
    pub special_cargo: String,
    /// Craft slot carrying the special cargo; 0 = none.
    pub special_craft: u8,
    pub craft_type: u8,
    pub number_of_craft: u8,
    pub waves: u8,
    pub iff: u8,
    pub ai_rating: u8,
    pub markings: u8,
    pub formation: u8,
    /// 0 = AI-flown.
    pub player_slot: u8,
    pub unit: UnitTag,
    /// Orientation in signed degrees, -180..=179.
    pub yaw: i16,
    pub pitch: i16,
    pub roll: i16,
    pub arrival: [Trigger; 4],
    pub arrival_combine: TriggerCombine,
    pub arrival_delay_seconds: u16,
    pub departure: [Trigger; 2],
    pub departure_and: bool,
    pub departure_delay_seconds: u16,
    pub arrival_mothership: Option<u8>,
    pub arrive_via_mothership: bool,
    pub departure_mothership: Option<u8>,
    pub depart_via_mothership: bool,
    pub orders: Vec<Order>,
    pub goals: Vec<Goal>,
    pub waypoints: Vec<Waypoint>,
    pub loadout: OptLoadout,
}

impl Default for FlightGroup {
    fn default() -> Self {
        FlightGroup {
            name: String::new(),
            cargo: String::new(),
            special_cargo: String::new(),
            special_craft: 0,
            craft_type: 0,
            number_of_craft: 1,
            waves: 1,
            iff: 0,
            ai_rating: 0,
            markings: 0,
            formation: 0,
            player_slot: 0,
            unit: UnitTag::Craft,
            yaw: 0,
            pitch: 0,
            roll: 0,
            arrival: [Trigger::default(); 4],
            arrival_combine: TriggerCombine::default(),
            arrival_delay_seconds: 0,
            departure: [Trigger::default(); 2],
            departure_and: false,
            departure_delay_seconds: 0,
            arrival_mothership: None,
            arrive_via_mothership: false,
            departure_mothership: None,
            depart_via_mothership: false,
            orders: Vec::new(),
            goals: Vec::new(),
            waypoints: Vec::new(),
            loadout: OptLoadout::new(),
        }
    }
}

impl FlightGroup {
    pub fn named(name: impl Into<String>) -> Self {
        FlightGroup { name: name.into(), ..FlightGroup::default() }
    }
}
