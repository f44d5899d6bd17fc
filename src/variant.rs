//! The four historically successive mission-file layouts and their fixed
//! capability table.
//!
//! Everything variant-dependent that more than one module needs lives here:
//! capacities, field widths, feature availability. Exact byte offsets stay in
//! the per-variant codec modules.

use std::fmt;

/// One of the four format generations, in historical order. Cross-format
/// conversion flows only between immediate neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variant {
    V1,
    V2,
    V3,
    V4,
}

impl Variant {
    pub const ALL: [Variant; 4] = [Variant::V1, Variant::V2, Variant::V3, Variant::V4];

    /// Signature word at file offset 0.
    pub fn signature(self) -> i16 {
        match self {
            Variant::V1 => 0x0002,
            Variant::V2 => -1,
            Variant::V3 => 0x000C,
            Variant::V4 => 0x0012,
        }
    }

    pub fn from_signature(sig: i16) -> Option<Variant> {
        Variant::ALL.iter().copied().find(|v| v.signature() == sig)
    }

    fn ordinal(self) -> u8 {
        match self {
            Variant::V1 => 1,
            Variant::V2 => 2,
            Variant::V3 => 3,
            Variant::V4 => 4,
        }
    }

    /// True when `other` is one generation away in either direction.
    pub fn is_neighbor(self, other: Variant) -> bool {
        self.ordinal().abs_diff(other.ordinal()) == 1
    }

    pub fn caps(self) -> &'static FormatCaps {
        match self {
            Variant::V1 => &CAPS_V1,
            Variant::V2 => &CAPS_V2,
            Variant::V3 => &CAPS_V3,
            Variant::V4 => &CAPS_V4,
        }
    }

    pub fn parse(s: &str) -> Option<Variant> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" => Some(Variant::V1),
            "v2" | "2" => Some(Variant::V2),
            "v3" | "3" => Some(Variant::V3),
            "v4" | "4" => Some(Variant::V4),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Variant::V1 => "v1",
            Variant::V2 => "v2",
            Variant::V3 => "v3",
            Variant::V4 => "v4",
        };
        f.write_str(s)
    }
}

/// Fixed per-format limits and feature switches.
#[derive(Debug)]
pub struct FormatCaps {
    pub flight_groups: usize,
    pub messages: usize,
    pub teams: usize,
    pub global_goal_sets: usize,
    pub briefings: usize,
    pub orders_per_fg: usize,
    pub goals_per_fg: usize,
    pub arrival_triggers: usize,
    pub departure_triggers: usize,
    pub waypoints_per_fg: usize,
    pub order_waypoints: usize,
    pub craft_types: u8,
    pub condition_max: u8,
    /// Fixed-width name/cargo buffer length on disk.
    pub name_len: usize,
    pub message_len: usize,
    /// 0 = orders carry no free-text designation in this format.
    pub designation_len: usize,
    /// 0 = goals carry no points field in this format.
    pub points_quantum: i32,
    pub goal_text_len: usize,
    pub has_trigger_parameter: bool,
    pub has_waypoint_region: bool,
    pub has_loadout: bool,
    /// Message color is a leading '1'..'3' digit on the message string.
    pub color_digit_in_text: bool,
    /// Pitch angle carries the observed ±90° phase shift.
    pub pitch_phase_shift: bool,
    /// Delays use the two-regime byte encoding instead of 5-second ticks.
    pub two_regime_delay: bool,
    /// Briefing lives in a companion file next to the mission file.
    pub companion_briefing: bool,
    /// Maximum briefing event stream size, in i16 units.
    pub briefing_event_shorts: usize,
    pub briefing_strings: usize,
    pub summary_len: usize,
    pub debrief_len: usize,
}

pub static CAPS_V1: FormatCaps = FormatCaps {
    flight_groups: 48,
    messages: 0,
    teams: 0,
    global_goal_sets: 0,
    briefings: 1,
    orders_per_fg: 3,
    goals_per_fg: 3,
    arrival_triggers: 1,
    departure_triggers: 1,
    waypoints_per_fg: 7,
    order_waypoints: 0,
    craft_types: 18,
    condition_max: 15,
    name_len: 16,
    message_len: 0,
    designation_len: 0,
    points_quantum: 0,
    goal_text_len: 0,
    has_trigger_parameter: false,
    has_waypoint_region: false,
    has_loadout: false,
    color_digit_in_text: false,
    pitch_phase_shift: false,
    two_regime_delay: false,
    companion_briefing: true,
    briefing_event_shorts: 256,
    briefing_strings: 16,
    summary_len: 256,
    debrief_len: 0,
};

pub static CAPS_V2: FormatCaps = FormatCaps {
    flight_groups: 48,
    messages: 16,
    teams: 6,
    global_goal_sets: 1,
    briefings: 1,
    orders_per_fg: 4,
    goals_per_fg: 8,
    arrival_triggers: 2,
    departure_triggers: 2,
    waypoints_per_fg: 15,
    order_waypoints: 0,
    craft_types: 88,
    condition_max: 24,
    name_len: 20,
    message_len: 64,
    designation_len: 0,
    points_quantum: 0,
    goal_text_len: 0,
    has_trigger_parameter: false,
    has_waypoint_region: false,
    has_loadout: true,
    color_digit_in_text: true,
    pitch_phase_shift: false,
    two_regime_delay: false,
    companion_briefing: false,
    briefing_event_shorts: 400,
    briefing_strings: 32,
    summary_len: 256,
    debrief_len: 256,
};

pub static CAPS_V3: FormatCaps = FormatCaps {
    flight_groups: 46,
    messages: 64,
    teams: 10,
    global_goal_sets: 10,
    briefings: 8,
    orders_per_fg: 4,
    goals_per_fg: 8,
    arrival_triggers: 4,
    departure_triggers: 2,
    waypoints_per_fg: 22,
    order_waypoints: 0,
    craft_types: 93,
    condition_max: 28,
    name_len: 20,
    message_len: 64,
    designation_len: 8,
    points_quantum: 25,
    goal_text_len: 64,
    has_trigger_parameter: false,
    has_waypoint_region: false,
    has_loadout: true,
    color_digit_in_text: false,
    pitch_phase_shift: true,
    two_regime_delay: false,
    companion_briefing: false,
    briefing_event_shorts: 810,
    briefing_strings: 32,
    summary_len: 512,
    debrief_len: 512,
};

pub static CAPS_V4: FormatCaps = FormatCaps {
    flight_groups: 100,
    messages: 64,
    teams: 10,
    global_goal_sets: 10,
    briefings: 2,
    orders_per_fg: 16,
    goals_per_fg: 8,
    arrival_triggers: 4,
    departure_triggers: 2,
    waypoints_per_fg: 4,
    order_waypoints: 8,
    craft_types: 232,
    condition_max: 31,
    name_len: 20,
    message_len: 64,
    designation_len: 16,
    points_quantum: 250,
    goal_text_len: 64,
    has_trigger_parameter: true,
    has_waypoint_region: true,
    has_loadout: true,
    color_digit_in_text: false,
    pitch_phase_shift: true,
    two_regime_delay: true,
    companion_briefing: false,
    briefing_event_shorts: 1088,
    briefing_strings: 32,
    summary_len: 1024,
    debrief_len: 1024,
};
