//! Cross-format conversion between neighboring generations.
//!
//! Conversion flows along the series' historical order: each generation
//! converts to and from its immediate neighbors only, and a multi-step hop is
//! the caller's composition of neighbor steps. Every conversion returns a
//! [`Converted`] carrying both the value and the set of fields that had no
//! destination representation, so lossy paths are impossible to ignore.
//!
//! Two failure classes are hard errors rather than drops: a conversion path
//! that is not a neighbor pair, and a craft-type index with no entry in the
//! destination's craft list (indices are remapped through explicit lookup
//! functions, never clamped).

use std::collections::BTreeSet;
use std::fmt;

use crate::codec::{delay_raw_to_seconds, points_to_raw, raw_to_points, seconds_to_delay_raw};
use crate::model::{
    Briefing, FlightGroup, Goal, GoalText, Message, Mission, OptLoadout, Order, TargetKind,
    TargetRef, Team, Trigger, Waypoint,
};
use crate::variant::Variant;

/// A field (or group of fields) that could not be carried into the
/// destination format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldTag {
    /// Trigger condition above the destination's maximum; the trigger was
    /// reset to "always / no target".
    TriggerCondition,
    /// Trigger target pointing past a destination capacity; cleared.
    TriggerTarget,
    /// Auxiliary trigger parameter (region / proximity group).
    TriggerParameter,
    /// Arrival trigger slots beyond the destination's count.
    ArrivalTriggers,
    /// Departure trigger slots beyond the destination's count.
    DepartureTriggers,
    /// Skip-to-next-order triggers; first generation has none.
    SkipTriggers,
    /// Free-text order designation dropped or shortened.
    Designation,
    /// Per-order waypoint set; last generation only.
    OrderWaypoints,
    /// Waypoint region index; last generation only.
    WaypointRegion,
    /// Flight-group waypoint slots beyond the destination's table.
    ExcessWaypoints,
    /// Order slots beyond the destination's per-group count.
    ExcessOrders,
    /// Goal slots beyond the destination's per-group count.
    ExcessGoals,
    /// Warhead/beam/countermeasure loadout; first generation has none.
    Loadout,
    /// Goal point value; only two generations score goals.
    GoalPoints,
    /// Goal status strings; only two generations carry them.
    GoalText,
    /// Message color with no destination representation.
    MessageColor,
    /// Message team mask; the second generation sends to one team only.
    MessageTeams,
    /// Message trigger slots beyond the destination's count.
    MessageTriggers,
    /// Flight groups beyond the destination's capacity.
    ExcessFlightGroups,
    /// Messages beyond the destination's capacity (or a format without
    /// messages at all).
    Messages,
    /// Teams beyond the destination's roster.
    ExcessTeams,
    /// Per-team end-of-mission lines; second generation has none.
    EndOfMissionText,
    /// Global goal sets beyond the destination's count.
    ExcessGlobalGoals,
    /// Briefings beyond the destination's count.
    ExcessBriefings,
    /// Briefing events beyond the destination's fixed event-stream size.
    ExcessBriefingEvents,
    /// Debrief text; first generation has none.
    Debrief,
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A converted value plus everything the destination could not hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted<T> {
    pub value: T,
    pub dropped: BTreeSet<FieldTag>,
}

impl<T> Converted<T> {
    fn new(value: T, dropped: BTreeSet<FieldTag>) -> Self {
        Converted { value, dropped }
    }

    /// True when nothing was lost.
    pub fn is_lossless(&self) -> bool {
        self.dropped.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("no conversion path from {from} to {to}; only neighboring generations convert")]
    UnsupportedPath { from: Variant, to: Variant },
    #[error("craft type {value} of {from} has no equivalent in {to}")]
    UnmappableValue { from: Variant, to: Variant, value: u8 },
}

fn ensure_neighbors(from: Variant, to: Variant) -> Result<(), ConversionError> {
    if from.is_neighbor(to) {
        Ok(())
    } else {
        Err(ConversionError::UnsupportedPath { from, to })
    }
}

/// Remap a craft-type index between neighboring generations. The craft lists
/// evolved by mid-list insertion and removal, so each neighbor pair has its
/// own shift table; an index with no destination entry is a hard error.
pub fn map_craft_type(index: u8, from: Variant, to: Variant) -> Result<u8, ConversionError> {
    let unmappable = Err(ConversionError::UnmappableValue { from, to, value: index });
    match (from, to) {
        // The second generation inserted craft at 6 and 13 and dropped the
        // first generation's last entry.
        (Variant::V1, Variant::V2) => match index {
            0..=5 => Ok(index),
            6..=11 => Ok(index + 1),
            12..=16 => Ok(index + 2),
            _ => unmappable,
        },
        (Variant::V2, Variant::V1) => match index {
            0..=5 => Ok(index),
            7..=12 => Ok(index - 1),
            14..=18 => Ok(index - 2),
            _ => unmappable,
        },
        // The third generation replaced entry 45 and appended 88..=92.
        (Variant::V2, Variant::V3) => match index {
            45 => unmappable,
            0..=87 => Ok(index),
            _ => unmappable,
        },
        (Variant::V3, Variant::V2) => match index {
            45 => unmappable,
            0..=87 => Ok(index),
            _ => unmappable,
        },
        // The fourth generation inserted two entries at 40.
        (Variant::V3, Variant::V4) => match index {
            0..=39 => Ok(index),
            40..=92 => Ok(index + 2),
            _ => unmappable,
        },
        (Variant::V4, Variant::V3) => match index {
            0..=39 => Ok(index),
            40 | 41 => unmappable,
            42..=94 => Ok(index - 2),
            _ => unmappable,
        },
        _ => Err(ConversionError::UnsupportedPath { from, to }),
    }
}

/// Remap a target reference. Craft-type values are remapped like craft types
/// themselves, including the first generation's reserved-zero offset; targets
/// pointing past a destination capacity are cleared and reported.
fn convert_target(
    t: &TargetRef,
    from: Variant,
    to: Variant,
    dropped: &mut BTreeSet<FieldTag>,
) -> Result<TargetRef, ConversionError> {
    let mut out = *t;
    if t.kind == TargetKind::CraftType {
        // The first generation reserves craft-type value 0 for "none".
        out.value = match (from, to) {
            (Variant::V1, _) => {
                if t.value == 0 {
                    out.clear();
                    return Ok(out);
                }
                map_craft_type(t.value - 1, from, to)?
            }
            (_, Variant::V1) => map_craft_type(t.value, from, to)? + 1,
            _ => map_craft_type(t.value, from, to)?,
        };
    }
    if out.validate(to).is_err() {
        out.clear();
        dropped.insert(FieldTag::TriggerTarget);
    }
    Ok(out)
}

fn convert_trigger_inner(
    t: &Trigger,
    from: Variant,
    to: Variant,
    dropped: &mut BTreeSet<FieldTag>,
) -> Result<Trigger, ConversionError> {
    if t.condition.raw() > to.caps().condition_max {
        dropped.insert(FieldTag::TriggerCondition);
        return Ok(Trigger::default());
    }
    let mut out = *t;
    out.target = convert_target(&t.target, from, to, dropped)?;
    if !to.caps().has_trigger_parameter && t.parameter != 0 {
        dropped.insert(FieldTag::TriggerParameter);
        out.parameter = 0;
    }
    Ok(out)
}

pub fn convert_trigger(
    t: &Trigger,
    from: Variant,
    to: Variant,
) -> Result<Converted<Trigger>, ConversionError> {
    ensure_neighbors(from, to)?;
    let mut dropped = BTreeSet::new();
    let value = convert_trigger_inner(t, from, to, &mut dropped)?;
    Ok(Converted::new(value, dropped))
}

fn convert_waypoint_inner(
    wp: &Waypoint,
    to: Variant,
    dropped: &mut BTreeSet<FieldTag>,
) -> Waypoint {
    let mut out = *wp;
    if !to.caps().has_waypoint_region && wp.region() != 0 {
        dropped.insert(FieldTag::WaypointRegion);
        let _ = out.set_region(0);
    }
    out
}

pub fn convert_waypoint(
    wp: &Waypoint,
    from: Variant,
    to: Variant,
) -> Result<Converted<Waypoint>, ConversionError> {
    ensure_neighbors(from, to)?;
    let mut dropped = BTreeSet::new();
    let value = convert_waypoint_inner(wp, to, &mut dropped);
    Ok(Converted::new(value, dropped))
}

/// Truncate a waypoint table to the destination slot count, reporting any
/// populated slot that falls off.
fn convert_waypoint_table(
    table: &[Waypoint],
    to: Variant,
    cap: usize,
    excess_tag: FieldTag,
    dropped: &mut BTreeSet<FieldTag>,
) -> Vec<Waypoint> {
    if table.iter().skip(cap).any(|wp| *wp != Waypoint::default()) {
        dropped.insert(excess_tag);
    }
    table
        .iter()
        .take(cap)
        .map(|wp| convert_waypoint_inner(wp, to, dropped))
        .collect()
}

fn convert_order_inner(
    o: &Order,
    from: Variant,
    to: Variant,
    dropped: &mut BTreeSet<FieldTag>,
) -> Result<Order, ConversionError> {
    let caps = to.caps();
    let mut out = Order {
        command: o.command,
        throttle: o.throttle,
        first_pair_and: o.first_pair_and,
        second_pair_and: o.second_pair_and,
        skip_and: o.skip_and,
        ..Order::default()
    };
    for (slot, t) in out.targets.iter_mut().zip(o.targets.iter()) {
        *slot = convert_target(t, from, to, dropped)?;
    }
    if to == Variant::V1 {
        if o.skip_triggers.iter().any(|t| *t != Trigger::default()) {
            dropped.insert(FieldTag::SkipTriggers);
        }
        out.skip_and = false;
    } else {
        for (slot, t) in out.skip_triggers.iter_mut().zip(o.skip_triggers.iter()) {
            *slot = convert_trigger_inner(t, from, to, dropped)?;
        }
    }
    if caps.designation_len == 0 {
        if !o.designation.is_empty() {
            dropped.insert(FieldTag::Designation);
        }
    } else {
        // Fixed-width buffer keeps one byte for the terminator.
        let limit = caps.designation_len - 1;
        if o.designation.len() > limit {
            dropped.insert(FieldTag::Designation);
            let mut cut = limit;
            while !o.designation.is_char_boundary(cut) {
                cut -= 1;
            }
            out.designation = o.designation[..cut].to_string();
        } else {
            out.designation = o.designation.clone();
        }
    }
    if caps.order_waypoints == 0 {
        if o.waypoints.iter().any(|wp| *wp != Waypoint::default()) {
            dropped.insert(FieldTag::OrderWaypoints);
        }
    } else {
        out.waypoints = convert_waypoint_table(
            &o.waypoints,
            to,
            caps.order_waypoints,
            FieldTag::OrderWaypoints,
            dropped,
        );
    }
    Ok(out)
}

pub fn convert_order(
    o: &Order,
    from: Variant,
    to: Variant,
) -> Result<Converted<Order>, ConversionError> {
    ensure_neighbors(from, to)?;
    let mut dropped = BTreeSet::new();
    let value = convert_order_inner(o, from, to, &mut dropped)?;
    Ok(Converted::new(value, dropped))
}

fn convert_goal_inner(
    g: &Goal,
    from: Variant,
    to: Variant,
    dropped: &mut BTreeSet<FieldTag>,
) -> Result<Goal, ConversionError> {
    let caps = to.caps();
    if g.condition.raw() > caps.condition_max {
        dropped.insert(FieldTag::TriggerCondition);
        return Ok(Goal::default());
    }
    let mut out = Goal::default();
    out.condition = g.condition;
    out.amount = g.amount;
    out.argument = g.argument;
    out.target = convert_target(&g.target, from, to, dropped)?;
    if caps.points_quantum == 0 {
        if g.points() != 0 {
            dropped.insert(FieldTag::GoalPoints);
        }
    } else {
        // Snap to the destination quantum the same way the codec will.
        let snapped = raw_to_points(points_to_raw(g.points(), caps.points_quantum), caps.points_quantum);
        let _ = out.set_points(snapped);
    }
    let any_text = [GoalText::Incomplete, GoalText::Complete, GoalText::Failed]
        .iter()
        .any(|slot| !g.text(*slot).is_empty());
    if caps.goal_text_len == 0 {
        if any_text {
            dropped.insert(FieldTag::GoalText);
        }
    } else {
        for slot in [GoalText::Incomplete, GoalText::Complete, GoalText::Failed] {
            out.set_text(slot, g.text(slot));
        }
    }
    Ok(out)
}

pub fn convert_goal(
    g: &Goal,
    from: Variant,
    to: Variant,
) -> Result<Converted<Goal>, ConversionError> {
    ensure_neighbors(from, to)?;
    let mut dropped = BTreeSet::new();
    let value = convert_goal_inner(g, from, to, &mut dropped)?;
    Ok(Converted::new(value, dropped))
}

fn convert_message_inner(
    msg: &Message,
    from: Variant,
    to: Variant,
    dropped: &mut BTreeSet<FieldTag>,
) -> Result<Message, ConversionError> {
    let caps = to.caps();
    let mut out = Message {
        text: msg.text.clone(),
        color: msg.color,
        sent_to_teams: msg.sent_to_teams,
        combine: msg.combine,
        ..Message::default()
    };
    if caps.color_digit_in_text {
        // The digit convention can express colors 1..=3; color 0 survives as
        // "no digit" unless the text itself starts with one.
        if msg.color > 3 || (msg.color == 0 && msg.text.starts_with(['1', '2', '3'])) {
            dropped.insert(FieldTag::MessageColor);
            out.color = 0;
        }
        if msg.sent_to_teams != 1 {
            dropped.insert(FieldTag::MessageTeams);
            out.sent_to_teams = 1;
        }
    }
    let slots = if to == Variant::V2 { 2 } else { 4 };
    if msg.triggers.iter().skip(slots).any(|t| *t != Trigger::default()) {
        dropped.insert(FieldTag::MessageTriggers);
    }
    for i in 0..slots {
        out.triggers[i] = convert_trigger_inner(&msg.triggers[i], from, to, dropped)?;
    }
    out.delay_seconds = delay_raw_to_seconds(to, seconds_to_delay_raw(to, msg.delay_seconds));
    Ok(out)
}

pub fn convert_message(
    msg: &Message,
    from: Variant,
    to: Variant,
) -> Result<Converted<Message>, ConversionError> {
    ensure_neighbors(from, to)?;
    let mut dropped = BTreeSet::new();
    let value = convert_message_inner(msg, from, to, &mut dropped)?;
    Ok(Converted::new(value, dropped))
}

fn convert_flight_group_inner(
    fg: &FlightGroup,
    from: Variant,
    to: Variant,
    dropped: &mut BTreeSet<FieldTag>,
) -> Result<FlightGroup, ConversionError> {
    let caps = to.caps();
    let mut out = fg.clone();
    out.craft_type = map_craft_type(fg.craft_type, from, to)?;

    if fg.arrival.iter().skip(caps.arrival_triggers).any(|t| *t != Trigger::default()) {
        dropped.insert(FieldTag::ArrivalTriggers);
    }
    for (i, slot) in out.arrival.iter_mut().enumerate() {
        *slot = if i < caps.arrival_triggers {
            convert_trigger_inner(&fg.arrival[i], from, to, dropped)?
        } else {
            Trigger::default()
        };
    }
    if fg.departure.iter().skip(caps.departure_triggers).any(|t| *t != Trigger::default()) {
        dropped.insert(FieldTag::DepartureTriggers);
    }
    for (i, slot) in out.departure.iter_mut().enumerate() {
        *slot = if i < caps.departure_triggers {
            convert_trigger_inner(&fg.departure[i], from, to, dropped)?
        } else {
            Trigger::default()
        };
    }
    // Delays snap to what the destination's byte encoding can hold.
    out.arrival_delay_seconds =
        delay_raw_to_seconds(to, seconds_to_delay_raw(to, fg.arrival_delay_seconds));
    out.departure_delay_seconds =
        delay_raw_to_seconds(to, seconds_to_delay_raw(to, fg.departure_delay_seconds));

    if fg.orders.iter().skip(caps.orders_per_fg).any(|o| *o != Order::default()) {
        dropped.insert(FieldTag::ExcessOrders);
    }
    out.orders = fg
        .orders
        .iter()
        .take(caps.orders_per_fg)
        .map(|o| convert_order_inner(o, from, to, dropped))
        .collect::<Result<_, _>>()?;

    if fg.goals.iter().skip(caps.goals_per_fg).any(|g| *g != Goal::default()) {
        dropped.insert(FieldTag::ExcessGoals);
    }
    out.goals = fg
        .goals
        .iter()
        .take(caps.goals_per_fg)
        .map(|g| convert_goal_inner(g, from, to, dropped))
        .collect::<Result<_, _>>()?;

    out.waypoints = convert_waypoint_table(
        &fg.waypoints,
        to,
        caps.waypoints_per_fg,
        FieldTag::ExcessWaypoints,
        dropped,
    );

    if !caps.has_loadout && fg.loadout != OptLoadout::new() {
        dropped.insert(FieldTag::Loadout);
        out.loadout = OptLoadout::new();
    }
    Ok(out)
}

pub fn convert_flight_group(
    fg: &FlightGroup,
    from: Variant,
    to: Variant,
) -> Result<Converted<FlightGroup>, ConversionError> {
    ensure_neighbors(from, to)?;
    let mut dropped = BTreeSet::new();
    let value = convert_flight_group_inner(fg, from, to, &mut dropped)?;
    Ok(Converted::new(value, dropped))
}

fn convert_team_inner(team: &Team, to: Variant, dropped: &mut BTreeSet<FieldTag>) -> Team {
    let mut out = team.clone();
    if to == Variant::V2 {
        if team.allied.iter().skip(6).any(|a| *a) {
            dropped.insert(FieldTag::ExcessTeams);
            for a in out.allied.iter_mut().skip(6) {
                *a = false;
            }
        }
        if team.end_of_mission.iter().any(|s| !s.is_empty()) {
            dropped.insert(FieldTag::EndOfMissionText);
            out.end_of_mission = [String::new(), String::new()];
        }
    }
    out
}

/// Truncate a briefing's event list to what fits the destination's fixed
/// event stream, reporting any events that fall off. Without this the codec
/// would drop the overflow at encode time, invisibly to the caller.
fn convert_briefing_inner(b: &Briefing, to: Variant, dropped: &mut BTreeSet<FieldTag>) -> Briefing {
    let cap = to.caps().briefing_event_shorts;
    let mut out = b.clone();
    if out.stream_shorts() > cap {
        dropped.insert(FieldTag::ExcessBriefingEvents);
        // Two i16 slots stay reserved for the end marker.
        let mut used = 2;
        let keep = out
            .events
            .iter()
            .take_while(|event| {
                if used + event.stream_len() > cap {
                    false
                } else {
                    used += event.stream_len();
                    true
                }
            })
            .count();
        out.events.truncate(keep);
    }
    out
}

/// Convert a whole mission to a neighboring generation.
pub fn convert_mission(
    mission: &Mission,
    to: Variant,
) -> Result<Converted<Mission>, ConversionError> {
    let from = mission.variant();
    ensure_neighbors(from, to)?;
    let caps = to.caps();
    let mut dropped = BTreeSet::new();
    let mut out = Mission::new(to);
    out.time_limit_min = mission.time_limit_min;
    out.end_when_complete = mission.end_when_complete;
    out.summary = mission.summary.clone();
    if caps.debrief_len == 0 {
        if !mission.debrief.is_empty() {
            dropped.insert(FieldTag::Debrief);
        }
    } else {
        out.debrief = mission.debrief.clone();
    }

    let fg_count = mission.flight_groups.len();
    if fg_count > caps.flight_groups {
        dropped.insert(FieldTag::ExcessFlightGroups);
    }
    let kept = fg_count.min(caps.flight_groups);
    // Capacity was just checked; set_count cannot fail here.
    let _ = out.flight_groups.set_count(kept, true);
    for i in 0..kept {
        out.flight_groups[i] =
            convert_flight_group_inner(&mission.flight_groups[i], from, to, &mut dropped)?;
    }

    let msg_count = mission.messages.len();
    if msg_count > caps.messages {
        dropped.insert(FieldTag::Messages);
    }
    let kept = msg_count.min(caps.messages);
    let _ = out.messages.set_count(kept, true);
    for i in 0..kept {
        out.messages[i] = convert_message_inner(&mission.messages[i], from, to, &mut dropped)?;
    }

    if mission
        .teams
        .iter()
        .skip(caps.teams)
        .any(|t| *t != Team::default())
    {
        dropped.insert(FieldTag::ExcessTeams);
    }
    for i in 0..caps.teams.min(mission.teams.len()) {
        out.teams[i] = convert_team_inner(&mission.teams[i], to, &mut dropped);
    }

    if mission
        .globals
        .iter()
        .skip(caps.global_goal_sets)
        .any(|set| set.goals.iter().any(|g| *g != Goal::default()))
    {
        dropped.insert(FieldTag::ExcessGlobalGoals);
    }
    for i in 0..caps.global_goal_sets.min(mission.globals.len()) {
        for slot in 0..3 {
            out.globals[i].goals[slot] =
                convert_goal_inner(&mission.globals[i].goals[slot], from, to, &mut dropped)?;
        }
    }

    if mission
        .briefings
        .iter()
        .skip(caps.briefings)
        .any(|b| !b.events.is_empty() || !b.tags.is_empty() || !b.captions.is_empty())
    {
        dropped.insert(FieldTag::ExcessBriefings);
    }
    for i in 0..caps.briefings.min(mission.briefings.len()) {
        out.briefings[i] = convert_briefing_inner(&mission.briefings[i], to, &mut dropped);
    }

    Ok(Converted::new(out, dropped))
}
