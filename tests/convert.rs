//! Neighbor-generation conversion: craft-type remapping, unit rescaling, and
//! the dropped-field reporting contract.

use sortie::convert::{
    convert_flight_group, convert_goal, convert_message, convert_mission, convert_order,
    convert_trigger, map_craft_type, ConversionError, FieldTag,
};
use sortie::model::{
    Amount, BriefingEvent, Condition, EventKind, FlightGroup, Goal, GoalText, Message, Mission,
    Order, TargetKind, TargetRef, Trigger, Waypoint,
};
use sortie::variant::Variant;

#[test]
fn test_only_neighbors_convert() {
    let t = Trigger::default();
    match convert_trigger(&t, Variant::V1, Variant::V3) {
        Err(ConversionError::UnsupportedPath { from, to }) => {
            assert_eq!(from, Variant::V1);
            assert_eq!(to, Variant::V3);
        }
        other => panic!("expected UnsupportedPath, got {:?}", other),
    }
    assert!(convert_trigger(&t, Variant::V2, Variant::V2).is_err());
    assert!(convert_trigger(&t, Variant::V4, Variant::V1).is_err());
}

#[test]
fn test_craft_map_v1_v2_shifts() {
    // Identity below the first insert, then shifted by the two inserts.
    assert_eq!(map_craft_type(5, Variant::V1, Variant::V2), Ok(5));
    assert_eq!(map_craft_type(6, Variant::V1, Variant::V2), Ok(7));
    assert_eq!(map_craft_type(11, Variant::V1, Variant::V2), Ok(12));
    assert_eq!(map_craft_type(12, Variant::V1, Variant::V2), Ok(14));
    assert_eq!(map_craft_type(16, Variant::V1, Variant::V2), Ok(18));
    assert!(map_craft_type(17, Variant::V1, Variant::V2).is_err());

    assert_eq!(map_craft_type(7, Variant::V2, Variant::V1), Ok(6));
    assert_eq!(map_craft_type(18, Variant::V2, Variant::V1), Ok(16));
    // The inserts themselves have no older equivalent.
    assert!(map_craft_type(6, Variant::V2, Variant::V1).is_err());
    assert!(map_craft_type(13, Variant::V2, Variant::V1).is_err());
    assert!(map_craft_type(19, Variant::V2, Variant::V1).is_err());
}

#[test]
fn test_craft_map_round_trips_where_defined() {
    for i in 0..=16u8 {
        let up = map_craft_type(i, Variant::V1, Variant::V2).expect("forward");
        assert_eq!(map_craft_type(up, Variant::V2, Variant::V1), Ok(i));
    }
}

#[test]
fn test_craft_map_v2_v3_replaced_entry() {
    assert_eq!(map_craft_type(44, Variant::V2, Variant::V3), Ok(44));
    assert!(map_craft_type(45, Variant::V2, Variant::V3).is_err());
    assert!(map_craft_type(45, Variant::V3, Variant::V2).is_err());
    // The third generation's appended entries have no older equivalent.
    assert!(map_craft_type(88, Variant::V3, Variant::V2).is_err());
    assert_eq!(map_craft_type(87, Variant::V3, Variant::V2), Ok(87));
}

#[test]
fn test_craft_map_v3_v4_inserts() {
    assert_eq!(map_craft_type(39, Variant::V3, Variant::V4), Ok(39));
    assert_eq!(map_craft_type(40, Variant::V3, Variant::V4), Ok(42));
    assert_eq!(map_craft_type(92, Variant::V3, Variant::V4), Ok(94));
    assert!(map_craft_type(40, Variant::V4, Variant::V3).is_err());
    assert!(map_craft_type(41, Variant::V4, Variant::V3).is_err());
    assert_eq!(map_craft_type(42, Variant::V4, Variant::V3), Ok(40));
    assert!(map_craft_type(95, Variant::V4, Variant::V3).is_err());
}

#[test]
fn test_craft_type_target_shifts_for_reserved_zero() {
    // The first generation stores craft-type targets one above the index.
    let t = Trigger::new(
        Condition::Destroyed,
        TargetRef::new(TargetKind::CraftType, 7),
        Amount::All,
    );
    let converted = convert_trigger(&t, Variant::V1, Variant::V2).expect("convert");
    assert_eq!(converted.value.target.value, 7); // index 6 -> 7, stored plain
    let back = convert_trigger(&converted.value, Variant::V2, Variant::V1).expect("back");
    assert_eq!(back.value.target.value, 7);

    // Value 0 is the "no craft" sentinel, not an index.
    let t = Trigger::new(
        Condition::Destroyed,
        TargetRef::new(TargetKind::CraftType, 0),
        Amount::All,
    );
    let converted = convert_trigger(&t, Variant::V1, Variant::V2).expect("convert");
    assert_eq!(converted.value.target.kind, TargetKind::None);
}

#[test]
fn test_unmappable_craft_type_is_hard_error() {
    let mut fg = FlightGroup::named("Relic");
    fg.craft_type = 17;
    match convert_flight_group(&fg, Variant::V1, Variant::V2) {
        Err(ConversionError::UnmappableValue { value, .. }) => assert_eq!(value, 17),
        other => panic!("expected UnmappableValue, got {:?}", other),
    }
}

#[test]
fn test_condition_above_destination_max_nulls_trigger() {
    let t = Trigger::new(
        Condition::ShieldsDown, // code 20, above the first generation's 15
        TargetRef::new(TargetKind::FlightGroup, 3),
        Amount::All,
    );
    let converted = convert_trigger(&t, Variant::V2, Variant::V1).expect("convert");
    assert_eq!(converted.value, Trigger::default());
    assert!(converted.dropped.contains(&FieldTag::TriggerCondition));
}

#[test]
fn test_trigger_parameter_dropped_leaving_v4() {
    let mut t = Trigger::new(
        Condition::Destroyed,
        TargetRef::new(TargetKind::FlightGroup, 0),
        Amount::All,
    );
    t.parameter = 3;
    let converted = convert_trigger(&t, Variant::V4, Variant::V3).expect("convert");
    assert_eq!(converted.value.parameter, 0);
    assert!(converted.dropped.contains(&FieldTag::TriggerParameter));
}

#[test]
fn test_trigger_target_beyond_capacity_cleared() {
    // Flight group 47 exists in the second generation but not the third (46).
    let t = Trigger::new(
        Condition::Destroyed,
        TargetRef::new(TargetKind::FlightGroup, 47),
        Amount::All,
    );
    let converted = convert_trigger(&t, Variant::V2, Variant::V3).expect("convert");
    assert_eq!(converted.value.target.kind, TargetKind::None);
    assert!(converted.dropped.contains(&FieldTag::TriggerTarget));
}

#[test]
fn test_order_waypoints_dropped_leaving_v4() {
    let mut order = Order::with_command(2);
    let mut table = vec![Waypoint::default(); 8];
    table[0] = Waypoint::new(10, 10, 0);
    order.waypoints = table;
    let converted = convert_order(&order, Variant::V4, Variant::V3).expect("convert");
    assert!(converted.value.waypoints.is_empty());
    assert!(converted.dropped.contains(&FieldTag::OrderWaypoints));
}

#[test]
fn test_designation_truncated_to_shorter_limit() {
    let mut order = Order::with_command(2);
    order.designation = "STRIKE LEAD".to_string(); // 11 chars, v3 keeps 7
    let converted = convert_order(&order, Variant::V4, Variant::V3).expect("convert");
    assert_eq!(converted.value.designation, "STRIKE ");
    assert!(converted.dropped.contains(&FieldTag::Designation));

    let converted = convert_order(&order, Variant::V4, Variant::V3).expect("convert");
    assert!(!converted.is_lossless());
}

#[test]
fn test_designation_dropped_entering_v2() {
    let mut order = Order::with_command(2);
    order.designation = "LEAD".to_string();
    let converted = convert_order(&order, Variant::V3, Variant::V2).expect("convert");
    assert!(converted.value.designation.is_empty());
    assert!(converted.dropped.contains(&FieldTag::Designation));
}

#[test]
fn test_goal_points_rescaled_between_quanta() {
    let mut g = Goal::default();
    g.condition = Condition::Destroyed;
    g.set_points(275).expect("points"); // 11 units of 25
    let converted = convert_goal(&g, Variant::V3, Variant::V4).expect("convert");
    // Snapped to the nearest multiple of 250.
    assert_eq!(converted.value.points(), 250);
    assert!(converted.is_lossless());
}

#[test]
fn test_goal_points_and_text_dropped_entering_v2() {
    let mut g = Goal::default();
    g.condition = Condition::Destroyed;
    g.set_points(500).expect("points");
    g.set_text(GoalText::Complete, "done");
    let converted = convert_goal(&g, Variant::V3, Variant::V2).expect("convert");
    assert_eq!(converted.value.points(), 0);
    assert_eq!(converted.value.text(GoalText::Complete), "");
    assert!(converted.dropped.contains(&FieldTag::GoalPoints));
    assert!(converted.dropped.contains(&FieldTag::GoalText));
}

#[test]
fn test_message_delay_snaps_to_destination_encoding() {
    let mut msg = Message::with_text("Go");
    msg.delay_seconds = 17; // exact in v4, snaps to a 5s tick in v3
    let converted = convert_message(&msg, Variant::V4, Variant::V3).expect("convert");
    assert_eq!(converted.value.delay_seconds, 15);
}

#[test]
fn test_message_extras_dropped_entering_v2() {
    let mut msg = Message::with_text("Fall back");
    msg.sent_to_teams = 0b101;
    msg.triggers[2] = Trigger::new(
        Condition::Destroyed,
        TargetRef::new(TargetKind::FlightGroup, 1),
        Amount::All,
    );
    let converted = convert_message(&msg, Variant::V3, Variant::V2).expect("convert");
    assert_eq!(converted.value.sent_to_teams, 1);
    assert_eq!(converted.value.triggers[2], Trigger::default());
    assert!(converted.dropped.contains(&FieldTag::MessageTeams));
    assert!(converted.dropped.contains(&FieldTag::MessageTriggers));
}

#[test]
fn test_message_color_without_digit_representation() {
    // Color 0 plus a text starting with a digit would decode as colored.
    let mut msg = Message::with_text("3 minutes left");
    msg.color = 0;
    let converted = convert_message(&msg, Variant::V3, Variant::V2).expect("convert");
    assert!(converted.dropped.contains(&FieldTag::MessageColor));
}

#[test]
fn test_loadout_dropped_entering_v1() {
    let mut fg = FlightGroup::named("Alpha");
    fg.craft_type = 3;
    fg.loadout.set_warhead(sortie::model::Warhead::Mine, true);
    let converted = convert_flight_group(&fg, Variant::V2, Variant::V1).expect("convert");
    assert!(converted.value.loadout.no_warheads());
    assert!(converted.dropped.contains(&FieldTag::Loadout));
}

#[test]
fn test_excess_waypoints_reported() {
    // 22 flight-group waypoint slots in v3, 4 in v4.
    let mut fg = FlightGroup::named("Alpha");
    fg.craft_type = 3;
    let mut table = vec![Waypoint::default(); 22];
    table[10] = Waypoint::new(7, 7, 7);
    fg.waypoints = table;
    let converted = convert_flight_group(&fg, Variant::V3, Variant::V4).expect("convert");
    assert_eq!(converted.value.waypoints.len(), 4);
    assert!(converted.dropped.contains(&FieldTag::ExcessWaypoints));
}

#[test]
fn test_excess_orders_reported() {
    let mut fg = FlightGroup::named("Alpha");
    fg.craft_type = 3;
    for c in 0..6 {
        fg.orders.push(Order::with_command(c));
    }
    let converted = convert_flight_group(&fg, Variant::V4, Variant::V3).expect("convert");
    assert_eq!(converted.value.orders.len(), 4);
    assert!(converted.dropped.contains(&FieldTag::ExcessOrders));
}

#[test]
fn test_mission_messages_dropped_entering_v1() {
    let mut mission = Mission::new(Variant::V2);
    mission.flight_groups[0] = FlightGroup::named("Alpha");
    mission.flight_groups[0].craft_type = 3;
    mission.messages.push(Message::with_text("Hello")).expect("push");
    let converted = convert_mission(&mission, Variant::V1).expect("convert");
    assert_eq!(converted.value.variant(), Variant::V1);
    assert!(converted.value.messages.is_empty());
    assert!(converted.dropped.contains(&FieldTag::Messages));
}

#[test]
fn test_mission_excess_flight_groups_reported() {
    let mut mission = Mission::new(Variant::V2);
    for i in 0..48 {
        if i > 0 {
            mission.flight_groups.add().expect("add");
        }
        mission.flight_groups[i] = FlightGroup::named(format!("FG {}", i));
        mission.flight_groups[i].craft_type = 3;
    }
    // 48 groups into a 46-slot format.
    let converted = convert_mission(&mission, Variant::V3).expect("convert");
    assert_eq!(converted.value.flight_groups.len(), 46);
    assert!(converted.dropped.contains(&FieldTag::ExcessFlightGroups));
}

#[test]
fn test_excess_briefing_events_reported_and_truncated() {
    let mut mission = Mission::new(Variant::V3);
    mission.flight_groups[0] = FlightGroup::named("Alpha");
    mission.flight_groups[0].craft_type = 3;
    // 150 four-short events: 600 stream shorts, past the destination's 400.
    mission.briefings[0].events = (0..150u16)
        .map(|i| BriefingEvent::new(i, EventKind::MoveMap, &[1, 2]))
        .collect();
    let converted = convert_mission(&mission, Variant::V2).expect("convert");
    assert!(converted.dropped.contains(&FieldTag::ExcessBriefingEvents));
    let briefing = &converted.value.briefings[0];
    assert!(briefing.stream_shorts() <= Variant::V2.caps().briefing_event_shorts);
    assert_eq!(briefing.events.len(), 99);

    // A stream that already fits converts without the tag.
    mission.briefings[0].events.truncate(10);
    let converted = convert_mission(&mission, Variant::V2).expect("convert");
    assert!(!converted.dropped.contains(&FieldTag::ExcessBriefingEvents));
    assert_eq!(converted.value.briefings[0].events.len(), 10);
}

#[test]
fn test_simple_mission_converts_losslessly() {
    let mut mission = Mission::new(Variant::V2);
    mission.summary = "Patrol".to_string();
    mission.flight_groups[0] = FlightGroup::named("Alpha");
    mission.flight_groups[0].craft_type = 3;
    mission.flight_groups[0].number_of_craft = 2;
    let converted = convert_mission(&mission, Variant::V3).expect("convert");
    assert!(converted.is_lossless(), "dropped: {:?}", converted.dropped);
    assert_eq!(converted.value.summary, "Patrol");
    assert_eq!(converted.value.flight_groups[0].name, "Alpha");
}
