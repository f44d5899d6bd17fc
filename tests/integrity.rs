//! Reference rewriting across structural edits: removals clear and shift,
//! inserts shift up, swaps follow both slots, and every reference site is
//! covered (triggers, proximity parameters, motherships, goals, messages,
//! global goals).

use sortie::model::{
    Amount, Condition, FlightGroup, Message, Mission, TargetKind, TargetRef, Trigger,
};
use sortie::refs::{
    insert_flight_group, insert_message, remove_flight_group, remove_message, swap_flight_groups,
    swap_messages, transform_references, RefKind,
};
use sortie::variant::Variant;

fn fg_trigger(slot: u8) -> Trigger {
    Trigger::new(
        Condition::Destroyed,
        TargetRef::new(TargetKind::FlightGroup, slot),
        Amount::All,
    )
}

/// Mission with four flight groups where group 3 references group 1 from
/// every reference site the engine has to cover.
fn crossed_mission() -> Mission {
    let mut mission = Mission::new(Variant::V4);
    for i in 0..4 {
        if i > 0 {
            mission.flight_groups.add().expect("add");
        }
        mission.flight_groups[i] = FlightGroup::named(format!("FG {}", i));
    }
    let fg = &mut mission.flight_groups[3];
    fg.arrival[0] = fg_trigger(1);
    fg.departure[0] = Trigger::new(
        Condition::Attacked,
        TargetRef::new(TargetKind::NotFlightGroup, 1),
        Amount::All,
    );
    fg.arrival[1] = Trigger {
        condition: Condition::Proximity,
        target: TargetRef::new(TargetKind::FlightGroup, 2),
        amount: Amount::All,
        parameter: 2, // group 1, stored one-based
    };
    fg.arrival_mothership = Some(1);
    fg.departure_mothership = Some(2);
    let mut order = sortie::model::Order::with_command(1);
    order.targets[0] = TargetRef::new(TargetKind::FlightGroup, 1);
    order.skip_triggers[0] = fg_trigger(1);
    fg.orders.push(order);
    let mut goal = sortie::model::Goal::default();
    goal.condition = Condition::Destroyed;
    goal.target = TargetRef::new(TargetKind::FlightGroup, 1);
    fg.goals.push(goal);

    let mut msg = Message::with_text("Watch FG 1");
    msg.triggers[0] = fg_trigger(1);
    mission.messages.push(msg).expect("message");
    mission.globals[0].goals[0].target = TargetRef::new(TargetKind::FlightGroup, 1);
    mission
}

#[test]
fn test_transform_rewrites_all_sites() {
    let mut mission = crossed_mission();
    transform_references(&mut mission, RefKind::FlightGroup, 1, Some(9));
    let fg = &mission.flight_groups[3];
    assert_eq!(fg.arrival[0].target.value, 9);
    assert_eq!(fg.departure[0].target.value, 9);
    assert_eq!(fg.arrival_mothership, Some(9));
    assert_eq!(fg.departure_mothership, Some(2));
    assert_eq!(fg.orders[0].targets[0].value, 9);
    assert_eq!(fg.orders[0].skip_triggers[0].target.value, 9);
    assert_eq!(fg.goals[0].target.value, 9);
    assert_eq!(mission.messages[0].triggers[0].target.value, 9);
    assert_eq!(mission.globals[0].goals[0].target.value, 9);
    // Proximity parameter is one-based: group 1 is parameter 2.
    assert_eq!(fg.arrival[1].parameter, 10);
    // The trigger's own target pointed at group 2, untouched.
    assert_eq!(fg.arrival[1].target.value, 2);
}

#[test]
fn test_transform_clears_on_none() {
    let mut mission = crossed_mission();
    transform_references(&mut mission, RefKind::FlightGroup, 1, None);
    let fg = &mission.flight_groups[3];
    assert_eq!(fg.arrival[0].target.kind, TargetKind::None);
    assert_eq!(fg.arrival[0].target.value, 0);
    assert_eq!(fg.arrival_mothership, None);
    assert_eq!(fg.arrival[1].parameter, 0);
    assert_eq!(mission.messages[0].triggers[0].target.kind, TargetKind::None);
}

#[test]
fn test_remove_flight_group_clears_and_shifts() {
    let mut mission = crossed_mission();
    remove_flight_group(&mut mission, 1).expect("remove");
    assert_eq!(mission.flight_groups.len(), 3);
    assert_eq!(mission.flight_groups[1].name, "FG 2");
    let fg = &mission.flight_groups[2];
    // References to the removed group cleared.
    assert_eq!(fg.arrival[0].target.kind, TargetKind::None);
    assert_eq!(fg.arrival_mothership, None);
    assert_eq!(mission.globals[0].goals[0].target.kind, TargetKind::None);
    // References above it shifted down.
    assert_eq!(fg.departure_mothership, Some(1));
    assert_eq!(fg.arrival[1].target.value, 1);
}

#[test]
fn test_remove_rejects_bad_index() {
    let mut mission = crossed_mission();
    assert!(remove_flight_group(&mut mission, 7).is_err());
    // Nothing was rewritten.
    assert_eq!(mission.flight_groups[3].arrival[0].target.value, 1);
}

#[test]
fn test_insert_flight_group_shifts_up() {
    let mut mission = crossed_mission();
    insert_flight_group(&mut mission, 1, FlightGroup::named("New")).expect("insert");
    assert_eq!(mission.flight_groups.len(), 5);
    assert_eq!(mission.flight_groups[1].name, "New");
    let fg = &mission.flight_groups[4];
    assert_eq!(fg.arrival[0].target.value, 2);
    assert_eq!(fg.arrival_mothership, Some(2));
    assert_eq!(fg.departure_mothership, Some(3));
    assert_eq!(fg.arrival[1].target.value, 3);
    assert_eq!(fg.arrival[1].parameter, 3);
    // Inserting at the end shifts nothing.
    let before = mission.flight_groups[4].arrival[0].target.value;
    insert_flight_group(&mut mission, 5, FlightGroup::named("Tail")).expect("tail");
    assert_eq!(mission.flight_groups[4].arrival[0].target.value, before);
}

#[test]
fn test_swap_flight_groups_follows_both() {
    let mut mission = crossed_mission();
    swap_flight_groups(&mut mission, 1, 2);
    assert_eq!(mission.flight_groups[1].name, "FG 2");
    assert_eq!(mission.flight_groups[2].name, "FG 1");
    let fg = &mission.flight_groups[3];
    // References to 1 now point at 2 and vice versa.
    assert_eq!(fg.arrival[0].target.value, 2);
    assert_eq!(fg.arrival[1].target.value, 1);
    assert_eq!(fg.arrival_mothership, Some(2));
    assert_eq!(fg.departure_mothership, Some(1));
    assert_eq!(fg.arrival[1].parameter, 3);
}

#[test]
fn test_swap_twice_restores() {
    let original = crossed_mission();
    let mut mission = original.clone();
    swap_flight_groups(&mut mission, 1, 2);
    swap_flight_groups(&mut mission, 1, 2);
    assert_eq!(mission, original);
}

#[test]
fn test_remove_at_min_count_resets_slot() {
    let mut mission = Mission::new(Variant::V2);
    mission.flight_groups[0] = FlightGroup::named("Only");
    remove_flight_group(&mut mission, 0).expect("remove");
    // The collection keeps its one required slot, re-initialized.
    assert_eq!(mission.flight_groups.len(), 1);
    assert_eq!(mission.flight_groups[0].name, "");
}

fn message_mission() -> Mission {
    let mut mission = Mission::new(Variant::V4);
    for text in ["one", "two", "three"] {
        mission.messages.push(Message::with_text(text)).expect("push");
    }
    // A trigger watching message slot 1.
    mission.flight_groups[0].arrival[0] = Trigger::new(
        Condition::ComeAndGo,
        TargetRef::new(TargetKind::Message, 1),
        Amount::All,
    );
    mission
}

#[test]
fn test_remove_message_rewrites_watchers() {
    let mut mission = message_mission();
    remove_message(&mut mission, 0).expect("remove");
    assert_eq!(mission.messages.len(), 2);
    assert_eq!(mission.messages[0].text, "two");
    // The watcher followed its message down one slot.
    assert_eq!(mission.flight_groups[0].arrival[0].target.value, 0);

    remove_message(&mut mission, 0).expect("remove watched");
    assert_eq!(mission.flight_groups[0].arrival[0].target.kind, TargetKind::None);
}

#[test]
fn test_insert_message_shifts_watchers() {
    let mut mission = message_mission();
    insert_message(&mut mission, 0, Message::with_text("urgent")).expect("insert");
    assert_eq!(mission.messages[0].text, "urgent");
    assert_eq!(mission.flight_groups[0].arrival[0].target.value, 2);
}

#[test]
fn test_swap_messages_follows_slot() {
    let mut mission = message_mission();
    swap_messages(&mut mission, 1, 2);
    assert_eq!(mission.messages[1].text, "three");
    assert_eq!(mission.flight_groups[0].arrival[0].target.value, 2);
}

#[test]
fn test_flight_group_pass_leaves_messages_alone() {
    let mut mission = message_mission();
    // Message slot 1 and flight group slot 1 are unrelated namespaces.
    transform_references(&mut mission, RefKind::FlightGroup, 1, Some(5));
    assert_eq!(mission.flight_groups[0].arrival[0].target.value, 1);
}
