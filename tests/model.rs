//! Model and collection invariants: bounded collections, loadout bit packing,
//! target/trigger validation, goal text rules.

use sortie::collection::{BoundedCollection, CollectionError};
use sortie::model::{
    Beam, FieldError, FlightGroup, Goal, GoalArgument, GoalText, Mission, OptLoadout, TargetKind,
    TargetRef, Trigger, Warhead, Waypoint,
};
use sortie::variant::Variant;

#[test]
fn test_collection_capacity() {
    let mut c: BoundedCollection<u32> = BoundedCollection::new(3, 0);
    assert!(c.is_empty());
    c.push(1).expect("push");
    c.push(2).expect("push");
    c.push(3).expect("push");
    assert!(c.is_full());
    assert_eq!(c.push(4), Err(CollectionError::Full(3)));
    assert_eq!(c.len(), 3);
}

#[test]
fn test_collection_min_count_reinitializes() {
    let mut c: BoundedCollection<u32> = BoundedCollection::new(4, 1);
    assert_eq!(c.len(), 1);
    c[0] = 99;
    // At the minimum, removal resets the slot instead of shrinking.
    c.remove_at(0).expect("remove");
    assert_eq!(c.len(), 1);
    assert_eq!(c[0], 0);
}

#[test]
fn test_collection_remove_shifts() {
    let mut c: BoundedCollection<u32> = BoundedCollection::new(4, 0);
    for v in [10, 20, 30] {
        c.push(v).expect("push");
    }
    c.remove_at(1).expect("remove");
    assert_eq!(c.as_slice(), &[10, 30]);
    assert_eq!(
        c.remove_at(5),
        Err(CollectionError::OutOfBounds { index: 5, len: 2 })
    );
}

#[test]
fn test_collection_set_count() {
    let mut c: BoundedCollection<u32> = BoundedCollection::new(4, 1);
    c.set_count(3, false).expect("grow");
    assert_eq!(c.len(), 3);
    assert_eq!(c.set_count(2, false), Err(CollectionError::WouldTruncate));
    c.set_count(2, true).expect("shrink");
    assert_eq!(c.set_count(5, true), Err(CollectionError::Full(4)));
    assert_eq!(c.set_count(0, true), Err(CollectionError::Empty));
}

#[test]
fn test_collection_insert_and_swap() {
    let mut c: BoundedCollection<u32> = BoundedCollection::new(4, 0);
    c.push(1).expect("push");
    c.push(3).expect("push");
    c.insert(1, 2).expect("insert");
    assert_eq!(c.as_slice(), &[1, 2, 3]);
    c.swap(0, 2);
    assert_eq!(c.as_slice(), &[3, 2, 1]);
}

#[test]
fn test_loadout_none_is_derived() {
    let mut l = OptLoadout::new();
    assert!(l.no_warheads());
    // Raw byte: bit 0 is the none flag when no specific flag is set.
    assert_eq!(l.warheads_raw(), 0x01);
    l.set_warhead(Warhead::Torpedo, true);
    assert!(!l.no_warheads());
    assert_ne!(l.warheads_raw() & !1, 0);
    assert_eq!(l.warheads_raw() & 1, 0);
}

#[test]
fn test_loadout_set_none_clears_family() {
    let mut l = OptLoadout::new();
    l.set_beam(Beam::Tractor, true);
    assert!(!l.no_beams());
    // Selecting "none" wipes the family; deselecting it is a no-op.
    l.set_beam(Beam::None, true);
    assert!(l.no_beams());
    assert!(!l.beam(Beam::Tractor));
    l.set_beam(Beam::None, false);
    assert!(l.no_beams());
}

#[test]
fn test_loadout_raw_roundtrip_ignores_stored_none_bit() {
    let mut l = OptLoadout::new();
    // A legacy file may carry both the none bit and a specific flag; the
    // stored none bit is discarded and re-derived.
    l.set_warheads_raw(0b0000_0101);
    assert!(!l.no_warheads());
    assert_eq!(l.warheads_raw(), 0b0000_0100);
}

#[test]
fn test_target_message_kind_needs_messages() {
    let t = TargetRef::new(TargetKind::Message, 0);
    match t.validate(Variant::V1) {
        Err(FieldError::UnsupportedKind { kind, variant }) => {
            assert_eq!(kind, TargetKind::Message);
            assert_eq!(variant, Variant::V1);
        }
        other => panic!("expected UnsupportedKind, got {:?}", other),
    }
    t.validate(Variant::V4).expect("message target valid in v4");
    // Any format with messages accepts the category, not just the last one.
    t.validate(Variant::V2).expect("message target valid in v2");
}

#[test]
fn test_target_flight_group_bounds() {
    let t = TargetRef::new(TargetKind::FlightGroup, 47);
    t.validate(Variant::V2).expect("47 < 48");
    assert!(t.validate(Variant::V3).is_err());
}

#[test]
fn test_craft_type_target_reserved_zero() {
    // The first generation reserves value 0, so its range runs one higher.
    let t = TargetRef::new(TargetKind::CraftType, 18);
    t.validate(Variant::V1).expect("18 valid in v1");
    let t = TargetRef::new(TargetKind::CraftType, 88);
    assert!(t.validate(Variant::V2).is_err());
}

#[test]
fn test_trigger_condition_max_per_variant() {
    let t = Trigger::new(
        sortie::model::Condition::ShieldsDown,
        TargetRef::new(TargetKind::FlightGroup, 0),
        sortie::model::Amount::All,
    );
    assert!(t.validate(Variant::V1).is_err());
    t.validate(Variant::V3).expect("code 20 valid in v3");
}

#[test]
fn test_trigger_region_parameter_range() {
    let mut t = Trigger::default();
    t.condition = sortie::model::Condition::InRegion;
    t.parameter = 3;
    t.validate(Variant::V4).expect("region 3");
    t.parameter = 4;
    assert!(t.validate(Variant::V4).is_err());
}

#[test]
fn test_goal_failed_text_inapplicable_for_prevent_goals() {
    let mut g = Goal::default();
    g.argument = GoalArgument::MustNot;
    g.set_text(GoalText::Failed, "never shown");
    assert_eq!(g.text(GoalText::Failed), "");
    g.set_text(GoalText::Complete, "prevented");
    assert_eq!(g.text(GoalText::Complete), "prevented");
}

#[test]
fn test_goal_points_range() {
    let mut g = Goal::default();
    g.set_points(31750).expect("max");
    g.set_points(-32000).expect("min");
    assert!(g.set_points(31751).is_err());
}

#[test]
fn test_waypoint_region_range() {
    let mut wp = Waypoint::new(1, 2, 3);
    wp.set_region(3).expect("region 3");
    assert!(wp.set_region(4).is_err());
    assert_eq!(wp.region(), 3);
}

#[test]
fn test_variant_signatures() {
    for v in Variant::ALL {
        assert_eq!(Variant::from_signature(v.signature()), Some(v));
    }
    assert_eq!(Variant::from_signature(0x7777), None);
}

#[test]
fn test_variant_neighbors() {
    assert!(Variant::V1.is_neighbor(Variant::V2));
    assert!(Variant::V3.is_neighbor(Variant::V2));
    assert!(!Variant::V1.is_neighbor(Variant::V3));
    assert!(!Variant::V2.is_neighbor(Variant::V2));
}

#[test]
fn test_variant_parse() {
    assert_eq!(Variant::parse("v2"), Some(Variant::V2));
    assert_eq!(Variant::parse("4"), Some(Variant::V4));
    assert_eq!(Variant::parse("V3"), Some(Variant::V3));
    assert_eq!(Variant::parse("v5"), None);
}

#[test]
fn test_new_mission_seeds_fixed_blocks() {
    let mission = Mission::new(Variant::V3);
    assert_eq!(mission.flight_groups.len(), 1);
    assert_eq!(mission.teams.len(), 10);
    assert_eq!(mission.teams[0].name, "Team 1");
    // Each seeded team starts allied with itself.
    assert!(mission.teams[2].allied[2]);
    assert!(!mission.teams[2].allied[3]);
    assert_eq!(mission.globals.len(), 10);
    assert_eq!(mission.briefings.len(), 8);
}

#[test]
fn test_default_flight_group_is_one_based() {
    let fg = FlightGroup::default();
    assert_eq!(fg.number_of_craft, 1);
    assert_eq!(fg.waves, 1);
}
