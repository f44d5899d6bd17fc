//! Referential integrity across structural edits.
//!
//! Cross-entity references are weak slot indices: a trigger targeting flight
//! group 7 means "slot 7 of the mission's flight-group collection", nothing
//! more. Removing, inserting, or swapping slots therefore has to rewrite every
//! reference in the mission or the file silently retargets. The primitive here
//! is [`transform_references`]; the composed operations validate their index
//! first and run a complete reference pass before touching the collection.
//! The reference pass itself is total and cannot fail.
//!
//! Reference sites for a flight group: trigger targets of the group/not-group
//! categories in arrivals, departures, order targets, order skip triggers,
//! flight-group goals, message triggers, and global goals; proximity trigger
//! parameters (which store the group index plus one); and arrival/departure
//! mothership slots. For a message: trigger targets of the message category.

use crate::collection::CollectionError;
use crate::model::{FlightGroup, Message, Mission, TargetKind, TargetRef, Trigger};

/// Which entity collection the reference indices point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    FlightGroup,
    Message,
}

/// Rewrite every in-scope index equal to `src`: to `dst`, or with `dst`
/// `None` clear the referencing field to its sentinel (target category reset,
/// mothership cleared, proximity parameter zeroed).
pub fn transform_references(mission: &mut Mission, kind: RefKind, src: u16, dst: Option<u16>) {
    match kind {
        RefKind::FlightGroup => transform_flight_group_refs(mission, src, dst),
        RefKind::Message => transform_message_refs(mission, src, dst),
    }
}

fn retarget(t: &mut TargetRef, matches: fn(TargetKind) -> bool, src: u16, dst: Option<u16>) {
    if matches(t.kind) && t.value as u16 == src {
        match dst {
            Some(d) => t.value = d as u8,
            None => t.clear(),
        }
    }
}

fn transform_trigger_fg(t: &mut Trigger, src: u16, dst: Option<u16>) {
    retarget(&mut t.target, TargetKind::references_flight_group, src, dst);
    // Proximity parameters store the group index plus one; zero means unset.
    if t.condition.parameter_is_flight_group() && t.parameter == src as i16 + 1 {
        t.parameter = match dst {
            Some(d) => d as i16 + 1,
            None => 0,
        };
    }
}

fn transform_mothership(slot: &mut Option<u8>, src: u16, dst: Option<u16>) {
    if *slot == Some(src as u8) {
        *slot = dst.map(|d| d as u8);
    }
}

fn transform_flight_group_refs(mission: &mut Mission, src: u16, dst: Option<u16>) {
    for fg in mission.flight_groups.iter_mut() {
        for t in fg.arrival.iter_mut() {
            transform_trigger_fg(t, src, dst);
        }
        for t in fg.departure.iter_mut() {
            transform_trigger_fg(t, src, dst);
        }
        transform_mothership(&mut fg.arrival_mothership, src, dst);
        transform_mothership(&mut fg.departure_mothership, src, dst);
        for order in fg.orders.iter_mut() {
            for t in order.targets.iter_mut() {
                retarget(t, TargetKind::references_flight_group, src, dst);
            }
            for t in order.skip_triggers.iter_mut() {
                transform_trigger_fg(t, src, dst);
            }
        }
        for goal in fg.goals.iter_mut() {
            retarget(&mut goal.target, TargetKind::references_flight_group, src, dst);
        }
    }
    for msg in mission.messages.iter_mut() {
        for t in msg.triggers.iter_mut() {
            transform_trigger_fg(t, src, dst);
        }
    }
    for set in mission.globals.iter_mut() {
        for goal in set.goals.iter_mut() {
            retarget(&mut goal.target, TargetKind::references_flight_group, src, dst);
        }
    }
}

fn transform_message_refs(mission: &mut Mission, src: u16, dst: Option<u16>) {
    let is_message = |k: TargetKind| k == TargetKind::Message;
    for fg in mission.flight_groups.iter_mut() {
        for t in fg.arrival.iter_mut() {
            retarget(&mut t.target, is_message, src, dst);
        }
        for t in fg.departure.iter_mut() {
            retarget(&mut t.target, is_message, src, dst);
        }
        for order in fg.orders.iter_mut() {
            for t in order.targets.iter_mut() {
                retarget(t, is_message, src, dst);
            }
            for t in order.skip_triggers.iter_mut() {
                retarget(&mut t.target, is_message, src, dst);
            }
        }
        for goal in fg.goals.iter_mut() {
            retarget(&mut goal.target, is_message, src, dst);
        }
    }
    for msg in mission.messages.iter_mut() {
        for t in msg.triggers.iter_mut() {
            retarget(&mut t.target, is_message, src, dst);
        }
    }
    for set in mission.globals.iter_mut() {
        for goal in set.goals.iter_mut() {
            retarget(&mut goal.target, is_message, src, dst);
        }
    }
}

/// Out-of-range slot used as the intermediate of a swap remap. Reference
/// values are stored in single bytes, so the sentinel must survive a byte
/// round trip; 255 works because every collection caps out far below it.
const SWAP_SENTINEL: u16 = u8::MAX as u16;

/// Remove slot `index`: references to it are cleared, references above it
/// shift down one, then the slot leaves the collection.
pub fn remove_flight_group(mission: &mut Mission, index: usize) -> Result<(), CollectionError> {
    if index >= mission.flight_groups.len() {
        return Err(CollectionError::OutOfBounds {
            index,
            len: mission.flight_groups.len(),
        });
    }
    transform_references(mission, RefKind::FlightGroup, index as u16, None);
    // Ascending order: each shifted index lands on a slot already vacated.
    for i in index + 1..mission.flight_groups.len() {
        transform_references(mission, RefKind::FlightGroup, i as u16, Some(i as u16 - 1));
    }
    mission.flight_groups.remove_at(index)?;
    Ok(())
}

/// Insert `fg` at slot `index`; references at or above the slot shift up one.
pub fn insert_flight_group(
    mission: &mut Mission,
    index: usize,
    fg: FlightGroup,
) -> Result<(), CollectionError> {
    if mission.flight_groups.is_full() {
        return Err(CollectionError::Full(mission.flight_groups.capacity()));
    }
    // Descending order so a shift never collides with the next source.
    for i in (index..mission.flight_groups.len()).rev() {
        transform_references(mission, RefKind::FlightGroup, i as u16, Some(i as u16 + 1));
    }
    mission.flight_groups.insert(index, fg)?;
    Ok(())
}

/// Exchange slots `a` and `b`, remapping references through an out-of-range
/// sentinel so the two rewrites cannot feed each other.
pub fn swap_flight_groups(mission: &mut Mission, a: usize, b: usize) {
    if a == b || a >= mission.flight_groups.len() || b >= mission.flight_groups.len() {
        return;
    }
    transform_references(mission, RefKind::FlightGroup, a as u16, Some(SWAP_SENTINEL));
    transform_references(mission, RefKind::FlightGroup, b as u16, Some(a as u16));
    transform_references(mission, RefKind::FlightGroup, SWAP_SENTINEL, Some(b as u16));
    mission.flight_groups.swap(a, b);
}

pub fn remove_message(mission: &mut Mission, index: usize) -> Result<(), CollectionError> {
    if index >= mission.messages.len() {
        return Err(CollectionError::OutOfBounds {
            index,
            len: mission.messages.len(),
        });
    }
    transform_references(mission, RefKind::Message, index as u16, None);
    for i in index + 1..mission.messages.len() {
        transform_references(mission, RefKind::Message, i as u16, Some(i as u16 - 1));
    }
    mission.messages.remove_at(index)?;
    Ok(())
}

pub fn insert_message(
    mission: &mut Mission,
    index: usize,
    msg: Message,
) -> Result<(), CollectionError> {
    if mission.messages.is_full() {
        return Err(CollectionError::Full(mission.messages.capacity()));
    }
    for i in (index..mission.messages.len()).rev() {
        transform_references(mission, RefKind::Message, i as u16, Some(i as u16 + 1));
    }
    mission.messages.insert(index, msg)?;
    Ok(())
}

pub fn swap_messages(mission: &mut Mission, a: usize, b: usize) {
    if a == b || a >= mission.messages.len() || b >= mission.messages.len() {
        return;
    }
    transform_references(mission, RefKind::Message, a as u16, Some(SWAP_SENTINEL));
    transform_references(mission, RefKind::Message, b as u16, Some(a as u16));
    transform_references(mission, RefKind::Message, SWAP_SENTINEL, Some(b as u16));
    mission.messages.swap(a, b);
}
