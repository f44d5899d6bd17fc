//! Decoded in-memory representation of one mission.
//!
//! Plain structured records with accessors enforcing field-level invariants.
//! Validation failures surface as [`FieldError`] at entity construction or
//! validation time, naming the offending field, rather than deep inside a
//! generic decode loop.

mod briefing;
mod flight_group;
mod goal;
mod loadout;
mod message;
mod mission;
mod order;
mod team;
mod trigger;
mod waypoint;

pub use briefing::{Briefing, BriefingEvent, EventKind};
pub use flight_group::{FlightGroup, UnitTag};
pub use goal::{Goal, GoalArgument, GoalText};
pub use loadout::{Beam, Countermeasure, OptLoadout, Warhead};
pub use message::Message;
pub use mission::Mission;
pub use order::Order;
pub use team::{GlobalGoals, Team};
pub use trigger::{Amount, Condition, TargetKind, TargetRef, Trigger, TriggerCombine};
pub use waypoint::Waypoint;

use crate::variant::Variant;

/// A decoded or user-supplied value violates a documented invariant.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} out of range: {value} (max {max})")]
    OutOfRange { field: &'static str, value: i32, max: i32 },
    #[error("target {value} invalid for category {kind:?}")]
    InvalidTarget { kind: TargetKind, value: u8 },
    #[error("target category {kind:?} not available in format {variant}")]
    UnsupportedKind { kind: TargetKind, variant: Variant },
}
