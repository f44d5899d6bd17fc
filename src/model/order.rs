//! Behavioral orders assigned to flight groups.

use crate::model::{TargetRef, Trigger, Waypoint};

/// One order: a command, throttle, up to four conditional targets with two
/// AND/OR combinators, and variant-specific extras (free-text designation,
/// skip-to-next-order triggers, per-order waypoints).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Order {
    pub command: u8,
    /// Throttle in 10% steps, 0..=10.
    pub throttle: u8,
    pub targets: [TargetRef; 4],
    pub first_pair_and: bool,
    pub second_pair_and: bool,
    /// Free-text designation; only persisted by the third and fourth
    /// generations (8 and 16 bytes respectively).
    pub designation: String,
    /// Skip to the next order when these fire. Second generation onward.
    pub skip_triggers: [Trigger; 2],
    pub skip_and: bool,
    /// Per-order waypoints; last generation only.
    pub waypoints: Vec<Waypoint>,
}

impl Order {
    pub fn with_command(command: u8) -> Self {
        Order { command, ..Order::default() }
    }
}
