//! Scored goals: a trigger shape plus argument, points, and status strings.

use crate::model::{Amount, Condition, FieldError, TargetRef};

/// How the goal binds to the mission outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum GoalArgument {
    #[default]
    Must = 0,
    MustNot = 1,
    BonusMust = 2,
    BonusMustNot = 3,
}

impl GoalArgument {
    pub fn from_raw(raw: u8) -> Option<GoalArgument> {
        match raw {
            0 => Some(GoalArgument::Must),
            1 => Some(GoalArgument::MustNot),
            2 => Some(GoalArgument::BonusMust),
            3 => Some(GoalArgument::BonusMustNot),
            _ => None,
        }
    }

    pub fn raw(self) -> u8 {
        self as u8
    }
}

/// The three per-goal status string slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalText {
    Incomplete,
    Complete,
    Failed,
}

/// One flight-group or global goal. Points are stored on disk as a signed byte
/// of quantum units (25 or 250 depending on the format); the model keeps the
/// actual point value and the codec applies the quantum.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Goal {
    pub condition: Condition,
    pub target: TargetRef,
    pub amount: Amount,
    pub argument: GoalArgument,
    points: i16,
    texts: [String; 3],
}

impl Goal {
    /// Widest representable points range across formats (quantum 250).
    pub const POINTS_MIN: i16 = -32000;
    pub const POINTS_MAX: i16 = 31750;

    pub fn points(&self) -> i16 {
        self.points
    }

    pub fn set_points(&mut self, points: i16) -> Result<(), FieldError> {
        if !(Self::POINTS_MIN..=Self::POINTS_MAX).contains(&points) {
            return Err(FieldError::OutOfRange {
                field: "goal points",
                value: points as i32,
                max: Self::POINTS_MAX as i32,
            });
        }
        self.points = points;
        Ok(())
    }

    /// "Failed" text is meaningless for prevent goals; the slot stays empty.
    pub fn text_applies(&self, slot: GoalText) -> bool {
        match slot {
            GoalText::Failed => !matches!(
                self.argument,
                GoalArgument::MustNot | GoalArgument::BonusMustNot
            ),
            _ => true,
        }
    }

    pub fn text(&self, slot: GoalText) -> &str {
        &self.texts[Self::slot_index(slot)]
    }

    /// Setting text on an inapplicable slot is silently ignored; the codec
    /// always writes an empty buffer for such slots.
    pub fn set_text(&mut self, slot: GoalText, text: impl Into<String>) {
        if self.text_applies(slot) {
            self.texts[Self::slot_index(slot)] = text.into();
        }
    }

    fn slot_index(slot: GoalText) -> usize {
        match slot {
            GoalText::Incomplete => 0,
            GoalText::Complete => 1,
            GoalText::Failed => 2,
        }
    }
}
