//! Condition triggers and the target-category/target-value shape shared by
//! triggers, orders, and goals.

use crate::model::FieldError;
use crate::variant::Variant;

/// Condition code. Codes above a format's `condition_max` do not exist there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Condition {
    #[default]
    Always = 0,
    Arrived = 1,
    Destroyed = 2,
    Attacked = 3,
    Captured = 4,
    Inspected = 5,
    Boarded = 6,
    Docked = 7,
    Disabled = 8,
    Survived = 9,
    Never = 10,
    CompletedMission = 11,
    CompletedPrimary = 12,
    FailedPrimary = 13,
    CompletedSecondary = 14,
    FailedSecondary = 15,
    CompletedBonus = 16,
    FailedBonus = 17,
    DroppedOff = 18,
    Reinforced = 19,
    ShieldsDown = 20,
    HullDamaged = 21,
    OutOfWarheads = 22,
    CannonsDisabled = 23,
    Defected = 24,
    ComeAndGo = 25,
    Bagged = 26,
    Withdrawn = 27,
    CarriedAway = 28,
    Proximity = 29,
    NotProximity = 30,
    InRegion = 31,
}

impl Condition {
    pub fn from_raw(raw: u8) -> Option<Condition> {
        use Condition::*;
        let c = match raw {
            0 => Always,
            1 => Arrived,
            2 => Destroyed,
            3 => Attacked,
            4 => Captured,
            5 => Inspected,
            6 => Boarded,
            7 => Docked,
            8 => Disabled,
            9 => Survived,
            10 => Never,
            11 => CompletedMission,
            12 => CompletedPrimary,
            13 => FailedPrimary,
            14 => CompletedSecondary,
            15 => FailedSecondary,
            16 => CompletedBonus,
            17 => FailedBonus,
            18 => DroppedOff,
            19 => Reinforced,
            20 => ShieldsDown,
            21 => HullDamaged,
            22 => OutOfWarheads,
            23 => CannonsDisabled,
            24 => Defected,
            25 => ComeAndGo,
            26 => Bagged,
            27 => Withdrawn,
            28 => CarriedAway,
            29 => Proximity,
            30 => NotProximity,
            31 => InRegion,
            _ => return None,
        };
        Some(c)
    }

    pub fn raw(self) -> u8 {
        self as u8
    }

    /// Conditions whose auxiliary parameter holds a flight-group index + 1.
    pub fn parameter_is_flight_group(self) -> bool {
        matches!(self, Condition::Proximity | Condition::NotProximity)
    }

    /// Conditions whose auxiliary parameter holds a region index.
    pub fn parameter_is_region(self) -> bool {
        self == Condition::InRegion
    }
}

/// Target category ("variable type") of a trigger, order target, or goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TargetKind {
    #[default]
    None = 0,
    FlightGroup = 1,
    CraftType = 2,
    CraftCategory = 3,
    ObjectCategory = 4,
    Iff = 5,
    GlobalGroup = 6,
    NotFlightGroup = 7,
    /// In-flight message slot; only valid in formats that carry messages.
    Message = 8,
}

impl TargetKind {
    pub fn from_raw(raw: u8) -> Option<TargetKind> {
        use TargetKind::*;
        let k = match raw {
            0 => None,
            1 => FlightGroup,
            2 => CraftType,
            3 => CraftCategory,
            4 => ObjectCategory,
            5 => Iff,
            6 => GlobalGroup,
            7 => NotFlightGroup,
            8 => Message,
            _ => return Option::None,
        };
        Some(k)
    }

    pub fn raw(self) -> u8 {
        self as u8
    }

    pub fn references_flight_group(self) -> bool {
        matches!(self, TargetKind::FlightGroup | TargetKind::NotFlightGroup)
    }
}

/// Quantity/amount enumerant qualifying how many of the target must satisfy
/// the condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Amount {
    #[default]
    All = 0,
    Half = 1,
    AtLeastOne = 2,
    AllButOne = 3,
    SpecialCraft = 4,
    AllNonSpecial = 5,
    AllNonPlayer = 6,
    PlayerCraft = 7,
}

impl Amount {
    pub const MAX_RAW: u8 = 7;

    pub fn from_raw(raw: u8) -> Option<Amount> {
        use Amount::*;
        let a = match raw {
            0 => All,
            1 => Half,
            2 => AtLeastOne,
            3 => AllButOne,
            4 => SpecialCraft,
            5 => AllNonSpecial,
            6 => AllNonPlayer,
            7 => PlayerCraft,
            _ => return None,
        };
        Some(a)
    }

    pub fn raw(self) -> u8 {
        self as u8
    }
}

/// The (category, value) pair shared by triggers, order targets, and goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetRef {
    pub kind: TargetKind,
    pub value: u8,
}

impl TargetRef {
    pub fn new(kind: TargetKind, value: u8) -> Self {
        TargetRef { kind, value }
    }

    /// Construct and validate against `variant` in one step.
    pub fn checked(kind: TargetKind, value: u8, variant: Variant) -> Result<Self, FieldError> {
        let t = TargetRef { kind, value };
        t.validate(variant)?;
        Ok(t)
    }

    /// Clear to the "no target" sentinel.
    pub fn clear(&mut self) {
        self.kind = TargetKind::None;
        self.value = 0;
    }

    /// The pairing (category, value) must fall within the category's valid
    /// sub-range for `variant`.
    pub fn validate(&self, variant: Variant) -> Result<(), FieldError> {
        let caps = variant.caps();
        let ok = match self.kind {
            TargetKind::None => true,
            TargetKind::FlightGroup | TargetKind::NotFlightGroup => {
                (self.value as usize) < caps.flight_groups
            }
            // The first generation reserves craft-type value 0 for "none",
            // so its values run one higher than the craft index.
            TargetKind::CraftType => match variant {
                Variant::V1 => self.value <= caps.craft_types,
                _ => self.value < caps.craft_types,
            },
            TargetKind::CraftCategory | TargetKind::ObjectCategory => self.value < 8,
            TargetKind::Iff => self.value < 10,
            TargetKind::GlobalGroup => self.value < 16,
            TargetKind::Message => {
                if caps.messages == 0 {
                    return Err(FieldError::UnsupportedKind { kind: self.kind, variant });
                }
                (self.value as usize) < caps.messages
            }
        };
        if ok {
            Ok(())
        } else {
            Err(FieldError::InvalidTarget { kind: self.kind, value: self.value })
        }
    }
}

/// A condition expression used by arrivals, departures, orders, goals, and
/// messages. `parameter` exists on disk only in the last generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Trigger {
    pub condition: Condition,
    pub target: TargetRef,
    pub amount: Amount,
    /// Region index or flight-group index + 1, depending on `condition`.
    pub parameter: i16,
}

impl Trigger {
    pub fn new(condition: Condition, target: TargetRef, amount: Amount) -> Self {
        Trigger { condition, target, amount, parameter: 0 }
    }

    /// Validate condition code and target pairing against `variant`.
    pub fn validate(&self, variant: Variant) -> Result<(), FieldError> {
        let caps = variant.caps();
        if self.condition.raw() > caps.condition_max {
            return Err(FieldError::OutOfRange {
                field: "trigger condition",
                value: self.condition.raw() as i32,
                max: caps.condition_max as i32,
            });
        }
        self.target.validate(variant)?;
        if self.condition.parameter_is_region() && !(0..=3).contains(&self.parameter) {
            return Err(FieldError::OutOfRange {
                field: "trigger region parameter",
                value: self.parameter as i32,
                max: 3,
            });
        }
        if self.condition.parameter_is_flight_group() {
            let max = caps.flight_groups as i16;
            if !(0..=max).contains(&self.parameter) {
                return Err(FieldError::OutOfRange {
                    field: "trigger proximity parameter",
                    value: self.parameter as i32,
                    max: max as i32,
                });
            }
        }
        Ok(())
    }

    /// Reset to the inert "always / no target" trigger.
    pub fn clear(&mut self) {
        *self = Trigger::default();
    }
}

/// AND/OR combinators for a block of up to four triggers: how the first pair,
/// the second pair, and the two pair results combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerCombine {
    pub first_pair_and: bool,
    pub second_pair_and: bool,
    pub pairs_and: bool,
}
