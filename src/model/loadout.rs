//! Optional-loadout bitset: three flag families (warheads, beams,
//! countermeasures), each with a synthetic "none of this family" flag.
//!
//! The backing store holds only the specific flags; the "none" flag is derived
//! (true iff the family mask is empty), so the mutual-exclusion invariant holds
//! after every mutation and the backing storage is never exposed.

/// Warhead family flags. `None` is the synthetic empty-family flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warhead {
    None,
    LightMissile,
    HeavyMissile,
    Torpedo,
    HeavyRocket,
    Bomb,
    Mine,
    Probe,
}

impl Warhead {
    /// Bit within the specific-flag mask; `None` has no bit.
    fn bit(self) -> Option<u8> {
        match self {
            Warhead::None => None,
            Warhead::LightMissile => Some(0),
            Warhead::HeavyMissile => Some(1),
            Warhead::Torpedo => Some(2),
            Warhead::HeavyRocket => Some(3),
            Warhead::Bomb => Some(4),
            Warhead::Mine => Some(5),
            Warhead::Probe => Some(6),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beam {
    None,
    Tractor,
    Jamming,
    Decoy,
}

impl Beam {
    fn bit(self) -> Option<u8> {
        match self {
            Beam::None => None,
            Beam::Tractor => Some(0),
            Beam::Jamming => Some(1),
            Beam::Decoy => Some(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countermeasure {
    None,
    Chaff,
    Flare,
    ClusterMine,
}

impl Countermeasure {
    fn bit(self) -> Option<u8> {
        match self {
            Countermeasure::None => None,
            Countermeasure::Chaff => Some(0),
            Countermeasure::Flare => Some(1),
            Countermeasure::ClusterMine => Some(2),
        }
    }
}

/// Per-flight-group optional loadout. On disk each family is one byte with
/// bit 0 as the synthetic "none" flag and specific flags from bit 1 up; the
/// stored none bit is ignored on decode and re-derived on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptLoadout {
    warheads: u8,
    beams: u8,
    countermeasures: u8,
}

macro_rules! family_api {
    ($set:ident, $get:ident, $none:ident, $raw:ident, $from_raw:ident, $field:ident, $flag:ty) => {
        /// Set or clear one flag. Setting the family's `None` flag clears all
        /// specific flags; clearing `None` directly is a no-op (it only clears
        /// by setting a specific flag).
        pub fn $set(&mut self, flag: $flag, state: bool) {
            match flag.bit() {
                Some(bit) => {
                    if state {
                        self.$field |= 1 << bit;
                    } else {
                        self.$field &= !(1 << bit);
                    }
                }
                None => {
                    if state {
                        self.$field = 0;
                    }
                }
            }
        }

        pub fn $get(&self, flag: $flag) -> bool {
            match flag.bit() {
                Some(bit) => self.$field & (1 << bit) != 0,
                None => self.$field == 0,
            }
        }

        /// True iff no specific flag in this family is set.
        pub fn $none(&self) -> bool {
            self.$field == 0
        }

        /// Disk byte: bit 0 = derived none flag, specific flags shifted up.
        pub fn $raw(&self) -> u8 {
            (self.$field << 1) | (self.$field == 0) as u8
        }

        /// Rebuild from the disk byte, discarding the stored none bit.
        pub fn $from_raw(&mut self, raw: u8) {
            self.$field = raw >> 1;
        }
    };
}

impl OptLoadout {
    pub fn new() -> Self {
        OptLoadout::default()
    }

    family_api!(set_warhead, warhead, no_warheads, warheads_raw, set_warheads_raw, warheads, Warhead);
    family_api!(set_beam, beam, no_beams, beams_raw, set_beams_raw, beams, Beam);
    family_api!(
        set_countermeasure,
        countermeasure,
        no_countermeasures,
        countermeasures_raw,
        set_countermeasures_raw,
        countermeasures,
        Countermeasure
    );
}
