//! Fourth-generation codec.
//!
//! Widest of the four layouts: sixteen orders per flight group each with its
//! own waypoint set, signed 16-bit trigger parameters, the two-regime delay
//! encoding, and goal points at quantum 250.

use crate::codec::records::{decode_sections, encode_sections, SectionLayout};
use crate::codec::FormatError;
use crate::model::Mission;
use crate::variant::Variant;

const LAYOUT: SectionLayout = SectionLayout {
    header_len: 32,
    fg_stride: 3456,
    msg_stride: 104,
    team_stride: 160,
};

pub fn decode(bytes: &[u8]) -> Result<Mission, FormatError> {
    decode_sections(bytes, Variant::V4, &LAYOUT)
}

pub fn encode(mission: &Mission) -> Vec<u8> {
    encode_sections(mission, Variant::V4, &LAYOUT)
}
