//! Third-generation codec.
//!
//! Same sectioned layout as the second generation with wider records:
//! goal point values (quantum 25), order designations, full ten-slot
//! team alliance tables, eight briefings, and the pitch phase shift.

use crate::codec::records::{decode_sections, encode_sections, SectionLayout};
use crate::codec::FormatError;
use crate::model::Mission;
use crate::variant::Variant;

const LAYOUT: SectionLayout = SectionLayout {
    header_len: 24,
    fg_stride: 2016,
    msg_stride: 96,
    team_stride: 160,
};

pub fn decode(bytes: &[u8]) -> Result<Mission, FormatError> {
    decode_sections(bytes, Variant::V3, &LAYOUT)
}

pub fn encode(mission: &Mission) -> Vec<u8> {
    encode_sections(mission, Variant::V3, &LAYOUT)
}
