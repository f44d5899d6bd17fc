//! Second-generation codec.
//!
//! First generation to use the sectioned single-file layout; introduces
//! in-flight messages (with the leading color digit convention), a team
//! roster packed as an alliance bitmask, and one global goal set.

use crate::codec::records::{decode_sections, encode_sections, SectionLayout};
use crate::codec::FormatError;
use crate::model::Mission;
use crate::variant::Variant;

const LAYOUT: SectionLayout = SectionLayout {
    header_len: 24,
    fg_stride: 360,
    msg_stride: 80,
    team_stride: 24,
};

pub fn decode(bytes: &[u8]) -> Result<Mission, FormatError> {
    decode_sections(bytes, Variant::V2, &LAYOUT)
}

pub fn encode(mission: &Mission) -> Vec<u8> {
    encode_sections(mission, Variant::V2, &LAYOUT)
}
