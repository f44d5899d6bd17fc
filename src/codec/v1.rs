//! First-generation codec.
//!
//! This layout splits craft flight groups and non-craft "space objects" into
//! two on-disk arrays; the model keeps one ordered collection tagged by
//! [`UnitTag`], craft first, and encode re-splits. The briefing lives in a
//! companion file (`<base>.brf`) and is decoded/encoded separately; the
//! mission file carries no briefing data of its own.
//!
//! File shape: 16-byte header (signature, time limit, craft count, object
//! count), craft records at stride 192, object records at stride 32, then the
//! fixed summary text.

use crate::codec::records::{
    read_angles, read_briefing, read_flight_group_body, write_angles, write_briefing,
    write_flight_group_body,
};
use crate::codec::FormatError;
use crate::cursor::{Reader, Writer};
use crate::model::{FieldError, FlightGroup, Mission, UnitTag, Waypoint};
use crate::variant::Variant;

const HEADER_LEN: usize = 16;
const CRAFT_STRIDE: usize = 192;
const OBJECT_STRIDE: usize = 32;

pub fn decode(bytes: &[u8]) -> Result<Mission, FormatError> {
    let caps = Variant::V1.caps();
    let mut r = Reader::new(bytes);
    let sig = r.read_i16()?;
    if sig != Variant::V1.signature() {
        return Err(FormatError::Signature { found: sig });
    }
    let time_limit = r.read_i16()?;
    let num_craft = r.read_i16()?;
    let num_objects = r.read_i16()?;
    // Counts are validated individually before use; a crafted file can carry
    // negative words here.
    if !(0..=caps.flight_groups as i16).contains(&num_craft) {
        return Err(FieldError::OutOfRange {
            field: "craft count",
            value: num_craft as i32,
            max: caps.flight_groups as i32,
        }
        .into());
    }
    if !(0..=caps.flight_groups as i16).contains(&num_objects) {
        return Err(FieldError::OutOfRange {
            field: "object count",
            value: num_objects as i32,
            max: caps.flight_groups as i32,
        }
        .into());
    }
    let num_craft = num_craft as usize;
    let num_objects = num_objects as usize;
    let total = num_craft + num_objects;
    if total < 1 || total > caps.flight_groups {
        return Err(FieldError::OutOfRange {
            field: "flight group count",
            value: total as i32,
            max: caps.flight_groups as i32,
        }
        .into());
    }
    let mut mission = Mission::new(Variant::V1);
    mission.time_limit_min = time_limit.clamp(0, 255) as u8;
    mission
        .flight_groups
        .set_count(total, true)
        .map_err(|_| FieldError::OutOfRange {
            field: "flight group count",
            value: total as i32,
            max: caps.flight_groups as i32,
        })?;
    for i in 0..num_craft {
        r.seek(HEADER_LEN + i * CRAFT_STRIDE)?;
        mission.flight_groups[i] = read_flight_group_body(&mut r, Variant::V1)?;
    }
    let object_base = HEADER_LEN + num_craft * CRAFT_STRIDE;
    for i in 0..num_objects {
        r.seek(object_base + i * OBJECT_STRIDE)?;
        mission.flight_groups[num_craft + i] = read_object(&mut r)?;
    }
    r.seek(object_base + num_objects * OBJECT_STRIDE)?;
    mission.summary = r.read_cstring(caps.summary_len)?;
    Ok(mission)
}

pub fn encode(mission: &Mission) -> Vec<u8> {
    let caps = Variant::V1.caps();
    let craft: Vec<&FlightGroup> = mission
        .flight_groups
        .iter()
        .filter(|fg| fg.unit == UnitTag::Craft)
        .collect();
    let objects: Vec<&FlightGroup> = mission
        .flight_groups
        .iter()
        .filter(|fg| fg.unit == UnitTag::SpaceObject)
        .collect();
    let mut w = Writer::new();
    w.write_i16(Variant::V1.signature());
    w.write_i16(mission.time_limit_min as i16);
    w.write_i16(craft.len() as i16);
    w.write_i16(objects.len() as i16);
    for (i, fg) in craft.iter().enumerate() {
        w.seek(HEADER_LEN + i * CRAFT_STRIDE);
        write_flight_group_body(&mut w, fg, Variant::V1);
        debug_assert!(w.position() <= HEADER_LEN + (i + 1) * CRAFT_STRIDE);
    }
    let object_base = HEADER_LEN + craft.len() * CRAFT_STRIDE;
    for (i, fg) in objects.iter().enumerate() {
        w.seek(object_base + i * OBJECT_STRIDE);
        write_object(&mut w, fg);
        debug_assert!(w.position() <= object_base + (i + 1) * OBJECT_STRIDE);
    }
    w.seek(object_base + objects.len() * OBJECT_STRIDE);
    w.write_cstring(&mission.summary, caps.summary_len);
    w.into_bytes()
}

/// Space-object record: identity plus a single resting position; no orders,
/// goals, or cargo are persisted for objects.
fn read_object(r: &mut Reader) -> Result<FlightGroup, FormatError> {
    let mut fg = FlightGroup::default();
    fg.unit = UnitTag::SpaceObject;
    fg.name = r.read_cstring(16)?;
    fg.craft_type = r.read_u8()?;
    fg.number_of_craft = r.read_u8()?.saturating_add(1);
    fg.iff = r.read_u8()?;
    let (yaw, pitch, roll) = read_angles(r, Variant::V1)?;
    fg.yaw = yaw;
    fg.pitch = pitch;
    fg.roll = roll;
    let mut table = vec![Waypoint::default(); Variant::V1.caps().waypoints_per_fg];
    table[0] = Waypoint::new(r.read_i16()?, r.read_i16()?, r.read_i16()?);
    fg.waypoints = table;
    Ok(fg)
}

fn write_object(w: &mut Writer, fg: &FlightGroup) {
    w.write_cstring(&fg.name, 16);
    w.write_u8(fg.craft_type);
    w.write_u8(fg.number_of_craft.saturating_sub(1));
    w.write_u8(fg.iff);
    write_angles(w, fg.yaw, fg.pitch, fg.roll, Variant::V1);
    let position = fg.waypoints.first().copied().unwrap_or_default();
    w.write_i16(position.x);
    w.write_i16(position.y);
    w.write_i16(position.z);
}

/// Companion briefing file: the same signature word, then one briefing block.
pub fn decode_briefing_into(bytes: &[u8], mission: &mut Mission) -> Result<(), FormatError> {
    let mut r = Reader::new(bytes);
    let sig = r.read_i16()?;
    if sig != Variant::V1.signature() {
        return Err(FormatError::Signature { found: sig });
    }
    mission.briefings[0] = read_briefing(&mut r, Variant::V1)?;
    Ok(())
}

pub fn encode_briefing(mission: &Mission) -> Vec<u8> {
    let mut w = Writer::new();
    w.write_i16(Variant::V1.signature());
    write_briefing(&mut w, &mission.briefings[0], Variant::V1);
    w.into_bytes()
}
