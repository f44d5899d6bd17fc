//! Record-level encode/decode shared by the per-variant codecs.
//!
//! Each helper is a symmetric read/write pair over the same field sequence;
//! the per-variant modules only contribute section offsets and strides.

use crate::codec::{
    self, delay_raw_to_seconds, points_to_raw, raw_to_points, seconds_to_delay_raw, FormatError,
};
use crate::cursor::{Reader, Writer};
use crate::model::{
    Amount, Briefing, BriefingEvent, Condition, EventKind, FieldError, FlightGroup, Goal,
    GoalArgument, GoalText, Message, Mission, Order, TargetKind, TargetRef, Team, Trigger,
    TriggerCombine, Waypoint,
};
use crate::variant::Variant;

pub const NO_MOTHERSHIP: u8 = 0xFF;

pub fn read_target(r: &mut Reader, variant: Variant) -> Result<TargetRef, FormatError> {
    let kind_raw = r.read_u8()?;
    let kind = TargetKind::from_raw(kind_raw).ok_or(FieldError::OutOfRange {
        field: "target category",
        value: kind_raw as i32,
        max: 8,
    })?;
    let value = r.read_u8()?;
    let target = TargetRef::new(kind, value);
    target.validate(variant)?;
    Ok(target)
}

pub fn write_target(w: &mut Writer, t: &TargetRef) {
    w.write_u8(t.kind.raw());
    w.write_u8(t.value);
}

/// Trigger block: condition, category, value, amount, plus the auxiliary i16
/// parameter in formats that carry one. An out-of-range amount is the one
/// soft-corrected field (legacy files) — everything else is a hard error.
pub fn read_trigger(r: &mut Reader, variant: Variant) -> Result<Trigger, FormatError> {
    let caps = variant.caps();
    let cond_raw = r.read_u8()?;
    let condition = Condition::from_raw(cond_raw)
        .filter(|c| c.raw() <= caps.condition_max)
        .ok_or(FieldError::OutOfRange {
            field: "trigger condition",
            value: cond_raw as i32,
            max: caps.condition_max as i32,
        })?;
    let target = read_target(r, variant)?;
    let amount_raw = r.read_u8()?;
    let amount = Amount::from_raw(amount_raw).unwrap_or_else(|| {
        log::warn!("amount {} out of range, corrected to All", amount_raw);
        Amount::All
    });
    let parameter = if caps.has_trigger_parameter { r.read_i16()? } else { 0 };
    let trigger = Trigger { condition, target, amount, parameter };
    trigger.validate(variant)?;
    Ok(trigger)
}

pub fn write_trigger(w: &mut Writer, t: &Trigger, variant: Variant) {
    w.write_u8(t.condition.raw());
    write_target(w, &t.target);
    w.write_u8(t.amount.raw());
    if variant.caps().has_trigger_parameter {
        w.write_i16(t.parameter);
    }
}

pub fn trigger_len(variant: Variant) -> usize {
    if variant.caps().has_trigger_parameter {
        6
    } else {
        4
    }
}

pub fn read_waypoint(r: &mut Reader, variant: Variant) -> Result<Waypoint, FormatError> {
    let mut wp = Waypoint::new(r.read_i16()?, r.read_i16()?, r.read_i16()?);
    if variant.caps().has_waypoint_region {
        wp.enabled = r.read_bool()?;
        let region = r.read_u8()?;
        wp.set_region(region)?;
    } else {
        wp.enabled = r.read_i16()? != 0;
    }
    Ok(wp)
}

pub fn write_waypoint(w: &mut Writer, wp: &Waypoint, variant: Variant) {
    w.write_i16(wp.x);
    w.write_i16(wp.y);
    w.write_i16(wp.z);
    if variant.caps().has_waypoint_region {
        w.write_bool(wp.enabled);
        w.write_u8(wp.region());
    } else {
        w.write_i16(wp.enabled as i16);
    }
}

/// Fixed waypoint table: the full table is always present on disk; the model
/// gets one entry per slot.
pub fn read_waypoint_table(
    r: &mut Reader,
    count: usize,
    variant: Variant,
) -> Result<Vec<Waypoint>, FormatError> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_waypoint(r, variant)?);
    }
    Ok(out)
}

pub fn write_waypoint_table(w: &mut Writer, table: &[Waypoint], count: usize, variant: Variant) {
    let default = Waypoint::default();
    for i in 0..count {
        write_waypoint(w, table.get(i).unwrap_or(&default), variant);
    }
}

pub fn read_goal(r: &mut Reader, variant: Variant) -> Result<Goal, FormatError> {
    let caps = variant.caps();
    let cond_raw = r.read_u8()?;
    let condition = Condition::from_raw(cond_raw)
        .filter(|c| c.raw() <= caps.condition_max)
        .ok_or(FieldError::OutOfRange {
            field: "goal condition",
            value: cond_raw as i32,
            max: caps.condition_max as i32,
        })?;
    let target = read_target(r, variant)?;
    let amount_raw = r.read_u8()?;
    let amount = Amount::from_raw(amount_raw).unwrap_or_else(|| {
        log::warn!("goal amount {} out of range, corrected to All", amount_raw);
        Amount::All
    });
    if caps.has_trigger_parameter {
        r.skip(2)?;
    }
    let arg_raw = r.read_u8()?;
    let argument = GoalArgument::from_raw(arg_raw).ok_or(FieldError::OutOfRange {
        field: "goal argument",
        value: arg_raw as i32,
        max: 3,
    })?;
    let mut goal = Goal::default();
    goal.condition = condition;
    goal.target = target;
    goal.amount = amount;
    goal.argument = argument;
    let points_raw = r.read_i8()?;
    if caps.points_quantum > 0 {
        goal.set_points(raw_to_points(points_raw, caps.points_quantum))?;
    }
    if variant == Variant::V3 {
        r.skip(2)?;
    }
    if caps.goal_text_len > 0 {
        goal.set_text(GoalText::Incomplete, r.read_cstring(caps.goal_text_len)?);
        goal.set_text(GoalText::Complete, r.read_cstring(caps.goal_text_len)?);
        goal.set_text(GoalText::Failed, r.read_cstring(caps.goal_text_len)?);
    }
    Ok(goal)
}

pub fn write_goal(w: &mut Writer, g: &Goal, variant: Variant) {
    let caps = variant.caps();
    w.write_u8(g.condition.raw());
    write_target(w, &g.target);
    w.write_u8(g.amount.raw());
    if caps.has_trigger_parameter {
        w.write_i16(0);
    }
    w.write_u8(g.argument.raw());
    if caps.points_quantum > 0 {
        w.write_i8(points_to_raw(g.points(), caps.points_quantum));
    } else {
        w.write_u8(0);
    }
    if variant == Variant::V3 {
        w.skip(2);
    }
    if caps.goal_text_len > 0 {
        for slot in [GoalText::Incomplete, GoalText::Complete, GoalText::Failed] {
            let text = if g.text_applies(slot) { g.text(slot) } else { "" };
            w.write_cstring(text, caps.goal_text_len);
        }
    }
}

pub fn read_order(r: &mut Reader, variant: Variant) -> Result<Order, FormatError> {
    let caps = variant.caps();
    let mut order = Order {
        command: r.read_u8()?,
        throttle: r.read_u8()?.min(10),
        ..Order::default()
    };
    for t in order.targets.iter_mut() {
        *t = read_target(r, variant)?;
    }
    order.first_pair_and = r.read_bool()?;
    order.second_pair_and = r.read_bool()?;
    if variant != Variant::V1 {
        order.skip_triggers[0] = read_trigger(r, variant)?;
        order.skip_triggers[1] = read_trigger(r, variant)?;
        order.skip_and = r.read_bool()?;
    }
    if caps.designation_len > 0 {
        order.designation = r.read_cstring(caps.designation_len)?;
    }
    if caps.order_waypoints > 0 {
        order.waypoints = read_waypoint_table(r, caps.order_waypoints, variant)?;
    }
    Ok(order)
}

pub fn write_order(w: &mut Writer, o: &Order, variant: Variant) {
    let caps = variant.caps();
    w.write_u8(o.command);
    w.write_u8(o.throttle.min(10));
    for t in &o.targets {
        write_target(w, t);
    }
    w.write_bool(o.first_pair_and);
    w.write_bool(o.second_pair_and);
    if variant != Variant::V1 {
        write_trigger(w, &o.skip_triggers[0], variant);
        write_trigger(w, &o.skip_triggers[1], variant);
        w.write_bool(o.skip_and);
    }
    if caps.designation_len > 0 {
        w.write_cstring(&o.designation, caps.designation_len);
    }
    if caps.order_waypoints > 0 {
        write_waypoint_table(w, &o.waypoints, caps.order_waypoints, variant);
    }
}

pub fn read_combine(r: &mut Reader, pairs: bool) -> Result<TriggerCombine, FormatError> {
    let mut c = TriggerCombine { first_pair_and: r.read_bool()?, ..TriggerCombine::default() };
    if pairs {
        c.second_pair_and = r.read_bool()?;
        c.pairs_and = r.read_bool()?;
    }
    Ok(c)
}

pub fn write_combine(w: &mut Writer, c: &TriggerCombine, pairs: bool) {
    w.write_bool(c.first_pair_and);
    if pairs {
        w.write_bool(c.second_pair_and);
        w.write_bool(c.pairs_and);
    }
}

pub fn read_mothership(r: &mut Reader) -> Result<(Option<u8>, bool), FormatError> {
    let slot = r.read_u8()?;
    let via = r.read_bool()?;
    let ship = if slot == NO_MOTHERSHIP { None } else { Some(slot) };
    Ok((ship, via))
}

pub fn write_mothership(w: &mut Writer, ship: Option<u8>, via: bool) {
    w.write_u8(ship.unwrap_or(NO_MOTHERSHIP));
    w.write_bool(via);
}

/// Message record body (without the per-variant stride padding). The second
/// generation hides the color as a leading '1'..'3' digit on the text.
pub fn read_message(r: &mut Reader, variant: Variant) -> Result<Message, FormatError> {
    let caps = variant.caps();
    let mut msg = Message::default();
    let text = r.read_cstring(caps.message_len)?;
    if caps.color_digit_in_text {
        match text.strip_prefix(['1', '2', '3']) {
            Some(rest) => {
                msg.color = text.as_bytes()[0] - b'0';
                msg.text = rest.to_string();
            }
            None => msg.text = text,
        }
        msg.sent_to_teams = 1;
    } else {
        msg.text = text;
        msg.color = r.read_u8()?.min(3);
        msg.sent_to_teams = r.read_u8()?;
    }
    let trigger_slots = if variant == Variant::V2 { 2 } else { 4 };
    for i in 0..trigger_slots {
        msg.triggers[i] = read_trigger(r, variant)?;
    }
    msg.combine = read_combine(r, trigger_slots == 4)?;
    msg.delay_seconds = delay_raw_to_seconds(variant, r.read_u8()?);
    Ok(msg)
}

pub fn write_message(w: &mut Writer, msg: &Message, variant: Variant) {
    let caps = variant.caps();
    if caps.color_digit_in_text {
        if (1..=3).contains(&msg.color) {
            let text = format!("{}{}", msg.color, msg.text);
            w.write_cstring(&text, caps.message_len);
        } else {
            w.write_cstring(&msg.text, caps.message_len);
        }
    } else {
        w.write_cstring(&msg.text, caps.message_len);
        w.write_u8(msg.color.min(3));
        w.write_u8(msg.sent_to_teams);
    }
    let trigger_slots = if variant == Variant::V2 { 2 } else { 4 };
    for i in 0..trigger_slots {
        write_trigger(w, &msg.triggers[i], variant);
    }
    write_combine(w, &msg.combine, trigger_slots == 4);
    w.write_u8(seconds_to_delay_raw(variant, msg.delay_seconds));
}

/// Team record. The second generation persists only a name and an alliance
/// bitmask; the later ones a full alliance table and end-of-mission lines.
pub fn read_team(r: &mut Reader, variant: Variant) -> Result<Team, FormatError> {
    let mut team = Team::default();
    team.name = r.read_cstring(16)?;
    if variant == Variant::V2 {
        let mask = r.read_u8()?;
        for (i, allied) in team.allied.iter_mut().enumerate().take(6) {
            *allied = mask & (1 << i) != 0;
        }
        r.skip(1)?;
    } else {
        for allied in team.allied.iter_mut() {
            *allied = r.read_bool()?;
        }
        team.end_of_mission[0] = r.read_cstring(64)?;
        team.end_of_mission[1] = r.read_cstring(64)?;
    }
    Ok(team)
}

pub fn write_team(w: &mut Writer, team: &Team, variant: Variant) {
    w.write_cstring(&team.name, 16);
    if variant == Variant::V2 {
        let mut mask = 0u8;
        for (i, allied) in team.allied.iter().enumerate().take(6) {
            if *allied {
                mask |= 1 << i;
            }
        }
        w.write_u8(mask);
        w.write_u8(0);
    } else {
        for allied in &team.allied {
            w.write_bool(*allied);
        }
        w.write_cstring(&team.end_of_mission[0], 64);
        w.write_cstring(&team.end_of_mission[1], 64);
    }
}

/// Briefing block: tick length, a fixed-size flat i16 event stream closed by
/// the end marker, then length-prefixed tag and caption tables.
pub fn read_briefing(r: &mut Reader, variant: Variant) -> Result<Briefing, FormatError> {
    let caps = variant.caps();
    let mut briefing = Briefing { length_ticks: r.read_u16()?, ..Briefing::default() };
    let stream_end = r.position() + caps.briefing_event_shorts * 2;
    loop {
        if r.position() + 4 > stream_end {
            break;
        }
        let time = r.read_i16()?;
        let code = r.read_i16()?;
        if time as u16 == Briefing::END_MARKER as u16 && code == Briefing::END_MARKER {
            break;
        }
        let kind = EventKind::from_raw(code).ok_or(FieldError::OutOfRange {
            field: "briefing event",
            value: code as i32,
            max: EventKind::TextTag.raw() as i32,
        })?;
        let mut params = [0i16; 4];
        for p in params.iter_mut().take(kind.param_count()) {
            *p = r.read_i16()?;
        }
        briefing.events.push(BriefingEvent { time: time as u16, kind, params });
    }
    r.seek(stream_end)?;
    let tag_count = r.read_i16()?.max(0) as usize;
    for _ in 0..tag_count.min(caps.briefing_strings) {
        briefing.tags.push(r.read_lpstring()?);
    }
    let caption_count = r.read_i16()?.max(0) as usize;
    for _ in 0..caption_count.min(caps.briefing_strings) {
        briefing.captions.push(r.read_lpstring()?);
    }
    Ok(briefing)
}

pub fn write_briefing(w: &mut Writer, briefing: &Briefing, variant: Variant) {
    let caps = variant.caps();
    w.write_u16(briefing.length_ticks);
    let stream_end = w.position() + caps.briefing_event_shorts * 2;
    for event in &briefing.events {
        // Events that would overflow the fixed stream are not representable.
        if w.position() + (event.stream_len() + 2) * 2 > stream_end {
            log::warn!("briefing event stream full, remaining events dropped");
            break;
        }
        w.write_i16(event.time as i16);
        w.write_i16(event.kind.raw());
        for p in event.params.iter().take(event.kind.param_count()) {
            w.write_i16(*p);
        }
    }
    w.write_i16(Briefing::END_MARKER);
    w.write_i16(Briefing::END_MARKER);
    w.seek(stream_end);
    let tags = briefing.tags.iter().take(caps.briefing_strings);
    w.write_i16(tags.clone().count() as i16);
    for tag in tags {
        w.write_lpstring(tag);
    }
    let captions = briefing.captions.iter().take(caps.briefing_strings);
    w.write_i16(captions.clone().count() as i16);
    for caption in captions {
        w.write_lpstring(caption);
    }
}

/// Flight-group record body, shared by the second generation onward and the
/// first generation's craft array. Fixed arrays of order/goal slots are always
/// present on disk; count bytes say how many are live.
pub fn read_flight_group_body(r: &mut Reader, variant: Variant) -> Result<FlightGroup, FormatError> {
    let caps = variant.caps();
    let mut fg = FlightGroup::default();
    fg.name = r.read_cstring(caps.name_len)?;
    fg.cargo = r.read_cstring(caps.name_len)?;
    fg.special_cargo = r.read_cstring(caps.name_len)?;
    fg.special_craft = r.read_u8()?;
    fg.craft_type = r.read_u8()?;
    // Quantities are stored zero-based on disk, one-based in the model.
    fg.number_of_craft = r.read_u8()?.saturating_add(1);
    fg.waves = r.read_u8()?.saturating_add(1);
    fg.iff = r.read_u8()?;
    fg.ai_rating = r.read_u8()?;
    fg.markings = r.read_u8()?;
    fg.formation = r.read_u8()?;
    fg.player_slot = r.read_u8()?;
    let (yaw, pitch, roll) = read_angles(r, variant)?;
    fg.yaw = yaw;
    fg.pitch = pitch;
    fg.roll = roll;
    for i in 0..caps.arrival_triggers {
        fg.arrival[i] = read_trigger(r, variant)?;
    }
    fg.arrival_combine = read_combine(r, caps.arrival_triggers == 4)?;
    fg.arrival_delay_seconds = delay_raw_to_seconds(variant, r.read_u8()?);
    for i in 0..caps.departure_triggers {
        fg.departure[i] = read_trigger(r, variant)?;
    }
    fg.departure_and = r.read_bool()?;
    fg.departure_delay_seconds = delay_raw_to_seconds(variant, r.read_u8()?);
    let (arr_ship, arr_via) = read_mothership(r)?;
    fg.arrival_mothership = arr_ship;
    fg.arrive_via_mothership = arr_via;
    let (dep_ship, dep_via) = read_mothership(r)?;
    fg.departure_mothership = dep_ship;
    fg.depart_via_mothership = dep_via;
    let num_orders = (r.read_u8()? as usize).min(caps.orders_per_fg);
    for i in 0..caps.orders_per_fg {
        let order = read_order(r, variant)?;
        if i < num_orders {
            fg.orders.push(order);
        }
    }
    let num_goals = (r.read_u8()? as usize).min(caps.goals_per_fg);
    for i in 0..caps.goals_per_fg {
        let goal = read_goal(r, variant)?;
        if i < num_goals {
            fg.goals.push(goal);
        }
    }
    fg.waypoints = read_waypoint_table(r, caps.waypoints_per_fg, variant)?;
    if caps.has_loadout {
        fg.loadout.set_warheads_raw(r.read_u8()?);
        fg.loadout.set_beams_raw(r.read_u8()?);
        fg.loadout.set_countermeasures_raw(r.read_u8()?);
    }
    Ok(fg)
}

pub fn write_flight_group_body(w: &mut Writer, fg: &FlightGroup, variant: Variant) {
    let caps = variant.caps();
    w.write_cstring(&fg.name, caps.name_len);
    w.write_cstring(&fg.cargo, caps.name_len);
    w.write_cstring(&fg.special_cargo, caps.name_len);
    w.write_u8(fg.special_craft);
    w.write_u8(fg.craft_type);
    w.write_u8(fg.number_of_craft.saturating_sub(1));
    w.write_u8(fg.waves.saturating_sub(1));
    w.write_u8(fg.iff);
    w.write_u8(fg.ai_rating);
    w.write_u8(fg.markings);
    w.write_u8(fg.formation);
    w.write_u8(fg.player_slot);
    write_angles(w, fg.yaw, fg.pitch, fg.roll, variant);
    for i in 0..caps.arrival_triggers {
        write_trigger(w, &fg.arrival[i], variant);
    }
    write_combine(w, &fg.arrival_combine, caps.arrival_triggers == 4);
    w.write_u8(seconds_to_delay_raw(variant, fg.arrival_delay_seconds));
    for i in 0..caps.departure_triggers {
        write_trigger(w, &fg.departure[i], variant);
    }
    w.write_bool(fg.departure_and);
    w.write_u8(seconds_to_delay_raw(variant, fg.departure_delay_seconds));
    write_mothership(w, fg.arrival_mothership, fg.arrive_via_mothership);
    write_mothership(w, fg.departure_mothership, fg.depart_via_mothership);
    let default_order = Order::default();
    w.write_u8(fg.orders.len().min(caps.orders_per_fg) as u8);
    for i in 0..caps.orders_per_fg {
        write_order(w, fg.orders.get(i).unwrap_or(&default_order), variant);
    }
    let default_goal = Goal::default();
    w.write_u8(fg.goals.len().min(caps.goals_per_fg) as u8);
    for i in 0..caps.goals_per_fg {
        write_goal(w, fg.goals.get(i).unwrap_or(&default_goal), variant);
    }
    write_waypoint_table(w, &fg.waypoints, caps.waypoints_per_fg, variant);
    if caps.has_loadout {
        w.write_u8(fg.loadout.warheads_raw());
        w.write_u8(fg.loadout.beams_raw());
        w.write_u8(fg.loadout.countermeasures_raw());
    }
}

/// Byte offsets and record strides of one format's file sections. Strides
/// exceed the record bodies; the gaps are reserved and zero-filled.
pub struct SectionLayout {
    pub header_len: usize,
    pub fg_stride: usize,
    pub msg_stride: usize,
    pub team_stride: usize,
}

/// Common file shape of the second generation onward: header, flight-group
/// array, message array, global-goal blocks, team blocks, briefings, trailing
/// summary/debrief text.
pub fn decode_sections(
    bytes: &[u8],
    variant: Variant,
    layout: &SectionLayout,
) -> Result<Mission, FormatError> {
    let caps = variant.caps();
    let mut r = Reader::new(bytes);
    let sig = r.read_i16()?;
    if sig != variant.signature() {
        return Err(FormatError::Signature { found: sig });
    }
    let num_fgs = r.read_i16()? as usize;
    let num_msgs = r.read_i16()? as usize;
    if num_fgs < 1 || num_fgs > caps.flight_groups {
        return Err(FieldError::OutOfRange {
            field: "flight group count",
            value: num_fgs as i32,
            max: caps.flight_groups as i32,
        }
        .into());
    }
    if num_msgs > caps.messages {
        return Err(FieldError::OutOfRange {
            field: "message count",
            value: num_msgs as i32,
            max: caps.messages as i32,
        }
        .into());
    }
    let mut mission = Mission::new(variant);
    mission.time_limit_min = r.read_u8()?;
    mission.end_when_complete = r.read_bool()?;
    let count_err = |field| FieldError::OutOfRange { field, value: 0, max: 0 };
    mission
        .flight_groups
        .set_count(num_fgs, true)
        .map_err(|_| count_err("flight group count"))?;
    for i in 0..num_fgs {
        r.seek(layout.header_len + i * layout.fg_stride)?;
        mission.flight_groups[i] = read_flight_group_body(&mut r, variant)?;
    }
    let msg_base = layout.header_len + num_fgs * layout.fg_stride;
    mission
        .messages
        .set_count(num_msgs, true)
        .map_err(|_| count_err("message count"))?;
    for i in 0..num_msgs {
        r.seek(msg_base + i * layout.msg_stride)?;
        mission.messages[i] = read_message(&mut r, variant)?;
    }
    r.seek(msg_base + num_msgs * layout.msg_stride)?;
    for gi in 0..caps.global_goal_sets {
        for slot in 0..3 {
            mission.globals[gi].goals[slot] = read_goal(&mut r, variant)?;
        }
    }
    let team_base = r.position();
    for ti in 0..caps.teams {
        r.seek(team_base + ti * layout.team_stride)?;
        mission.teams[ti] = read_team(&mut r, variant)?;
    }
    r.seek(team_base + caps.teams * layout.team_stride)?;
    for bi in 0..caps.briefings {
        mission.briefings[bi] = read_briefing(&mut r, variant)?;
    }
    mission.summary = r.read_cstring(caps.summary_len)?;
    if caps.debrief_len > 0 {
        mission.debrief = r.read_cstring(caps.debrief_len)?;
    }
    Ok(mission)
}

pub fn encode_sections(mission: &Mission, variant: Variant, layout: &SectionLayout) -> Vec<u8> {
    let caps = variant.caps();
    let mut w = Writer::new();
    w.write_i16(variant.signature());
    let num_fgs = mission.flight_groups.len();
    let num_msgs = mission.messages.len();
    w.write_i16(num_fgs as i16);
    w.write_i16(num_msgs as i16);
    w.write_u8(mission.time_limit_min);
    w.write_bool(mission.end_when_complete);
    for (i, fg) in mission.flight_groups.iter().enumerate() {
        w.seek(layout.header_len + i * layout.fg_stride);
        write_flight_group_body(&mut w, fg, variant);
        debug_assert!(w.position() <= layout.header_len + (i + 1) * layout.fg_stride);
    }
    let msg_base = layout.header_len + num_fgs * layout.fg_stride;
    for (i, msg) in mission.messages.iter().enumerate() {
        w.seek(msg_base + i * layout.msg_stride);
        write_message(&mut w, msg, variant);
        debug_assert!(w.position() <= msg_base + (i + 1) * layout.msg_stride);
    }
    w.seek(msg_base + num_msgs * layout.msg_stride);
    for set in mission.globals.iter() {
        for goal in &set.goals {
            write_goal(&mut w, goal, variant);
        }
    }
    let team_base = w.position();
    for (ti, team) in mission.teams.iter().enumerate() {
        w.seek(team_base + ti * layout.team_stride);
        write_team(&mut w, team, variant);
    }
    w.seek(team_base + caps.teams * layout.team_stride);
    for briefing in mission.briefings.iter() {
        write_briefing(&mut w, briefing, variant);
    }
    w.write_cstring(&mission.summary, caps.summary_len);
    if caps.debrief_len > 0 {
        w.write_cstring(&mission.debrief, caps.debrief_len);
    }
    w.into_bytes()
}

/// Read the orientation triple, applying the pitch phase rule where the
/// format carries it.
pub fn read_angles(r: &mut Reader, variant: Variant) -> Result<(i16, i16, i16), FormatError> {
    let yaw = codec::angle_raw_to_degrees(r.read_u8()?);
    let pitch_raw = r.read_u8()?;
    let pitch = if variant.caps().pitch_phase_shift {
        codec::pitch_raw_to_degrees(pitch_raw)
    } else {
        codec::angle_raw_to_degrees(pitch_raw)
    };
    let roll = codec::angle_raw_to_degrees(r.read_u8()?);
    Ok((yaw, pitch, roll))
}

pub fn write_angles(w: &mut Writer, yaw: i16, pitch: i16, roll: i16, variant: Variant) {
    w.write_u8(codec::degrees_to_angle_raw(yaw));
    if variant.caps().pitch_phase_shift {
        w.write_u8(codec::degrees_to_pitch_raw(pitch));
    } else {
        w.write_u8(codec::degrees_to_angle_raw(pitch));
    }
    w.write_u8(codec::degrees_to_angle_raw(roll));
}
