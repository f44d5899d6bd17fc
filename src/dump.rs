//! Format a decoded mission for display (dump text). Display-only; none of
//! this feeds back into the codec.

use std::fmt::Write;

use crate::model::{Condition, FlightGroup, Message, Mission, TargetKind, Trigger};

/// Plain-text mission summary: header, one line per flight group, messages,
/// briefing stats. `verbose` adds triggers, orders, and goals per group.
pub fn dump_mission(mission: &Mission, verbose: bool) -> String {
    let mut out = String::new();
    let caps = mission.variant().caps();
    let _ = writeln!(out, "format: {}", mission.variant());
    if !mission.summary.is_empty() {
        let _ = writeln!(out, "summary: {}", first_line(&mission.summary));
    }
    if mission.time_limit_min > 0 {
        let _ = writeln!(out, "time limit: {} min", mission.time_limit_min);
    }
    let _ = writeln!(
        out,
        "flight groups: {}/{}  messages: {}/{}",
        mission.flight_groups.len(),
        caps.flight_groups,
        mission.messages.len(),
        caps.messages
    );

    for (i, fg) in mission.flight_groups.iter().enumerate() {
        let _ = writeln!(out, "  [{:3}] {}", i, flight_group_line(fg));
        if verbose {
            for t in fg.arrival.iter().filter(|t| **t != Trigger::default()) {
                let _ = writeln!(out, "        arrive when {}", trigger_line(t));
            }
            for t in fg.departure.iter().filter(|t| **t != Trigger::default()) {
                let _ = writeln!(out, "        depart when {}", trigger_line(t));
            }
            for o in &fg.orders {
                let _ = writeln!(out, "        order {} throttle {}0%", o.command, o.throttle);
            }
            for g in &fg.goals {
                let _ = writeln!(
                    out,
                    "        goal {:?} {} ({} pts)",
                    g.argument,
                    trigger_line(&Trigger::new(g.condition, g.target, g.amount)),
                    g.points()
                );
            }
        }
    }

    for (i, msg) in mission.messages.iter().enumerate() {
        let _ = writeln!(out, "  msg [{:2}] {}", i, message_line(msg));
    }

    for (i, briefing) in mission.briefings.iter().enumerate() {
        if briefing.events.is_empty() && briefing.captions.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            "  briefing {}: {} events, {} tags, {} captions, {} ticks",
            i,
            briefing.events.len(),
            briefing.tags.len(),
            briefing.captions.len(),
            briefing.length_ticks
        );
    }
    out
}

fn flight_group_line(fg: &FlightGroup) -> String {
    let mut line = format!(
        "{:20} craft {:3} x{}",
        fg.name, fg.craft_type, fg.number_of_craft
    );
    if fg.waves > 1 {
        let _ = write!(line, " ({} waves)", fg.waves);
    }
    let _ = write!(line, " iff {}", fg.iff);
    if fg.player_slot > 0 {
        let _ = write!(line, " [player {}]", fg.player_slot);
    }
    line
}

fn trigger_line(t: &Trigger) -> String {
    let target = match t.target.kind {
        TargetKind::None => "no target".to_string(),
        kind => format!("{:?} {}", kind, t.target.value),
    };
    match t.condition {
        Condition::Always => format!("always ({})", target),
        cond => format!("{:?} of {} ({:?})", cond, target, t.amount),
    }
}

fn message_line(msg: &Message) -> String {
    let mut line = format!("{:?}", msg.text);
    if msg.color > 0 {
        let _ = write!(line, " color {}", msg.color);
    }
    if msg.delay_seconds > 0 {
        let _ = write!(line, " after {}s", msg.delay_seconds);
    }
    line
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}
