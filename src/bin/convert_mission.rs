//! Convert a mission file to a neighboring format generation.
//!
//! Usage:
//!   convert_mission <IN> <v1|v2|v3|v4> <OUT>
//!
//! Conversion only runs between neighboring generations; a two-step hop has
//! to go through the intermediate format explicitly. Dropped fields are
//! reported on stderr, and the output file is written with the same
//! backup-then-restore discipline the library always saves with.

use anyhow::{bail, Context};
use sortie::Variant;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 {
        bail!("usage: convert_mission <IN> <v1|v2|v3|v4> <OUT>");
    }
    let input = Path::new(&args[0]);
    let target = match Variant::parse(&args[1]) {
        Some(v) => v,
        None => bail!("unknown format {:?} (expected v1, v2, v3, or v4)", args[1]),
    };
    let output = Path::new(&args[2]);

    let mission = sortie::load(input).with_context(|| format!("reading {}", input.display()))?;
    if mission.variant() == target {
        bail!("{} is already {}", input.display(), target);
    }
    let converted = sortie::convert_mission(&mission, target)?;
    for tag in &converted.dropped {
        eprintln!("warning: dropped {}", tag);
    }
    sortie::save(&converted.value, output)
        .with_context(|| format!("writing {}", output.display()))?;
    eprintln!(
        "{} ({}) -> {} ({})",
        input.display(),
        mission.variant(),
        output.display(),
        target
    );
    Ok(())
}
