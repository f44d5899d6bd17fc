//! Print a plain-text summary of a mission file.
//!
//! Usage:
//!   dump_mission <FILE> [--verbose]
//!
//! Options:
//!   --verbose, -v  Per-group triggers, orders, and goals

use anyhow::{bail, Context};
use sortie::dump::dump_mission;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = if let Some(pos) = args.iter().position(|a| a == "--verbose" || a == "-v") {
        args.remove(pos);
        true
    } else {
        false
    };
    if args.len() != 1 {
        bail!("usage: dump_mission <FILE> [--verbose]");
    }
    let path = Path::new(&args[0]);
    let mission = sortie::load(path).with_context(|| format!("reading {}", path.display()))?;
    print!("{}", dump_mission(&mission, verbose));
    Ok(())
}
