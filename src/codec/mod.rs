//! Binary codecs: one module per format generation plus shared machinery.
//!
//! ## Contract
//!
//! - [`decode`] validates the signature word before any other read; a mismatch
//!   is a hard error with no partial decode.
//! - [`encode`] writes records at absolute positions (`base + i * stride`);
//!   unused and reserved ranges come out zero-filled.
//! - [`save`] never destroys a pre-existing file: the target is copied to a
//!   sibling backup before truncation, restored from it on any failure, and
//!   the backup is removed on success. The first generation saves its mission
//!   file and companion briefing file as one logical unit with a combined
//!   rollback.
//!
//! ## Numeric transforms
//!
//! All unit transforms happen at this boundary, not in the model: one-based
//! craft quantities, angle bytes vs. signed degrees (with the observed pitch
//! phase shift in the last two generations), 5-second-tick vs. two-regime
//! delay bytes, and goal point quanta.

mod records;
pub mod v1;
pub mod v2;
pub mod v3;
pub mod v4;

use crate::model::{FieldError, Mission};
use crate::variant::Variant;
use byteorder::{ByteOrder, LittleEndian};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("unrecognized signature {found:#06x}")]
    Signature { found: i16 },
    #[error("truncated input at offset {offset} (needed {needed} more bytes)")]
    Truncated { offset: usize, needed: usize },
    #[error("validation failed: {0}")]
    Field(#[from] FieldError),
    #[error("save failed, original file restored: {0}")]
    SaveIo(#[source] io::Error),
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// Identify the format generation from the signature word at offset 0.
pub fn sniff(bytes: &[u8]) -> Option<Variant> {
    if bytes.len() < 2 {
        return None;
    }
    Variant::from_signature(LittleEndian::read_i16(bytes))
}

/// Decode a mission, dispatching on the signature.
pub fn decode(bytes: &[u8]) -> Result<Mission, FormatError> {
    let variant = match sniff(bytes) {
        Some(v) => v,
        None if bytes.len() < 2 => {
            return Err(FormatError::Truncated { offset: 0, needed: 2 })
        }
        None => {
            return Err(FormatError::Signature { found: LittleEndian::read_i16(bytes) })
        }
    };
    match variant {
        Variant::V1 => v1::decode(bytes),
        Variant::V2 => v2::decode(bytes),
        Variant::V3 => v3::decode(bytes),
        Variant::V4 => v4::decode(bytes),
    }
}

/// Encode a mission for its own format generation.
pub fn encode(mission: &Mission) -> Vec<u8> {
    match mission.variant() {
        Variant::V1 => v1::encode(mission),
        Variant::V2 => v2::encode(mission),
        Variant::V3 => v3::encode(mission),
        Variant::V4 => v4::encode(mission),
    }
}

/// Load a mission file; for the first generation also the companion briefing
/// file next to it (missing companion decodes to an empty briefing).
pub fn load(path: &Path) -> Result<Mission, FormatError> {
    let bytes = fs::read(path)?;
    let mut mission = decode(&bytes)?;
    if mission.variant() == Variant::V1 {
        let companion = companion_path(path);
        if companion.exists() {
            let brf = fs::read(&companion)?;
            v1::decode_briefing_into(&brf, &mut mission)?;
        }
    }
    Ok(mission)
}

/// Encode and write, with the backup/restore discipline per file.
pub fn save(mission: &Mission, path: &Path) -> Result<(), FormatError> {
    let mut files: Vec<(PathBuf, Vec<u8>)> = vec![(path.to_path_buf(), encode(mission))];
    if mission.variant() == Variant::V1 {
        files.push((companion_path(path), v1::encode_briefing(mission)));
    }
    save_all(&files).map_err(FormatError::SaveIo)
}

/// Companion briefing file of a first-generation mission: same base name,
/// `brf` extension.
pub fn companion_path(path: &Path) -> PathBuf {
    path.with_extension("brf")
}

fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".bak");
    PathBuf::from(os)
}

/// Copy an existing `path` to its `.bak` sibling. `None` means there was
/// nothing to back up.
fn take_backup(path: &Path) -> io::Result<Option<PathBuf>> {
    if path.exists() {
        let b = backup_path(path);
        fs::copy(path, &b)?;
        Ok(Some(b))
    } else {
        Ok(None)
    }
}

/// Put `path` back the way [`take_backup`] found it: restore the backed-up
/// bytes, or remove the file that did not exist before. Best effort.
fn restore_backup(path: &Path, backup: Option<PathBuf>) {
    match backup {
        Some(b) => {
            let _ = fs::copy(&b, path);
            let _ = fs::remove_file(b);
        }
        None => {
            let _ = fs::remove_file(path);
        }
    }
}

fn discard_backup(backup: Option<PathBuf>) {
    if let Some(b) = backup {
        let _ = fs::remove_file(b);
    }
}

/// Replace `path` with whatever `write_fn` produces. If the file already
/// exists it is copied to `<path>.bak` first; any failure restores the
/// original and removes the backup, success removes the backup.
pub fn replace_file_with<F>(path: &Path, write_fn: F) -> io::Result<()>
where
    F: FnOnce(&mut fs::File) -> io::Result<()>,
{
    let backup = take_backup(path)?;
    match fs::File::create(path).and_then(|mut f| write_fn(&mut f)) {
        Ok(()) => {
            discard_backup(backup);
            Ok(())
        }
        Err(e) => {
            restore_backup(path, backup);
            Err(e)
        }
    }
}

/// Multi-file variant of [`replace_file_with`], built on the same backup
/// primitives with a combined rollback: all backups are taken before the
/// first write, and a failure at any point restores every file.
fn save_all(files: &[(PathBuf, Vec<u8>)]) -> io::Result<()> {
    let mut backups: Vec<(PathBuf, Option<PathBuf>)> = Vec::with_capacity(files.len());
    for (path, _) in files {
        match take_backup(path) {
            Ok(b) => backups.push((path.clone(), b)),
            Err(e) => {
                for (_, b) in backups {
                    discard_backup(b);
                }
                return Err(e);
            }
        }
    }
    let mut failure: Option<io::Error> = None;
    for (path, bytes) in files {
        let r = fs::File::create(path).and_then(|mut f| f.write_all(bytes));
        if let Err(e) = r {
            failure = Some(e);
            break;
        }
    }
    match failure {
        None => {
            for (_, b) in backups {
                discard_backup(b);
            }
            Ok(())
        }
        Some(e) => {
            for (path, b) in backups {
                restore_backup(&path, b);
            }
            Err(e)
        }
    }
}

// --- numeric transforms shared by the codecs and the converter ---

/// Angle byte to signed degrees: `deg = raw * 360 / 256`, floored, giving
/// -180..=178. Bijective with [`degrees_to_angle_raw`].
pub fn angle_raw_to_degrees(raw: u8) -> i16 {
    ((raw as i8 as i32 * 45).div_euclid(32)) as i16
}

/// Signed degrees to the angle byte; exact inverse of [`angle_raw_to_degrees`]
/// on its output range, nearest representable otherwise.
pub fn degrees_to_angle_raw(deg: i16) -> u8 {
    let deg = deg.clamp(-180, 178) as i32;
    // ceil(deg * 32 / 45): the unique raw whose floored decode is deg.
    let raw = (deg * 32 + 44).div_euclid(45);
    (raw as i8) as u8
}

/// Pitch in the last two generations carries a +90° phase on disk; the raw-64
/// threshold (raw < 64 decodes negative, >= 64 non-negative) is preserved as
/// observed behavior.
pub fn pitch_raw_to_degrees(raw: u8) -> i16 {
    let mut deg = angle_raw_to_degrees(raw) - 90;
    if deg < -180 {
        deg += 360;
    }
    deg
}

pub fn degrees_to_pitch_raw(deg: i16) -> u8 {
    let mut shifted = deg as i32 + 90;
    if shifted > 179 {
        shifted -= 360;
    }
    degrees_to_angle_raw(shifted as i16)
}

/// Delay byte to seconds: linear 5-second ticks, except the last generation's
/// two-regime encoding (exact seconds up to 20, then 5-second steps).
pub fn delay_raw_to_seconds(variant: Variant, raw: u8) -> u16 {
    if variant.caps().two_regime_delay {
        if raw <= 20 {
            raw as u16
        } else {
            20 + (raw as u16 - 20) * 5
        }
    } else {
        raw as u16 * 5
    }
}

/// Seconds to the delay byte, rounding to the nearest representable value and
/// saturating at the byte ceiling.
pub fn seconds_to_delay_raw(variant: Variant, seconds: u16) -> u8 {
    // Widened before rounding: `delay_seconds` is unbounded in the model and
    // the +2 rounding bias must not wrap near u16::MAX.
    let seconds = seconds as u32;
    if variant.caps().two_regime_delay {
        if seconds <= 20 {
            seconds as u8
        } else {
            let steps = (seconds - 20 + 2) / 5;
            (20 + steps).min(255) as u8
        }
    } else {
        ((seconds + 2) / 5).min(255) as u8
    }
}

/// Goal points to the signed quantum byte, rounding to the nearest multiple
/// and clamping to the signed-byte range.
pub fn points_to_raw(points: i16, quantum: i32) -> i8 {
    debug_assert!(quantum > 0);
    let p = points as i32;
    let half = if p >= 0 { quantum / 2 } else { -(quantum / 2) };
    ((p + half) / quantum).clamp(-128, 127) as i8
}

pub fn raw_to_points(raw: i8, quantum: i32) -> i16 {
    (raw as i32 * quantum) as i16
}
