//! # sortie — mission-file codecs for a four-generation binary format family
//!
//! Models, decodes, encodes, and cross-converts mission files for four
//! successive binary formats of a tactical flight-combat simulation series.
//! Each generation encodes the same conceptual domain (flight groups, orders,
//! triggers and goals, in-flight messages, teams, scripted briefings) with
//! different field widths, value units, bit packing, and capacity limits.
//!
//! ## Layers
//!
//! - [`model`]: the unified in-memory mission, unit-normalized (signed
//!   degrees, seconds, real point values, one-based craft counts)
//! - [`codec`]: per-generation binary decode/encode with signature sniffing
//!   and a backup-then-restore save discipline
//! - [`convert`]: fallible neighbor-generation conversion reporting every
//!   dropped field
//! - [`refs`]: index rewriting that keeps cross-entity references valid when
//!   collections are edited
//! - [`collection`]: the bounded, ordered entity container everything sits in
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! let mission = sortie::codec::load(Path::new("attack.msn"))?;
//! let converted = sortie::convert::convert_mission(&mission, sortie::Variant::V3)?;
//! for tag in &converted.dropped {
//!     eprintln!("dropped: {}", tag);
//! }
//! sortie::codec::save(&converted.value, Path::new("attack_v3.msn"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod codec;
pub mod collection;
pub mod convert;
pub mod cursor;
pub mod dump;
pub mod model;
pub mod refs;
pub mod variant;

pub use codec::{decode, encode, load, save, sniff, FormatError};
pub use collection::{BoundedCollection, CollectionError};
pub use convert::{convert_mission, ConversionError, Converted, FieldTag};
pub use model::{FieldError, FlightGroup, Mission};
pub use refs::{transform_references, RefKind};
pub use variant::{FormatCaps, Variant};
