//! Font face descriptors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Weight landmarks on the 100..=900 scale.
pub const WEIGHT_NORMAL: u16 = 400;
pub const WEIGHT_BOLD: u16 = 700;

/// Width landmarks on the 1..=9 scale.
pub const WIDTH_CONDENSED: u8 = 3;
pub const WIDTH_NORMAL: u8 = 4;
pub const WIDTH_EXPANDED: u8 = 7;

/// A fully populated record describing one installed font face.
///
/// Descriptors are produced by a catalog snapshot or returned from the
/// engines; every field always carries a concrete value. `path` is unique
/// per face for the life of the process; members of a TTC/OTC collection
/// carry a `#<index>` suffix to keep that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDescriptor {
    pub path: PathBuf,
    /// Globally-intended unique identifier for the face. Treated as unique
    /// for lookup even though a corrupted store could duplicate it.
    pub postscript_name: String,
    /// Human-readable family name; many faces share one family.
    pub family: String,
    /// Human-readable style name ("Bold Italic"), free text.
    pub style: String,
    /// 100..=900; normal 400, bold 700.
    pub weight: u16,
    /// 1..=9; condensed 3, normal 4, expanded 7.
    pub width: u8,
    pub italic: bool,
    pub monospace: bool,
}
