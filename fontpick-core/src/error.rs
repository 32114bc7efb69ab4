//! Error taxonomy for the matching and substitution engines.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by fontpick-core.
///
/// Input-validation failures (`InvalidDescriptor`, `MissingPostscriptName`,
/// `MissingSubstitutionText`) are raised before any catalog work begins.
/// `UnreadableFont` is internal to substitution searches, where it is
/// absorbed as "does not cover"; it only escapes from direct coverage calls.
#[derive(Debug, Error)]
pub enum Error {
    /// The query value at the boundary was not a structured record.
    #[error("expected a font descriptor")]
    InvalidDescriptor,

    /// Substitution was requested without a postscript name.
    #[error("expected a postscript name")]
    MissingPostscriptName,

    /// Substitution was requested without a substitution string.
    #[error("expected a substitution string")]
    MissingSubstitutionText,

    /// A font container could not be opened, or its character map is
    /// absent or malformed.
    #[error("unreadable font {path}: {reason}")]
    UnreadableFont { path: PathBuf, reason: String },

    /// The catalog provider handed back no faces at all. That violates the
    /// enumerator's documented precondition; nothing here can recover it.
    #[error("font catalog is empty")]
    EmptyCatalog,

    /// The catalog provider itself failed while enumerating.
    #[error("enumerating fonts: {reason}")]
    Enumeration { reason: String },
}

impl Error {
    pub(crate) fn unreadable(path: &std::path::Path, reason: impl ToString) -> Self {
        Error::UnreadableFont {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
