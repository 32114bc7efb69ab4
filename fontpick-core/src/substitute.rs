//! Style-preserving font substitution.

use crate::catalog::Catalog;
use crate::coverage::{covers, FaceReader};
use crate::descriptor::FontDescriptor;
use crate::error::{Error, Result};
use crate::matching::rank_all;
use crate::query::FaceQuery;

/// Replace the face named by `postscript_name` with one that can render
/// `text`, preserving style as closely as possible.
///
/// Always returns a fully populated descriptor for well-formed arguments:
/// the origin face itself when it already covers the text, otherwise the
/// lowest-scoring covering face. When nothing installed covers the text at
/// all, the lowest-scoring face is returned regardless of coverage, so
/// callers always get a style-appropriate answer.
///
/// Coverage-read failures count as "does not cover"; a single unreadable
/// font never aborts the search.
pub fn substitute(
    catalog: &Catalog,
    reader: &dyn FaceReader,
    postscript_name: &str,
    text: &str,
) -> Result<FontDescriptor> {
    validate_args(postscript_name, text)?;

    if catalog.is_empty() {
        return Err(Error::EmptyCatalog);
    }

    let origin = catalog.by_postscript_name(postscript_name);

    if let Some(origin) = origin {
        if covers(reader, origin, text).unwrap_or(false) {
            return Ok(origin.clone());
        }
    }

    // Carry the origin's traits over; style, postscript name, and path
    // would only pin us to the face we are trying to escape.
    let query = match origin {
        Some(origin) => FaceQuery::new()
            .with_family(origin.family.clone())
            .with_weight(origin.weight)
            .with_width(origin.width)
            .with_italic(origin.italic)
            .with_monospace(origin.monospace),
        None => FaceQuery::default(),
    };

    // Coverage is the expensive step, so walk candidates best-first and
    // stop at the first that can render the text.
    let ranked = rank_all(catalog, &query);
    for (_, candidate) in &ranked {
        if covers(reader, candidate, text).unwrap_or(false) {
            return Ok(candidate.clone());
        }
    }

    // Nothing installed covers the text; style fidelity wins over coverage.
    ranked
        .into_iter()
        .next()
        .map(|(_, face)| face)
        .ok_or(Error::EmptyCatalog)
}

/// Argument validation, surfaced before any catalog work begins.
pub(crate) fn validate_args(postscript_name: &str, text: &str) -> Result<()> {
    if postscript_name.is_empty() {
        return Err(Error::MissingPostscriptName);
    }
    if text.is_empty() {
        return Err(Error::MissingSubstitutionText);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_arguments_in_order() {
        assert!(matches!(
            validate_args("", "hi"),
            Err(Error::MissingPostscriptName)
        ));
        assert!(matches!(
            validate_args("Alpha-Regular", ""),
            Err(Error::MissingSubstitutionText)
        ));
        assert!(matches!(validate_args("", ""), Err(Error::MissingPostscriptName)));
        assert!(validate_args("Alpha-Regular", "hi").is_ok());
    }
}
