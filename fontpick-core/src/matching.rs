//! Exact filtering, distance scoring, and the guaranteed-best relaxation ladder.

use crate::catalog::Catalog;
use crate::descriptor::{FontDescriptor, WEIGHT_NORMAL, WIDTH_NORMAL};
use crate::query::{fold_eq, FaceQuery};

// One width step or a slant/spacing flip is visually drastic; a weight step
// is perceptually continuous; a family mismatch outranks any combination of
// trait mismatches.
const WEIGHT_UNIT_PENALTY: u32 = 1;
const WIDTH_UNIT_PENALTY: u32 = 50;
const SLANT_PENALTY: u32 = 400;
const SPACING_PENALTY: u32 = 400;
const FAMILY_PENALTY: u32 = 1000;

/// Every catalog face that exactly matches all supplied query fields, in
/// catalog order. May be empty; never synthesizes a substitute.
pub fn find_all(catalog: &Catalog, query: &FaceQuery) -> Vec<FontDescriptor> {
    catalog
        .iter()
        .filter(|face| query.matches(face))
        .cloned()
        .collect()
}

/// Weighted distance between a candidate and the query.
///
/// Traits the query never supplied fall back to the comparison baseline
/// (weight 400, width 4, upright, proportional); an unsupplied family costs
/// nothing. Family mismatch is a flat penalty, not a string distance.
pub fn score(face: &FontDescriptor, query: &FaceQuery) -> u32 {
    let weight = query.weight.unwrap_or(WEIGHT_NORMAL);
    let width = query.width.unwrap_or(WIDTH_NORMAL);
    let italic = query.italic.unwrap_or(false);
    let monospace = query.monospace.unwrap_or(false);

    let mut total =
        (i32::from(face.weight) - i32::from(weight)).unsigned_abs() * WEIGHT_UNIT_PENALTY;
    total += (i32::from(face.width) - i32::from(width)).unsigned_abs() * WIDTH_UNIT_PENALTY;

    if face.italic != italic {
        total += SLANT_PENALTY;
    }
    if face.monospace != monospace {
        total += SPACING_PENALTY;
    }
    if let Some(family) = &query.family {
        if !fold_eq(family, &face.family) {
            total += FAMILY_PENALTY;
        }
    }

    total
}

/// Progressive constraint relaxation for `find_best`.
///
/// The most fragile fields drop first: `path`, then `postscript_name`, then
/// `style`. The final rung is the unconstrained query, which turns the
/// remaining hard constraints (family and the four traits) into soft
/// scoring signals over the entire catalog. Rungs that would repeat their
/// predecessor are skipped.
pub fn relaxation_ladder(query: &FaceQuery) -> Vec<FaceQuery> {
    let mut rungs = vec![query.clone()];
    let mut relaxed = query.clone();

    relaxed.path = None;
    push_if_changed(&mut rungs, &relaxed);
    relaxed.postscript_name = None;
    push_if_changed(&mut rungs, &relaxed);
    relaxed.style = None;
    push_if_changed(&mut rungs, &relaxed);

    push_if_changed(&mut rungs, &FaceQuery::default());
    rungs
}

fn push_if_changed(rungs: &mut Vec<FaceQuery>, rung: &FaceQuery) {
    if rungs.last() != Some(rung) {
        rungs.push(rung.clone());
    }
}

/// The single best face for a query; `None` only for an empty catalog.
///
/// Walks the relaxation ladder and, on the first rung with any exact match,
/// returns the lowest-scoring candidate against the original query. Ties
/// break toward catalog order, deterministically.
pub fn find_best(catalog: &Catalog, query: &FaceQuery) -> Option<FontDescriptor> {
    for rung in relaxation_ladder(query) {
        let candidates = catalog.iter().filter(|face| rung.matches(face));
        if let Some(face) = lowest_scoring(candidates, query) {
            return Some(face.clone());
        }
    }

    None
}

/// All catalog faces ranked by ascending score against the query; equal
/// scores keep catalog order. This is the candidate order substitution
/// walks when it has to coverage-test lazily.
pub fn rank_all(catalog: &Catalog, query: &FaceQuery) -> Vec<(u32, FontDescriptor)> {
    let mut ranked: Vec<(u32, FontDescriptor)> = catalog
        .iter()
        .map(|face| (score(face, query), face.clone()))
        .collect();

    // sort_by_key is stable, so catalog order survives as the tie-break
    ranked.sort_by_key(|(score, _)| *score);
    ranked
}

fn lowest_scoring<'a>(
    candidates: impl Iterator<Item = &'a FontDescriptor>,
    query: &FaceQuery,
) -> Option<&'a FontDescriptor> {
    let mut best: Option<(u32, &FontDescriptor)> = None;

    for face in candidates {
        let score = score(face, query);
        // strict comparison keeps the earliest of equally scored faces
        if best.map_or(true, |(lowest, _)| score < lowest) {
            best = Some((score, face));
        }
    }

    best.map(|(_, face)| face)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::WIDTH_EXPANDED;
    use std::path::PathBuf;

    fn face(name: &str, weight: u16, width: u8, italic: bool) -> FontDescriptor {
        FontDescriptor {
            path: PathBuf::from(format!("/fonts/{name}.ttf")),
            postscript_name: name.to_string(),
            family: "Alpha".to_string(),
            style: "Regular".to_string(),
            weight,
            width,
            italic,
            monospace: false,
        }
    }

    #[test]
    fn score_is_zero_for_exact_trait_match() {
        let query = FaceQuery::new()
            .with_family("alpha")
            .with_weight(700)
            .with_width(WIDTH_EXPANDED)
            .with_italic(true);
        let candidate = face("Alpha-BoldExpandedItalic", 700, WIDTH_EXPANDED, true);

        assert_eq!(score(&candidate, &query), 0);
    }

    #[test]
    fn score_weights_width_over_weight() {
        let query = FaceQuery::new().with_weight(400).with_width(4);
        let off_weight = face("A", 500, 4, false);
        let off_width = face("B", 400, 5, false);

        assert_eq!(score(&off_weight, &query), 100);
        assert_eq!(score(&off_width, &query), 50);
    }

    #[test]
    fn unsupplied_family_costs_nothing() {
        let query = FaceQuery::new().with_weight(400).with_width(4);
        let candidate = face("A", 400, 4, false);

        assert_eq!(score(&candidate, &query), 0);
    }

    #[test]
    fn ladder_drops_fields_in_fragility_order() {
        let query = FaceQuery::new()
            .with_path("/fonts/gone.ttf")
            .with_postscript_name("Gone-Regular")
            .with_style("Regular")
            .with_family("Gone");

        let rungs = relaxation_ladder(&query);
        assert_eq!(rungs.len(), 5);
        assert!(rungs[1].path.is_none());
        assert!(rungs[1].postscript_name.is_some());
        assert!(rungs[2].postscript_name.is_none());
        assert!(rungs[2].style.is_some());
        assert!(rungs[3].style.is_none());
        assert_eq!(rungs[3].family.as_deref(), Some("Gone"));
        assert!(rungs[4].is_unconstrained());
    }

    #[test]
    fn ladder_skips_rungs_that_change_nothing() {
        let rungs = relaxation_ladder(&FaceQuery::new().with_family("Alpha"));
        assert_eq!(rungs.len(), 2);
        assert_eq!(rungs[0].family.as_deref(), Some("Alpha"));
        assert!(rungs[1].is_unconstrained());
    }

    #[test]
    fn ladder_for_empty_query_is_a_single_rung() {
        assert_eq!(relaxation_ladder(&FaceQuery::new()).len(), 1);
    }
}
