//! Catalog snapshots and the enumerator seam.

use crate::descriptor::FontDescriptor;
use crate::error::Result;

/// Immutable, ordered snapshot of every installed face.
///
/// The engines treat a snapshot as ground truth for the duration of one
/// call; callers wanting to see font-store changes fetch a fresh one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    faces: Vec<FontDescriptor>,
}

impl Catalog {
    pub fn new(faces: Vec<FontDescriptor>) -> Self {
        Self { faces }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Faces in enumeration order. That order is the tie-break everywhere.
    pub fn faces(&self) -> &[FontDescriptor] {
        &self.faces
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontDescriptor> {
        self.faces.iter()
    }

    pub fn into_faces(self) -> Vec<FontDescriptor> {
        self.faces
    }

    /// Exact, case-sensitive postscript-name lookup. First occurrence wins
    /// if a corrupted store duplicated a name.
    pub fn by_postscript_name(&self, name: &str) -> Option<&FontDescriptor> {
        self.faces.iter().find(|face| face.postscript_name == name)
    }
}

/// Trait for enumerating installed fonts from some backing store
/// (filesystem scan, platform font registry, test fixture).
///
/// Implementations should hand back a non-empty catalog on any machine with
/// fonts installed; the matching engines treat an empty catalog as a
/// precondition violation.
pub trait CatalogProvider: Send + Sync {
    fn enumerate(&self) -> Result<Catalog>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{WEIGHT_NORMAL, WIDTH_NORMAL};
    use std::path::PathBuf;

    fn face(name: &str) -> FontDescriptor {
        FontDescriptor {
            path: PathBuf::from(format!("/fonts/{name}.ttf")),
            postscript_name: name.to_string(),
            family: name.to_string(),
            style: "Regular".to_string(),
            weight: WEIGHT_NORMAL,
            width: WIDTH_NORMAL,
            italic: false,
            monospace: false,
        }
    }

    #[test]
    fn postscript_lookup_is_case_sensitive() {
        let catalog = Catalog::new(vec![face("Alpha-Regular")]);

        assert!(catalog.by_postscript_name("Alpha-Regular").is_some());
        assert!(catalog.by_postscript_name("alpha-regular").is_none());
    }

    #[test]
    fn postscript_lookup_prefers_first_duplicate() {
        let mut second = face("Alpha-Regular");
        second.path = PathBuf::from("/fonts/shadow.ttf");
        let catalog = Catalog::new(vec![face("Alpha-Regular"), second]);

        let found = catalog.by_postscript_name("Alpha-Regular").unwrap();
        assert_eq!(found.path, PathBuf::from("/fonts/Alpha-Regular.ttf"));
    }
}
