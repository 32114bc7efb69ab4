//! Glyph coverage inspection over font containers.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use skrifa::{FontRef, MetadataProvider};

use crate::descriptor::FontDescriptor;
use crate::error::{Error, Result};

/// The set of code points a face maps to a live glyph (anything but the
/// missing-glyph sentinel, glyph 0).
#[derive(Debug, Clone, Default)]
pub struct Coverage {
    codepoints: HashSet<u32>,
}

impl Coverage {
    pub fn from_codepoints(codepoints: impl IntoIterator<Item = u32>) -> Self {
        Self {
            codepoints: codepoints.into_iter().collect(),
        }
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.codepoints.contains(&codepoint)
    }

    pub fn len(&self) -> usize {
        self.codepoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty()
    }
}

/// Reads the character-to-glyph table of a font container.
///
/// This is the sole blocking seam in the engines; implementations are
/// injected so the substitution search can be exercised without disk I/O.
/// Concurrent reads of different paths are independent.
pub trait FaceReader: Send + Sync {
    fn coverage(&self, path: &Path) -> Result<Coverage>;
}

/// Production reader on the fontations stack (read-fonts/skrifa).
///
/// Understands the `#<index>` suffix descriptors use for TTC/OTC members.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontationsReader;

impl FaceReader for FontationsReader {
    fn coverage(&self, path: &Path) -> Result<Coverage> {
        let (file, index) = split_collection_path(path);
        let data = fs::read(&file).map_err(|err| Error::unreadable(path, err))?;

        let font = match index {
            Some(idx) => FontRef::from_index(&data, idx),
            None => FontRef::new(&data),
        }
        .map_err(|err| Error::unreadable(path, err))?;

        let codepoints: HashSet<u32> = font
            .charmap()
            .mappings()
            .filter(|(_, glyph)| glyph.to_u32() != 0)
            .map(|(codepoint, _)| codepoint)
            .collect();

        if codepoints.is_empty() {
            return Err(Error::unreadable(path, "no usable character map"));
        }

        Ok(Coverage::from_codepoints(codepoints))
    }
}

/// True when every Unicode scalar value in `text` maps to a live glyph.
///
/// Each scalar is checked independently, including the pieces of
/// multi-scalar grapheme clusters. Empty text trivially covers without
/// opening the container.
pub fn covers(reader: &dyn FaceReader, face: &FontDescriptor, text: &str) -> Result<bool> {
    if text.is_empty() {
        return Ok(true);
    }

    let coverage = reader.coverage(&face.path)?;
    Ok(text.chars().all(|ch| coverage.contains(ch as u32)))
}

fn split_collection_path(path: &Path) -> (PathBuf, Option<u32>) {
    let raw = path.to_string_lossy();
    if let Some((file, index)) = raw.rsplit_once('#') {
        if let Ok(index) = index.parse::<u32>() {
            return (PathBuf::from(file), Some(index));
        }
    }

    (path.to_path_buf(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{WEIGHT_NORMAL, WIDTH_NORMAL};

    struct RefusingReader;

    impl FaceReader for RefusingReader {
        fn coverage(&self, path: &Path) -> Result<Coverage> {
            Err(Error::unreadable(path, "should not be consulted"))
        }
    }

    fn face() -> FontDescriptor {
        FontDescriptor {
            path: PathBuf::from("/fonts/Alpha.ttf"),
            postscript_name: "Alpha-Regular".to_string(),
            family: "Alpha".to_string(),
            style: "Regular".to_string(),
            weight: WEIGHT_NORMAL,
            width: WIDTH_NORMAL,
            italic: false,
            monospace: false,
        }
    }

    #[test]
    fn empty_text_covers_without_opening_the_container() {
        assert!(covers(&RefusingReader, &face(), "").unwrap());
    }

    #[test]
    fn checks_every_scalar_value() {
        struct LatinReader;
        impl FaceReader for LatinReader {
            fn coverage(&self, _: &Path) -> Result<Coverage> {
                Ok(Coverage::from_codepoints(0x20..0x7F))
            }
        }

        assert!(covers(&LatinReader, &face(), "hi there").unwrap());
        assert!(!covers(&LatinReader, &face(), "hi 汉").unwrap());
        // a multi-scalar grapheme fails on its combining mark alone
        assert!(!covers(&LatinReader, &face(), "e\u{0301}").unwrap());
    }

    #[test]
    fn splits_collection_member_suffix() {
        let (file, index) = split_collection_path(Path::new("/fonts/All.ttc#2"));
        assert_eq!(file, PathBuf::from("/fonts/All.ttc"));
        assert_eq!(index, Some(2));

        let (file, index) = split_collection_path(Path::new("/fonts/Plain.ttf"));
        assert_eq!(file, PathBuf::from("/fonts/Plain.ttf"));
        assert_eq!(index, None);
    }

    #[test]
    fn missing_file_reports_unreadable() {
        let mut gone = face();
        gone.path = PathBuf::from("/definitely/not/here.ttf");

        let err = covers(&FontationsReader, &gone, "hi").unwrap_err();
        assert!(matches!(err, Error::UnreadableFont { .. }));
    }
}
