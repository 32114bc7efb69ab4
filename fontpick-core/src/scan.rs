//! Filesystem enumeration into catalog snapshots.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use rayon::prelude::*;
use read_fonts::tables::name::NameId;
use read_fonts::tables::os2::SelectionFlags;
use read_fonts::{FontRef, TableProvider};
use walkdir::WalkDir;

use crate::catalog::{Catalog, CatalogProvider};
use crate::descriptor::{FontDescriptor, WEIGHT_NORMAL, WIDTH_NORMAL};
use crate::error::{Error, Result};

/// Recursive filesystem enumerator that builds fully populated descriptor
/// snapshots from the fonts under its roots.
#[derive(Debug, Clone)]
pub struct ScanProvider {
    roots: Vec<PathBuf>,
    follow_symlinks: bool,
}

impl ScanProvider {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots = roots.into_iter().map(Into::into).collect();
        Self {
            roots,
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    fn scan(&self) -> anyhow::Result<Vec<FontDescriptor>> {
        let mut files = Vec::new();

        for root in &self.roots {
            if !root.exists() {
                return Err(anyhow!("root path does not exist: {}", root.display()));
            }

            for entry in WalkDir::new(root).follow_links(self.follow_symlinks) {
                let entry = entry?;
                if entry.file_type().is_file() && is_font(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        }

        // stable catalog order across runs; it is the tie-break everywhere
        files.sort();
        files.dedup();

        let described: Vec<Vec<FontDescriptor>> = files
            .par_iter()
            // unreadable files are skipped, never fatal to the scan
            .map(|path| describe_file(path).unwrap_or_default())
            .collect();

        // first occurrence wins for duplicate postscript names, matching
        // how platform enumerators de-duplicate installed faces
        let mut seen: HashSet<String> = HashSet::new();
        let mut faces = Vec::new();
        for face in described.into_iter().flatten() {
            if seen.insert(face.postscript_name.clone()) {
                faces.push(face);
            }
        }

        Ok(faces)
    }
}

impl CatalogProvider for ScanProvider {
    fn enumerate(&self) -> Result<Catalog> {
        self.scan().map(Catalog::new).map_err(|err| Error::Enumeration {
            reason: format!("{err:#}"),
        })
    }
}

fn describe_file(path: &Path) -> anyhow::Result<Vec<FontDescriptor>> {
    let data = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    let mut faces = Vec::new();

    for font in FontRef::fonts(&data) {
        let font = font?;
        faces.push(describe_face(&font, path, font.ttc_index()));
    }

    Ok(faces)
}

fn describe_face(font: &FontRef, path: &Path, ttc_index: Option<u32>) -> FontDescriptor {
    let family = name_string(font, &[NameId::TYPOGRAPHIC_FAMILY_NAME, NameId::FAMILY_NAME])
        .unwrap_or_else(|| file_stem(path));
    let style = name_string(
        font,
        &[NameId::TYPOGRAPHIC_SUBFAMILY_NAME, NameId::SUBFAMILY_NAME],
    )
    .unwrap_or_else(|| "Regular".to_string());
    let postscript_name = name_string(font, &[NameId::POSTSCRIPT_NAME])
        .unwrap_or_else(|| synthesize_postscript_name(&family, &style));

    let (weight, width) = match font.os2() {
        Ok(table) => (
            clamp_weight(table.us_weight_class()),
            clamp_width(table.us_width_class()),
        ),
        Err(_) => (WEIGHT_NORMAL, WIDTH_NORMAL),
    };

    let styled_slanted = {
        let folded = style.to_lowercase();
        folded.contains("italic") || folded.contains("oblique")
    };
    let italic = font
        .os2()
        .map(|table| table.fs_selection().contains(SelectionFlags::ITALIC))
        .unwrap_or(false)
        || styled_slanted;

    let monospace = font
        .post()
        .map(|table| table.is_fixed_pitch() != 0)
        .unwrap_or(false);

    let path = match ttc_index {
        Some(index) => PathBuf::from(format!("{}#{index}", path.display())),
        None => path.to_path_buf(),
    };

    FontDescriptor {
        path,
        postscript_name,
        family,
        style,
        weight,
        width,
        italic,
        monospace,
    }
}

/// First non-empty Unicode name-table string among the wanted IDs, in
/// preference order.
fn name_string(font: &FontRef, wanted: &[NameId]) -> Option<String> {
    let name_table = font.name().ok()?;
    let data = name_table.string_data();

    for id in wanted {
        for record in name_table.name_record() {
            if !record.is_unicode() || record.name_id() != *id {
                continue;
            }
            if let Ok(entry) = record.string(data) {
                let rendered = entry.to_string();
                let trimmed = rendered.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }

    None
}

fn synthesize_postscript_name(family: &str, style: &str) -> String {
    let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    format!("{}-{}", strip(family), strip(style))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn clamp_weight(raw: u16) -> u16 {
    // some legacy fonts store the 1..9 scale in usWeightClass
    if (1..=9).contains(&raw) {
        return raw * 100;
    }
    raw.clamp(100, 900)
}

fn clamp_width(raw: u16) -> u8 {
    raw.clamp(1, 9) as u8
}

fn is_font(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return false,
    };

    matches!(ext.as_str(), "ttf" | "otf" | "ttc" | "otc")
}

/// Platform default font roots, overridable via `FONTPICK_FONT_DIRS`
/// (colon- or semicolon-delimited).
pub fn system_font_roots() -> anyhow::Result<Vec<PathBuf>> {
    if let Ok(raw) = env::var("FONTPICK_FONT_DIRS") {
        let mut overrides: Vec<PathBuf> = raw
            .split([':', ';'])
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .collect();

        overrides.sort();
        overrides.dedup();

        return if overrides.is_empty() {
            Err(anyhow!("FONTPICK_FONT_DIRS is set but no paths exist"))
        } else {
            Ok(overrides)
        };
    }

    let mut candidates: Vec<PathBuf> = Vec::new();

    #[cfg(target_os = "macos")]
    {
        candidates.push(PathBuf::from("/System/Library/Fonts"));
        candidates.push(PathBuf::from("/Library/Fonts"));
        if let Some(home) = env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join("Library/Fonts"));
        }
    }

    #[cfg(target_os = "linux")]
    {
        candidates.push(PathBuf::from("/usr/share/fonts"));
        candidates.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".local/share/fonts"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(system_root) = env::var_os("SYSTEMROOT") {
            candidates.push(PathBuf::from(system_root).join("Fonts"));
        }
        if let Some(local_appdata) = env::var_os("LOCALAPPDATA") {
            candidates.push(PathBuf::from(local_appdata).join("Microsoft/Windows/Fonts"));
        }
    }

    candidates.retain(|p| p.exists());
    candidates.sort();
    candidates.dedup();

    if candidates.is_empty() {
        return Err(anyhow!(
            "no system font directories found for this platform"
        ));
    }

    Ok(candidates)
}
