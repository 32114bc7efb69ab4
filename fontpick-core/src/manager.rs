//! Caller-facing operations over injected collaborators.

use std::path::PathBuf;

use crate::catalog::{Catalog, CatalogProvider};
use crate::coverage::{FaceReader, FontationsReader};
use crate::descriptor::FontDescriptor;
use crate::error::{Error, Result};
use crate::matching::{find_all, find_best};
use crate::query::FaceQuery;
use crate::scan::{system_font_roots, ScanProvider};
use crate::substitute;

/// The blocking front door: the four operations of the public surface over
/// a pluggable enumerator and container reader.
///
/// Every call enumerates a fresh snapshot, so font-store changes between
/// calls are always visible. Non-blocking variants belong at the caller's
/// boundary (worker task, thread pool); the engines themselves stay
/// synchronous.
pub struct FontManager {
    provider: Box<dyn CatalogProvider>,
    reader: Box<dyn FaceReader>,
}

impl FontManager {
    pub fn new(provider: Box<dyn CatalogProvider>, reader: Box<dyn FaceReader>) -> Self {
        Self { provider, reader }
    }

    /// Manager over the platform's default font directories.
    pub fn system() -> Result<Self> {
        let roots = system_font_roots().map_err(|err| Error::Enumeration {
            reason: format!("{err:#}"),
        })?;
        Ok(Self::scanning(roots))
    }

    /// Manager scanning the given directory roots with the fontations reader.
    pub fn scanning<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(
            Box::new(ScanProvider::new(roots)),
            Box::new(FontationsReader),
        )
    }

    /// Every installed face, in catalog order.
    pub fn available_fonts(&self) -> Result<Vec<FontDescriptor>> {
        Ok(self.snapshot()?.into_faces())
    }

    /// Every face exactly matching the query, in catalog order. May be
    /// empty; never synthesizes a substitute.
    pub fn find_fonts(&self, query: &FaceQuery) -> Result<Vec<FontDescriptor>> {
        let catalog = self.snapshot()?;
        Ok(find_all(&catalog, query))
    }

    /// The single best face for the query. Never a "not found": the
    /// relaxation ladder guarantees a result from any non-empty catalog.
    pub fn find_font(&self, query: &FaceQuery) -> Result<FontDescriptor> {
        let catalog = self.snapshot()?;
        find_best(&catalog, query).ok_or(Error::EmptyCatalog)
    }

    /// Substitute the named face with one covering `text`; see
    /// [`substitute::substitute`]. Argument validation happens before the
    /// catalog is enumerated.
    pub fn substitute_font(&self, postscript_name: &str, text: &str) -> Result<FontDescriptor> {
        substitute::validate_args(postscript_name, text)?;
        let catalog = self.snapshot()?;
        substitute::substitute(&catalog, self.reader.as_ref(), postscript_name, text)
    }

    fn snapshot(&self) -> Result<Catalog> {
        self.provider.enumerate()
    }
}
