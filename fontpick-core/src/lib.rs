//! fontpick-core: matching and substitution over installed fonts
//!
//! This library answers two questions that every text stack eventually asks:
//! "which installed font is closest to what I meant?" and "this font can't
//! draw my text, so what should I use instead?"
//!
//! ## The pipeline
//!
//! **Catalog**: a per-call snapshot of every installed face, produced by a
//! pluggable enumerator (the bundled one walks font directories and reads
//! each container with read-fonts/skrifa).
//!
//! **Matching**: exact filtering over partial queries, plus a weighted
//! distance score and a relaxation ladder that guarantee `find_best` always
//! hands back *something* sensible, even for a query nothing matches.
//!
//! **Coverage**: a lazy look into a font file's character map to decide
//! whether it can actually render a given text sample.
//!
//! **Substitution**: given a postscript name and a text sample, keep the
//! font if it covers the text, otherwise walk the catalog in style-distance
//! order until a covering face turns up.
//!
//! ## A sample conversation
//!
//! ```rust,no_run
//! use fontpick_core::manager::FontManager;
//! use fontpick_core::query::FaceQuery;
//!
//! let manager = FontManager::system()?;
//!
//! // The closest thing to a bold Arial, whatever is installed.
//! let face = manager.find_font(
//!     &FaceQuery::new().with_family("Arial").with_weight(700),
//! )?;
//! println!("{} at {}", face.postscript_name, face.path.display());
//!
//! // A face that can actually draw CJK, as close in style as possible.
//! let fallback = manager.substitute_font(&face.postscript_name, "汉字")?;
//! # Ok::<(), fontpick_core::error::Error>(())
//! ```
//!
//! The engines themselves are pure, synchronous functions over the snapshot;
//! only coverage inspection touches the filesystem. Callers that want a
//! non-blocking surface layer it on top (the fontpick CLI's HTTP server
//! dispatches through a worker task).
pub mod catalog;
pub mod coverage;
pub mod descriptor;
pub mod error;
pub mod manager;
pub mod matching;
pub mod output;
pub mod query;
pub mod scan;
pub mod substitute;
