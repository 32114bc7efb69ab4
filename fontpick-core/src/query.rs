//! Partial queries and their normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::FontDescriptor;
use crate::error::{Error, Result};

/// A partially specified set of desired traits.
///
/// Every field is independently optional; absence means "unconstrained",
/// never a search for an empty string or a zero value. The default query
/// matches the entire catalog. Numeric defaulting happens only when the
/// scoring engine needs a baseline, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postscript_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monospace: Option<bool>,
}

impl FaceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_postscript_name(mut self, name: impl Into<String>) -> Self {
        self.postscript_name = Some(name.into());
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_width(mut self, width: u8) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn with_monospace(mut self, monospace: bool) -> Self {
        self.monospace = Some(monospace);
        self
    }

    /// Normalize a possibly-absent JSON query value.
    ///
    /// `None`/`null` means unconstrained. Any present value that is not an
    /// object fails with [`Error::InvalidDescriptor`], as does a field of
    /// the wrong JSON type. Unknown keys are ignored.
    pub fn from_json(value: Option<&Value>) -> Result<Self> {
        let value = match value {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(value) => value,
        };

        if !value.is_object() {
            return Err(Error::InvalidDescriptor);
        }

        serde_json::from_value(value.clone()).map_err(|_| Error::InvalidDescriptor)
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Check whether a face exactly satisfies every supplied field.
    ///
    /// String fields compare case-insensitively; numeric and boolean fields
    /// compare exactly.
    pub fn matches(&self, face: &FontDescriptor) -> bool {
        if let Some(path) = &self.path {
            if !fold_eq(path, &face.path.to_string_lossy()) {
                return false;
            }
        }

        if let Some(name) = &self.postscript_name {
            if !fold_eq(name, &face.postscript_name) {
                return false;
            }
        }

        if let Some(family) = &self.family {
            if !fold_eq(family, &face.family) {
                return false;
            }
        }

        if let Some(style) = &self.style {
            if !fold_eq(style, &face.style) {
                return false;
            }
        }

        if let Some(weight) = self.weight {
            if weight != face.weight {
                return false;
            }
        }

        if let Some(width) = self.width {
            if width != face.width {
                return false;
            }
        }

        if let Some(italic) = self.italic {
            if italic != face.italic {
                return false;
            }
        }

        if let Some(monospace) = self.monospace {
            if monospace != face.monospace {
                return false;
            }
        }

        true
    }
}

/// Case-insensitive string equality, Unicode-aware.
pub(crate) fn fold_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
