//! Course structure: the single source of truth for scaffolding and navigation.
//!
//! # Format
//!
//! An ordered mapping of category keys to categories. Declaration order is
//! significant everywhere: it is the navigation order, the prev/next order
//! baked into artifacts, and it decides which section the course root
//! redirects to.
//!
//! ```toml
//! [basics]
//! title = "Basics"
//!
//! [[basics.sections]]
//! id = "get-started"
//! title = "Get Started"
//!
//! [[basics.sections]]
//! id = "typography"
//! title = "Typography"
//!
//! [layout]
//! title = "Layout"
//! sections = [{ id = "grid-xxl", title = "Grid XXL" }]
//! ```
//!
//! The same shape is accepted as JSON (`course.json`).
//!
//! A [`CourseStructure`] can only be obtained through validation, so every
//! consumer may rely on ids being well-formed, globally unique and mapping to
//! distinct artifact names.

mod error;
mod neighbors;
mod validate;

pub use error::{Issue, StructureError, Warning};
pub use neighbors::{NeighborLinks, neighbors};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

// ============================================================================
// Types
// ============================================================================

/// Atomic unit of course content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Route segment and source of the artifact name
    pub id: String,
    /// Display title
    pub title: String,
}

impl Section {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Ordered group of sections, rendered as one navigation group and one
/// artifact directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Category {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }
}

/// A section together with where it lives in the structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRef<'a> {
    pub category_key: &'a str,
    pub category: &'a Category,
    /// Position within `category.sections`
    pub index: usize,
    pub section: &'a Section,
}

impl<'a> SectionRef<'a> {
    /// Previous/next sections within the same category.
    pub fn neighbors(&self) -> NeighborLinks<'a> {
        neighbors(&self.category.sections, self.index)
    }
}

/// Validated, ordered course catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CourseStructure {
    categories: IndexMap<String, Category>,
}

// ============================================================================
// Raw (unvalidated) form
// ============================================================================

/// Deserialized shape before validation. Every field is optional so that a
/// missing `id`/`title` is reported as a validation issue with its location
/// instead of an opaque parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub(crate) struct RawStructure(pub(crate) IndexMap<String, RawCategory>);

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawCategory {
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) sections: Vec<RawSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawSection {
    pub(crate) id: Option<String>,
    pub(crate) title: Option<String>,
}

// ============================================================================
// Loading
// ============================================================================

impl CourseStructure {
    /// Build a structure from ordered `(key, category)` pairs, validating it.
    #[cfg(test)]
    pub fn new<K: Into<String>>(
        categories: impl IntoIterator<Item = (K, Category)>,
    ) -> Result<Self, StructureError> {
        let raw = RawStructure(
            categories
                .into_iter()
                .map(|(key, category)| {
                    let sections = category
                        .sections
                        .into_iter()
                        .map(|s| RawSection {
                            id: Some(s.id),
                            title: Some(s.title),
                        })
                        .collect();
                    let raw = RawCategory {
                        title: Some(category.title),
                        sections,
                    };
                    (key.into(), raw)
                })
                .collect(),
        );
        validate::validate(raw)
    }

    /// Parse and validate a TOML structure.
    pub fn from_toml_str(content: &str) -> Result<Self, StructureError> {
        let raw: RawStructure = toml::from_str(content)?;
        validate::validate(raw)
    }

    /// Parse and validate a JSON structure.
    pub fn from_json_str(content: &str) -> Result<Self, StructureError> {
        let raw: RawStructure = serde_json::from_str(content)?;
        validate::validate(raw)
    }

    /// Load a structure file, choosing the format by extension.
    pub fn from_path(path: &Path) -> Result<Self, StructureError> {
        let content =
            fs::read_to_string(path).map_err(|err| StructureError::Io(path.to_path_buf(), err))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(StructureError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Categories in declaration order.
    pub fn categories(&self) -> impl ExactSizeIterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// All sections, flattened in declaration order.
    pub fn sections(&self) -> impl Iterator<Item = SectionRef<'_>> {
        self.categories.iter().flat_map(|(key, category)| {
            category
                .sections
                .iter()
                .enumerate()
                .map(move |(index, section)| SectionRef {
                    category_key: key,
                    category,
                    index,
                    section,
                })
        })
    }

    /// First section of the flattened order; the course landing target.
    pub fn first_section(&self) -> Option<&Section> {
        self.sections().next().map(|r| r.section)
    }

    /// Look a section up by its exact id.
    pub fn find(&self, id: &str) -> Option<SectionRef<'_>> {
        self.sections().find(|r| r.section.id == id)
    }

    /// Total number of sections.
    pub fn len(&self) -> usize {
        self.categories.values().map(|c| c.sections.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-fatal findings about this structure.
    pub fn warnings(&self) -> Vec<Warning> {
        self.categories
            .iter()
            .filter(|(_, c)| c.sections.is_empty())
            .map(|(key, _)| Warning::EmptyCategory { key: key.clone() })
            .collect()
    }
}
