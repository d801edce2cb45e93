//! Validation of a raw structure into a [`CourseStructure`].
//!
//! All issues are collected in a single pass so an author sees every problem
//! at once. Any issue makes the whole structure invalid.

use super::{Category, CourseStructure, Issue, RawStructure, Section, StructureError};
use crate::utils::naming::{is_kebab_id, is_safe_dir_name, to_artifact_name};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// Validate `raw`, returning the typed structure or every issue found.
pub(super) fn validate(raw: RawStructure) -> Result<CourseStructure, StructureError> {
    let mut issues = Vec::new();
    // id -> category key of first declaration
    let mut seen_ids: FxHashMap<String, String> = FxHashMap::default();
    // lowercased artifact name -> (artifact name, id that produced it)
    let mut seen_names: FxHashMap<String, (String, String)> = FxHashMap::default();
    let mut categories = IndexMap::with_capacity(raw.0.len());

    for (key, raw_category) in raw.0 {
        if !is_safe_dir_name(&key) {
            issues.push(Issue::UnsafeCategoryKey { key: key.clone() });
        }

        let title = non_blank(raw_category.title);
        if title.is_none() {
            issues.push(Issue::MissingCategoryTitle { key: key.clone() });
        }

        let mut sections = Vec::with_capacity(raw_category.sections.len());
        for (i, raw_section) in raw_category.sections.into_iter().enumerate() {
            // 1-based for humans reading the structure file
            let index = i + 1;
            let id = non_blank(raw_section.id);
            let title = non_blank(raw_section.title);

            if title.is_none() {
                issues.push(Issue::MissingTitle {
                    key: key.clone(),
                    index,
                });
            }

            let Some(id) = id else {
                issues.push(Issue::MissingId {
                    key: key.clone(),
                    index,
                });
                continue;
            };

            if !is_kebab_id(&id) {
                issues.push(Issue::MalformedId {
                    key: key.clone(),
                    id: id.clone(),
                });
            } else if let Some(first) = seen_ids.get(&id) {
                issues.push(Issue::DuplicateId {
                    id: id.clone(),
                    first: first.clone(),
                    second: key.clone(),
                });
            } else {
                seen_ids.insert(id.clone(), key.clone());

                // Case-insensitive filesystems treat `AbC` and `Abc` as one file
                let name = to_artifact_name(&id);
                match seen_names.get(&name.to_lowercase()) {
                    Some((first_name, first)) => issues.push(Issue::ArtifactCollision {
                        name: first_name.clone(),
                        first: first.clone(),
                        second: id.clone(),
                    }),
                    None => {
                        seen_names.insert(name.to_lowercase(), (name, id.clone()));
                    }
                }
            }

            if let Some(title) = title {
                sections.push(Section { id, title });
            }
        }

        if let Some(title) = title {
            categories.insert(key, Category { title, sections });
        }
    }

    if issues.is_empty() {
        Ok(CourseStructure { categories })
    } else {
        Err(StructureError::Invalid(issues))
    }
}

/// Treat empty or whitespace-only strings as missing.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
