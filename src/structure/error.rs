//! Course structure error types.

use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating a course structure.
///
/// Every variant is a configuration error: it is reported before the
/// scaffolder writes anything and before navigation mounts.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Structure file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Structure file parsing error")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported structure format `{0}` (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid course structure:\n{}", Issues(.0))]
    Invalid(Vec<Issue>),
}

/// A single problem found while validating a course structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    #[error("[{key}] category key is not a safe directory name")]
    UnsafeCategoryKey { key: String },

    #[error("[{key}] category is missing `title`")]
    MissingCategoryTitle { key: String },

    #[error("[{key}] section #{index} is missing `id`")]
    MissingId { key: String, index: usize },

    #[error("[{key}] section #{index} is missing `title`")]
    MissingTitle { key: String, index: usize },

    #[error("[{key}] section id `{id}` is not kebab-case (lowercase alphanumerics joined by single hyphens)")]
    MalformedId { key: String, id: String },

    #[error("section id `{id}` is declared in both [{first}] and [{second}]")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    #[error("section ids `{first}` and `{second}` both map to artifact name `{name}` (ignoring case)")]
    ArtifactCollision {
        name: String,
        first: String,
        second: String,
    },
}

/// Non-fatal findings, reported by `check` but never blocking a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("[{key}] category has no sections")]
    EmptyCategory { key: String },
}

/// Display adapter listing one issue per line.
struct Issues<'a>(&'a [Issue]);

impl fmt::Display for Issues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {issue}")?;
        }
        Ok(())
    }
}
