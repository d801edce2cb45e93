//! `[scaffold]` section configuration.
//!
//! Controls where and how chapter files are generated.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the scaffold report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Colored log lines (default).
    #[default]
    Text,
    /// One JSON document on stdout.
    Json,
}

/// `[scaffold]` section in syllabus.toml.
///
/// # Example
/// ```toml
/// [scaffold]
/// output = "src/chapters"
/// extension = "tsx"
/// template = "templates/chapter.tsx"
/// jobs = 4
/// report = "json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Output root; one subdirectory per category.
    #[serde(default = "defaults::scaffold::output")]
    #[educe(Default = defaults::scaffold::output())]
    pub output: PathBuf,

    /// Artifact extension, without the leading dot.
    #[serde(default = "defaults::scaffold::extension")]
    #[educe(Default = defaults::scaffold::extension())]
    pub extension: String,

    /// Optional placeholder template; the built-in one is used when unset.
    #[serde(default = "defaults::scaffold::template")]
    #[educe(Default = defaults::scaffold::template())]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Worker threads (0 = sequential).
    #[serde(default = "defaults::scaffold::jobs")]
    #[educe(Default = defaults::scaffold::jobs())]
    pub jobs: usize,

    /// Report format.
    #[serde(default)]
    pub report: ReportFormat,
}
