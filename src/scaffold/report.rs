//! Scaffold run report.
//!
//! The report is the primary output of `syllabus scaffold`: it lists every
//! artifact the structure calls for, in structure order, with what happened
//! to it. Serialized as JSON it looks like:
//!
//! ```json
//! {
//!   "ok": false,
//!   "created": 1, "skipped": 1, "failed": 1,
//!   "directories": [],
//!   "artifacts": [
//!     { "category": "basics", "id": "intro", "path": "...", "status": "created" },
//!     { "category": "basics", "id": "get-started", "path": "...", "status": "skipped" },
//!     { "category": "layout", "id": "grid", "path": "...", "status": "failed", "error": "..." }
//!   ]
//! }
//! ```

use serde::Serialize;
use std::path::PathBuf;

/// What happened to one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ArtifactStatus {
    /// File was absent and has been written.
    Created,
    /// File already existed and was left untouched.
    Skipped,
    /// Directory or file creation failed.
    Failed { error: String },
}

/// One artifact entry of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactEntry {
    pub category: String,
    pub id: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: ArtifactStatus,
}

/// A category directory that could not be created.
///
/// Recorded once per category, so a failing empty category still fails the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirFailure {
    pub category: String,
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a whole scaffold run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// One entry per section, in structure order
    pub artifacts: Vec<ArtifactEntry>,
    /// Category directories that could not be created, in structure order
    pub directories: Vec<DirFailure>,
}

impl ScaffoldReport {
    pub fn created(&self) -> impl Iterator<Item = &ArtifactEntry> {
        self.with_status(|s| matches!(s, ArtifactStatus::Created))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ArtifactEntry> {
        self.with_status(|s| matches!(s, ArtifactStatus::Skipped))
    }

    pub fn failed(&self) -> impl Iterator<Item = &ArtifactEntry> {
        self.with_status(|s| matches!(s, ArtifactStatus::Failed { .. }))
    }

    fn with_status(
        &self,
        pred: impl Fn(&ArtifactStatus) -> bool,
    ) -> impl Iterator<Item = &ArtifactEntry> {
        self.artifacts.iter().filter(move |a| pred(&a.status))
    }

    /// `true` when no artifact and no directory failed.
    pub fn is_success(&self) -> bool {
        self.failed().next().is_none() && self.directories.is_empty()
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} created, {} skipped, {} failed",
            self.created().count(),
            self.skipped().count(),
            self.failed().count()
        );
        if !self.directories.is_empty() {
            summary.push_str(&format!(", {} directories failed", self.directories.len()));
        }
        summary
    }

    /// Error messages of every failed directory and artifact.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        let dirs = self.directories.iter().map(|d| d.error.as_str());
        let artifacts = self.artifacts.iter().filter_map(|a| match &a.status {
            ArtifactStatus::Failed { error } => Some(error.as_str()),
            _ => None,
        });
        dirs.chain(artifacts)
    }

    /// Pretty JSON document for stdout.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&JsonReport {
            ok: self.is_success(),
            created: self.created().count(),
            skipped: self.skipped().count(),
            failed: self.failed().count(),
            directories: &self.directories,
            artifacts: &self.artifacts,
        })
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    ok: bool,
    created: usize,
    skipped: usize,
    failed: usize,
    directories: &'a [DirFailure],
    artifacts: &'a [ArtifactEntry],
}
