//! Structure validation and on-disk consistency check.
//!
//! `syllabus check` loads the structure (any problem is fatal and listed in
//! full), then compares the output root with what the structure calls for:
//!
//! | Finding  | Meaning                                              |
//! |----------|------------------------------------------------------|
//! | missing  | section without a chapter file yet (run `scaffold`)  |
//! | orphaned | chapter file that matches no section (never deleted) |

use crate::{config::SiteConfig, log, scaffold::artifact_path, structure::CourseStructure};
use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of comparing a structure with an output root.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Consistency {
    /// Expected chapter files that do not exist yet
    pub missing: Vec<PathBuf>,
    /// Chapter files with the scaffold extension that no section owns
    pub orphaned: Vec<PathBuf>,
}

/// Compare the chapters under `root_dir` with `structure`.
pub fn consistency(structure: &CourseStructure, root_dir: &Path, extension: &str) -> Consistency {
    let expected: Vec<PathBuf> = structure
        .sections()
        .map(|r| artifact_path(root_dir, r.category_key, &r.section.id, extension))
        .collect();

    let missing = expected.iter().filter(|p| !p.is_file()).cloned().collect();

    let expected: FxHashSet<&Path> = expected.iter().map(PathBuf::as_path).collect();
    let mut orphaned: Vec<PathBuf> = if root_dir.is_dir() {
        WalkDir::new(root_dir)
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
            .map(|e| e.into_path())
            .filter(|p| !expected.contains(p.as_path()))
            .collect()
    } else {
        Vec::new()
    };
    orphaned.sort();

    Consistency { missing, orphaned }
}

/// `syllabus check`: validate the structure and report disk drift.
pub fn check_site(config: &SiteConfig) -> Result<()> {
    let structure_path = config.structure_path();
    let structure = CourseStructure::from_path(structure_path)
        .with_context(|| format!("Failed to load {}", structure_path.display()))?;

    let categories = structure.categories().len();
    log!("check"; "{} categories, {} sections: ok", categories, structure.len());
    for warning in structure.warnings() {
        log!("warn"; "{warning}");
    }

    let output = config.output_dir();
    let report = consistency(&structure, output, &config.scaffold.extension);
    for path in &report.missing {
        log!("check"; "missing: {}", rel(path, output));
    }
    for path in &report.orphaned {
        log!("warn"; "orphaned: {}", rel(path, output));
    }
    log!(
        "check";
        "{} missing, {} orphaned",
        report.missing.len(),
        report.orphaned.len()
    );

    Ok(())
}

fn rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
