//! Chapter scaffolding.
//!
//! Materializes one chapter file per section:
//!
//! ```text
//! <output>/<category key>/<ArtifactName>.<ext>
//! ```
//!
//! # Guarantees
//!
//! - Existing files are never modified, whatever the template or the
//!   neighbor links would produce now. A second run over the same output
//!   skips everything the first one created.
//! - Nothing is ever deleted.
//! - Structure problems are fatal and detected before any write (a
//!   [`CourseStructure`] only exists once validated).
//! - I/O failures are recorded per artifact; the remaining artifacts are
//!   still processed and the run as a whole reports failure.
//!
//! # Architecture
//!
//! ```text
//! scaffold()
//!     │
//!     ├── plan()              structure order → Vec<Job>
//!     │
//!     ├── ensure_dirs()       create_dir_all per category (no-op if present)
//!     │
//!     └── execute()           sequential, or rayon pool when jobs > 0
//!             │
//!             └── create_new()   atomic O_EXCL create, "exists" = skipped
//! ```

mod report;
mod template;

pub use report::{ArtifactEntry, ArtifactStatus, DirFailure, ScaffoldReport};
pub use template::{BUILTIN_EXTENSIONS, ChapterContext, Template};

use crate::{
    config::SiteConfig,
    log,
    structure::{CourseStructure, NeighborLinks, SectionRef},
    utils::{
        fs::{CreateOutcome, create_new},
        naming::to_artifact_name,
    },
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Settings of one scaffold run.
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Artifact extension, without the dot
    pub extension: String,
    pub template: Template,
    /// Worker threads, 0 = sequential
    pub jobs: usize,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            extension: "md".into(),
            template: Template::Builtin,
            jobs: 0,
        }
    }
}

impl ScaffoldOptions {
    /// Options from the `[scaffold]` config section, loading the template.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let template = match &config.scaffold.template {
            Some(path) => Template::from_path(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?,
            None => Template::Builtin,
        };
        Ok(Self {
            extension: config.scaffold.extension.clone(),
            template,
            jobs: config.scaffold.jobs,
        })
    }
}

/// One planned artifact.
struct Job<'a> {
    target: SectionRef<'a>,
    name: String,
    path: PathBuf,
}

impl Job<'_> {
    fn entry(&self, status: ArtifactStatus) -> ArtifactEntry {
        ArtifactEntry {
            category: self.target.category_key.to_owned(),
            id: self.target.section.id.clone(),
            path: self.path.clone(),
            status,
        }
    }

    fn context(&self) -> ChapterContext<'_> {
        ChapterContext {
            category_key: self.target.category_key,
            category_title: &self.target.category.title,
            section: self.target.section,
            name: &self.name,
            links: self.links(),
        }
    }

    fn links(&self) -> NeighborLinks<'_> {
        self.target.neighbors()
    }
}

/// Target path of a section's artifact.
pub fn artifact_path(root_dir: &Path, category_key: &str, id: &str, extension: &str) -> PathBuf {
    root_dir
        .join(category_key)
        .join(format!("{}.{extension}", to_artifact_name(id)))
}

/// Ensure exactly one artifact exists per section under `root_dir`.
///
/// Never fails as a whole: per-artifact problems are in the report.
pub fn scaffold(
    structure: &CourseStructure,
    root_dir: &Path,
    options: &ScaffoldOptions,
) -> ScaffoldReport {
    let jobs = plan(structure, root_dir, &options.extension);
    let directories = ensure_dirs(structure, root_dir);

    let artifacts = if options.jobs == 0 {
        jobs.iter()
            .map(|job| execute(job, &directories, &options.template))
            .collect()
    } else {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()
        {
            Ok(pool) => pool.install(|| {
                jobs.par_iter()
                    .map(|job| execute(job, &directories, &options.template))
                    .collect()
            }),
            Err(e) => {
                log!("scaffold"; "thread pool unavailable ({e}), running sequentially");
                jobs.iter()
                    .map(|job| execute(job, &directories, &options.template))
                    .collect()
            }
        }
    };

    ScaffoldReport {
        artifacts,
        directories,
    }
}

/// Every section's artifact, in structure order.
fn plan<'a>(structure: &'a CourseStructure, root_dir: &Path, extension: &str) -> Vec<Job<'a>> {
    structure
        .sections()
        .map(|target| Job {
            name: to_artifact_name(&target.section.id),
            path: artifact_path(root_dir, target.category_key, &target.section.id, extension),
            target,
        })
        .collect()
}

/// Create one directory per category, including empty ones.
fn ensure_dirs(structure: &CourseStructure, root_dir: &Path) -> Vec<DirFailure> {
    let mut failures = Vec::new();
    for (key, _) in structure.categories() {
        let dir = root_dir.join(key);
        if let Err(e) = fs::create_dir_all(&dir) {
            log!("error"; "cannot create {}: {e}", dir.display());
            failures.push(DirFailure {
                category: key.to_owned(),
                error: format!("creating directory {}: {e}", dir.display()),
                path: dir,
            });
        }
    }
    failures
}

/// Create one artifact unless it already exists.
fn execute(job: &Job<'_>, dir_failures: &[DirFailure], template: &Template) -> ArtifactEntry {
    let category = job.target.category_key;
    if let Some(failure) = dir_failures.iter().find(|d| d.category == category) {
        return job.entry(ArtifactStatus::Failed {
            error: failure.error.clone(),
        });
    }

    let content = template.render(&job.context());
    match create_new(&job.path, content.as_bytes()) {
        Ok(CreateOutcome::Created) => job.entry(ArtifactStatus::Created),
        Ok(CreateOutcome::Exists) => job.entry(ArtifactStatus::Skipped),
        Err(e) => {
            log!("error"; "cannot write {}: {e}", job.path.display());
            job.entry(ArtifactStatus::Failed {
                error: format!("writing {}: {e}", job.path.display()),
            })
        }
    }
}

/// Load the configured structure and scaffold it.
///
/// Structure errors abort before anything is written.
pub fn scaffold_site(config: &SiteConfig) -> Result<ScaffoldReport> {
    let structure_path = config.structure_path();
    let structure = CourseStructure::from_path(structure_path)
        .with_context(|| format!("Failed to load {}", structure_path.display()))?;
    for warning in structure.warnings() {
        log!("warn"; "{warning}");
    }

    let options = ScaffoldOptions::from_config(config)?;
    let output = config.output_dir();

    log!("scaffold"; "{} sections -> {}", structure.len(), output.display());
    let report = scaffold(&structure, output, &options);

    for entry in report.created() {
        log!("scaffold"; "created {}", display_rel(&entry.path, output));
    }
    log!("scaffold"; "{}", report.summary());

    Ok(report)
}

/// `output`-relative path for log lines.
fn display_rel(path: &Path, output: &Path) -> String {
    path.strip_prefix(output)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Category, Section};
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn course() -> CourseStructure {
        CourseStructure::new([
            (
                "basics",
                Category::new(
                    "Basics",
                    vec![
                        Section::new("intro", "Introduction"),
                        Section::new("get-started", "Get Started"),
                        Section::new("typography", "Typography"),
                    ],
                ),
            ),
            (
                "layout",
                Category::new("Layout", vec![Section::new("grid-xxl", "Grid XXL")]),
            ),
        ])
        .unwrap()
    }

    /// Every file under `dir` with content and mtime.
    fn snapshot(dir: &Path) -> Vec<(PathBuf, String, SystemTime)> {
        let mut files: Vec<_> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let path = e.path().to_path_buf();
                let content = fs::read_to_string(&path).unwrap();
                let mtime = e.metadata().unwrap().modified().unwrap();
                (path, content, mtime)
            })
            .collect();
        files.sort_by(|a, b| a.0.cmp(&b.0));
        files
    }

    // ========================================================================
    // Layout
    // ========================================================================

    #[test]
    fn test_artifact_path() {
        let path = artifact_path(Path::new("/out"), "basics", "get-started", "ext");
        assert_eq!(path, PathBuf::from("/out/basics/GetStarted.ext"));
    }

    #[test]
    fn test_creates_one_file_per_section() {
        let dir = TempDir::new().unwrap();
        let report = scaffold(&course(), dir.path(), &ScaffoldOptions::default());

        assert!(report.is_success());
        assert_eq!(report.created().count(), 4);
        for rel in [
            "basics/Intro.md",
            "basics/GetStarted.md",
            "basics/Typography.md",
            "layout/GridXxl.md",
        ] {
            assert!(dir.path().join(rel).is_file(), "{rel} missing");
        }
    }

    #[test]
    fn test_report_in_structure_order() {
        let dir = TempDir::new().unwrap();
        let options = ScaffoldOptions {
            jobs: 4,
            ..ScaffoldOptions::default()
        };
        let report = scaffold(&course(), dir.path(), &options);

        let ids: Vec<_> = report.artifacts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["intro", "get-started", "typography", "grid-xxl"]);
        assert_eq!(report.created().count(), 4);
    }

    #[test]
    fn test_empty_category_still_gets_directory() {
        let dir = TempDir::new().unwrap();
        let course = CourseStructure::new([("later", Category::new("Later", vec![]))]).unwrap();

        let report = scaffold(&course, dir.path(), &ScaffoldOptions::default());

        assert!(report.artifacts.is_empty());
        assert!(dir.path().join("later").is_dir());
    }

    // ========================================================================
    // Idempotence / no-clobber
    // ========================================================================

    #[test]
    fn test_second_run_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let options = ScaffoldOptions::default();

        scaffold(&course(), dir.path(), &options);
        let first = snapshot(dir.path());

        let report = scaffold(&course(), dir.path(), &options);
        let second = snapshot(dir.path());

        assert_eq!(report.created().count(), 0);
        assert_eq!(report.skipped().count(), 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_file_is_not_clobbered() {
        let dir = TempDir::new().unwrap();
        let custom = dir.path().join("basics").join("GetStarted.md");
        fs::create_dir_all(custom.parent().unwrap()).unwrap();
        fs::write(&custom, "hand-written lesson \u{1F4DA}").unwrap();

        let report = scaffold(&course(), dir.path(), &ScaffoldOptions::default());

        assert_eq!(
            fs::read_to_string(&custom).unwrap(),
            "hand-written lesson \u{1F4DA}"
        );
        let entry = report
            .artifacts
            .iter()
            .find(|a| a.id == "get-started")
            .unwrap();
        assert_eq!(entry.status, ArtifactStatus::Skipped);
        assert_eq!(report.created().count(), 3);
    }

    #[test]
    fn test_changed_neighbors_do_not_rewrite() {
        let dir = TempDir::new().unwrap();
        let options = ScaffoldOptions::default();
        scaffold(&course(), dir.path(), &options);
        let before = fs::read_to_string(dir.path().join("basics/Typography.md")).unwrap();

        // Append a section after typography: its "next" link would now differ
        let grown = CourseStructure::new([(
            "basics",
            Category::new(
                "Basics",
                vec![
                    Section::new("intro", "Introduction"),
                    Section::new("get-started", "Get Started"),
                    Section::new("typography", "Typography"),
                    Section::new("colors", "Colors"),
                ],
            ),
        )])
        .unwrap();
        let report = scaffold(&grown, dir.path(), &options);

        let after = fs::read_to_string(dir.path().join("basics/Typography.md")).unwrap();
        assert_eq!(before, after);
        let created: Vec<_> = report.created().map(|a| a.id.as_str()).collect();
        assert_eq!(created, ["colors"]);
        let colors = fs::read_to_string(dir.path().join("basics/Colors.md")).unwrap();
        assert!(colors.contains("Previous: [Typography](typography)"));
    }

    // ========================================================================
    // Neighbor linkage
    // ========================================================================

    #[test]
    fn test_neighbor_links_in_content() {
        let dir = TempDir::new().unwrap();
        let options = ScaffoldOptions {
            template: Template::Custom("prev={{prev}};next={{next}}".into()),
            ..ScaffoldOptions::default()
        };
        scaffold(&course(), dir.path(), &options);

        let read = |rel: &str| fs::read_to_string(dir.path().join(rel)).unwrap();
        assert_eq!(read("basics/Intro.md"), "prev=;next=get-started");
        assert_eq!(read("basics/GetStarted.md"), "prev=intro;next=typography");
        assert_eq!(read("basics/Typography.md"), "prev=get-started;next=");
        // Linkage never crosses categories
        assert_eq!(read("layout/GridXxl.md"), "prev=;next=");
    }

    // ========================================================================
    // Failures
    // ========================================================================

    #[test]
    fn test_directory_failure_is_per_category() {
        let dir = TempDir::new().unwrap();
        // A file where the `basics` directory should go
        fs::write(dir.path().join("basics"), "not a directory").unwrap();

        let report = scaffold(&course(), dir.path(), &ScaffoldOptions::default());

        assert!(!report.is_success());
        assert_eq!(report.failed().count(), 3);
        assert!(report.failed().all(|a| a.category == "basics"));
        assert_eq!(report.created().count(), 1);
        assert!(dir.path().join("layout/GridXxl.md").is_file());
        assert_eq!(report.directories.len(), 1);
        assert_eq!(report.directories[0].category, "basics");
    }

    #[test]
    fn test_empty_category_directory_failure_fails_run() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("later"), "not a directory").unwrap();
        let course = CourseStructure::new([
            (
                "basics",
                Category::new("Basics", vec![Section::new("intro", "Introduction")]),
            ),
            ("later", Category::new("Later", vec![])),
        ])
        .unwrap();

        let report = scaffold(&course, dir.path(), &ScaffoldOptions::default());

        assert!(!dir.path().join("later").is_dir());
        assert_eq!(report.created().count(), 1);
        assert_eq!(report.failed().count(), 0);
        assert_eq!(report.directories.len(), 1);
        assert_eq!(report.directories[0].category, "later");
        assert_eq!(report.directories[0].path, dir.path().join("later"));
        assert!(!report.is_success());
    }

    #[test]
    fn test_scaffold_site_rejects_duplicate_ids_before_writing() {
        let dir = TempDir::new().unwrap();
        let structure = dir.path().join("course.toml");
        fs::write(
            &structure,
            r#"
            [basics]
            title = "Basics"
            sections = [{ id = "foo", title = "Foo" }, { id = "bar", title = "Bar" }]

            [layout]
            title = "Layout"
            sections = [{ id = "foo", title = "Foo again" }]
            "#,
        )
        .unwrap();
        let output = dir.path().join("chapters");
        let mut config = SiteConfig::default();
        config.course.structure = structure;
        config.scaffold.output = output.clone();

        let err = scaffold_site(&config).unwrap_err();

        assert!(format!("{err:#}").contains("`foo` is declared in both"));
        assert!(!output.exists());
    }

    #[test]
    fn test_scaffold_site_with_template_file() {
        let dir = TempDir::new().unwrap();
        let structure = dir.path().join("course.json");
        fs::write(
            &structure,
            r#"{ "basics": { "title": "Basics", "sections": [{ "id": "intro", "title": "Intro" }] } }"#,
        )
        .unwrap();
        let template = dir.path().join("chapter.tsx");
        fs::write(&template, "export default function {{name}}() {}").unwrap();

        let mut config = SiteConfig::default();
        config.course.structure = structure;
        config.scaffold.output = dir.path().join("src");
        config.scaffold.extension = "tsx".into();
        config.scaffold.template = Some(template);

        let report = scaffold_site(&config).unwrap();

        assert!(report.is_success());
        let content = fs::read_to_string(dir.path().join("src/basics/Intro.tsx")).unwrap();
        assert_eq!(content, "export default function Intro() {}");
    }
}
