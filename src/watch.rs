//! File system watcher for live scaffolding.
//!
//! Monitors the course structure, the config file and the custom chapter
//! template, and re-runs the scaffolder whenever one of them changes.
//! Scaffolding never overwrites, so each pass only adds chapters for new
//! sections.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Event Loop                             │
//! │                                                             │
//! │  ┌──────────┐    ┌──────────┐    ┌───────────────────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│   handle_changes()    │  │
//! │  │ events   │    │ (300ms)  │    │  reload config        │  │
//! │  └──────────┘    └──────────┘    │  scaffold_site()      │  │
//! │                                  └───────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parent directories are watched instead of the files themselves: editors
//! that save by rename would otherwise detach the watch after the first save.

use crate::{
    config::{
        SiteConfig,
        handle::{cfg, reload_config},
    },
    log,
    logger::WatchStatus,
    scaffold::scaffold_site,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Files whose changes trigger a new scaffold pass.
fn watched_files(config: &SiteConfig) -> Vec<PathBuf> {
    let mut files = vec![
        config.structure_path().to_path_buf(),
        config.config_path.clone(),
    ];
    files.extend(config.scaffold.template.clone());
    files
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events into one scaffold pass.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
        }
    }

    fn add(&mut self, event: Event, targets: &FxHashSet<PathBuf>) {
        for path in event.paths {
            if !is_temp_file(&path) && targets.contains(&path) {
                self.pending.insert(path);
            }
        }
        if !self.pending.is_empty() {
            self.last_event = Some(Instant::now());
        }
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Watch Targets
// =============================================================================

/// Watched files and the directories registered with the watcher.
#[derive(Default)]
struct Targets {
    files: FxHashSet<PathBuf>,
    dirs: FxHashSet<PathBuf>,
}

impl Targets {
    /// Register the parent directory of every watched file not yet covered.
    fn update(&mut self, watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
        self.files = watched_files(config).into_iter().collect();

        for file in &self.files {
            let Some(dir) = file.parent() else { continue };
            if self.dirs.contains(dir) || !dir.is_dir() {
                continue;
            }
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch {}", dir.display()))?;
            self.dirs.insert(dir.to_path_buf());
        }
        Ok(())
    }
}

const fn is_relevant(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}

// =============================================================================
// Event Handler
// =============================================================================

/// Reload config if it changed, then scaffold with whatever config is active.
fn handle_changes(paths: &[PathBuf], status: &mut WatchStatus) {
    let names: Vec<_> = paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy())
        .collect();
    let trigger = names.join(", ");

    match reload_config() {
        Ok(true) => log!("watch"; "config reloaded"),
        Ok(false) => {}
        Err(e) => {
            let summary = format!("{trigger} changed, config rejected");
            status.error(&summary, &format!("{e:#}"));
            return;
        }
    }

    match scaffold_site(&cfg()) {
        Ok(report) if report.is_success() => {
            if report.created().next().is_some() {
                status.success(&format!("{trigger} changed: {}", report.summary()));
            } else {
                status.unchanged(&format!("{trigger} changed: nothing new"));
            }
        }
        Ok(report) => {
            let detail: Vec<_> = report.errors().collect();
            status.error(&report.summary(), &detail.join("\n"));
        }
        Err(e) => {
            let summary = format!("{trigger} changed, scaffold aborted");
            status.error(&summary, &format!("{e:#}"));
        }
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Scaffold once, then block and re-scaffold on every relevant change.
pub fn watch_for_changes_blocking() -> Result<()> {
    let mut status = WatchStatus::new();
    match scaffold_site(&cfg()) {
        Ok(report) if report.is_success() => status.success(&report.summary()),
        Ok(report) => {
            let detail: Vec<_> = report.errors().collect();
            status.error(&report.summary(), &detail.join("\n"));
        }
        Err(e) => status.error("scaffold aborted", &format!("{e:#}")),
    }

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    let mut targets = Targets::default();
    targets.update(&mut watcher, &cfg())?;

    let mut names: Vec<_> = targets
        .files
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    names.sort();
    log!("watch"; "watching {}", names.join(", "));

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event, &targets.files),
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                handle_changes(&debouncer.take(), &mut status);
                // A reloaded config may point at other files
                targets.update(&mut watcher, &cfg())?;
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
