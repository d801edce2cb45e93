//! Course navigation: sidebar model, active section and first-load redirect.
//!
//! # Architecture
//!
//! ```text
//! CourseStructure (Arc, read-only)
//!        │
//!        ├── route::compute_active()   pure: path → section id
//!        │
//!        ├── tree::NavTree             grouped links, active flag
//!        │        └── render::render_html()
//!        │
//!        └── sync::Synchronizer        Idle → Redirecting → Ready
//!                 └── Effect           Navigate / ScrollToTop, applied by host
//! ```

mod render;
mod route;
mod sync;
mod tree;

pub use render::render_html;
pub use sync::{Effect, NavError, Synchronizer};
pub use tree::NavTree;

use crate::{
    config::SiteConfig,
    log,
    structure::{CourseStructure, NeighborLinks},
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;

/// JSON document printed by `syllabus nav --json`.
#[derive(Debug, Serialize)]
struct NavOutput<'a> {
    active: Option<&'a str>,
    /// Prev/next of the active section, `null` each when absent
    #[serde(flatten)]
    pager: NeighborLinks<'a>,
    #[serde(flatten)]
    tree: &'a NavTree<'a>,
}

impl<'a> NavOutput<'a> {
    fn new(active: Option<&'a str>, tree: &'a NavTree<'a>) -> Self {
        Self {
            active,
            pager: tree.pager().unwrap_or_default(),
            tree,
        }
    }
}

/// Drive a fresh synchronizer through its first load at `route`.
///
/// Mounts, runs the deferred post-commit step and, if that redirected,
/// feeds the redirect target back as the next route change, the way a host
/// router would. Returns every effect in order.
pub fn first_load(sync: &mut Synchronizer, route: &str) -> Result<Vec<Effect>, NavError> {
    sync.mount(route)?;

    let mut effects = Vec::new();
    if let Some(effect) = sync.after_commit() {
        let next = match &effect {
            Effect::Navigate(target) => Some(target.clone()),
            Effect::ScrollToTop => None,
        };
        effects.push(effect);
        if let Some(target) = next {
            effects.extend(sync.route_changed(&target)?);
        }
    }
    Ok(effects)
}

/// `syllabus nav <route>`: print the sidebar for a first load at `route`.
pub fn nav_site(config: &SiteConfig, route: &str, json: bool) -> Result<()> {
    let structure_path = config.structure_path();
    let structure = CourseStructure::from_path(structure_path)
        .with_context(|| format!("Failed to load {}", structure_path.display()))?;

    let mut sync = Synchronizer::new(
        Arc::new(structure),
        config.course.root_path.as_str(),
        config.nav.scroll_reset,
    )?;

    for effect in first_load(&mut sync, route)? {
        match effect {
            Effect::Navigate(target) => log!("nav"; "redirect {route} -> {target}"),
            Effect::ScrollToTop => log!("nav"; "scroll to top"),
        }
    }
    match sync.active() {
        Some(id) => log!("nav"; "active: {id}"),
        None => log!("nav"; "no section matches {route}"),
    }

    let tree = sync.tree();
    let output = if json {
        serde_json::to_string_pretty(&NavOutput::new(sync.active(), &tree))?
    } else {
        render_html(&tree)
    };
    println!("{}", output.trim_end());
    Ok(())
}
