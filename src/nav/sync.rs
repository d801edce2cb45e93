//! Navigation state machine for one mounted sidebar.
//!
//! ```text
//!            mount(root)              after_commit()
//!   Idle ───────────────► Redirecting ───────────────► Ready ◄─┐
//!     │                        │  route_changed(section)  │     │ route_changed()
//!     │ mount(section)         └─────────────────────────►│─────┘
//!     └──────────────────────────────────────────────────►┘
//! ```
//!
//! The synchronizer never touches a router or the DOM. It returns
//! [`Effect`]s for the host to apply:
//!
//! - The redirect to the first section is only issued from
//!   [`Synchronizer::after_commit`], the deferred step the host runs once the
//!   initial render is committed. It fires at most once per instance.
//! - If the route reported right after that redirect is still the course
//!   root, the route scheme is misconfigured. That is a
//!   [`NavError::RedirectLoop`], never a second redirect.

use super::{
    route::{compute_active, is_course_root, section_route},
    tree::NavTree,
};
use crate::structure::CourseStructure;
use std::sync::Arc;
use thiserror::Error;

/// Navigation errors. All of them are configuration problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("course structure has no sections, nothing to redirect to")]
    EmptyStructure,

    #[error("redirect to `{target}` landed on the course root again; check [course.root_path]")]
    RedirectLoop { target: String },

    #[error("course root path `{0}` must start with `/`")]
    InvalidRootPath(String),

    #[error("navigation is already mounted")]
    AlreadyMounted,

    #[error("route changed before mount")]
    NotMounted,
}

/// Side effect requested from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the current route.
    Navigate(String),
    /// Reset the page scroll position to the top.
    ScrollToTop,
}

/// Lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Mounted on the course root; redirect to this section id pending until after commit.
    Redirecting(String),
    Ready,
}

/// Per-instance navigation state.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    structure: Arc<CourseStructure>,
    root_path: String,
    scroll_reset: bool,
    phase: Phase,
    active: Option<String>,
    /// Route of a redirect whose arrival has not been observed yet
    pending_redirect: Option<String>,
    redirect_fired: bool,
}

impl Synchronizer {
    /// Create an unmounted instance.
    ///
    /// Refuses a structure without sections: the course root would have no
    /// redirect target.
    pub fn new(
        structure: Arc<CourseStructure>,
        root_path: impl Into<String>,
        scroll_reset: bool,
    ) -> Result<Self, NavError> {
        let root_path = root_path.into();
        if !root_path.starts_with('/') {
            return Err(NavError::InvalidRootPath(root_path));
        }
        if structure.is_empty() {
            return Err(NavError::EmptyStructure);
        }
        Ok(Self {
            structure,
            root_path,
            scroll_reset,
            phase: Phase::Idle,
            active: None,
            pending_redirect: None,
            redirect_fired: false,
        })
    }

    #[cfg(test)]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Active section id for the current route.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Sidebar model for the current state.
    pub fn tree(&self) -> NavTree<'_> {
        NavTree::build(&self.structure, &self.root_path, self.active())
    }

    /// Initial render at `current_path`.
    pub fn mount(&mut self, current_path: &str) -> Result<(), NavError> {
        if self.phase != Phase::Idle {
            return Err(NavError::AlreadyMounted);
        }

        if is_course_root(current_path, &self.root_path) {
            let target = self
                .structure
                .first_section()
                .ok_or(NavError::EmptyStructure)?
                .id
                .clone();
            self.active = None;
            self.phase = Phase::Redirecting(target);
        } else {
            self.update_active(current_path);
            self.phase = Phase::Ready;
        }
        Ok(())
    }

    /// Deferred step run by the host after the initial render commit.
    ///
    /// Issues the one-time redirect when mounted on the course root.
    pub fn after_commit(&mut self) -> Option<Effect> {
        let Phase::Redirecting(target) = &self.phase else {
            return None;
        };
        if self.redirect_fired {
            self.phase = Phase::Ready;
            return None;
        }

        let route = section_route(&self.root_path, target);
        self.redirect_fired = true;
        self.pending_redirect = Some(route.clone());
        self.phase = Phase::Ready;
        Some(Effect::Navigate(route))
    }

    /// React to a route change.
    pub fn route_changed(&mut self, current_path: &str) -> Result<Vec<Effect>, NavError> {
        match self.phase {
            Phase::Idle => return Err(NavError::NotMounted),
            Phase::Redirecting(_) => {
                if is_course_root(current_path, &self.root_path) {
                    return Ok(Vec::new());
                }
                // Left the root before the deferred redirect ran: drop it
                self.redirect_fired = true;
                self.phase = Phase::Ready;
            }
            Phase::Ready => {}
        }

        if let Some(target) = self.pending_redirect.take()
            && is_course_root(current_path, &self.root_path)
        {
            self.active = None;
            return Err(NavError::RedirectLoop { target });
        }

        self.update_active(current_path);

        let mut effects = Vec::new();
        if self.scroll_reset {
            effects.push(Effect::ScrollToTop);
        }
        Ok(effects)
    }

    fn update_active(&mut self, current_path: &str) {
        self.active = compute_active(current_path, &self.structure).map(str::to_owned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Category, Section};

    fn course() -> Arc<CourseStructure> {
        Arc::new(
            CourseStructure::new([
                (
                    "basics",
                    Category::new(
                        "Basics",
                        vec![
                            Section::new("intro", "Introduction"),
                            Section::new("typography", "Typography"),
                        ],
                    ),
                ),
                (
                    "layout",
                    Category::new("Layout", vec![Section::new("grid-xxl", "Grid XXL")]),
                ),
            ])
            .unwrap(),
        )
    }

    fn sync() -> Synchronizer {
        Synchronizer::new(course(), "/bootstrap-course", true).unwrap()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn test_empty_structure_refuses_to_mount() {
        let empty = Arc::new(CourseStructure::default());
        assert_eq!(
            Synchronizer::new(empty, "/course", true).unwrap_err(),
            NavError::EmptyStructure
        );

        let later = CourseStructure::new([("later", Category::new("Later", vec![]))]).unwrap();
        assert_eq!(
            Synchronizer::new(Arc::new(later), "/course", true).unwrap_err(),
            NavError::EmptyStructure
        );
    }

    #[test]
    fn test_relative_root_path_rejected() {
        assert!(matches!(
            Synchronizer::new(course(), "course", true),
            Err(NavError::InvalidRootPath(_))
        ));
    }

    // ========================================================================
    // Redirect
    // ========================================================================

    #[test]
    fn test_root_redirects_to_first_section_once() {
        let mut nav = sync();
        nav.mount("/bootstrap-course").unwrap();
        assert_eq!(nav.phase(), &Phase::Redirecting("intro".into()));
        assert_eq!(nav.active(), None);

        let effect = nav.after_commit();
        assert_eq!(
            effect,
            Some(Effect::Navigate("/bootstrap-course/intro".into()))
        );
        assert_eq!(nav.phase(), &Phase::Ready);

        nav.route_changed("/bootstrap-course/intro").unwrap();
        assert_eq!(nav.active(), Some("intro"));

        // No second redirect, ever
        assert_eq!(nav.after_commit(), None);
        nav.route_changed("/bootstrap-course").unwrap();
        assert_eq!(nav.after_commit(), None);
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn test_redirect_not_issued_during_mount() {
        let mut nav = sync();
        nav.mount("/bootstrap-course/").unwrap();
        // Mount itself produced no navigation; it waits for the commit
        assert!(matches!(nav.phase(), Phase::Redirecting(_)));
    }

    #[test]
    fn test_redirect_landing_on_root_is_loop_error() {
        let mut nav = sync();
        nav.mount("/bootstrap-course").unwrap();
        nav.after_commit().unwrap();

        let err = nav.route_changed("/bootstrap-course").unwrap_err();

        assert_eq!(
            err,
            NavError::RedirectLoop {
                target: "/bootstrap-course/intro".into()
            }
        );
        assert_eq!(nav.after_commit(), None);
        assert_eq!(nav.phase(), &Phase::Ready);
    }

    #[test]
    fn test_leaving_root_before_commit_cancels_redirect() {
        let mut nav = sync();
        nav.mount("/bootstrap-course").unwrap();

        let effects = nav.route_changed("/bootstrap-course/grid-xxl").unwrap();

        assert_eq!(effects, [Effect::ScrollToTop]);
        assert_eq!(nav.active(), Some("grid-xxl"));
        assert_eq!(nav.after_commit(), None);
    }

    #[test]
    fn test_root_route_change_while_redirecting_keeps_waiting() {
        let mut nav = sync();
        nav.mount("/bootstrap-course").unwrap();
        assert!(nav.route_changed("/bootstrap-course").unwrap().is_empty());
        assert!(nav.after_commit().is_some());
    }

    // ========================================================================
    // Ready
    // ========================================================================

    #[test]
    fn test_mount_on_section_is_ready() {
        let mut nav = sync();
        nav.mount("/bootstrap-course/typography").unwrap();

        assert_eq!(nav.phase(), &Phase::Ready);
        assert_eq!(nav.active(), Some("typography"));
        assert_eq!(nav.after_commit(), None);
    }

    #[test]
    fn test_route_changes_update_active_and_scroll() {
        let mut nav = sync();
        nav.mount("/bootstrap-course/intro").unwrap();

        let effects = nav.route_changed("/bootstrap-course/grid-xxl").unwrap();
        assert_eq!(effects, [Effect::ScrollToTop]);
        assert_eq!(nav.active(), Some("grid-xxl"));

        let effects = nav.route_changed("/bootstrap-course/unknown").unwrap();
        assert_eq!(effects, [Effect::ScrollToTop]);
        assert_eq!(nav.active(), None);
        assert_eq!(nav.phase(), &Phase::Ready);
    }

    #[test]
    fn test_scroll_reset_disabled() {
        let mut nav = Synchronizer::new(course(), "/bootstrap-course", false).unwrap();
        nav.mount("/bootstrap-course/intro").unwrap();
        let effects = nav.route_changed("/bootstrap-course/typography").unwrap();
        assert!(effects.is_empty());
    }

    #[test]
    fn test_tree_reflects_active() {
        let mut nav = sync();
        nav.mount("/bootstrap-course/typography").unwrap();
        let tree = nav.tree();
        assert_eq!(tree.active().unwrap().section.id, "typography");
    }

    // ========================================================================
    // Misuse
    // ========================================================================

    #[test]
    fn test_route_change_before_mount() {
        let mut nav = sync();
        assert_eq!(
            nav.route_changed("/bootstrap-course/intro").unwrap_err(),
            NavError::NotMounted
        );
    }

    #[test]
    fn test_double_mount() {
        let mut nav = sync();
        nav.mount("/bootstrap-course/intro").unwrap();
        assert_eq!(
            nav.mount("/bootstrap-course").unwrap_err(),
            NavError::AlreadyMounted
        );
    }
}
