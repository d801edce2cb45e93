//! Route matching against the course structure.
//!
//! Routes follow `<root_path>/<section id>`. Everything here is pure so that
//! the active-section logic can be tested without any event loop.

use crate::structure::CourseStructure;

/// Section id that `current_path` points at, if any.
///
/// Takes the final path segment and matches it exactly (case-sensitive)
/// against section ids. Query strings, fragments and a single trailing
/// slash are ignored. No match is `None`, never an error: the caller just
/// renders without highlighting.
pub fn compute_active<'a>(current_path: &str, structure: &'a CourseStructure) -> Option<&'a str> {
    let segment = last_segment(current_path)?;
    structure.find(segment).map(|r| r.section.id.as_str())
}

/// Whether `current_path` is the course root itself (no section segment).
pub fn is_course_root(current_path: &str, root_path: &str) -> bool {
    trim_route(strip_suffixes(current_path)) == trim_route(root_path)
}

/// Route of a section under the course root.
pub fn section_route(root_path: &str, id: &str) -> String {
    format!("{}/{id}", trim_route(root_path))
}

/// Final non-empty segment of a route path.
fn last_segment(path: &str) -> Option<&str> {
    let path = strip_suffixes(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    path.rsplit('/').next().filter(|s| !s.is_empty())
}

/// Drop `?query` and `#fragment`.
fn strip_suffixes(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

fn trim_route(path: &str) -> &str {
    path.trim_end_matches('/')
}
