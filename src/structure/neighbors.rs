//! Previous/next linkage between sections of one category.
//!
//! Both the scaffolder (which bakes the links into each artifact) and the
//! navigation tree (which exposes them at runtime) go through [`neighbors`],
//! so the two views can never disagree about ordering.

use super::Section;
use serde::Serialize;

/// Previous and next section ids for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NeighborLinks<'a> {
    /// `None` for the first section of a category
    pub previous: Option<&'a Section>,
    /// `None` for the last section of a category
    pub next: Option<&'a Section>,
}

impl<'a> NeighborLinks<'a> {
    pub fn previous_id(&self) -> Option<&'a str> {
        self.previous.map(|s| s.id.as_str())
    }

    pub fn next_id(&self) -> Option<&'a str> {
        self.next.map(|s| s.id.as_str())
    }
}

/// Neighbors of `sections[index]`. Out-of-range indices have none.
pub fn neighbors(sections: &[Section], index: usize) -> NeighborLinks<'_> {
    if index >= sections.len() {
        return NeighborLinks::default();
    }
    NeighborLinks {
        previous: index.checked_sub(1).and_then(|i| sections.get(i)),
        next: sections.get(index + 1),
    }
}
