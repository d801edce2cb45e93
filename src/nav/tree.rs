//! Grouped navigation tree built from the course structure.
//!
//! Groups and items keep declaration order, which is the same order the
//! scaffolder used for prev/next links: [`NavTree::neighbors`] goes through
//! the shared [`neighbors`] function.

use super::route::section_route;
use crate::structure::{Category, CourseStructure, NeighborLinks, Section, neighbors};
use serde::Serialize;

/// One link in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem<'a> {
    #[serde(flatten)]
    pub section: &'a Section,
    pub href: String,
    pub active: bool,
}

/// One category of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavGroup<'a> {
    pub key: &'a str,
    pub title: &'a str,
    pub items: Vec<NavItem<'a>>,
    #[serde(skip)]
    category: &'a Category,
}

impl NavGroup<'_> {
    /// Whether one of this group's items is active.
    pub fn is_active(&self) -> bool {
        self.items.iter().any(|item| item.active)
    }
}

/// Sidebar model for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavTree<'a> {
    pub groups: Vec<NavGroup<'a>>,
}

impl<'a> NavTree<'a> {
    /// Build the tree, marking `active` (if any) as the highlighted item.
    pub fn build(structure: &'a CourseStructure, root_path: &str, active: Option<&str>) -> Self {
        let groups = structure
            .categories()
            .map(|(key, category)| NavGroup {
                key,
                title: &category.title,
                items: category
                    .sections
                    .iter()
                    .map(|section| NavItem {
                        section,
                        href: section_route(root_path, &section.id),
                        active: active == Some(section.id.as_str()),
                    })
                    .collect(),
                category,
            })
            .collect();
        Self { groups }
    }

    /// Currently highlighted item.
    pub fn active(&self) -> Option<&NavItem<'a>> {
        self.items().find(|item| item.active)
    }

    /// All items in display order.
    pub fn items(&self) -> impl Iterator<Item = &NavItem<'a>> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    /// Prev/next of the active item, if any item is active.
    pub fn pager(&self) -> Option<NeighborLinks<'a>> {
        let item = self.active()?;
        self.neighbors(&item.section.id)
    }

    /// Href of the item for `id`.
    pub fn href(&self, id: &str) -> Option<&str> {
        self.items()
            .find(|item| item.section.id == id)
            .map(|item| item.href.as_str())
    }

    /// Prev/next of `id` within its group, as baked into its chapter.
    pub fn neighbors(&self, id: &str) -> Option<NeighborLinks<'a>> {
        self.groups.iter().find_map(|group| {
            let category: &'a Category = group.category;
            category
                .sections
                .iter()
                .position(|s| s.id == id)
                .map(|index| neighbors(&category.sections, index))
        })
    }
}
