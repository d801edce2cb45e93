//! Placeholder content for freshly scaffolded chapters.
//!
//! A chapter is rendered once, when its file is first created. After that the
//! file belongs to its author and is never rendered again.
//!
//! # Custom templates
//!
//! `[scaffold.template]` points to a file using `{{ name }}` placeholders:
//!
//! | Placeholder          | Value                                  |
//! |----------------------|----------------------------------------|
//! | `{{ title }}`        | section title                          |
//! | `{{ id }}`           | section id                             |
//! | `{{ name }}`         | artifact name (`GetStarted`)           |
//! | `{{ category }}`     | category key                           |
//! | `{{ category_title }}` | category title                       |
//! | `{{ prev }}`         | previous section id, empty when first  |
//! | `{{ next }}`         | next section id, empty when last       |
//! | `{{ prev_title }}`   | previous section title                 |
//! | `{{ next_title }}`   | next section title                     |
//!
//! Unknown placeholders are left verbatim so templates for other tools
//! (e.g. JSX `{{ }}` style objects) survive.

use crate::structure::{NeighborLinks, Section};
use regex::{Captures, Regex};
use std::{fs, path::Path, sync::LazyLock};

/// Extensions the built-in Markdown placeholder is valid for.
pub const BUILTIN_EXTENSIONS: &[&str] = &["md", "markdown", "mdx"];

/// `{{ key }}` with optional inner whitespace.
static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").unwrap());

/// Everything a chapter template can refer to.
#[derive(Debug, Clone, Copy)]
pub struct ChapterContext<'a> {
    pub category_key: &'a str,
    pub category_title: &'a str,
    pub section: &'a Section,
    /// Artifact name derived from the section id
    pub name: &'a str,
    pub links: NeighborLinks<'a>,
}

impl ChapterContext<'_> {
    /// Value of a placeholder, `None` for unknown keys.
    fn value(&self, key: &str) -> Option<&str> {
        let value = match key {
            "title" => self.section.title.as_str(),
            "id" => self.section.id.as_str(),
            "name" => self.name,
            "category" => self.category_key,
            "category_title" => self.category_title,
            "prev" => self.links.previous_id().unwrap_or_default(),
            "next" => self.links.next_id().unwrap_or_default(),
            "prev_title" => self.links.previous.map_or("", |s| s.title.as_str()),
            "next_title" => self.links.next.map_or("", |s| s.title.as_str()),
            _ => return None,
        };
        Some(value)
    }
}

/// Chapter template: built-in or loaded from a file.
#[derive(Debug, Clone, Default)]
pub enum Template {
    #[default]
    Builtin,
    Custom(String),
}

impl Template {
    /// Load a custom template from disk.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        fs::read_to_string(path).map(Self::Custom)
    }

    /// Render the placeholder content for one chapter.
    pub fn render(&self, ctx: &ChapterContext<'_>) -> String {
        match self {
            Self::Builtin => render_builtin(ctx),
            Self::Custom(source) => RE_PLACEHOLDER
                .replace_all(source, |caps: &Captures<'_>| {
                    ctx.value(&caps[1]).unwrap_or(&caps[0]).to_owned()
                })
                .into_owned(),
        }
    }
}

/// Minimal placeholder: heading, stub paragraph and prev/next links.
///
/// Links are relative to the chapter route, so `typography` resolves to
/// `<root_path>/typography`. Missing neighbors produce no line at all.
fn render_builtin(ctx: &ChapterContext<'_>) -> String {
    let mut out = format!(
        "# {}\n\n<!-- {} / {} -->\n\nThis chapter has not been written yet.\n",
        ctx.section.title, ctx.category_key, ctx.name
    );

    let links = ctx.links;
    if links.previous.is_some() || links.next.is_some() {
        out.push('\n');
    }
    if let Some(prev) = links.previous {
        out.push_str(&format!("Previous: [{}]({})\n", prev.title, prev.id));
    }
    if let Some(next) = links.next {
        out.push_str(&format!("Next: [{}]({})\n", next.title, next.id));
    }
    out
}
