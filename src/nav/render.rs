//! Sidebar HTML rendering.
//!
//! # Output
//!
//! ```html
//! <nav class="course-nav">
//!   <section class="course-nav-group active" data-category="basics">
//!     <h3>Basics</h3>
//!     <ul>
//!       <li><a href="/course/intro" class="active" aria-current="page">Introduction</a></li>
//!       <li><a href="/course/typography">Typography</a></li>
//!     </ul>
//!   </section>
//!   <footer class="course-nav-pager">
//!     <a href="/course/typography" rel="next">Typography</a>
//!   </footer>
//! </nav>
//! ```
//!
//! The pager holds the same prev/next links the active chapter was
//! scaffolded with, and is omitted when nothing is active.

use super::tree::NavTree;
use crate::structure::NeighborLinks;

/// Render the tree as an HTML `<nav>` fragment.
pub fn render_html(tree: &NavTree<'_>) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str("<nav class=\"course-nav\">\n");

    for group in &tree.groups {
        let class = if group.is_active() {
            "course-nav-group active"
        } else {
            "course-nav-group"
        };
        html.push_str(&format!(
            "  <section class=\"{class}\" data-category=\"{}\">\n",
            escape_html(group.key)
        ));
        html.push_str(&format!("    <h3>{}</h3>\n", escape_html(group.title)));
        html.push_str("    <ul>\n");
        for item in &group.items {
            let current = if item.active {
                " class=\"active\" aria-current=\"page\""
            } else {
                ""
            };
            html.push_str(&format!(
                "      <li><a href=\"{}\"{current}>{}</a></li>\n",
                escape_html(&item.href),
                escape_html(&item.section.title)
            ));
        }
        html.push_str("    </ul>\n");
        html.push_str("  </section>\n");
    }

    if let Some(pager) = tree.pager() {
        render_pager(&mut html, tree, pager);
    }

    html.push_str("</nav>\n");
    html
}

fn render_pager(html: &mut String, tree: &NavTree<'_>, pager: NeighborLinks<'_>) {
    let links = [(pager.previous, "prev"), (pager.next, "next")];
    if links.iter().all(|(section, _)| section.is_none()) {
        return;
    }

    html.push_str("  <footer class=\"course-nav-pager\">\n");
    for (section, rel) in links {
        let Some(section) = section else { continue };
        let href = tree.href(&section.id).unwrap_or_default();
        html.push_str(&format!(
            "    <a href=\"{}\" rel=\"{rel}\">{}</a>\n",
            escape_html(href),
            escape_html(&section.title)
        ));
    }
    html.push_str("  </footer>\n");
}

/// Escape special HTML characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
