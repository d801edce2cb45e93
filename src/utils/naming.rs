//! Section identifier to artifact name conversion.
//!
//! Section ids are kebab-style route segments (`get-started`). Artifacts are
//! named after them in PascalCase (`GetStarted`), which makes the name usable
//! both as a file stem and as a module/component identifier.
//!
//! | Section id    | Artifact name |
//! |---------------|---------------|
//! | `get-started` | `GetStarted`  |
//! | `grid-xxl`    | `GridXxl`     |
//! | `flexbox`     | `Flexbox`     |
//! | `h1-h6`       | `H1H6`        |

/// Characters forbidden in directory names derived from category keys
pub const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '/', '"', '\t', '\r', '\n',
];

/// Convert a kebab-style section id into its artifact name.
///
/// Splits on `-`, upper-cases the first character of every part and joins
/// the parts without a separator. Empty parts contribute nothing, so the
/// function is total even on ids that [`is_kebab_id`] rejects.
pub fn to_artifact_name(id: &str) -> String {
    let mut name = String::with_capacity(id.len());
    for part in id.split('-') {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

/// Check that `id` is lowercase alphanumerics separated by single hyphens.
pub fn is_kebab_id(id: &str) -> bool {
    !id.is_empty()
        && id.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Check that a category key can be used verbatim as a single directory name.
pub fn is_safe_dir_name(key: &str) -> bool {
    !key.is_empty()
        && key.trim() == key
        && key != "."
        && key != ".."
        && !key.chars().any(|c| FORBIDDEN_CHARS.contains(&c) || c.is_control())
}
