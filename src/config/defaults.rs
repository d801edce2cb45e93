//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [course] Section Defaults
// ============================================================================

pub mod course {
    use std::path::PathBuf;

    pub fn structure() -> PathBuf {
        "course.toml".into()
    }

    pub fn root_path() -> String {
        "/course".into()
    }
}

// ============================================================================
// [scaffold] Section Defaults
// ============================================================================

pub mod scaffold {
    use std::path::PathBuf;

    pub fn output() -> PathBuf {
        "chapters".into()
    }

    pub fn extension() -> String {
        "md".into()
    }

    pub fn template() -> Option<PathBuf> {
        None
    }

    pub fn jobs() -> usize {
        0
    }
}
