//! `[course]` section configuration.
//!
//! Where the course structure lives and under which route it is served.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[course]` section in syllabus.toml.
///
/// # Example
/// ```toml
/// [course]
/// structure = "course.toml"      # or course.json
/// root_path = "/bootstrap-course"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CourseConfig {
    /// Course structure file, relative to the project root.
    #[serde(default = "defaults::course::structure")]
    #[educe(Default = defaults::course::structure())]
    pub structure: PathBuf,

    /// Route prefix of the course; sections live at `<root_path>/<id>`.
    #[serde(default = "defaults::course::root_path")]
    #[educe(Default = defaults::course::root_path())]
    pub root_path: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_course_config() {
        let config = r#"
            [course]
            structure = "data/course.json"
            root_path = "/bootstrap-course"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.course.structure, PathBuf::from("data/course.json"));
        assert_eq!(config.course.root_path, "/bootstrap-course");
    }

    #[test]
    fn test_course_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.course.structure, PathBuf::from("course.toml"));
        assert_eq!(config.course.root_path, "/course");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [course]
            unknown = "x"
        "#;
        assert!(toml::from_str::<SiteConfig>(config).is_err());
    }
}
