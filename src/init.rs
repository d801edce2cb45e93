//! Project initialization.
//!
//! Writes a default `syllabus.toml` and an example course structure. Like
//! scaffolding, it never overwrites: existing files abort the init.

use crate::{
    config::SiteConfig,
    log,
    utils::fs::{CreateOutcome, create_new},
};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Example structure written next to the config
const EXAMPLE_COURSE: &str = r#"# Categories and sections are shown (and linked prev/next) in this order.
# Section ids become routes (<root_path>/<id>) and chapter names (get-started -> GetStarted).

[basics]
title = "Basics"

[[basics.sections]]
id = "intro"
title = "Introduction"

[[basics.sections]]
id = "get-started"
title = "Get Started"

[layout]
title = "Layout"

[[layout.sections]]
id = "grid"
title = "Grid System"
"#;

/// Create a new project under the configured root
pub fn new_project(config: &SiteConfig) -> Result<()> {
    let root = &config.root;
    for path in [config.config_path.as_path(), config.structure_path()] {
        if path.exists() {
            bail!(
                "`{}` already exists. Remove it manually or init in a different path.",
                path.display()
            );
        }
    }
    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;

    let content = toml::to_string_pretty(&SiteConfig::default())?;
    write_new(&config.config_path, &content)?;
    write_new(config.structure_path(), EXAMPLE_COURSE)?;

    log!("init"; "created {}", config.config_path.display());
    log!("init"; "created {}", config.structure_path().display());
    Ok(())
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    match create_new(path, content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?
    {
        CreateOutcome::Created => Ok(()),
        CreateOutcome::Exists => bail!(
            "`{}` already exists. Remove it manually or init in a different path.",
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::CourseStructure;
    use tempfile::TempDir;

    fn config_in(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = root.to_path_buf();
        config.config_path = root.join("syllabus.toml");
        config.course.structure = root.join("course.toml");
        config
    }

    #[test]
    fn test_example_course_is_valid() {
        let course = CourseStructure::from_toml_str(EXAMPLE_COURSE).unwrap();
        assert_eq!(course.len(), 3);
        assert_eq!(course.first_section().unwrap().id, "intro");
    }

    #[test]
    fn test_new_project_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("my-course");
        let config = config_in(&root);

        new_project(&config).unwrap();

        let written = SiteConfig::from_path(&root.join("syllabus.toml")).unwrap();
        assert_eq!(written.scaffold.extension, "md");
        assert!(CourseStructure::from_path(&root.join("course.toml")).is_ok());
    }

    #[test]
    fn test_new_project_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("syllabus.toml"), "# mine").unwrap();
        let config = config_in(dir.path());

        let err = new_project(&config).unwrap_err();

        assert!(format!("{err}").contains("already exists"));
        assert_eq!(
            fs::read_to_string(dir.path().join("syllabus.toml")).unwrap(),
            "# mine"
        );
    }
}
