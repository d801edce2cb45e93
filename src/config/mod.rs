//! Project configuration management for `syllabus.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `[course]`   | Structure file and course route prefix           |
//! | `[scaffold]` | Chapter output root, extension, template, jobs   |
//! | `[nav]`      | Sidebar behaviour                                |
//!
//! # Example
//!
//! ```toml
//! [course]
//! structure = "course.toml"
//! root_path = "/bootstrap-course"
//!
//! [scaffold]
//! output = "src/chapters"
//! extension = "tsx"
//! template = "templates/chapter.tsx"
//!
//! [nav]
//! scroll_reset = true
//! ```
//!
//! The config file is optional: without one every field takes its default
//! and CLI flags fill in the rest.

mod course;
pub mod defaults;
mod error;
pub mod handle;
mod nav;
mod scaffold;

pub use error::ConfigError;
pub use scaffold::ReportFormat;

use course::CourseConfig;
use nav::NavConfig;
use scaffold::ScaffoldConfig;

use crate::{
    cli::{Cli, Commands, ScaffoldArgs},
    scaffold::BUILTIN_EXTENSIONS,
    utils::fs::{normalize_path, resolve_path},
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing syllabus.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute project root (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Course source settings
    #[serde(default)]
    pub course: CourseConfig,

    /// Chapter generation settings
    #[serde(default)]
    pub scaffold: ScaffoldConfig,

    /// Navigation settings
    #[serde(default)]
    pub nav: NavConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load config for `cli`, falling back to defaults when the file is absent.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = Self::cli_root(cli);
        let config_path = root.join(&cli.config);

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Project root requested on the command line.
    fn cli_root(cli: &Cli) -> PathBuf {
        let base = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));
        match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        }
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> Option<&'static Cli> {
        self.cli
    }

    /// Absolute path of the course structure file
    pub fn structure_path(&self) -> &Path {
        &self.course.structure
    }

    /// Absolute chapter output root
    pub fn output_dir(&self) -> &Path {
        &self.scaffold.output
    }

    /// Update configuration with CLI arguments and resolve all paths
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        if let Some(args) = cli.structure_args() {
            Self::update_option(&mut self.course.structure, args.structure.as_ref());
        }

        match &cli.command {
            Commands::Scaffold { args } | Commands::Watch { args } => {
                self.apply_scaffold_args(args)
            }
            Commands::Check { output, .. } => {
                Self::update_option(&mut self.scaffold.output, output.as_ref());
            }
            _ => {}
        }

        let root = Self::cli_root(cli);
        self.resolve_paths(&root, &cli.config);
    }

    fn apply_scaffold_args(&mut self, args: &ScaffoldArgs) {
        Self::update_option(&mut self.scaffold.output, args.output.as_ref());
        Self::update_option(&mut self.scaffold.extension, args.extension.as_ref());
        Self::update_option(&mut self.scaffold.jobs, args.jobs.as_ref());
        if args.json {
            self.scaffold.report = ReportFormat::Json;
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Make every path absolute relative to `root`
    fn resolve_paths(&mut self, root: &Path, config_file: &Path) {
        let root = normalize_path(root);

        self.config_path = normalize_path(&root.join(config_file));
        self.course.structure = resolve_path(&root, &self.course.structure);
        self.scaffold.output = resolve_path(&root, &self.scaffold.output);
        self.scaffold.template = self
            .scaffold
            .template
            .as_deref()
            .map(|t| resolve_path(&root, t));
        self.scaffold.extension = self.scaffold.extension.trim_start_matches('.').to_owned();
        self.root = root;
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        let ext = &self.scaffold.extension;
        if ext.is_empty() {
            bail!(ConfigError::Validation(
                "[scaffold.extension] must not be empty".into()
            ));
        }
        if ext.contains(['.', '/', '\\']) || ext.contains(char::is_whitespace) {
            bail!(ConfigError::Validation(format!(
                "[scaffold.extension] `{ext}` must be a bare extension such as `md` or `tsx`"
            )));
        }

        // The built-in chapter placeholder is Markdown
        if self.scaffold.template.is_none() && !BUILTIN_EXTENSIONS.contains(&ext.as_str()) {
            bail!(ConfigError::Validation(format!(
                "[scaffold.extension] `{ext}` needs a [scaffold.template]; \
                 the built-in template only writes {}",
                BUILTIN_EXTENSIONS.join(", ")
            )));
        }

        if !self.course.root_path.starts_with('/') {
            bail!(ConfigError::Validation(
                "[course.root_path] must start with `/`".into()
            ));
        }

        if let Some(template) = &self.scaffold.template
            && !template.is_file()
        {
            bail!(ConfigError::Validation(format!(
                "[scaffold.template] `{}` not found",
                template.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
