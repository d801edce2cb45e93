//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Course scaffolding and navigation CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: syllabus.toml)
    #[arg(short = 'C', long, default_value = "syllabus.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Structure source override shared by commands that read the course
#[derive(clap::Args, Debug, Clone, Default)]
pub struct StructureArgs {
    /// Course structure file (.toml or .json), relative to project root
    #[arg(short, long)]
    pub structure: Option<PathBuf>,
}

/// Arguments for the scaffold and watch commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ScaffoldArgs {
    #[command(flatten)]
    pub structure: StructureArgs,

    /// Output root for generated chapters, relative to project root
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Artifact file extension (without dot)
    #[arg(short, long = "ext")]
    pub extension: Option<String>,

    /// Worker threads for scaffolding (0 = sequential)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the scaffold report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create syllabus.toml and an example course structure
    Init {
        /// the name(path) of the project directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Create one chapter file per section, never touching existing files
    Scaffold {
        #[command(flatten)]
        args: ScaffoldArgs,
    },

    /// Validate the course structure and report orphaned chapter files
    Check {
        #[command(flatten)]
        structure: StructureArgs,

        /// Output root to scan for orphaned chapters
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve a route against the course and print the sidebar
    Nav {
        /// Current route, e.g. `/course/typography`
        route: String,

        #[command(flatten)]
        structure: StructureArgs,

        /// Print the navigation tree as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Scaffold, then scaffold again whenever the structure or config changes
    Watch {
        #[command(flatten)]
        args: ScaffoldArgs,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }

    /// Structure override of the current command, if it has one
    pub fn structure_args(&self) -> Option<&StructureArgs> {
        match &self.command {
            Commands::Scaffold { args } | Commands::Watch { args } => Some(&args.structure),
            Commands::Check { structure, .. } | Commands::Nav { structure, .. } => Some(structure),
            Commands::Init { .. } => None,
        }
    }
}
