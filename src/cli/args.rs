//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_FILE;

/// mdsite static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path
    #[arg(short = 'C', long, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the site from the content directory
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Convert a single markdown file to html
    #[command(visible_alias = "c")]
    Convert {
        /// Markdown file to convert
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        /// Write html here instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Wrap the body in this page template
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        template: Option<PathBuf>,
    },

    /// Print the title of a markdown file
    #[command(visible_alias = "t")]
    Title {
        /// Markdown file to read
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
    },
}

/// Build command arguments, each overriding the `[build]` section
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Static assets directory path (relative to project root)
    #[arg(short, long = "static-dir", value_hint = clap::ValueHint::DirPath)]
    pub static_dir: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Page template path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub template: Option<PathBuf>,

    /// Keep existing files in the output directory
    #[arg(long)]
    pub no_clean: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
