//! mdsite - A static site generator for Markdown content.

mod cli;
mod config;
mod logger;
mod markdown;
mod page;
mod utils;

use anyhow::{Result, bail};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_site, convert};
use config::SiteConfig;
use utils::plural_count;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Commands::Build { build_args } => {
            let config = SiteConfig::load(&cli.config, build_args)?;
            let report = build_site(&config, false)?;
            if !report.is_success() {
                bail!("{} failed to build", plural_count(report.failed.len(), "page"));
            }
            Ok(())
        }
        Commands::Convert {
            input,
            output,
            template,
        } => convert::convert_file(input, output.as_deref(), template.as_deref()),
        Commands::Title { input } => convert::print_title(input),
    }
}
