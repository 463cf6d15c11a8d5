//! Site configuration management for `mdsite.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── build      # [build] section
//! ├── error      # ConfigError
//! └── mod.rs     # SiteConfig (this file)
//! ```
//!
//! The config file is optional. Without one, defaults apply and relative
//! paths resolve against the current directory.

mod build;
mod error;

pub use build::BuildSectionConfig;
pub use error::ConfigError;

use crate::{cli::BuildArgs, log, utils::fs::normalize_path};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "mdsite.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing mdsite.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file, which may not exist (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildSectionConfig,
}

impl SiteConfig {
    /// Load configuration for a build.
    ///
    /// Searches upward from cwd for `config_name`. The project root is the
    /// config file's parent directory, or cwd when no file is found.
    pub fn load(config_name: &Path, args: &BuildArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, config_path, root) = match find_config_file(config_name) {
            Some(path) => {
                let root = path.parent().map_or_else(|| cwd.clone(), Path::to_path_buf);
                (Self::from_path(&path)?, path, root)
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", config_name.display());
                (Self::default(), cwd.join(config_name), cwd)
            }
        };

        config.config_path = config_path;
        config.finalize(&root, args);
        config.validate()?;
        Ok(config)
    }

    /// Resolve paths and apply CLI options.
    fn finalize(&mut self, root: &Path, args: &BuildArgs) {
        self.apply_build_args(args);
        self.normalize_paths(root);
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.content, args.content.as_ref());
        Self::update_option(&mut self.build.static_dir, args.static_dir.as_ref());
        Self::update_option(&mut self.build.output, args.output.as_ref());
        Self::update_option(&mut self.build.template, args.template.as_ref());
        if args.no_clean {
            self.build.clean = false;
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.config_path = normalize_path(&self.config_path);

        let build = &mut self.build;
        for path in [
            &mut build.content,
            &mut build.static_dir,
            &mut build.output,
            &mut build.template,
        ] {
            *path = normalize_path(&root.join(&*path));
        }
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Check that the resolved paths describe a buildable site.
    ///
    /// The output directory is wiped on clean builds, so it must not be or
    /// contain the project root, the sources, the template or the config file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let build = &self.build;

        if !build.content.is_dir() {
            return Err(ConfigError::Validation(format!(
                "content directory not found: {}",
                build.content.display()
            )));
        }
        if !build.template.is_file() {
            return Err(ConfigError::Validation(format!(
                "template file not found: {}",
                build.template.display()
            )));
        }

        let protected = [
            ("project root", &self.root),
            ("content directory", &build.content),
            ("static directory", &build.static_dir),
            ("template", &build.template),
            ("config file", &self.config_path),
        ];
        if let Some((name, path)) = protected
            .into_iter()
            .find(|(_, path)| path.starts_with(&build.output))
        {
            return Err(ConfigError::Validation(format!(
                "output directory {} must not be or contain the {name} ({})",
                build.output.display(),
                path.display()
            )));
        }
        Ok(())
    }
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/content/posts/  ← cwd
/// /home/user/site/mdsite.toml     ← found!
/// ```
fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// tests
// ============================================================================
