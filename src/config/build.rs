//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"         # Markdown sources (relative to site root)
//! static = "static"           # Copied verbatim into the output
//! output = "public"           # Generated site
//! template = "template.html"  # Page template with {{ Title }} and {{ Content }}
//! clean = true                # Delete output before building
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Markdown source directory.
    pub content: PathBuf,

    /// Static assets directory.
    #[serde(rename = "static")]
    pub static_dir: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Html page template.
    pub template: PathBuf,

    /// Clean output directory before building.
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            static_dir: "static".into(),
            output: "public".into(),
            template: "template.html".into(),
            clean: true,
        }
    }
}
