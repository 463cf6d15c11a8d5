//! Html page production: template substitution and page generation.

pub mod generate;
pub mod template;

pub use generate::{GenerateReport, collect_pages, generate_pages, render_page};
pub use template::{PageTemplate, warn_missing_markers};
