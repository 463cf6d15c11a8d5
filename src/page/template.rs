//! Page templates with typed variable injection.

use std::fs;
use std::marker::PhantomData;
use std::path::Path;

use anyhow::{Context, Result};

/// Placeholder replaced with the page title.
pub const TITLE_MARKER: &str = "{{ Title }}";

/// Placeholder replaced with the rendered markdown body.
pub const CONTENT_MARKER: &str = "{{ Content }}";

/// Trait for template variable sets
pub trait TemplateVars {
    /// Placeholders this variable set fills in.
    const MARKERS: &'static [&'static str];

    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone)]
pub struct Template<V> {
    content: String,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            _marker: PhantomData,
        }
    }

    /// Read a template file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read template `{}`", path.display()))?;
        Ok(Self::new(content))
    }

    #[cfg(test)]
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(&self.content)
    }

    /// Placeholders that do not occur in the template text.
    pub fn missing_markers(&self) -> Vec<&'static str> {
        V::MARKERS
            .iter()
            .copied()
            .filter(|marker| !self.content.contains(marker))
            .collect()
    }
}

/// Variables for a generated html page.
pub struct PageVars<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

impl TemplateVars for PageVars<'_> {
    const MARKERS: &'static [&'static str] = &[TITLE_MARKER, CONTENT_MARKER];

    fn apply(&self, content: &str) -> String {
        content
            .replace(TITLE_MARKER, self.title)
            .replace(CONTENT_MARKER, self.content)
    }
}

/// Template used for every generated page.
pub type PageTemplate = Template<PageVars<'static>>;

/// Log a warning for every placeholder missing from `template`.
pub fn warn_missing_markers(template: &PageTemplate, origin: &Path) {
    for marker in template.missing_markers() {
        crate::log!(
            "warning";
            "`{}` placeholder not found in template: {}",
            marker,
            origin.display()
        );
    }
}
