//! Markdown page generation.
//!
//! Each page is independent, so a content tree is rendered in parallel. A page
//! that fails is logged and skipped; its siblings are still written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::template::{PageTemplate, PageVars};
use crate::logger::ProgressLine;
use crate::markdown::{extract_title, markdown_to_html};
use crate::utils::fs::{collect_all_files, is_markdown};
use crate::{debug, log};

/// Outcome of generating every page below a content directory.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Html files written, in source order.
    pub written: Vec<PathBuf>,
    /// Markdown sources that failed, with the reason.
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render one markdown document into a full html page.
pub fn render_page(markdown: &str, template: &PageTemplate) -> Result<String> {
    let content = markdown_to_html(markdown).context("failed to convert markdown to html")?;
    let title = extract_title(markdown).context("could not extract title")?;
    Ok(template.render(&PageVars {
        title: &title,
        content: &content,
    }))
}

/// Generate `dest` from the markdown file at `source`.
///
/// Parent directories of `dest` are created as needed.
pub fn generate_page(source: &Path, template: &PageTemplate, dest: &Path) -> Result<()> {
    debug!("page"; "{} -> {}", source.display(), dest.display());

    let markdown = fs::read_to_string(source)
        .with_context(|| format!("failed to read markdown file `{}`", source.display()))?;
    let html = render_page(&markdown, template)
        .with_context(|| format!("failed to render `{}`", source.display()))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    fs::write(dest, html).with_context(|| format!("failed to write `{}`", dest.display()))
}

/// Map `content/a/b.md` to `output/a/b.html`.
pub fn page_destination(source: &Path, content_dir: &Path, output_dir: &Path) -> PathBuf {
    let relative = source.strip_prefix(content_dir).unwrap_or(source);
    output_dir.join(relative).with_extension("html")
}

/// Markdown sources below `content_dir`, in path order.
pub fn collect_pages(content_dir: &Path) -> Vec<PathBuf> {
    collect_all_files(content_dir)
        .into_iter()
        .filter(|path| {
            let keep = is_markdown(path);
            if !keep {
                debug!("page"; "skipping non-markdown file {}", path.display());
            }
            keep
        })
        .collect()
}

/// Generate a page for each source, mirroring its path below `content_dir`
/// into `output_dir`.
///
/// Failures are logged and collected in the report instead of aborting.
pub fn generate_pages(
    sources: &[PathBuf],
    content_dir: &Path,
    template: &PageTemplate,
    output_dir: &Path,
    progress: Option<&ProgressLine>,
) -> GenerateReport {
    let results: Vec<(PathBuf, Result<PathBuf>)> = sources
        .par_iter()
        .map(|source| {
            let dest = page_destination(source, content_dir, output_dir);
            let result = generate_page(source, template, &dest).map(|()| dest);
            if let Some(p) = progress {
                p.inc("pages");
            }
            (source.clone(), result)
        })
        .collect();

    let mut report = GenerateReport::default();
    for (source, result) in results {
        match result {
            Ok(dest) => report.written.push(dest),
            Err(e) => {
                log!("error"; "{}: {:#}", source.display(), e);
                report.failed.push((source, e));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEMPLATE: &str = "<title>{{ Title }}</title><main>{{ Content }}</main>";

    fn template() -> PageTemplate {
        PageTemplate::new(TEMPLATE)
    }

    #[test]
    fn test_render_page() {
        let html = render_page("# Hello\n\nSome *text*", &template()).unwrap();
        assert_eq!(
            html,
            "<title>Hello</title><main><div><h1>Hello</h1><p>Some <i>text</i></p></div></main>"
        );
    }

    #[test]
    fn test_render_page_requires_title() {
        let err = render_page("no heading here", &template()).unwrap_err();
        assert!(format!("{err:#}").contains("could not extract title"));
    }

    #[test]
    fn test_render_page_reports_syntax_errors() {
        let err = render_page("# T\n\nbroken `code", &template()).unwrap_err();
        assert!(format!("{err:#}").contains("unmatched delimiter"));
    }

    #[test]
    fn test_page_destination() {
        let dest = page_destination(
            Path::new("/site/content/blog/post.md"),
            Path::new("/site/content"),
            Path::new("/site/public"),
        );
        assert_eq!(dest, PathBuf::from("/site/public/blog/post.html"));
    }

    #[test]
    fn test_generate_page_creates_parents() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("index.md");
        fs::write(&source, "# Home\n\nWelcome").unwrap();
        let dest = dir.path().join("public/deep/index.html");

        generate_page(&source, &template(), &dest).unwrap();

        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "<title>Home</title><main><div><h1>Home</h1><p>Welcome</p></div></main>"
        );
    }

    #[test]
    fn test_generate_pages_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        let output = dir.path().join("public");
        fs::create_dir_all(content.join("blog")).unwrap();
        fs::write(content.join("index.md"), "# Home").unwrap();
        fs::write(content.join("blog/good.md"), "# Good\n\n- a\n- b").unwrap();
        fs::write(content.join("blog/bad.md"), "no title").unwrap();
        fs::write(content.join("blog/image.png"), "fake png").unwrap();

        let sources = collect_pages(&content);
        assert_eq!(sources.len(), 3);

        let report = generate_pages(&sources, &content, &template(), &output, None);

        assert!(!report.is_success());
        assert_eq!(report.written.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, content.join("blog/bad.md"));
        assert!(output.join("index.html").exists());
        assert!(output.join("blog/good.html").exists());
        assert!(!output.join("blog/bad.html").exists());
        assert!(!output.join("blog/image.png").exists());
    }
}
