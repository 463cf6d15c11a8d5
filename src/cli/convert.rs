//! Single-file commands: `convert` and `title`.

use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use crate::{
    log,
    markdown::{extract_title, markdown_to_html},
    page::{PageTemplate, render_page, warn_missing_markers},
};

/// Convert `input` to html, wrapped in `template` when one is given.
///
/// Without `output` the html is printed to stdout, and only the html: log
/// lines go to stderr.
pub fn convert_file(input: &Path, output: Option<&Path>, template: Option<&Path>) -> Result<()> {
    convert_file_to(input, output, template, &mut io::stdout().lock())
}

fn convert_file_to(
    input: &Path,
    output: Option<&Path>,
    template: Option<&Path>,
    stdout: &mut impl Write,
) -> Result<()> {
    let markdown = read_markdown(input)?;

    let template = template
        .map(|path| {
            let template = PageTemplate::load(path)?;
            warn_missing_markers(&template, path);
            Ok::<_, anyhow::Error>(template)
        })
        .transpose()?;

    let html = convert(&markdown, template.as_ref())
        .with_context(|| format!("failed to convert `{}`", input.display()))?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create `{}`", parent.display()))?;
            }
            fs::write(path, html).with_context(|| format!("failed to write `{}`", path.display()))?;
            log!("page"; "{} -> {}", input.display(), path.display());
        }
        None => {
            writeln!(stdout, "{html}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Print the title of `input` to stdout.
pub fn print_title(input: &Path) -> Result<()> {
    let markdown = read_markdown(input)?;
    let title = extract_title(&markdown)
        .with_context(|| format!("could not extract title from `{}`", input.display()))?;
    println!("{title}");
    Ok(())
}

/// Bare body html, or a full page when a template is given.
fn convert(markdown: &str, template: Option<&PageTemplate>) -> Result<String> {
    match template {
        Some(template) => render_page(markdown, template),
        None => Ok(markdown_to_html(markdown)?),
    }
}

fn read_markdown(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read markdown file `{}`", path.display()))
}
