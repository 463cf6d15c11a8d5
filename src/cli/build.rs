//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Init** - Clean or create the output directory
//! - **Static** - Copy the static directory verbatim
//! - **Pages** - Parallel markdown to html generation
//! - **Finalize** - Summary logging

use anyhow::Result;
use std::fs;

use crate::{
    config::SiteConfig,
    debug, log,
    logger::ProgressLine,
    page::{GenerateReport, PageTemplate, collect_pages, generate_pages, warn_missing_markers},
    utils::{
        fs::{clean_dir, copy_dir_recursive},
        plural_count,
    },
};

/// Build the entire site described by `config`.
///
/// Page failures do not abort the build; they are collected in the report.
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<GenerateReport> {
    let build = &config.build;
    debug!("build"; "site root {}", config.get_root().display());

    init_output(config)?;
    copy_static(config, quiet)?;

    let template = PageTemplate::load(&build.template)?;
    warn_missing_markers(&template, &build.template);

    let sources = collect_pages(&build.content);
    let progress = (!quiet && !sources.is_empty())
        .then(|| ProgressLine::new(&[("pages", sources.len())]));

    let report = generate_pages(
        &sources,
        &build.content,
        &template,
        &build.output,
        progress.as_ref(),
    );

    if let Some(p) = progress {
        p.finish();
    }
    if !quiet {
        log_summary(&report);
    }
    Ok(report)
}

fn init_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    if config.build.clean {
        debug!("build"; "cleaning {}", output.display());
        clean_dir(output)
    } else {
        Ok(fs::create_dir_all(output)?)
    }
}

/// A missing static directory only warrants a warning.
fn copy_static(config: &SiteConfig, quiet: bool) -> Result<()> {
    let static_dir = &config.build.static_dir;
    if !static_dir.is_dir() {
        log!("warning"; "static directory not found: {}", static_dir.display());
        return Ok(());
    }

    let count = copy_dir_recursive(static_dir, &config.build.output)?;
    if !quiet {
        log!("copy"; "{} from {}", plural_count(count, "file"), static_dir.display());
    }
    Ok(())
}

fn log_summary(report: &GenerateReport) {
    if report.is_success() {
        log!("build"; "generated {}", plural_count(report.written.len(), "page"));
    } else {
        log!(
            "build";
            "generated {}, {} failed",
            plural_count(report.written.len(), "page"),
            report.failed.len()
        );
    }
}
