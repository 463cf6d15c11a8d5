//! Filesystem helpers for the build: walking, cleaning and copying trees.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files below `dir` recursively, sorted by path.
///
/// Returns an empty list if `dir` does not exist.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}

/// Whether `path` names a markdown source file.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Absolute form of `path`, canonicalized when it exists.
///
/// Paths that do not exist yet (an output directory before the first build)
/// are joined onto the current directory instead.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Remove `dir` if present, then recreate it empty.
pub fn clean_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("failed to delete `{}`", dir.display()))?;
    }
    fs::create_dir_all(dir).with_context(|| format!("failed to create `{}`", dir.display()))
}

/// Recursively copy the contents of `src` into `dest`.
///
/// `dest` is created when missing. Fails if `src` does not exist or if `dest`
/// exists but is not a directory. Returns the number of files copied.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<usize> {
    if !src.is_dir() {
        bail!("source directory not found: {}", src.display());
    }
    let mut count = 0;
    copy_into(src, dest, &mut count)?;
    Ok(count)
}

fn copy_into(src: &Path, dest: &Path, count: &mut usize) -> Result<()> {
    if dest.exists() && !dest.is_dir() {
        bail!("destination exists but is not a directory: {}", dest.display());
    }
    if !dest.exists() {
        crate::debug!("copy"; "creating {}", dest.display());
        fs::create_dir_all(dest).with_context(|| format!("failed to create `{}`", dest.display()))?;
    }

    for entry in fs::read_dir(src).with_context(|| format!("failed to read `{}`", src.display()))? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if src_path.is_dir() {
            copy_into(&src_path, &dest_path, count)?;
        } else if src_path.is_file() {
            crate::debug!("copy"; "{} -> {}", src_path.display(), dest_path.display());
            fs::copy(&src_path, &dest_path).with_context(|| {
                format!("failed to copy `{}` to `{}`", src_path.display(), dest_path.display())
            })?;
            *count += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_dir_recursive_nested() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("static");
        fs::create_dir_all(src.join("images")).unwrap();
        fs::write(src.join("index.css"), "body {}").unwrap();
        fs::write(src.join("images/logo.png"), "fake png").unwrap();

        let dest = dir.path().join("public");
        let count = copy_dir_recursive(&src, &dest).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read_to_string(dest.join("index.css")).unwrap(), "body {}");
        assert!(dest.join("images/logo.png").exists());
    }

    #[test]
    fn test_copy_dir_recursive_missing_source() {
        let dir = TempDir::new().unwrap();
        let err =
            copy_dir_recursive(&dir.path().join("nope"), &dir.path().join("out")).unwrap_err();
        assert!(err.to_string().contains("source directory not found"));
    }

    #[test]
    fn test_copy_dir_recursive_dest_is_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("static");
        fs::create_dir_all(&src).unwrap();
        let dest = dir.path().join("public");
        fs::write(&dest, "not a dir").unwrap();

        let err = copy_dir_recursive(&src, &dest).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_clean_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("public");
        fs::create_dir_all(out.join("old")).unwrap();
        fs::write(out.join("old/stale.html"), "stale").unwrap();

        clean_dir(&out).unwrap();

        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_collect_all_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b/two.md"), "").unwrap();
        fs::write(dir.path().join("a.md"), "").unwrap();
        fs::write(dir.path().join(".DS_Store"), "").unwrap();

        let files = collect_all_files(dir.path());
        assert_eq!(files, vec![dir.path().join("a.md"), dir.path().join("b/two.md")]);
    }

    #[test]
    fn test_normalize_path() {
        let dir = TempDir::new().unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        assert_eq!(normalize_path(dir.path()), canonical);

        let missing = canonical.join("not/yet/built");
        assert_eq!(normalize_path(&missing), missing);
        assert!(normalize_path(Path::new("relative")).is_absolute());
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("content/index.md")));
        assert!(!is_markdown(Path::new("content/image.png")));
        assert!(!is_markdown(Path::new("content/md")));
    }
}
