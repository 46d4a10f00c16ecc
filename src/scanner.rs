//! Resolving CLI path arguments into the list of template files.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use walkdir::WalkDir;

/// Resolve path arguments: files are taken as-is regardless of extension,
/// directories are walked recursively keeping files whose extension is in
/// `extensions`. A path that is neither is a fatal error.
pub fn collect_files(paths: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(find_dir(path, extensions)?);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            bail!("Not a file or directory: '{}'", path.display());
        }
    }

    Ok(files)
}

fn find_dir(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && matches_extension(path, extensions) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}
