use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::AppError;

/// Directory names never descended into while scanning for documents.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "target",
    ".nuxt",
    ".output",
    ".vitepress",
    "coverage",
];

/// Recursively collect every `.md` file under `root`.
///
/// Directories named in [`DEFAULT_EXCLUDED_DIRS`] or `extra_excludes` are
/// skipped. Paths are returned relative to `root` with `/` separators and
/// sorted. Symlinks are not followed. Unreadable entries below the root are
/// logged and skipped; an unreadable root is an error.
pub fn scan_markdown_files(
    root: &Path,
    extra_excludes: &[String],
) -> Result<Vec<String>, AppError> {
    if !root.is_dir() {
        return Err(AppError::Io(format!(
            "Docs root '{}' is not a readable directory",
            root.display()
        )));
    }

    let is_excluded = |entry: &DirEntry| {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry.file_name().to_str().is_some_and(|name| {
                DEFAULT_EXCLUDED_DIRS.contains(&name) || extra_excludes.iter().any(|e| e == name)
            })
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_excluded(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(AppError::Io(format!(
                    "Failed to read docs root '{}': {}",
                    root.display(),
                    e
                )));
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable entry while scanning docs: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push(relative);
    }

    files.sort();
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}
