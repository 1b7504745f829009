use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::document::Document;
use crate::rendering::frontmatter::{frontmatter_title, split_frontmatter};
use crate::rendering::highlight::Highlighter;
use crate::rendering::markdown::render_markdown;
use crate::rendering::slug::{category_from_path, slug_from_path, title_from_filename};

/// Turn raw markdown text into a [`Document`].
///
/// `relative_path` is the root-relative path with `/` separators; it drives
/// the slug, category and fallback title.
pub fn build_document(
    relative_path: &str,
    raw: &str,
    last_modified: DateTime<Utc>,
    highlighter: &dyn Highlighter,
) -> Document {
    let (frontmatter, body) = split_frontmatter(raw);

    let title = frontmatter_title(&frontmatter)
        .map(str::to_string)
        .unwrap_or_else(|| title_from_filename(relative_path));

    Document {
        path: relative_path.to_string(),
        title,
        slug: slug_from_path(relative_path),
        category: category_from_path(relative_path),
        content: render_markdown(body, highlighter),
        frontmatter,
        last_modified,
    }
}

/// Read and process one markdown file below `root`.
pub fn process_file(
    root: &Path,
    relative_path: &str,
    highlighter: &dyn Highlighter,
) -> Result<Document, AppError> {
    let full_path = root.join(relative_path);

    let raw = std::fs::read_to_string(&full_path)
        .map_err(|e| AppError::Io(format!("Failed to read '{}': {}", full_path.display(), e)))?;

    let last_modified = std::fs::metadata(&full_path)
        .and_then(|meta| meta.modified())
        .map(DateTime::<Utc>::from)
        .map_err(|e| {
            AppError::Io(format!(
                "Failed to read modification time of '{}': {}",
                full_path.display(),
                e
            ))
        })?;

    tracing::debug!("Processing {relative_path}");
    Ok(build_document(relative_path, &raw, last_modified, highlighter))
}
