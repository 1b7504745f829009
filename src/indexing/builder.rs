use std::path::Path;

use crate::config::DocsConfig;
use crate::error::AppError;
use crate::indexing::processor::process_file;
use crate::indexing::scanner::scan_markdown_files;
use crate::models::document::DocIndex;
use crate::rendering::highlight::{Highlighter, RegexHighlighter};

/// Build the documentation index for the configured docs tree using the
/// built-in highlighter.
pub fn build_index(config: &DocsConfig) -> Result<DocIndex, AppError> {
    let highlighter = RegexHighlighter::new()
        .map_err(|e| AppError::Internal(format!("Failed to load highlighter: {e}")))?;

    build_index_with(&config.docs_root, &config.exclude_dirs, &highlighter)
}

/// Scan `root`, process every markdown file and aggregate the index.
///
/// A file that fails to process is logged and left out; only a failure to
/// scan the root aborts the build.
pub fn build_index_with(
    root: &Path,
    extra_excludes: &[String],
    highlighter: &dyn Highlighter,
) -> Result<DocIndex, AppError> {
    let paths = scan_markdown_files(root, extra_excludes)?;

    let mut documents = Vec::with_capacity(paths.len());
    for path in &paths {
        match process_file(root, path, highlighter) {
            Ok(doc) => documents.push(doc),
            Err(e) => tracing::warn!("Skipping '{path}': {e}"),
        }
    }

    let index = DocIndex::from_documents(documents);
    tracing::info!(
        "Built documentation index: {} documents in {} categories ({} skipped)",
        index.files.len(),
        index.categories.len(),
        paths.len() - index.files.len()
    );

    Ok(index)
}
