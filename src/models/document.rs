use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key-value metadata parsed from a document's frontmatter header.
pub type Frontmatter = BTreeMap<String, serde_json::Value>;

/// A processed markdown document as it appears in the documentation index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Root-relative path with `/` separators (e.g., `guides/mixing.md`).
    pub path: String,
    /// Human-readable title.
    pub title: String,
    /// URL-safe identifier derived from the path.
    pub slug: String,
    /// First path segment, or `root` for top-level files.
    pub category: String,
    /// Rendered HTML body.
    pub content: String,
    /// Parsed frontmatter fields.
    #[serde(default)]
    pub frontmatter: Frontmatter,
    /// Modification time of the source file.
    pub last_modified: DateTime<Utc>,
}

/// The aggregate documentation index.
///
/// Rebuilt wholesale on every build and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocIndex {
    pub files: Vec<Document>,
    pub categories: Vec<String>,
}

impl DocIndex {
    /// Build an index from processed documents, deriving the sorted,
    /// de-duplicated category list.
    pub fn from_documents(files: Vec<Document>) -> Self {
        let categories = files
            .iter()
            .map(|doc| doc.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self { files, categories }
    }
}
