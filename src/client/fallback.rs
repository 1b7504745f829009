use chrono::{DateTime, Utc};

use crate::models::document::{DocIndex, Document, Frontmatter};
use crate::rendering::slug::ROOT_CATEGORY;

/// Minimal index served when the real one cannot be loaded.
pub fn fallback_index() -> DocIndex {
    let overview = Document {
        path: "README.md".to_string(),
        title: "Project Overview".to_string(),
        slug: "readme".to_string(),
        category: ROOT_CATEGORY.to_string(),
        content: concat!(
            "<h1>Stemhub</h1>\n",
            "<p>Collaborative music project management: projects, stems and live sessions.</p>\n",
            "<p>The full documentation could not be loaded. Please try again later.</p>\n",
        )
        .to_string(),
        frontmatter: Frontmatter::new(),
        last_modified: DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap_or_default(),
    };

    DocIndex::from_documents(vec![overview])
}
