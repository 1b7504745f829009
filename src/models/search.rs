use serde::{Deserialize, Serialize};

use crate::models::document::Document;

/// A context snippet around one occurrence of a query token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchMatch {
    pub text: String,
    pub highlight: String,
}

/// A document matching a search query, with its snippets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub file: Document,
    pub matches: Vec<SearchMatch>,
}
