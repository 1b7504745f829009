use std::cmp::Reverse;

use crate::models::document::{DocIndex, Document};
use crate::models::search::{SearchMatch, SearchResult};

/// Maximum number of results returned for one query.
pub const MAX_RESULTS: usize = 20;
/// Maximum snippets extracted per query token and document.
pub const MAX_SNIPPETS_PER_TOKEN: usize = 3;
/// Characters of context kept on each side of a match.
pub const SNIPPET_CONTEXT_CHARS: usize = 50;

/// Case folding used for matching; one char in, one char out, so offsets
/// in the folded text line up with the original.
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

/// Split a query on whitespace into lowercased tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|token| token.chars().map(fold_char).collect())
        .collect()
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

/// Up to `limit` context snippets around successive occurrences of `token`.
///
/// `text` and `folded` must be the same text, original and case-folded.
fn snippets_for_token(
    text: &[char],
    folded: &[char],
    token: &[char],
    limit: usize,
) -> Vec<SearchMatch> {
    let mut matches = Vec::new();
    let mut cursor = 0;

    while matches.len() < limit {
        let Some(pos) = find_from(folded, token, cursor) else {
            break;
        };
        let end = pos + token.len();
        let start = pos.saturating_sub(SNIPPET_CONTEXT_CHARS);
        let stop = (end + SNIPPET_CONTEXT_CHARS).min(text.len());

        matches.push(SearchMatch {
            text: text[start..stop].iter().collect::<String>().trim().to_string(),
            highlight: text[pos..end].iter().collect(),
        });
        cursor = end;
    }

    matches
}

/// Match one document against all query tokens.
///
/// Returns `None` unless every token occurs in the title or content.
fn match_document(doc: &Document, tokens: &[Vec<char>]) -> Option<(bool, SearchResult)> {
    let text: Vec<char> = format!("{} {}", doc.title, doc.content).chars().collect();
    let folded: Vec<char> = text.iter().copied().map(fold_char).collect();

    if !tokens.iter().all(|t| find_from(&folded, t, 0).is_some()) {
        return None;
    }

    let folded_title = fold(&doc.title);
    let title_hit = tokens.iter().any(|t| find_from(&folded_title, t, 0).is_some());

    let matches = tokens
        .iter()
        .flat_map(|t| snippets_for_token(&text, &folded, t, MAX_SNIPPETS_PER_TOKEN))
        .collect();

    Some((
        title_hit,
        SearchResult {
            file: doc.clone(),
            matches,
        },
    ))
}

/// Search an index for documents containing every token of `query`.
///
/// Matching is a case-insensitive substring test over title and rendered
/// content (markup included). Documents with a token in the title rank
/// first, then by descending snippet count; at most [`MAX_RESULTS`] are
/// returned. An empty or whitespace-only query matches nothing.
pub fn search_index(index: &DocIndex, query: &str) -> Vec<SearchResult> {
    let tokens: Vec<Vec<char>> = tokenize(query).iter().map(|t| t.chars().collect()).collect();
    if tokens.is_empty() {
        return vec![];
    }

    let mut ranked: Vec<(bool, SearchResult)> = index
        .files
        .iter()
        .filter_map(|doc| match_document(doc, &tokens))
        .collect();

    ranked.sort_by_key(|(title_hit, result)| (!*title_hit, Reverse(result.matches.len())));

    ranked
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(_, result)| result)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::Frontmatter;

    fn doc(slug: &str, title: &str, content: &str) -> Document {
        Document {
            path: format!("{slug}.md"),
            title: title.to_string(),
            slug: slug.to_string(),
            category: "root".to_string(),
            content: content.to_string(),
            frontmatter: Frontmatter::new(),
            last_modified: chrono::Utc::now(),
        }
    }

    fn slugs(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.file.slug.as_str()).collect()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  Stem  EXPORT\tmidi "), vec!["stem", "export", "midi"]);
        assert!(tokenize(" \n\t ").is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let index = DocIndex::from_documents(vec![doc("a", "Anything", "<p>anything</p>")]);
        assert!(search_index(&index, "").is_empty());
        assert!(search_index(&index, "   ").is_empty());
    }

    #[test]
    fn test_all_tokens_required() {
        let index = DocIndex::from_documents(vec![
            doc("both", "Stems", "<p>Export stems as WAV</p>"),
            doc("one", "Stems", "<p>Import stems</p>"),
            doc("none", "Sessions", "<p>Live</p>"),
        ]);

        let results = search_index(&index, "stems export");
        assert_eq!(slugs(&results), vec!["both"]);
    }

    #[test]
    fn test_markup_is_searched() {
        let index = DocIndex::from_documents(vec![doc("a", "Doc", "<table><td>x</td></table>")]);
        assert_eq!(search_index(&index, "table").len(), 1);
    }

    #[test]
    fn test_title_matches_rank_first() {
        let index = DocIndex::from_documents(vec![
            doc("body", "Getting Started", "<p>project project project project</p>"),
            doc("title", "Project Overview", "<p>Overview</p>"),
        ]);

        let results = search_index(&index, "project");
        assert_eq!(slugs(&results), vec!["title", "body"]);
    }

    #[test]
    fn test_ties_broken_by_match_count() {
        let index = DocIndex::from_documents(vec![
            doc("few", "Guide", "<p>mix</p>"),
            doc("many", "Guide", "<p>mix mix mix</p>"),
            doc("some", "Guide", "<p>mix mix</p>"),
        ]);

        let results = search_index(&index, "mix");
        assert_eq!(slugs(&results), vec!["many", "some", "few"]);
    }

    #[test]
    fn test_snippets_limited_per_token_and_accumulated() {
        let content = "<p>midi midi midi midi midi</p><p>tempo</p>";
        let index = DocIndex::from_documents(vec![doc("a", "Doc", content)]);

        let results = search_index(&index, "MIDI tempo");
        let matches = &results[0].matches;
        assert_eq!(matches.len(), 4);
        assert!(matches[..3].iter().all(|m| m.highlight == "midi"));
        assert_eq!(matches[3].highlight, "tempo");
    }

    #[test]
    fn test_snippet_context_is_bounded() {
        let content = format!("{}needle{}", "a".repeat(120), "b".repeat(120));
        let index = DocIndex::from_documents(vec![doc("a", "Doc", &content)]);

        let results = search_index(&index, "needle");
        let m = &results[0].matches[0];
        assert_eq!(m.text, format!("{}needle{}", "a".repeat(50), "b".repeat(50)));
        assert_eq!(m.highlight, "needle");
    }

    #[test]
    fn test_highlight_keeps_original_case() {
        let index = DocIndex::from_documents(vec![doc("a", "Stem Export", "<p>Body</p>")]);
        let results = search_index(&index, "export");
        assert_eq!(results[0].matches[0].highlight, "Export");
        assert!(results[0].matches[0].text.starts_with("Stem Export"));
    }

    #[test]
    fn test_results_truncated() {
        let docs = (0..30)
            .map(|i| doc(&format!("d{i}"), "Guide", "<p>loop</p>"))
            .collect();
        let index = DocIndex::from_documents(docs);
        assert_eq!(search_index(&index, "loop").len(), MAX_RESULTS);
    }

    #[test]
    fn test_non_ascii_offsets() {
        let index = DocIndex::from_documents(vec![doc("a", "Café", "<p>ÉCOUTE the mix</p>")]);
        let results = search_index(&index, "écoute");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matches[0].highlight, "ÉCOUTE");
    }
}
