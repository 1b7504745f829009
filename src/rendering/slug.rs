/// Category assigned to documents at the top level of the docs tree.
pub const ROOT_CATEGORY: &str = "root";

/// Convert text to a URL-safe slug.
///
/// Lowercases the input and collapses every run of characters that are not
/// ASCII alphanumerics into a single `-`, trimming hyphens at both ends.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Derive a document slug from its root-relative path.
///
/// The `.md` extension is dropped before slugifying, so `README.md`
/// becomes `readme` and `guides/Stem Export.md` becomes `guides-stem-export`.
pub fn slug_from_path(path: &str) -> String {
    slugify(strip_markdown_extension(path))
}

/// The first path segment, or [`ROOT_CATEGORY`] for top-level files.
pub fn category_from_path(path: &str) -> String {
    match path.split_once('/') {
        Some((first, _)) if !first.is_empty() => first.to_string(),
        _ => ROOT_CATEGORY.to_string(),
    }
}

/// Build a display title from a file name.
///
/// `-`, `_` and `.` act as word separators and every word is capitalized.
pub fn title_from_filename(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let stem = strip_markdown_extension(file_name);

    stem.split(['-', '_', '.', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn strip_markdown_extension(path: &str) -> &str {
    match path.rsplit_once('.') {
        Some((stem, ext)) if ext.eq_ignore_ascii_case("md") && !stem.ends_with('/') => stem,
        _ => path,
    }
}
