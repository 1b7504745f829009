use crate::models::document::Frontmatter;

const DELIMITER: &str = "---";

/// Split a raw markdown file into its frontmatter and body.
///
/// The header must start on the first line with `---` and end at the next
/// line consisting of `---`. It is parsed as a YAML mapping; when that fails
/// the header is read line by line as `key: value` pairs. Files without a
/// header yield empty frontmatter and the full text as body.
pub fn split_frontmatter(raw: &str) -> (Frontmatter, &str) {
    let Some((header, body)) = extract_header(raw) else {
        return (Frontmatter::new(), raw);
    };

    let frontmatter = match parse_yaml_header(header) {
        Some(frontmatter) => frontmatter,
        None => {
            tracing::debug!("Frontmatter is not a YAML mapping, falling back to key/value lines");
            parse_key_value_lines(header)
        }
    };

    (frontmatter, body)
}

/// Locate the header text and the body following the closing delimiter.
fn extract_header(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let first_line_end = raw.find('\n')?;
    if raw[..first_line_end].trim_end() != DELIMITER {
        return None;
    }

    let header_start = first_line_end + 1;
    let mut offset = header_start;
    for line in raw[header_start..].split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let header = &raw[header_start..offset];
            let body = &raw[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }

    None
}

fn parse_yaml_header(header: &str) -> Option<Frontmatter> {
    if header.trim().is_empty() {
        return Some(Frontmatter::new());
    }

    match serde_yaml::from_str::<serde_yaml::Value>(header).ok()? {
        serde_yaml::Value::Mapping(mapping) => {
            let mut frontmatter = Frontmatter::new();
            for (key, value) in mapping {
                let key = match key {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                let value = serde_json::to_value(value).ok()?;
                frontmatter.insert(key, value);
            }
            Some(frontmatter)
        }
        serde_yaml::Value::Null => Some(Frontmatter::new()),
        _ => None,
    }
}

fn parse_key_value_lines(header: &str) -> Frontmatter {
    header
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = unquote(value.trim());
            Some((key.to_string(), serde_json::Value::String(value.to_string())))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// The `title` field, when present as a non-empty string.
pub fn frontmatter_title(frontmatter: &Frontmatter) -> Option<&str> {
    frontmatter
        .get("title")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|title| !title.is_empty())
}
