use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

/// Errors raised while highlighting a single code block.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),

    #[error("invalid grammar for '{language}': {message}")]
    Grammar { language: String, message: String },

    #[error("highlighting failed: {0}")]
    Failed(String),
}

/// A pluggable syntax highlighter keyed by canonical language name.
///
/// Implementations receive the language after alias resolution and return
/// an HTML fragment for the inside of a `<code>` element.
pub trait Highlighter: Send + Sync {
    /// Whether a grammar is available for the canonical language name.
    fn supports(&self, language: &str) -> bool;

    /// Highlight `code` as `language`, returning escaped HTML.
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;
}

/// Shorthand language tags and the grammar they map to.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("sh", "bash"),
    ("shell", "bash"),
    ("zsh", "bash"),
    ("console", "bash"),
    ("js", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("ts", "typescript"),
    ("yml", "yaml"),
    ("rs", "rust"),
    ("py", "python"),
    ("md", "markdown"),
    ("jsonc", "json"),
];

/// Normalize a fence info string to a canonical language name.
///
/// Only the first word is considered, so `sh title="setup"` resolves to
/// `bash`. Returns `None` for untagged fences.
pub fn resolve_language(info: &str) -> Option<String> {
    let tag = info
        .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if tag.is_empty() {
        return None;
    }

    let canonical = LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map(|(_, target)| (*target).to_string())
        .unwrap_or(tag);

    Some(canonical)
}

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Token rules for one language, compiled into a single alternation.
struct GrammarSpec {
    name: &'static str,
    comment: Option<&'static str>,
    /// Context required before a comment; matched but emitted as plain text.
    comment_lead: Option<&'static str>,
    string: &'static str,
    keywords: &'static [&'static str],
    keywords_ignore_case: bool,
}

const DOUBLE_AND_SINGLE_QUOTED: &str = r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'"#;
const JS_STRINGS: &str = r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\.)*`"#;

const GRAMMARS: &[GrammarSpec] = &[
    GrammarSpec {
        name: "bash",
        comment: Some(r"#[^\n]*"),
        comment_lead: Some(r"(?m:^|[ \t])"),
        string: DOUBLE_AND_SINGLE_QUOTED,
        keywords: &[
            "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case",
            "esac", "in", "function", "return", "export", "local", "echo", "cd", "exit",
        ],
        keywords_ignore_case: false,
    },
    GrammarSpec {
        name: "javascript",
        comment: Some(r"//[^\n]*|/\*[\s\S]*?\*/"),
        comment_lead: None,
        string: JS_STRINGS,
        keywords: &[
            "const", "let", "var", "function", "return", "if", "else", "for", "while", "import",
            "export", "from", "default", "async", "await", "new", "class", "extends", "this",
            "true", "false", "null", "undefined", "try", "catch", "throw",
        ],
        keywords_ignore_case: false,
    },
    GrammarSpec {
        name: "typescript",
        comment: Some(r"//[^\n]*|/\*[\s\S]*?\*/"),
        comment_lead: None,
        string: JS_STRINGS,
        keywords: &[
            "const", "let", "var", "function", "return", "if", "else", "for", "while", "import",
            "export", "from", "default", "async", "await", "new", "class", "extends", "this",
            "true", "false", "null", "undefined", "try", "catch", "throw", "interface", "type",
            "enum", "implements", "readonly", "private", "public", "as",
        ],
        keywords_ignore_case: false,
    },
    GrammarSpec {
        name: "json",
        comment: None,
        comment_lead: None,
        string: r#""(?:[^"\\\n]|\\.)*""#,
        keywords: &["true", "false", "null"],
        keywords_ignore_case: false,
    },
    GrammarSpec {
        name: "yaml",
        comment: Some(r"#[^\n]*"),
        comment_lead: Some(r"(?m:^|[ \t])"),
        string: DOUBLE_AND_SINGLE_QUOTED,
        keywords: &["true", "false", "null", "yes", "no"],
        keywords_ignore_case: false,
    },
    GrammarSpec {
        name: "toml",
        comment: Some(r"#[^\n]*"),
        comment_lead: None,
        string: DOUBLE_AND_SINGLE_QUOTED,
        keywords: &["true", "false"],
        keywords_ignore_case: false,
    },
    GrammarSpec {
        name: "rust",
        comment: Some(r"//[^\n]*|/\*[\s\S]*?\*/"),
        comment_lead: None,
        string: r#""(?:[^"\\]|\\.)*""#,
        keywords: &[
            "fn", "let", "mut", "pub", "use", "mod", "struct", "enum", "impl", "trait", "match",
            "if", "else", "for", "while", "loop", "return", "async", "await", "self", "Self",
            "true", "false", "const", "static", "where", "crate",
        ],
        keywords_ignore_case: false,
    },
    GrammarSpec {
        name: "python",
        comment: Some(r"#[^\n]*"),
        comment_lead: None,
        string: DOUBLE_AND_SINGLE_QUOTED,
        keywords: &[
            "def", "class", "return", "if", "elif", "else", "for", "while", "import", "from",
            "as", "with", "try", "except", "raise", "None", "True", "False", "lambda", "yield",
            "async", "await",
        ],
        keywords_ignore_case: false,
    },
    GrammarSpec {
        name: "sql",
        comment: Some(r"--[^\n]*"),
        comment_lead: None,
        string: r"'(?:[^']|'')*'",
        keywords: &[
            "select", "from", "where", "insert", "into", "values", "update", "set", "delete",
            "create", "table", "join", "on", "and", "or", "not", "null", "order", "by", "group",
        ],
        keywords_ignore_case: true,
    },
];

const TOKEN_CLASSES: &[&str] = &["comment", "string", "number", "keyword"];

fn compile_grammar(spec: &GrammarSpec) -> Result<Regex, HighlightError> {
    let mut alternatives = Vec::new();
    if let Some(comment) = spec.comment {
        let lead = spec.comment_lead.unwrap_or_default();
        alternatives.push(format!("{lead}(?P<comment>{comment})"));
    }
    alternatives.push(format!("(?P<string>{})", spec.string));
    alternatives.push(r"(?P<number>\b\d+(?:\.\d+)?\b)".to_string());
    if !spec.keywords.is_empty() {
        let flags = if spec.keywords_ignore_case { "?i" } else { "?" };
        alternatives.push(format!(
            r"(?P<keyword>\b({flags}:{})\b)",
            spec.keywords.join("|")
        ));
    }

    Regex::new(&alternatives.join("|")).map_err(|e| HighlightError::Grammar {
        language: spec.name.to_string(),
        message: e.to_string(),
    })
}

/// Built-in highlighter backed by a table of regex grammars.
///
/// Produces `<span class="tok-{class}">` wrappers for comments, strings,
/// numbers and keywords; everything else is escaped verbatim.
pub struct RegexHighlighter {
    grammars: HashMap<&'static str, Regex>,
}

impl RegexHighlighter {
    pub fn new() -> Result<Self, HighlightError> {
        let grammars = GRAMMARS
            .iter()
            .map(|spec| Ok((spec.name, compile_grammar(spec)?)))
            .collect::<Result<HashMap<_, _>, HighlightError>>()?;

        Ok(Self { grammars })
    }

    /// Canonical names of every bundled grammar.
    pub fn languages(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.grammars.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Highlighter for RegexHighlighter {
    fn supports(&self, language: &str) -> bool {
        self.grammars.contains_key(language)
    }

    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let grammar = self
            .grammars
            .get(language)
            .ok_or_else(|| HighlightError::UnsupportedLanguage(language.to_string()))?;

        let mut html = String::with_capacity(code.len() * 2);
        let mut last = 0;

        for caps in grammar.captures_iter(code) {
            let Some((class, m)) = TOKEN_CLASSES
                .iter()
                .find_map(|class| caps.name(class).map(|m| (*class, m)))
            else {
                continue;
            };

            html.push_str(&escape_html(&code[last..m.start()]));
            html.push_str(&format!(
                "<span class=\"tok-{class}\">{}</span>",
                escape_html(m.as_str())
            ));
            last = m.end();
        }

        html.push_str(&escape_html(&code[last..]));
        Ok(html)
    }
}
