use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::rendering::highlight::{escape_html, resolve_language, Highlighter};

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Render a raw Markdown string to HTML.
///
/// Supports GitHub Flavored Markdown (GFM) features: tables, footnotes,
/// strikethrough and task lists. Code blocks are handed to `highlighter`;
/// a block whose language is unknown or whose highlighting fails is emitted
/// as escaped plain text and the rest of the document still renders.
pub fn render_markdown(raw: &str, highlighter: &dyn Highlighter) -> String {
    let parser = Parser::new_ext(raw, markdown_options());
    let events = HighlightedCodeBlocks {
        inner: parser,
        highlighter,
    };

    let mut html_output = String::new();
    html::push_html(&mut html_output, events);
    html_output
}

/// Event adapter that replaces each code block with pre-rendered HTML.
struct HighlightedCodeBlocks<'h, I> {
    inner: I,
    highlighter: &'h dyn Highlighter,
}

impl<'a, 'h, I> Iterator for HighlightedCodeBlocks<'h, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.inner.next()?;
        let Event::Start(Tag::CodeBlock(kind)) = event else {
            return Some(event);
        };

        let info = match &kind {
            CodeBlockKind::Fenced(info) => info.to_string(),
            CodeBlockKind::Indented => String::new(),
        };

        let mut code = String::new();
        for event in self.inner.by_ref() {
            match event {
                Event::Text(text) => code.push_str(&text),
                Event::End(TagEnd::CodeBlock) => break,
                _ => {}
            }
        }

        Some(Event::Html(CowStr::from(render_code_block(
            &code,
            &info,
            self.highlighter,
        ))))
    }
}

/// Render one code block, degrading to escaped text on any highlighter failure.
pub fn render_code_block(code: &str, info: &str, highlighter: &dyn Highlighter) -> String {
    let Some(language) = resolve_language(info) else {
        return format!("<pre><code>{}</code></pre>\n", escape_html(code));
    };

    let lang_attr = escape_html(&language);
    if highlighter.supports(&language) {
        match highlighter.highlight(code, &language) {
            Ok(highlighted) => {
                return format!(
                    "<pre class=\"highlight\" data-lang=\"{lang_attr}\"><code class=\"language-{lang_attr}\">{highlighted}</code></pre>\n"
                );
            }
            Err(e) => {
                tracing::warn!("Highlighting failed for '{language}' block, using plain text: {e}");
            }
        }
    }

    format!(
        "<pre><code class=\"language-{lang_attr}\">{}</code></pre>\n",
        escape_html(code)
    )
}
