//! Inline formatting for individual report fragments.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// A run of tip text with its emphasis. Emphasis spans nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    /// `"quoted"` span.
    Code(Vec<Inline>),
    /// `**bold**` span.
    Strong(Vec<Inline>),
}

/// Escape markup-significant characters so report text is never read as structure.
pub fn escape_markup(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Wrap `text` in double quotes unless it already starts and ends with one.
pub fn quote_wrap(text: &str) -> String {
    if text.starts_with('"') && text.ends_with('"') {
        text.to_string()
    } else {
        format!("\"{}\"", text)
    }
}

fn emphasis_regex() -> &'static Regex {
    static RE_EMPHASIS: OnceLock<Regex> = OnceLock::new();
    RE_EMPHASIS.get_or_init(|| Regex::new(r#""([^"]+)"|\*\*(.+?)\*\*"#).unwrap())
}

/// Split a coaching tip into plain, verbatim and strong spans.
///
/// Every `"X"` becomes [`Inline::Code`] and every `**X**` becomes
/// [`Inline::Strong`]; the delimiters themselves are dropped. The leftmost
/// marker wins and its contents are split again, so `**a "b"**` and
/// `"a **b**"` both keep the inner emphasis.
pub fn tip_spans(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in emphasis_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        if whole.start() > last {
            spans.push(Inline::Text(text[last..whole.start()].to_string()));
        }

        if let Some(quoted) = caps.get(1) {
            spans.push(Inline::Code(tip_spans(quoted.as_str())));
        } else if let Some(bold) = caps.get(2) {
            spans.push(Inline::Strong(tip_spans(bold.as_str())));
        }

        last = whole.end();
    }

    if last < text.len() {
        spans.push(Inline::Text(text[last..].to_string()));
    }

    spans
}

/// Render spans as escaped inline markup.
pub fn render_inlines(spans: &[Inline]) -> String {
    let mut output = String::new();

    for span in spans {
        match span {
            Inline::Text(text) => output.push_str(&escape_markup(text)),
            Inline::Code(inner) => {
                output.push_str(&format!("<code>{}</code>", render_inlines(inner)));
            }
            Inline::Strong(inner) => {
                output.push_str(&format!("<strong>{}</strong>", render_inlines(inner)));
            }
        }
    }

    output
}

/// Format a coaching tip paragraph as inline markup.
pub fn tip_format(text: &str) -> String {
    render_inlines(&tip_spans(text))
}
