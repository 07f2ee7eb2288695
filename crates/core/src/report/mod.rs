/// Analysis report parsing and rendering
///
/// Turns the plain-text report produced by the coaching model into a
/// [`Document`] and renders it as HTML. Pure functions only; the caller
/// decides where the text comes from and where the markup goes.
pub mod document;
pub mod html;
pub mod inline;
pub mod parser;
pub mod rules;

pub use document::{Block, BreakdownEntry, Detail, Document, Funnel, NamedList, ScoreHeader, Tip};
pub use html::{render_fallback, render_html, render_or_fallback, render_raw, Rendered};
pub use inline::{escape_markup, quote_wrap, tip_format, tip_spans, Inline};
pub use parser::{parse_report, FormatError, ParserState};
pub use rules::Section;
