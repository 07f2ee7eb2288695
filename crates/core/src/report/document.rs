//! Structured form of an analysis report.

use serde::Serialize;

use super::inline::{tip_spans, Inline};
use super::rules::Section;

/// A parsed report: top-level blocks in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// The score header, if the report had a well-formed one.
    pub fn score(&self) -> Option<&ScoreHeader> {
        self.blocks.iter().find_map(|block| match block {
            Block::Score(header) => Some(header),
            _ => None,
        })
    }

    /// Sections in the order they were opened.
    pub fn sections(&self) -> Vec<Section> {
        self.blocks.iter().filter_map(Block::section).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Block {
    Score(ScoreHeader),
    /// A line that looked structural but could not be parsed, kept verbatim.
    Paragraph(String),
    Breakdown(Vec<BreakdownEntry>),
    Summaries(Vec<Funnel>),
    Lists(Vec<NamedList>),
    Tips(Vec<Tip>),
}

impl Block {
    pub fn section(&self) -> Option<Section> {
        match self {
            Block::Breakdown(_) => Some(Section::Breakdown),
            Block::Summaries(_) => Some(Section::Summaries),
            Block::Lists(_) => Some(Section::Lists),
            Block::Tips(_) => Some(Section::Tips),
            Block::Score(_) | Block::Paragraph(_) => None,
        }
    }
}

/// `Final Score: 88/100 (Strong)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreHeader {
    pub fraction: String,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub category: String,
    pub score: String,
}

/// One numbered funnel (`F1`, `F2`, ...) with its detail lines.
///
/// `id` is `None` when detail lines showed up before any funnel header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Funnel {
    pub id: Option<String>,
    pub qualifier: Option<String>,
    pub details: Vec<Detail>,
}

impl Funnel {
    pub fn titled(id: &str, qualifier: Option<&str>) -> Self {
        Self {
            id: Some(id.to_string()),
            qualifier: qualifier.map(str::to_string),
            details: Vec::new(),
        }
    }

    pub fn untitled() -> Self {
        Self::default()
    }

    /// Display title, e.g. `F1 (demo)`.
    pub fn title(&self) -> Option<String> {
        let id = self.id.as_deref()?;
        Some(match &self.qualifier {
            Some(qualifier) => format!("{} ({})", id, qualifier),
            None => id.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Detail {
    /// `- Label: body`, body already quote-wrapped.
    Labeled { label: String, body: String },
    /// `- body` with no label, quote-wrapped.
    Unlabeled { text: String },
    /// Wrapped or stray text inside a funnel, kept as-is.
    Misc { text: String },
}

/// A titled aggregate list such as `Thinking questions:`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedList {
    pub title: String,
    /// Set for the missed-opportunities list, which is presented apart.
    pub missed: bool,
    pub items: Vec<String>,
}

impl NamedList {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            missed: title.to_lowercase().contains("missed"),
            items: Vec::new(),
        }
    }

    /// Append `text` to the last item. Returns `false` when there is no item to extend.
    pub fn extend_last(&mut self, text: &str) -> bool {
        match self.items.last_mut() {
            Some(item) => {
                item.push(' ');
                item.push_str(text);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub text: String,
    pub spans: Vec<Inline>,
}

impl Tip {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            spans: tip_spans(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funnel_title_with_qualifier() {
        let funnel = Funnel::titled("F1", Some("demo"));
        assert_eq!(funnel.title().as_deref(), Some("F1 (demo)"));
    }

    #[test]
    fn test_funnel_title_without_qualifier() {
        assert_eq!(Funnel::titled("F2", None).title().as_deref(), Some("F2"));
        assert_eq!(Funnel::untitled().title(), None);
    }

    #[test]
    fn test_named_list_missed_flag_is_case_insensitive() {
        assert!(NamedList::new("Missed Opportunities (for feedback only)").missed);
        assert!(NamedList::new("Opportunities we MISSED").missed);
        assert!(!NamedList::new("Thinking questions").missed);
    }

    #[test]
    fn test_named_list_extend_last() {
        let mut list = NamedList::new("Pain points identified");
        assert!(!list.extend_last("\"orphan\""));
        assert!(list.items.is_empty());

        list.items.push("\"first\"".to_string());
        assert!(list.extend_last("\"second\""));
        assert_eq!(list.items, vec!["\"first\" \"second\"".to_string()]);
    }

    #[test]
    fn test_document_sections_skip_score_and_paragraph() {
        let doc = Document {
            blocks: vec![
                Block::Score(ScoreHeader {
                    fraction: "88/100".to_string(),
                    interpretation: "Strong".to_string(),
                }),
                Block::Paragraph("Final Score: pending".to_string()),
                Block::Tips(vec![]),
                Block::Breakdown(vec![]),
            ],
        };
        assert_eq!(doc.sections(), vec![Section::Tips, Section::Breakdown]);
        assert_eq!(doc.score().map(|s| s.fraction.as_str()), Some("88/100"));
    }

    #[test]
    fn test_block_serializes_with_kind_tag() {
        let block = Block::Breakdown(vec![BreakdownEntry {
            category: "Rapport".to_string(),
            score: "8/10".to_string(),
        }]);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["kind"], "breakdown");
        assert_eq!(json["content"][0]["category"], "Rapport");
    }
}
