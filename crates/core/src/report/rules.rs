//! Line grammar for analysis reports.
//!
//! Two ordered rule tables. [`classify_line`] runs first on every line and
//! decides between the score header, a section heading, or content. Content is
//! then matched against the rules of the open section by [`classify_content`].
//! Nothing here mutates state; the parser decides what to do with each match.

use std::sync::OnceLock;

use regex::Regex;

use super::document::ScoreHeader;

/// Prefix of the score header line. Always checked before section headings.
pub const FINAL_SCORE: &str = "Final Score:";

/// A near-miss lists heading (e.g. without `(tagged)`) never becomes funnel text.
const LISTS_PREFIX: &str = "Aggregate lists";

/// Glyphs that mark a bulleted line in the aggregate lists.
const BULLETS: [char; 3] = ['•', '-', '*'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Breakdown,
    Summaries,
    Lists,
    Tips,
}

impl Section {
    /// Section headings in matching order.
    pub const ALL: [Section; 4] = [
        Section::Breakdown,
        Section::Summaries,
        Section::Lists,
        Section::Tips,
    ];

    /// The literal heading that opens this section.
    pub fn heading(self) -> &'static str {
        match self {
            Section::Breakdown => "Category breakdown:",
            Section::Summaries => "Funnel summaries:",
            Section::Lists => "Aggregate lists (tagged):",
            Section::Tips => "Coaching tips:",
        }
    }
}

/// What a trimmed line means before looking at the open section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Starts with [`FINAL_SCORE`]; carries the whole line.
    Score(&'a str),
    /// Opens `section`. `rest` is any text after the heading on the same line.
    Heading { section: Section, rest: &'a str },
    Content(&'a str),
}

pub fn classify_line(line: &str) -> LineClass<'_> {
    if line.starts_with(FINAL_SCORE) {
        return LineClass::Score(line);
    }

    Section::ALL
        .iter()
        .find_map(|section| {
            line.strip_prefix(section.heading())
                .map(|rest| LineClass::Heading {
                    section: *section,
                    rest: rest.trim(),
                })
        })
        .unwrap_or(LineClass::Content(line))
}

fn score_regex() -> &'static Regex {
    static RE_SCORE: OnceLock<Regex> = OnceLock::new();
    RE_SCORE.get_or_init(|| Regex::new(r"Final Score:\s*(\d+/\d+)\s*\(([^)]+)\)").unwrap())
}

/// Extract `<n>/<m>` and the parenthesised interpretation from a score line.
pub fn parse_score(line: &str) -> Option<ScoreHeader> {
    let caps = score_regex().captures(line)?;
    Some(ScoreHeader {
        fraction: caps.get(1)?.as_str().to_string(),
        interpretation: caps.get(2)?.as_str().trim().to_string(),
    })
}

/// What a content line means inside a given section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLine<'a> {
    /// `• Category – score`
    BreakdownEntry { category: &'a str, score: &'a str },
    /// `### F1 (qualifier)`
    FunnelHeader {
        id: &'a str,
        qualifier: Option<&'a str>,
    },
    /// `- Label: body` or `- body`
    Detail {
        label: Option<&'a str>,
        body: &'a str,
    },
    /// `Thinking questions:`
    ListTitle { title: &'a str },
    /// A bulleted line with the glyph stripped.
    ListItem(&'a str),
    /// Anything else the section accepts as free text.
    Text(&'a str),
    /// Matches no rule of the section.
    Unmatched,
}

fn breakdown_regex() -> &'static Regex {
    static RE_BREAKDOWN: OnceLock<Regex> = OnceLock::new();
    RE_BREAKDOWN.get_or_init(|| Regex::new(r"^•\s*([^–]+)–\s*(.*)$").unwrap())
}

fn funnel_regex() -> &'static Regex {
    static RE_FUNNEL: OnceLock<Regex> = OnceLock::new();
    RE_FUNNEL.get_or_init(|| Regex::new(r"^(?:###\s*)?(F\d+)\s*(?:\((.*)\))?\s*$").unwrap())
}

pub fn classify_content(section: Section, line: &str) -> ContentLine<'_> {
    match section {
        Section::Breakdown => classify_breakdown(line),
        Section::Summaries => classify_summary(line),
        Section::Lists => classify_list(line),
        Section::Tips => ContentLine::Text(line),
    }
}

fn classify_breakdown(line: &str) -> ContentLine<'_> {
    breakdown_regex()
        .captures(line)
        .and_then(|caps| {
            Some(ContentLine::BreakdownEntry {
                category: caps.get(1)?.as_str().trim(),
                score: caps.get(2)?.as_str().trim(),
            })
        })
        .unwrap_or(ContentLine::Unmatched)
}

fn classify_summary(line: &str) -> ContentLine<'_> {
    if let Some(caps) = funnel_regex().captures(line) {
        if let Some(id) = caps.get(1) {
            return ContentLine::FunnelHeader {
                id: id.as_str(),
                qualifier: caps.get(2).map(|q| q.as_str().trim()),
            };
        }
    }

    if let Some(rest) = line.strip_prefix('-') {
        return match rest.split_once(':') {
            Some((label, body)) if !label.trim().is_empty() => ContentLine::Detail {
                label: Some(label.trim()),
                body: body.trim(),
            },
            _ => ContentLine::Detail {
                label: None,
                body: rest.trim(),
            },
        };
    }

    if line.starts_with(LISTS_PREFIX) {
        return ContentLine::Unmatched;
    }

    ContentLine::Text(line)
}

fn classify_list(line: &str) -> ContentLine<'_> {
    if let Some(item) = line.strip_prefix(BULLETS) {
        return ContentLine::ListItem(item.trim());
    }

    if let Some(title) = line.strip_suffix(':') {
        return ContentLine::ListTitle {
            title: title.trim(),
        };
    }

    ContentLine::Text(line)
}
