//! Single-pass parser from report text to [`Document`].
//!
//! [`ParserState`] is threaded through a fold over the trimmed, non-empty
//! lines. At most one section is open at a time, and within the funnel
//! summaries or aggregate lists at most one sub-scope (the current funnel or
//! the current named list). Opening anything new closes the sub-scope first,
//! then the section, and moves the finished block into the document.

use super::document::{Block, BreakdownEntry, Detail, Document, Funnel, NamedList, Tip};
use super::inline::quote_wrap;
use super::rules::{classify_content, classify_line, parse_score, ContentLine, LineClass, Section};

/// Why a report could not be turned into a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("report contains no recognised sections")]
    NoStructure,
}

/// The section currently being filled, with its open sub-scope if any.
#[derive(Debug)]
enum OpenSection {
    Breakdown(Vec<BreakdownEntry>),
    Summaries {
        funnels: Vec<Funnel>,
        current: Option<Funnel>,
    },
    Lists {
        lists: Vec<NamedList>,
        current: Option<NamedList>,
    },
    Tips(Vec<Tip>),
}

impl OpenSection {
    fn new(section: Section) -> Self {
        match section {
            Section::Breakdown => OpenSection::Breakdown(Vec::new()),
            Section::Summaries => OpenSection::Summaries {
                funnels: Vec::new(),
                current: None,
            },
            Section::Lists => OpenSection::Lists {
                lists: Vec::new(),
                current: None,
            },
            Section::Tips => OpenSection::Tips(Vec::new()),
        }
    }

    fn section(&self) -> Section {
        match self {
            OpenSection::Breakdown(_) => Section::Breakdown,
            OpenSection::Summaries { .. } => Section::Summaries,
            OpenSection::Lists { .. } => Section::Lists,
            OpenSection::Tips(_) => Section::Tips,
        }
    }

    fn has_sub_scope(&self) -> bool {
        match self {
            OpenSection::Summaries { current, .. } => current.is_some(),
            OpenSection::Lists { current, .. } => current.is_some(),
            OpenSection::Breakdown(_) | OpenSection::Tips(_) => false,
        }
    }

    fn close_sub_scope(&mut self) {
        match self {
            OpenSection::Summaries { funnels, current } => funnels.extend(current.take()),
            OpenSection::Lists { lists, current } => lists.extend(current.take()),
            OpenSection::Breakdown(_) | OpenSection::Tips(_) => {}
        }
    }

    fn into_block(mut self) -> Block {
        self.close_sub_scope();
        match self {
            OpenSection::Breakdown(entries) => Block::Breakdown(entries),
            OpenSection::Summaries { funnels, .. } => Block::Summaries(funnels),
            OpenSection::Lists { lists, .. } => Block::Lists(lists),
            OpenSection::Tips(tips) => Block::Tips(tips),
        }
    }

    fn append(&mut self, line: &str) {
        let content = classify_content(self.section(), line);

        match self {
            OpenSection::Breakdown(entries) => match content {
                ContentLine::BreakdownEntry { category, score } => entries.push(BreakdownEntry {
                    category: category.to_string(),
                    score: score.to_string(),
                }),
                _ => log::debug!("dropping unmatched breakdown line: {}", line),
            },
            OpenSection::Summaries { funnels, current } => match content {
                ContentLine::FunnelHeader { id, qualifier } => {
                    funnels.extend(current.take());
                    *current = Some(Funnel::titled(id, qualifier));
                }
                ContentLine::Detail { label, body } => {
                    let funnel = current.get_or_insert_with(|| {
                        log::debug!("detail line before any funnel header: {}", line);
                        Funnel::untitled()
                    });
                    funnel.details.push(match label {
                        Some(label) => Detail::Labeled {
                            label: label.to_string(),
                            body: quote_wrap(body),
                        },
                        None => Detail::Unlabeled {
                            text: quote_wrap(body),
                        },
                    });
                }
                ContentLine::Text(text) => match current {
                    Some(funnel) => funnel.details.push(Detail::Misc {
                        text: text.to_string(),
                    }),
                    None => log::debug!("dropping summary text outside a funnel: {}", line),
                },
                _ => {}
            },
            OpenSection::Lists { lists, current } => match content {
                ContentLine::ListTitle { title } => {
                    lists.extend(current.take());
                    *current = Some(NamedList::new(title));
                }
                ContentLine::ListItem(item) => match current {
                    Some(list) if !item.is_empty() => list.items.push(quote_wrap(item)),
                    Some(_) => {}
                    None => log::debug!("dropping list item outside a named list: {}", line),
                },
                ContentLine::Text(text) => match current {
                    Some(list) => {
                        let text = quote_wrap(text);
                        if !list.extend_last(&text) {
                            list.items.push(text);
                        }
                    }
                    None => log::debug!("dropping list text outside a named list: {}", line),
                },
                _ => {}
            },
            OpenSection::Tips(tips) => {
                if let ContentLine::Text(text) = content {
                    tips.push(Tip::new(text));
                }
            }
        }
    }
}

/// Mutable state of one parse pass.
#[derive(Debug, Default)]
pub struct ParserState {
    open: Option<OpenSection>,
    document: Document,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_section(&self) -> Option<Section> {
        self.open.as_ref().map(OpenSection::section)
    }

    pub fn has_sub_scope(&self) -> bool {
        self.open.as_ref().is_some_and(OpenSection::has_sub_scope)
    }

    /// Number of open scopes: 0, 1 (section) or 2 (section and sub-scope).
    pub fn depth(&self) -> usize {
        usize::from(self.open.is_some()) + usize::from(self.has_sub_scope())
    }

    /// Fold step: feed one line and hand the state back.
    pub fn advance(mut self, line: &str) -> Self {
        self.feed(line);
        self
    }

    /// Process one trimmed, non-empty line.
    pub fn feed(&mut self, line: &str) {
        match classify_line(line) {
            LineClass::Score(raw) => {
                self.close();
                match parse_score(raw) {
                    Some(header) => self.document.push(Block::Score(header)),
                    None => {
                        log::debug!("malformed score line kept as paragraph: {}", raw);
                        self.document.push(Block::Paragraph(raw.to_string()));
                    }
                }
            }
            LineClass::Heading { section, rest } => {
                self.close();
                self.open = Some(OpenSection::new(section));
                if !rest.is_empty() {
                    self.append(rest);
                }
            }
            LineClass::Content(text) => self.append(text),
        }
    }

    fn append(&mut self, line: &str) {
        match self.open.as_mut() {
            Some(open) => open.append(line),
            None => log::trace!("dropping line outside any section: {}", line),
        }
    }

    /// Close the sub-scope, then the section, moving the block into the document.
    fn close(&mut self) {
        if let Some(open) = self.open.take() {
            self.document.push(open.into_block());
        }
    }

    /// Close whatever is still open and return the document.
    pub fn finish(mut self) -> Document {
        self.close();
        self.document
    }
}

/// Parse a plain-text analysis report.
///
/// Returns [`FormatError::NoStructure`] when nothing in the text was
/// recognised, so callers can fall back to showing the raw report.
pub fn parse_report(text: &str) -> Result<Document, FormatError> {
    let document = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .fold(ParserState::new(), ParserState::advance)
        .finish();

    if document.is_empty() {
        Err(FormatError::NoStructure)
    } else {
        Ok(document)
    }
}
