//! HTML rendering of a parsed report.
//!
//! The markup uses the class vocabulary the analysis page styles against:
//! `score-header`, `category-breakdown`, `funnel-summaries`, `aggregate-lists`
//! and `coaching-tips-section`. Every piece of report text is escaped.

use super::document::{Block, BreakdownEntry, Detail, Document, Funnel, NamedList, Tip};
use super::inline::{escape_markup, render_inlines};
use super::parser::parse_report;
use super::rules::Section;

/// Result of [`render_or_fallback`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    /// `false` when the raw-text fallback was used.
    pub formatted: bool,
}

/// Render a report, falling back to the escaped raw text when it has no structure.
pub fn render_or_fallback(text: &str) -> Rendered {
    match parse_report(text) {
        Ok(document) => Rendered {
            html: render_html(&document),
            formatted: true,
        },
        Err(err) => {
            log::warn!("{}; displaying raw text", err);
            Rendered {
                html: render_fallback(text),
                formatted: false,
            }
        }
    }
}

/// Raw report in a monospaced block, escaped.
pub fn render_raw(text: &str) -> String {
    format!("<pre class=\"raw-analysis\">{}</pre>", escape_markup(text))
}

/// Raw report preceded by a notice that formatting was not possible.
pub fn render_fallback(text: &str) -> String {
    format!(
        "<p class=\"format-fallback\">Could not format analysis. Displaying raw text:</p>{}",
        render_raw(text)
    )
}

pub fn render_html(document: &Document) -> String {
    let mut output = String::new();

    for block in &document.blocks {
        match block {
            Block::Score(header) => output.push_str(&format!(
                "<div class=\"score-header\">Final Score: <span class=\"score-value\">{}</span> (<span class=\"interpretation\">{}</span>)</div>",
                escape_markup(&header.fraction),
                escape_markup(&header.interpretation)
            )),
            Block::Paragraph(text) => {
                output.push_str(&format!("<p>{}</p>", escape_markup(text)));
            }
            Block::Breakdown(entries) => output.push_str(&render_breakdown(entries)),
            Block::Summaries(funnels) => output.push_str(&render_summaries(funnels)),
            Block::Lists(lists) => output.push_str(&render_lists(lists)),
            Block::Tips(tips) => output.push_str(&render_tips(tips)),
        }
    }

    output
}

fn section_title(section: Section) -> String {
    format!(
        "<h3 class=\"section-title\">{}</h3>",
        escape_markup(section.heading())
    )
}

fn render_breakdown(entries: &[BreakdownEntry]) -> String {
    let mut out = format!(
        "<div class=\"category-breakdown\">{}<ul>",
        section_title(Section::Breakdown)
    );
    for entry in entries {
        out.push_str(&format!(
            "<li>{}: <span class=\"category-score\">{}</span></li>",
            escape_markup(&entry.category),
            escape_markup(&entry.score)
        ));
    }
    out.push_str("</ul></div>");
    out
}

fn render_summaries(funnels: &[Funnel]) -> String {
    let mut out = format!(
        "<div class=\"funnel-summaries\">{}",
        section_title(Section::Summaries)
    );
    for funnel in funnels {
        out.push_str("<div class=\"funnel-summary\">");
        if let Some(id) = &funnel.id {
            out.push_str(&format!("<div class=\"funnel-title\">{}", escape_markup(id)));
            if let Some(qualifier) = &funnel.qualifier {
                out.push_str(&format!(" <span>({})</span>", escape_markup(qualifier)));
            }
            out.push_str("</div>");
        }
        out.push_str("<ul class=\"detail-list\">");
        for detail in &funnel.details {
            out.push_str(&match detail {
                Detail::Labeled { label, body } => format!(
                    "<li><strong>{}:</strong> {}</li>",
                    escape_markup(label),
                    escape_markup(body)
                ),
                Detail::Unlabeled { text } => format!("<li>{}</li>", escape_markup(text)),
                Detail::Misc { text } => {
                    format!("<li class=\"misc-item\">{}</li>", escape_markup(text))
                }
            });
        }
        out.push_str("</ul></div>");
    }
    out.push_str("</div>");
    out
}

fn render_lists(lists: &[NamedList]) -> String {
    let mut out = format!(
        "<div class=\"aggregate-lists\">{}",
        section_title(Section::Lists)
    );
    for list in lists {
        out.push_str(&format!(
            "<p class=\"list-title-paragraph\"><strong>{}:</strong></p>",
            escape_markup(&list.title)
        ));
        if list.missed {
            out.push_str("<ul class=\"detail-list missed-opportunities\">");
        } else {
            out.push_str("<ul class=\"detail-list\">");
        }
        for item in &list.items {
            out.push_str(&format!("<li>{}</li>", escape_markup(item)));
        }
        out.push_str("</ul>");
    }
    out.push_str("</div>");
    out
}

fn render_tips(tips: &[Tip]) -> String {
    let mut out = format!(
        "<div class=\"coaching-tips-section\">{}",
        section_title(Section::Tips)
    );
    for tip in tips {
        out.push_str(&format!("<p>{}</p>", render_inlines(&tip.spans)));
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str) -> String {
        render_html(&parse_report(text).unwrap())
    }

    #[test]
    fn test_render_score_header() {
        assert_eq!(
            render("Final Score: 88/100 (Strong)"),
            "<div class=\"score-header\">Final Score: <span class=\"score-value\">88/100</span> (<span class=\"interpretation\">Strong</span>)</div>"
        );
    }

    #[test]
    fn test_render_breakdown() {
        assert_eq!(
            render("Category breakdown:\n• Rapport – 8/10"),
            "<div class=\"category-breakdown\"><h3 class=\"section-title\">Category breakdown:</h3><ul><li>Rapport: <span class=\"category-score\">8/10</span></li></ul></div>"
        );
    }

    #[test]
    fn test_render_funnel() {
        let html = render("Funnel summaries:\n### F1 (demo)\n- Pain: customer frustrated\nextra");
        assert_eq!(
            html,
            "<div class=\"funnel-summaries\"><h3 class=\"section-title\">Funnel summaries:</h3>\
             <div class=\"funnel-summary\"><div class=\"funnel-title\">F1 <span>(demo)</span></div>\
             <ul class=\"detail-list\"><li><strong>Pain:</strong> \"customer frustrated\"</li>\
             <li class=\"misc-item\">extra</li></ul></div></div>"
        );
    }

    #[test]
    fn test_render_untitled_funnel_has_no_title() {
        let html = render("Funnel summaries:\n- orphan");
        assert!(!html.contains("funnel-title"));
        assert!(html.contains("<li>\"orphan\"</li>"));
    }

    #[test]
    fn test_render_missed_list() {
        let html = render(
            "Aggregate lists (tagged):\nThinking questions:\n• \"why?\"\nMissed Opportunities:\n• skipped pain",
        );
        assert!(html.contains("<p class=\"list-title-paragraph\"><strong>Thinking questions:</strong></p><ul class=\"detail-list\"><li>\"why?\"</li></ul>"));
        assert!(html.contains("<ul class=\"detail-list missed-opportunities\"><li>\"skipped pain\"</li></ul>"));
    }

    #[test]
    fn test_render_tips_with_emphasis() {
        assert_eq!(
            render("Coaching tips:\nSay \"hello\" **now**"),
            "<div class=\"coaching-tips-section\"><h3 class=\"section-title\">Coaching tips:</h3><p>Say <code>hello</code> <strong>now</strong></p></div>"
        );
    }

    #[test]
    fn test_render_escapes_content() {
        let html = render("Funnel summaries:\n### F1\n<script>alert(1)</script>");
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_paragraph_for_malformed_score() {
        assert_eq!(render("Final Score: <unknown>"), "<p>Final Score: &lt;unknown&gt;</p>");
    }

    // ============================================================================
    // Fallback tests
    // ============================================================================

    #[test]
    fn test_render_or_fallback_formats_report() {
        let rendered = render_or_fallback("Coaching tips:\nKeep going.");
        assert!(rendered.formatted);
        assert!(rendered.html.starts_with("<div class=\"coaching-tips-section\">"));
    }

    #[test]
    fn test_render_or_fallback_uses_raw_text() {
        let rendered = render_or_fallback("NEED <help>\nplain");
        assert!(!rendered.formatted);
        assert_eq!(
            rendered.html,
            "<p class=\"format-fallback\">Could not format analysis. Displaying raw text:</p><pre class=\"raw-analysis\">NEED &lt;help&gt;\nplain</pre>"
        );
    }

    #[test]
    fn test_render_raw_escapes() {
        assert_eq!(render_raw("a < b"), "<pre class=\"raw-analysis\">a &lt; b</pre>");
    }
}
