use crate::prelude::*;
use colored::Colorize;
use funnelcoach_core::report::{
    parse_report, render_or_fallback, Block, Detail, Document, Funnel, Inline, NamedList, Section,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal view
    #[default]
    Text,
    /// Markup for the analysis page
    Html,
    /// Parsed document as JSON
    Json,
    /// The report exactly as the model wrote it
    Raw,
}

pub fn render_analysis(text: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Raw => Ok(text.to_string()),
        OutputFormat::Html => Ok(render_or_fallback(text).html),
        OutputFormat::Json => match parse_report(text) {
            Ok(document) => serde_json::to_string_pretty(&document)
                .wrap_err("Failed to serialize analysis"),
            Err(err) => serde_json::to_string_pretty(&serde_json::json!({
                "error": err.to_string(),
                "raw": text,
            }))
            .wrap_err("Failed to serialize analysis"),
        },
        OutputFormat::Text => Ok(match parse_report(text) {
            Ok(document) => format_document_text(&document),
            Err(err) => {
                log::warn!("{}; displaying raw text", err);
                format!(
                    "{}\n{}",
                    "Could not format analysis. Displaying raw text:".yellow(),
                    text
                )
            }
        }),
    }
}

pub fn format_document_text(document: &Document) -> String {
    let mut sections = Vec::new();

    for block in &document.blocks {
        sections.push(match block {
            Block::Score(header) => format!(
                "{} {} ({})",
                "Final Score:".bold(),
                header.fraction.bold().green(),
                header.interpretation.italic()
            ),
            Block::Paragraph(text) => text.clone(),
            Block::Breakdown(entries) => {
                let mut table = new_table();
                for entry in entries {
                    table.add_row(prettytable::row![entry.category, entry.score.green()]);
                }
                format!("{}\n{}", section_title(Section::Breakdown), table)
            }
            Block::Summaries(funnels) => {
                let mut out = section_title(Section::Summaries);
                for funnel in funnels {
                    out.push_str(&format_funnel(funnel));
                }
                out
            }
            Block::Lists(lists) => {
                let mut out = section_title(Section::Lists);
                for list in lists {
                    out.push_str(&format_list(list));
                }
                out
            }
            Block::Tips(tips) => {
                let mut out = section_title(Section::Tips);
                for tip in tips {
                    out.push_str(&format!("\n{}", format_inlines(&tip.spans)));
                }
                out
            }
        });
    }

    sections.join("\n\n")
}

fn section_title(section: Section) -> String {
    section.heading().bold().cyan().to_string()
}

fn format_funnel(funnel: &Funnel) -> String {
    let mut out = String::new();
    if let Some(title) = funnel.title() {
        out.push_str(&format!("\n{}", title.bold()));
    }
    for detail in &funnel.details {
        out.push_str(&match detail {
            Detail::Labeled { label, body } => format!("\n  - {}: {}", label.bold(), body),
            Detail::Unlabeled { text } => format!("\n  - {}", text),
            Detail::Misc { text } => format!("\n    {}", text.dimmed()),
        });
    }
    out
}

fn format_list(list: &NamedList) -> String {
    let mut out = format!("\n{}", format!("{}:", list.title).bold());
    for item in &list.items {
        if list.missed {
            out.push_str(&format!("\n  • {}", item.yellow()));
        } else {
            out.push_str(&format!("\n  • {}", item));
        }
    }
    out
}

fn format_inlines(spans: &[Inline]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Inline::Text(text) => text.clone(),
            Inline::Code(inner) => format!("\"{}\"", format_inlines(inner))
                .cyan()
                .to_string(),
            Inline::Strong(inner) => format_inlines(inner).bold().to_string(),
        })
        .collect()
}
