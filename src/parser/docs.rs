use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use scraper::{ElementRef, Html};

use super::headings::anchor_name;
use super::H3;

static WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Full description body for one pattern, one markdown file's worth of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDoc {
    pub id: String,
    pub body: String,
}

/// Collect each pattern's description body: the text of every element between
/// its heading and the next `<h3>`, whitespace-collapsed, one paragraph per
/// element. Headings without an anchor fail the whole parse, as in
/// [`super::parse_patterns`].
pub fn parse_docs(html: &str) -> Result<Vec<PatternDoc>> {
    let doc = Html::parse_document(html);
    doc.select(&H3)
        .map(|heading| {
            let id = anchor_name(heading)?;
            Ok(PatternDoc {
                id,
                body: body_text(heading),
            })
        })
        .collect()
}

fn body_text(heading: ElementRef) -> String {
    let paragraphs: Vec<String> = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != "h3")
        .map(|el| {
            let text: String = el.text().collect();
            WS.replace_all(&text, " ").trim().to_string()
        })
        .filter(|t| !t.is_empty())
        .collect();
    paragraphs.join("\n\n")
}

// ── Tests ──
