use anyhow::{Context, Result};
use scraper::{ElementRef, Html};

use super::{ANCHOR, H3};

/// One bug pattern heading: anchor name plus the cleaned human-readable title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugPattern {
    pub id: String,
    pub title: String,
}

/// Parse the bug descriptions page into patterns, in document order.
///
/// Every `<h3>` on the page is expected to look like
/// `<h3><a name="ID">Prefix: Title (ID)</a></h3>` with a `<p>` of prose
/// somewhere among its following siblings. Any heading that breaks this shape
/// fails the whole parse; there is no per-heading skip.
pub fn parse_patterns(html: &str) -> Result<Vec<BugPattern>> {
    let doc = Html::parse_document(html);
    doc.select(&H3).map(parse_heading).collect()
}

fn parse_heading(heading: ElementRef) -> Result<BugPattern> {
    let text: String = heading.text().collect();
    let id = anchor_name(heading)?;

    let (_, raw_title) = text
        .split_once(':')
        .with_context(|| format!("Heading '{}' has no ':' separator", text.trim()))?;

    // Titles restate the pattern name in parentheses; strip that echo.
    let title = raw_title.replace(&format!("({})", id), "").trim().to_string();

    // Each pattern is followed by a prose paragraph. Its text never reaches
    // the JSON outputs, but a missing paragraph means the page shape changed.
    following_paragraph(heading)
        .with_context(|| format!("Pattern {} has no description paragraph", id))?;

    Ok(BugPattern { id, title })
}

/// Pattern id: the `name` attribute of the heading's first `<a>` anchor.
pub(crate) fn anchor_name(heading: ElementRef) -> Result<String> {
    let text: String = heading.text().collect();
    let anchor = heading
        .select(&ANCHOR)
        .next()
        .with_context(|| format!("Heading '{}' has no anchor", text.trim()))?;
    let name = anchor
        .value()
        .attr("name")
        .with_context(|| format!("Heading '{}' anchor has no name attribute", text.trim()))?;
    Ok(name.to_string())
}

/// First `<p>` element among the heading's following siblings, if any.
fn following_paragraph(heading: ElementRef) -> Option<ElementRef> {
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "p")
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_PATTERN: &str = concat!(
        r#"<h3><a name="DMI_X">DMI: Reliance on default string encoding (DMI_X)</a></h3>"#,
        "<p>Some details.</p>",
    );

    #[test]
    fn single_heading() {
        let patterns = parse_patterns(ONE_PATTERN).unwrap();
        assert_eq!(
            patterns,
            vec![BugPattern {
                id: "DMI_X".to_string(),
                title: "Reliance on default string encoding".to_string(),
            }]
        );
    }

    #[test]
    fn title_without_restated_name() {
        let html = r#"<h3><a name="BIT_X">BIT: Check sign of bitwise op</a></h3><p>p</p>"#;
        let patterns = parse_patterns(html).unwrap();
        assert_eq!(patterns[0].title, "Check sign of bitwise op");
    }

    #[test]
    fn title_keeps_later_colons() {
        let html = r#"<h3><a name="X_Y">X: Ratio of 1:2 is off (X_Y)</a></h3><p>p</p>"#;
        let patterns = parse_patterns(html).unwrap();
        assert_eq!(patterns[0].title, "Ratio of 1:2 is off");
    }

    #[test]
    fn document_order_preserved() {
        let html = "\
            <h3><a name=\"A_1\">A: First (A_1)</a></h3><p>one</p>\
            <h3><a name=\"B_2\">B: Second (B_2)</a></h3><p>two</p>\
            <h3><a name=\"C_3\">C: Third (C_3)</a></h3><p>three</p>";
        let patterns = parse_patterns(html).unwrap();
        let ids: Vec<&str> = patterns.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["A_1", "B_2", "C_3"]);
    }

    #[test]
    fn heading_without_anchor_fails() {
        let err = parse_patterns("<h3>DMI: Something</h3><p>p</p>").unwrap_err();
        assert!(err.to_string().contains("no anchor"), "{}", err);
    }

    #[test]
    fn anchor_without_name_fails() {
        let html = r##"<h3><a href="#top">DMI: Something</a></h3><p>p</p>"##;
        let err = parse_patterns(html).unwrap_err();
        assert!(err.to_string().contains("no name attribute"), "{}", err);
    }

    #[test]
    fn heading_without_colon_fails() {
        let html = r#"<h3><a name="DMI_X">Reliance on default string encoding</a></h3><p>p</p>"#;
        let err = parse_patterns(html).unwrap_err();
        assert!(err.to_string().contains("no ':' separator"), "{}", err);
    }

    #[test]
    fn heading_without_paragraph_fails() {
        let html = r#"<h3><a name="DMI_X">DMI: Title (DMI_X)</a></h3>"#;
        let err = parse_patterns(html).unwrap_err();
        assert!(err.to_string().contains("no description paragraph"), "{}", err);
    }

    #[test]
    fn paragraph_found_past_other_siblings() {
        let html = r#"<h3><a name="SQL_X">SQL: Title (SQL_X)</a></h3>
            <blockquote><pre>execute(query);</pre></blockquote>
            <p>Details after the code sample.</p>"#;
        let patterns = parse_patterns(html).unwrap();
        assert_eq!(patterns[0].id, "SQL_X");
    }

    #[test]
    fn one_broken_heading_fails_whole_parse() {
        let html = "\
            <h3><a name=\"A_1\">A: First (A_1)</a></h3><p>one</p>\
            <h3>B: No anchor here</h3><p>two</p>";
        assert!(parse_patterns(html).is_err());
    }

    #[test]
    fn error_page_yields_empty() {
        let html = "<html><body><h1>500 Internal Server Error</h1>\
            <p>The server encountered an error.</p></body></html>";
        let patterns = parse_patterns(html).unwrap();
        assert!(patterns.is_empty());
    }

    #[test]
    fn other_heading_levels_ignored() {
        let html = "<h2>Descriptions</h2>\
            <h3><a name=\"A_1\">A: First (A_1)</a></h3><p>one</p>\
            <h4>Notes</h4>";
        let patterns = parse_patterns(html).unwrap();
        assert_eq!(patterns.len(), 1);
    }

    #[test]
    fn fixture_page() {
        let html = std::fs::read_to_string("tests/fixtures/bug_descriptions.html").unwrap();
        let patterns = parse_patterns(&html).unwrap();
        assert_eq!(patterns.len(), 6);
        assert_eq!(patterns[0].id, "BIT_SIGNED_CHECK");
        assert_eq!(patterns[0].title, "Check for sign of bitwise operation");
        // No title carries its pattern id echo
        for p in &patterns {
            assert!(!p.title.contains(&format!("({})", p.id)), "{:?}", p);
        }
    }
}
