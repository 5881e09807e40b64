//! Page text extraction
//!
//! Fetches a page and reduces its HTML to one flat, single-spaced string.

use scraper::{Html, Node};
use tracing::{debug, warn};

use super::error::ExtractionError;
use super::models::PageUrl;
use crate::kernel::BasePageFetcher;

/// Elements whose text is never page content
const SKIPPED_ELEMENTS: [&str; 2] = ["script", "style"];

/// Fetch `url` and return its normalized visible text.
///
/// An empty string is a valid result.
pub async fn extract_page_text(
    fetcher: &dyn BasePageFetcher,
    url: &PageUrl,
) -> Result<String, ExtractionError> {
    let html = fetcher.fetch(url.url().as_str()).await.map_err(|e| {
        warn!(url = %url, error = %format!("{:#}", e), "Page fetch failed");
        ExtractionError::new(url.as_str(), format!("{:#}", e))
    })?;

    let text = normalize_text(&html_to_text(&html));
    debug!(url = %url, html_bytes = html.len(), text_bytes = text.len(), "Extracted page text");

    Ok(text)
}

/// Visible text of an HTML document, text nodes in document order joined by
/// single spaces. Script and style contents, comments and the doctype are dropped;
/// `noscript` contents are read as markup.
pub fn html_to_text(html: &str) -> String {
    let mut fragments = Vec::new();
    collect_text(&Html::parse_document(html), &mut fragments);
    fragments.join(" ")
}

fn collect_text(document: &Html, out: &mut Vec<String>) {
    let mut pending = vec![document.tree.root()];

    while let Some(node) = pending.pop() {
        match node.value() {
            Node::Element(el) if SKIPPED_ELEMENTS.contains(&el.name()) => {}
            Node::Text(text) => {
                // With scripting enabled the parser keeps <noscript> contents as one raw text node
                let in_noscript = node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .is_some_and(|el| el.name() == "noscript");

                if in_noscript {
                    collect_text(&Html::parse_fragment(text), out);
                } else {
                    let text = text.trim();
                    if !text.is_empty() {
                        out.push(text.to_string());
                    }
                }
            }
            _ => pending.extend(node.children().rev()),
        }
    }
}

/// Collapse whitespace: split into lines, trim each, split lines on runs of
/// two or more spaces, trim and drop empty fragments, join with single spaces.
pub fn normalize_text(text: &str) -> String {
    text.split(is_line_boundary)
        .map(str::trim)
        // a run of 3+ spaces leaves leading spaces on the next fragment; trimmed below
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}
