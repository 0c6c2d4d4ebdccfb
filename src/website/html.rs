// src/website/html.rs
// =============================================================================
// This module pulls the parts of a page we keep out of its HTML:
// - the <title> text
// - the text of every <p>, whitespace-normalized
// - every <a href>, resolved to an absolute URL against the page URL
//
// We use the `scraper` crate, which is built on html5ever. html5ever repairs
// broken markup the way browsers do, so parsing never fails: a page of
// garbage just yields "No title", empty text and no links.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Title used when a page has no <title> element.
pub const NO_TITLE: &str = "No title";

// What we keep from one HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    pub title: String,
    pub text: String,
    pub links: Vec<String>,
}

// Parses an HTML document fetched from `page_url`
//
// Example:
//   html = "<title>Docs</title><p>Hi  there</p><a href='/a'>A</a>"
//   page_url = "https://example.com/x"
//   result = { title: "Docs", text: "Hi there", links: ["https://example.com/a"] }
pub fn parse_page(html: &str, page_url: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        text: extract_paragraph_text(&document),
        links: extract_links(&document, page_url),
    }
}

fn extract_title(document: &Html) -> String {
    // Constant selector, known to be valid
    let selector = Selector::parse("title").unwrap();

    match document.select(&selector).next() {
        Some(title) => title.text().collect::<String>().trim().to_string(),
        None => NO_TITLE.to_string(),
    }
}

// Joins the text of every <p> with single spaces; paragraphs with no text are
// skipped so they don't leave double spaces behind
fn extract_paragraph_text(document: &Html) -> String {
    let selector = Selector::parse("p").unwrap();

    document
        .select(&selector)
        .map(normalized_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

// Collects every <a href>, in document order, as absolute URLs
//
// Duplicates are kept; the crawler's visited set handles repeats.
fn extract_links(document: &Html, page_url: &str) -> Vec<String> {
    let selector = Selector::parse("a[href]").unwrap();

    // If the page URL itself is unparseable we can't resolve anything
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            ::log::warn!("Cannot resolve links against {}: {}", page_url, e);
            return Vec::new();
        }
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(&base, href))
        .collect()
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"              -> Some("https://example.com/docs")
//   href = "../other"           -> Some("https://example.com/other")
//   href = "https://other.com"  -> Some("https://other.com/")
//   href = "http://[::1"        -> None (not a URL)
pub fn resolve_url(base: &Url, href: &str) -> Option<String> {
    // join() handles absolute hrefs too: they replace the base entirely
    base.join(href.trim()).ok().map(|url| url.to_string())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why text().flat_map(split_whitespace)?
//    - An element's text comes back as several fragments (one per text node)
//    - Splitting every fragment on whitespace and re-joining with one space
//      collapses newlines, tabs and runs of spaces in one pass
//
// 2. Why keep mailto:/javascript: links?
//    - They are still anchors on the page, so they belong in `links`
//    - The crawler will try to fetch them, fail, and move on
// -----------------------------------------------------------------------------
