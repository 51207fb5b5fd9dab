//! HTML document parsing and the queries the checks run against it.

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML page.
#[derive(Debug)]
pub struct Document {
    html: Html,
}

/// Parse `html` as a full document.
///
/// If the parser does not produce an `<html>` root the input is re-parsed as
/// a fragment, so checks still see whatever elements were present.
#[must_use]
pub fn parse(html: &str) -> Document {
    let document = Html::parse_document(html);
    if document.root_element().value().name() == "html" {
        if !document.errors.is_empty() {
            tracing::debug!(errors = document.errors.len(), "html parsed with recoverable errors");
        }
        return Document { html: document };
    }

    tracing::warn!("document parse produced no <html> root; falling back to fragment parsing");
    Document {
        html: Html::parse_fragment(html),
    }
}

impl Document {
    /// First element matching `css`, in document order.
    #[must_use]
    pub fn first(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = selector(css)?;
        self.html.select(&selector).next()
    }

    /// Every element matching `css`, in document order.
    #[must_use]
    pub fn all(&self, css: &str) -> Vec<ElementRef<'_>> {
        let Some(selector) = selector(css) else {
            return Vec::new();
        };
        self.html.select(&selector).collect()
    }

    /// Trimmed attribute value of the first element matching `css`.
    ///
    /// `None` when no element matches; `Some("")` when the element exists but
    /// the attribute is absent or blank.
    #[must_use]
    pub fn first_attr(&self, css: &str, name: &str) -> Option<String> {
        self.first(css).map(|el| attr(el, name))
    }
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(css, error = %e, "invalid selector");
            None
        }
    }
}

/// Trimmed attribute value, empty when absent.
pub(crate) fn attr(element: ElementRef<'_>, name: &str) -> String {
    element.value().attr(name).unwrap_or("").trim().to_string()
}

/// Element text with runs of whitespace collapsed to single spaces.
pub(crate) fn text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Raw text content, for `<script>` bodies.
pub(crate) fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
