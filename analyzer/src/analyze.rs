//! Fetch-then-check orchestration.

use std::time::Duration;

use roaster_fetch::{FetchError, Fetcher};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::checks::run_checks;
use crate::document::parse;
use crate::score::{Analysis, Grade, tally};

/// Caller-facing reason an analysis could not run.
///
/// `kind` is one of `invalid_url`, `timeout`, `ssl_error`,
/// `connection_error`, `http_error` or `unknown`.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct AnalysisFailure {
    pub kind: &'static str,
    pub message: String,
}

impl From<&FetchError> for AnalysisFailure {
    fn from(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Fetches a page through a [`Fetcher`] and runs every check on it.
#[derive(Debug, Clone)]
pub struct Analyzer {
    fetcher: Fetcher,
    timeout: Duration,
}

impl Analyzer {
    #[must_use]
    pub fn new(fetcher: Fetcher, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn analyze(&self, url: &str) -> Result<Analysis, AnalysisFailure> {
        let page = match self.fetcher.fetch(url, self.timeout).await {
            Ok(page) => page,
            Err(err) => {
                if matches!(err, FetchError::Unknown) {
                    tracing::error!(url, error = ?err, "unexpected failure analysing page");
                } else {
                    tracing::info!(url, kind = err.kind(), error = %err, "analysis aborted");
                }
                return Err(AnalysisFailure::from(&err));
            }
        };

        Ok(analyze_html(&page.body, &page.final_url, page.status))
    }
}

/// Run every check against an already-fetched page.
#[must_use]
pub fn analyze_html(html: &str, final_url: &Url, status_code: u16) -> Analysis {
    let doc = parse(html);
    let checks = run_checks(&doc, final_url);
    let (score, issues, passed) = tally(&checks);
    let grade = Grade::from_score(score);

    tracing::debug!(url = %final_url, score, %grade, issues = issues.len(), "analysis complete");

    Analysis {
        url: final_url.to_string(),
        status_code,
        is_https: final_url.scheme() == "https",
        checks,
        score,
        grade,
        issues,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckKey, MAX_SCORE};

    const GOOD_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>A perfectly sized page title</title>
  <meta name="description" content="A description that is long enough to pass the minimum length check easily.">
  <link rel="canonical" href="https://example.com/">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="icon" href="/favicon.ico">
  <meta property="og:title" content="Title">
  <meta property="og:description" content="Description">
  <meta property="og:image" content="https://example.com/og.png">
  <meta name="twitter:card" content="summary_large_image">
  <meta property="article:published_time" content="2024-01-01T00:00:00Z">
  <script type="application/ld+json">{"@context": "https://schema.org", "@type": "WebPage"}</script>
</head>
<body><h1>Welcome</h1><img src="a.png" alt="A"></body>
</html>"#;

    #[test]
    fn test_good_page_scores_full_marks() {
        let url = Url::parse("https://example.com/").unwrap();
        let analysis = analyze_html(GOOD_PAGE, &url, 200);
        assert!(analysis.issues.is_empty(), "{:?}", analysis.issues);
        assert_eq!(analysis.score, MAX_SCORE);
        assert_eq!(analysis.score, 95);
        assert_eq!(analysis.grade, Grade::S);
        assert_eq!(analysis.passed.len(), 20);
        assert!(analysis.is_https);
    }

    #[test]
    fn test_http_page_loses_https_weight() {
        let url = Url::parse("http://example.com/").unwrap();
        let analysis = analyze_html(GOOD_PAGE, &url, 200);
        assert_eq!(analysis.score, MAX_SCORE - 8);
        assert_eq!(analysis.score, 87);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].key, CheckKey::Https);
        assert!(!analysis.is_https);
    }

    #[test]
    fn test_empty_page_scores_only_lenient_checks() {
        let url = Url::parse("https://example.com/").unwrap();
        let analysis = analyze_html("", &url, 200);
        // https, robots, img_alt, hreflang, snippet_control
        assert_eq!(analysis.score, 8 + 4 + 5 + 4 + 3);
        assert_eq!(analysis.grade, Grade::F);
    }

    #[test]
    fn test_checks_serialize_as_ordered_map() {
        let url = Url::parse("https://example.com/").unwrap();
        let analysis = analyze_html(GOOD_PAGE, &url, 200);
        let json = serde_json::to_value(&analysis).unwrap();
        let checks = json["checks"].as_object().unwrap();
        assert_eq!(checks.len(), 20);
        assert_eq!(json["grade"], "S");
        assert_eq!(json["checks"]["title"]["passed"], true);
    }

    #[test]
    fn test_failure_from_fetch_error() {
        let failure = AnalysisFailure::from(&FetchError::Http { status: 503 });
        assert_eq!(failure.kind, "http_error");
        assert_eq!(failure.message, "HTTP error 503");

        let failure = AnalysisFailure::from(&FetchError::TooManyRedirects { max: 5 });
        assert_eq!(failure.kind, "invalid_url");
    }
}
