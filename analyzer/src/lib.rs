//! On-page SEO analysis.
//!
//! [`Analyzer::analyze`] fetches a page through the SSRF-safe fetcher, parses
//! it, runs twenty weighted checks, and grades the total.

mod analyze;
mod checks;
mod document;
mod score;

pub use analyze::{AnalysisFailure, Analyzer, analyze_html};
pub use checks::{
    CheckKey, CheckResult, CheckValue, DEFAULT_WEIGHT, IMAGE_ALT_LOW_THRESHOLD,
    IMAGE_ALT_MEDIUM_THRESHOLD, IssueKind, MAX_SCORE, META_DESCRIPTION_MAX_LENGTH,
    META_DESCRIPTION_MIN_LENGTH, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH, run_checks, weight_for,
};
pub use document::{Document, parse};
pub use score::{Analysis, Grade, Issue};
