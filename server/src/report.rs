//! Roast report: an [`Analysis`] with display names and roast lines attached.

use roaster_analyzer::{Analysis, AnalysisFailure, CheckKey, CheckValue, Grade, IssueKind};
use roaster_roasts::{RoastParams, Roaster, check_name};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RoastReport {
    pub url: String,
    pub score: u32,
    pub grade: Grade,
    pub grade_roast: String,
    pub issues: Vec<RoastedIssue>,
    pub passed: Vec<PassedCheck>,
    pub total_checks: usize,
    pub passed_count: usize,
    pub issue_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoastedIssue {
    pub key: CheckKey,
    pub name: &'static str,
    pub message: Option<IssueKind>,
    pub value: Option<CheckValue>,
    pub roast: String,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassedCheck {
    pub key: CheckKey,
    pub name: &'static str,
    pub value: Option<CheckValue>,
}

/// Body returned when the page could not be analysed.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub error: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub roast: String,
}

impl FailureReport {
    #[must_use]
    pub fn new(failure: &AnalysisFailure, roaster: &dyn Roaster) -> Self {
        Self {
            error: true,
            kind: failure.kind,
            message: failure.message.clone(),
            roast: roaster.error_roast(failure.kind),
        }
    }
}

impl RoastReport {
    #[must_use]
    pub fn new(analysis: &Analysis, roaster: &dyn Roaster) -> Self {
        let issues = analysis
            .issues
            .iter()
            .map(|issue| {
                let params = RoastParams {
                    length: issue.length,
                    count: issue.count,
                    value: issue.value.as_ref().map(ToString::to_string),
                };
                RoastedIssue {
                    key: issue.key,
                    name: check_name(issue.key.as_str()),
                    message: issue.message,
                    value: issue.value.clone(),
                    roast: roaster.roast(
                        issue.key.as_str(),
                        issue.message.map(IssueKind::as_str),
                        &params,
                    ),
                    weight: issue.weight,
                }
            })
            .collect::<Vec<_>>();

        let passed = analysis
            .passed
            .iter()
            .map(|&key| PassedCheck {
                key,
                name: check_name(key.as_str()),
                value: analysis.check(key).and_then(|result| result.value.clone()),
            })
            .collect::<Vec<_>>();

        Self {
            url: analysis.url.clone(),
            score: analysis.score,
            grade: analysis.grade,
            grade_roast: roaster.grade_roast(analysis.grade.as_str()),
            total_checks: analysis.checks.len(),
            passed_count: passed.len(),
            issue_count: issues.len(),
            issues,
            passed,
        }
    }
}
