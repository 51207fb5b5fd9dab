//! Weighted scoring and grading.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::checks::{CheckKey, CheckResult, CheckValue, IssueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    F,
}

impl Grade {
    /// S ≥ 90, A ≥ 70, B ≥ 50, C ≥ 30, else F.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::S,
            70..=89 => Self::A,
            50..=69 => Self::B,
            30..=49 => Self::C,
            _ => Self::F,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed check, with the points it cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub key: CheckKey,
    pub message: Option<IssueKind>,
    pub value: Option<CheckValue>,
    pub weight: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Result of analysing one page.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// URL actually fetched, after redirects.
    pub url: String,
    pub status_code: u16,
    pub is_https: bool,

    /// Every check result, keyed by check, in evaluation order.
    #[serde(serialize_with = "serialize_checks")]
    pub checks: Vec<(CheckKey, CheckResult)>,

    pub score: u32,
    pub grade: Grade,
    pub issues: Vec<Issue>,
    pub passed: Vec<CheckKey>,
}

impl Analysis {
    /// Result for `key`, if the check ran.
    #[must_use]
    pub fn check(&self, key: CheckKey) -> Option<&CheckResult> {
        self.checks
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, result)| result)
    }
}

fn serialize_checks<S: Serializer>(
    checks: &[(CheckKey, CheckResult)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(checks.iter().map(|(key, result)| (key, result)))
}

/// Sum the weights of passing checks and split results into issues and passes.
pub(crate) fn tally(checks: &[(CheckKey, CheckResult)]) -> (u32, Vec<Issue>, Vec<CheckKey>) {
    let mut score = 0;
    let mut issues = Vec::new();
    let mut passed = Vec::new();

    for (key, result) in checks {
        let weight = key.weight();
        if result.passed {
            score += weight;
            passed.push(*key);
        } else {
            issues.push(Issue {
                key: *key,
                message: result.issue,
                value: result.value.clone(),
                weight,
                length: result.length,
                count: result.count,
            });
        }
    }

    (score, issues, passed)
}
