//! Plain-text rendering of reports for the terminal.

use std::fmt::Write;

use roaster_analyzer::MAX_SCORE;
use roaster_server::{FailureReport, RoastReport};

pub fn render_report(report: &RoastReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "SEO Roaster report for {}", report.url);
    let _ = writeln!(out, "Score: {}/{MAX_SCORE}  Grade: {}", report.score, report.grade);
    let _ = writeln!(out, "  {}", report.grade_roast);

    let _ = writeln!(out, "\nIssues ({}):", report.issue_count);
    for issue in &report.issues {
        let message = issue.message.map_or("", |m| m.as_str());
        let _ = writeln!(out, "  [-{}] {}: {message}", issue.weight, issue.name);
        if let Some(value) = &issue.value {
            let _ = writeln!(out, "        found: {value}");
        }
        let _ = writeln!(out, "        {}", issue.roast);
    }

    let _ = writeln!(
        out,
        "\nPassed ({}/{}):",
        report.passed_count, report.total_checks
    );
    for check in &report.passed {
        match &check.value {
            Some(value) if !value.to_string().is_empty() => {
                let _ = writeln!(out, "  + {}: {value}", check.name);
            }
            _ => {
                let _ = writeln!(out, "  + {}", check.name);
            }
        }
    }

    out
}

pub fn render_failure(failure: &FailureReport) -> String {
    format!(
        "Analysis failed ({}): {}\n  {}\n",
        failure.kind, failure.message, failure.roast
    )
}
