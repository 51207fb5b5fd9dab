//! Roast lines for SEO findings.
//!
//! Keys are the wire strings the analyzer and server already use
//! (`"title"`, `"too_short"`, `"S"`, `"timeout"`, ...), so this crate has no
//! dependency on the analyzer's types.

mod catalog;

use catalog::{CHECK_NAMES, CHECK_ROASTS, ERROR_ROASTS, GRADE_ROASTS, lookup};

/// Values substituted into `{length}`, `{count}` and `{value}` placeholders.
///
/// Placeholders without a value are left as written.
#[derive(Debug, Clone, Default)]
pub struct RoastParams {
    pub length: Option<usize>,
    pub count: Option<usize>,
    pub value: Option<String>,
}

/// Formats a roast for a failed check, a grade, or a fetch failure.
pub trait Roaster: Send + Sync {
    fn roast(&self, key: &str, issue: Option<&str>, params: &RoastParams) -> String;

    fn grade_roast(&self, grade: &str) -> String;

    fn error_roast(&self, kind: &str) -> String;
}

/// How a line is chosen when a catalog entry has several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pick {
    #[default]
    Random,
    /// Always the first line. Deterministic, for tests and snapshots.
    First,
}

/// [`Roaster`] backed by the built-in English catalogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogRoaster {
    pick: Pick,
}

impl CatalogRoaster {
    #[must_use]
    pub fn new(pick: Pick) -> Self {
        Self { pick }
    }

    fn choose<'a>(&self, lines: &[&'a str]) -> Option<&'a str> {
        if lines.is_empty() {
            return None;
        }
        let index = match self.pick {
            Pick::First => 0,
            Pick::Random => {
                let scaled = rand::random::<f64>() * lines.len() as f64;
                (scaled as usize).min(lines.len() - 1)
            }
        };
        Some(lines[index])
    }
}

impl Roaster for CatalogRoaster {
    fn roast(&self, key: &str, issue: Option<&str>, params: &RoastParams) -> String {
        let Some(issues) = lookup(CHECK_ROASTS, key) else {
            return format!("Something is off with {key}... not that I'm worried about you!");
        };

        // Unknown issue kinds fall back to the first list for the check.
        let lines = issue
            .and_then(|issue| lookup(issues, issue))
            .or_else(|| issues.first().map(|(_, lines)| *lines));

        match lines.and_then(|lines| self.choose(lines)) {
            Some(line) => fill(line, params),
            None => format!("{key} needs work!"),
        }
    }

    fn grade_roast(&self, grade: &str) -> String {
        lookup(GRADE_ROASTS, grade)
            .and_then(|lines| self.choose(lines))
            .map_or_else(
                || "This grade... I don't even know what to say!".to_string(),
                str::to_string,
            )
    }

    fn error_roast(&self, kind: &str) -> String {
        lookup(ERROR_ROASTS, kind)
            .and_then(|lines| self.choose(lines))
            .map_or_else(
                || "Something went wrong... and it wasn't me!".to_string(),
                str::to_string,
            )
    }
}

/// Display name for a check key; unknown keys are returned unchanged.
#[must_use]
pub fn check_name(key: &str) -> &str {
    lookup(CHECK_NAMES, key).unwrap_or(key)
}

fn fill(line: &str, params: &RoastParams) -> String {
    let mut out = line.to_string();
    if let Some(length) = params.length {
        out = out.replace("{length}", &length.to_string());
    }
    if let Some(count) = params.count {
        out = out.replace("{count}", &count.to_string());
    }
    if let Some(value) = &params.value {
        out = out.replace("{value}", value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first() -> CatalogRoaster {
        CatalogRoaster::new(Pick::First)
    }

    #[test]
    fn test_placeholders_are_filled() {
        let params = RoastParams {
            length: Some(4),
            ..Default::default()
        };
        let line = first().roast("title", Some("too_short"), &params);
        assert!(line.starts_with("A 4-character title?"), "{line}");

        let params = RoastParams {
            count: Some(3),
            ..Default::default()
        };
        let line = first().roast("h1", Some("multiple"), &params);
        assert!(line.starts_with("3 H1s?"), "{line}");

        let params = RoastParams {
            value: Some("40%".into()),
            ..Default::default()
        };
        let line = first().roast("img_alt", Some("low_ratio"), &params);
        assert!(line.contains("40%"), "{line}");
    }

    #[test]
    fn test_missing_params_leave_placeholder() {
        let line = first().roast("title", Some("too_long"), &RoastParams::default());
        assert!(line.contains("{length}"));
    }

    #[test]
    fn test_unknown_issue_falls_back_to_first_list() {
        let fallback = first().roast("canonical", Some("weird"), &RoastParams::default());
        let missing = first().roast("canonical", Some("missing"), &RoastParams::default());
        assert_eq!(fallback, missing);

        let none = first().roast("canonical", None, &RoastParams::default());
        assert_eq!(none, missing);
    }

    #[test]
    fn test_unknown_key_and_empty_catalog() {
        let line = first().roast("mystery", Some("missing"), &RoastParams::default());
        assert!(line.contains("mystery"));

        let line = first().roast("snippet_control", None, &RoastParams::default());
        assert_eq!(line, "snippet_control needs work!");
    }

    #[test]
    fn test_grade_and_error_roasts() {
        for grade in ["S", "A", "B", "C", "F"] {
            assert!(!first().grade_roast(grade).is_empty());
        }
        assert!(first().grade_roast("Z").contains("don't even know"));

        for kind in [
            "timeout",
            "ssl_error",
            "connection_error",
            "http_error",
            "invalid_url",
            "unknown",
        ] {
            assert!(!first().error_roast(kind).is_empty(), "{kind}");
        }
        assert!(first().error_roast("nope").contains("wasn't me"));
    }

    #[test]
    fn test_random_pick_stays_in_catalog() {
        let roaster = CatalogRoaster::default();
        let lines = lookup(GRADE_ROASTS, "F").unwrap();
        for _ in 0..50 {
            let line = roaster.grade_roast("F");
            assert!(lines.contains(&line.as_str()));
        }
    }

    #[test]
    fn test_check_names() {
        assert_eq!(check_name("og_image"), "Open Graph image");
        assert_eq!(check_name("json_ld"), "Structured data (JSON-LD)");
        assert_eq!(check_name("custom"), "custom");
        assert_eq!(CHECK_NAMES.len(), 20);
    }
}
