//! The on-page SEO checks.
//!
//! Each check looks at one signal and reports pass/fail, the specific issue
//! on failure, and the observed value. Checks never fail the analysis; a
//! malformed page just fails more checks.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::document::{Document, attr, raw_text, text};

pub const TITLE_MIN_LENGTH: usize = 10;
pub const TITLE_MAX_LENGTH: usize = 70;
pub const META_DESCRIPTION_MIN_LENGTH: usize = 50;
pub const META_DESCRIPTION_MAX_LENGTH: usize = 160;
pub const IMAGE_ALT_LOW_THRESHOLD: f64 = 0.5;
pub const IMAGE_ALT_MEDIUM_THRESHOLD: f64 = 0.8;

/// Weight applied to a check with no entry in the weight table.
pub const DEFAULT_WEIGHT: u32 = 5;

/// Score of a page that passes every check: the sum of all check weights.
pub const MAX_SCORE: u32 = 95;

const OG_VALUE_MAX_CHARS: usize = 100;
const H1_PREVIEW_CHARS: usize = 50;
const JSON_LD: &str = r#"script[type="application/ld+json"]"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKey {
    Title,
    MetaDescription,
    Canonical,
    Viewport,
    Lang,
    H1,
    Https,
    Robots,
    Favicon,
    ImgAlt,
    OgTitle,
    OgDescription,
    OgImage,
    TwitterCard,
    JsonLd,
    JsonLdTypes,
    JsonLdValid,
    Hreflang,
    PublishedTime,
    SnippetControl,
}

impl CheckKey {
    /// Every check, in evaluation order.
    pub const ALL: [Self; 20] = [
        Self::Title,
        Self::MetaDescription,
        Self::Canonical,
        Self::Viewport,
        Self::Lang,
        Self::H1,
        Self::Https,
        Self::Robots,
        Self::Favicon,
        Self::ImgAlt,
        Self::OgTitle,
        Self::OgDescription,
        Self::OgImage,
        Self::TwitterCard,
        Self::JsonLd,
        Self::JsonLdTypes,
        Self::JsonLdValid,
        Self::Hreflang,
        Self::PublishedTime,
        Self::SnippetControl,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::MetaDescription => "meta_description",
            Self::Canonical => "canonical",
            Self::Viewport => "viewport",
            Self::Lang => "lang",
            Self::H1 => "h1",
            Self::Https => "https",
            Self::Robots => "robots",
            Self::Favicon => "favicon",
            Self::ImgAlt => "img_alt",
            Self::OgTitle => "og_title",
            Self::OgDescription => "og_description",
            Self::OgImage => "og_image",
            Self::TwitterCard => "twitter_card",
            Self::JsonLd => "json_ld",
            Self::JsonLdTypes => "json_ld_types",
            Self::JsonLdValid => "json_ld_valid",
            Self::Hreflang => "hreflang",
            Self::PublishedTime => "published_time",
            Self::SnippetControl => "snippet_control",
        }
    }

    /// Points this check contributes when it passes. All weights sum to [`MAX_SCORE`].
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Title | Self::MetaDescription | Self::Https | Self::JsonLd => 8,
            Self::H1 => 6,
            Self::Canonical | Self::ImgAlt => 5,
            Self::Viewport
            | Self::Robots
            | Self::OgTitle
            | Self::OgDescription
            | Self::OgImage
            | Self::JsonLdTypes
            | Self::JsonLdValid
            | Self::Hreflang
            | Self::PublishedTime => 4,
            Self::Lang | Self::TwitterCard | Self::SnippetControl => 3,
            Self::Favicon => 2,
        }
    }

    /// Look up a key by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for CheckKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weight for a key given by name; unknown names weigh [`DEFAULT_WEIGHT`].
#[must_use]
pub fn weight_for(name: &str) -> u32 {
    CheckKey::from_name(name).map_or(DEFAULT_WEIGHT, CheckKey::weight)
}

/// Why a check failed (or, for informational checks, why it passed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Missing,
    Empty,
    TooShort,
    TooLong,
    NoHtmlTag,
    Multiple,
    HttpOnly,
    Noindex,
    LowRatio,
    MediumRatio,
    NoSchema,
    NoTypes,
    InvalidJson,
    NotApplicable,
}

impl IssueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Empty => "empty",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::NoHtmlTag => "no_html_tag",
            Self::Multiple => "multiple",
            Self::HttpOnly => "http_only",
            Self::Noindex => "noindex",
            Self::LowRatio => "low_ratio",
            Self::MediumRatio => "medium_ratio",
            Self::NoSchema => "no_schema",
            Self::NoTypes => "no_types",
            Self::InvalidJson => "invalid_json",
            Self::NotApplicable => "not_applicable",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed value for a check: a single string or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CheckValue {
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for CheckValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub passed: bool,

    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueKind>,

    pub value: Option<CheckValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl CheckResult {
    fn pass(value: impl Into<String>) -> Self {
        Self {
            passed: true,
            issue: None,
            value: Some(CheckValue::Text(value.into())),
            length: None,
            count: None,
        }
    }

    fn pass_list(values: Vec<String>) -> Self {
        Self {
            value: Some(CheckValue::List(values)),
            ..Self::pass("")
        }
    }

    fn fail(issue: IssueKind) -> Self {
        Self {
            passed: false,
            issue: Some(issue),
            value: None,
            length: None,
            count: None,
        }
    }

    fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(CheckValue::Text(value.into()));
        self
    }

    fn with_list(mut self, values: Vec<String>) -> Self {
        self.value = Some(CheckValue::List(values));
        self
    }

    fn with_issue(mut self, issue: IssueKind) -> Self {
        self.issue = Some(issue);
        self
    }

    fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Run every check against `doc`, in [`CheckKey::ALL`] order.
#[must_use]
pub fn run_checks(doc: &Document, final_url: &Url) -> Vec<(CheckKey, CheckResult)> {
    let json_ld = JsonLdBlocks::collect(doc);

    CheckKey::ALL
        .into_iter()
        .map(|key| {
            let result = match key {
                CheckKey::Title => check_title(doc),
                CheckKey::MetaDescription => check_meta_description(doc),
                CheckKey::Canonical => check_canonical(doc),
                CheckKey::Viewport => check_viewport(doc),
                CheckKey::Lang => check_lang(doc),
                CheckKey::H1 => check_h1(doc),
                CheckKey::Https => check_https(final_url),
                CheckKey::Robots => check_robots(doc),
                CheckKey::Favicon => check_favicon(doc),
                CheckKey::ImgAlt => check_img_alt(doc),
                CheckKey::OgTitle => check_og_tag(doc, "og:title"),
                CheckKey::OgDescription => check_og_tag(doc, "og:description"),
                CheckKey::OgImage => check_og_tag(doc, "og:image"),
                CheckKey::TwitterCard => check_twitter_card(doc),
                CheckKey::JsonLd => check_json_ld(&json_ld),
                CheckKey::JsonLdTypes => check_json_ld_types(&json_ld),
                CheckKey::JsonLdValid => check_json_ld_valid(&json_ld),
                CheckKey::Hreflang => check_hreflang(doc),
                CheckKey::PublishedTime => check_published_time(doc, &json_ld),
                CheckKey::SnippetControl => check_snippet_control(doc),
            };
            (key, result)
        })
        .collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn check_length(text: String, min: usize, max: usize) -> CheckResult {
    let length = char_len(&text);
    if length == 0 {
        CheckResult::fail(IssueKind::Empty).with_value("")
    } else if length < min {
        CheckResult::fail(IssueKind::TooShort)
            .with_value(text)
            .with_length(length)
    } else if length > max {
        CheckResult::fail(IssueKind::TooLong)
            .with_value(text)
            .with_length(length)
    } else {
        CheckResult::pass(text).with_length(length)
    }
}

fn check_title(doc: &Document) -> CheckResult {
    match doc.first("title") {
        None => CheckResult::fail(IssueKind::Missing),
        Some(title) => check_length(text(title), TITLE_MIN_LENGTH, TITLE_MAX_LENGTH),
    }
}

fn check_meta_description(doc: &Document) -> CheckResult {
    match doc.first_attr(r#"meta[name="description"]"#, "content") {
        None => CheckResult::fail(IssueKind::Missing),
        Some(content) => check_length(
            content,
            META_DESCRIPTION_MIN_LENGTH,
            META_DESCRIPTION_MAX_LENGTH,
        ),
    }
}

/// Present-and-non-empty attribute check shared by canonical, viewport and OG.
fn check_present(found: Option<String>) -> CheckResult {
    match found {
        None => CheckResult::fail(IssueKind::Missing),
        Some(value) if value.is_empty() => CheckResult::fail(IssueKind::Empty).with_value(""),
        Some(value) => CheckResult::pass(value),
    }
}

fn check_canonical(doc: &Document) -> CheckResult {
    check_present(doc.first_attr(r#"link[rel~="canonical"]"#, "href"))
}

fn check_viewport(doc: &Document) -> CheckResult {
    check_present(doc.first_attr(r#"meta[name="viewport"]"#, "content"))
}

fn check_lang(doc: &Document) -> CheckResult {
    match doc.first_attr("html", "lang") {
        None => CheckResult::fail(IssueKind::NoHtmlTag),
        Some(lang) if lang.is_empty() => CheckResult::fail(IssueKind::Missing),
        Some(lang) => CheckResult::pass(lang),
    }
}

fn check_h1(doc: &Document) -> CheckResult {
    let headings = doc.all("h1");
    match headings.as_slice() {
        [] => CheckResult::fail(IssueKind::Missing).with_count(0),
        [only] => {
            let heading = text(*only);
            if heading.is_empty() {
                CheckResult::fail(IssueKind::Empty)
                    .with_value("")
                    .with_count(1)
            } else {
                CheckResult::pass(heading).with_count(1)
            }
        }
        many => {
            let previews = many
                .iter()
                .map(|h1| text(*h1).chars().take(H1_PREVIEW_CHARS).collect::<String>())
                .collect();
            CheckResult::fail(IssueKind::Multiple)
                .with_list(previews)
                .with_count(many.len())
        }
    }
}

fn check_https(final_url: &Url) -> CheckResult {
    let scheme = final_url.scheme();
    if scheme == "https" {
        CheckResult::pass(scheme)
    } else {
        CheckResult::fail(IssueKind::HttpOnly).with_value(scheme)
    }
}

/// Lower-cased `content` of `<meta name="robots">`, if present.
fn robots_directives(doc: &Document) -> Option<String> {
    doc.first(r#"meta[name="robots"]"#).map(|meta| {
        meta.value()
            .attr("content")
            .unwrap_or("")
            .to_ascii_lowercase()
    })
}

fn check_robots(doc: &Document) -> CheckResult {
    match robots_directives(doc) {
        None => CheckResult::pass("default (index, follow)"),
        Some(content) if content.contains("noindex") => {
            CheckResult::fail(IssueKind::Noindex).with_value(content)
        }
        Some(content) => CheckResult::pass(content),
    }
}

fn check_favicon(doc: &Document) -> CheckResult {
    // `~=icon` also matches the legacy `rel="shortcut icon"`.
    [r#"link[rel~="icon"]"#, r#"link[rel~="apple-touch-icon"]"#]
        .into_iter()
        .flat_map(|css| doc.all(css))
        .map(|link| attr(link, "href"))
        .find(|href| !href.is_empty())
        .map_or_else(|| CheckResult::fail(IssueKind::Missing), CheckResult::pass)
}

fn check_img_alt(doc: &Document) -> CheckResult {
    let images = doc.all("img");
    let total = images.len();
    if total == 0 {
        return CheckResult::pass("no_images").with_count(0);
    }

    let with_alt = images
        .iter()
        .filter(|img| !attr(**img, "alt").is_empty())
        .count();
    let ratio = with_alt as f64 / total as f64;
    let value = format!("{with_alt}/{total}");

    let result = if ratio < IMAGE_ALT_LOW_THRESHOLD {
        CheckResult::fail(IssueKind::LowRatio).with_value(value)
    } else if ratio < IMAGE_ALT_MEDIUM_THRESHOLD {
        CheckResult::fail(IssueKind::MediumRatio).with_value(value)
    } else {
        CheckResult::pass(value)
    };
    result.with_count(total)
}

fn check_og_tag(doc: &Document, property: &str) -> CheckResult {
    let css = format!(r#"meta[property="{property}"]"#);
    let mut result = check_present(doc.first_attr(&css, "content"));
    if let Some(CheckValue::Text(content)) = result.value.as_mut()
        && char_len(content) > OG_VALUE_MAX_CHARS
    {
        let truncated: String = content.chars().take(OG_VALUE_MAX_CHARS).collect();
        *content = format!("{truncated}...");
    }
    result
}

fn check_twitter_card(doc: &Document) -> CheckResult {
    doc.first_attr(r#"meta[name="twitter:card"]"#, "content")
        .or_else(|| doc.first_attr(r#"meta[property="twitter:card"]"#, "content"))
        .map_or_else(|| CheckResult::fail(IssueKind::Missing), CheckResult::pass)
}

/// Parsed `application/ld+json` blocks. A blank block counts as `{}`.
struct JsonLdBlocks {
    blocks: Vec<Result<Value, serde_json::Error>>,
}

impl JsonLdBlocks {
    fn collect(doc: &Document) -> Self {
        let blocks = doc
            .all(JSON_LD)
            .into_iter()
            .map(|script| {
                let body = raw_text(script);
                if body.trim().is_empty() {
                    Ok(Value::Object(serde_json::Map::new()))
                } else {
                    serde_json::from_str(&body)
                }
            })
            .collect();
        Self { blocks }
    }

    fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn valid(&self) -> impl Iterator<Item = &Value> {
        self.blocks.iter().filter_map(|block| block.as_ref().ok())
    }
}

fn check_json_ld(json_ld: &JsonLdBlocks) -> CheckResult {
    if json_ld.is_empty() {
        return CheckResult::fail(IssueKind::Missing).with_count(0);
    }
    let count = json_ld.blocks.len();
    CheckResult::pass(format!("{count} schema(s) found")).with_count(count)
}

fn push_types(item: &Value, types: &mut Vec<String>) {
    match item.get("@type") {
        Some(Value::String(kind)) => types.push(kind.clone()),
        Some(Value::Array(kinds)) => types.extend(
            kinds
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string),
        ),
        Some(other) if !other.is_null() => types.push(other.to_string()),
        _ => {}
    }
}

/// `@type` values from top-level objects, top-level arrays, and `@graph`.
fn schema_types(json_ld: &JsonLdBlocks) -> Vec<String> {
    let mut types = Vec::new();
    for block in json_ld.valid() {
        match block {
            Value::Array(items) => {
                for item in items {
                    push_types(item, &mut types);
                }
            }
            Value::Object(map) if map.contains_key("@type") => push_types(block, &mut types),
            Value::Object(map) => {
                if let Some(Value::Array(graph)) = map.get("@graph") {
                    for item in graph {
                        push_types(item, &mut types);
                    }
                }
            }
            _ => {}
        }
    }
    types
}

fn check_json_ld_types(json_ld: &JsonLdBlocks) -> CheckResult {
    if json_ld.is_empty() {
        return CheckResult::fail(IssueKind::NoSchema);
    }
    let types = schema_types(json_ld);
    if types.is_empty() {
        CheckResult::fail(IssueKind::NoTypes)
    } else {
        CheckResult::pass_list(types)
    }
}

fn check_json_ld_valid(json_ld: &JsonLdBlocks) -> CheckResult {
    if json_ld.is_empty() {
        return CheckResult::fail(IssueKind::NoSchema);
    }
    let invalid = json_ld.blocks.iter().filter(|block| block.is_err()).count();
    let valid = json_ld.blocks.len() - invalid;
    if invalid > 0 {
        CheckResult::fail(IssueKind::InvalidJson)
            .with_value(format!("{invalid} invalid schema(s)"))
            .with_count(invalid)
    } else {
        CheckResult::pass(format!("All {valid} schema(s) valid")).with_count(valid)
    }
}

fn check_hreflang(doc: &Document) -> CheckResult {
    let langs: Vec<String> = doc
        .all(r#"link[rel~="alternate"][hreflang]"#)
        .into_iter()
        .map(|link| attr(link, "hreflang"))
        .collect();
    if langs.is_empty() {
        CheckResult::pass("No hreflang (single language site)").with_issue(IssueKind::NotApplicable)
    } else {
        CheckResult::pass_list(langs)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn date_published(json_ld: &JsonLdBlocks) -> Option<String> {
    json_ld.valid().find_map(|block| {
        let map = block.as_object()?;
        if let Some(date) = map.get("datePublished") {
            return Some(value_text(date));
        }
        map.get("@graph")?
            .as_array()?
            .iter()
            .find_map(|item| item.get("datePublished"))
            .map(value_text)
    })
}

fn check_published_time(doc: &Document, json_ld: &JsonLdBlocks) -> CheckResult {
    [
        r#"meta[property="article:published_time"]"#,
        r#"meta[property="article:modified_time"]"#,
    ]
    .into_iter()
    .filter_map(|css| doc.first_attr(css, "content"))
    .find(|content| !content.is_empty())
    .or_else(|| date_published(json_ld))
    .map_or_else(|| CheckResult::fail(IssueKind::Missing), CheckResult::pass)
}

fn max_snippet_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"max-snippet:(-?\d+)").expect("valid max-snippet regex"))
}

fn check_snippet_control(doc: &Document) -> CheckResult {
    const DEFAULT: &str = "default (allow all)";
    let Some(content) = robots_directives(doc) else {
        return CheckResult::pass(DEFAULT);
    };

    let mut controls = Vec::new();
    if content.contains("nosnippet") {
        controls.push("nosnippet".to_string());
    }
    if let Some(captures) = max_snippet_pattern().captures(&content) {
        controls.push(format!("max-snippet:{}", &captures[1]));
    }

    if controls.is_empty() {
        CheckResult::pass(DEFAULT)
    } else {
        CheckResult::pass(controls.join(", "))
    }
}
