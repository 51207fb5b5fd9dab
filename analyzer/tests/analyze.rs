//! End-to-end analysis against a local wiremock server.

use std::env;
use std::sync::Once;
use std::time::Duration;

use roaster_analyzer::{Analyzer, CheckKey, Grade, IssueKind};
use roaster_fetch::{FetchConfig, Fetcher, SecurityConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn enable_loopback_opt_in_for_tests() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // SAFETY: set once before any fetcher is built and never mutated.
        unsafe {
            env::set_var("SEO_ROASTER_ALLOW_LOOPBACK", "1");
        }
    });
}

fn analyzer() -> Analyzer {
    enable_loopback_opt_in_for_tests();
    let config = FetchConfig {
        security: Some(SecurityConfig {
            allow_loopback: true,
            ..Default::default()
        }),
        ..Default::default()
    };
    Analyzer::new(
        Fetcher::new(&config).expect("fetcher"),
        Duration::from_secs(5),
    )
}

const PAGE: &str = r#"<html lang="en"><head>
<title>Hi</title>
<meta name="robots" content="noindex">
</head><body><h1>One</h1><h1>Two</h1></body></html>"#;

#[tokio::test]
async fn test_analyze_after_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/home"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&server)
        .await;

    let analysis = analyzer()
        .analyze(&format!("{}/", server.uri()))
        .await
        .expect("analysis");

    assert!(analysis.url.ends_with("/home"));
    assert_eq!(analysis.status_code, 200);
    assert!(!analysis.is_https);
    assert_eq!(analysis.grade, Grade::from_score(analysis.score));

    let title = analysis.check(CheckKey::Title).expect("title check");
    assert_eq!(title.issue, Some(IssueKind::TooShort));
    assert_eq!(title.length, Some(2));

    let h1 = analysis
        .issues
        .iter()
        .find(|issue| issue.key == CheckKey::H1)
        .expect("h1 issue");
    assert_eq!(h1.message, Some(IssueKind::Multiple));
    assert_eq!(h1.count, Some(2));
    assert_eq!(h1.weight, 6);

    assert!(
        analysis
            .issues
            .iter()
            .any(|issue| issue.key == CheckKey::Robots)
    );
}

#[tokio::test]
async fn test_analyze_reports_http_error_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let failure = analyzer()
        .analyze(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, "http_error");
    assert!(failure.message.contains("404"));
}

#[tokio::test]
async fn test_analyze_rejects_internal_targets() {
    let failure = analyzer()
        .analyze("http://169.254.169.254/latest/meta-data/")
        .await
        .unwrap_err();

    assert_eq!(failure.kind, "invalid_url");
    assert!(!failure.message.contains("169.254"));
}
