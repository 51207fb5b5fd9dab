use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{Extensions, HeaderMap};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::{ServerError, ServerResult};
use crate::report::{FailureReport, RoastReport};
use crate::state::AppState;

const FORWARDED_FOR: &str = "x-forwarded-for";

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

/// `POST /analyze`: analyse a page and return the roast report.
///
/// Analysis failures still answer 200 with `{"error": true, "type", ...}`;
/// only request-level rejections use 4xx.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    extensions: Extensions,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ServerResult<Response> {
    let client = client_key(&headers, &extensions, state.settings.trust_forwarded_for);
    if !state.limiter.check(&client) {
        return Err(ServerError::RateLimited);
    }

    let Json(request) = payload.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
    let url = request.url.trim();

    if url.chars().count() > state.settings.max_url_length {
        return Err(ServerError::UrlTooLong);
    }
    if url.is_empty() {
        return Err(ServerError::EmptyUrl);
    }

    let response = match state.analyzer.analyze(url).await {
        Ok(analysis) => {
            tracing::info!(
                client = %client,
                url = %analysis.url,
                score = analysis.score,
                grade = %analysis.grade,
                "analysis served"
            );
            Json(RoastReport::new(&analysis, state.roaster.as_ref())).into_response()
        }
        Err(failure) => Json(FailureReport::new(&failure, state.roaster.as_ref())).into_response(),
    };

    Ok(response)
}

/// Rate-limit key: first `X-Forwarded-For` entry when trusted, else the peer
/// address.
fn client_key(headers: &HeaderMap, extensions: &Extensions, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for
        && let Some(first) = headers
            .get(FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|first| !first.is_empty())
    {
        return first.to_string();
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn forwarded(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn first_forwarded_entry_is_the_client() {
        let headers = forwarded(" 203.0.113.7 , 10.0.0.1");
        assert_eq!(client_key(&headers, &Extensions::new(), true), "203.0.113.7");
    }

    #[test]
    fn untrusted_forwarded_for_falls_back_to_peer() {
        let headers = forwarded("203.0.113.7");
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([198, 51, 100, 2], 4242))));
        assert_eq!(client_key(&headers, &extensions, false), "198.51.100.2");
        assert_eq!(client_key(&HeaderMap::new(), &Extensions::new(), false), "unknown");
    }

    #[test]
    fn blank_forwarded_for_is_ignored() {
        let headers = forwarded(" , 10.0.0.1");
        assert_eq!(client_key(&headers, &Extensions::new(), true), "unknown");
    }
}
