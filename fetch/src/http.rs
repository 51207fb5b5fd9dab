//! HTTP fetching with manual, re-validated redirects.
//!
//! The client never follows redirects on its own. Each `Location` is joined
//! against the URL that produced it and passed back through the validator
//! before the next request goes out, so a public page cannot bounce the
//! fetcher into an internal address.
use std::error::Error as _;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use url::Url;

use crate::resolve::{Resolve, SystemResolver};
use crate::resolved::ResolvedConfig;
use crate::types::{FetchConfig, FetchError, FetchResult, FetcherBuildError};
use crate::validate::{ValidatedUrl, validate_url};

/// Fetches pages safely. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Fetcher {
    config: ResolvedConfig,
    resolver: Arc<dyn Resolve>,
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a fetcher that resolves hosts through the operating system.
    pub fn new(config: &FetchConfig) -> Result<Self, FetcherBuildError> {
        let config = ResolvedConfig::from_config(config)?;
        let client = build_client(&config)?;
        Ok(Self {
            config,
            resolver: Arc::new(SystemResolver),
            client,
        })
    }

    /// Replace the DNS resolver used by validation.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn default_timeout(&self) -> Duration {
        self.config.timeout
    }

    #[must_use]
    pub fn max_redirects(&self) -> u32 {
        self.config.max_redirects
    }

    /// Validate `raw_url` as an initial (hop 0) target without fetching it.
    pub async fn validate(&self, raw_url: &str) -> Result<ValidatedUrl, FetchError> {
        validate_url(raw_url, 0, self.config.timeout, &self.config, self.resolver.as_ref()).await
    }

    /// Fetch `raw_url`, following at most `max_redirects` validated hops.
    ///
    /// `timeout` bounds each request individually; a zero duration means the
    /// configured default.
    pub async fn fetch(&self, raw_url: &str, timeout: Duration) -> Result<FetchResult, FetchError> {
        let timeout = if timeout.is_zero() {
            self.config.timeout
        } else {
            timeout
        };

        let mut current =
            validate_url(raw_url, 0, timeout, &self.config, self.resolver.as_ref()).await?;
        let mut hops = 0u32;

        loop {
            tracing::debug!(url = %current, hops, "fetching");
            let response = self.send(&current, timeout).await?;
            let status = response.status().as_u16();

            if !is_redirect(status) {
                return self.finish(response, current).await;
            }

            hops += 1;
            if hops > self.config.max_redirects {
                return Err(FetchError::TooManyRedirects {
                    max: self.config.max_redirects,
                });
            }

            let Some(location) = location_header(&response) else {
                tracing::debug!(url = %current, status, "redirect without Location; treating as final");
                return self.finish(response, current).await;
            };

            let next = resolve_location(current.as_url(), location)?;
            tracing::debug!(from = %current, to = %next, hops, "following redirect");
            current = validate_url(
                next.as_str(),
                hops,
                timeout,
                &self.config,
                self.resolver.as_ref(),
            )
            .await?;
        }
    }

    async fn send(
        &self,
        url: &ValidatedUrl,
        timeout: Duration,
    ) -> Result<reqwest::Response, FetchError> {
        self.client
            .get(url.as_url().clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_transport(&e))
    }

    async fn finish(
        &self,
        response: reqwest::Response,
        final_url: ValidatedUrl,
    ) -> Result<FetchResult, FetchError> {
        let status = response.status().as_u16();
        if status >= 400 {
            tracing::debug!(url = %final_url, status, "remote returned error status");
            return Err(FetchError::Http { status });
        }

        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_charset);
        if let Some(ref charset) = charset
            && !is_utf8_compatible(charset)
        {
            tracing::warn!(url = %final_url, charset = charset.as_str(), "non-UTF-8 charset; decoding lossily");
        }

        let body = read_body(response, self.config.max_download_bytes).await?;

        Ok(FetchResult {
            body: String::from_utf8_lossy(&body).into_owned(),
            final_url: final_url.into_url(),
            status,
        })
    }
}

/// Fetch with a default-configured [`Fetcher`].
pub async fn fetch(raw_url: &str, timeout: Duration) -> Result<FetchResult, FetchError> {
    let fetcher = Fetcher::new(&FetchConfig::default()).map_err(|e| {
        tracing::error!(error = %e, "failed to build default fetcher");
        FetchError::Unknown
    })?;
    fetcher.fetch(raw_url, timeout).await
}

fn build_client(config: &ResolvedConfig) -> Result<reqwest::Client, FetcherBuildError> {
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .user_agent(&config.user_agent)
        .no_proxy()
        .build()?;
    Ok(client)
}

const fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

fn location_header(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Join a `Location` value against the URL that returned it.
pub(crate) fn resolve_location(base: &Url, location: &str) -> Result<Url, FetchError> {
    base.join(location)
        .map_err(|e| FetchError::invalid_url(format!("redirect Location could not be resolved: {e}")))
}

async fn read_body(response: reqwest::Response, max_bytes: u64) -> Result<Vec<u8>, FetchError> {
    let max_bytes = usize::try_from(max_bytes).unwrap_or(usize::MAX);
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| classify_transport(&e))?;
        let room = max_bytes.saturating_sub(body.len());
        if chunk.len() > room {
            body.extend_from_slice(&chunk[..room]);
            tracing::warn!(max_bytes, "response body truncated at download limit");
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

fn parse_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"').trim_matches('\'');
        (!value.is_empty()).then(|| value.to_ascii_lowercase())
    })
}

fn is_utf8_compatible(charset: &str) -> bool {
    matches!(charset, "utf-8" | "utf8" | "us-ascii" | "ascii")
}

/// Map a client error to a caller-safe kind; anything unrecognised is logged.
fn classify_transport(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout;
    }
    if is_tls_failure(err) {
        return FetchError::Tls;
    }
    if err.is_connect() || err.is_body() {
        return FetchError::Connection;
    }
    tracing::error!(error = ?err, "unexpected HTTP client failure");
    FetchError::Unknown
}

/// Walk the source chain looking for a rustls failure.
///
/// The handshake surfaces it wrapped in an `io::Error`, whose own `source()`
/// skips the wrapped error, so that layer is unwrapped explicitly. The
/// top-level message is never inspected because it embeds the request URL.
fn is_tls_failure(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(inner) = source {
        if inner.is::<rustls::Error>() {
            return true;
        }
        if let Some(io_err) = inner.downcast_ref::<io::Error>()
            && io_err
                .get_ref()
                .is_some_and(|wrapped| wrapped.is::<rustls::Error>())
        {
            return true;
        }
        if mentions_certificate(&inner.to_string()) {
            return true;
        }
        source = inner.source();
    }
    false
}

fn mentions_certificate(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("certificate") || message.contains("handshake")
}
