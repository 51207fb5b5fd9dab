//! Configuration, result, and error types for page fetching.

use std::net::IpAddr;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::address::AddressClass;

/// Fetch configuration.
///
/// Maps to the `[fetch]` table in `config.toml`. Every field is optional and
/// resolved to a concrete value once, when a [`Fetcher`](crate::Fetcher) is built.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FetchConfig {
    /// User-Agent sent on every request.
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds. Default: 10.
    pub timeout_seconds: Option<u32>,

    /// Maximum redirect hops to follow. Default: 5.
    pub max_redirects: Option<u32>,

    /// Maximum body bytes kept from the final response. Default: 5 MiB.
    pub max_download_bytes: Option<u64>,

    /// Address-safety configuration.
    pub security: Option<SecurityConfig>,
}

impl FetchConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECONDS: u32 = 10;

    /// Default max redirects.
    pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

    /// Default max download bytes (5 MiB).
    pub const DEFAULT_MAX_DOWNLOAD_BYTES: u64 = 5 * 1024 * 1024;

    #[must_use]
    pub fn timeout_seconds(&self) -> u32 {
        self.timeout_seconds
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECONDS)
    }

    #[must_use]
    pub fn max_redirects(&self) -> u32 {
        self.max_redirects.unwrap_or(Self::DEFAULT_MAX_REDIRECTS)
    }

    #[must_use]
    pub fn max_download_bytes(&self) -> u64 {
        self.max_download_bytes
            .unwrap_or(Self::DEFAULT_MAX_DOWNLOAD_BYTES)
    }
}

/// Address-safety configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    /// Additional blocked CIDR ranges, on top of the built-in tables.
    pub blocked_cidrs: Option<Vec<String>>,

    /// Permit loopback targets (local testing only).
    ///
    /// Ignored unless `SEO_ROASTER_ALLOW_LOOPBACK=1` is also set. Private,
    /// link-local, and metadata ranges stay blocked either way.
    #[serde(default)]
    pub allow_loopback: bool,
}

/// A completed fetch: the final document, where it came from, and its status.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Decoded response body of the final hop.
    pub body: String,

    /// URL actually fetched on the final hop.
    pub final_url: Url,

    /// Status code of the final hop (never 4xx/5xx).
    pub status: u16,
}

/// Broad grouping of [`FetchError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The target was refused before or between requests. Never retried.
    SafetyRejection,
    /// The network failed us. The caller may retry the whole analysis.
    Transport,
    /// The remote answered with an error status.
    Remote,
    /// Anything else. Details are logged, never surfaced.
    Unexpected,
}

/// Errors produced by validation and fetching.
///
/// Display strings are caller-safe: they never include response bodies,
/// headers, resolved addresses, or lower-level error text.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("scheme '{scheme}' is not supported; only http and https are allowed")]
    UnsupportedScheme { scheme: String },

    #[error("access to internal network addresses is not allowed")]
    BlockedAddress {
        host: String,
        ip: IpAddr,
        class: AddressClass,
    },

    #[error("could not resolve host '{host}'")]
    DnsResolutionFailed { host: String },

    #[error("too many redirects (limit is {max})")]
    TooManyRedirects { max: u32 },

    #[error("the site took too long to respond")]
    Timeout,

    #[error("TLS handshake with the site failed")]
    Tls,

    #[error("could not connect to the site")]
    Connection,

    #[error("HTTP error {status}")]
    Http { status: u16 },

    #[error("unexpected error while fetching the page")]
    Unknown,
}

impl FetchError {
    pub(crate) fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidUrl { .. }
            | Self::UnsupportedScheme { .. }
            | Self::BlockedAddress { .. }
            | Self::DnsResolutionFailed { .. }
            | Self::TooManyRedirects { .. } => ErrorCategory::SafetyRejection,
            Self::Timeout | Self::Tls | Self::Connection => ErrorCategory::Transport,
            Self::Http { .. } => ErrorCategory::Remote,
            Self::Unknown => ErrorCategory::Unexpected,
        }
    }

    /// Stable, caller-facing error kind.
    ///
    /// All safety rejections share `invalid_url`; the message carries the
    /// specific reason.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. }
            | Self::UnsupportedScheme { .. }
            | Self::BlockedAddress { .. }
            | Self::DnsResolutionFailed { .. }
            | Self::TooManyRedirects { .. } => "invalid_url",
            Self::Timeout => "timeout",
            Self::Tls => "ssl_error",
            Self::Connection => "connection_error",
            Self::Http { .. } => "http_error",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}

/// Failure to build a [`Fetcher`](crate::Fetcher) from configuration.
#[derive(Debug, Error)]
pub enum FetcherBuildError {
    #[error("invalid blocked CIDR '{0}'")]
    InvalidCidr(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
