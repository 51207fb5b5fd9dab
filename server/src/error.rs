use std::io;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roaster_config::ConfigError;
use roaster_fetch::FetcherBuildError;
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Slow down! Too many requests, take a breather.")]
    RateLimited,

    #[error("That URL is way too long. Are you pasting a thesis?")]
    UrlTooLong,

    #[error("Enter a URL. Don't make me guess.")]
    EmptyUrl,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] FetcherBuildError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::UrlTooLong | Self::EmptyUrl | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Client(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed roast for request-level rejections that have one.
    fn roast(&self) -> Option<&'static str> {
        match self {
            Self::RateLimited => Some("Are you a bot? You can't even stop to breathe?"),
            Self::UrlTooLong => Some("Even your URL is this long. Is your life this complicated too?"),
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }

        let body = match self.roast() {
            Some(roast) => json!({
                "error": true,
                "message": self.to_string(),
                "roast": roast,
            }),
            None => json!({
                "error": true,
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_map_to_client_errors() {
        assert_eq!(
            ServerError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(ServerError::UrlTooLong.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServerError::EmptyUrl.status_code(), StatusCode::BAD_REQUEST);
        assert!(ServerError::EmptyUrl.roast().is_none());
        assert!(ServerError::UrlTooLong.roast().is_some());
    }
}
