//! HTTP service for SEO Roaster.
//!
//! - `GET /health`: liveness
//! - `POST /analyze` with `{"url": "..."}`: roast report for one page
//!
//! ```rust,no_run
//! use roaster_config::RoasterConfig;
//!
//! # async fn run() -> Result<(), roaster_server::ServerError> {
//! let config = RoasterConfig::load()?;
//! roaster_server::serve_config(&config, None).await
//! # }
//! ```

mod error;
mod limiter;
mod report;
mod routes;
mod server;
mod state;

pub use error::{ServerError, ServerResult};
pub use limiter::RateLimiter;
pub use report::{FailureReport, PassedCheck, RoastReport, RoastedIssue};
pub use routes::analyze::AnalyzeRequest;
pub use server::{build_router, serve, serve_config, state_from_config};
pub use state::AppState;
