//! SSRF-safe page fetching.
//!
//! [`Fetcher`] takes an untrusted URL string, normalizes it, checks its scheme
//! and every address its host resolves to, then issues a GET with automatic
//! redirects disabled. Each redirect target goes back through the same checks
//! before it is requested, and the chain is capped at a fixed hop count.
//!
//! ```no_run
//! # async fn run() -> Result<(), roaster_fetch::FetchError> {
//! use std::time::Duration;
//!
//! let page = roaster_fetch::fetch("example.com", Duration::from_secs(8)).await?;
//! println!("{} -> {}", page.final_url, page.status);
//! # Ok(())
//! # }
//! ```

mod address;
mod http;
mod resolve;
mod resolved;
mod types;
mod validate;

pub use address::{AddressClass, classify, is_metadata_endpoint};
pub use http::{Fetcher, fetch};
pub use resolve::{Resolve, ResolveFut, StaticResolver, SystemResolver};
pub use types::{
    ErrorCategory, FetchConfig, FetchError, FetchResult, FetcherBuildError, SecurityConfig,
};
pub use validate::ValidatedUrl;
