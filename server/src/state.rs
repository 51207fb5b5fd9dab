use std::sync::Arc;

use roaster_analyzer::Analyzer;
use roaster_config::ServerSettings;
use roaster_fetch::{FetchConfig, Fetcher};
use roaster_roasts::{CatalogRoaster, Pick, Roaster};

use crate::error::ServerResult;
use crate::limiter::RateLimiter;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub roaster: Arc<dyn Roaster>,
    pub limiter: Arc<RateLimiter>,
    pub settings: Arc<ServerSettings>,
}

impl AppState {
    #[must_use]
    pub fn new(analyzer: Analyzer, roaster: Arc<dyn Roaster>, settings: ServerSettings) -> Self {
        let limiter = RateLimiter::new(settings.rate_limit_max_requests, settings.rate_limit_window);
        Self {
            analyzer,
            roaster,
            limiter: Arc::new(limiter),
            settings: Arc::new(settings),
        }
    }

    /// State with a fresh fetcher and the random-pick catalog roaster.
    pub fn from_config(fetch: &FetchConfig, settings: ServerSettings) -> ServerResult<Self> {
        let fetcher = Fetcher::new(fetch)?;
        let analyzer = Analyzer::new(fetcher, settings.timeout);
        Ok(Self::new(
            analyzer,
            Arc::new(CatalogRoaster::new(Pick::Random)),
            settings,
        ))
    }
}
