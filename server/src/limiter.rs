//! Per-client sliding-window rate limiting.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Sliding-window log: each client keeps the instants of its recent requests.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    hits: DashMap<String, Vec<Instant>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: DashMap::new(),
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a request from `key`. Returns false when over the limit.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    pub(crate) fn check_at(&self, key: &str, now: Instant) -> bool {
        let window = self.window;
        let mut hits = self.hits.entry(key.to_string()).or_default();
        hits.retain(|hit| now.duration_since(*hit) < window);

        if hits.len() >= self.max_requests as usize {
            tracing::warn!(client = key, "rate limit exceeded");
            return false;
        }

        hits.push(now);
        true
    }

    /// Drop expired hits and forget clients with none left.
    pub fn sweep(&self) {
        self.sweep_at(Instant::now());
    }

    pub(crate) fn sweep_at(&self, now: Instant) {
        let window = self.window;
        let before = self.hits.len();
        self.hits.retain(|_, hits| {
            hits.retain(|hit| now.duration_since(*hit) < window);
            !hits.is_empty()
        });
        let dropped = before.saturating_sub(self.hits.len());
        if dropped > 0 {
            tracing::debug!(dropped, "swept idle rate-limit entries");
        }
    }

    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.hits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit_within_window() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check_at("a", start));
        assert!(limiter.check_at("a", start + Duration::from_secs(1)));
        assert!(limiter.check_at("a", start + Duration::from_secs(2)));
        assert!(!limiter.check_at("a", start + Duration::from_secs(3)));
        // Other clients are tracked separately.
        assert!(limiter.check_at("b", start + Duration::from_secs(3)));
    }

    #[test]
    fn window_slides() {
        let limiter = RateLimiter::new(2, Duration::from_secs(10));
        let start = Instant::now();
        assert!(limiter.check_at("a", start));
        assert!(limiter.check_at("a", start + Duration::from_secs(5)));
        assert!(!limiter.check_at("a", start + Duration::from_secs(9)));
        // First hit has aged out; the second still counts.
        assert!(limiter.check_at("a", start + Duration::from_secs(10)));
        assert!(!limiter.check_at("a", start + Duration::from_secs(11)));
    }

    #[test]
    fn rejected_requests_do_not_extend_the_window() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let start = Instant::now();
        assert!(limiter.check_at("a", start));
        assert!(!limiter.check_at("a", start + Duration::from_secs(9)));
        assert!(limiter.check_at("a", start + Duration::from_secs(10)));
    }

    #[test]
    fn sweep_forgets_idle_clients() {
        let limiter = RateLimiter::new(5, Duration::from_secs(10));
        let start = Instant::now();
        limiter.check_at("old", start);
        limiter.check_at("new", start + Duration::from_secs(8));
        assert_eq!(limiter.tracked_clients(), 2);

        limiter.sweep_at(start + Duration::from_secs(12));
        assert_eq!(limiter.tracked_clients(), 1);

        limiter.sweep_at(start + Duration::from_secs(30));
        assert_eq!(limiter.tracked_clients(), 0);
    }
}
