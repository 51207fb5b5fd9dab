//! DNS resolution seam.
//!
//! The validator only needs "hostname → addresses". [`SystemResolver`] asks the
//! OS through tokio; [`StaticResolver`] answers from a fixed table so tests and
//! embedders can run without a network.
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::io;
use std::net::IpAddr;
use std::pin::Pin;

use tokio::net::lookup_host;

/// Future returned by [`Resolve::lookup`].
pub type ResolveFut<'a> = Pin<Box<dyn Future<Output = io::Result<Vec<IpAddr>>> + Send + 'a>>;

/// Hostname resolution.
pub trait Resolve: fmt::Debug + Send + Sync {
    /// Resolve `host` to every address it currently maps to.
    fn lookup<'a>(&'a self, host: &'a str, port: u16) -> ResolveFut<'a>;
}

/// Resolver backed by the operating system (`getaddrinfo`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn lookup<'a>(&'a self, host: &'a str, port: u16) -> ResolveFut<'a> {
        Box::pin(async move {
            let addrs = lookup_host((host, port)).await?;
            Ok(addrs.map(|addr| addr.ip()).collect())
        })
    }
}

/// Resolver answering from a fixed hostname table.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `host` (case-insensitive) to `addrs`.
    #[must_use]
    pub fn with_host(mut self, host: &str, addrs: impl IntoIterator<Item = IpAddr>) -> Self {
        self.entries
            .insert(host.to_ascii_lowercase(), addrs.into_iter().collect());
        self
    }
}

impl Resolve for StaticResolver {
    fn lookup<'a>(&'a self, host: &'a str, _port: u16) -> ResolveFut<'a> {
        let result = self
            .entries
            .get(&host.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no entry for {host}"))
            });
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_resolver_matches_case_insensitively() {
        let ip: IpAddr = "93.184.216.34".parse().unwrap();
        let resolver = StaticResolver::new().with_host("Example.COM", [ip]);
        let addrs = resolver.lookup("example.com", 443).await.unwrap();
        assert_eq!(addrs, vec![ip]);
    }

    #[tokio::test]
    async fn static_resolver_unknown_host_is_not_found() {
        let resolver = StaticResolver::new();
        let err = resolver.lookup("missing.test", 80).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
