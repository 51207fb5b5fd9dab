//! Invariant-safe configuration resolution.
//!
//! [`FetchConfig`] is all `Option`s at the boundary. It is resolved once into
//! [`ResolvedConfig`], which the validator and fetch loop read without any
//! further defaulting.
use std::env;
use std::time::Duration;

use crate::address::Cidr;
use crate::types::{FetchConfig, FetcherBuildError};

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; SEORoaster/1.0; +https://github.com/tznthou/seo-roaster)";
const ENV_ALLOW_LOOPBACK: &str = "SEO_ROASTER_ALLOW_LOOPBACK";

#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub max_redirects: u32,
    pub max_download_bytes: u64,
    pub security: ResolvedSecurityConfig,
}

impl ResolvedConfig {
    pub fn from_config(config: &FetchConfig) -> Result<Self, FetcherBuildError> {
        let user_agent = config
            .user_agent
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let timeout = Duration::from_secs(u64::from(config.timeout_seconds().max(1)));

        Ok(Self {
            user_agent,
            timeout,
            max_redirects: config.max_redirects(),
            max_download_bytes: config.max_download_bytes(),
            security: ResolvedSecurityConfig::from_config(config)?,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSecurityConfig {
    pub blocked_cidrs: Vec<Cidr>,
    pub allow_loopback: bool,
}

impl ResolvedSecurityConfig {
    fn from_config(config: &FetchConfig) -> Result<Self, FetcherBuildError> {
        let security = config.security.as_ref();

        let blocked_cidrs = security
            .and_then(|s| s.blocked_cidrs.as_deref())
            .unwrap_or_default()
            .iter()
            .map(|entry| {
                Cidr::parse(entry).ok_or_else(|| FetcherBuildError::InvalidCidr(entry.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let requested_loopback = security.is_some_and(|s| s.allow_loopback);
        let loopback_opt_in = env_opt_in_enabled(ENV_ALLOW_LOOPBACK);
        if requested_loopback && !loopback_opt_in {
            tracing::warn!(
                "allow_loopback requested in config but disabled: set {}=1 to opt in",
                ENV_ALLOW_LOOPBACK
            );
        }

        Ok(Self {
            blocked_cidrs,
            allow_loopback: requested_loopback && loopback_opt_in,
        })
    }
}

fn env_opt_in_enabled(name: &str) -> bool {
    is_truthy_env(env::var(name).ok().as_deref())
}

fn is_truthy_env(value: Option<&str>) -> bool {
    value.is_some_and(|raw| {
        matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SecurityConfig;

    #[test]
    fn loopback_ignored_without_env_var() {
        assert!(!is_truthy_env(None));
        assert!(!is_truthy_env(Some("0")));
    }

    #[test]
    fn loopback_accepts_truthy_env_values() {
        assert!(is_truthy_env(Some("1")));
        assert!(is_truthy_env(Some("true")));
        assert!(is_truthy_env(Some("YES")));
        assert!(is_truthy_env(Some("on")));
    }

    #[test]
    fn blank_user_agent_falls_back_to_default() {
        let config = FetchConfig {
            user_agent: Some("   ".into()),
            ..Default::default()
        };
        let resolved = ResolvedConfig::from_config(&config).expect("resolved config");
        assert_eq!(resolved.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(resolved.timeout, Duration::from_secs(10));
        assert_eq!(resolved.max_redirects, 5);
    }

    #[test]
    fn invalid_cidr_is_rejected() {
        let config = FetchConfig {
            security: Some(SecurityConfig {
                blocked_cidrs: Some(vec!["203.0.113.0/24".into(), "nope".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = ResolvedConfig::from_config(&config).unwrap_err();
        assert!(matches!(err, FetcherBuildError::InvalidCidr(entry) if entry == "nope"));
    }
}
