//! Gateway configuration
//!
//! Read from the environment (after `.env` is loaded). Every value except
//! `SESSION_SECRET` in release builds has a development default.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::SameSite;
use platform::crypto::{random_secret, secret_from_base64};
use social::ServicesConfig;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub addr: SocketAddr,
    pub auth: AuthConfig,
    pub services: ServicesConfig,
}

impl GatewayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let session_secret = match lookup("SESSION_SECRET") {
            Some(encoded) => secret_from_base64(&encoded).context("invalid SESSION_SECRET")?,
            None if cfg!(debug_assertions) => {
                tracing::warn!("SESSION_SECRET not set, using a random secret");
                random_secret()
            }
            None => bail!("SESSION_SECRET must be set in production"),
        };

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(value) => value
                .parse::<bool>()
                .with_context(|| format!("invalid COOKIE_SECURE: {value}"))?,
            None => !cfg!(debug_assertions),
        };

        let cookie_same_site = match lookup("COOKIE_SAME_SITE") {
            Some(value) => SameSite::parse(&value)
                .with_context(|| format!("invalid COOKIE_SAME_SITE: {value}"))?,
            None => SameSite::Lax,
        };

        let session_max_age = lookup("SESSION_MAX_AGE_SECS")
            .map(|value| {
                value
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("invalid SESSION_MAX_AGE_SECS: {value}"))
            })
            .transpose()?;

        let timeout_ms = var("BACKEND_TIMEOUT_MS", "1000");
        let timeout = timeout_ms
            .parse::<u64>()
            .map(Duration::from_millis)
            .with_context(|| format!("invalid BACKEND_TIMEOUT_MS: {timeout_ms}"))?;

        let addr_raw = var("GATEWAY_ADDR", "0.0.0.0:8080");
        let addr = addr_raw
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid GATEWAY_ADDR: {addr_raw}"))?;

        let auth = AuthConfig {
            session_secret,
            session_max_age,
            cookie_secure,
            cookie_same_site,
            auth_url: var("AUTH_URL", "http://127.0.0.1:5000"),
            backend_timeout: timeout,
            ..AuthConfig::default()
        };

        let defaults = ServicesConfig::default();
        let services = ServicesConfig {
            stories_url: var("STORIES_URL", &defaults.stories_url),
            reactions_url: var("REACTIONS_URL", &defaults.reactions_url),
            follows_url: var("FOLLOWS_URL", &defaults.follows_url),
            stats_url: var("STATS_URL", &defaults.stats_url),
            rank_url: var("RANK_URL", &defaults.rank_url),
            users_url: var("USERS_URL", &defaults.users_url),
            timeout,
        };

        Ok(Self {
            addr,
            auth,
            services,
        })
    }
}
