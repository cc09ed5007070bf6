//! Downstream service configuration

use std::time::Duration;

use crate::domain::model::Service;

/// Base URLs of the downstream services
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    pub stories_url: String,
    pub reactions_url: String,
    pub follows_url: String,
    pub stats_url: String,
    pub rank_url: String,
    pub users_url: String,
    /// Bound on every downstream call
    pub timeout: Duration,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            stories_url: "http://127.0.0.1:5001".to_string(),
            reactions_url: "http://127.0.0.1:5002".to_string(),
            follows_url: "http://127.0.0.1:5003".to_string(),
            stats_url: "http://127.0.0.1:5004".to_string(),
            rank_url: "http://127.0.0.1:5005".to_string(),
            users_url: "http://127.0.0.1:5006".to_string(),
            timeout: Duration::from_secs(1),
        }
    }
}

impl ServicesConfig {
    /// Every service at the same base URL (tests, single-host setups)
    pub fn single_host(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            stories_url: base_url.clone(),
            reactions_url: base_url.clone(),
            follows_url: base_url.clone(),
            stats_url: base_url.clone(),
            rank_url: base_url.clone(),
            users_url: base_url,
            ..Self::default()
        }
    }

    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Stories => &self.stories_url,
            Service::Reactions => &self.reactions_url,
            Service::Follows => &self.follows_url,
            Service::Stats => &self.stats_url,
            Service::Rank => &self.rank_url,
            Service::Users => &self.users_url,
        }
    }
}
