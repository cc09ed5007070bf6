//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
///
/// `Debug` output leaves the signing secret out.
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Cookie lifetime; `None` keeps it for the browser session
    pub session_max_age: Option<Duration>,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Base URL of the auth backend
    pub auth_url: String,
    /// Bound on every auth backend call
    pub backend_timeout: Duration,
    /// Where page routes send anonymous callers
    pub login_path: String,
    /// Where successful login, signup and logout land
    pub home_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "gateway_session".to_string(),
            session_secret: [0u8; 32],
            session_max_age: None,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            auth_url: "http://127.0.0.1:5000".to_string(),
            backend_timeout: Duration::from_secs(1),
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_secret", &"[REDACTED]")
            .field("session_max_age", &self.session_max_age)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("auth_url", &self.auth_url)
            .field("backend_timeout", &self.backend_timeout)
            .field("login_path", &self.login_path)
            .field("home_path", &self.home_path)
            .finish()
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie attributes for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: self.session_max_age.map(|ttl| ttl.as_secs()),
        }
    }
}
