//! HTTP auth backend
//!
//! `POST {auth_url}/login` and `POST {auth_url}/signup`, one attempt each,
//! bounded by the configured timeout.

use kernel::id::UserId;
use platform::client::{ServiceClient, ServiceResponse};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::identity::UserRecord;
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::credentials::{LoginCredentials, SignupProfile};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_of_birth: Option<&'a str>,
}

/// Success body: `{id, display_name, is_admin?}`
#[derive(Debug, Deserialize)]
struct BackendIdentity {
    id: UserId,
    display_name: String,
    #[serde(default)]
    is_admin: bool,
}

impl From<BackendIdentity> for UserRecord {
    fn from(body: BackendIdentity) -> Self {
        UserRecord::new(body.id, body.display_name, body.is_admin)
    }
}

/// Auth backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: ServiceClient,
}

impl HttpAuthBackend {
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        let client = ServiceClient::new("auth", config.auth_url.clone(), config.backend_timeout)?;
        Ok(Self { client })
    }

    /// Decode the success body
    ///
    /// Some backend builds send the object JSON-encoded inside a JSON
    /// string; that form is unwrapped once.
    fn decode_identity(response: &ServiceResponse) -> AuthResult<UserRecord> {
        let value: serde_json::Value = response
            .json()
            .map_err(|e| AuthError::Backend(format!("undecodable auth response: {e}")))?;

        let value = match value {
            serde_json::Value::String(inner) => serde_json::from_str(&inner)
                .map_err(|e| AuthError::Backend(format!("undecodable auth response: {e}")))?,
            other => other,
        };

        serde_json::from_value::<BackendIdentity>(value)
            .map(UserRecord::from)
            .map_err(|e| AuthError::Backend(format!("unexpected auth response shape: {e}")))
    }

    fn unexpected(operation: &str, status: StatusCode) -> AuthError {
        AuthError::Backend(format!("{operation} answered with unexpected status {status}"))
    }
}

impl AuthBackend for HttpAuthBackend {
    async fn login(&self, credentials: &LoginCredentials) -> AuthResult<UserRecord> {
        let body = LoginRequest {
            email: &credentials.email,
            password: credentials.password(),
        };
        let request = self.client.request(Method::POST, &["login"], None).json(&body);
        let response = self.client.send(request).await?;

        match response.status {
            StatusCode::OK => Self::decode_identity(&response),
            StatusCode::UNAUTHORIZED => Err(AuthError::InvalidCredentials),
            status => Err(Self::unexpected("login", status)),
        }
    }

    async fn signup(&self, profile: &SignupProfile) -> AuthResult<UserRecord> {
        let body = SignupRequest {
            email: &profile.email,
            password: profile.password(),
            display_name: &profile.display_name,
            last_name: profile.last_name.as_deref(),
            date_of_birth: profile.date_of_birth.as_deref(),
        };
        let request = self.client.request(Method::POST, &["signup"], None).json(&body);
        let response = self.client.send(request).await?;

        match response.status {
            StatusCode::OK => Self::decode_identity(&response),
            StatusCode::CONFLICT => Err(AuthError::EmailTaken),
            status => Err(Self::unexpected("signup", status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer, timeout: Duration) -> HttpAuthBackend {
        HttpAuthBackend::new(&AuthConfig {
            auth_url: server.uri(),
            backend_timeout: timeout,
            ..AuthConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_success_sends_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(serde_json::json!({
                "email": "ann@example.com",
                "password": "pw"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 42, "display_name": "Ann"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let record = backend(&server, Duration::from_secs(1))
            .login(&LoginCredentials::new("ann@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(record.get_id(), &UserId::from(42));
        assert_eq!(record.display_name(), "Ann");
        assert!(!record.is_admin());
        assert!(!record.is_authenticated());
    }

    #[tokio::test]
    async fn test_double_encoded_body_is_accepted() {
        let server = MockServer::start().await;
        let inner = r#"{"id": "9", "display_name": "Ivy", "is_admin": true}"#;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(inner)))
            .mount(&server)
            .await;

        let record = backend(&server, Duration::from_secs(1))
            .login(&LoginCredentials::new("ivy@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(record.get_id().as_str(), "9");
        assert!(record.is_admin());
    }

    #[tokio::test]
    async fn test_login_status_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = backend(&server, Duration::from_secs(1))
            .login(&LoginCredentials::new("ann@example.com", "bad"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_conflict_on_login_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let result = backend(&server, Duration::from_secs(1))
            .login(&LoginCredentials::new("ann@example.com", "pw"))
            .await;
        assert!(matches!(result, Err(AuthError::Backend(_))));
    }

    #[tokio::test]
    async fn test_signup_conflict_and_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .and(body_json(serde_json::json!({
                "email": "ann@example.com",
                "password": "pw",
                "display_name": "Ann",
                "last_name": "Lee"
            })))
            .respond_with(ResponseTemplate::new(409))
            .expect(1)
            .mount(&server)
            .await;

        let profile = SignupProfile::new("ann@example.com", "pw", "Ann")
            .with_last_name(Some("Lee".to_string()));
        let result = backend(&server, Duration::from_secs(1))
            .signup(&profile)
            .await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_unauthorized_on_signup_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = backend(&server, Duration::from_secs(1))
            .signup(&SignupProfile::new("ann@example.com", "pw", "Ann"))
            .await;
        assert!(matches!(result, Err(AuthError::Backend(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 1, "display_name": "Late"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let result = backend(&server, Duration::from_millis(50))
            .login(&LoginCredentials::new("late@example.com", "pw"))
            .await;
        assert!(matches!(result, Err(AuthError::Backend(_))));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = backend(&server, Duration::from_secs(1))
            .login(&LoginCredentials::new("ann@example.com", "pw"))
            .await;
        assert!(matches!(result, Err(AuthError::Backend(_))));
    }
}
