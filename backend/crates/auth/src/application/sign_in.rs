//! Sign In Use Case
//!
//! Verifies credentials with the auth backend and creates a session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{FlowOutcome, establish};
use crate::domain::repository::{AuthBackend, SessionStore};
use crate::domain::value_object::credentials::LoginCredentials;
use crate::error::{AuthError, AuthResult};

/// Shown when the backend refuses the credentials
pub const INVALID_CREDENTIALS_MESSAGE: &str = "User or Password not correct!";

/// Sign in use case
pub struct SignInUseCase<S, B>
where
    S: SessionStore,
    B: AuthBackend,
{
    store: Arc<S>,
    backend: Arc<B>,
    config: Arc<AuthConfig>,
}

impl<S, B> SignInUseCase<S, B>
where
    S: SessionStore,
    B: AuthBackend,
{
    pub fn new(store: Arc<S>, backend: Arc<B>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            backend,
            config,
        }
    }

    /// Success stores the record; a refusal leaves the store untouched;
    /// anything else is returned as a fatal error.
    pub async fn execute(&self, credentials: LoginCredentials) -> AuthResult<FlowOutcome> {
        let record = match self.backend.login(&credentials).await {
            Ok(record) => record,
            Err(AuthError::InvalidCredentials) => {
                tracing::warn!("Login rejected by auth backend");
                return Ok(FlowOutcome::Rejected {
                    message: INVALID_CREDENTIALS_MESSAGE,
                });
            }
            Err(e) => return Err(e),
        };

        let user_id = record.get_id().clone();
        let outcome = establish(self.store.as_ref(), &self.config, record).await?;

        tracing::info!(user_id = %user_id, "User signed in");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::identity::UserRecord;
    use crate::domain::value_object::credentials::SignupProfile;
    use crate::infra::memory::InMemorySessionStore;
    use kernel::id::UserId;

    /// Backend answering every login the same way
    struct ScriptedBackend(fn() -> AuthResult<UserRecord>);

    impl AuthBackend for ScriptedBackend {
        async fn login(&self, _credentials: &LoginCredentials) -> AuthResult<UserRecord> {
            (self.0)()
        }

        async fn signup(&self, _profile: &SignupProfile) -> AuthResult<UserRecord> {
            Err(AuthError::Internal("not scripted".into()))
        }
    }

    fn use_case(
        store: &InMemorySessionStore,
        answer: fn() -> AuthResult<UserRecord>,
    ) -> SignInUseCase<InMemorySessionStore, ScriptedBackend> {
        SignInUseCase::new(
            Arc::new(store.clone()),
            Arc::new(ScriptedBackend(answer)),
            Arc::new(AuthConfig::development()),
        )
    }

    fn credentials() -> LoginCredentials {
        LoginCredentials::new("ann@example.com", "secret")
    }

    #[tokio::test]
    async fn test_success_stores_record_and_issues_token() {
        let store = InMemorySessionStore::new();
        let outcome = use_case(&store, || Ok(UserRecord::new(UserId::from(42), "Ann", false)))
            .execute(credentials())
            .await
            .unwrap();

        match outcome {
            FlowOutcome::SignedIn {
                identity,
                session_token,
            } => {
                assert!(identity.is_authenticated());
                // base64url("42")
                assert!(session_token.starts_with("NDI."));
            }
            other => panic!("expected SignedIn, got {other:?}"),
        }
        assert!(store.get(&UserId::from(42)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rejection_keeps_store_unchanged() {
        let store = InMemorySessionStore::new();
        store
            .put(UserRecord::new(UserId::from(1), "Existing", false))
            .await
            .unwrap();

        let outcome = use_case(&store, || Err(AuthError::InvalidCredentials))
            .execute(credentials())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            FlowOutcome::Rejected {
                message: INVALID_CREDENTIALS_MESSAGE
            }
        );
        assert_eq!(store.len().await.unwrap(), 1);
        assert!(store.get(&UserId::from(1)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_backend_failure_is_fatal_and_stores_nothing() {
        let store = InMemorySessionStore::new();
        let result = use_case(&store, || Err(AuthError::Backend("timed out".into())))
            .execute(credentials())
            .await;

        assert!(matches!(result, Err(AuthError::Backend(_))));
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_repeated_login_overwrites() {
        let store = InMemorySessionStore::new();
        let first = use_case(&store, || Ok(UserRecord::new(UserId::from(42), "Ann", false)));
        first.execute(credentials()).await.unwrap();
        let second = use_case(&store, || Ok(UserRecord::new(UserId::from(42), "Annie", false)));
        second.execute(credentials()).await.unwrap();

        assert_eq!(store.len().await.unwrap(), 1);
        let record = store.get(&UserId::from(42)).await.unwrap().unwrap();
        assert_eq!(record.display_name(), "Annie");
    }
}
