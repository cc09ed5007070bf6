//! Sign Up Use Case
//!
//! Creates an account through the auth backend and logs the new user in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{FlowOutcome, establish};
use crate::domain::repository::{AuthBackend, SessionStore};
use crate::domain::value_object::credentials::SignupProfile;
use crate::error::{AuthError, AuthResult};

/// Shown when the backend reports a duplicate account
pub const EMAIL_TAKEN_MESSAGE: &str = "Seems like this email is already used";

/// Sign up use case
pub struct SignUpUseCase<S, B>
where
    S: SessionStore,
    B: AuthBackend,
{
    store: Arc<S>,
    backend: Arc<B>,
    config: Arc<AuthConfig>,
}

impl<S, B> SignUpUseCase<S, B>
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

    pub async fn execute(&self, profile: SignupProfile) -> AuthResult<FlowOutcome> {
        let record = match self.backend.signup(&profile).await {
            Ok(record) => record,
            Err(AuthError::EmailTaken) => {
                tracing::warn!("Signup rejected, email already registered");
                return Ok(FlowOutcome::Rejected {
                    message: EMAIL_TAKEN_MESSAGE,
                });
            }
            Err(e) => return Err(e),
        };

        let user_id = record.get_id().clone();
        let outcome = establish(self.store.as_ref(), &self.config, record).await?;

        tracing::info!(
            user_id = %user_id,
            display_name = %profile.display_name,
            "User signed up"
        );
        Ok(outcome)
    }
}
