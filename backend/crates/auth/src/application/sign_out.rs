//! Sign Out Use Case
//!
//! Removes the caller's session.

use std::sync::Arc;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::SessionStore;
use crate::error::{AuthError, AuthResult};

/// What sign out found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutOutcome {
    SignedOut,
    /// Nothing to remove, e.g. a concurrent logout got there first
    AlreadySignedOut,
}

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionStore,
{
    store: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, identity: &Identity) -> AuthResult<SignOutOutcome> {
        let Some(user_id) = identity.get_id() else {
            return Ok(SignOutOutcome::AlreadySignedOut);
        };

        match self.store.remove(user_id).await {
            Ok(_) => {
                tracing::info!(user_id = %user_id, "User signed out");
                Ok(SignOutOutcome::SignedOut)
            }
            Err(AuthError::SessionNotFound) => {
                tracing::debug!(user_id = %user_id, "Session already gone on sign out");
                Ok(SignOutOutcome::AlreadySignedOut)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::identity::UserRecord;
    use crate::infra::memory::InMemorySessionStore;
    use kernel::id::UserId;

    #[tokio::test]
    async fn test_double_sign_out_is_not_fatal() {
        let store = InMemorySessionStore::new();
        let record = UserRecord::new(UserId::from(7), "Gus", false);
        store.put(record.clone()).await.unwrap();

        let use_case = SignOutUseCase::new(Arc::new(store.clone()));
        let identity = Identity::User(record.authenticated());

        assert_eq!(
            use_case.execute(&identity).await.unwrap(),
            SignOutOutcome::SignedOut
        );
        assert_eq!(
            use_case.execute(&identity).await.unwrap(),
            SignOutOutcome::AlreadySignedOut
        );
        assert!(store.get(&UserId::from(7)).await.unwrap().is_none());
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_anonymous_sign_out_is_a_no_op() {
        let store = InMemorySessionStore::new();
        let use_case = SignOutUseCase::new(Arc::new(store));
        assert_eq!(
            use_case.execute(&Identity::Anonymous).await.unwrap(),
            SignOutOutcome::AlreadySignedOut
        );
    }
}
