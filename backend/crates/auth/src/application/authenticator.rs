//! Authenticator
//!
//! Resolves the session id carried by a request to an [`Identity`].

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

/// Resolves session ids against the session store
///
/// Pure read: no store mutation, no network call per request.
pub struct Authenticator<S>
where
    S: SessionStore,
{
    store: Arc<S>,
}

impl<S> Authenticator<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolve an optional session id
    ///
    /// Absence of identity is `Ok(Identity::Anonymous)`; only a failing
    /// store produces an error.
    pub async fn resolve(&self, session_id: Option<&str>) -> AuthResult<Identity> {
        let Some(id) = session_id.and_then(UserId::parse) else {
            return Ok(Identity::Anonymous);
        };

        match self.store.get(&id).await? {
            // The stored flag is never trusted; reachability is what counts
            Some(record) => Ok(Identity::User(record.authenticated())),
            None => {
                tracing::debug!(user_id = %id, "Session id not in store, treating as anonymous");
                Ok(Identity::Anonymous)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::identity::UserRecord;
    use crate::infra::memory::InMemorySessionStore;

    fn authenticator(store: &InMemorySessionStore) -> Authenticator<InMemorySessionStore> {
        Authenticator::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn test_absent_session_id_is_anonymous() {
        let store = InMemorySessionStore::new();
        let identity = authenticator(&store).resolve(None).await.unwrap();
        assert!(identity.is_anonymous());
        assert!(!identity.is_authenticated());
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids_are_anonymous() {
        let store = InMemorySessionStore::new();
        let auth = authenticator(&store);
        for candidate in ["42", "", "   ", "4\u{0}2"] {
            let identity = auth.resolve(Some(candidate)).await.unwrap();
            assert!(identity.is_anonymous(), "{candidate:?} should be anonymous");
        }
    }

    #[tokio::test]
    async fn test_hit_forces_authenticated_flag() {
        let store = InMemorySessionStore::new();
        // Stored without the flag set
        store
            .put(UserRecord::new(UserId::from(42), "Ann", false))
            .await
            .unwrap();

        let identity = authenticator(&store).resolve(Some("42")).await.unwrap();
        assert!(identity.is_authenticated());
        assert!(!identity.is_anonymous());
        assert_eq!(identity.display_name(), Some("Ann"));
    }

    #[tokio::test]
    async fn test_resolution_does_not_mutate_store() {
        let store = InMemorySessionStore::new();
        let auth = authenticator(&store);
        auth.resolve(Some("1")).await.unwrap();
        assert_eq!(store.len().await.unwrap(), 0);
    }
}
