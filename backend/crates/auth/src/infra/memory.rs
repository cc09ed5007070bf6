//! In-memory session store
//!
//! Process-local and volatile: a restart logs everybody out. Swap in
//! another [`SessionStore`] implementation for sessions that must survive
//! restarts or be shared between gateway instances.

use std::sync::Arc;

use dashmap::DashMap;
use kernel::id::UserId;

use crate::domain::entity::identity::UserRecord;
use crate::domain::repository::SessionStore;
use crate::error::{AuthError, AuthResult};

/// Session store backed by a concurrent map
///
/// Clones share the same map. Concurrent `put`s for one id are
/// last-writer-wins.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<DashMap<String, UserRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn put(&self, record: UserRecord) -> AuthResult<()> {
        self.sessions
            .insert(record.get_id().as_str().to_string(), record);
        Ok(())
    }

    async fn get(&self, id: &UserId) -> AuthResult<Option<UserRecord>> {
        Ok(self
            .sessions
            .get(id.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn remove(&self, id: &UserId) -> AuthResult<UserRecord> {
        self.sessions
            .remove(id.as_str())
            .map(|(_, record)| record)
            .ok_or(AuthError::SessionNotFound)
    }

    async fn len(&self) -> AuthResult<usize> {
        Ok(self.sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, name: &str) -> UserRecord {
        UserRecord::new(UserId::from(id), name, false)
    }

    #[tokio::test]
    async fn test_put_get_remove() {
        let store = InMemorySessionStore::new();
        store.put(record(1, "Ann")).await.unwrap();

        let found = store.get(&UserId::from(1)).await.unwrap().unwrap();
        assert_eq!(found.display_name(), "Ann");

        let removed = store.remove(&UserId::from(1)).await.unwrap();
        assert_eq!(removed.get_id(), &UserId::from(1));
        assert!(store.get(&UserId::from(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_absent_is_not_found() {
        let store = InMemorySessionStore::new();
        let result = store.remove(&UserId::from(99)).await;
        assert!(matches!(result, Err(AuthError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_put_overwrites_same_id() {
        let store = InMemorySessionStore::new();
        store.put(record(5, "First")).await.unwrap();
        store.put(record(5, "Second")).await.unwrap();

        assert_eq!(store.len().await.unwrap(), 1);
        let found = store.get(&UserId::from(5)).await.unwrap().unwrap();
        assert_eq!(found.display_name(), "Second");
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemorySessionStore::new();
        let other = store.clone();
        store.put(record(2, "Bea")).await.unwrap();
        assert!(other.get(&UserId::from(2)).await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_put_and_remove_same_id() {
        let store = InMemorySessionStore::new();
        let mut tasks = Vec::new();

        for i in 0..64u64 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    store.put(record(7, "Racer")).await.map(|_| ())
                } else {
                    match store.remove(&UserId::from(7)).await {
                        Ok(_) | Err(AuthError::SessionNotFound) => Ok(()),
                        Err(e) => Err(e),
                    }
                }
            }));
        }

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        // Whatever the interleaving, at most one entry survives
        assert!(store.len().await.unwrap() <= 1);
    }
}
