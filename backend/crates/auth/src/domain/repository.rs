//! Storage and Backend Traits
//!
//! Interfaces for session state and the remote auth service.
//! Implementations are in the infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::identity::UserRecord;
use crate::domain::value_object::credentials::{LoginCredentials, SignupProfile};
use crate::error::AuthResult;

/// Session store trait
///
/// Maps a user id to the record of the user logged in under it. Callers
/// depend on this trait only, so the in-memory map can be replaced by a
/// shared cache without touching them.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Insert or overwrite the record keyed by its own id
    async fn put(&self, record: UserRecord) -> AuthResult<()>;

    /// Look up a record; absence is `Ok(None)`
    async fn get(&self, id: &UserId) -> AuthResult<Option<UserRecord>>;

    /// Remove a record
    ///
    /// Fails with `AuthError::SessionNotFound` when no record exists.
    async fn remove(&self, id: &UserId) -> AuthResult<UserRecord>;

    /// Number of live sessions
    async fn len(&self) -> AuthResult<usize>;
}

/// Remote auth service trait
///
/// Domain rejections come back as `AuthError::InvalidCredentials` (login)
/// and `AuthError::EmailTaken` (signup); every other failure is
/// `AuthError::Backend`.
#[trait_variant::make(AuthBackend: Send)]
pub trait LocalAuthBackend {
    /// Verify credentials
    async fn login(&self, credentials: &LoginCredentials) -> AuthResult<UserRecord>;

    /// Create an account
    async fn signup(&self, profile: &SignupProfile) -> AuthResult<UserRecord>;
}
