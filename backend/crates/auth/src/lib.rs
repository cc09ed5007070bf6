//! Auth (Authentication) Gateway Module
//!
//! Clean Architecture structure:
//! - `domain/` - Identity entity, credential value objects, store/backend traits
//! - `application/` - Authenticator, access guard, login/logout/signup use cases
//! - `infra/` - In-memory session store, HTTP auth backend client
//! - `presentation/` - HTTP handlers, DTOs, router, guard middleware
//!
//! ## Features
//! - Login and signup delegated to a remote auth service
//! - Process-local session store keyed by user id
//! - Signed session cookie carrying the user id
//! - Page/action/admin route guards
//!
//! ## Session Model
//! - Sessions live in process memory and are lost on restart
//! - The store is only mutated after the auth service confirms a login or
//!   signup, and on logout
//! - Identity is resolved once per request and read by handlers through
//!   [`presentation::CurrentIdentity`]

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::{AuthBackend, Identity, SessionStore, UserRecord};
pub use error::{AuthError, AuthResult};
pub use infra::{HttpAuthBackend, InMemorySessionStore};
pub use presentation::router::auth_router;
pub use presentation::{AuthAppState, AuthMiddlewareState, CurrentIdentity};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};
