//! Domain Layer
//!
//! Contains the identity entity, credential value objects and the
//! storage/backend traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::identity::{Identity, UserRecord};
pub use repository::{AuthBackend, SessionStore};
pub use value_object::credentials::{LoginCredentials, SignupProfile};
