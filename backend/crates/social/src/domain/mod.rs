//! Domain Layer
//!
//! Downstream service vocabulary and the gateway trait.

pub mod model;
pub mod repository;

// Re-exports
pub use model::{Mutation, MutationStatus, ReactionKind, ResourcePath, Service};
pub use repository::SocialGateway;
