//! Social Pages and Actions Module
//!
//! Clean Architecture structure:
//! - `domain/` - Downstream service vocabulary, gateway trait
//! - `application/` - Page and action use cases, service configuration
//! - `infra/` - HTTP clients for the downstream services
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Stories, reactions, follows, stats, rank and user profiles all live in
//! their own services; this crate only guards the routes, forwards the caller and
//! turns answers into user-facing messages.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::ServicesConfig;
pub use error::{SocialError, SocialResult};
pub use infra::HttpSocialGateway;
pub use presentation::{SocialAppState, social_router};
