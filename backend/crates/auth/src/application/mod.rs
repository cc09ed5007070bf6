//! Application Layer
//!
//! Use cases and application services.

pub mod authenticator;
pub mod config;
pub mod credential;
pub mod guard;
pub mod session;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use guard::{GuardDecision, RouteClass};
pub use session::FlowOutcome;
pub use sign_in::SignInUseCase;
pub use sign_out::{SignOutOutcome, SignOutUseCase};
pub use sign_up::SignUpUseCase;
