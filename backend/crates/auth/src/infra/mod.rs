//! Infrastructure Layer
//!
//! Session storage and the HTTP client for the remote auth service.

pub mod http_backend;
pub mod memory;

pub use http_backend::HttpAuthBackend;
pub use memory::InMemorySessionStore;
