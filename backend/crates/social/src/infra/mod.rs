//! Infrastructure Layer
//!
//! HTTP clients for the downstream services.

pub mod http_gateway;

pub use http_gateway::HttpSocialGateway;
