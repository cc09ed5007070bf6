//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC-signed tokens, Base64)
//! - Cookie management
//! - Outbound HTTP client with caller propagation
//! - Zeroize-on-drop clear text passwords

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
