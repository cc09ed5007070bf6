//! Value Objects

pub mod credentials;
