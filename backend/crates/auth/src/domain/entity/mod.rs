//! Entities

pub mod identity;
