//! Application Layer
//!
//! Page and action use cases over the downstream services.

pub mod actions;
pub mod config;
pub mod pages;

// Re-exports
pub use actions::ActionUseCase;
pub use config::ServicesConfig;
pub use pages::{AuthorWall, ExploreFilter, HomeFeed, MyWall, PageUseCase, Writers};
