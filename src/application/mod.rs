// src/application/mod.rs
pub mod error;
pub mod services;

// Re-export key services for easier imports
pub use services::bookmark_manager::{BookmarkManager, ManagerOptions};
pub use services::view_engine::{EngineState, ViewEngine, VisibleList};
