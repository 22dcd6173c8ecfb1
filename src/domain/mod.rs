// src/domain/mod.rs
pub mod bookmark;
pub mod clock;
pub mod error;
pub mod flatten;
pub mod folder;
pub mod repositories;
pub mod tree;
pub mod view_state;
