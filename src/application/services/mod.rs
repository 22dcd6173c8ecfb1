// src/application/services/mod.rs
pub mod bookmark_manager;
pub mod view_engine;
