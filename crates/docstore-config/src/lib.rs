//! # Docstore Config
//!
//! Configuration management for the docstore data-access layer.
//! Supports layered configuration from files and environment variables,
//! with runtime refresh.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
