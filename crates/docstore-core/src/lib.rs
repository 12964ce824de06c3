//! # Docstore Core
//!
//! Core types, errors, and domain entities for the docstore data-access
//! layer. This crate provides the foundational abstractions shared by the
//! configuration and DAO crates.

pub mod domain;
pub mod error;
pub mod id;
pub mod logging;
pub mod pagination;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use logging::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
