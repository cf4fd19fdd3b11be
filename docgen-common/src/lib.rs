//! # docgen Common Library
//!
//! Shared code for the docgen client service including:
//! - Document vocabulary (document types, detail levels, artifact formats)
//! - Supported upload media rules
//! - Backend request/response schema types with boundary validation
//! - Configuration loading and resolution
//! - Common error types

pub mod api;
pub mod config;
pub mod document;
pub mod error;

pub use document::{ArtifactFormat, DocLevel, DocType};
pub use error::{Error, Result};
