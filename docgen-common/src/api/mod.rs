//! Backend API schema
//!
//! Request/response types for the documentation-generation backend.
//! Every JSON body the client consumes is deserialized into one of these
//! types and validated before use.

pub mod types;

pub use types::{BackendErrorBody, ProgressReport, UploadResponse, DEFAULT_ERROR_MESSAGE};
