//! Upload authorization service
//!
//! Issues short-lived, write-scoped presigned S3 URLs for image uploads.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Upload validation and object-key derivation
pub mod authorization;

/// S3 presigned upload URLs
pub mod media_storage;

/// Handler modules
pub mod routes;

/// Server assembly and lifecycle
pub mod server;

/// Application state
pub mod state;

/// Configuration and universal error handling
pub mod types;
