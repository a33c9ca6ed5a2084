//! Middleware for the upload API.

pub mod cors;

pub use cors::create_cors_layer;
