//! HTTP layer for depot.
//!
//! Parses multipart bodies, stages uploaded bytes and hands the request
//! snapshot to the [`UploadPipeline`](crate::upload::UploadPipeline).

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;
pub mod staging;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
pub use staging::{Stager, StagingError};
