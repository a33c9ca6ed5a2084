//! depot - multipart upload validation and storage placement.
//!
//! Accepts uploads over HTTP, checks each file against caller-declared type
//! and size constraints, and moves accepted files into a
//! `<project>/<category>/<YYYYMMDD>/<stamp><ext>` hierarchy.

pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod upload;
pub mod web;

pub use config::Config;
pub use error::{DepotError, Result};
pub use upload::{
    MessageCatalog, PlacementResult, RawFields, ResponsePayload, ResultCode, StagedFile,
    UploadPipeline, UploadRequest,
};
pub use web::WebServer;
