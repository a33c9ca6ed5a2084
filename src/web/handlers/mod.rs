//! API handlers for the upload service.

pub mod upload;

pub use upload::*;

use crate::upload::UploadPipeline;
use crate::web::staging::Stager;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Validation and placement pipeline.
    pub pipeline: UploadPipeline,
    /// Writes incoming file parts to the staging area.
    pub stager: Stager,
}

impl AppState {
    /// Create a new application state.
    pub fn new(pipeline: UploadPipeline, stager: Stager) -> Self {
        Self { pipeline, stager }
    }
}
