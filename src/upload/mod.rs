//! Upload validation and storage placement.
//!
//! A request flows through these stages:
//! - [`constraints::parse`] validates the request-level fields
//! - [`validator::validate`] classifies each staged file
//! - [`PathResolver`] picks a dated, collision-free destination
//! - [`placement::place`] moves the file out of staging
//! - [`response::aggregate`] assembles the [`ResponsePayload`]
//!
//! [`UploadPipeline`] runs all of them for one request.

mod catalog;
mod code;
pub mod constraints;
mod pipeline;
pub mod placement;
mod request;
pub mod resolver;
pub mod response;
pub mod validator;

pub use catalog::{CatalogError, MessageCatalog, DEFAULT_LOCALE};
pub use code::ResultCode;
pub use constraints::Constraints;
pub use pipeline::UploadPipeline;
pub use request::{RawFields, StagedFile, UploadRequest};
pub use resolver::{PathResolver, StampAllocator};
pub use response::{ItemOutcome, PlacementResult, ResponsePayload};
pub use validator::ValidationOutcome;
