//! OpenAPI document for the upload API.

use utoipa::OpenApi;

use crate::upload::{PlacementResult, ResponsePayload};
use crate::web::handlers::UploadForm;

/// OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(title = "depot", description = "Multipart upload and storage placement API"),
    paths(crate::web::handlers::upload::upload),
    components(schemas(ResponsePayload, PlacementResult, UploadForm)),
    tags((name = "upload", description = "File upload"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_upload_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/upload"));
    }
}
