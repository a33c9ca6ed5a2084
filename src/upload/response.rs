//! Result aggregation and the response payload.

use serde::Serialize;
use utoipa::ToSchema;

use super::{MessageCatalog, ResultCode};

/// Per-file result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PlacementResult {
    /// Whether the file was stored.
    pub success: bool,
    /// Catalog message for the item outcome.
    pub message: String,
    /// Stored path relative to the upload root; empty on failure.
    pub path: String,
}

/// Response body returned for every upload request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ResponsePayload {
    /// Request-level result code.
    #[schema(value_type = u32, example = 0)]
    pub code: ResultCode,
    /// Catalog message for `code`.
    pub message: String,
    /// One entry per submitted file, in submission order. Absent when the
    /// request was rejected before any file was looked at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<PlacementResult>>,
}

impl ResponsePayload {
    /// Payload for a request rejected before per-file processing.
    pub fn rejected(catalog: &MessageCatalog, code: ResultCode) -> Self {
        Self {
            code,
            message: catalog.message(code).to_string(),
            data: None,
        }
    }

    /// Whether the request itself was well-formed.
    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Per-file results, empty for rejected requests.
    pub fn items(&self) -> &[PlacementResult] {
        self.data.as_deref().unwrap_or_default()
    }
}

/// Terminal state of one submitted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Stored at this path (relative to the upload root).
    Placed(String),
    /// Rejected by validation, or failed during placement.
    Failed(ResultCode),
}

/// Build the payload for a well-formed request.
///
/// `outcomes` must be in submission order; the output keeps that order.
pub fn aggregate(catalog: &MessageCatalog, outcomes: Vec<ItemOutcome>) -> ResponsePayload {
    let data = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            ItemOutcome::Placed(path) => PlacementResult {
                success: true,
                message: catalog.message(ResultCode::Success).to_string(),
                path,
            },
            ItemOutcome::Failed(code) => PlacementResult {
                success: false,
                message: catalog.message(code).to_string(),
                path: String::new(),
            },
        })
        .collect();

    ResponsePayload {
        code: ResultCode::Success,
        message: catalog.message(ResultCode::Success).to_string(),
        data: Some(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_aggregate_preserves_order() {
        let catalog = MessageCatalog::builtin();
        let payload = aggregate(
            &catalog,
            vec![
                ItemOutcome::Placed("p/c/20241017/1.png".to_string()),
                ItemOutcome::Failed(ResultCode::FileTooLarge),
                ItemOutcome::Placed("p/c/20241017/2.png".to_string()),
            ],
        );

        assert!(payload.is_success());
        let items = payload.items();
        assert_eq!(items.len(), 3);
        assert!(items[0].success);
        assert_eq!(items[0].path, "p/c/20241017/1.png");
        assert!(!items[1].success);
        assert_eq!(items[1].message, catalog.message(ResultCode::FileTooLarge));
        assert_eq!(items[1].path, "");
        assert_eq!(items[2].path, "p/c/20241017/2.png");
    }

    #[test]
    fn test_all_rejected_is_still_success() {
        let catalog = MessageCatalog::builtin();
        let payload = aggregate(
            &catalog,
            vec![ItemOutcome::Failed(ResultCode::UnsupportedType)],
        );
        assert_eq!(payload.code, ResultCode::Success);
        assert!(payload.items().iter().all(|i| !i.success));
    }

    #[test]
    fn test_rejected_payload_has_no_data() {
        let catalog = MessageCatalog::builtin();
        let payload = ResponsePayload::rejected(&catalog, ResultCode::NoFiles);

        assert!(!payload.is_success());
        assert!(payload.items().is_empty());

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({ "code": 50003, "message": "No files were uploaded" })
        );
    }

    #[test]
    fn test_serialized_shape() {
        let catalog = MessageCatalog::builtin();
        let payload = aggregate(
            &catalog,
            vec![ItemOutcome::Placed("a/b/20240101/5.jpg".to_string())],
        );

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "code": 0,
                "message": "Success",
                "data": [
                    { "success": true, "message": "Success", "path": "a/b/20240101/5.jpg" }
                ]
            })
        );
    }
}
