//! The upload pipeline: parse, validate, resolve, place, aggregate.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use futures::future::join_all;

use crate::config::StorageConfig;
use crate::Result;

use super::constraints::{self, Constraints};
use super::placement::place;
use super::resolver::PathResolver;
use super::response::{aggregate, ItemOutcome, ResponsePayload};
use super::validator::{validate, ValidationOutcome};
use super::{MessageCatalog, ResultCode, StagedFile, UploadRequest};

/// Names tried per file before placement is reported as failed.
///
/// Each retry takes a fresh stamp, so this only runs out when other writers
/// keep claiming the same names under one day directory.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 16;

/// Processes upload requests against one upload root.
///
/// Cheap to clone; clones share the catalog and the stamp allocator.
#[derive(Debug, Clone)]
pub struct UploadPipeline {
    resolver: PathResolver,
    catalog: Arc<MessageCatalog>,
}

impl UploadPipeline {
    /// Create a pipeline rooted at `upload_root`.
    pub fn new(upload_root: impl Into<PathBuf>, tz: Tz, catalog: Arc<MessageCatalog>) -> Self {
        Self {
            resolver: PathResolver::new(upload_root, tz),
            catalog,
        }
    }

    /// Create a pipeline from storage configuration.
    ///
    /// The upload root is created if it does not exist.
    pub fn from_config(config: &StorageConfig, catalog: Arc<MessageCatalog>) -> Result<Self> {
        let tz = config.tz()?;
        std::fs::create_dir_all(&config.upload_path)?;
        Ok(Self::new(&config.upload_path, tz, catalog))
    }

    /// The message catalog used for responses.
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// The path resolver.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Process a request using the current time.
    pub async fn process(&self, request: UploadRequest) -> ResponsePayload {
        self.process_at(request, Utc::now()).await
    }

    /// Process a request as if it arrived at `now`.
    pub async fn process_at(&self, request: UploadRequest, now: DateTime<Utc>) -> ResponsePayload {
        let UploadRequest { fields, files } = request;
        let constraints = match constraints::parse(fields.as_ref(), files.as_deref()) {
            Ok(c) => c,
            Err(code) => {
                tracing::info!(code = %code, "Upload request rejected");
                return ResponsePayload::rejected(&self.catalog, code);
            }
        };
        let files = files.unwrap_or_default();

        let outcomes: Vec<ValidationOutcome> =
            files.iter().map(|f| validate(&constraints, f)).collect();

        let items = join_all(
            files
                .iter()
                .zip(outcomes)
                .map(|(file, outcome)| self.settle(&constraints, file, outcome, now)),
        )
        .await;

        let accepted = items
            .iter()
            .filter(|i| matches!(i, ItemOutcome::Placed(_)))
            .count();
        tracing::info!(
            project = %constraints.project,
            category = %constraints.category,
            files = items.len(),
            accepted,
            "Upload request processed"
        );

        aggregate(&self.catalog, items)
    }

    async fn settle(
        &self,
        constraints: &Constraints,
        file: &StagedFile,
        outcome: ValidationOutcome,
        now: DateTime<Utc>,
    ) -> ItemOutcome {
        let temp_path = match outcome {
            ValidationOutcome::Accepted { temp_path } => temp_path,
            ValidationOutcome::Rejected { code } => {
                tracing::debug!(
                    file = %file.temp_path.display(),
                    declared_type = %file.declared_type,
                    size = file.size,
                    code = %code,
                    "File rejected"
                );
                return ItemOutcome::Failed(code);
            }
        };

        for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
            let final_path = match self
                .resolver
                .resolve(
                    &constraints.project,
                    &constraints.category,
                    &file.extension(),
                    now,
                )
                .await
            {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to prepare upload directory");
                    return ItemOutcome::Failed(ResultCode::PlacementFailed);
                }
            };

            match place(&temp_path, &final_path).await {
                Ok(()) => {
                    tracing::debug!(
                        from = %temp_path.display(),
                        to = %final_path.display(),
                        "File placed"
                    );
                    return ItemOutcome::Placed(self.resolver.relative(&final_path));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::debug!(
                        to = %final_path.display(),
                        attempt,
                        "Destination taken, resolving a new name"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        from = %temp_path.display(),
                        to = %final_path.display(),
                        "Failed to move staged file"
                    );
                    return ItemOutcome::Failed(ResultCode::PlacementFailed);
                }
            }
        }

        tracing::warn!(
            from = %temp_path.display(),
            attempts = MAX_PLACEMENT_ATTEMPTS,
            "No free destination name found"
        );
        ItemOutcome::Failed(ResultCode::PlacementFailed)
    }
}
