//! Multipart extraction and staging of uploaded bytes.
//!
//! Every file part is streamed to `{staging_root}/{uuid}{ext}` before the
//! pipeline sees it; text parts become [`RawFields`].

use std::io;
use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, Multipart, MultipartError};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::upload::{RawFields, StagedFile, UploadRequest};
use crate::Result;

/// Content type used when a part declares none and its name gives no hint.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Errors raised while reading and staging a multipart body.
#[derive(Error, Debug)]
pub enum StagingError {
    /// The body could not be parsed as multipart.
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    /// Writing to the staging area failed.
    #[error("staging I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Writes uploaded parts into the staging area.
#[derive(Debug, Clone)]
pub struct Stager {
    root: PathBuf,
}

impl Stager {
    /// Create a stager writing into `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a stager from storage configuration, creating the staging root.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.staging_path)?;
        Ok(Self::new(&config.staging_path))
    }

    /// Staging root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fresh staging path that keeps the client file's extension.
    pub fn staging_path(&self, original_name: Option<&str>) -> PathBuf {
        let ext = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty());

        let uuid = Uuid::new_v4();
        match ext {
            Some(ext) => self.root.join(format!("{uuid}.{ext}")),
            None => self.root.join(uuid.to_string()),
        }
    }

    /// Stream one file part to disk.
    pub async fn stage(&self, mut field: Field<'_>) -> std::result::Result<StagedFile, StagingError> {
        let original_name = field.file_name().map(str::to_string);
        let declared_type = declared_type(field.content_type(), original_name.as_deref());
        let temp_path = self.staging_path(original_name.as_deref());

        let mut file = tokio::fs::File::create(&temp_path).await?;
        let mut size: u64 = 0;

        let written: std::result::Result<(), StagingError> = async {
            while let Some(chunk) = field.chunk().await? {
                file.write_all(&chunk).await?;
                size += chunk.len() as u64;
            }
            file.flush().await?;
            Ok(())
        }
        .await;

        if let Err(e) = written {
            drop(file);
            self.discard(&temp_path).await;
            return Err(e);
        }

        tracing::debug!(
            path = %temp_path.display(),
            declared_type = %declared_type,
            size,
            "Staged upload"
        );

        let mut staged = StagedFile::new(temp_path, declared_type, size);
        staged.original_name = original_name;
        Ok(staged)
    }

    async fn discard(&self, temp_path: &Path) {
        if let Err(e) = tokio::fs::remove_file(temp_path).await {
            tracing::warn!(
                error = %e,
                path = %temp_path.display(),
                "Failed to remove staging file"
            );
        }
    }

    /// Read the whole multipart body into an [`UploadRequest`].
    ///
    /// Parts with a file name are staged as files, except a part with a blank
    /// name and no bytes, which counts as no file at all; `project`, `category`
    /// (alias `type`), `max` and `ext` are read as text. Other text parts are
    /// ignored.
    pub async fn read_request(
        &self,
        multipart: &mut Multipart,
    ) -> std::result::Result<UploadRequest, StagingError> {
        let mut fields: Option<RawFields> = None;
        let mut type_alias: Option<String> = None;
        let mut files: Option<Vec<StagedFile>> = None;

        while let Some(field) = multipart.next_field().await? {
            if let Some(file_name) = field.file_name() {
                let unnamed = file_name.trim().is_empty();
                let staged = self.stage(field).await?;
                if unnamed && staged.size == 0 {
                    // An empty file input submitted by a browser form.
                    self.discard(&staged.temp_path).await;
                    continue;
                }
                files.get_or_insert_with(Vec::new).push(staged);
                continue;
            }

            let name = field.name().unwrap_or("").to_string();
            let value = field.text().await?;
            let raw = fields.get_or_insert_with(RawFields::default);

            match name.as_str() {
                "project" => raw.project = Some(value),
                "category" => raw.category = Some(value),
                "type" => type_alias = Some(value),
                "max" => raw.max = Some(value),
                "ext" => raw.ext = Some(value),
                other => tracing::debug!("Ignoring unknown form field: {}", other),
            }
        }

        if let Some(raw) = fields.as_mut() {
            if raw.category.is_none() {
                raw.category = type_alias;
            }
        }

        Ok(UploadRequest { fields, files })
    }
}

/// Part content type, or a guess from the file name.
fn declared_type(content_type: Option<&str>, original_name: Option<&str>) -> String {
    if let Some(ct) = content_type.map(str::trim).filter(|ct| !ct.is_empty()) {
        return ct.to_string();
    }

    original_name
        .and_then(|name| mime_guess::from_path(name).first())
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}
