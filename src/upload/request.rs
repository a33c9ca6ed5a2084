//! Request snapshot handed to the pipeline by the HTTP layer.

use std::path::{Path, PathBuf};

/// Form fields exactly as the caller sent them, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    /// Project namespace segment.
    pub project: Option<String>,
    /// Category namespace segment.
    pub category: Option<String>,
    /// Maximum size in bytes, as text.
    pub max: Option<String>,
    /// Comma-separated list of accepted content types.
    pub ext: Option<String>,
}

impl RawFields {
    /// Set the project field.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Set the category field.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the size limit field.
    pub fn with_max(mut self, max: impl Into<String>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Set the accepted type list field.
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }
}

/// An uploaded file sitting in the staging area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Location in the staging area.
    pub temp_path: PathBuf,
    /// File name reported by the client, if any.
    pub original_name: Option<String>,
    /// Content type reported by the client or guessed by the HTTP layer.
    pub declared_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl StagedFile {
    /// Create a staged file record.
    pub fn new(temp_path: impl Into<PathBuf>, declared_type: impl Into<String>, size: u64) -> Self {
        Self {
            temp_path: temp_path.into(),
            original_name: None,
            declared_type: declared_type.into(),
            size,
        }
    }

    /// Attach the client-side file name.
    pub fn with_original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = Some(name.into());
        self
    }

    /// Extension including the leading dot, or an empty string.
    ///
    /// Taken from the client file name when it has one, otherwise from the
    /// staging path.
    pub fn extension(&self) -> String {
        self.original_name
            .as_deref()
            .and_then(|name| dotted_extension(Path::new(name)))
            .or_else(|| dotted_extension(&self.temp_path))
            .unwrap_or_default()
    }
}

fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
}

/// One inbound upload request.
///
/// `None` means the HTTP layer saw no form fields (or no file list) at all.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Declared form fields.
    pub fields: Option<RawFields>,
    /// Staged files in submission order.
    pub files: Option<Vec<StagedFile>>,
}

impl UploadRequest {
    /// Create a request from fields and staged files.
    pub fn new(fields: RawFields, files: Vec<StagedFile>) -> Self {
        Self {
            fields: Some(fields),
            files: Some(files),
        }
    }
}
