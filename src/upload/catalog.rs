//! Read-only message catalog mapping result codes to caller-facing text.
//!
//! Catalogs are TOML files with a single `[messages]` table keyed by the
//! numeric code:
//!
//! ```toml
//! [messages]
//! "0" = "Success"
//! "50001" = "File exceeds the size limit"
//! ```
//!
//! Codes missing from a loaded catalog fall back to the built-in English text.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::ResultCode;

/// Locale of the built-in catalog.
pub const DEFAULT_LOCALE: &str = "en";

/// Catalog-related errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read catalog file.
    #[error("failed to read catalog file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Catalog file for the locale does not exist.
    #[error("catalog not found for locale: {0}")]
    LocaleNotFound(String),

    /// Catalog key is not a known result code.
    #[error("unknown result code in catalog: {0}")]
    UnknownCode(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    messages: HashMap<String, String>,
}

/// Code-to-message lookup table.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: String,
    messages: HashMap<ResultCode, String>,
}

impl MessageCatalog {
    /// Built-in English catalog.
    pub fn builtin() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            messages: ResultCode::ALL
                .into_iter()
                .map(|code| (code, fallback(code).to_string()))
                .collect(),
        }
    }

    /// Load `<locale>.toml` from `dir`.
    pub fn load<P: AsRef<Path>>(locale: &str, dir: P) -> Result<Self, CatalogError> {
        let path = dir.as_ref().join(format!("{locale}.toml"));

        if !path.exists() {
            return Err(CatalogError::LocaleNotFound(locale.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        Self::parse(locale, &content)
    }

    /// Load a catalog, falling back to the built-in one when the locale file is missing.
    pub fn load_or_builtin<P: AsRef<Path>>(locale: &str, dir: P) -> Result<Self, CatalogError> {
        match Self::load(locale, dir) {
            Ok(catalog) => Ok(catalog),
            Err(CatalogError::LocaleNotFound(missing)) => {
                tracing::warn!("Catalog for locale '{}' not found, using built-in", missing);
                Ok(Self::builtin())
            }
            Err(e) => Err(e),
        }
    }

    /// Parse a catalog from a TOML string.
    pub fn parse(locale: &str, content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;

        let mut messages = HashMap::with_capacity(file.messages.len());
        for (key, text) in file.messages {
            let code = key
                .trim()
                .parse::<u32>()
                .ok()
                .and_then(ResultCode::from_u32)
                .ok_or_else(|| CatalogError::UnknownCode(key.clone()))?;
            messages.insert(code, text);
        }

        Ok(Self {
            locale: locale.to_string(),
            messages,
        })
    }

    /// Locale of this catalog.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Message for `code`.
    pub fn message(&self, code: ResultCode) -> &str {
        self.messages
            .get(&code)
            .map(String::as_str)
            .unwrap_or_else(|| fallback(code))
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn fallback(code: ResultCode) -> &'static str {
    match code {
        ResultCode::Success => "Success",
        ResultCode::MissingFields => "Request fields are missing",
        ResultCode::InvalidFields => "A required field is missing or invalid",
        ResultCode::FileTooLarge => "File exceeds the size limit",
        ResultCode::UnsupportedType => "File type is not allowed",
        ResultCode::NoFiles => "No files were uploaded",
        ResultCode::PlacementFailed => "Failed to store the file",
        ResultCode::StagingFailed => "Failed to receive the upload",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_covers_every_code() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.locale(), "en");
        for code in ResultCode::ALL {
            assert!(!catalog.message(code).is_empty());
        }
    }

    #[test]
    fn test_parse() {
        let catalog = MessageCatalog::parse(
            "zh",
            r#"
[messages]
"0" = "成功"
"50001" = "文件过大"
"#,
        )
        .unwrap();

        assert_eq!(catalog.locale(), "zh");
        assert_eq!(catalog.message(ResultCode::Success), "成功");
        assert_eq!(catalog.message(ResultCode::FileTooLarge), "文件过大");
        // Missing entry falls back to English
        assert_eq!(
            catalog.message(ResultCode::NoFiles),
            "No files were uploaded"
        );
    }

    #[test]
    fn test_parse_unknown_code() {
        let result = MessageCatalog::parse("en", "[messages]\n\"12345\" = \"nope\"\n");
        assert!(matches!(result, Err(CatalogError::UnknownCode(_))));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = MessageCatalog::parse("en", "[messages\n");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("en.toml"),
            "[messages]\n\"50002\" = \"Only images please\"\n",
        )
        .unwrap();

        let catalog = MessageCatalog::load("en", dir.path()).unwrap();
        assert_eq!(
            catalog.message(ResultCode::UnsupportedType),
            "Only images please"
        );
    }

    #[test]
    fn test_load_missing_locale() {
        let dir = TempDir::new().unwrap();
        let result = MessageCatalog::load("fr", dir.path());
        assert!(matches!(result, Err(CatalogError::LocaleNotFound(_))));
    }

    #[test]
    fn test_load_or_builtin_falls_back() {
        let dir = TempDir::new().unwrap();
        let catalog = MessageCatalog::load_or_builtin("fr", dir.path()).unwrap();
        assert_eq!(catalog.locale(), "en");
    }

    #[test]
    fn test_shipped_catalogs_parse() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("locales");
        for locale in ["en", "zh"] {
            let catalog = MessageCatalog::load(locale, &root).unwrap();
            for code in ResultCode::ALL {
                assert!(!catalog.message(code).is_empty());
            }
        }
    }
}
