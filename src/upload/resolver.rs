//! Destination path resolution for accepted uploads.
//!
//! Files are placed in a dated hierarchy below the upload root:
//! ```text
//! {upload_root}/
//! └── site1/                  project
//!     └── banner/             category
//!         └── 20241017/       day, in the configured timezone
//!             ├── 1729166400000.png
//!             └── 1729166400001.jpg
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::datetime::date_segment;

/// Hands out strictly increasing millisecond epoch stamps.
///
/// Two calls within the same millisecond get consecutive values, so file
/// names derived from stamps never collide inside one process. Writers in
/// other processes are handled at placement time.
#[derive(Debug, Default)]
pub struct StampAllocator {
    last: AtomicI64,
}

impl StampAllocator {
    /// Create an allocator with no stamps issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next stamp: `max(now_ms, previous + 1)`.
    pub fn next(&self, now_ms: i64) -> i64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(current.saturating_add(1));
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }
}

/// Computes final storage paths and creates their directories.
#[derive(Debug, Clone)]
pub struct PathResolver {
    upload_root: PathBuf,
    tz: Tz,
    stamps: Arc<StampAllocator>,
}

impl PathResolver {
    /// Create a resolver rooted at `upload_root`.
    pub fn new(upload_root: impl Into<PathBuf>, tz: Tz) -> Self {
        Self {
            upload_root: upload_root.into(),
            tz,
            stamps: Arc::new(StampAllocator::new()),
        }
    }

    /// Root of the upload hierarchy.
    pub fn upload_root(&self) -> &Path {
        &self.upload_root
    }

    /// Directory for a project/category on the day of `at`.
    pub fn day_dir(&self, project: &str, category: &str, at: &DateTime<Utc>) -> PathBuf {
        self.upload_root
            .join(project)
            .join(category)
            .join(date_segment(at, &self.tz))
    }

    /// Resolve `<root>/<project>/<category>/<YYYYMMDD>/<stamp><extension>`.
    ///
    /// The day directory is created if missing; concurrent creation of the
    /// same directory is not an error.
    pub async fn resolve(
        &self,
        project: &str,
        category: &str,
        extension: &str,
        now: DateTime<Utc>,
    ) -> io::Result<PathBuf> {
        let stamp = self.stamps.next(now.timestamp_millis());
        let at = DateTime::from_timestamp_millis(stamp).unwrap_or(now);

        let dir = self.day_dir(project, category, &at);
        tokio::fs::create_dir_all(&dir).await?;

        Ok(dir.join(format!("{stamp}{extension}")))
    }

    /// Path of `path` relative to the upload root, with `/` separators.
    ///
    /// Paths outside the root are returned unchanged.
    pub fn relative(&self, path: &Path) -> String {
        let Ok(rel) = path.strip_prefix(&self.upload_root) else {
            return path.to_string_lossy().into_owned();
        };
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
