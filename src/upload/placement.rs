//! Moves accepted files out of the staging area.

use std::io;
use std::path::Path;

/// Move `temp_path` to `final_path` without ever replacing an existing file.
///
/// The destination is claimed with a hard link, which fails atomically with
/// [`io::ErrorKind::AlreadyExists`] when another writer got there first; the
/// staging entry is removed afterwards. Staging and upload roots must share a
/// volume, so a cross-device move fails like any other I/O error.
pub async fn place(temp_path: &Path, final_path: &Path) -> io::Result<()> {
    tokio::fs::hard_link(temp_path, final_path).await?;

    if let Err(e) = tokio::fs::remove_file(temp_path).await {
        // Leave the staging file as the single copy.
        if let Err(undo) = tokio::fs::remove_file(final_path).await {
            tracing::warn!(
                error = %undo,
                path = %final_path.display(),
                "Failed to roll back placed file"
            );
        }
        return Err(e);
    }

    Ok(())
}
