//! JSON-file sink.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{AutosaveError, Result};
use crate::saveable::Saveable;
use crate::saver::Saver;

/// Sink that serializes content as pretty-printed JSON to a local file.
///
/// Each save overwrites the file in place. Intermediate directories are
/// created automatically.
///
/// # Example
///
/// ```rust,no_run
/// use autosave::JsonFileSaver;
///
/// let saver = JsonFileSaver::new("/var/data/drafts/session-42.json");
/// ```
pub struct JsonFileSaver {
    path: PathBuf,
}

impl JsonFileSaver {
    /// Create a new `JsonFileSaver` writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl<C> Saver<C> for JsonFileSaver
where
    C: Saveable + Serialize,
{
    async fn save(&self, content: &C) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(content)
            .map_err(|e| AutosaveError::SaveFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AutosaveError::SaveFailed(e.to_string()))?;
        }

        tokio::fs::write(&self.path, &bytes)
            .await
            .map_err(|e| AutosaveError::SaveFailed(e.to_string()))?;

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}
