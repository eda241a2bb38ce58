//! Mystery loading.
//!
//! Scenarios live as JSON files in a mystery directory, one file per
//! mystery id. Loading failure is a hard error surfaced to the caller.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use inquest_core::error::GameError;
use serde::Serialize;

use crate::model::Mystery;

/// Catalogue entry for one playable mystery.
#[derive(Debug, Clone, Serialize)]
pub struct MysterySummary {
    /// Mystery identifier (file stem).
    pub id: String,
    /// Scenario title.
    pub title: String,
    /// Number of suspects.
    pub characters: usize,
}

/// Supplies parsed `Mystery` values by identifier.
#[async_trait]
pub trait MysteryLoader: Send + Sync {
    /// Loads the mystery with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns `GameError::MysteryLoadFailure` if the mystery does not exist
    /// or its scenario file is malformed.
    async fn load(&self, mystery_id: &str) -> Result<Mystery, GameError>;

    /// Lists the available mysteries.
    ///
    /// # Errors
    ///
    /// Returns `GameError::MysteryLoadFailure` if the catalogue cannot be
    /// read at all. Individually malformed scenario files are skipped with
    /// a warning.
    async fn list(&self) -> Result<Vec<MysterySummary>, GameError>;
}

/// Loader reading `<dir>/<id>.json` scenario files.
#[derive(Debug, Clone)]
pub struct FileMysteryLoader {
    dir: PathBuf,
}

impl FileMysteryLoader {
    /// Creates a loader rooted at the given mystery directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Rejects identifiers that could escape the mystery directory.
    fn validate_id(mystery_id: &str) -> Result<(), GameError> {
        let ok = !mystery_id.is_empty()
            && mystery_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if ok {
            Ok(())
        } else {
            Err(GameError::MysteryLoadFailure(format!(
                "invalid mystery id: {mystery_id}"
            )))
        }
    }

    async fn read_mystery(path: &Path) -> Result<Mystery, GameError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| GameError::MysteryLoadFailure(format!("{}: {e}", path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| GameError::MysteryLoadFailure(format!("{}: {e}", path.display())))
    }
}

#[async_trait]
impl MysteryLoader for FileMysteryLoader {
    async fn load(&self, mystery_id: &str) -> Result<Mystery, GameError> {
        Self::validate_id(mystery_id)?;
        let path = self.dir.join(format!("{mystery_id}.json"));
        Self::read_mystery(&path).await
    }

    async fn list(&self) -> Result<Vec<MysterySummary>, GameError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| GameError::MysteryLoadFailure(format!("{}: {e}", self.dir.display())))?;

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| GameError::MysteryLoadFailure(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Self::read_mystery(&path).await {
                Ok(mystery) => summaries.push(MysterySummary {
                    id: id.to_owned(),
                    title: mystery.title,
                    characters: mystery.characters.len(),
                }),
                Err(err) => {
                    tracing::warn!(mystery_id = id, error = %err, "skipping unreadable mystery");
                }
            }
        }

        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }
}
