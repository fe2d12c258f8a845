//! Saved mappings for reuse across imports.
//!
//! Only manual bindings are stored: auto-mapping recomputes everything
//! else from the next file's headers. Files are named `{profile}.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MappingError;
use crate::mapper::FieldMapper;

/// Directory of saved mappings, one JSON file per profile.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    base_dir: PathBuf,
}

/// Manual bindings of one profile as saved on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMapping {
    pub profile: String,
    /// Target field -> chosen header (`None` = explicitly unbound).
    pub bindings: BTreeMap<String, Option<String>>,
    pub saved_at: DateTime<Utc>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl SavedMapping {
    /// Captures the manual bindings of a mapper.
    pub fn from_mapper(profile: &str, mapper: &FieldMapper) -> Self {
        let bindings = mapper
            .fields()
            .iter()
            .filter(|field| field.manual)
            .map(|field| (field.target.clone(), field.source_column.clone()))
            .collect();
        Self {
            profile: profile.to_string(),
            bindings,
            saved_at: Utc::now(),
            version: default_version(),
        }
    }

    /// Re-applies saved bindings to a mapper that has already seen headers.
    ///
    /// Bindings whose header is absent from the current file are skipped and
    /// returned so the caller can report them.
    pub fn apply(&self, mapper: &mut FieldMapper) -> Vec<String> {
        let mut skipped = Vec::new();
        for (target, header) in &self.bindings {
            match mapper.set_mapping_by_target(target, header.as_deref()) {
                Ok(()) => {}
                Err(MappingError::ColumnNotFound(_) | MappingError::UnknownField(_)) => {
                    skipped.push(target.clone());
                }
                Err(err) => {
                    tracing::warn!(
                        target_field = %target,
                        error = %err,
                        "saved binding not applied"
                    );
                    skipped.push(target.clone());
                }
            }
        }
        skipped
    }
}

impl MappingRepository {
    /// Create a new mapping repository at the given directory.
    ///
    /// The directory will be created if it doesn't exist.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!(
                "Failed to create mapping repository: {}",
                base_dir.display()
            )
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Save the manual bindings of `mapper` for `profile`.
    pub fn save(&self, profile: &str, mapper: &FieldMapper) -> Result<PathBuf> {
        let saved = SavedMapping::from_mapper(profile, mapper);
        let path = self.path_for(profile);
        let json = serde_json::to_string_pretty(&saved)
            .with_context(|| format!("Failed to serialize mapping for {profile}"))?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write mapping to {}", path.display()))?;
        tracing::info!(
            profile,
            path = %path.display(),
            bindings = saved.bindings.len(),
            "saved mapping"
        );
        Ok(path)
    }

    /// Load the saved mapping for a profile.
    ///
    /// Returns `None` if no mapping exists.
    pub fn load(&self, profile: &str) -> Result<Option<SavedMapping>> {
        let path = self.path_for(profile);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read mapping from {}", path.display()))?;
        let saved: SavedMapping = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse mapping from {}", path.display()))?;
        Ok(Some(saved))
    }

    /// Delete a saved mapping. Returns whether one existed.
    pub fn delete(&self, profile: &str) -> Result<bool> {
        let path = self.path_for(profile);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete mapping: {}", path.display()))?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn exists(&self, profile: &str) -> bool {
        self.path_for(profile).exists()
    }

    fn path_for(&self, profile: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", normalize_id(profile)))
    }
}

/// Normalize an ID for use in filenames.
fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
