//! Import profiles: built-ins plus JSON files from a profiles directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glee_model::{ImportProfile, builtin_profiles};

/// Built-in profiles, overridden or extended by `*.json` files in `dir`.
///
/// A file whose profile name matches a built-in (case-insensitively)
/// replaces it; any other name is appended.
pub fn load_profiles(dir: Option<&Path>) -> Result<Vec<ImportProfile>> {
    let mut profiles = builtin_profiles();
    let Some(dir) = dir else {
        return Ok(profiles);
    };
    for path in profile_files(dir)? {
        let profile = read_profile(&path)?;
        match profiles
            .iter_mut()
            .find(|existing| existing.name.eq_ignore_ascii_case(&profile.name))
        {
            Some(existing) => {
                tracing::info!(
                    profile = %profile.name,
                    path = %path.display(),
                    "profile overridden"
                );
                *existing = profile;
            }
            None => {
                tracing::info!(
                    profile = %profile.name,
                    path = %path.display(),
                    "profile loaded"
                );
                profiles.push(profile);
            }
        }
    }
    Ok(profiles)
}

/// Reads and checks one profile file.
pub fn read_profile(path: &Path) -> Result<ImportProfile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile: ImportProfile = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse profile {}", path.display()))?;
    profile
        .validate()
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(profile)
}

fn profile_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read profiles directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list {}", dir.display()))?
            .path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
