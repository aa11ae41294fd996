/* src/core/rust/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Preferences;

pub const PREFERENCES_FILE: &str = "preferences.toml";

/// Nearest `preferences.toml` in `start` or one of its ancestors.
pub fn find_preferences(start: &Path) -> Result<PathBuf> {
  let start =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  start
    .ancestors()
    .map(|dir| dir.join(PREFERENCES_FILE))
    .find(|candidate| candidate.is_file())
    .with_context(|| format!("no {PREFERENCES_FILE} in {} or its parents", start.display()))
}

pub fn load_preferences(path: &Path) -> Result<Preferences> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  parse_preferences(&content).with_context(|| format!("invalid preferences in {}", path.display()))
}

pub fn parse_preferences(content: &str) -> Result<Preferences> {
  let preferences: Preferences = toml::from_str(content).context("failed to parse preferences")?;
  preferences.validate()?;
  Ok(preferences)
}
