// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ProjectFile, RawProjectFile};
use crate::errors::Result;

/// Read and deserialize a project file without semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawProjectFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_str(&contents)
}

/// Deserialize project TOML from a string.
pub fn parse_str(contents: &str) -> Result<RawProjectFile> {
    let raw: RawProjectFile = toml::from_str(contents)?;
    Ok(raw)
}

/// Load a project file and validate it.
///
/// Checks task ids, durations, unknown `after` references and the clock
/// scale. Dependency cycles are allowed through and logged.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let raw = load_from_path(&path)?;
    let project = ProjectFile::try_from(raw)?;
    Ok(project)
}

pub fn default_project_path() -> PathBuf {
    PathBuf::from("Taskplan.toml")
}
