// src/config/mod.rs

//! Project file loading and validation.
//!
//! - `model.rs`: TOML-backed data model.
//! - `loader.rs`: read a project file from disk or a string.
//! - `validate.rs`: `RawProjectFile` -> `ProjectFile` checks.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_project_path, load_and_validate, load_from_path, parse_str};
pub use model::{ConfigSection, ProjectFile, ProjectSection, RawProjectFile, TaskConfig};
