// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project list import and media export.
//!
//! Project data arrives as JSON or YAML, either a bare list or an object
//! with a `projects` list. A project's media can be exported to either
//! format as a backup.

use crate::models::{media::ProjectMedia, project::Project};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Object form of a project file.
#[derive(Deserialize)]
struct WrappedProjects {
    projects: Vec<Project>,
}

/// Top-level shape of a project file, checked before the real parse so that
/// errors point at the failing field.
enum Shape {
    List,
    Wrapped,
}

fn shape_of(is_array: bool, is_object: bool) -> Result<Shape> {
    match (is_array, is_object) {
        (true, _) => Ok(Shape::List),
        (_, true) => Ok(Shape::Wrapped),
        _ => bail!("Expected a list of projects or an object with a `projects` list"),
    }
}

/// Supported file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => bail!("Unsupported file extension: {:?}", extension),
        }
    }
}

/// Parse a project list from JSON text.
pub fn parse_projects_json(text: &str) -> Result<Vec<Project>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let projects = match shape_of(value.is_array(), value.is_object())? {
        Shape::List => serde_json::from_str(text)?,
        Shape::Wrapped => serde_json::from_str::<WrappedProjects>(text)?.projects,
    };
    Ok(projects)
}

/// Parse a project list from YAML text.
pub fn parse_projects_yaml(text: &str) -> Result<Vec<Project>> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    let projects = match shape_of(value.is_sequence(), value.is_mapping())? {
        Shape::List => serde_yaml::from_str(text)?,
        Shape::Wrapped => serde_yaml::from_str::<WrappedProjects>(text)?.projects,
    };
    Ok(projects)
}

/// Import the project list from a JSON or YAML file.
pub fn import_projects(path: &Path) -> Result<Vec<Project>> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let projects = match format {
        Format::Json => parse_projects_json(&text),
        Format::Yaml => parse_projects_yaml(&text),
    }
    .with_context(|| format!("Failed to parse {}", path.display()))?;
    log::info!("Imported {} projects from {}", projects.len(), path.display());
    Ok(projects)
}

/// Export one project's media to a JSON or YAML file.
pub fn export_media(media: &ProjectMedia, path: &Path) -> Result<()> {
    let text = match Format::from_path(path)? {
        Format::Json => serde_json::to_string_pretty(media)?,
        Format::Yaml => serde_yaml::to_string(media)?,
    };
    std::fs::write(path, text)?;
    Ok(())
}
