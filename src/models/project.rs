// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project records and the read-only project store.
//!
//! Projects are supplied by an external data file and never mutated by the
//! dashboard. Identifiers may arrive as JSON integers or strings; both are
//! normalized to their string form.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Stable identifier of a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawProjectId")]
pub struct ProjectId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProjectId {
    Int(i64),
    Str(String),
}

impl From<RawProjectId> for ProjectId {
    fn from(raw: RawProjectId) -> Self {
        match raw {
            RawProjectId::Int(n) => Self(n.to_string()),
            RawProjectId::Str(s) => Self(s),
        }
    }
}

impl Serialize for ProjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i32> for ProjectId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

/// Project status. Open-ended: unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Ongoing,
    Completed,
    Other(String),
}

impl Status {
    /// Canonical label, case preserved.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Ongoing => "Ongoing",
            Status::Completed => "Completed",
            Status::Other(label) => label,
        }
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Ongoing" => Status::Ongoing,
            "Completed" => Status::Completed,
            _ => Status::Other(label),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered priority category. Unknown labels sort after the known ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Other(label) => label,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
            Priority::Other(_) => 3,
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.as_str().cmp(other.as_str()))
    }
}

impl From<String> for Priority {
    fn from(label: String) -> Self {
        match label.as_str() {
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            "Low" => Priority::Low,
            _ => Priority::Other(label),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub project_type: String,
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    /// Percent complete, clamped to 0..=100 on load.
    #[serde(default, deserialize_with = "deserialize_completion")]
    pub completion: u8,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub upcoming_actions: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl Project {
    /// Minimal project with empty free-text fields, mostly for tests and fixtures.
    pub fn new(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        project_type: impl Into<String>,
        status: Status,
        completion: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            project_type: project_type.into(),
            status,
            priority: Priority::default(),
            completion: completion.min(100),
            start_date: None,
            due_date: None,
            notes: String::new(),
            objective: String::new(),
            upcoming_actions: String::new(),
            category: None,
        }
    }
}

fn deserialize_completion<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Err(serde::de::Error::custom("completion must be a number"));
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

fn deserialize_optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => {
            // Accept full timestamps by keeping only the calendar date part.
            let date_part = text.get(..10).unwrap_or(text);
            match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                Ok(date) => Ok(Some(date)),
                Err(e) => {
                    // Shown as a placeholder rather than rejecting the project.
                    log::warn!("Ignoring unparsable date '{}': {}", text, e);
                    Ok(None)
                }
            }
        }
    }
}

/// Read-only, ordered collection of projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    index: HashMap<ProjectId, usize>,
}

impl ProjectStore {
    /// Build a store, rejecting duplicate identifiers.
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        let mut index = HashMap::with_capacity(projects.len());
        for (position, project) in projects.iter().enumerate() {
            if index.insert(project.id.clone(), position).is_some() {
                bail!("duplicate project id '{}'", project.id);
            }
        }
        Ok(Self { projects, index })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.index.get(id).map(|&position| &self.projects[position])
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Distinct status labels in first-seen order.
    pub fn statuses(&self) -> Vec<String> {
        distinct(self.projects.iter().map(|p| p.status.as_str()))
    }

    /// Distinct project types in first-seen order.
    pub fn types(&self) -> Vec<String> {
        distinct(self.projects.iter().map(|p| p.project_type.as_str()))
    }
}

fn distinct<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for label in labels {
        if !label.is_empty() && !seen.iter().any(|s| s == label) {
            seen.push(label.to_string());
        }
    }
    seen
}
