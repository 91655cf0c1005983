// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Display-ready project fields.
//!
//! Cards and table rows are two encodings of the same record, so both are
//! built from one [`DisplayFields`] value.

use crate::models::project::{Project, ProjectId};
use crate::util::format::{format_date, or_placeholder, slug, NO_NOTES, PLACEHOLDER};

/// Every project field shown by either presentation, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields {
    pub name: String,
    pub status: String,
    pub status_slug: String,
    pub priority: String,
    pub priority_slug: String,
    pub project_type: String,
    pub start_date: String,
    pub due_date: String,
    pub category: String,
    pub completion: u8,
    pub notes: String,
    pub objective: String,
    pub upcoming_actions: String,
}

impl DisplayFields {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            status: project.status.as_str().to_string(),
            status_slug: slug(project.status.as_str()),
            priority: project.priority.as_str().to_string(),
            priority_slug: slug(project.priority.as_str()),
            project_type: or_placeholder(&project.project_type, PLACEHOLDER),
            start_date: format_date(project.start_date),
            due_date: format_date(project.due_date),
            category: or_placeholder(project.category.as_deref().unwrap_or(""), PLACEHOLDER),
            completion: project.completion,
            notes: or_placeholder(&project.notes, NO_NOTES),
            objective: or_placeholder(&project.objective, NO_NOTES),
            upcoming_actions: or_placeholder(&project.upcoming_actions, NO_NOTES),
        }
    }
}

/// Card grid entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub project_id: ProjectId,
    pub visible: bool,
    pub fields: DisplayFields,
}

impl Card {
    pub fn progress_label(&self) -> String {
        format!("{}% Complete", self.fields.completion)
    }
}

/// Table row entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub project_id: ProjectId,
    pub visible: bool,
    pub fields: DisplayFields,
}

impl Row {
    pub fn progress_label(&self) -> String {
        format!("{}%", self.fields.completion)
    }
}
