// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Display formatting helpers.
//!
//! This module provides the text conversions shared by the card and table
//! presentations: dates, placeholders for missing fields and badge slugs.

use chrono::NaiveDate;

/// Shown in place of a missing date or category.
pub const PLACEHOLDER: &str = "N/A";

/// Shown in place of empty free-text fields.
pub const NO_NOTES: &str = "No notes yet.";

/// Format a date as `Jan 5, 2024`, or the placeholder when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// The text itself, or `placeholder` when it is blank.
pub fn or_placeholder(text: &str, placeholder: &str) -> String {
    if text.trim().is_empty() {
        placeholder.to_string()
    } else {
        text.to_string()
    }
}

/// Lowercase, dash-separated form of a label (`On Hold` -> `on-hold`).
pub fn slug(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
