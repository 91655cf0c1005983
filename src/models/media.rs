// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media attached to projects.
//!
//! Every project owns two ordered sequences of media items, one for
//! screenshots and one for videos. The serialized form is the persisted
//! value stored per project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which sequence a media item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Screenshot,
    Video,
}

impl MediaKind {
    /// Classify a declared media type (`image/*` or `video/*`).
    pub fn from_mime(mime: &str) -> Option<Self> {
        let (top_level, subtype) = mime.trim().split_once('/')?;
        if subtype.trim().is_empty() {
            return None;
        }
        match top_level.trim().to_ascii_lowercase().as_str() {
            "image" => Some(MediaKind::Screenshot),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Screenshot => f.write_str("screenshot"),
            MediaKind::Video => f.write_str("video"),
        }
    }
}

/// A single uploaded screenshot or video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Original file name.
    pub name: String,
    /// Content reference, usually a `data:` URI.
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl MediaItem {
    /// New item stamped with the current time and an empty description.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: String::new(),
            timestamp: Utc::now(),
        }
    }
}

/// Screenshots and videos of one project, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMedia {
    #[serde(default)]
    pub screenshots: Vec<MediaItem>,
    #[serde(default)]
    pub videos: Vec<MediaItem>,
}

impl ProjectMedia {
    pub fn items(&self, kind: MediaKind) -> &[MediaItem] {
        match kind {
            MediaKind::Screenshot => &self.screenshots,
            MediaKind::Video => &self.videos,
        }
    }

    pub fn items_mut(&mut self, kind: MediaKind) -> &mut Vec<MediaItem> {
        match kind {
            MediaKind::Screenshot => &mut self.screenshots,
            MediaKind::Video => &mut self.videos,
        }
    }

    pub fn get(&self, kind: MediaKind, index: usize) -> Option<&MediaItem> {
        self.items(kind).get(index)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.screenshots.len() + self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screenshots.is_empty() && self.videos.is_empty()
    }
}
