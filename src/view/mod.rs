// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Presentation model for the dashboard.
//!
//! The renderer keeps both presentations (card grid and table) built for
//! every project, keyed by project id, with hidden entries flagged rather
//! than removed. Only the active one is pushed to a [`RenderTarget`]. Media
//! regions are kept per project so an upload refreshes exactly one of them.

pub mod fields;

use crate::engine::stats::Stats;
use crate::models::media::ProjectMedia;
use crate::models::project::{Project, ProjectId};
use std::collections::HashMap;

pub use fields::{Card, DisplayFields, Row};

/// Shown when no project passes the filters.
pub const NO_RESULTS: &str = "No projects found matching your criteria.";

/// Which presentation is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Cards => ViewMode::Table,
            ViewMode::Table => ViewMode::Cards,
        }
    }

    /// Label of the toggle control: it names the view it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ViewMode::Cards => "📋 Table View",
            ViewMode::Table => "📊 Card View",
        }
    }
}

/// A project's media block.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRegion {
    pub media: ProjectMedia,
    /// Bumped on every refresh so painters can drop cached thumbnails.
    pub revision: u64,
}

static EMPTY_REGION: MediaRegion = MediaRegion {
    media: ProjectMedia {
        screenshots: Vec::new(),
        videos: Vec::new(),
    },
    revision: 0,
};

/// Output port the renderer draws into.
pub trait RenderTarget {
    fn stats(&mut self, stats: &Stats);

    fn card(&mut self, card: &Card, media: &MediaRegion);

    fn table(&mut self, rows: &[(&Row, &MediaRegion)]);

    fn no_results(&mut self, message: &str);
}

#[derive(Debug, Clone)]
struct Entry {
    card: Card,
    row: Row,
}

/// Holds the built presentations and the active view mode.
#[derive(Debug, Default)]
pub struct ViewRenderer {
    mode: ViewMode,
    entries: Vec<Entry>,
    stats: Stats,
    media: HashMap<ProjectId, MediaRegion>,
}

impl ViewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> ViewMode {
        self.mode
    }

    pub fn set_active_view(&mut self, mode: ViewMode) {
        if self.mode != mode {
            log::debug!("Switching to {:?} view", mode);
        }
        self.mode = mode;
    }

    pub fn toggle(&mut self) -> ViewMode {
        self.set_active_view(self.mode.toggled());
        self.mode
    }

    /// Rebuild both presentations from the projects and their visibility.
    pub fn render(&mut self, projects: &[Project], visibility: &[bool]) {
        debug_assert_eq!(projects.len(), visibility.len());
        self.entries = projects
            .iter()
            .zip(visibility.iter().copied().chain(std::iter::repeat(false)))
            .map(|(project, visible)| {
                let fields = DisplayFields::from_project(project);
                Entry {
                    card: Card {
                        project_id: project.id.clone(),
                        visible,
                        fields: fields.clone(),
                    },
                    row: Row {
                        project_id: project.id.clone(),
                        visible,
                        fields,
                    },
                }
            })
            .collect();
    }

    pub fn render_stats(&mut self, stats: Stats) {
        self.stats = stats;
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Every card, hidden ones included, in store order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.entries.iter().map(|e| &e.card)
    }

    /// Every row, hidden ones included, in store order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.entries.iter().map(|e| &e.row)
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.card.visible).count()
    }

    /// Replace one project's media block, leaving all others untouched.
    pub fn refresh_media(&mut self, project_id: &ProjectId, media: ProjectMedia) {
        let region = self
            .media
            .entry(project_id.clone())
            .or_insert_with(|| EMPTY_REGION.clone());
        region.media = media;
        region.revision += 1;
    }

    pub fn media_region(&self, project_id: &ProjectId) -> &MediaRegion {
        self.media.get(project_id).unwrap_or(&EMPTY_REGION)
    }

    #[cfg(test)]
    pub fn present(&self, target: &mut dyn RenderTarget) {
        self.present_stats(target);
        self.present_view(target);
    }

    pub fn present_stats(&self, target: &mut dyn RenderTarget) {
        target.stats(&self.stats);
    }

    /// Push the visible entries of the active presentation.
    pub fn present_view(&self, target: &mut dyn RenderTarget) {
        if self.visible_count() == 0 {
            target.no_results(NO_RESULTS);
            return;
        }

        match self.mode {
            ViewMode::Cards => {
                for card in self.cards().filter(|c| c.visible) {
                    target.card(card, self.media_region(&card.project_id));
                }
            }
            ViewMode::Table => {
                let rows: Vec<_> = self
                    .rows()
                    .filter(|r| r.visible)
                    .map(|r| (r, self.media_region(&r.project_id)))
                    .collect();
                target.table(&rows);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records everything presented as plain text lines.
    #[derive(Debug, Default)]
    pub struct RecordingTarget {
        pub lines: Vec<String>,
    }

    impl RenderTarget for RecordingTarget {
        fn stats(&mut self, stats: &Stats) {
            self.lines.push(format!(
                "stats total={} completed={} ongoing={} avg={}%",
                stats.total, stats.completed, stats.ongoing, stats.avg_completion
            ));
        }

        fn card(&mut self, card: &Card, media: &MediaRegion) {
            self.lines.push(format!(
                "card {} {} {} media={}",
                card.project_id,
                card.fields.name,
                card.progress_label(),
                media.media.len()
            ));
        }

        fn table(&mut self, rows: &[(&Row, &MediaRegion)]) {
            for (row, media) in rows {
                self.lines.push(format!(
                    "row {} {} {} media={}",
                    row.project_id,
                    row.fields.name,
                    row.progress_label(),
                    media.media.len()
                ));
            }
        }

        fn no_results(&mut self, message: &str) {
            self.lines.push(message.to_string());
        }
    }
}
