// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the dashboard.
//!
//! Painters never touch dashboard state directly: they report what the user
//! did as [`UiAction`]s, which the app turns into dashboard events.

pub mod cards;
pub mod media;
pub mod properties;
pub mod table;
pub mod toolbar;

use crate::dashboard::DashboardEvent;
use crate::engine::stats::Stats;
use crate::models::project::ProjectId;
use crate::view::{Card, MediaRegion, RenderTarget, Row};
use media::ThumbnailCache;

/// Result of user interaction with a painter.
#[derive(Debug, Clone)]
pub enum UiAction {
    Dispatch(DashboardEvent),
    /// Open the native file picker for a project
    PickFiles(ProjectId),
    /// Save a project's media to a file
    ExportMedia(ProjectId),
    Select(ProjectId),
}

/// Accent colour for a status badge slug.
pub fn status_color(slug: &str) -> egui::Color32 {
    match slug {
        "completed" => egui::Color32::from_rgb(40, 167, 69),
        "ongoing" => egui::Color32::from_rgb(0, 123, 255),
        _ => egui::Color32::from_gray(140),
    }
}

/// Accent colour for a priority badge slug.
pub fn priority_color(slug: &str) -> egui::Color32 {
    match slug {
        "high" => egui::Color32::from_rgb(220, 53, 69),
        "medium" => egui::Color32::from_rgb(253, 126, 20),
        "low" => egui::Color32::from_rgb(40, 167, 69),
        _ => egui::Color32::from_gray(140),
    }
}

/// Paints presented entries into an egui `Ui`.
pub struct EguiTarget<'a> {
    pub ui: &'a mut egui::Ui,
    pub thumbnails: &'a mut ThumbnailCache,
    /// Card rectangles that accept dropped files this frame
    pub drop_zones: &'a mut Vec<(ProjectId, egui::Rect)>,
    pub actions: &'a mut Vec<UiAction>,
    pub selected: Option<&'a ProjectId>,
    /// Files are being dragged over the window
    pub files_hovering: bool,
}

impl RenderTarget for EguiTarget<'_> {
    fn stats(&mut self, stats: &Stats) {
        self.ui.horizontal(|ui| {
            stat_box(ui, "Total Projects", stats.total.to_string());
            stat_box(ui, "Completed", stats.completed.to_string());
            stat_box(ui, "Ongoing", stats.ongoing.to_string());
            stat_box(ui, "Avg. Progress", format!("{}%", stats.avg_completion));
        });
    }

    fn card(&mut self, card: &Card, media: &MediaRegion) {
        let rect = cards::show(
            self.ui,
            card,
            media,
            self.thumbnails,
            self.actions,
            self.files_hovering,
        );
        self.drop_zones.push((card.project_id.clone(), rect));
    }

    fn table(&mut self, rows: &[(&Row, &MediaRegion)]) {
        table::show(self.ui, rows, self.selected, self.actions);
    }

    fn no_results(&mut self, message: &str) {
        self.ui.add_space(40.0);
        self.ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(message)
                    .size(16.0)
                    .color(egui::Color32::from_gray(150)),
            );
        });
    }
}

fn stat_box(ui: &mut egui::Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(140.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(value).size(24.0).strong());
            ui.label(egui::RichText::new(label).weak());
        });
    });
}
