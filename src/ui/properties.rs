// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Selected project panel.
//!
//! This module provides the side panel listing every field of the selected
//! project together with its media, so media can be managed from the table
//! view as well.

use super::{media, UiAction};
use crate::view::{Card, MediaRegion};

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    Close,
}

/// Display the panel for the selected project.
pub fn show(
    ui: &mut egui::Ui,
    card: &Card,
    region: &MediaRegion,
    thumbnails: &mut media::ThumbnailCache,
    actions: &mut Vec<UiAction>,
) -> PropertiesAction {
    let mut action = PropertiesAction::None;
    let fields = &card.fields;

    ui.horizontal(|ui| {
        ui.heading(fields.name.as_str());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("✖").on_hover_text("Close").clicked() {
                action = PropertiesAction::Close;
            }
        });
    });
    if !card.visible {
        ui.label(egui::RichText::new("Hidden by the current filters").italics().weak());
    }
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("selected_project_fields")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for (label, value) in [
                    ("Status", fields.status.as_str()),
                    ("Priority", fields.priority.as_str()),
                    ("Type", fields.project_type.as_str()),
                    ("Category", fields.category.as_str()),
                    ("Start Date", fields.start_date.as_str()),
                    ("Due Date", fields.due_date.as_str()),
                ] {
                    ui.label(egui::RichText::new(label).weak());
                    ui.label(value);
                    ui.end_row();
                }
            });

        ui.add(egui::ProgressBar::new(f32::from(fields.completion) / 100.0).text(card.progress_label()));

        for (title, text) in [
            ("Current Status", &fields.notes),
            ("Objective", &fields.objective),
            ("Upcoming Actions", &fields.upcoming_actions),
        ] {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(title).strong());
            ui.label(text.as_str());
        }

        ui.separator();
        media::show_region(ui, &card.project_id, region, thumbnails, actions);
    });

    action
}
