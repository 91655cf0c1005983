// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project card.

use super::{media, priority_color, status_color, UiAction};
use crate::view::{Card, MediaRegion};

pub const CARD_WIDTH: f32 = 340.0;

/// Display one card. Returns its rectangle, which doubles as the drop zone
/// for the project's media.
pub fn show(
    ui: &mut egui::Ui,
    card: &Card,
    region: &MediaRegion,
    thumbnails: &mut media::ThumbnailCache,
    actions: &mut Vec<UiAction>,
    files_hovering: bool,
) -> egui::Rect {
    let fields = &card.fields;

    let response = ui.allocate_ui_with_layout(
        egui::vec2(CARD_WIDTH, 0.0),
        egui::Layout::top_down(egui::Align::LEFT),
        |ui| {
            egui::Frame::group(ui.style())
                .inner_margin(egui::Margin::same(10.0))
                .show(ui, |ui| {
                    ui.set_width(CARD_WIDTH - 24.0);

                    // Priority indicator
                    let (strip, _) =
                        ui.allocate_exact_size(egui::vec2(ui.available_width(), 4.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(strip, 2.0, priority_color(&fields.priority_slug));

                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            let title = ui.add(
                                egui::Label::new(egui::RichText::new(&fields.name).heading())
                                    .sense(egui::Sense::click()),
                            );
                            if title.on_hover_text("Show in side panel").clicked() {
                                actions.push(UiAction::Select(card.project_id.clone()));
                            }
                            ui.label(egui::RichText::new(&fields.project_type).weak());
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                            ui.label(
                                egui::RichText::new(&fields.status)
                                    .strong()
                                    .color(status_color(&fields.status_slug)),
                            );
                        });
                    });

                    egui::Grid::new(("card_details", card.project_id.as_str()))
                        .num_columns(2)
                        .show(ui, |ui| {
                            detail_row(ui, "Priority:", &fields.priority);
                            detail_row(ui, "Start Date:", &fields.start_date);
                            detail_row(ui, "Due Date:", &fields.due_date);
                            detail_row(ui, "Category:", &fields.category);
                        });

                    ui.add(
                        egui::ProgressBar::new(f32::from(fields.completion) / 100.0)
                            .text(card.progress_label()),
                    );

                    ui.label(egui::RichText::new("Current Status:").strong());
                    ui.label(fields.notes.as_str());

                    egui::CollapsingHeader::new("Details")
                        .id_source(("card_more", card.project_id.as_str()))
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new("Objective:").strong());
                            ui.label(fields.objective.as_str());
                            ui.label(egui::RichText::new("Upcoming Actions:").strong());
                            ui.label(fields.upcoming_actions.as_str());
                        });

                    ui.separator();
                    media::show_region(ui, &card.project_id, region, thumbnails, actions);
                })
                .response
        },
    );

    let rect = response.inner.rect;
    if files_hovering && ui.rect_contains_pointer(rect) {
        ui.painter().rect_stroke(
            rect,
            4.0,
            egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE),
        );
    }
    rect
}

fn detail_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(egui::RichText::new(label).weak());
    ui.label(value);
    ui.end_row();
}
