// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project table.

use super::{priority_color, status_color, UiAction};
use crate::models::project::ProjectId;
use crate::view::{MediaRegion, Row};

/// Notes longer than this are cut off in the table.
const NOTES_CHARS: usize = 60;

const HEADERS: [&str; 9] = [
    "Project",
    "Status",
    "Priority",
    "Type",
    "Start Date",
    "Due Date",
    "Progress",
    "Notes",
    "Media",
];

/// Display the visible rows. Clicking a project name or its media count
/// selects it for the side panel.
pub fn show(
    ui: &mut egui::Ui,
    rows: &[(&Row, &MediaRegion)],
    selected: Option<&ProjectId>,
    actions: &mut Vec<UiAction>,
) {
    egui::Grid::new("projects_table")
        .striped(true)
        .num_columns(HEADERS.len())
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            for header in HEADERS {
                ui.label(egui::RichText::new(header).strong());
            }
            ui.end_row();

            for (row, region) in rows {
                let fields = &row.fields;
                let is_selected = selected == Some(&row.project_id);

                if ui.selectable_label(is_selected, fields.name.as_str()).clicked() {
                    actions.push(UiAction::Select(row.project_id.clone()));
                }
                ui.label(
                    egui::RichText::new(fields.status.as_str()).color(status_color(&fields.status_slug)),
                );
                ui.label(
                    egui::RichText::new(fields.priority.as_str())
                        .color(priority_color(&fields.priority_slug)),
                );
                ui.label(fields.project_type.as_str());
                ui.label(fields.start_date.as_str());
                ui.label(fields.due_date.as_str());
                ui.add(
                    egui::ProgressBar::new(f32::from(fields.completion) / 100.0)
                        .desired_width(100.0)
                        .text(row.progress_label()),
                );
                ui.label(shorten(&fields.notes, NOTES_CHARS))
                    .on_hover_text(fields.notes.as_str());

                let media = &region.media;
                let counts = format!("📷 {}  🎞 {}", media.screenshots.len(), media.videos.len());
                if ui.button(counts).on_hover_text("Manage media").clicked() {
                    actions.push(UiAction::Select(row.project_id.clone()));
                }
                ui.end_row();
            }
        });
}

fn shorten(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_respects_char_boundaries() {
        assert_eq!(shorten("short", 10), "short");
        assert_eq!(shorten("abcdef", 3), "abc…");
        assert_eq!(shorten("ééééé", 2), "éé…");
    }
}
