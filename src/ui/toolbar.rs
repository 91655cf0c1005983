// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with search, filters and the view toggle.

use super::UiAction;
use crate::dashboard::{DashboardEvent, DashboardState};
use crate::engine::filter::Choice;

/// Display the toolbar. `statuses` and `types` populate the selectors.
pub fn show(
    ui: &mut egui::Ui,
    state: &DashboardState,
    statuses: &[String],
    types: &[String],
    actions: &mut Vec<UiAction>,
) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // Search box
        let mut search = state.criteria.search.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .hint_text("🔍 Search projects...")
                .desired_width(240.0),
        );
        if response.changed() {
            actions.push(UiAction::Dispatch(DashboardEvent::SearchChanged(search)));
        }

        ui.separator();

        if let Some(choice) = choice_box(ui, "Status", &state.criteria.status, statuses) {
            actions.push(UiAction::Dispatch(DashboardEvent::StatusFilterChanged(choice)));
        }
        if let Some(choice) = choice_box(ui, "Type", &state.criteria.project_type, types) {
            actions.push(UiAction::Dispatch(DashboardEvent::TypeFilterChanged(choice)));
        }

        ui.separator();

        if ui.button(state.view_mode.toggle_label()).clicked() {
            actions.push(UiAction::Dispatch(DashboardEvent::ToggleView));
        }

        // Adding projects is not supported yet
        ui.add_enabled(false, egui::Button::new("➕ Add Project"))
            .on_disabled_hover_text("Projects come from the project file");
    });
}

/// A combo box offering "All" plus each label. Returns the new choice when
/// it changed.
fn choice_box(ui: &mut egui::Ui, label: &str, current: &Choice, options: &[String]) -> Option<Choice> {
    let mut selected = current.clone();
    egui::ComboBox::from_label(label)
        .selected_text(selected.label().to_string())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, Choice::All, "All");
            for option in options {
                ui.selectable_value(&mut selected, Choice::Only(option.clone()), option.as_str());
            }
        });
    (selected != *current).then_some(selected)
}
