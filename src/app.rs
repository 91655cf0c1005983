// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It forwards user input to the dashboard controller
//! as typed events and paints the controller's presentation each frame.

use crate::dashboard::{DashboardController, DashboardEvent, MediaRef};
use crate::io::media::IncomingFile;
use crate::models::project::{Project, ProjectId, ProjectStore};
use crate::ui::{cards::CARD_WIDTH, media, properties, toolbar, EguiTarget, UiAction};
use crate::view::ViewMode;
use std::sync::mpsc::{channel, Receiver};

/// Extensions offered by the "Add media" file picker.
const MEDIA_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "mp4", "webm", "mov", "mkv", "avi",
];

/// Main application state.
pub struct DashboardApp {
    controller: DashboardController,

    /// Project shown in the side panel
    selected: Option<ProjectId>,

    thumbnails: media::ThumbnailCache,

    /// Card rectangles from the previous frame, used to route drops
    drop_zones: Vec<(ProjectId, egui::Rect)>,

    /// Description being edited in the full view
    description_draft: Option<(MediaRef, String)>,

    /// Receiver for background project file loading
    project_loader: Option<Receiver<Result<Vec<Project>, String>>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl DashboardApp {
    pub fn new(controller: DashboardController) -> Self {
        Self {
            controller,
            selected: None,
            thumbnails: media::ThumbnailCache::default(),
            drop_zones: Vec::new(),
            description_draft: None,
            project_loader: None,
            loading_message: None,
        }
    }

    /// Load a project file in the background.
    fn open_projects(&mut self, path: std::path::PathBuf) {
        let (sender, receiver) = channel();
        self.project_loader = Some(receiver);
        self.loading_message = Some(format!("Loading {}...", path.display()));

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = crate::io::serialization::import_projects(&path)
                .map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    /// Replace the project list, keeping attached media and uploads in flight.
    fn replace_projects(&mut self, projects: Vec<Project>) {
        match ProjectStore::new(projects) {
            Ok(store) => {
                self.controller.replace_store(store);
                self.selected = None;
                self.description_draft = None;
                self.drop_zones.clear();
                self.thumbnails.clear();
            }
            Err(e) => {
                log::error!("Rejected project file: {:#}", e);
                self.controller.report_error(format!("Rejected project file: {}", e));
            }
        }
    }

    fn pick_files(&mut self, project_id: ProjectId) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images and videos", MEDIA_EXTENSIONS)
            .pick_files()
        {
            let files = paths.into_iter().map(IncomingFile::from_path).collect();
            self.controller
                .dispatch(DashboardEvent::FilesDropped { project_id, files });
        }
    }

    fn export_media(&mut self, project_id: &ProjectId) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .add_filter("YAML", &["yaml", "yml"])
            .set_file_name(format!("{}-media.json", project_id))
            .save_file()
        else {
            return;
        };

        let region = self.controller.renderer().media_region(project_id);
        match crate::io::serialization::export_media(&region.media, &path) {
            Ok(()) => log::info!("Exported media of project {} to {}", project_id, path.display()),
            Err(e) => {
                log::error!("Failed to export media: {}", e);
                self.controller.report_error(format!("Export failed: {}", e));
            }
        }
    }

    /// Route files dropped on the window to the card under the pointer, or
    /// to the selected project.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (dropped, pointer) = ctx.input(|i| (i.raw.dropped_files.clone(), i.pointer.latest_pos()));
        if dropped.is_empty() {
            return;
        }

        let target = pointer
            .and_then(|pos| {
                self.drop_zones
                    .iter()
                    .find(|(_, rect)| rect.contains(pos))
                    .map(|(id, _)| id.clone())
            })
            .or_else(|| self.selected.clone());

        let Some(project_id) = target else {
            log::warn!("Dropped {} file(s) outside any project", dropped.len());
            self.controller
                .report_error("Drop files onto a project card, or select a project first");
            return;
        };

        let files = dropped.into_iter().filter_map(incoming_file).collect();
        self.controller
            .dispatch(DashboardEvent::FilesDropped { project_id, files });
    }

    fn apply(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            match action {
                UiAction::Dispatch(event) => self.controller.dispatch(event),
                UiAction::PickFiles(project_id) => self.pick_files(project_id),
                UiAction::ExportMedia(project_id) => self.export_media(&project_id),
                UiAction::Select(project_id) => self.selected = Some(project_id),
            }
        }
    }
}

/// Convert an egui drop into an intake file.
fn incoming_file(file: egui::DroppedFile) -> Option<IncomingFile> {
    match (file.bytes, file.path) {
        (Some(bytes), _) => Some(IncomingFile::from_bytes(file.name, file.mime, bytes)),
        (None, Some(path)) => {
            let mut incoming = IncomingFile::from_path(path);
            incoming.mime = file.mime;
            Some(incoming)
        }
        (None, None) => {
            log::warn!("Dropped file '{}' has no content", file.name);
            None
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed project loading
        if let Some(ref receiver) = self.project_loader {
            if let Ok(result) = receiver.try_recv() {
                self.project_loader = None;
                self.loading_message = None;

                match result {
                    Ok(projects) => self.replace_projects(projects),
                    Err(e) => {
                        log::error!("Failed to load projects: {}", e);
                        self.controller.report_error(e);
                    }
                }
            }
        }

        // Finished uploads refresh their project's media region
        self.controller.poll_attachments();
        if self.controller.pending_uploads() > 0 || self.loading_message.is_some() {
            ctx.request_repaint();
        }

        self.handle_dropped_files(ctx);
        let files_hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.controller.open_media().is_some() {
                self.controller.dispatch(DashboardEvent::CloseMedia);
            } else {
                self.selected = None;
            }
        }

        let mut actions = Vec::new();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Projects...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Projects", &["json", "yaml", "yml"])
                            .pick_file()
                        {
                            self.open_projects(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    let mode = self.controller.state().view_mode;
                    if ui.radio(mode == ViewMode::Cards, "Cards").clicked() {
                        actions.push(UiAction::Dispatch(DashboardEvent::SetView(ViewMode::Cards)));
                        ui.close_menu();
                    }
                    if ui.radio(mode == ViewMode::Table, "Table").clicked() {
                        actions.push(UiAction::Dispatch(DashboardEvent::SetView(ViewMode::Table)));
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let store = self.controller.store();
            toolbar::show(
                ui,
                self.controller.state(),
                &store.statuses(),
                &store.types(),
                &mut actions,
            );
        });

        // Status bar
        let mut dismiss = false;
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let shown: Vec<&str> = self
                    .controller
                    .visible_projects()
                    .map(|p| p.name.as_str())
                    .collect();
                ui.label(format!(
                    "{} of {} projects shown",
                    self.controller.stats().total,
                    self.controller.store().len()
                ))
                .on_hover_text(shown.join("\n"));

                let pending = self.controller.pending_uploads();
                if pending > 0 {
                    ui.separator();
                    ui.spinner();
                    ui.label(format!("Reading {} file(s)...", pending));
                }

                if let Some(message) = &self.loading_message {
                    ui.separator();
                    ui.spinner();
                    ui.label(message.as_str());
                }

                if let Some(notice) = self.controller.notice() {
                    ui.separator();
                    let color = match notice.level {
                        crate::dashboard::NoticeLevel::Info => egui::Color32::from_gray(180),
                        crate::dashboard::NoticeLevel::Error => egui::Color32::from_rgb(220, 53, 69),
                    };
                    ui.label(egui::RichText::new(notice.message.as_str()).color(color));
                    if ui.small_button("✖").clicked() {
                        dismiss = true;
                    }
                }
            });
        });
        if dismiss {
            self.controller.dismiss_notice();
        }

        // Selected project panel (right side)
        let selected_card = self
            .selected
            .as_ref()
            .and_then(|id| self.controller.renderer().cards().find(|c| &c.project_id == id));
        let mut close_panel = false;
        if let Some(card) = selected_card {
            let region = self.controller.renderer().media_region(&card.project_id);
            let panel_action = egui::SidePanel::right("selected_project")
                .default_width(320.0)
                .show(ctx, |ui| {
                    properties::show(ui, card, region, &mut self.thumbnails, &mut actions)
                })
                .inner;
            close_panel = matches!(panel_action, properties::PropertiesAction::Close);
        }
        if close_panel {
            self.selected = None;
        }

        // Stats and project views (center)
        self.drop_zones.clear();
        egui::CentralPanel::default().show(ctx, |ui| {
            let renderer = self.controller.renderer();

            let mut target = EguiTarget {
                ui,
                thumbnails: &mut self.thumbnails,
                drop_zones: &mut self.drop_zones,
                actions: &mut actions,
                selected: self.selected.as_ref(),
                files_hovering,
            };
            renderer.present_stats(&mut target);
            target.ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(target.ui, |ui| {
                    let mut present = |ui: &mut egui::Ui| {
                        let mut target = EguiTarget {
                            ui,
                            thumbnails: &mut *target.thumbnails,
                            drop_zones: &mut *target.drop_zones,
                            actions: &mut *target.actions,
                            selected: target.selected,
                            files_hovering,
                        };
                        renderer.present_view(&mut target);
                    };

                    if renderer.active_view() == ViewMode::Cards && renderer.visible_count() > 0 {
                        ui.horizontal_wrapped(|ui| {
                            ui.set_min_width(CARD_WIDTH);
                            present(ui);
                        });
                    } else {
                        present(ui);
                    }
                });
        });

        // Full view of one media item
        match self.controller.open_media() {
            Some((media_ref, item)) => {
                let region = self.controller.renderer().media_region(&media_ref.project_id);
                media::show_full_view(
                    ctx,
                    media_ref,
                    item,
                    region,
                    &mut self.thumbnails,
                    &mut self.description_draft,
                    &mut actions,
                );
            }
            None => self.description_draft = None,
        }

        self.apply(actions);
    }
}
