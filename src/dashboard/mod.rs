// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dashboard state and event dispatch.
//!
//! The controller owns the filter criteria and view mode, and routes typed
//! events to the filter engine, the stats aggregator, the view renderer and
//! the attachment controller. Failures are turned into a transient notice
//! for the UI and never abort the session.

use crate::engine::filter::{compute_visibility, visible_projects, Choice, FilterCriteria, SearchScope};
use crate::engine::stats::{compute_stats, Stats};
use crate::io::media::IncomingFile;
use crate::media::attachment::{AttachmentController, AttachmentOutcome};
use crate::models::media::{MediaItem, MediaKind};
use crate::models::project::{Project, ProjectId, ProjectStore};
use crate::view::{ViewMode, ViewRenderer};

/// Everything the user can change about what is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub criteria: FilterCriteria,
    pub view_mode: ViewMode,
    pub search_scope: SearchScope,
}

/// Position of one media item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub project_id: ProjectId,
    pub kind: MediaKind,
    pub index: usize,
}

/// User input, with typed payloads.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    SearchChanged(String),
    StatusFilterChanged(Choice),
    TypeFilterChanged(Choice),
    ToggleView,
    SetView(ViewMode),
    FilesDropped {
        project_id: ProjectId,
        files: Vec<IncomingFile>,
    },
    DeleteMedia(MediaRef),
    OpenMedia(MediaRef),
    CloseMedia,
    EditDescription {
        media: MediaRef,
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Short message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub struct DashboardController {
    store: ProjectStore,
    state: DashboardState,
    visibility: Vec<bool>,
    renderer: ViewRenderer,
    attachments: AttachmentController,
    open_media: Option<MediaRef>,
    notice: Option<Notice>,
}

impl DashboardController {
    pub fn new(store: ProjectStore, attachments: AttachmentController, search_scope: SearchScope) -> Self {
        let renderer = load_regions(&store, &attachments, ViewMode::default());

        let mut controller = Self {
            store,
            state: DashboardState {
                search_scope,
                ..DashboardState::default()
            },
            visibility: Vec::new(),
            renderer,
            attachments,
            open_media: None,
            notice: None,
        };
        controller.refilter();
        log::info!("Dashboard ready with {} projects", controller.store.len());
        controller
    }

    /// Swap in another project list.
    ///
    /// Filters and the open item are reset, the view mode is kept. Uploads
    /// still in flight report to this controller and refresh their project
    /// once they finish.
    pub fn replace_store(&mut self, store: ProjectStore) {
        self.renderer = load_regions(&store, &self.attachments, self.state.view_mode);
        self.store = store;
        self.state.criteria = FilterCriteria::default();
        self.open_media = None;
        self.refilter();
        log::info!("Dashboard reloaded with {} projects", self.store.len());
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn renderer(&self) -> &ViewRenderer {
        &self.renderer
    }

    #[cfg(test)]
    pub fn visibility(&self) -> &[bool] {
        &self.visibility
    }

    pub fn stats(&self) -> &Stats {
        self.renderer.stats()
    }

    pub fn visible_projects(&self) -> impl Iterator<Item = &Project> {
        visible_projects(self.store.projects(), &self.visibility)
    }

    pub fn pending_uploads(&self) -> usize {
        self.attachments.pending()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Surface a failure that happened outside the dashboard's own events.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::error(message));
    }

    /// The item shown in the full view, if any and still present.
    pub fn open_media(&self) -> Option<(&MediaRef, &MediaItem)> {
        let media_ref = self.open_media.as_ref()?;
        let item = self
            .renderer
            .media_region(&media_ref.project_id)
            .media
            .get(media_ref.kind, media_ref.index)?;
        Some((media_ref, item))
    }

    pub fn dispatch(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SearchChanged(text) => {
                self.state.criteria.search = text;
                self.refilter();
            }
            DashboardEvent::StatusFilterChanged(choice) => {
                self.state.criteria.status = choice;
                self.refilter();
            }
            DashboardEvent::TypeFilterChanged(choice) => {
                self.state.criteria.project_type = choice;
                self.refilter();
            }
            DashboardEvent::ToggleView => {
                self.state.view_mode = self.renderer.toggle();
            }
            DashboardEvent::SetView(mode) => {
                self.renderer.set_active_view(mode);
                self.state.view_mode = mode;
            }
            DashboardEvent::FilesDropped { project_id, files } => {
                self.attach(project_id, files);
            }
            DashboardEvent::DeleteMedia(media_ref) => self.delete(media_ref),
            DashboardEvent::OpenMedia(media_ref) => {
                if self.renderer.media_region(&media_ref.project_id)
                    .media
                    .get(media_ref.kind, media_ref.index)
                    .is_some()
                {
                    self.open_media = Some(media_ref);
                }
            }
            DashboardEvent::CloseMedia => self.open_media = None,
            DashboardEvent::EditDescription { media, text } => {
                match self
                    .attachments
                    .set_description(&media.project_id, media.kind, media.index, &text)
                {
                    Ok(()) => self.reload_media(&media.project_id),
                    Err(e) => {
                        log::error!("Failed to update description: {}", e);
                        self.notice = Some(Notice::error(format!("Could not save description: {}", e)));
                    }
                }
            }
        }
    }

    /// Apply finished uploads. Returns how many finished.
    pub fn poll_attachments(&mut self) -> usize {
        let finished = self.attachments.poll();
        let count = finished.len();
        for outcome in finished {
            self.apply_outcome(outcome);
        }
        count
    }

    /// Block for at most `timeout` until one upload finishes and apply it.
    #[cfg(test)]
    pub fn wait_for_upload(&mut self, timeout: std::time::Duration) -> bool {
        match self.attachments.wait_next(timeout) {
            Some(outcome) => {
                self.apply_outcome(outcome);
                true
            }
            None => false,
        }
    }

    /// Filter -> stats -> both presentations.
    fn refilter(&mut self) {
        let projects = self.store.projects();
        self.visibility = compute_visibility(projects, &self.state.criteria, self.state.search_scope);
        let stats = compute_stats(visible_projects(projects, &self.visibility));
        self.renderer.render(projects, &self.visibility);
        self.renderer.render_stats(stats);
        log::debug!(
            "Filter {:?} leaves {} of {} projects visible",
            self.state.criteria,
            stats.total,
            projects.len()
        );
    }

    fn attach(&mut self, project_id: ProjectId, files: Vec<IncomingFile>) {
        let Some(project) = self.store.get(&project_id) else {
            log::warn!("Ignoring files dropped on unknown project {}", project_id);
            self.notice = Some(Notice::error(format!("Unknown project {}", project_id)));
            return;
        };
        let offered = files.len();
        let accepted = self.attachments.attach(&project_id, files);
        if accepted < offered {
            log::debug!(
                "Skipped {} non-media file(s) dropped on '{}'",
                offered - accepted,
                project.name
            );
        }
    }

    fn delete(&mut self, media_ref: MediaRef) {
        match self
            .attachments
            .delete_media(&media_ref.project_id, media_ref.kind, media_ref.index)
        {
            Ok(removed) => {
                self.shift_open_media(&media_ref);
                self.reload_media(&media_ref.project_id);
                self.notice = Some(Notice::info(format!("Deleted {}", removed.name)));
            }
            Err(e) => {
                log::error!("Failed to delete media: {}", e);
                self.notice = Some(Notice::error(format!("Could not delete: {}", e)));
            }
        }
    }

    /// Keep the full view pointing at the same item after a deletion.
    fn shift_open_media(&mut self, removed: &MediaRef) {
        let Some(open) = self.open_media.as_mut() else {
            return;
        };
        if open.project_id != removed.project_id || open.kind != removed.kind {
            return;
        }
        if open.index == removed.index {
            self.open_media = None;
        } else if open.index > removed.index {
            open.index -= 1;
        }
    }

    fn apply_outcome(&mut self, outcome: AttachmentOutcome) {
        let project_id = outcome.project_id().clone();
        match outcome {
            AttachmentOutcome::Appended { kind, name, .. } => {
                self.reload_media(&project_id);
                // An earlier failure in the same batch stays visible.
                if !matches!(self.notice, Some(Notice { level: NoticeLevel::Error, .. })) {
                    self.notice = Some(Notice::info(format!("Added {} {}", kind, name)));
                }
            }
            AttachmentOutcome::ReadFailed { name, error, .. } => {
                self.notice = Some(Notice::error(format!("Could not read {}: {}", name, error)));
            }
            AttachmentOutcome::StoreFailed {
                kind, name, error, ..
            } => {
                // Storage is unchanged; show what it actually holds.
                self.reload_media(&project_id);
                self.notice = Some(Notice::error(format!(
                    "Could not store {} {}: {}",
                    kind, name, error
                )));
            }
        }
    }

    /// Redraw one project's media block from storage.
    fn reload_media(&mut self, project_id: &ProjectId) {
        let media = self.attachments.repository().get(project_id);
        self.renderer.refresh_media(project_id, media);
    }
}

/// Renderer with every project's media region read from storage.
fn load_regions(store: &ProjectStore, attachments: &AttachmentController, mode: ViewMode) -> ViewRenderer {
    let mut renderer = ViewRenderer::new();
    renderer.set_active_view(mode);
    for project in store.projects() {
        renderer.refresh_media(&project.id, attachments.repository().get(&project.id));
    }
    renderer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use crate::media::repository::{MediaRepository, DEFAULT_KEY_PREFIX};
    use crate::models::project::Status;
    use crate::view::testing::RecordingTarget;
    use std::sync::Arc;
    use std::time::Duration;

    fn controller_with(store: Arc<MemoryStore>) -> DashboardController {
        let mut alpha = Project::new(1, "Alpha Portal", "Web", Status::Ongoing, 40);
        alpha.notes = "waiting on vendor".into();
        let projects = ProjectStore::new(vec![
            alpha,
            Project::new(2, "Beta Sensor", "Hardware", Status::Completed, 100),
            Project::new(3, "Gamma Study", "Web", Status::Ongoing, 60),
        ])
        .unwrap();
        let repository = Arc::new(MediaRepository::new(store, DEFAULT_KEY_PREFIX));
        DashboardController::new(
            projects,
            AttachmentController::new(repository),
            SearchScope::NameNotesObjective,
        )
    }

    fn controller() -> DashboardController {
        controller_with(Arc::new(MemoryStore::new()))
    }

    fn settle(controller: &mut DashboardController) {
        while controller.pending_uploads() > 0 {
            assert!(controller.wait_for_upload(Duration::from_secs(10)), "upload timed out");
        }
    }

    fn screenshot_ref(index: usize) -> MediaRef {
        MediaRef {
            project_id: ProjectId::from(1),
            kind: MediaKind::Screenshot,
            index,
        }
    }

    fn presented(controller: &DashboardController) -> Vec<String> {
        let mut target = RecordingTarget::default();
        controller.renderer().present(&mut target);
        target.lines
    }

    #[test]
    fn test_initial_state_shows_all() {
        let controller = controller();
        assert_eq!(controller.visibility(), &[true, true, true]);
        assert_eq!(controller.stats().total, 3);
        assert_eq!(controller.stats().completed, 1);
        assert_eq!(controller.stats().ongoing, 2);
        assert_eq!(controller.stats().avg_completion, 67);
    }

    #[test]
    fn test_filters_drive_stats_and_views() {
        let mut controller = controller();
        controller.dispatch(DashboardEvent::TypeFilterChanged(Choice::Only("Web".into())));
        assert_eq!(controller.visibility(), &[true, false, true]);
        assert_eq!(controller.stats().total, 2);
        assert_eq!(controller.stats().avg_completion, 50);

        controller.dispatch(DashboardEvent::SearchChanged("VENDOR".into()));
        let names: Vec<_> = controller.visible_projects().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Portal"]);
        assert_eq!(controller.renderer().visible_count(), 1);

        controller.dispatch(DashboardEvent::StatusFilterChanged(Choice::Only("Completed".into())));
        assert_eq!(controller.stats(), &Stats::default());
        assert_eq!(presented(&controller).last().map(String::as_str), Some(crate::view::NO_RESULTS));
    }

    #[test]
    fn test_toggling_view_changes_presentation_only() {
        let mut controller = controller();
        controller.dispatch(DashboardEvent::SearchChanged("a".into()));
        let visibility = controller.visibility().to_vec();
        let stats = *controller.stats();
        let before = presented(&controller);

        controller.dispatch(DashboardEvent::ToggleView);
        assert_eq!(controller.state().view_mode, ViewMode::Table);
        assert_eq!(controller.visibility(), visibility.as_slice());
        assert_eq!(controller.stats(), &stats);
        assert_ne!(presented(&controller), before);

        controller.dispatch(DashboardEvent::ToggleView);
        assert_eq!(controller.state().view_mode, ViewMode::Cards);
        assert_eq!(presented(&controller), before);
    }

    #[test]
    fn test_dropped_batch_refreshes_one_region() {
        let mut controller = controller();
        let files = vec![
            IncomingFile::from_bytes("1.png", "image/png", vec![1u8]),
            IncomingFile::from_bytes("2.png", "image/png", vec![2u8]),
            IncomingFile::from_bytes("3.png", "image/png", vec![3u8]),
            IncomingFile::from_bytes("v.mp4", "video/mp4", vec![4u8]),
            IncomingFile::from_bytes("todo.txt", "text/plain", vec![5u8]),
        ];
        controller.dispatch(DashboardEvent::FilesDropped {
            project_id: ProjectId::from(1),
            files,
        });
        settle(&mut controller);

        let region = controller.renderer().media_region(&ProjectId::from(1));
        assert_eq!(region.media.screenshots.len(), 3);
        assert_eq!(region.media.videos.len(), 1);
        assert_eq!(controller.notice().map(|n| n.level), Some(NoticeLevel::Info));
        assert!(controller.renderer().media_region(&ProjectId::from(2)).media.is_empty());
        assert_eq!(controller.renderer().media_region(&ProjectId::from(2)).revision, 1);
    }

    #[test]
    fn test_append_notice_names_the_file() {
        let mut controller = controller();
        controller.dispatch(DashboardEvent::FilesDropped {
            project_id: ProjectId::from(2),
            files: vec![IncomingFile::from_bytes("demo.mp4", "video/mp4", vec![1u8])],
        });
        settle(&mut controller);

        let notice = controller.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, "Added video demo.mp4");
    }

    #[test]
    fn test_append_does_not_hide_an_earlier_error() {
        let mut controller = controller();
        controller.report_error("Export failed");
        controller.dispatch(DashboardEvent::FilesDropped {
            project_id: ProjectId::from(1),
            files: vec![IncomingFile::from_bytes("a.png", "image/png", vec![1u8])],
        });
        settle(&mut controller);

        assert_eq!(controller.notice().map(|n| n.message.as_str()), Some("Export failed"));
        assert_eq!(
            controller.renderer().media_region(&ProjectId::from(1)).media.screenshots.len(),
            1
        );
    }

    #[test]
    fn test_replace_store_keeps_uploads_in_flight() {
        let mut controller = controller();
        controller.dispatch(DashboardEvent::SearchChanged("alpha".into()));
        controller.dispatch(DashboardEvent::ToggleView);
        controller.dispatch(DashboardEvent::FilesDropped {
            project_id: ProjectId::from(1),
            files: vec![IncomingFile::from_bytes("late.png", "image/png", vec![7u8])],
        });

        let reloaded = ProjectStore::new(vec![
            Project::new(1, "Alpha Reloaded", "Web", Status::Ongoing, 40),
            Project::new(9, "Newcomer", "Research", Status::Completed, 100),
        ])
        .unwrap();
        controller.replace_store(reloaded);
        settle(&mut controller);

        assert_eq!(controller.state().criteria, FilterCriteria::default());
        assert_eq!(controller.state().view_mode, ViewMode::Table);
        assert_eq!(controller.renderer().active_view(), ViewMode::Table);
        assert_eq!(controller.visible_projects().count(), 2);
        let region = controller.renderer().media_region(&ProjectId::from(1));
        let names: Vec<_> = region.media.screenshots.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["late.png"]);
    }

    #[test]
    fn test_drop_on_unknown_project_is_reported() {
        let mut controller = controller();
        controller.dispatch(DashboardEvent::FilesDropped {
            project_id: ProjectId::from(99),
            files: vec![IncomingFile::from_bytes("1.png", "image/png", vec![1u8])],
        });
        assert_eq!(controller.pending_uploads(), 0);
        assert_eq!(controller.notice().map(|n| n.level), Some(NoticeLevel::Error));
    }

    #[test]
    fn test_delete_and_open_media() {
        let mut controller = controller();
        for name in ["a.png", "b.png", "c.png"] {
            controller.dispatch(DashboardEvent::FilesDropped {
                project_id: ProjectId::from(1),
                files: vec![IncomingFile::from_bytes(name, "image/png", vec![0u8])],
            });
            settle(&mut controller);
        }

        controller.dispatch(DashboardEvent::OpenMedia(screenshot_ref(2)));
        assert_eq!(controller.open_media().map(|(_, item)| item.name.as_str()), Some("c.png"));

        controller.dispatch(DashboardEvent::DeleteMedia(screenshot_ref(0)));
        let region = controller.renderer().media_region(&ProjectId::from(1));
        let names: Vec<_> = region.media.screenshots.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["b.png", "c.png"]);
        // Still showing the same item at its new position.
        assert_eq!(controller.open_media().map(|(r, item)| (r.index, item.name.as_str())), Some((1, "c.png")));

        controller.dispatch(DashboardEvent::DeleteMedia(screenshot_ref(1)));
        assert!(controller.open_media().is_none());
    }

    #[test]
    fn test_delete_out_of_range_keeps_media() {
        let mut controller = controller();
        controller.dispatch(DashboardEvent::FilesDropped {
            project_id: ProjectId::from(1),
            files: vec![IncomingFile::from_bytes("a.png", "image/png", vec![0u8])],
        });
        settle(&mut controller);

        controller.dispatch(DashboardEvent::DeleteMedia(screenshot_ref(5)));
        assert_eq!(controller.notice().map(|n| n.level), Some(NoticeLevel::Error));
        assert_eq!(
            controller.renderer().media_region(&ProjectId::from(1)).media.screenshots.len(),
            1
        );
    }

    #[test]
    fn test_edit_description() {
        let mut controller = controller();
        controller.dispatch(DashboardEvent::FilesDropped {
            project_id: ProjectId::from(1),
            files: vec![IncomingFile::from_bytes("a.png", "image/png", vec![0u8])],
        });
        settle(&mut controller);

        controller.dispatch(DashboardEvent::EditDescription {
            media: screenshot_ref(0),
            text: "checkout flow".into(),
        });
        let region = controller.renderer().media_region(&ProjectId::from(1));
        assert_eq!(region.media.screenshots[0].description, "checkout flow");
    }

    #[test]
    fn test_store_failure_surfaces_as_notice() {
        let mut controller = controller_with(Arc::new(MemoryStore::with_quota(64)));
        controller.dispatch(DashboardEvent::FilesDropped {
            project_id: ProjectId::from(1),
            files: vec![IncomingFile::from_bytes("big.png", "image/png", vec![0u8; 256])],
        });
        settle(&mut controller);

        assert_eq!(controller.notice().map(|n| n.level), Some(NoticeLevel::Error));
        assert!(controller.renderer().media_region(&ProjectId::from(1)).media.is_empty());
    }

    #[test]
    fn test_media_is_loaded_on_startup() {
        let store = Arc::new(MemoryStore::new());
        {
            let mut first = controller_with(Arc::clone(&store));
            first.dispatch(DashboardEvent::FilesDropped {
                project_id: ProjectId::from(3),
                files: vec![IncomingFile::from_bytes("v.webm", "", vec![0u8])],
            });
            settle(&mut first);
        }

        let second = controller_with(store);
        let region = second.renderer().media_region(&ProjectId::from(3));
        assert_eq!(region.media.videos.len(), 1);
        assert_eq!(region.media.videos[0].name, "v.webm");
    }
}
