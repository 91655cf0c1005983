// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! File intake for project media.
//!
//! Dropped or picked files are classified by media type, then each accepted
//! file is read on its own background thread. A reader encodes the bytes as a
//! `data:` URI, appends the resulting item through the repository and reports
//! back over a channel, so the UI thread never blocks on file I/O and one bad
//! file never holds up its siblings.

use crate::error::{MediaError, ReadError};
use crate::io::media::{to_data_uri, IncomingFile};
use crate::media::repository::MediaRepository;
use crate::models::media::{MediaItem, MediaKind};
use crate::models::project::ProjectId;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Result of one file's upload.
#[derive(Debug)]
pub enum AttachmentOutcome {
    /// Stored at the end of the project's `kind` sequence.
    Appended {
        project_id: ProjectId,
        kind: MediaKind,
        name: String,
    },
    ReadFailed {
        project_id: ProjectId,
        name: String,
        error: ReadError,
    },
    StoreFailed {
        project_id: ProjectId,
        kind: MediaKind,
        name: String,
        error: MediaError,
    },
}

impl AttachmentOutcome {
    pub fn project_id(&self) -> &ProjectId {
        match self {
            AttachmentOutcome::Appended { project_id, .. }
            | AttachmentOutcome::ReadFailed { project_id, .. }
            | AttachmentOutcome::StoreFailed { project_id, .. } => project_id,
        }
    }

    #[cfg(test)]
    pub fn is_appended(&self) -> bool {
        matches!(self, AttachmentOutcome::Appended { .. })
    }
}

/// Orchestrates reading, storing and deleting project media.
pub struct AttachmentController {
    repository: Arc<MediaRepository>,
    sender: Sender<AttachmentOutcome>,
    receiver: Receiver<AttachmentOutcome>,
    /// Readers started but not yet collected
    pending: usize,
}

impl AttachmentController {
    pub fn new(repository: Arc<MediaRepository>) -> Self {
        let (sender, receiver) = channel();
        Self {
            repository,
            sender,
            receiver,
            pending: 0,
        }
    }

    pub fn repository(&self) -> &Arc<MediaRepository> {
        &self.repository
    }

    /// Start uploading `files` to a project.
    ///
    /// Files that are neither images nor videos are skipped silently. Returns
    /// the number of files accepted for reading.
    pub fn attach(&mut self, project_id: &ProjectId, files: Vec<IncomingFile>) -> usize {
        let mut accepted = 0;

        for file in files {
            let Some(mime) = file.media_type() else {
                log::debug!("Skipping '{}': unknown media type", file.name);
                continue;
            };
            let Some(kind) = MediaKind::from_mime(&mime) else {
                log::debug!("Skipping '{}': {} is not an image or video", file.name, mime);
                continue;
            };

            let repository = Arc::clone(&self.repository);
            let sender = self.sender.clone();
            let project_id = project_id.clone();

            // Spawn background thread for reading
            std::thread::spawn(move || {
                let outcome = upload(&repository, project_id, kind, &mime, file);
                let _ = sender.send(outcome);
            });
            accepted += 1;
        }

        self.pending += accepted;
        if accepted > 0 {
            log::info!("Reading {} file(s) for project {}", accepted, project_id);
        }
        accepted
    }

    /// Collect every finished upload without blocking.
    pub fn poll(&mut self) -> Vec<AttachmentOutcome> {
        let mut finished = Vec::new();
        while let Ok(outcome) = self.receiver.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            finished.push(outcome);
        }
        finished
    }

    /// Block until one upload finishes or `timeout` elapses.
    #[cfg(test)]
    pub fn wait_next(&mut self, timeout: std::time::Duration) -> Option<AttachmentOutcome> {
        use std::sync::mpsc::RecvTimeoutError;

        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => {
                self.pending = self.pending.saturating_sub(1);
                Some(outcome)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Uploads still being read or stored.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Remove one stored item.
    pub fn delete_media(
        &self,
        project_id: &ProjectId,
        kind: MediaKind,
        index: usize,
    ) -> Result<MediaItem, MediaError> {
        let removed = self.repository.remove_at(project_id, kind, index)?;
        log::info!("Deleted {} '{}' from project {}", kind, removed.name, project_id);
        Ok(removed)
    }

    pub fn set_description(
        &self,
        project_id: &ProjectId,
        kind: MediaKind,
        index: usize,
        description: &str,
    ) -> Result<(), MediaError> {
        self.repository
            .set_description(project_id, kind, index, description)
    }
}

/// Idle -> Reading -> Appended, for one file.
fn upload(
    repository: &MediaRepository,
    project_id: ProjectId,
    kind: MediaKind,
    mime: &str,
    file: IncomingFile,
) -> AttachmentOutcome {
    let bytes = match file.read_bytes() {
        Ok(bytes) => bytes,
        Err(error) => {
            log::error!("Failed to read '{}': {}", file.name, error);
            return AttachmentOutcome::ReadFailed {
                project_id,
                name: file.name,
                error,
            };
        }
    };

    let item = MediaItem::new(file.name.clone(), to_data_uri(mime, &bytes));
    match repository.append(&project_id, kind, item) {
        Ok(()) => {
            log::info!(
                "Attached {} '{}' ({} bytes) to project {}",
                kind,
                file.name,
                bytes.len(),
                project_id
            );
            AttachmentOutcome::Appended {
                project_id,
                kind,
                name: file.name,
            }
        }
        Err(error) => {
            log::error!("Failed to store '{}': {}", file.name, error);
            AttachmentOutcome::StoreFailed {
                project_id,
                kind,
                name: file.name,
                error,
            }
        }
    }
}
