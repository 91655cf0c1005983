// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-project media persistence.
//!
//! Each project's media lives under its own key as one JSON document.
//! Every mutation is a read-modify-write of that document, serialized per
//! key so concurrent uploads to the same project never lose an item.

use crate::error::{MediaError, StorageError};
use crate::io::store::KeyValueStore;
use crate::models::media::{MediaItem, MediaKind, ProjectMedia};
use crate::models::project::ProjectId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Key prefix used when none is configured.
pub const DEFAULT_KEY_PREFIX: &str = "project-media";

pub struct MediaRepository {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
    /// One lock per storage key, created on first use
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MediaRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Storage key for a project: `<prefix>-<id>`.
    pub fn key_for(&self, project_id: &ProjectId) -> String {
        format!("{}-{}", self.prefix, project_id)
    }

    /// Stored media for the project, or an empty set.
    ///
    /// Read failures and undecodable values are logged and treated as empty.
    pub fn get(&self, project_id: &ProjectId) -> ProjectMedia {
        let key = self.key_for(project_id);
        match self.load(&key) {
            Ok(media) => media,
            Err(e) => {
                log::warn!("Could not load media for project {}: {}", project_id, e);
                ProjectMedia::default()
            }
        }
    }

    /// Append an item to the end of the matching sequence.
    pub fn append(
        &self,
        project_id: &ProjectId,
        kind: MediaKind,
        item: MediaItem,
    ) -> Result<(), MediaError> {
        self.update(project_id, |media| {
            media.items_mut(kind).push(item);
            Ok(())
        })
    }

    /// Remove and return the item at `index`.
    ///
    /// An invalid index leaves storage untouched and returns
    /// [`MediaError::OutOfRange`].
    pub fn remove_at(
        &self,
        project_id: &ProjectId,
        kind: MediaKind,
        index: usize,
    ) -> Result<MediaItem, MediaError> {
        self.update(project_id, |media| {
            let items = media.items_mut(kind);
            if index >= items.len() {
                return Err(MediaError::OutOfRange {
                    kind,
                    index,
                    len: items.len(),
                });
            }
            Ok(items.remove(index))
        })
    }

    /// Replace the description of the item at `index`.
    pub fn set_description(
        &self,
        project_id: &ProjectId,
        kind: MediaKind,
        index: usize,
        description: impl Into<String>,
    ) -> Result<(), MediaError> {
        let description = description.into();
        self.update(project_id, |media| {
            let items = media.items_mut(kind);
            let len = items.len();
            let item = items
                .get_mut(index)
                .ok_or(MediaError::OutOfRange { kind, index, len })?;
            item.description = description;
            Ok(())
        })
    }

    /// Run one locked read-modify-write cycle. Nothing is written when `apply`
    /// fails.
    fn update<T>(
        &self,
        project_id: &ProjectId,
        apply: impl FnOnce(&mut ProjectMedia) -> Result<T, MediaError>,
    ) -> Result<T, MediaError> {
        let key = self.key_for(project_id);
        let lock = self.lock_for(&key);
        let _guard = lock.lock();

        let mut media = self.load(&key)?;
        let result = apply(&mut media)?;
        self.save(&key, &media)?;
        Ok(result)
    }

    fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    fn load(&self, key: &str) -> Result<ProjectMedia, StorageError> {
        match self.store.get(key)? {
            None => Ok(ProjectMedia::default()),
            Some(text) => serde_json::from_str(&text).map_err(|source| {
                StorageError::Serialization {
                    key: key.to_string(),
                    source,
                }
            }),
        }
    }

    fn save(&self, key: &str, media: &ProjectMedia) -> Result<(), StorageError> {
        let text = serde_json::to_string(media).map_err(|source| StorageError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::{FileStore, MemoryStore};

    fn repository() -> (Arc<MemoryStore>, MediaRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = MediaRepository::new(store.clone(), DEFAULT_KEY_PREFIX);
        (store, repo)
    }

    fn item(name: &str) -> MediaItem {
        MediaItem::new(name, format!("data:image/png;base64,{}", name))
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            self.get(key).map(|_| ())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_get_unknown_project_is_empty() {
        let (store, repo) = repository();
        assert_eq!(repo.get(&ProjectId::from(1)), ProjectMedia::default());
        // Reading does not create anything.
        assert!(store.is_empty());
    }

    #[test]
    fn test_key_is_prefix_and_id() {
        let (_, repo) = repository();
        assert_eq!(repo.key_for(&ProjectId::from(42)), "project-media-42");
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let (_, repo) = repository();
        let id = ProjectId::from(1);

        for n in 0..5 {
            repo.append(&id, MediaKind::Screenshot, item(&format!("shot{}", n)))
                .unwrap();
        }
        repo.append(&id, MediaKind::Video, item("clip")).unwrap();

        let media = repo.get(&id);
        let names: Vec<_> = media.screenshots.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["shot0", "shot1", "shot2", "shot3", "shot4"]);
        assert_eq!(media.videos.len(), 1);
        assert_eq!(media.videos[0].name, "clip");
    }

    #[test]
    fn test_remove_only_screenshot() {
        let (_, repo) = repository();
        let id = ProjectId::from(1);
        repo.append(&id, MediaKind::Screenshot, item("a")).unwrap();

        let removed = repo.remove_at(&id, MediaKind::Screenshot, 0).unwrap();
        assert_eq!(removed.name, "a");
        assert!(repo.get(&id).screenshots.is_empty());
    }

    #[test]
    fn test_remove_out_of_range_changes_nothing() {
        let (_, repo) = repository();
        let id = ProjectId::from(1);
        repo.append(&id, MediaKind::Video, item("v")).unwrap();

        let err = repo.remove_at(&id, MediaKind::Video, 3).unwrap_err();
        assert!(matches!(
            err,
            MediaError::OutOfRange {
                kind: MediaKind::Video,
                index: 3,
                len: 1
            }
        ));
        let err = repo.remove_at(&id, MediaKind::Screenshot, 0).unwrap_err();
        assert!(matches!(err, MediaError::OutOfRange { len: 0, .. }));
        assert_eq!(repo.get(&id).videos.len(), 1);
    }

    #[test]
    fn test_set_description() {
        let (_, repo) = repository();
        let id = ProjectId::from(9);
        repo.append(&id, MediaKind::Screenshot, item("a")).unwrap();

        repo.set_description(&id, MediaKind::Screenshot, 0, "login page")
            .unwrap();
        assert_eq!(repo.get(&id).screenshots[0].description, "login page");
        assert!(repo
            .set_description(&id, MediaKind::Screenshot, 1, "nope")
            .is_err());
    }

    #[test]
    fn test_quota_failure_keeps_prior_state() {
        let store = Arc::new(MemoryStore::with_quota(400));
        let repo = MediaRepository::new(store, DEFAULT_KEY_PREFIX);
        let id = ProjectId::from(1);
        repo.append(&id, MediaKind::Screenshot, item("small")).unwrap();

        let huge = MediaItem::new("huge.png", "x".repeat(1_000));
        let err = repo.append(&id, MediaKind::Screenshot, huge).unwrap_err();
        assert!(matches!(
            err,
            MediaError::Storage(StorageError::QuotaExceeded { .. })
        ));

        let media = repo.get(&id);
        assert_eq!(media.screenshots.len(), 1);
        assert_eq!(media.screenshots[0].name, "small");
    }

    #[test]
    fn test_broken_store_is_reported_not_fatal() {
        let repo = MediaRepository::new(Arc::new(BrokenStore), DEFAULT_KEY_PREFIX);
        let id = ProjectId::from(1);

        assert!(repo.get(&id).is_empty());
        let err = repo.append(&id, MediaKind::Video, item("v")).unwrap_err();
        assert!(matches!(err, MediaError::Storage(StorageError::Io { .. })));
    }

    #[test]
    fn test_corrupt_value_reads_as_empty_and_is_not_overwritten() {
        let (store, repo) = repository();
        let id = ProjectId::from(5);
        store.set(&repo.key_for(&id), "{not json").unwrap();

        assert!(repo.get(&id).is_empty());
        let err = repo.append(&id, MediaKind::Screenshot, item("a")).unwrap_err();
        assert!(matches!(
            err,
            MediaError::Storage(StorageError::Serialization { .. })
        ));
        assert_eq!(
            store.get(&repo.key_for(&id)).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let id = ProjectId::from("alpha");
        let first = item("kept");
        {
            let repo = MediaRepository::new(Arc::new(FileStore::new(dir.path(), None)), "media");
            repo.append(&id, MediaKind::Screenshot, first.clone()).unwrap();
        }

        let repo = MediaRepository::new(Arc::new(FileStore::new(dir.path(), None)), "media");
        assert_eq!(repo.get(&id).screenshots, vec![first]);
    }

    #[test]
    fn test_concurrent_appends_to_same_project_are_all_kept() {
        let (_, repo) = repository();
        let repo = Arc::new(repo);
        let id = ProjectId::from(1);

        let handles: Vec<_> = (0..16)
            .map(|n| {
                let repo = Arc::clone(&repo);
                let id = id.clone();
                std::thread::spawn(move || {
                    repo.append(&id, MediaKind::Screenshot, item(&format!("s{}", n)))
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let media = repo.get(&id);
        assert_eq!(media.screenshots.len(), 16);
        let mut names: Vec<_> = media.screenshots.iter().map(|m| m.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 16);
    }
}
