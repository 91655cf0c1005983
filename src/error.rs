// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for media persistence and file intake.
//!
//! None of these are fatal: each one is scoped to the single operation,
//! project or file that raised it.

use crate::models::media::MediaKind;

/// Failure of the backing key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed
    #[error("storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The write would grow the store beyond its quota
    #[error("storage quota exceeded: {needed} bytes needed, quota is {quota} bytes")]
    QuotaExceeded { needed: u64, quota: u64 },

    /// A value could not be encoded or a stored value could not be decoded
    #[error("invalid stored value for '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a media repository operation.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Positional access past the end of a media sequence
    #[error("no {kind} at index {index} (only {len} stored)")]
    OutOfRange {
        kind: MediaKind,
        index: usize,
        len: usize,
    },
}

/// Failure to read a user-supplied file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to read '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is empty
    #[error("'{name}' has no readable content")]
    NoContent { name: String },
}
