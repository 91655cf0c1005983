// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: project files, media files and local storage.

pub mod media;
pub mod serialization;
pub mod store;
