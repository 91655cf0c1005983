// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media persistence and file intake.

pub mod attachment;
pub mod repository;

pub use attachment::AttachmentController;
pub use repository::MediaRepository;
