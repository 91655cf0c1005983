// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: projects and their attached media.

pub mod media;
pub mod project;
