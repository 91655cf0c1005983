// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pure filtering and aggregation over the project list.

pub mod filter;
pub mod stats;
