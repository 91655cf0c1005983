// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Summary statistics over a set of projects.

use crate::models::project::{Project, Status};

/// The four summary figures shown above the project views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub ongoing: usize,
    /// Mean completion percent, rounded half up. Zero for an empty set.
    pub avg_completion: u8,
}

/// Aggregate counts and average completion over `projects`.
pub fn compute_stats<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Stats {
    let mut stats = Stats::default();
    let mut completion_sum: u64 = 0;

    for project in projects {
        stats.total += 1;
        completion_sum += u64::from(project.completion);
        match project.status {
            Status::Completed => stats.completed += 1,
            Status::Ongoing => stats.ongoing += 1,
            Status::Other(_) => {}
        }
    }

    if stats.total > 0 {
        let total = stats.total as u64;
        stats.avg_completion = ((2 * completion_sum + total) / (2 * total)) as u8;
    }
    stats
}
