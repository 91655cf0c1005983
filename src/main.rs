// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! projdash - Project status dashboard
//!
//! A cross-platform desktop dashboard that filters a list of projects,
//! summarises their progress and keeps screenshots and videos attached
//! to each project.

mod app;
mod config;
mod dashboard;
mod engine;
mod error;
mod io;
mod media;
mod models;
mod ui;
mod util;
mod view;

use anyhow::Result;
use app::DashboardApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use dashboard::DashboardController;
use io::store::{FileStore, KeyValueStore, MemoryStore};
use media::{AttachmentController, MediaRepository};
use models::project::ProjectStore;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::from_cli(&cli)?;

    // A broken project list is reported in the window instead of aborting.
    let mut startup_error = None;
    let projects = match config.projects_path() {
        Some(path) => match io::serialization::import_projects(&path) {
            Ok(projects) => projects,
            Err(e) => {
                log::error!("{:#}", e);
                startup_error = Some(format!("{:#}", e));
                Vec::new()
            }
        },
        None => {
            log::info!("No project list given (use --projects or File > Open Projects)");
            Vec::new()
        }
    };
    let store = ProjectStore::new(projects).unwrap_or_else(|e| {
        log::error!("Rejected project list: {:#}", e);
        startup_error = Some(format!("Rejected project list: {}", e));
        ProjectStore::default()
    });
    if store.is_empty() {
        log::warn!("The project list is empty");
    }

    let backend: Arc<dyn KeyValueStore> = if config.ephemeral {
        log::info!("Attached media is kept in memory only");
        Arc::new(match config.quota_bytes {
            Some(quota) => MemoryStore::with_quota(quota),
            None => MemoryStore::new(),
        })
    } else {
        let file_store = FileStore::new(config.resolve_store_dir()?, config.quota_bytes);
        log::info!("Attached media is stored in {}", file_store.dir().display());
        Arc::new(file_store)
    };
    let repository = Arc::new(MediaRepository::new(backend, config.key_prefix.clone()));

    let mut controller = DashboardController::new(
        store,
        AttachmentController::new(repository),
        config.search_scope,
    );
    if let Some(message) = startup_error {
        controller.report_error(message);
    }
    let app = DashboardApp::new(controller);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Project Dashboard")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "projdash",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
