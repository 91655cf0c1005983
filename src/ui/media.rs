// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media region and full-view window.
//!
//! Screenshots are decoded lazily into textures, cached per project and
//! dropped whenever that project's media region is refreshed.

use super::UiAction;
use crate::dashboard::{DashboardEvent, MediaRef};
use crate::io::media::load_thumbnail;
use crate::models::media::{MediaItem, MediaKind};
use crate::models::project::ProjectId;
use crate::view::MediaRegion;
use std::collections::HashMap;

/// Largest side of a decoded screenshot texture.
const TEXTURE_MAX_SIDE: u32 = 512;

/// Largest side of a thumbnail on a card.
const THUMBNAIL_SIDE: f32 = 96.0;

/// Largest side of an image in the full view.
const PREVIEW_SIDE: f32 = 480.0;

struct CachedRegion {
    revision: u64,
    /// `None` until decoding was attempted, `Some(None)` when it failed
    textures: Vec<Option<Option<egui::TextureHandle>>>,
}

/// Screenshot textures keyed by project and position.
#[derive(Default)]
pub struct ThumbnailCache {
    entries: HashMap<ProjectId, CachedRegion>,
}

impl ThumbnailCache {
    pub fn get(
        &mut self,
        ctx: &egui::Context,
        project_id: &ProjectId,
        region: &MediaRegion,
        index: usize,
    ) -> Option<egui::TextureHandle> {
        let screenshots = &region.media.screenshots;
        let item = screenshots.get(index)?;

        let entry = self
            .entries
            .entry(project_id.clone())
            .or_insert_with(|| CachedRegion {
                revision: region.revision,
                textures: Vec::new(),
            });
        if entry.revision != region.revision || entry.textures.len() != screenshots.len() {
            entry.revision = region.revision;
            entry.textures = vec![None; screenshots.len()];
        }

        entry.textures[index]
            .get_or_insert_with(|| decode(ctx, project_id, index, item))
            .clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn decode(
    ctx: &egui::Context,
    project_id: &ProjectId,
    index: usize,
    item: &MediaItem,
) -> Option<egui::TextureHandle> {
    match load_thumbnail(&item.url, TEXTURE_MAX_SIDE) {
        Ok(image) => {
            let size = [image.width as usize, image.height as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
            Some(ctx.load_texture(
                format!("media-{}-{}", project_id, index),
                color_image,
                egui::TextureOptions::LINEAR,
            ))
        }
        Err(e) => {
            log::warn!("Cannot preview '{}': {}", item.name, e);
            None
        }
    }
}

/// Scale `size` down so its longest side is at most `max_side`.
fn fit(size: egui::Vec2, max_side: f32) -> egui::Vec2 {
    let longest = size.x.max(size.y);
    if longest <= max_side || longest <= 0.0 {
        size
    } else {
        size * (max_side / longest)
    }
}

/// Display one project's screenshots, videos and media controls.
pub fn show_region(
    ui: &mut egui::Ui,
    project_id: &ProjectId,
    region: &MediaRegion,
    thumbnails: &mut ThumbnailCache,
    actions: &mut Vec<UiAction>,
) {
    let ctx = ui.ctx().clone();
    let media = &region.media;
    let media_ref = |kind, index| MediaRef {
        project_id: project_id.clone(),
        kind,
        index,
    };

    ui.label(egui::RichText::new(format!("📷 Screenshots ({})", media.screenshots.len())).strong());
    if media.screenshots.is_empty() {
        ui.label(egui::RichText::new("No screenshots yet.").weak());
    }
    ui.horizontal_wrapped(|ui| {
        for (index, item) in media.screenshots.iter().enumerate() {
            ui.vertical(|ui| {
                let opened = match thumbnails.get(&ctx, project_id, region, index) {
                    Some(texture) => ui
                        .add(
                            egui::Image::new((texture.id(), fit(texture.size_vec2(), THUMBNAIL_SIDE)))
                                .sense(egui::Sense::click()),
                        )
                        .on_hover_text(item.name.as_str())
                        .clicked(),
                    None => ui.button(item.name.as_str()).clicked(),
                };
                if opened {
                    actions.push(UiAction::Dispatch(DashboardEvent::OpenMedia(media_ref(
                        MediaKind::Screenshot,
                        index,
                    ))));
                }
                if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                    actions.push(UiAction::Dispatch(DashboardEvent::DeleteMedia(media_ref(
                        MediaKind::Screenshot,
                        index,
                    ))));
                }
            });
        }
    });

    ui.label(egui::RichText::new(format!("🎞 Videos ({})", media.videos.len())).strong());
    if media.videos.is_empty() {
        ui.label(egui::RichText::new("No videos yet.").weak());
    }
    for (index, item) in media.videos.iter().enumerate() {
        ui.horizontal(|ui| {
            if ui.link(item.name.as_str()).clicked() {
                actions.push(UiAction::Dispatch(DashboardEvent::OpenMedia(media_ref(
                    MediaKind::Video,
                    index,
                ))));
            }
            if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                actions.push(UiAction::Dispatch(DashboardEvent::DeleteMedia(media_ref(
                    MediaKind::Video,
                    index,
                ))));
            }
        });
    }

    ui.horizontal(|ui| {
        if ui.button("📎 Add media...").clicked() {
            actions.push(UiAction::PickFiles(project_id.clone()));
        }
        if !media.is_empty() && ui.button("💾 Export...").clicked() {
            actions.push(UiAction::ExportMedia(project_id.clone()));
        }
    });
}

/// Window showing one item's name, preview and editable description.
///
/// `draft` holds the description being edited; it is reset whenever a
/// different item is opened.
pub fn show_full_view(
    ctx: &egui::Context,
    media_ref: &MediaRef,
    item: &MediaItem,
    region: &MediaRegion,
    thumbnails: &mut ThumbnailCache,
    draft: &mut Option<(MediaRef, String)>,
    actions: &mut Vec<UiAction>,
) {
    if draft.as_ref().map(|(r, _)| r) != Some(media_ref) {
        *draft = Some((media_ref.clone(), item.description.clone()));
    }

    let mut open = true;
    egui::Window::new(item.name.as_str())
        .id(egui::Id::new("media_full_view"))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .show(ctx, |ui| {
            match media_ref.kind {
                MediaKind::Screenshot => {
                    match thumbnails.get(ctx, &media_ref.project_id, region, media_ref.index) {
                        Some(texture) => {
                            ui.add(egui::Image::new((
                                texture.id(),
                                fit(texture.size_vec2(), PREVIEW_SIDE),
                            )));
                        }
                        None => {
                            ui.label(egui::RichText::new("Preview unavailable").weak());
                        }
                    }
                }
                MediaKind::Video => {
                    ui.label(
                        egui::RichText::new("Video playback is not available here. Use Export to save it.")
                            .weak(),
                    );
                }
            }

            ui.separator();
            ui.label(format!(
                "Added {}",
                item.timestamp
                    .with_timezone(&chrono::Local)
                    .format("%b %-d, %Y %H:%M")
            ));

            ui.label("Description:");
            if let Some((_, text)) = draft.as_mut() {
                ui.text_edit_multiline(text);
            }

            ui.horizontal(|ui| {
                let edited = draft
                    .as_ref()
                    .map(|(_, text)| text != &item.description)
                    .unwrap_or(false);
                if ui.add_enabled(edited, egui::Button::new("Save")).clicked() {
                    if let Some((_, text)) = draft.as_ref() {
                        actions.push(UiAction::Dispatch(DashboardEvent::EditDescription {
                            media: media_ref.clone(),
                            text: text.clone(),
                        }));
                    }
                }
                if ui.button("🗑 Delete").clicked() {
                    actions.push(UiAction::Dispatch(DashboardEvent::DeleteMedia(media_ref.clone())));
                }
            });
        });

    if !open {
        *draft = None;
        actions.push(UiAction::Dispatch(DashboardEvent::CloseMedia));
    }
}
