// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading (images and videos).
//!
//! This module reads user-supplied files into `data:` URIs for storage and
//! decodes stored screenshots back into RGBA pixels for display in egui.

use crate::error::ReadError;
use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a user-supplied file's bytes come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// A file on disk (native drop or file picker).
    Path(PathBuf),
    /// Bytes already in memory (drops that carry their content).
    Bytes(Arc<[u8]>),
}

/// A file handed to the dashboard by drag-drop or the file picker.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    /// Declared media type; empty when the platform did not provide one.
    pub mime: String,
    pub source: FileSource,
}

impl IncomingFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            mime: String::new(),
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            source: FileSource::Bytes(bytes.into()),
        }
    }

    /// The declared media type, or one inferred from the file extension.
    pub fn media_type(&self) -> Option<String> {
        if !self.mime.trim().is_empty() {
            return Some(self.mime.trim().to_string());
        }
        guess_mime(&self.name).map(str::to_string)
    }

    /// Screenshot, video, or `None` for anything that is neither.
    #[cfg(test)]
    pub fn kind(&self) -> Option<crate::models::media::MediaKind> {
        self.media_type().as_deref().and_then(crate::models::media::MediaKind::from_mime)
    }

    /// Read the whole file. An empty file is an error.
    pub fn read_bytes(&self) -> Result<Vec<u8>, ReadError> {
        let bytes = match &self.source {
            FileSource::Bytes(bytes) => bytes.to_vec(),
            FileSource::Path(path) => std::fs::read(path).map_err(|source| ReadError::Io {
                name: self.name.clone(),
                source,
            })?,
        };
        if bytes.is_empty() {
            return Err(ReadError::NoContent {
                name: self.name.clone(),
            });
        }
        Ok(bytes)
    }
}

/// Media type for well-known image and video extensions.
pub fn guess_mime(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "ogv" => "video/ogg",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}

/// Encode bytes as a base64 `data:` URI.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a base64 `data:` URI into its media type and decoded bytes.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| anyhow!("not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("data URI has no payload"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| anyhow!("only base64 data URIs are supported"))?;
    let bytes = STANDARD.decode(payload.trim())?;
    Ok((mime.to_string(), bytes))
}

/// Decoded RGBA image ready to upload as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode a stored screenshot, shrinking it to at most `max_side` pixels.
pub fn load_thumbnail(url: &str, max_side: u32) -> Result<LoadedImage> {
    let (_, bytes) = decode_data_uri(url)?;
    let image = image::load_from_memory(&bytes)?;
    let image = if image.width() > max_side || image.height() > max_side {
        image.thumbnail(max_side, max_side)
    } else {
        image
    };
    let rgba = image.to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::MediaKind;

    #[test]
    fn test_declared_type_wins_over_extension() {
        let file = IncomingFile::from_bytes("clip.png", "video/mp4", vec![1u8, 2, 3]);
        assert_eq!(file.kind(), Some(MediaKind::Video));
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(IncomingFile::from_path("/tmp/a/Shot.PNG").kind(), Some(MediaKind::Screenshot));
        assert_eq!(IncomingFile::from_path("/tmp/a/demo.webm").kind(), Some(MediaKind::Video));
        assert_eq!(IncomingFile::from_path("/tmp/a/readme.txt").kind(), None);
        assert_eq!(IncomingFile::from_path("/tmp/a/noext").kind(), None);
    }

    #[test]
    fn test_data_uri_roundtrip() {
        let uri = to_data_uri("image/png", b"hello");
        assert_eq!(uri, "data:image/png;base64,aGVsbG8=");
        let (mime, bytes) = decode_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"hello");
        assert!(decode_data_uri("https://example.com/a.png").is_err());
    }

    #[test]
    fn test_read_missing_file_reports_name() {
        let file = IncomingFile::from_path("/definitely/not/here.png");
        let err = file.read_bytes().unwrap_err();
        assert!(err.to_string().contains("here.png"));
    }

    #[test]
    fn test_empty_file_has_no_content() {
        let dropped = IncomingFile::from_bytes("blank.png", "image/png", Vec::<u8>::new());
        assert!(matches!(dropped.read_bytes(), Err(ReadError::NoContent { ref name }) if name == "blank.png"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mp4");
        std::fs::write(&path, b"").unwrap();
        assert!(matches!(
            IncomingFile::from_path(&path).read_bytes(),
            Err(ReadError::NoContent { .. })
        ));
    }

    #[test]
    fn test_thumbnail_is_downscaled() {
        let image = image::RgbaImage::from_pixel(64, 32, image::Rgba([255, 0, 0, 255]));
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let loaded = load_thumbnail(&to_data_uri("image/png", &png), 16).unwrap();
        assert_eq!((loaded.width, loaded.height), (16, 8));
        assert_eq!(loaded.pixels.len(), 16 * 8 * 4);
    }
}
