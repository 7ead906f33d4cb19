//! services/client/src/adapters/media.rs
//!
//! Turns a file on disk into a transportable `MediaAttachment`.

use crate::error::ClientError;
use quiz_master_core::{MediaAttachment, MediaKind, ValidationError};
use std::path::Path;
use tracing::info;

/// Maps a file extension to its MIME type. Unknown extensions fall back to
/// `application/octet-stream`, which the attachment filter rejects.
pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Reads an image or PDF and base64-encodes it alongside its MIME type and file name.
pub async fn load_media(path: &Path) -> Result<MediaAttachment, ClientError> {
    let mime_type = mime_type_for(path);
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("attachment")
        .to_string();

    // Check the type before reading a possibly large file.
    if MediaKind::from_mime(mime_type).is_none() {
        return Err(ValidationError::UnsupportedMedia(mime_type.to_string()).into());
    }

    let bytes = tokio::fs::read(path).await?;
    info!("Loaded attachment '{}' ({}, {} bytes)", name, mime_type, bytes.len());
    Ok(MediaAttachment::from_bytes(name, mime_type, &bytes)?)
}
