// Media payload classification: inline data-URL images vs hosted video URLs.

use base64::Engine;

use crate::error::{PublishError, Result};

/// Broad media category a payload falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// A classified media payload, ready for platform-specific upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaPayload {
    /// `data:image/<subtype>;base64,<payload>` — images arrive inline,
    /// already compressed client-side.
    InlineImage { mime: String, data: String },
    /// `https://` URL — videos arrive pre-uploaded to a CDN; inline video
    /// payloads are impractically large for JSON request bodies.
    HostedVideo { url: String },
}

impl MediaPayload {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaPayload::InlineImage { .. } => MediaKind::Image,
            MediaPayload::HostedVideo { .. } => MediaKind::Video,
        }
    }
}

/// Classify a raw media string from the dashboard. Anything that matches
/// neither pattern is unsupported and fails the whole publish attempt —
/// no platform gets a partial upload.
pub fn classify(payload: &str) -> Result<MediaPayload> {
    if let Some(rest) = payload.strip_prefix("data:") {
        let (mime, data) = rest.split_once(";base64,").ok_or_else(|| {
            PublishError::UnsupportedMedia("data URL without a base64 payload".to_string())
        })?;
        if !mime.starts_with("image/") {
            return Err(PublishError::UnsupportedMedia(format!(
                "inline {mime} payloads are not supported"
            )));
        }
        return Ok(MediaPayload::InlineImage {
            mime: mime.to_string(),
            data: data.to_string(),
        });
    }

    if payload.starts_with("https://") {
        return Ok(MediaPayload::HostedVideo {
            url: payload.to_string(),
        });
    }

    Err(PublishError::UnsupportedMedia(
        "expected a data URL or an https:// URL".to_string(),
    ))
}

/// Decode the base64 body of an inline image for multipart upload.
pub fn decode_image(data: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| PublishError::UnsupportedMedia(format!("invalid base64 image payload: {e}")))
}
