// Facebook Page publishing: photo uploads (multipart) and hosted-video
// registration.

use std::sync::Arc;

use tracing::{info, warn};

use crosscast_common::FacebookConnection;

use crate::error::{PublishError, Result};
use crate::media::{decode_image, MediaPayload};
use crate::traits::GraphApi;

/// Outcome of a Facebook publish.
#[derive(Debug, Clone)]
pub struct FacebookPublishData {
    pub post_id: String,
    /// Public URL of the uploaded photo, fetched right after the upload.
    /// `None` for videos, and for photos whose follow-up fetch failed —
    /// the photo is live either way.
    pub public_photo_url: Option<String>,
}

pub struct FacebookPublisher {
    api: Arc<dyn GraphApi>,
}

impl FacebookPublisher {
    pub fn new(api: Arc<dyn GraphApi>) -> Self {
        Self { api }
    }

    pub async fn publish(
        &self,
        conn: &FacebookConnection,
        caption: &str,
        media: &MediaPayload,
    ) -> Result<FacebookPublishData> {
        match media {
            MediaPayload::InlineImage { data, .. } => {
                self.publish_photo(conn, caption, data).await
            }
            MediaPayload::HostedVideo { url } => self.publish_video(conn, caption, url).await,
        }
    }

    async fn publish_photo(
        &self,
        conn: &FacebookConnection,
        caption: &str,
        data: &str,
    ) -> Result<FacebookPublishData> {
        let bytes = decode_image(data)?;
        info!(
            page_id = conn.page_id.as_str(),
            bytes = bytes.len(),
            "facebook: uploading photo"
        );

        let uploaded = self
            .api
            .upload_photo(&conn.page_id, &conn.page_access_token, caption, bytes)
            .await
            .map_err(|e| PublishError::Facebook(e.to_string()))?;
        let post_id = uploaded.post_id.unwrap_or(uploaded.id);

        // The public photo URL feeds the Instagram image path downstream.
        // A failed follow-up fetch does not undo the publish: the photo is
        // live, Instagram just cannot reference it this cycle.
        let public_photo_url = match self
            .api
            .full_picture(&post_id, &conn.page_access_token)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    post_id = post_id.as_str(),
                    error = %e,
                    "facebook: full_picture fetch failed, Instagram image publish unavailable this cycle"
                );
                None
            }
        };

        Ok(FacebookPublishData {
            post_id,
            public_photo_url,
        })
    }

    async fn publish_video(
        &self,
        conn: &FacebookConnection,
        caption: &str,
        url: &str,
    ) -> Result<FacebookPublishData> {
        info!(page_id = conn.page_id.as_str(), "facebook: registering hosted video");

        let post_id = self
            .api
            .upload_video(&conn.page_id, &conn.page_access_token, caption, url)
            .await
            .map_err(|e| PublishError::Facebook(e.to_string()))?;

        Ok(FacebookPublishData {
            post_id,
            public_photo_url: None,
        })
    }
}
