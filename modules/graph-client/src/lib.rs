pub mod error;
pub mod types;

pub use error::{GraphError, Result};
pub use types::{
    ContainerData, ContainerMedia, ContainerStatus, EngagementData, IgAccount, MediaPublishData,
    PageTokenData, PhotoUploadData, VideoUploadData,
};

use serde::de::DeserializeOwned;
use types::{ContainerStatusData, DeleteData, ErrorEnvelope, FullPictureData, IgAccountEnvelope};

const BASE_URL: &str = "https://graph.facebook.com/v21.0";

/// Thin client over the Meta Graph API. Page Access Tokens are per-session,
/// so every call takes its token explicitly.
#[derive(Clone)]
pub struct GraphClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for GraphClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Check the response status and deserialize the body. Non-2xx bodies
    /// carry `{"error": {"message": ...}}`; the message is surfaced verbatim.
    async fn read_json<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(GraphError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Exchange a user access token for a Page Access Token.
    pub async fn page_access_token(
        &self,
        page_id: &str,
        user_token: &str,
    ) -> Result<PageTokenData> {
        let url = format!("{}/{}", self.base_url, page_id);
        let resp = self
            .client
            .get(&url)
            .query(&[("fields", "access_token,name"), ("access_token", user_token)])
            .send()
            .await?;
        self.read_json(resp).await
    }

    /// Follow the Page's linked Instagram business account, if any.
    pub async fn instagram_business_account(
        &self,
        page_id: &str,
        page_token: &str,
    ) -> Result<Option<IgAccount>> {
        let url = format!("{}/{}", self.base_url, page_id);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("fields", "instagram_business_account{id,username}"),
                ("access_token", page_token),
            ])
            .send()
            .await?;
        let envelope: IgAccountEnvelope = self.read_json(resp).await?;
        Ok(envelope.instagram_business_account)
    }

    /// Upload a photo to a Page as multipart form data.
    pub async fn upload_photo(
        &self,
        page_id: &str,
        page_token: &str,
        caption: &str,
        bytes: Vec<u8>,
    ) -> Result<PhotoUploadData> {
        let url = format!("{}/{}/photos", self.base_url, page_id);
        tracing::debug!(page_id, bytes = bytes.len(), "posting photo to page");

        let part = reqwest::multipart::Part::bytes(bytes).file_name("upload.jpg");
        let form = reqwest::multipart::Form::new()
            .part("source", part)
            .text("caption", caption.to_string())
            .text("access_token", page_token.to_string());

        let resp = self.client.post(&url).multipart(form).send().await?;
        self.read_json(resp).await
    }

    /// Fetch the public `full_picture` URL of a published photo post.
    pub async fn full_picture(&self, post_id: &str, page_token: &str) -> Result<Option<String>> {
        let url = format!("{}/{}", self.base_url, post_id);
        let resp = self
            .client
            .get(&url)
            .query(&[("fields", "full_picture"), ("access_token", page_token)])
            .send()
            .await?;
        let data: FullPictureData = self.read_json(resp).await?;
        Ok(data.full_picture)
    }

    /// Register an externally hosted video on a Page.
    pub async fn upload_video(
        &self,
        page_id: &str,
        page_token: &str,
        description: &str,
        file_url: &str,
    ) -> Result<VideoUploadData> {
        let url = format!("{}/{}/videos", self.base_url, page_id);
        tracing::debug!(page_id, file_url, "registering hosted video on page");

        let resp = self
            .client
            .post(&url)
            .form(&[
                ("file_url", file_url),
                ("description", description),
                ("access_token", page_token),
            ])
            .send()
            .await?;
        self.read_json(resp).await
    }

    /// Create an Instagram media container. Returns the creation id to poll.
    pub async fn create_media_container(
        &self,
        ig_user_id: &str,
        page_token: &str,
        caption: &str,
        media: &ContainerMedia,
    ) -> Result<ContainerData> {
        let url = format!("{}/{}/media", self.base_url, ig_user_id);
        let (field, media_url) = media.form_field();
        tracing::debug!(ig_user_id, field, "creating media container");

        let resp = self
            .client
            .post(&url)
            .form(&[
                (field, media_url),
                ("caption", caption),
                ("access_token", page_token),
            ])
            .send()
            .await?;
        self.read_json(resp).await
    }

    /// Read a container's processing status.
    pub async fn media_container_status(
        &self,
        creation_id: &str,
        page_token: &str,
    ) -> Result<ContainerStatus> {
        let url = format!("{}/{}", self.base_url, creation_id);
        let resp = self
            .client
            .get(&url)
            .query(&[("fields", "status_code"), ("access_token", page_token)])
            .send()
            .await?;
        let data: ContainerStatusData = self.read_json(resp).await?;
        Ok(ContainerStatus::from_code(data.status_code.as_deref()))
    }

    /// Publish a finished container. Consumes the creation id.
    pub async fn publish_media_container(
        &self,
        ig_user_id: &str,
        page_token: &str,
        creation_id: &str,
    ) -> Result<MediaPublishData> {
        let url = format!("{}/{}/media_publish", self.base_url, ig_user_id);
        let resp = self
            .client
            .post(&url)
            .form(&[("creation_id", creation_id), ("access_token", page_token)])
            .send()
            .await?;
        self.read_json(resp).await
    }

    /// Fetch the likes/comments/shares summary for a post.
    pub async fn post_engagement(
        &self,
        post_id: &str,
        page_token: &str,
    ) -> Result<EngagementData> {
        let url = format!("{}/{}", self.base_url, post_id);
        let resp = self
            .client
            .get(&url)
            .query(&[
                (
                    "fields",
                    "likes.summary(true),comments.summary(true),shares",
                ),
                ("access_token", page_token),
            ])
            .send()
            .await?;
        self.read_json(resp).await
    }

    /// Delete a post from its Page.
    pub async fn delete_post(&self, post_id: &str, page_token: &str) -> Result<()> {
        let url = format!("{}/{}", self.base_url, post_id);
        let resp = self
            .client
            .delete(&url)
            .query(&[("access_token", page_token)])
            .send()
            .await?;
        let _: DeleteData = self.read_json(resp).await?;
        Ok(())
    }
}
