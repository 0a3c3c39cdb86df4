// Trait abstraction over the Graph API client.
//
// GraphApi replaces graph_client::GraphClient at the pipeline boundary —
// all remote publish calls behind one trait. Enables deterministic testing
// with MockGraphApi: no network, no tokens, `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;

use graph_client::{ContainerMedia, ContainerStatus, GraphClient, PhotoUploadData};

#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Upload a photo to a Page via multipart. Returns the photo id and,
    /// when the Page exposes it, the feed post id.
    async fn upload_photo(
        &self,
        page_id: &str,
        page_token: &str,
        caption: &str,
        bytes: Vec<u8>,
    ) -> Result<PhotoUploadData>;

    /// Fetch the public `full_picture` URL of a published photo post.
    async fn full_picture(&self, post_id: &str, page_token: &str) -> Result<Option<String>>;

    /// Register a hosted video URL on a Page. Returns the video post id.
    async fn upload_video(
        &self,
        page_id: &str,
        page_token: &str,
        description: &str,
        file_url: &str,
    ) -> Result<String>;

    /// Create an Instagram media container. Returns the creation id.
    async fn create_media_container(
        &self,
        ig_user_id: &str,
        page_token: &str,
        caption: &str,
        media: &ContainerMedia,
    ) -> Result<String>;

    /// Read a container's processing status.
    async fn media_container_status(
        &self,
        creation_id: &str,
        page_token: &str,
    ) -> Result<ContainerStatus>;

    /// Publish a finished container. Returns the published media id.
    async fn publish_media_container(
        &self,
        ig_user_id: &str,
        page_token: &str,
        creation_id: &str,
    ) -> Result<String>;
}

#[async_trait]
impl GraphApi for GraphClient {
    async fn upload_photo(
        &self,
        page_id: &str,
        page_token: &str,
        caption: &str,
        bytes: Vec<u8>,
    ) -> Result<PhotoUploadData> {
        Ok(GraphClient::upload_photo(self, page_id, page_token, caption, bytes).await?)
    }

    async fn full_picture(&self, post_id: &str, page_token: &str) -> Result<Option<String>> {
        Ok(GraphClient::full_picture(self, post_id, page_token).await?)
    }

    async fn upload_video(
        &self,
        page_id: &str,
        page_token: &str,
        description: &str,
        file_url: &str,
    ) -> Result<String> {
        Ok(
            GraphClient::upload_video(self, page_id, page_token, description, file_url)
                .await?
                .id,
        )
    }

    async fn create_media_container(
        &self,
        ig_user_id: &str,
        page_token: &str,
        caption: &str,
        media: &ContainerMedia,
    ) -> Result<String> {
        Ok(
            GraphClient::create_media_container(self, ig_user_id, page_token, caption, media)
                .await?
                .id,
        )
    }

    async fn media_container_status(
        &self,
        creation_id: &str,
        page_token: &str,
    ) -> Result<ContainerStatus> {
        Ok(GraphClient::media_container_status(self, creation_id, page_token).await?)
    }

    async fn publish_media_container(
        &self,
        ig_user_id: &str,
        page_token: &str,
        creation_id: &str,
    ) -> Result<String> {
        Ok(
            GraphClient::publish_media_container(self, ig_user_id, page_token, creation_id)
                .await?
                .id,
        )
    }
}
