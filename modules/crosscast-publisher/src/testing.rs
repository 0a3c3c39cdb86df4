// Test mocks for the publish pipeline.
//
// One mock at the one trait boundary: MockGraphApi (GraphApi) — scripted
// per-endpoint responses plus a call log, so chain tests follow
// MOCK → FUNCTION → OUTPUT and assert cross-platform ordering without
// reaching into pipeline internals.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use graph_client::{ContainerMedia, ContainerStatus, PhotoUploadData};

use crate::traits::GraphApi;

type Scripted<T> = Option<std::result::Result<T, String>>;

/// Scripted Graph API. Builder pattern: `.on_photo()`, `.fail_photo()`,
/// `.container_statuses()`, etc. Unregistered endpoints return `Err`.
/// When the status queue runs dry the container reports IN_PROGRESS.
pub struct MockGraphApi {
    photo: Scripted<PhotoUploadData>,
    full_picture: Scripted<Option<String>>,
    video: Scripted<String>,
    container: Scripted<String>,
    statuses: Mutex<VecDeque<ContainerStatus>>,
    publish: Scripted<String>,
    calls: Mutex<Vec<String>>,
}

impl MockGraphApi {
    pub fn new() -> Self {
        Self {
            photo: None,
            full_picture: None,
            video: None,
            container: None,
            statuses: Mutex::new(VecDeque::new()),
            publish: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_photo(mut self, id: &str, post_id: &str) -> Self {
        self.photo = Some(Ok(PhotoUploadData {
            id: id.to_string(),
            post_id: Some(post_id.to_string()),
        }));
        self
    }

    pub fn fail_photo(mut self, reason: &str) -> Self {
        self.photo = Some(Err(reason.to_string()));
        self
    }

    pub fn on_full_picture(mut self, url: &str) -> Self {
        self.full_picture = Some(Ok(Some(url.to_string())));
        self
    }

    pub fn fail_full_picture(mut self, reason: &str) -> Self {
        self.full_picture = Some(Err(reason.to_string()));
        self
    }

    pub fn on_video(mut self, id: &str) -> Self {
        self.video = Some(Ok(id.to_string()));
        self
    }

    pub fn on_container(mut self, creation_id: &str) -> Self {
        self.container = Some(Ok(creation_id.to_string()));
        self
    }

    pub fn fail_container(mut self, reason: &str) -> Self {
        self.container = Some(Err(reason.to_string()));
        self
    }

    pub fn container_statuses(self, statuses: &[ContainerStatus]) -> Self {
        self.statuses.lock().unwrap().extend(statuses.iter().copied());
        self
    }

    pub fn on_publish(mut self, media_id: &str) -> Self {
        self.publish = Some(Ok(media_id.to_string()));
        self
    }

    /// Every Graph call made, in order, with the argument that matters.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with("media_container_status"))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn scripted<T: Clone>(slot: &Scripted<T>, endpoint: &str) -> Result<T> {
        match slot {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(reason)) => bail!("{reason}"),
            None => bail!("MockGraphApi: no {endpoint} registered"),
        }
    }
}

#[async_trait]
impl GraphApi for MockGraphApi {
    async fn upload_photo(
        &self,
        page_id: &str,
        _page_token: &str,
        _caption: &str,
        _bytes: Vec<u8>,
    ) -> Result<PhotoUploadData> {
        self.record(format!("upload_photo page_id={page_id}"));
        Self::scripted(&self.photo, "photo upload")
    }

    async fn full_picture(&self, post_id: &str, _page_token: &str) -> Result<Option<String>> {
        self.record(format!("full_picture post_id={post_id}"));
        Self::scripted(&self.full_picture, "full_picture fetch")
    }

    async fn upload_video(
        &self,
        page_id: &str,
        _page_token: &str,
        _description: &str,
        file_url: &str,
    ) -> Result<String> {
        self.record(format!("upload_video page_id={page_id} file_url={file_url}"));
        Self::scripted(&self.video, "video upload")
    }

    async fn create_media_container(
        &self,
        ig_user_id: &str,
        _page_token: &str,
        _caption: &str,
        media: &ContainerMedia,
    ) -> Result<String> {
        let field = match media {
            ContainerMedia::ImageUrl(url) => format!("image_url={url}"),
            ContainerMedia::VideoUrl(url) => format!("video_url={url}"),
        };
        self.record(format!("create_media_container ig_user_id={ig_user_id} {field}"));
        Self::scripted(&self.container, "container create")
    }

    async fn media_container_status(
        &self,
        creation_id: &str,
        _page_token: &str,
    ) -> Result<ContainerStatus> {
        self.record(format!("media_container_status creation_id={creation_id}"));
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ContainerStatus::InProgress))
    }

    async fn publish_media_container(
        &self,
        ig_user_id: &str,
        _page_token: &str,
        creation_id: &str,
    ) -> Result<String> {
        self.record(format!(
            "publish_media_container ig_user_id={ig_user_id} creation_id={creation_id}"
        ));
        Self::scripted(&self.publish, "container publish")
    }
}
