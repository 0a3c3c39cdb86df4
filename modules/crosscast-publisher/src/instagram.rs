// Instagram Business publishing: the two-phase container protocol.
//
// Container lifecycle, discovered via polling:
//
//   CREATED --(poll, IN_PROGRESS)--> CREATED
//   CREATED --(poll, FINISHED)-----> READY
//   CREATED --(poll, ERROR)--------> FAILED    (terminal)
//   CREATED --(attempts exhausted)-> FAILED    (terminal, timed out)
//   READY   --(publish call)-------> PUBLISHED (terminal)
//
// The container is consumed exactly once by the publish call and has no
// identity afterward.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crosscast_common::InstagramConnection;
use graph_client::{ContainerMedia, ContainerStatus};

use crate::error::{PublishError, Result};
use crate::traits::GraphApi;

/// Bounds for the container status poll. Defaults allow ~60s of processing.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            attempts: 20,
            interval: Duration::from_secs(3),
        }
    }
}

/// Media source for an Instagram publish. The image URL must be publicly
/// hosted — for dashboard posts that is the Facebook photo URL captured by
/// the preceding Facebook publish; the orchestrator enforces its presence.
#[derive(Debug, Clone)]
pub enum IgMedia {
    Image { url: String },
    Video { url: String },
}

pub struct InstagramPublisher {
    api: Arc<dyn GraphApi>,
    poll: PollConfig,
}

impl InstagramPublisher {
    pub fn new(api: Arc<dyn GraphApi>, poll: PollConfig) -> Self {
        Self { api, poll }
    }

    /// Create a container for the media, wait for it to finish processing,
    /// then publish it. Returns the published media id.
    pub async fn publish(
        &self,
        conn: &InstagramConnection,
        page_token: &str,
        caption: &str,
        media: &IgMedia,
    ) -> Result<String> {
        let source = match media {
            IgMedia::Image { url } => ContainerMedia::ImageUrl(url.clone()),
            IgMedia::Video { url } => ContainerMedia::VideoUrl(url.clone()),
        };

        info!(
            ig_user_id = conn.ig_user_id.as_str(),
            "instagram: creating media container"
        );
        let creation_id = self
            .api
            .create_media_container(&conn.ig_user_id, page_token, caption, &source)
            .await
            .map_err(|e| PublishError::Instagram(e.to_string()))?;

        self.wait_for_container(&creation_id, page_token).await?;

        info!(
            creation_id = creation_id.as_str(),
            "instagram: publishing container"
        );
        let media_id = self
            .api
            .publish_media_container(&conn.ig_user_id, page_token, &creation_id)
            .await
            .map_err(|e| PublishError::Instagram(e.to_string()))?;

        Ok(media_id)
    }

    /// Poll the container until FINISHED, up to the configured attempt
    /// budget. Each publish call owns its own loop, so one slow container
    /// never blocks an unrelated request; cancelling the caller's future
    /// aborts the wait.
    async fn wait_for_container(&self, creation_id: &str, page_token: &str) -> Result<()> {
        for attempt in 1..=self.poll.attempts {
            let status = self
                .api
                .media_container_status(creation_id, page_token)
                .await
                .map_err(|e| PublishError::Instagram(e.to_string()))?;

            match status {
                ContainerStatus::Finished => {
                    debug!(creation_id, attempt, "instagram: container finished");
                    return Ok(());
                }
                ContainerStatus::Error => {
                    return Err(PublishError::Instagram(
                        "media container entered error state".to_string(),
                    ));
                }
                ContainerStatus::InProgress => {
                    debug!(creation_id, attempt, "instagram: container still processing");
                    if attempt < self.poll.attempts {
                        tokio::time::sleep(self.poll.interval).await;
                    }
                }
            }
        }

        Err(PublishError::PollingTimeout {
            attempts: self.poll.attempts,
        })
    }
}
