// Publish orchestration: fixed platform ordering, per-platform publishers,
// partial-failure aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crosscast_common::{ConnectionDetails, Engagement, GeneratedContent, Platform, Post};

use crate::error::{PublishError, Result};
use crate::facebook::{FacebookPublishData, FacebookPublisher};
use crate::instagram::{IgMedia, InstagramPublisher, PollConfig};
use crate::media::{classify, MediaPayload};
use crate::traits::GraphApi;
use crate::youtube::YoutubePublisher;

/// Fixed execution order: Facebook strictly before Instagram, regardless of
/// request order, because the Instagram image path consumes the public photo
/// URL of the Facebook upload. The stub platform goes last.
const EXECUTION_ORDER: [Platform; 3] =
    [Platform::Facebook, Platform::Instagram, Platform::Youtube];

/// A locally-composed post plus its targets and session credentials.
#[derive(Debug, Clone, TypedBuilder)]
pub struct PublishRequest {
    pub platforms: Vec<Platform>,
    /// Data URL (inline image) or hosted https URL (video).
    pub media: String,
    pub caption: String,
    #[builder(default)]
    pub hashtags: Vec<String>,
    #[builder(default)]
    pub audience: String,
    #[builder(default)]
    pub prompt: String,
    pub connection: ConnectionDetails,
}

/// One failed platform with its reason, preserved verbatim for the caller.
#[derive(Debug, Clone)]
pub struct PlatformFailure {
    pub platform: Platform,
    pub reason: String,
}

/// What a publish call produced: the persisted Post (succeeded platforms
/// only) plus every per-platform failure. Callers receive both at once on
/// a partial failure — this is not all-or-nothing.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub post: Post,
    pub failures: Vec<PlatformFailure>,
}

impl PublishOutcome {
    /// `"<platform> (<reason>)"`, comma-joined, for every failed platform.
    pub fn failure_summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(summarize(&self.failures))
    }
}

fn summarize(failures: &[PlatformFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.platform, f.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct PublishPipeline {
    facebook: FacebookPublisher,
    instagram: InstagramPublisher,
    youtube: YoutubePublisher,
}

impl PublishPipeline {
    pub fn new(api: Arc<dyn GraphApi>, poll: PollConfig) -> Self {
        Self {
            facebook: FacebookPublisher::new(api.clone()),
            instagram: InstagramPublisher::new(api, poll),
            youtube: YoutubePublisher,
        }
    }

    /// Resolve the fixed execution order for the requested platforms.
    /// Duplicates collapse; unrequested platforms are skipped.
    fn execution_order(requested: &[Platform]) -> Vec<Platform> {
        EXECUTION_ORDER
            .iter()
            .copied()
            .filter(|p| requested.contains(p))
            .collect()
    }

    /// Publish a post to every requested platform, sequentially, in the
    /// fixed execution order. Per-platform failures never abort later
    /// platforms; only when every platform fails does this return an error.
    pub async fn publish(&self, request: PublishRequest) -> Result<PublishOutcome> {
        let payload = classify(&request.media)?;
        let caption = compose_caption(&request.caption, &request.hashtags);
        let order = Self::execution_order(&request.platforms);

        let mut published: Vec<(Platform, String)> = Vec::new();
        let mut failures: Vec<PlatformFailure> = Vec::new();
        let mut facebook_photo_url: Option<String> = None;

        for platform in order {
            let result = match platform {
                Platform::Facebook => {
                    self.publish_facebook(
                        &request.connection,
                        &caption,
                        &payload,
                        &mut facebook_photo_url,
                    )
                    .await
                }
                Platform::Instagram => {
                    self.publish_instagram(
                        &request.connection,
                        &caption,
                        &payload,
                        facebook_photo_url.as_deref(),
                    )
                    .await
                }
                Platform::Youtube => self.youtube.publish(request.connection.youtube_connected),
            };

            match result {
                Ok(remote_id) => {
                    info!(platform = %platform, remote_id = remote_id.as_str(), "publish succeeded");
                    published.push((platform, remote_id));
                }
                Err(e) => {
                    warn!(platform = %platform, error = %e, "publish failed");
                    failures.push(PlatformFailure {
                        platform,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if published.is_empty() {
            return Err(PublishError::AllPlatformsFailed(summarize(&failures)));
        }

        let post = build_post(&request, &caption, &published);
        Ok(PublishOutcome { post, failures })
    }

    async fn publish_facebook(
        &self,
        connection: &ConnectionDetails,
        caption: &str,
        payload: &MediaPayload,
        photo_url_out: &mut Option<String>,
    ) -> Result<String> {
        let conn = connection
            .facebook
            .as_ref()
            .ok_or(PublishError::ConnectionMissing)?;

        let FacebookPublishData {
            post_id,
            public_photo_url,
        } = self.facebook.publish(conn, caption, payload).await?;

        *photo_url_out = public_photo_url;
        Ok(post_id)
    }

    async fn publish_instagram(
        &self,
        connection: &ConnectionDetails,
        caption: &str,
        payload: &MediaPayload,
        facebook_photo_url: Option<&str>,
    ) -> Result<String> {
        let (fb, ig) = connection
            .instagram_ready()
            .ok_or(PublishError::ConnectionMissing)?;

        let media = match payload {
            // Image posts reference the Facebook-hosted public photo URL.
            // Without one (Facebook not requested, failed, or the URL fetch
            // came back empty) there is nothing to create a container from.
            MediaPayload::InlineImage { .. } => {
                let url = facebook_photo_url.ok_or(PublishError::InstagramDependency)?;
                IgMedia::Image {
                    url: url.to_string(),
                }
            }
            MediaPayload::HostedVideo { url } => IgMedia::Video { url: url.clone() },
        };

        self.instagram
            .publish(ig, &fb.page_access_token, caption, &media)
            .await
    }
}

/// Request caption plus a hashtag line, the form every platform receives.
fn compose_caption(caption: &str, hashtags: &[String]) -> String {
    let tags: Vec<String> = hashtags
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| format!("#{}", t.trim_start_matches('#')))
        .collect();
    if tags.is_empty() {
        caption.to_string()
    } else {
        format!("{}\n\n{}", caption.trim_end(), tags.join(" "))
    }
}

fn build_post(
    request: &PublishRequest,
    caption: &str,
    published: &[(Platform, String)],
) -> Post {
    let id = published
        .first()
        .map(|(_, remote_id)| remote_id.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut captions = BTreeMap::new();
    for platform in &request.platforms {
        captions.insert(*platform, caption.to_string());
    }

    Post {
        id,
        platforms: published.iter().map(|(p, _)| *p).collect(),
        audience: request.audience.clone(),
        media_url: request.media.clone(),
        prompt: request.prompt.clone(),
        content: GeneratedContent {
            captions,
            hashtags: request.hashtags.clone(),
        },
        posted_at: Utc::now(),
        engagement: Engagement::default(),
    }
}
