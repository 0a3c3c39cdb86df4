use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Platforms ---

/// Publishing destinations the dashboard knows about. Youtube has no real
/// API integration behind it; it is exercised through the connected flag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Facebook,
    Instagram,
    Youtube,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Facebook => write!(f, "facebook"),
            Platform::Instagram => write!(f, "instagram"),
            Platform::Youtube => write!(f, "youtube"),
        }
    }
}

// --- Post ---

/// A published (or partially published) dashboard post.
///
/// `platforms` holds only the platforms whose publish was confirmed by the
/// remote API. `id` is the first platform-assigned id in execution order,
/// or a locally generated id when no platform produced one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub platforms: Vec<Platform>,
    pub audience: String,
    pub media_url: String,
    pub prompt: String,
    pub content: GeneratedContent,
    pub posted_at: DateTime<Utc>,
    pub engagement: Engagement,
}

/// Per-platform caption variants plus the hashtag list, as composed for the
/// publish. Caption generation itself happens upstream in the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub captions: BTreeMap<Platform, String>,
    pub hashtags: Vec<String>,
}

/// Engagement counters, zero at publish time and refreshed out-of-band
/// from the insights endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

// --- Connections ---

/// Per-session platform credentials. Built on a successful connect exchange,
/// cleared on disconnect. Read-only for the duration of a publish call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionDetails {
    pub facebook: Option<FacebookConnection>,
    pub instagram: Option<InstagramConnection>,
    #[serde(default)]
    pub youtube_connected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacebookConnection {
    pub page_id: String,
    pub page_name: String,
    pub page_access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstagramConnection {
    pub ig_user_id: String,
    pub username: Option<String>,
}

impl ConnectionDetails {
    /// Instagram publishing needs both the Page Access Token (Facebook side)
    /// and a resolved business-account id. Missing either means the platform
    /// fails with a missing-connection reason, never a silent skip.
    pub fn instagram_ready(&self) -> Option<(&FacebookConnection, &InstagramConnection)> {
        match (&self.facebook, &self.instagram) {
            (Some(fb), Some(ig)) => Some((fb, ig)),
            _ => None,
        }
    }
}
