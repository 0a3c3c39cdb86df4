use serde::Deserialize;

/// Error envelope the Graph API wraps every non-2xx response in.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

/// `GET /{page_id}?fields=access_token,name` — the one-time exchange of a
/// user token for a Page Access Token.
#[derive(Debug, Clone, Deserialize)]
pub struct PageTokenData {
    pub access_token: String,
    pub name: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IgAccountEnvelope {
    pub instagram_business_account: Option<IgAccount>,
}

/// Instagram business account linked to a Page.
#[derive(Debug, Clone, Deserialize)]
pub struct IgAccount {
    pub id: String,
    pub username: Option<String>,
}

/// `POST /{page_id}/photos`. `post_id` is the feed post; `id` is the photo
/// object itself. Some page configurations omit `post_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoUploadData {
    pub id: String,
    pub post_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoUploadData {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FullPictureData {
    pub full_picture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerData {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContainerStatusData {
    pub status_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaPublishData {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteData {
    #[serde(default)]
    #[allow(dead_code)]
    pub success: bool,
}

/// Processing states of an Instagram media container, read from the
/// `status_code` field while polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    InProgress,
    Finished,
    Error,
}

impl ContainerStatus {
    /// Unknown or missing codes map to `InProgress`; the caller's poll
    /// budget bounds how long they can persist.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("FINISHED") => ContainerStatus::Finished,
            Some("ERROR") | Some("EXPIRED") => ContainerStatus::Error,
            _ => ContainerStatus::InProgress,
        }
    }
}

/// Source media for an Instagram container: exactly one of `image_url` or
/// `video_url` goes into the create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerMedia {
    ImageUrl(String),
    VideoUrl(String),
}

impl ContainerMedia {
    pub(crate) fn form_field(&self) -> (&'static str, &str) {
        match self {
            ContainerMedia::ImageUrl(url) => ("image_url", url),
            ContainerMedia::VideoUrl(url) => ("video_url", url),
        }
    }
}

/// `GET /{post_id}?fields=likes.summary(true),comments.summary(true),shares`.
/// Fields are absent when a post has no activity of that kind yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngagementData {
    #[serde(default)]
    pub likes: Option<SummaryField>,
    #[serde(default)]
    pub comments: Option<SummaryField>,
    #[serde(default)]
    pub shares: Option<ShareCount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryField {
    pub summary: CountSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountSummary {
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareCount {
    pub count: u64,
}

impl EngagementData {
    pub fn likes(&self) -> u64 {
        self.likes.as_ref().map(|f| f.summary.total_count).unwrap_or(0)
    }

    pub fn comments(&self) -> u64 {
        self.comments.as_ref().map(|f| f.summary.total_count).unwrap_or(0)
    }

    pub fn shares(&self) -> u64 {
        self.shares.as_ref().map(|s| s.count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_status_codes_map() {
        assert_eq!(ContainerStatus::from_code(Some("FINISHED")), ContainerStatus::Finished);
        assert_eq!(ContainerStatus::from_code(Some("ERROR")), ContainerStatus::Error);
        assert_eq!(ContainerStatus::from_code(Some("EXPIRED")), ContainerStatus::Error);
        assert_eq!(ContainerStatus::from_code(Some("IN_PROGRESS")), ContainerStatus::InProgress);
        assert_eq!(ContainerStatus::from_code(Some("PUBLISHED")), ContainerStatus::InProgress);
        assert_eq!(ContainerStatus::from_code(None), ContainerStatus::InProgress);
    }

    #[test]
    fn parse_photo_upload_with_post_id() {
        let data: PhotoUploadData =
            serde_json::from_str(r#"{"id":"10158","post_id":"10158_44932"}"#).unwrap();
        assert_eq!(data.id, "10158");
        assert_eq!(data.post_id.as_deref(), Some("10158_44932"));
    }

    #[test]
    fn parse_photo_upload_without_post_id() {
        let data: PhotoUploadData = serde_json::from_str(r#"{"id":"10158"}"#).unwrap();
        assert_eq!(data.post_id, None);
    }

    #[test]
    fn parse_engagement_summary() {
        let json = r#"{
            "likes": {"data": [], "summary": {"total_count": 12}},
            "comments": {"data": [], "summary": {"total_count": 3}},
            "shares": {"count": 2},
            "id": "10158_44932"
        }"#;
        let data: EngagementData = serde_json::from_str(json).unwrap();
        assert_eq!(data.likes(), 12);
        assert_eq!(data.comments(), 3);
        assert_eq!(data.shares(), 2);
    }

    #[test]
    fn engagement_fields_default_to_zero() {
        let data: EngagementData = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert_eq!(data.likes(), 0);
        assert_eq!(data.comments(), 0);
        assert_eq!(data.shares(), 0);
    }

    #[test]
    fn parse_error_envelope() {
        let json = r#"{"error":{"message":"Invalid OAuth access token.","type":"OAuthException","code":190}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.message, "Invalid OAuth access token.");
    }
}
