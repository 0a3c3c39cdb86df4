use thiserror::Error;

/// Result type alias for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;

#[derive(Debug, Error)]
pub enum PublishError {
    /// Payload is neither an inline image data URL nor a hosted https URL.
    /// Aborts the whole publish attempt before any platform is contacted.
    #[error("Unsupported media payload: {0}")]
    UnsupportedMedia(String),

    /// Credentials for a requested platform are absent from the session.
    #[error("connection details not provided")]
    ConnectionMissing,

    /// The stub platform was requested without being marked connected.
    #[error("Not connected.")]
    NotConnected,

    /// The Facebook Graph API rejected the publish; message passed through.
    #[error("Facebook publish failed: {0}")]
    Facebook(String),

    /// The Instagram Graph API rejected a step; message passed through.
    #[error("Instagram publish failed: {0}")]
    Instagram(String),

    /// An Instagram image publish was attempted without a public photo URL
    /// from a prior successful Facebook upload.
    #[error("Facebook image publish required first")]
    InstagramDependency,

    /// The media container never reached FINISHED within the poll budget.
    #[error("Instagram media processing timed out after {attempts} status checks")]
    PollingTimeout { attempts: u32 },

    /// Every requested platform failed. Carries the per-platform summary.
    #[error("Failed to publish: {0}")]
    AllPlatformsFailed(String),
}
