// Stub third platform: no real API behind it. Lets the pipeline be
// exercised end-to-end without every integration configured.

use tracing::info;
use uuid::Uuid;

use crate::error::{PublishError, Result};

pub struct YoutubePublisher;

impl YoutubePublisher {
    /// Succeeds unconditionally when the account is marked connected,
    /// returning a locally generated id.
    pub fn publish(&self, connected: bool) -> Result<String> {
        if !connected {
            return Err(PublishError::NotConnected);
        }
        let id = format!("yt_{}", Uuid::new_v4());
        info!(id = id.as_str(), "youtube: recorded local publish");
        Ok(id)
    }
}
