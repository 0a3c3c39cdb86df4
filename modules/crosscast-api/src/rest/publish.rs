// The inbound publish endpoint. Credentials come from the session store;
// the request body carries the composed post and its targets.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;

use crosscast_common::{ConnectionDetails, Platform};
use crosscast_publisher::{PublishError, PublishRequest};

use crate::AppState;

#[derive(Deserialize)]
pub struct PublishBody {
    pub platforms: Vec<Platform>,
    pub media: String,
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub prompt: String,
}

/// Run the publish pipeline for the session. A partial failure returns the
/// Post for the platforms that worked AND the error describing the rest —
/// callers handle both, not all-or-nothing.
pub async fn api_publish(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PublishBody>,
) -> impl IntoResponse {
    if body.platforms.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "no platforms requested"})),
        )
            .into_response();
    }

    // Snapshot the credential store: a reconnect during the publish must
    // not change the credentials this call uses. An unconnected session
    // still runs the pipeline — each platform fails with its own
    // missing-connection reason rather than being silently skipped.
    let connection = state
        .connections
        .read()
        .await
        .clone()
        .unwrap_or_else(ConnectionDetails::default);

    let request = PublishRequest::builder()
        .platforms(body.platforms)
        .media(body.media)
        .caption(body.caption)
        .hashtags(body.hashtags)
        .audience(body.audience)
        .prompt(body.prompt)
        .connection(connection)
        .build();

    match state.pipeline.publish(request).await {
        Ok(outcome) => {
            let failed: Vec<String> = outcome
                .failures
                .iter()
                .map(|f| f.platform.to_string())
                .collect();
            Json(serde_json::json!({
                "post": outcome.post,
                "failed_platforms": failed,
                "error": outcome.failure_summary(),
            }))
            .into_response()
        }
        Err(e @ PublishError::UnsupportedMedia(_)) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "publish: all requested platforms failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}
