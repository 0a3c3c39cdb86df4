// Engagement insights and deletion for published posts. Both reuse the
// session's Page Access Token.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crosscast_common::Engagement;
use graph_client::EngagementData;

use crate::AppState;

async fn page_token(state: &AppState) -> Option<String> {
    state
        .connections
        .read()
        .await
        .as_ref()
        .and_then(|c| c.facebook.as_ref())
        .map(|f| f.page_access_token.clone())
}

pub async fn api_post_insights(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(token) = page_token(&state).await else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "connection details not provided"})),
        )
            .into_response();
    };

    match state.graph.post_engagement(&id, &token).await {
        Ok(data) => Json(serde_json::json!({
            "post_id": id,
            "engagement": engagement_from(&data),
        }))
        .into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

pub async fn api_delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(token) = page_token(&state).await else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "connection details not provided"})),
        )
            .into_response();
    };

    match state.graph.delete_post(&id, &token).await {
        Ok(()) => {
            info!(post_id = id.as_str(), "posts: deleted");
            Json(serde_json::json!({"deleted": true})).into_response()
        }
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

/// Flatten the Graph summary shape into the dashboard's counters.
fn engagement_from(data: &EngagementData) -> Engagement {
    Engagement {
        likes: data.likes(),
        comments: data.comments(),
        shares: data.shares(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_flattens_graph_summaries() {
        let json = r#"{
            "likes": {"data": [], "summary": {"total_count": 7}},
            "comments": {"data": [], "summary": {"total_count": 1}},
            "id": "10158_44932"
        }"#;
        let data: EngagementData = serde_json::from_str(json).unwrap();
        let engagement = engagement_from(&data);
        assert_eq!(engagement.likes, 7);
        assert_eq!(engagement.comments, 1);
        assert_eq!(engagement.shares, 0);
    }
}
