// Session connection lifecycle: the one-time Graph API token exchange and
// Instagram business-account discovery, plus disconnect.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{info, warn};

use crosscast_common::{ConnectionDetails, FacebookConnection, InstagramConnection};

use crate::AppState;

#[derive(Deserialize)]
pub struct ConnectRequest {
    pub user_access_token: String,
    pub page_id: String,
}

/// Exchange a short-lived user token for a Page Access Token, then follow
/// the Page's linked Instagram business account. Stores the resulting
/// connection details for the session.
pub async fn api_connect(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConnectRequest>,
) -> impl IntoResponse {
    let page = match state
        .graph
        .page_access_token(&body.page_id, &body.user_access_token)
        .await
    {
        Ok(page) => page,
        Err(e) => {
            warn!(page_id = body.page_id.as_str(), error = %e, "connect: page token exchange failed");
            return (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response();
        }
    };

    // A Page without a linked IG business account is still a valid
    // connection: Instagram publishes fail with a missing-connection reason
    // until one is linked.
    let instagram = match state
        .graph
        .instagram_business_account(&body.page_id, &page.access_token)
        .await
    {
        Ok(Some(account)) => Some(InstagramConnection {
            ig_user_id: account.id,
            username: account.username,
        }),
        Ok(None) => None,
        Err(e) => {
            warn!(page_id = body.page_id.as_str(), error = %e, "connect: instagram account discovery failed");
            None
        }
    };

    let instagram_username = instagram.as_ref().and_then(|i| i.username.clone());
    let details = ConnectionDetails {
        facebook: Some(FacebookConnection {
            page_id: body.page_id.clone(),
            page_name: page.name.clone(),
            page_access_token: page.access_token,
        }),
        instagram,
        // The stub platform has no credential exchange; a connected session
        // marks it available.
        youtube_connected: true,
    };

    *state.connections.write().await = Some(details);
    info!(page_id = body.page_id.as_str(), "connect: session connected");

    Json(serde_json::json!({
        "page_name": page.name,
        "instagram_username": instagram_username,
    }))
    .into_response()
}

/// Clear the session credential store.
pub async fn api_disconnect(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    *state.connections.write().await = None;
    info!("connect: session disconnected");
    Json(serde_json::json!({"disconnected": true}))
}

/// Current connection summary. Tokens are never echoed back.
pub async fn api_connection(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let connections = state.connections.read().await;
    match connections.as_ref() {
        Some(details) => Json(serde_json::json!({
            "connected": true,
            "page_name": details.facebook.as_ref().map(|f| f.page_name.clone()),
            "instagram_username": details
                .instagram
                .as_ref()
                .and_then(|i| i.username.clone()),
            "youtube_connected": details.youtube_connected,
        })),
        None => Json(serde_json::json!({"connected": false})),
    }
}
