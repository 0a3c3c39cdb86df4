use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue},
    routing::{delete, get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crosscast_common::{Config, ConnectionDetails};
use crosscast_publisher::{PollConfig, PublishPipeline};
use graph_client::GraphClient;

mod rest;

pub struct AppState {
    pub graph: GraphClient,
    pub pipeline: PublishPipeline,
    /// Session credential store: created on a successful connect exchange,
    /// cleared on disconnect. Publish handlers snapshot it, so a reconnect
    /// never mutates the credentials an in-flight publish is using.
    pub connections: RwLock<Option<ConnectionDetails>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("crosscast_api=info".parse()?)
                .add_directive("crosscast_publisher=info".parse()?),
        )
        .init();

    let config = Config::from_env();

    let graph = GraphClient::new();
    let poll = PollConfig {
        attempts: config.ig_poll_attempts,
        interval: config.ig_poll_interval,
    };
    let pipeline = PublishPipeline::new(Arc::new(graph.clone()), poll);

    let state = Arc::new(AppState {
        graph,
        pipeline,
        connections: RwLock::new(None),
    });

    let app = Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Session connection lifecycle
        .route("/api/connect", post(rest::connect::api_connect))
        .route("/api/disconnect", post(rest::connect::api_disconnect))
        .route("/api/connection", get(rest::connect::api_connection))
        // Publish pipeline
        .route("/api/publish", post(rest::publish::api_publish))
        // Insights and deletion for the surrounding dashboard
        .route("/api/posts/{id}/insights", get(rest::posts::api_post_insights))
        .route("/api/posts/{id}", delete(rest::posts::api_delete_post))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Never cache: responses carry session state
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Crosscast API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
