use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info, warn};
use serde::Deserialize;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::AllowedOrigins;
use crate::error::ApiError;
use crate::{TranscriptFetcher, extract_video_id, output};

const SERVICE_NAME: &str = "ytserve";

#[derive(Clone)]
pub struct AppState {
    fetcher: Arc<dyn TranscriptFetcher>,
    languages: Arc<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    #[serde(rename = "videoId", default)]
    pub video_id: Option<String>,
}

/// Assembled server with routes and CORS middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    pub fn new(
        fetcher: Arc<dyn TranscriptFetcher>,
        languages: Vec<String>,
        origins: &AllowedOrigins,
        listen_address: SocketAddr,
    ) -> Self {
        let state = AppState {
            fetcher,
            languages: Arc::new(languages),
        };
        let router = router(state).layer(cors_layer(origins));
        Self { router, listen_address }
    }

    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests; blocks until SIGINT or SIGTERM
    pub async fn serve(self) -> eyre::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/transcript", post(get_transcript))
        .route("/health", get(health))
        .route("/", get(root))
        .with_state(state)
}

/// Build the Tower CORS layer from the configured allow-list.
/// Applied process-wide, so error responses carry the headers too.
fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::any());

    match origins {
        AllowedOrigins::Any => layer.allow_origin(AllowOrigin::any()),
        AllowedOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    }
}

async fn get_transcript(
    State(state): State<AppState>,
    Json(req): Json<TranscriptRequest>,
) -> Result<String, ApiError> {
    let raw = req.video_id.unwrap_or_default();
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::InvalidInput);
    }

    // Accept full YouTube URLs as a convenience; anything else passes
    // through opaquely for the backend to resolve
    let video_id = extract_video_id(raw).unwrap_or_else(|| raw.to_string());

    match state.fetcher.fetch(&video_id, &state.languages).await {
        Ok(transcript) => {
            info!(
                "Fetched transcript: video={video_id} lang={} segments={}",
                transcript.language,
                transcript.segments.len()
            );
            Ok(output::render_text(&transcript))
        }
        Err(e) => {
            let api: ApiError = e.into();
            match &api {
                ApiError::Upstream(msg) => error!("Transcript fetch failed: video={video_id} error={msg}"),
                _ => warn!("No transcript: video={video_id} error={api}"),
            }
            Err(api)
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "service": SERVICE_NAME }))
}

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /transcript": "Fetch transcript as plain text",
            "GET /health": "Health check",
            "GET /": "Service info"
        }
    }))
}

/// Wait for a shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_field_name() {
        let req: TranscriptRequest = serde_json::from_str(r#"{"videoId": "dQw4w9WgXcQ"}"#).unwrap();
        assert_eq!(req.video_id.as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_request_missing_field() {
        let req: TranscriptRequest = serde_json::from_str("{}").unwrap();
        assert!(req.video_id.is_none());
    }

    #[test]
    fn test_request_null_field() {
        let req: TranscriptRequest = serde_json::from_str(r#"{"videoId": null}"#).unwrap();
        assert!(req.video_id.is_none());
    }
}
