use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure kinds reported by transcript retrieval
#[derive(Debug, Error)]
pub enum FetchError {
    /// The video exists but has captions turned off
    #[error("transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    /// Caption tracks exist but none match the requested languages
    #[error("no transcript found for video {video_id} in requested languages {languages:?}")]
    NoTranscriptFound { video_id: String, languages: Vec<String> },

    /// YouTube refuses to play the video (removed, private, region-locked)
    #[error("video {video_id} is unavailable: {reason}")]
    VideoUnavailable { video_id: String, reason: String },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not extract InnerTube API key from watch page")]
    MissingApiKey,

    #[error("error parsing caption XML: {0}")]
    InvalidCaptionXml(String),
}

/// Error surfaced on the wire as a JSON `{"error": ...}` body
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("videoId must be a non-empty string")]
    InvalidInput,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::TranscriptsDisabled(_)
            | FetchError::NoTranscriptFound { .. }
            | FetchError::VideoUnavailable { .. } => ApiError::NotFound(err.to_string()),
            FetchError::Http(_) | FetchError::MissingApiKey | FetchError::InvalidCaptionXml(_) => {
                ApiError::Upstream(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
