//! Error types for the upload pipeline.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::io;
use std::process::ExitStatus;
use tracing::{error, warn};

pub const NO_VIDEO_MESSAGE: &str = "No video file uploaded.";
pub const INVALID_FILE_NAME_MESSAGE: &str = "Invalid file name.";
pub const MOVE_FAILED_MESSAGE: &str = "Error moving the video file.";
pub const PROBE_FAILED_MESSAGE: &str = "Error processing the video.";
pub const SPLIT_FAILED_MESSAGE: &str = "Error splitting the video.";
pub const STORAGE_FAILED_MESSAGE: &str = "Error preparing storage.";

/// A single ffmpeg/ffprobe invocation that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum MediaToolError {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error(transparent)]
    Tool(#[from] MediaToolError),

    #[error("unreadable ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("ffprobe reported no duration")]
    MissingDuration,

    #[error("invalid duration {0:?}")]
    InvalidDuration(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("segment {index} failed: {source}")]
    Segment {
        index: usize,
        #[source]
        source: MediaToolError,
    },

    #[error("worker pool closed")]
    PoolClosed(#[from] tokio::sync::AcquireError),

    #[error("segment job aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// Thumbnails are best-effort: this error is logged and never reaches a client.
#[derive(Debug, thiserror::Error)]
#[error("thumbnail {index} failed: {source}")]
pub struct ThumbnailError {
    pub index: usize,
    #[source]
    pub source: MediaToolError,
}

/// Everything that can end an upload request with a non-200 response.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no video file uploaded")]
    BadRequest,

    #[error("invalid file name {0:?}")]
    InvalidFileName(String),

    #[error("failed to store uploaded file: {0}")]
    FileMove(#[source] io::Error),

    #[error("failed to prepare output directories: {0}")]
    Storage(#[source] io::Error),

    #[error("failed to probe video: {0}")]
    Probe(#[from] ProbeError),

    #[error("failed to split video: {0}")]
    Split(#[from] SplitError),
}

impl PipelineError {
    pub fn status(&self) -> StatusCode {
        match self {
            PipelineError::BadRequest | PipelineError::InvalidFileName(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client. Causes stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            PipelineError::BadRequest => NO_VIDEO_MESSAGE,
            PipelineError::InvalidFileName(_) => INVALID_FILE_NAME_MESSAGE,
            PipelineError::FileMove(_) => MOVE_FAILED_MESSAGE,
            PipelineError::Storage(_) => STORAGE_FAILED_MESSAGE,
            PipelineError::Probe(_) => PROBE_FAILED_MESSAGE,
            PipelineError::Split(_) => SPLIT_FAILED_MESSAGE,
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "upload failed");
        } else {
            warn!(error = %self, "upload rejected");
        }
        (status, self.public_message()).into_response()
    }
}
